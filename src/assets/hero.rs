//! The built-in hero set: six icons, each with a color and the label shown while it is current.

pub(crate) const LABELS: [&str; 6] = [
    "Creative",
    "Frontend",
    "Multicultural",
    "Agile",
    "Product Designer",
    "Tech + Design",
];

pub(crate) const COLORS: [&str; 6] = [
    "#f97316", "#0ea5e9", "#22c55e", "#a855f7", "#f87171", "#eab308",
];

pub(crate) const SHAPES: [&str; 6] = [
    // bulb
    "M12 2a4 4 0 0 0-4 4c0 1.8.8 2.8 1.7 3.8.7.8 1.3 1.6 1.3 2.7h3c0-1.1.6-1.9 1.3-2.7.9-1 1.7-2 1.7-3.8a4 4 0 0 0-4-4zm-2 13v2h4v-2h-4zm0 3v1h4v-1h-4z",
    // browser window
    "M3 5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V5zm2 0v3h16V5H5zm3 5h10v7H8v-7z",
    // globe
    "M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20zm0 2c2.3 0 4.2 3.2 4.7 7.5H7.3C7.8 7.2 9.7 4 12 4zm-7 8h14a8 8 0 0 1-14 0z",
    // board
    "M4 5a2 2 0 0 1 2-2h12a2 2 0 0 1 2 2v14H4V5zm4 2H6v4h2V7zm0 6H6v4h2v-4zm5-6h-3v8h3V7zm5 0h-3v10h3V7z",
    // chat bubbles
    "M7 4a3 3 0 0 1 3-3h4a3 3 0 0 1 3 3v6a3 3 0 0 1-3 3h-4a3 3 0 0 1-3-3V4zm-4 7a3 3 0 0 1 3-3h4v3a5 5 0 0 0 5 5h3v2a3 3 0 0 1-3 3H6a3 3 0 0 1-3-3v-7z",
    // yin-yang
    "M12 2a10 10 0 1 0 0 20 6 6 0 0 0 0-12 3 3 0 1 1 0-6z",
];
