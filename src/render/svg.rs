use std::fmt::Write as _;

use crate::foundation::core::VIEW_BOX;
use crate::morph::visual::Visual;

/// Standalone SVG document for one frame of the hero.
///
/// The outline sits in a `24x24` view box under `translate(1 1) scale(0.92)` and is filled with the
/// frame's blended color. `size` sets the rendered width/height in pixels when given.
pub fn render_svg(visual: &Visual, size: Option<u32>) -> String {
    let mut out = String::with_capacity(visual.outline.d().len() + 256);
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {VIEW_BOX} {VIEW_BOX}\""
    );
    if let Some(px) = size {
        let _ = write!(out, " width=\"{px}\" height=\"{px}\"");
    }
    out.push_str(">\n");
    out.push_str("  <g transform=\"translate(1 1) scale(0.92)\">\n");

    let color = visual.color;
    let _ = write!(
        out,
        "    <path d=\"{}\" fill=\"#{:02x}{:02x}{:02x}\"",
        escape_attr(visual.outline.d()),
        color.r,
        color.g,
        color.b
    );
    if color.a != 255 {
        let _ = write!(out, " fill-opacity=\"{:.3}\"", f64::from(color.a) / 255.0);
    }
    out.push_str("/>\n  </g>\n</svg>\n");
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
