use serde::{Deserialize, Serialize};

/// Timing curve applied to a tween's normalized time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    /// The hero's symmetric ease-in-out, `cubic-bezier(0.45, 0, 0.55, 1)`.
    pub const HERO: Self = Self::CubicBezier {
        x1: 0.45,
        y1: 0.0,
        x2: 0.55,
        y2: 1.0,
    };

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier_ease(t, 0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => cubic_bezier_ease(t, 0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => cubic_bezier_ease(t, 0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::HERO
    }
}

impl Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap as _;

        match *self {
            Self::Linear => serializer.serialize_str("linear"),
            Self::EaseIn => serializer.serialize_str("ease_in"),
            Self::EaseOut => serializer.serialize_str("ease_out"),
            Self::EaseInOut => serializer.serialize_str("ease_in_out"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("cubic_bezier", &[x1, y1, x2, y2])?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            CubicBezier { cubic_bezier: [f64; 4] },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => match name.as_str() {
                "linear" => Ok(Self::Linear),
                "ease_in" | "easeIn" => Ok(Self::EaseIn),
                "ease_out" | "easeOut" => Ok(Self::EaseOut),
                "ease_in_out" | "easeInOut" => Ok(Self::EaseInOut),
                "hero" => Ok(Self::HERO),
                other => Err(serde::de::Error::custom(format!(
                    "unknown ease \"{other}\" (expected linear, ease_in, ease_out, ease_in_out, hero)"
                ))),
            },
            Repr::CubicBezier { cubic_bezier } => {
                let [x1, y1, x2, y2] = cubic_bezier;
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(serde::de::Error::custom(
                        "cubic_bezier x control points must be within [0, 1]",
                    ));
                }
                Ok(Self::CubicBezier { x1, y1, x2, y2 })
            }
        }
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Solve bx(u) = x for u, then evaluate by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        if x_t.abs() < 1e-9 {
            return sample_curve(y1, y2, t);
        }
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..32 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-9 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}
