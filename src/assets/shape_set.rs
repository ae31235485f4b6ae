use std::io::Read;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::animation::tween::TweenSpec;
use crate::assets::color::Rgba8;
use crate::assets::hero;
use crate::foundation::error::{MorphError, MorphResult};
use crate::morph::interpolate::ResampleInterpolator;
use crate::morph::outline::Outline;

/// Fixed, non-empty list of outlines with a parallel color and label per entry.
///
/// Index `i` of every list belongs together; the lengths are checked once at construction and the
/// set is immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSet {
    shapes: Vec<Outline>,
    colors: Vec<Rgba8>,
    labels: Vec<String>,
}

impl ShapeSet {
    pub fn new(shapes: Vec<Outline>, colors: Vec<Rgba8>, labels: Vec<String>) -> MorphResult<Self> {
        if shapes.is_empty() {
            return Err(MorphError::validation("shape set must contain at least one shape"));
        }
        if colors.len() != shapes.len() {
            return Err(MorphError::validation(format!(
                "shape set has {} shapes but {} colors",
                shapes.len(),
                colors.len()
            )));
        }
        if labels.len() != shapes.len() {
            return Err(MorphError::validation(format!(
                "shape set has {} shapes but {} labels",
                shapes.len(),
                labels.len()
            )));
        }
        Ok(Self {
            shapes,
            colors,
            labels,
        })
    }

    /// The six-icon set the hero ships with.
    pub fn hero() -> MorphResult<Self> {
        let shapes = hero::SHAPES
            .iter()
            .map(|d| Outline::parse(d))
            .collect::<MorphResult<Vec<_>>>()?;
        let colors = hero::COLORS
            .iter()
            .map(|c| c.parse::<Rgba8>())
            .collect::<MorphResult<Vec<_>>>()?;
        let labels = hero::LABELS.iter().map(|l| (*l).to_owned()).collect();
        Self::new(shapes, colors, labels)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Never true for a set built through `new`.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Outline] {
        &self.shapes
    }

    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label for `index`, wrapping around the set.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index % self.labels.len()]
    }
}

/// Timing and morph settings for a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CycleConfig {
    /// Seconds per step (one shape to the next).
    #[serde(default = "default_step_secs")]
    pub step_secs: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Longest edge allowed when resampling outlines; `null` disables densification.
    #[serde(default = "default_max_segment_length")]
    pub max_segment_length: Option<f64>,
}

fn default_step_secs() -> f64 {
    1.0
}

fn default_max_segment_length() -> Option<f64> {
    Some(0.2)
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            step_secs: default_step_secs(),
            ease: Ease::HERO,
            max_segment_length: default_max_segment_length(),
        }
    }
}

impl CycleConfig {
    pub fn validate(&self) -> MorphResult<()> {
        if !self.step_secs.is_finite() || self.step_secs <= 0.0 {
            return Err(MorphError::validation(format!(
                "step_secs must be finite and > 0 (got {})",
                self.step_secs
            )));
        }
        ResampleInterpolator::new(self.max_segment_length)?;
        Ok(())
    }

    pub fn tween_spec(&self) -> MorphResult<TweenSpec> {
        TweenSpec::new(self.step_secs, self.ease)
    }

    pub fn interpolator(&self) -> MorphResult<ResampleInterpolator> {
        ResampleInterpolator::new(self.max_segment_length)
    }
}

/// A shape set together with its cycle settings, as loaded from JSON.
///
/// ```json
/// { "shapes": ["M0 0 L1 0 L1 1 Z", "..."], "colors": ["#f97316", "..."],
///   "labels": ["Creative", "..."], "step_secs": 1.0, "ease": "hero" }
/// ```
///
/// `labels` defaults to `#0`, `#1`, ...; the timing fields default to [`CycleConfig::default`].
#[derive(Clone, Debug, PartialEq)]
pub struct MorphDocument {
    pub set: ShapeSet,
    pub config: CycleConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentRepr {
    shapes: Vec<String>,
    colors: Vec<Rgba8>,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default = "default_step_secs")]
    step_secs: f64,
    #[serde(default)]
    ease: Ease,
    #[serde(default = "default_max_segment_length")]
    max_segment_length: Option<f64>,
}

impl MorphDocument {
    pub fn hero() -> MorphResult<Self> {
        Ok(Self {
            set: ShapeSet::hero()?,
            config: CycleConfig::default(),
        })
    }

    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        let repr: DocumentRepr = serde_json::from_str(s)?;
        Self::from_repr(repr)
    }

    pub fn from_reader(r: impl Read) -> MorphResult<Self> {
        let repr: DocumentRepr = serde_json::from_reader(r)?;
        Self::from_repr(repr)
    }

    pub fn load(path: &Path) -> MorphResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open shape set '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    fn from_repr(repr: DocumentRepr) -> MorphResult<Self> {
        let shapes = repr
            .shapes
            .iter()
            .enumerate()
            .map(|(i, d)| {
                Outline::parse(d).map_err(|e| MorphError::validation(format!("shapes[{i}]: {e}")))
            })
            .collect::<MorphResult<Vec<_>>>()?;
        let labels = repr
            .labels
            .unwrap_or_else(|| (0..shapes.len()).map(|i| format!("#{i}")).collect());

        let config = CycleConfig {
            step_secs: repr.step_secs,
            ease: repr.ease,
            max_segment_length: repr.max_segment_length,
        };
        config.validate()?;

        Ok(Self {
            set: ShapeSet::new(shapes, repr.colors, labels)?,
            config,
        })
    }
}
