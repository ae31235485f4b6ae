use crate::foundation::error::{MorphError, MorphResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> MorphResult<Self> {
        if den == 0 {
            return Err(MorphError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MorphError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        // Tolerate float noise so 1.0s at 60fps is 60 frames, not 61.
        let frames = secs * self.as_f64();
        (frames - 1e-9).ceil().max(0.0) as u64
    }
}

/// Side length of the square view box every outline is authored in.
pub const VIEW_BOX: f64 = 24.0;

/// Placement of the outline inside the view box: `translate(1 1) scale(0.92)`.
pub fn outline_placement() -> Affine {
    Affine::translate(Vec2::new(1.0, 1.0)) * Affine::scale(0.92)
}
