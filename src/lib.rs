//! morphloop drives an endlessly cycling icon morph.
//!
//! A [`ShapeSet`] holds a fixed, circular list of SVG outlines with a color and label each. A
//! [`ShapeCycle`] tweens a progress value from the current index to the next, one eased step at a
//! time, and tells an observer whenever a step lands. [`derive_visual`] turns any progress value
//! into the outline and color to draw, which the renderers consume.
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`MorphDocument`] (shape set + [`CycleConfig`]), built in via
//!    [`MorphDocument::hero`] or parsed from JSON
//! 2. **Prepare**: [`ShapeMorpher`] precomputes one [`OutlineMorph`] per step through an
//!    [`OutlineInterpolator`]
//! 3. **Drive**: [`ShapeCycle::tick`] once per frame (wrapped by [`CyclePlayer`])
//! 4. **Draw**: [`CpuRenderer`] for pixels, [`render_svg`] for markup, [`FfmpegEncoder`] for MP4
//!
//! Everything runs on the caller's thread; nothing here is `Send`.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod encode;
mod foundation;
mod morph;
mod render;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use animation::tween::{FrameScheduler, MotionValue, TweenHandle, TweenScheduler, TweenSpec};
pub use assets::color::Rgba8;
pub use assets::shape_set::{CycleConfig, MorphDocument, ShapeSet};
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use foundation::core::{Affine, BezPath, Fps, FrameIndex, Point, VIEW_BOX, outline_placement};
pub use foundation::error::{MorphError, MorphResult};
pub use morph::cycle::{ShapeCycle, StepObserver};
pub use morph::interpolate::{ENDPOINT_SNAP, OutlineInterpolator, OutlineMorph, ResampleInterpolator};
pub use morph::outline::Outline;
pub use morph::visual::{MorphTable, ShapeMorpher, Visual, derive_visual};
pub use render::cpu::{CpuRenderer, FrameRGBA, RenderSettings};
pub use render::pipeline::{CyclePlayer, RenderedCycle, StepEvent, render_frames, render_to_mp4};
pub use render::svg::render_svg;
