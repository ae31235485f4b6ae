use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::shape_set::MorphDocument;
use crate::encode::ffmpeg::{EncodeConfig, FfmpegEncoder};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::morph::cycle::ShapeCycle;
use crate::morph::visual::{ShapeMorpher, Visual};
use crate::render::cpu::{CpuRenderer, FrameRGBA};

/// A completed step as seen by the host: when it landed and what label is now showing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StepEvent {
    pub frame: FrameIndex,
    pub time_secs: f64,
    pub index: usize,
    pub label: String,
}

/// Host loop around a [`ShapeCycle`]: ticks it at a fixed frame rate and reads visuals back.
///
/// Frame `0` is the state right after attach; every [`CyclePlayer::advance`] moves one frame.
pub struct CyclePlayer {
    morpher: ShapeMorpher,
    cycle: ShapeCycle,
    fps: Fps,
    step_secs: f64,
    frame: FrameIndex,
    pending: Rc<RefCell<Vec<usize>>>,
}

impl CyclePlayer {
    pub fn new(doc: &MorphDocument, fps: Fps) -> MorphResult<Self> {
        doc.config.validate()?;
        let morpher = ShapeMorpher::new(doc.set.clone(), &doc.config.interpolator()?)?;
        let mut cycle = ShapeCycle::new(doc.set.len(), doc.config.tween_spec()?)?;

        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        cycle.attach(Some(Box::new(move |index| sink.borrow_mut().push(index))))?;

        Ok(Self {
            morpher,
            cycle,
            fps,
            step_secs: doc.config.step_secs,
            frame: FrameIndex(0),
            pending,
        })
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Ticks one step takes to land. A step completes on the first frame whose elapsed time reaches
    /// the step length, so partial frames round up.
    pub fn frames_per_step(&self) -> u64 {
        self.fps.secs_to_frames_ceil(self.step_secs).max(1)
    }

    /// Ticks for one full trip around the set.
    pub fn frames_per_cycle(&self) -> u64 {
        self.frames_per_step() * self.cycle.len() as u64
    }

    pub fn cycle(&self) -> &ShapeCycle {
        &self.cycle
    }

    pub fn morpher(&self) -> &ShapeMorpher {
        &self.morpher
    }

    pub fn visual(&self) -> Visual {
        self.morpher.visual(self.cycle.progress())
    }

    /// Label of the current index.
    pub fn current_label(&self) -> &str {
        self.morpher.set().label(self.cycle.current_index())
    }

    /// Move one frame forward, returning the step that completed on it, if any.
    pub fn advance(&mut self) -> MorphResult<Option<StepEvent>> {
        self.cycle.tick(self.fps.frame_duration_secs())?;
        self.frame = FrameIndex(self.frame.0 + 1);

        let index = self.pending.borrow_mut().pop();
        Ok(index.map(|index| StepEvent {
            frame: self.frame,
            time_secs: self.fps.frames_to_secs(self.frame.0),
            index,
            label: self.morpher.set().label(index).to_owned(),
        }))
    }

    /// Advance until `frame` is reached, collecting the steps passed on the way.
    pub fn seek(&mut self, frame: FrameIndex) -> MorphResult<Vec<StepEvent>> {
        if frame < self.frame {
            return Err(MorphError::validation(format!(
                "cannot seek backwards from frame {} to {}",
                self.frame.0, frame.0
            )));
        }
        let mut steps = Vec::new();
        while self.frame < frame {
            if let Some(step) = self.advance()? {
                steps.push(step);
            }
        }
        Ok(steps)
    }

    /// Frame closest to `secs` at this player's rate.
    pub fn frame_at_secs(&self, secs: f64) -> MorphResult<FrameIndex> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(MorphError::validation(format!(
                "time must be finite and >= 0 (got {secs})"
            )));
        }
        Ok(FrameIndex((secs * self.fps.as_f64()).round() as u64))
    }
}

/// Frames plus the steps observed while producing them.
#[derive(Clone, Debug)]
pub struct RenderedCycle {
    pub frames: Vec<FrameRGBA>,
    pub steps: Vec<StepEvent>,
}

/// Render `count` consecutive frames starting at the player's current frame.
#[tracing::instrument(level = "debug", skip(player, renderer))]
pub fn render_frames(
    player: &mut CyclePlayer,
    count: u64,
    renderer: &mut CpuRenderer,
) -> MorphResult<RenderedCycle> {
    if count == 0 {
        return Err(MorphError::validation("frame count must be non-zero"));
    }

    let mut frames = Vec::with_capacity(count.min(4096) as usize);
    let mut steps = Vec::new();
    for i in 0..count {
        if i > 0
            && let Some(step) = player.advance()?
        {
            steps.push(step);
        }
        frames.push(renderer.render(&player.visual())?);
    }
    Ok(RenderedCycle { frames, steps })
}

/// Render `count` frames straight into an MP4 via `ffmpeg`. Returns the steps observed.
#[tracing::instrument(level = "debug", skip(player, renderer, cfg), fields(out = %cfg.out_path.display()))]
pub fn render_to_mp4(
    player: &mut CyclePlayer,
    count: u64,
    renderer: &mut CpuRenderer,
    cfg: EncodeConfig,
) -> MorphResult<Vec<StepEvent>> {
    if count == 0 {
        return Err(MorphError::validation("frame count must be non-zero"));
    }
    if cfg.width != renderer.size() || cfg.height != renderer.size() {
        return Err(MorphError::validation(format!(
            "encoder is {}x{} but renderer draws {}x{}",
            cfg.width,
            cfg.height,
            renderer.size(),
            renderer.size()
        )));
    }

    let mut encoder = FfmpegEncoder::new(cfg)?;
    let mut steps = Vec::new();
    for i in 0..count {
        if i > 0
            && let Some(step) = player.advance()?
        {
            steps.push(step);
        }
        let frame = renderer.render(&player.visual())?;
        encoder.encode_frame(&frame)?;
    }
    let written = encoder.finish()?;
    tracing::info!(frames = written, steps = steps.len(), "mp4 written");
    Ok(steps)
}
