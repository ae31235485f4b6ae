use crate::animation::lerp::Lerp;
use crate::assets::color::Rgba8;
use crate::assets::shape_set::ShapeSet;
use crate::foundation::error::{MorphError, MorphResult};
use crate::morph::interpolate::{OutlineInterpolator, OutlineMorph};
use crate::morph::outline::Outline;

/// One morph per step: entry `i` goes from shape `i` to shape `(i + 1) % N`.
#[derive(Clone, Debug)]
pub struct MorphTable {
    morphs: Vec<OutlineMorph>,
}

impl MorphTable {
    #[tracing::instrument(level = "debug", skip_all, fields(shapes = shapes.len()))]
    pub fn build(shapes: &[Outline], interpolator: &dyn OutlineInterpolator) -> MorphResult<Self> {
        if shapes.is_empty() {
            return Err(MorphError::validation("morph table needs at least one shape"));
        }
        let n = shapes.len();
        let morphs = (0..n)
            .map(|i| interpolator.interpolate(&shapes[i], &shapes[(i + 1) % n]))
            .collect::<MorphResult<Vec<_>>>()?;
        Ok(Self { morphs })
    }

    pub fn len(&self) -> usize {
        self.morphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.morphs.is_empty()
    }

    pub fn step(&self, index: usize) -> &OutlineMorph {
        &self.morphs[index % self.morphs.len()]
    }
}

/// What a frame shows for a given progress value.
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    pub progress: f64,
    /// Shape the current step starts from (`floor(progress) mod N`).
    pub index: usize,
    pub outline: Outline,
    pub color: Rgba8,
}

/// Outline and color for `progress`, blended between shape `floor(progress)` and the next one by
/// the fractional part. Progress is taken modulo `N`, so `N` reads the same as `0`.
pub fn derive_visual(progress: f64, morphs: &MorphTable, colors: &[Rgba8]) -> MorphResult<Visual> {
    if morphs.is_empty() {
        return Err(MorphError::validation("cannot derive a visual from an empty table"));
    }
    if morphs.len() != colors.len() {
        return Err(MorphError::validation(format!(
            "morph table has {} steps but {} colors",
            morphs.len(),
            colors.len()
        )));
    }
    Ok(derive_checked(progress, morphs, colors))
}

fn derive_checked(progress: f64, morphs: &MorphTable, colors: &[Rgba8]) -> Visual {
    let n = morphs.len();
    let p = if progress.is_finite() {
        progress.rem_euclid(n as f64)
    } else {
        0.0
    };
    let index = (p.floor() as usize).min(n - 1);
    let frac = (p - index as f64).clamp(0.0, 1.0);

    let outline = morphs.step(index).at(frac);
    let color = Rgba8::lerp(&colors[index], &colors[(index + 1) % n], frac);

    Visual {
        progress,
        index,
        outline,
        color,
    }
}

/// A shape set with its step morphs precomputed; the per-frame read side of a cycle.
#[derive(Clone, Debug)]
pub struct ShapeMorpher {
    set: ShapeSet,
    table: MorphTable,
}

impl ShapeMorpher {
    pub fn new(set: ShapeSet, interpolator: &dyn OutlineInterpolator) -> MorphResult<Self> {
        let table = MorphTable::build(set.shapes(), interpolator)?;
        Ok(Self { set, table })
    }

    pub fn set(&self) -> &ShapeSet {
        &self.set
    }

    pub fn table(&self) -> &MorphTable {
        &self.table
    }

    pub fn visual(&self, progress: f64) -> Visual {
        derive_checked(progress, &self.table, self.set.colors())
    }
}
