use kurbo::{BezPath, Point};

use crate::animation::lerp::Lerp;
use crate::foundation::error::{MorphError, MorphResult};
use crate::morph::outline::{FLATTEN_TOLERANCE, Outline, centroid, signed_area};

/// Parameter distance from either end at which a morph snaps to the exact source/target outline.
pub const ENDPOINT_SNAP: f64 = 1e-4;

/// Upper bound on points per ring, whatever the segment length asks for.
const MAX_RING_POINTS: usize = 4096;

/// Produces a shape morph between two outlines.
pub trait OutlineInterpolator {
    fn interpolate(&self, from: &Outline, to: &Outline) -> MorphResult<OutlineMorph>;
}

/// Precomputed morph between two outlines, sampled with [`OutlineMorph::at`].
#[derive(Clone, Debug)]
pub struct OutlineMorph {
    from: Outline,
    to: Outline,
    rings: Vec<RingPair>,
}

#[derive(Clone, Debug)]
struct RingPair {
    a: Vec<Point>,
    b: Vec<Point>,
}

impl OutlineMorph {
    pub fn from(&self) -> &Outline {
        &self.from
    }

    pub fn to(&self) -> &Outline {
        &self.to
    }

    /// Number of matched ring pairs.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Intermediate outline at `t` (clamped to `[0, 1]`).
    ///
    /// Within [`ENDPOINT_SNAP`] of either end the original outline is returned untouched.
    pub fn at(&self, t: f64) -> Outline {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t < ENDPOINT_SNAP {
            return self.from.clone();
        }
        if t > 1.0 - ENDPOINT_SNAP {
            return self.to.clone();
        }

        let mut path = BezPath::new();
        for pair in &self.rings {
            let mut points = pair
                .a
                .iter()
                .zip(&pair.b)
                .map(|(a, b)| <Point as Lerp>::lerp(a, b, t));
            let Some(first) = points.next() else {
                continue;
            };
            path.move_to(round_point(first));
            for p in points {
                path.line_to(round_point(p));
            }
            path.close_path();
        }
        Outline::from_path(path)
    }
}

fn round_point(p: Point) -> Point {
    fn r(v: f64) -> f64 {
        (v * 1000.0).round() / 1000.0
    }
    Point::new(r(p.x), r(p.y))
}

/// Point-resampling morph in the manner of flubber.
///
/// Both outlines are flattened into rings. Rings are paired largest-first; when one side has more
/// rings, the spares are paired with a point at their own centroid so they grow or shrink in
/// place. Each pair is densified so no edge exceeds `max_segment_length`, padded to equal point
/// counts by splitting the longest edges, wound the same way, and rotated to the start offset with
/// the least squared travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResampleInterpolator {
    max_segment_length: Option<f64>,
}

impl ResampleInterpolator {
    /// flubber's default segment length.
    pub const DEFAULT_MAX_SEGMENT_LENGTH: f64 = 10.0;

    pub fn new(max_segment_length: Option<f64>) -> MorphResult<Self> {
        if let Some(len) = max_segment_length
            && (!len.is_finite() || len <= 0.0)
        {
            return Err(MorphError::validation(format!(
                "max_segment_length must be finite and > 0 (got {len})"
            )));
        }
        Ok(Self { max_segment_length })
    }

    pub fn max_segment_length(&self) -> Option<f64> {
        self.max_segment_length
    }
}

impl Default for ResampleInterpolator {
    fn default() -> Self {
        Self {
            max_segment_length: Some(Self::DEFAULT_MAX_SEGMENT_LENGTH),
        }
    }
}

impl OutlineInterpolator for ResampleInterpolator {
    fn interpolate(&self, from: &Outline, to: &Outline) -> MorphResult<OutlineMorph> {
        let mut a_rings = from.rings(FLATTEN_TOLERANCE);
        let mut b_rings = to.rings(FLATTEN_TOLERANCE);
        if a_rings.is_empty() {
            return Err(MorphError::validation(format!(
                "outline has no drawable rings: \"{}\"",
                from.d()
            )));
        }
        if b_rings.is_empty() {
            return Err(MorphError::validation(format!(
                "outline has no drawable rings: \"{}\"",
                to.d()
            )));
        }

        sort_by_area_desc(&mut a_rings);
        sort_by_area_desc(&mut b_rings);

        let count = a_rings.len().max(b_rings.len());
        let mut rings = Vec::with_capacity(count);
        for i in 0..count {
            let (a, b) = match (a_rings.get(i), b_rings.get(i)) {
                (Some(a), Some(b)) => (a.clone(), b.clone()),
                (Some(a), None) => (a.clone(), vec![centroid(a)]),
                (None, Some(b)) => (vec![centroid(b)], b.clone()),
                (None, None) => unreachable!("index below the longer ring list"),
            };
            rings.push(self.pair_rings(a, b));
        }

        tracing::trace!(
            from_rings = a_rings.len(),
            to_rings = b_rings.len(),
            "outline morph prepared"
        );

        Ok(OutlineMorph {
            from: from.clone(),
            to: to.clone(),
            rings,
        })
    }
}

impl ResampleInterpolator {
    fn pair_rings(&self, a: Vec<Point>, b: Vec<Point>) -> RingPair {
        let mut a = self.densify(a);
        let mut b = self.densify(b);

        let n = a.len().max(b.len()).max(3);
        pad_to(&mut a, n);
        pad_to(&mut b, n);

        // Matching winding keeps the morph from turning inside out.
        if signed_area(&a) * signed_area(&b) < 0.0 {
            b.reverse();
        }

        let offset = best_rotation(&a, &b);
        b.rotate_left(offset);
        RingPair { a, b }
    }

    fn densify(&self, ring: Vec<Point>) -> Vec<Point> {
        let Some(max_len) = self.max_segment_length else {
            return ring;
        };
        if ring.len() < 2 {
            return ring;
        }

        let mut out = Vec::with_capacity(ring.len());
        for (i, &p) in ring.iter().enumerate() {
            let q = ring[(i + 1) % ring.len()];
            out.push(p);
            let pieces = (p.distance(q) / max_len).ceil() as usize;
            for k in 1..pieces {
                if out.len() >= MAX_RING_POINTS {
                    break;
                }
                out.push(p.lerp(q, k as f64 / pieces as f64));
            }
        }
        out
    }
}

fn sort_by_area_desc(rings: &mut [Vec<Point>]) {
    rings.sort_by(|a, b| signed_area(b).abs().total_cmp(&signed_area(a).abs()));
}

/// Grow `ring` to `n` points by repeatedly splitting its longest edge.
fn pad_to(ring: &mut Vec<Point>, n: usize) {
    if ring.is_empty() {
        return;
    }
    if ring.len() == 1 {
        let p = ring[0];
        ring.resize(n, p);
        return;
    }
    while ring.len() < n {
        let len = ring.len();
        let (idx, _) = (0..len)
            .map(|i| (i, ring[i].distance(ring[(i + 1) % len])))
            .fold((0, f64::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 { cur } else { best }
            });
        let mid = ring[idx].midpoint(ring[(idx + 1) % len]);
        ring.insert(idx + 1, mid);
    }
}

/// Rotation of `b` minimizing the summed squared distance to `a` (equal lengths).
fn best_rotation(a: &[Point], b: &[Point]) -> usize {
    let n = a.len();
    let mut best = (0, f64::INFINITY);
    for offset in 0..n {
        let cost: f64 = a
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let q = b[(i + offset) % n];
                (p.x - q.x).powi(2) + (p.y - q.y).powi(2)
            })
            .sum();
        if cost < best.1 {
            best = (offset, cost);
        }
    }
    best.0
}
