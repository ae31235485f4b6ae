use std::fmt;
use std::sync::Arc;

use kurbo::{BezPath, PathEl, Point};

use crate::foundation::error::{MorphError, MorphResult};

/// Flattening tolerance in view-box units (the box is 24 units wide).
pub(crate) const FLATTEN_TOLERANCE: f64 = 0.01;

/// A filled 2D icon outline: the SVG path `d` string it was authored as, plus its parsed form.
#[derive(Clone, Debug)]
pub struct Outline {
    d: Arc<str>,
    path: Arc<BezPath>,
}

impl Outline {
    /// Parse an SVG path `d` attribute.
    pub fn parse(d: &str) -> MorphResult<Self> {
        let trimmed = d.trim();
        if trimmed.is_empty() {
            return Err(MorphError::validation("outline path data must be non-empty"));
        }
        let path = BezPath::from_svg(trimmed)
            .map_err(|e| MorphError::validation(format!("invalid outline path data: {e}")))?;
        if path.elements().is_empty() {
            return Err(MorphError::validation("outline path data has no segments"));
        }
        Ok(Self {
            d: Arc::from(trimmed),
            path: Arc::new(path),
        })
    }

    /// Build from an already constructed path; `d` is regenerated from it.
    pub fn from_path(path: BezPath) -> Self {
        Self {
            d: Arc::from(path.to_svg()),
            path: Arc::new(path),
        }
    }

    pub fn d(&self) -> &str {
        &self.d
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Polyline rings of the flattened outline, one per subpath.
    ///
    /// A trailing point equal to the ring start is dropped; rings with fewer than two distinct
    /// points are skipped.
    pub fn rings(&self, tolerance: f64) -> Vec<Vec<Point>> {
        let mut rings = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        fn finish(current: &mut Vec<Point>, rings: &mut Vec<Vec<Point>>) {
            let mut ring = std::mem::take(current);
            ring.dedup_by(|a, b| a.distance(*b) < 1e-9);
            if ring.len() > 1 && ring[0].distance(ring[ring.len() - 1]) < 1e-9 {
                ring.pop();
            }
            if ring.len() >= 2 {
                rings.push(ring);
            }
        }

        kurbo::flatten(self.path.iter(), tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                finish(&mut current, &mut rings);
                current.push(p);
            }
            PathEl::LineTo(p) => current.push(p),
            PathEl::ClosePath => finish(&mut current, &mut rings),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        finish(&mut current, &mut rings);
        rings
    }
}

impl PartialEq for Outline {
    fn eq(&self, other: &Self) -> bool {
        self.d == other.d
    }
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.d)
    }
}

impl std::str::FromStr for Outline {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        Self::parse(s)
    }
}

/// Shoelace area; positive for counter-clockwise rings in a y-up frame.
pub(crate) fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

pub(crate) fn centroid(ring: &[Point]) -> Point {
    if ring.is_empty() {
        return Point::ZERO;
    }
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_keeps_source_text() {
        let o = Outline::parse("  M0 0 L10 0 L10 10 Z ").unwrap();
        assert_eq!(o.d(), "M0 0 L10 0 L10 10 Z");
        assert_eq!(o.to_string(), o.d());
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(Outline::parse("").is_err());
        assert!(Outline::parse("   ").is_err());
        assert!(Outline::parse("hello world").is_err());
    }

    #[test]
    fn splits_subpaths_into_rings() {
        let o = Outline::parse("M0 0 L4 0 L4 4 L0 4 Z M10 10 L12 10 L12 12 Z").unwrap();
        let rings = o.rings(FLATTEN_TOLERANCE);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[1].len(), 3);
        assert!((signed_area(&rings[0]).abs() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn flattens_arcs() {
        let o = Outline::parse("M12 2a10 10 0 1 0 0 20 10 10 0 0 0 0-20z").unwrap();
        let rings = o.rings(FLATTEN_TOLERANCE);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].len() > 16);
        let area = signed_area(&rings[0]).abs();
        assert!((area - std::f64::consts::PI * 100.0).abs() < 2.0, "{area}");
        let c = centroid(&rings[0]);
        assert!((c.x - 12.0).abs() < 0.5 && (c.y - 12.0).abs() < 0.5);
    }
}
