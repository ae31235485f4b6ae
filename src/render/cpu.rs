use crate::foundation::core::{Affine, BezPath, Point, VIEW_BOX, outline_placement};
use crate::foundation::error::{MorphError, MorphResult};
use crate::morph::visual::Visual;

/// Rendered pixels, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored (premultiplied when `premultiplied` is set).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Background painted under the outline (straight alpha). `None` leaves it transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Rasterizes hero frames on the CPU with `vello_cpu`.
pub struct CpuRenderer {
    size: u16,
    settings: RenderSettings,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRenderer {
    /// Renderer for square frames of `size` pixels.
    pub fn new(size: u32, settings: RenderSettings) -> MorphResult<Self> {
        if size == 0 {
            return Err(MorphError::validation("render size must be non-zero"));
        }
        let size: u16 = size
            .try_into()
            .map_err(|_| MorphError::validation("render size exceeds u16"))?;
        Ok(Self {
            size,
            settings,
            pixmap: vello_cpu::Pixmap::new(size, size),
        })
    }

    pub fn size(&self) -> u32 {
        u32::from(self.size)
    }

    /// Outline-to-pixel transform: view box scaled to the frame, then the hero placement.
    pub fn transform(&self) -> Affine {
        Affine::scale(f64::from(self.size) / VIEW_BOX) * outline_placement()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(index = visual.index))]
    pub fn render(&mut self, visual: &Visual) -> MorphResult<FrameRGBA> {
        if visual.outline.path().elements().is_empty() {
            return Err(MorphError::render("outline has no segments to fill"));
        }

        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        let mut ctx = vello_cpu::RenderContext::new(self.size, self.size);

        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            let side = f64::from(self.size);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, side, side));
        }

        let c = visual.color;
        ctx.set_transform(affine_to_cpu(self.transform()));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.fill_path(&bezpath_to_cpu(visual.outline.path()));

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: self.size(),
            height: self.size(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
