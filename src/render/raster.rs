use std::path::Path;

use crate::animate::canvas::{Canvas, Pen};
use crate::foundation::core::{Point, Rgba8Premul, Viewport};
use crate::foundation::error::{CelticError, CelticResult};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA at pixel `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> CelticResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| anyhow::anyhow!("write png '{}': {e}", path.display()))?;
        Ok(())
    }
}

/// CPU canvas backed by `vello_cpu`.
///
/// Strokes accumulate in the render context until the next [`Canvas::clear`];
/// [`RasterCanvas::snapshot`] rasterizes everything drawn so far.
pub struct RasterCanvas {
    viewport: Viewport,
    width: u16,
    height: u16,
    background: Rgba8Premul,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    strokes: usize,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("viewport", &self.viewport)
            .field("background", &self.background)
            .field("strokes", &self.strokes)
            .finish_non_exhaustive()
    }
}

impl RasterCanvas {
    pub fn new(viewport: Viewport, background: Rgba8Premul) -> CelticResult<Self> {
        let width: u16 = viewport
            .width
            .try_into()
            .map_err(|_| CelticError::validation("canvas width exceeds u16"))?;
        let height: u16 = viewport
            .height
            .try_into()
            .map_err(|_| CelticError::validation("canvas height exceeds u16"))?;
        let mut canvas = Self {
            viewport,
            width,
            height,
            background,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            strokes: 0,
        };
        canvas.clear();
        Ok(canvas)
    }

    /// Strokes drawn since the last clear.
    pub fn stroke_count(&self) -> usize {
        self.strokes
    }

    /// Rasterize everything drawn since the last clear.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    pub fn save_png(&mut self, path: impl AsRef<Path>) -> CelticResult<()> {
        self.snapshot().save_png(path)
    }
}

impl Canvas for RasterCanvas {
    fn viewport_size(&self) -> Viewport {
        self.viewport
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: Pen) {
        let c = pen.color;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(pen.width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(vello_cpu::kurbo::Point::new(from.x, from.y));
        path.line_to(vello_cpu::kurbo::Point::new(to.x, to.y));
        self.ctx.stroke_path(&path);
        self.strokes += 1;
    }

    fn clear(&mut self) {
        self.ctx.reset();
        let c = self.background;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        self.strokes = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
