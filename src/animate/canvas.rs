use crate::foundation::core::{Point, Rgba8Premul, Viewport};

/// Stroke settings for one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Rgba8Premul,
    /// Stroke width in pixels. Lines are drawn with round caps.
    pub width: f64,
}

impl Pen {
    pub fn new(color: Rgba8Premul, width: f64) -> Self {
        Self { color, width }
    }
}

/// Drawing surface the animator paints onto.
///
/// Drawing is incremental: every call paints on top of what is already there until
/// [`Canvas::clear`] resets the surface to its background.
pub trait Canvas {
    /// Current drawable size. Read once per pattern build.
    fn viewport_size(&self) -> Viewport;

    fn draw_line(&mut self, from: Point, to: Point, pen: Pen);

    /// Erase everything back to the background color.
    fn clear(&mut self);

    /// Outline a circle. The default approximates it with short lines.
    fn draw_circle(&mut self, center: Point, radius: f64, pen: Pen) {
        const SIDES: usize = 24;
        let at = |i: usize| {
            let theta = i as f64 * std::f64::consts::TAU / SIDES as f64;
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        };
        for i in 0..SIDES {
            self.draw_line(at(i), at(i + 1), pen);
        }
    }
}

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    Line { from: Point, to: Point, pen: Pen },
    Clear,
}

/// In-memory canvas that records every call instead of drawing.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    viewport: Viewport,
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
        }
    }

    /// Simulate a window resize; the animator picks it up on its next build.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<CanvasOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::Line { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn viewport_size(&self) -> Viewport {
        self.viewport
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: Pen) {
        self.ops.push(CanvasOp::Line { from, to, pen });
    }

    fn clear(&mut self) {
        self.ops.push(CanvasOp::Clear);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/canvas.rs"]
mod tests;
