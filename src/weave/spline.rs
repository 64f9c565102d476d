use kurbo::ParamCurve;

use crate::foundation::core::{BezPath, CubicBez, Point, Vec2};
use crate::foundation::error::{CelticError, CelticResult};
use crate::graph::model::{Direction, Graph};
use crate::weave::tracer::{Loop, LoopStep};

/// Curve shaping factors.
///
/// `shape1` scales how far the inner control points are pushed off the edge, proportionally
/// to how sharply the ribbon turns at the node; `shape2` bends them further along the
/// ribbon. Both are typically in `[-1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeParams {
    pub shape1: f64,
    pub shape2: f64,
}

/// A closed piecewise cubic Bézier curve with a palette color index.
#[derive(Clone, Debug, PartialEq)]
pub struct Spline {
    segments: Vec<CubicBez>,
    color: usize,
}

impl Spline {
    pub fn from_segments(segments: Vec<CubicBez>, color: usize) -> CelticResult<Self> {
        if segments.is_empty() {
            return Err(CelticError::validation("spline needs at least one segment"));
        }
        Ok(Self { segments, color })
    }

    pub fn segments(&self) -> &[CubicBez] {
        &self.segments
    }

    pub fn color(&self) -> usize {
        self.color
    }

    /// Point at parameter `t` (taken modulo 1) and the index of the segment it falls in.
    /// Every segment spans an equal share of the parameter range.
    pub fn value_at(&self, t: f64) -> (Point, usize) {
        let n = self.segments.len();
        let scaled = t.rem_euclid(1.0) * n as f64;
        let si = (scaled.floor() as usize).min(n - 1);
        let local = scaled - si as f64;
        (self.segments[si].eval(local), si)
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.segments[0].p0);
        for s in &self.segments {
            path.curve_to(s.p1, s.p2, s.p3);
        }
        path.close_path();
        path
    }
}

/// Convert a traced loop into a closed spline, one segment per turn.
pub fn synthesize(
    graph: &Graph,
    lp: &Loop,
    shape: ShapeParams,
    color: usize,
) -> CelticResult<Spline> {
    if lp.is_empty() {
        return Err(CelticError::internal("cannot synthesize an empty loop"));
    }
    let segments = lp
        .steps()
        .iter()
        .map(|step| turn_segment(graph, step, shape))
        .collect::<CelticResult<Vec<_>>>()?;
    Spline::from_segments(segments, color)
}

fn perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// The segment joining the midpoints of the two edges of a turn.
///
/// The inner control points stick out to opposite sides of the node-to-midpoint lines, and
/// the side flips with the turn direction, which is what makes consecutive crossings
/// alternate over and under.
pub fn turn_segment(graph: &Graph, step: &LoopStep, shape: ShapeParams) -> CelticResult<CubicBez> {
    let node = graph.node(step.node).position();
    let m1 = graph.edge_midpoint(step.edge_in);
    let m4 = graph.edge_midpoint(step.edge_out);

    let alpha = graph.angle_between(step.edge_in, step.edge_out, step.node, step.direction)?
        * shape.shape1;
    let beta = shape.shape2;
    let side = match step.direction {
        Direction::Anticlockwise => 1.0,
        Direction::Clockwise => -1.0,
    };

    let i1 = m1 + side * alpha * perp(node - m1);
    let i2 = m4 - side * alpha * perp(node - m4);
    let p2 = i1 + side * beta * perp(m1 - i1);
    let p3 = i2 - side * beta * perp(m4 - i2);
    Ok(CubicBez::new(m1, p2, p3, m4))
}

#[cfg(test)]
#[path = "../../tests/unit/weave/spline.rs"]
mod tests;
