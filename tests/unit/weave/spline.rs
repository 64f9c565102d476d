use super::*;
use crate::graph::model::{EdgeIdx, NodeIdx};
use crate::weave::ledger::EdgeDirectionLedger;
use crate::weave::tracer::trace_loops;

fn line(x0: f64, x1: f64) -> CubicBez {
    let d = (x1 - x0) / 3.0;
    CubicBez::new(
        Point::new(x0, 0.0),
        Point::new(x0 + d, 0.0),
        Point::new(x0 + 2.0 * d, 0.0),
        Point::new(x1, 0.0),
    )
}

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < 1e-9
}

fn triangle_loop() -> (Graph, Loop) {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(100.0, 0.0));
    let c = g.add_node(Point::new(0.0, 100.0));
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    g.add_edge(c, a).unwrap();
    let mut ledger = EdgeDirectionLedger::new(g.edge_count());
    let mut report = trace_loops(&g, &mut ledger).unwrap();
    let lp = report.loops.remove(0);
    (g, lp)
}

#[test]
fn value_at_splits_parameter_evenly() {
    let s = Spline::from_segments(vec![line(0.0, 3.0), line(3.0, 6.0)], 2).unwrap();
    let (p, si) = s.value_at(0.25);
    assert!(close(p, Point::new(1.5, 0.0)));
    assert_eq!(si, 0);

    let (p, si) = s.value_at(0.5);
    assert!(close(p, Point::new(3.0, 0.0)));
    assert_eq!(si, 1);
}

#[test]
fn value_at_wraps_modulo_one() {
    let s = Spline::from_segments(vec![line(0.0, 3.0), line(3.0, 6.0)], 2).unwrap();
    assert!(close(s.value_at(1.0).0, s.value_at(0.0).0));
    assert!(close(s.value_at(1.25).0, s.value_at(0.25).0));
    assert!(close(s.value_at(-0.25).0, s.value_at(0.75).0));
    assert_eq!(s.value_at(0.999_999_999_999).1, 1);
}

#[test]
fn empty_spline_is_rejected() {
    assert!(Spline::from_segments(vec![], 0).is_err());
}

#[test]
fn flat_shape_keeps_control_points_on_midpoints() {
    let (g, lp) = triangle_loop();
    let flat = ShapeParams {
        shape1: 0.0,
        shape2: 0.0,
    };
    let seg = turn_segment(&g, &lp.steps()[0], flat).unwrap();
    assert_eq!(seg.p0, g.edge_midpoint(EdgeIdx(0)));
    assert_eq!(seg.p3, g.edge_midpoint(EdgeIdx(2)));
    assert_eq!(seg.p1, seg.p0);
    assert_eq!(seg.p2, seg.p3);
}

#[test]
fn inner_control_points_stick_out_perpendicular() {
    let (g, lp) = triangle_loop();
    let shape = ShapeParams {
        shape1: 0.5,
        shape2: 0.0,
    };
    for step in lp.steps() {
        let seg = turn_segment(&g, step, shape).unwrap();
        let node = g.node(step.node).position();
        let off = seg.p1 - seg.p0;
        let spoke = node - seg.p0;
        assert!(off.dot(spoke).abs() < 1e-6);
        assert!(off.hypot() > 0.0);
    }
}

#[test]
fn direction_flips_the_offset_side() {
    let (g, _) = triangle_loop();
    let shape = ShapeParams {
        shape1: 0.5,
        shape2: 0.0,
    };
    let step = |direction| LoopStep {
        node: NodeIdx(0),
        edge_in: EdgeIdx(0),
        edge_out: EdgeIdx(2),
        direction,
    };
    let cw = turn_segment(&g, &step(Direction::Clockwise), shape).unwrap();
    let acw = turn_segment(&g, &step(Direction::Anticlockwise), shape).unwrap();
    let spoke = g.node(NodeIdx(0)).position() - cw.p0;
    let side = |p: Point| spoke.cross(p - cw.p0).signum();
    assert_eq!(side(cw.p1), -side(acw.p1));
}

#[test]
fn synthesized_spline_is_closed_and_continuous() {
    let (g, lp) = triangle_loop();
    let shape = ShapeParams {
        shape1: 0.3,
        shape2: -0.4,
    };
    let s = synthesize(&g, &lp, shape, 5).unwrap();
    assert_eq!(s.segments().len(), lp.len());
    assert_eq!(s.color(), 5);

    let segs = s.segments();
    for pair in segs.windows(2) {
        assert!(close(pair[0].p3, pair[1].p0));
    }
    assert!(close(segs[segs.len() - 1].p3, segs[0].p0));

    // move + one curve per segment + close
    assert_eq!(s.to_bez_path().elements().len(), segs.len() + 2);
}
