use super::*;
use crate::foundation::core::Rect;
use crate::foundation::rng::XorShift128Plus;
use crate::graph::lattice::{Density, LatticeKind};

const SHAPE: ShapeParams = ShapeParams {
    shape1: 0.2,
    shape2: -0.3,
};

fn grid_pattern(ncolors: usize) -> Pattern {
    let g = build_lattice(
        LatticeKind::Grid,
        Rect::new(0.0, 0.0, 400.0, 400.0),
        &Density::grid(50.0),
    )
    .unwrap();
    Pattern::build(g, SHAPE, ncolors, &mut XorShift128Plus::from_seed_u64(1)).unwrap()
}

#[test]
fn pattern_consumes_every_passage() {
    let p = grid_pattern(20);
    assert!(p.ledger().is_complete());
    let steps: usize = p
        .loops()
        .iter()
        .chain(p.discarded_loops())
        .map(|l| l.len())
        .sum();
    assert_eq!(steps, 2 * p.graph().edge_count());
    assert_eq!(p.splines().len(), p.loops().len());
}

#[test]
fn spline_colors_skip_foreground_and_background() {
    let p = grid_pattern(20);
    for s in p.splines() {
        assert!((2..20).contains(&s.color()));
        assert_eq!(p.segment_color(s, 7), s.color());
    }
}

#[test]
fn mono_palette_draws_in_foreground() {
    let p = grid_pattern(2);
    for s in p.splines() {
        assert_eq!(s.color(), FOREGROUND);
        assert_eq!(p.segment_color(s, 3), FOREGROUND);
    }
}

#[test]
fn single_ribbon_cycles_segment_colors() {
    let g = build_lattice(
        LatticeKind::Radial,
        Rect::new(0.0, 0.0, 400.0, 400.0),
        &Density::radial(1, 5),
    )
    .unwrap();
    let p = Pattern::build(g, SHAPE, 10, &mut XorShift128Plus::from_seed_u64(2)).unwrap();
    assert_eq!(p.splines().len(), 1);
    let s = &p.splines()[0];
    assert_eq!(p.segment_color(s, 0), 2);
    assert_eq!(p.segment_color(s, 6), 8);
    assert_eq!(p.segment_color(s, 7), 2);
}

#[test]
fn generate_rotates_about_viewport_center() {
    let params = PatternParams {
        kind: LatticeKind::Radial,
        density: Density::radial(1, 6),
        margin: 0.0,
        angle: std::f64::consts::FRAC_PI_2,
        shape: SHAPE,
        curve_width: 4.0,
        shadow_width: 8.0,
    };
    let viewport = Viewport::new(400, 400).unwrap();
    let p = Pattern::generate(
        &params,
        viewport,
        20,
        &mut XorShift128Plus::from_seed_u64(3),
    )
    .unwrap();
    let hub = p.graph().nodes()[0].position();
    assert!(hub.distance(viewport.center()) < 1e-9);

    // The first orbit node started straight below the hub; a quarter turn moves it left.
    let first = p.graph().nodes()[1].position();
    assert!((first.x - 0.0).abs() < 1e-9);
    assert!((first.y - 200.0).abs() < 1e-9);
}

#[test]
fn generate_propagates_degenerate_lattices() {
    let params = PatternParams {
        kind: LatticeKind::Grid,
        density: Density::grid(50.0),
        margin: 190.0,
        angle: 0.0,
        shape: SHAPE,
        curve_width: 4.0,
        shadow_width: 8.0,
    };
    let err = Pattern::generate(
        &params,
        Viewport::new(400, 400).unwrap(),
        20,
        &mut XorShift128Plus::from_seed_u64(3),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        crate::foundation::error::CelticError::DegenerateLattice(_)
    ));
}
