use super::*;
use crate::animate::canvas::{CanvasOp, RecordingCanvas};
use crate::graph::lattice::LatticeKind;

fn quick_config() -> AnimatorConfig {
    AnimatorConfig {
        step: 0.01,
        steps_per_tick: 10,
        delay_us: 1_000,
        pause_ms: 40,
        ..AnimatorConfig::default()
    }
}

fn canvas(w: u32, h: u32) -> RecordingCanvas {
    RecordingCanvas::new(Viewport::new(w, h).unwrap())
}

#[test]
fn one_full_cycle_walks_every_state() {
    let mut anim = Animator::with_seed(quick_config(), 7).unwrap();
    let mut c = canvas(400, 400);
    assert_eq!(anim.state(), AnimatorState::Building);

    assert_eq!(anim.tick(&mut c).unwrap(), Duration::ZERO);
    assert_eq!(anim.state(), AnimatorState::Growing);
    assert!(c.ops().is_empty());
    let splines = anim.pattern().unwrap().splines().len();
    assert!(splines > 0);

    let mut growing_ticks = 0;
    while anim.state() == AnimatorState::Growing {
        assert_eq!(anim.tick(&mut c).unwrap(), Duration::from_millis(1));
        growing_ticks += 1;
    }
    assert_eq!(growing_ticks, 10);
    assert_eq!(anim.state(), AnimatorState::Settling);
    assert!((anim.progress() - 1.0).abs() < 1e-12);

    let before = c.line_count();
    assert_eq!(anim.tick(&mut c).unwrap(), Duration::from_millis(40));
    assert_eq!(c.line_count(), before + splines);
    assert_eq!(anim.patterns_completed(), 1);
    assert_eq!(anim.state(), AnimatorState::ErasePending);

    assert_eq!(anim.tick(&mut c).unwrap(), Duration::ZERO);
    assert_eq!(c.ops().last(), Some(&CanvasOp::Clear));
    assert_eq!(anim.state(), AnimatorState::Building);
    assert!(anim.pattern().is_none());
}

#[test]
fn growing_draws_head_after_its_shadow() {
    let mut anim = Animator::with_seed(quick_config(), 3).unwrap();
    let mut c = canvas(400, 400);
    anim.tick(&mut c).unwrap();
    anim.tick(&mut c).unwrap();

    let params = *anim.params().unwrap();
    let bg = anim.palette().background();
    let mut heads = 0;
    let mut last_was_shadow = false;
    for op in c.ops() {
        let CanvasOp::Line { pen, .. } = op else {
            panic!("no clears while growing");
        };
        if pen.width == params.shadow_width && pen.color == bg {
            assert!(!last_was_shadow, "two shadows in a row");
            last_was_shadow = true;
        } else {
            assert_eq!(pen.width, params.curve_width);
            heads += 1;
            last_was_shadow = false;
        }
    }
    assert_eq!(heads, 10 * anim.pattern().unwrap().splines().len());
}

#[test]
fn show_graph_draws_lattice_on_build() {
    let cfg = AnimatorConfig {
        show_graph: true,
        ..quick_config()
    };
    let mut anim = Animator::with_seed(cfg, 5).unwrap();
    let mut c = canvas(400, 300);
    anim.tick(&mut c).unwrap();

    let g = anim.pattern().unwrap().graph();
    assert!(c.line_count() >= g.edge_count() + g.node_count() * 8);
    let fg = anim.palette().foreground();
    assert!(c.ops().iter().all(|op| matches!(
        op,
        CanvasOp::Line { pen, .. } if pen.color == fg && pen.width == 1.0
    )));
}

#[test]
fn reset_abandons_pattern_at_next_tick() {
    let mut anim = Animator::with_seed(quick_config(), 9).unwrap();
    let mut c = canvas(400, 400);
    anim.tick(&mut c).unwrap();
    anim.tick(&mut c).unwrap();

    anim.request_reset();
    assert_eq!(anim.state(), AnimatorState::Growing);
    anim.tick(&mut c).unwrap();
    assert_eq!(anim.state(), AnimatorState::Building);
    assert_eq!(c.ops().last(), Some(&CanvasOp::Clear));
    assert_eq!(anim.patterns_completed(), 0);

    anim.tick(&mut c).unwrap();
    assert_eq!(anim.state(), AnimatorState::Growing);
}

#[test]
fn reset_while_building_is_a_no_op() {
    let mut anim = Animator::with_seed(quick_config(), 9).unwrap();
    let mut c = canvas(400, 400);
    anim.request_reset();
    anim.tick(&mut c).unwrap();
    assert_eq!(anim.state(), AnimatorState::Growing);
}

#[test]
fn resize_rebuilds_at_new_size() {
    let mut anim = Animator::with_seed(quick_config(), 12).unwrap();
    let mut c = canvas(400, 400);
    anim.tick(&mut c).unwrap();
    assert_eq!(anim.viewport(), Some(Viewport::new(400, 400).unwrap()));

    c.resize(Viewport::new(640, 200).unwrap());
    anim.notify_resize();
    anim.tick(&mut c).unwrap();
    assert_eq!(anim.state(), AnimatorState::Building);

    anim.tick(&mut c).unwrap();
    assert_eq!(anim.viewport(), Some(Viewport::new(640, 200).unwrap()));

    // The resize was consumed by the build.
    anim.tick(&mut c).unwrap();
    assert_eq!(anim.state(), AnimatorState::Growing);
}

#[test]
fn exhausted_build_attempts_surface_the_error() {
    let cfg = AnimatorConfig {
        lattice: Some(LatticeKind::Grid),
        max_build_attempts: 4,
        ..quick_config()
    };
    let mut anim = Animator::with_seed(cfg, 1).unwrap();
    let mut c = canvas(10, 10);
    let err = anim.tick(&mut c).unwrap_err();
    assert!(matches!(err, CelticError::DegenerateLattice(_)));
    assert_eq!(anim.state(), AnimatorState::Building);
    assert!(anim.pattern().is_none());
    assert!(c.ops().is_empty());
}

#[test]
fn mono_palette_draws_ribbons_in_foreground() {
    let cfg = AnimatorConfig {
        ncolors: 2,
        ..quick_config()
    };
    let mut anim = Animator::with_seed(cfg, 2).unwrap();
    let mut c = canvas(300, 300);
    anim.finish_pattern(&mut c).unwrap();

    let fg = anim.palette().foreground();
    let bg = anim.palette().background();
    for op in c.ops() {
        if let CanvasOp::Line { pen, .. } = op {
            assert!(pen.color == fg || pen.color == bg);
        }
    }
}

#[test]
fn finish_pattern_reports_requested_delays() {
    let mut anim = Animator::with_seed(quick_config(), 4).unwrap();
    let mut c = canvas(300, 300);
    let waited = anim.finish_pattern(&mut c).unwrap();
    assert_eq!(waited, Duration::from_millis(10 + 40));
    assert_eq!(anim.state(), AnimatorState::ErasePending);

    let waited = anim.finish_pattern(&mut c).unwrap();
    assert_eq!(anim.patterns_completed(), 2);
    assert_eq!(waited, Duration::from_millis(10 + 40));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = AnimatorConfig {
        steps_per_tick: 0,
        ..AnimatorConfig::default()
    };
    assert!(Animator::with_seed(cfg, 0).is_err());
}

#[test]
fn same_seed_same_drawing() {
    let run = || {
        let mut anim = Animator::with_seed(quick_config(), 77).unwrap();
        let mut c = canvas(320, 240);
        anim.finish_pattern(&mut c).unwrap();
        c.take_ops()
    };
    assert_eq!(run(), run());
}
