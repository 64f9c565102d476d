use super::*;
use crate::foundation::core::Point;

fn triangle() -> Graph {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(10.0, 0.0));
    let c = g.add_node(Point::new(0.0, 10.0));
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    g.add_edge(c, a).unwrap();
    g
}

fn run(g: &Graph) -> (TraceReport, EdgeDirectionLedger) {
    let mut ledger = EdgeDirectionLedger::new(g.edge_count());
    let report = trace_loops(g, &mut ledger).unwrap();
    (report, ledger)
}

#[test]
fn triangle_is_one_loop_through_every_passage() {
    let g = triangle();
    let (report, ledger) = run(&g);
    assert!(ledger.is_complete());
    assert_eq!(report.loops.len(), 1);
    assert!(report.discarded.is_empty());
    assert_eq!(report.total_steps(), 2 * g.edge_count());

    let lp = &report.loops[0];
    assert_eq!(
        lp.steps()[0],
        LoopStep {
            node: NodeIdx(0),
            edge_in: EdgeIdx(0),
            edge_out: EdgeIdx(2),
            direction: Direction::Clockwise,
        }
    );
    assert_eq!(lp.start(), Some(lp.closing_state()));
}

#[test]
fn directions_alternate_along_a_loop() {
    let (report, _) = run(&triangle());
    let steps = report.loops[0].steps();
    for pair in steps.windows(2) {
        assert_eq!(pair[1].direction, pair[0].direction.flip());
        assert_eq!(pair[1].edge_in, pair[0].edge_out);
    }
}

#[test]
fn single_edge_loop_is_discarded() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(5.0, 0.0));
    g.add_edge(a, b).unwrap();

    let (report, ledger) = run(&g);
    assert!(report.loops.is_empty());
    assert_eq!(report.discarded.len(), 1);
    assert!(report.discarded[0].is_degenerate());
    assert_eq!(report.total_steps(), 2);
    assert!(ledger.is_complete());
}

#[test]
fn dead_end_path_reflects_into_one_loop() {
    let mut g = Graph::new();
    let a = g.add_node(Point::new(0.0, 0.0));
    let b = g.add_node(Point::new(1.0, 0.0));
    let c = g.add_node(Point::new(2.0, 1.0));
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();

    let (report, _) = run(&g);
    assert_eq!(report.loops.len(), 1);
    assert_eq!(report.loops[0].len(), 4);
}

#[test]
fn ledger_size_mismatch_is_internal_error() {
    let g = triangle();
    let mut ledger = EdgeDirectionLedger::new(1);
    let err = trace_loops(&g, &mut ledger).unwrap_err();
    assert!(matches!(err, CelticError::InternalConsistency(_)));
}

#[test]
fn partially_consumed_ledger_only_traces_the_rest() {
    let g = triangle();
    let mut ledger = EdgeDirectionLedger::new(g.edge_count());
    let first = trace_loops(&g, &mut ledger).unwrap();
    let second = trace_loops(&g, &mut ledger).unwrap();
    assert_eq!(first.loops.len(), 1);
    assert!(second.loops.is_empty());
    assert_eq!(second.total_steps(), 0);
}
