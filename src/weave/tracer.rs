//! Decomposition of a lattice into closed ribbon loops.
//!
//! A traversal state is (node, edge, direction). From each state the tracer turns to the next
//! edge around the node in the current rotational sense, crosses it, and flips the sense. Every
//! step consumes one (edge, direction) passage in the ledger, so the loops partition the
//! `2 * |edges|` passages exactly.

use crate::foundation::error::{CelticError, CelticResult};
use crate::graph::model::{Direction, EdgeIdx, Graph, NodeIdx};
use crate::weave::ledger::EdgeDirectionLedger;

/// One turn of a loop: arriving at `node` along `edge_in`, leaving along `edge_out`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoopStep {
    pub node: NodeIdx,
    pub edge_in: EdgeIdx,
    pub edge_out: EdgeIdx,
    pub direction: Direction,
}

/// A traversal state: standing on `node`, on `edge`, turning in `direction`.
pub type TraceState = (NodeIdx, EdgeIdx, Direction);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loop {
    steps: Vec<LoopStep>,
    closing: TraceState,
}

impl Loop {
    pub fn steps(&self) -> &[LoopStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A two-step loop bounces back and forth on a single edge and has no visible extent.
    pub fn is_degenerate(&self) -> bool {
        self.steps.len() == 2
    }

    pub fn start(&self) -> Option<TraceState> {
        self.steps
            .first()
            .map(|s| (s.node, s.edge_in, s.direction))
    }

    /// The state reached after the last step. For a closed loop this equals [`Loop::start`].
    pub fn closing_state(&self) -> TraceState {
        self.closing
    }
}

#[derive(Clone, Debug, Default)]
pub struct TraceReport {
    /// Loops worth drawing, in the order they were traced.
    pub loops: Vec<Loop>,
    /// Degenerate loops that were traced and dropped.
    pub discarded: Vec<Loop>,
}

impl TraceReport {
    /// Steps recorded across every traced loop, dropped ones included.
    pub fn total_steps(&self) -> usize {
        self.loops
            .iter()
            .chain(self.discarded.iter())
            .map(Loop::len)
            .sum()
    }
}

/// Trace every unconsumed passage of `ledger` into loops.
#[tracing::instrument(level = "debug", skip_all, fields(edges = graph.edge_count()))]
pub fn trace_loops(graph: &Graph, ledger: &mut EdgeDirectionLedger) -> CelticResult<TraceReport> {
    if ledger.edge_count() != graph.edge_count() {
        return Err(CelticError::internal(format!(
            "ledger covers {} edges, graph has {}",
            ledger.edge_count(),
            graph.edge_count()
        )));
    }

    let mut report = TraceReport::default();
    while let Some((first_edge, first_direction)) = ledger.find_next_unconsumed() {
        let lp = trace_one(graph, ledger, first_edge, first_direction)?;
        if lp.is_degenerate() {
            report.discarded.push(lp);
        } else {
            report.loops.push(lp);
        }
    }

    tracing::debug!(
        loops = report.loops.len(),
        discarded = report.discarded.len(),
        steps = report.total_steps(),
        "traced lattice"
    );
    Ok(report)
}

fn trace_one(
    graph: &Graph,
    ledger: &mut EdgeDirectionLedger,
    first_edge: EdgeIdx,
    first_direction: Direction,
) -> CelticResult<Loop> {
    let start: TraceState = (graph.edge(first_edge).node1(), first_edge, first_direction);
    let (mut node, mut edge, mut direction) = start;
    let mut steps = Vec::new();

    loop {
        ledger.mark(edge, direction)?;
        let next = graph.next_edge_around(node, edge, direction)?;
        steps.push(LoopStep {
            node,
            edge_in: edge,
            edge_out: next,
            direction,
        });

        node = graph.edge(next).other(node).ok_or_else(|| {
            CelticError::internal(format!("edge {} does not touch node {}", next.0, node.0))
        })?;
        edge = next;
        direction = direction.flip();

        if (node, edge, direction) == start {
            break;
        }
    }

    Ok(Loop {
        steps,
        closing: (node, edge, direction),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/weave/tracer.rs"]
mod tests;
