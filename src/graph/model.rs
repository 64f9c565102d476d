//! Arena-backed planar graph.
//!
//! A [`Graph`] owns two contiguous collections, nodes and edges, and every cross reference is
//! an index into them. Nodes list their incident edges in creation order; edges cache the
//! absolute angle under which they leave each endpoint, so the rotational ordering around a
//! node never needs to be recomputed.

use std::f64::consts::TAU;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{CelticError, CelticResult};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct NodeIdx(pub u32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct EdgeIdx(pub u32);

/// Rotational sense used when scanning the edges around a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Clockwise,
    Anticlockwise,
}

impl Direction {
    /// Scan order used by the edge ledger.
    pub const ALL: [Direction; 2] = [Direction::Clockwise, Direction::Anticlockwise];

    pub fn flip(self) -> Self {
        match self {
            Self::Clockwise => Self::Anticlockwise,
            Self::Anticlockwise => Self::Clockwise,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Clockwise => 0,
            Self::Anticlockwise => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    position: Point,
    incident: Vec<EdgeIdx>,
}

impl Node {
    pub fn position(&self) -> Point {
        self.position
    }

    /// Incident edges in creation order.
    pub fn incident(&self) -> &[EdgeIdx] {
        &self.incident
    }

    pub fn degree(&self) -> usize {
        self.incident.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    nodes: [NodeIdx; 2],
    // angles[i] is the direction the edge leaves nodes[i], in [0, 2π).
    angles: [f64; 2],
}

impl Edge {
    fn new(graph_nodes: &[Node], a: NodeIdx, b: NodeIdx) -> Self {
        let pa = graph_nodes[a.0 as usize].position;
        let pb = graph_nodes[b.0 as usize].position;
        Self {
            nodes: [a, b],
            angles: [leaving_angle(pa, pb), leaving_angle(pb, pa)],
        }
    }

    pub fn node1(&self) -> NodeIdx {
        self.nodes[0]
    }

    pub fn node2(&self) -> NodeIdx {
        self.nodes[1]
    }

    pub fn endpoints(&self) -> [NodeIdx; 2] {
        self.nodes
    }

    /// Angle under which the edge leaves `node`, or `None` if `node` is not an endpoint.
    pub fn angle_at(&self, node: NodeIdx) -> Option<f64> {
        self.end_slot(node).map(|i| self.angles[i])
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeIdx) -> Option<NodeIdx> {
        self.end_slot(node).map(|i| self.nodes[1 - i])
    }

    fn end_slot(&self, node: NodeIdx) -> Option<usize> {
        if node == self.nodes[0] {
            Some(0)
        } else if node == self.nodes[1] {
            Some(1)
        } else {
            None
        }
    }
}

fn leaving_angle(from: Point, to: Point) -> f64 {
    let a = (to.y - from.y).atan2(to.x - from.x);
    if a < 0.0 { a + TAU } else { a }
}

/// Rotational offset from `from_angle` to `to_angle` scanning in `direction`, in `[0, 2π)`.
pub fn rotational_offset(from_angle: f64, to_angle: f64, direction: Direction) -> f64 {
    let a = match direction {
        Direction::Clockwise => from_angle - to_angle,
        Direction::Anticlockwise => to_angle - from_angle,
    };
    if a < 0.0 { a + TAU } else { a }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, position: Point) -> NodeIdx {
        let idx = NodeIdx(self.nodes.len() as u32);
        self.nodes.push(Node {
            position,
            incident: Vec::new(),
        });
        idx
    }

    /// Connect two existing, distinct nodes.
    pub fn add_edge(&mut self, a: NodeIdx, b: NodeIdx) -> CelticResult<EdgeIdx> {
        let n = self.nodes.len();
        if a.0 as usize >= n || b.0 as usize >= n {
            return Err(CelticError::internal(format!(
                "edge ({}, {}) references a node outside the graph ({n} nodes)",
                a.0, b.0
            )));
        }
        if a == b {
            return Err(CelticError::internal(format!(
                "edge would loop on node {}",
                a.0
            )));
        }

        let idx = EdgeIdx(self.edges.len() as u32);
        self.edges.push(Edge::new(&self.nodes, a, b));
        self.nodes[a.0 as usize].incident.push(idx);
        self.nodes[b.0 as usize].incident.push(idx);
        Ok(idx)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0 as usize]
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.0 as usize]
    }

    pub fn edge_midpoint(&self, idx: EdgeIdx) -> Point {
        let e = self.edge(idx);
        self.node(e.node1())
            .position
            .midpoint(self.node(e.node2()).position)
    }

    /// Rotational offset from `from` to `to` around their shared endpoint `at`.
    pub fn angle_between(
        &self,
        from: EdgeIdx,
        to: EdgeIdx,
        at: NodeIdx,
        direction: Direction,
    ) -> CelticResult<f64> {
        let a = self.angle_at(from, at)?;
        let b = self.angle_at(to, at)?;
        Ok(rotational_offset(a, b, direction))
    }

    fn angle_at(&self, edge: EdgeIdx, node: NodeIdx) -> CelticResult<f64> {
        self.edge(edge).angle_at(node).ok_or_else(|| {
            CelticError::internal(format!("node {} is not an endpoint of edge {}", node.0, edge.0))
        })
    }

    /// The first edge hit when scanning around `node` from `edge` in `direction`.
    ///
    /// A node whose only edge is `edge` reflects straight back along it. Exact ties keep the
    /// earliest edge in incidence order.
    pub fn next_edge_around(
        &self,
        node: NodeIdx,
        edge: EdgeIdx,
        direction: Direction,
    ) -> CelticResult<EdgeIdx> {
        let from = self.angle_at(edge, node)?;

        let mut candidates = 0usize;
        let mut best: Option<(EdgeIdx, f64)> = None;
        for &other in self.node(node).incident() {
            if other == edge {
                continue;
            }
            candidates += 1;
            let offset = rotational_offset(from, self.angle_at(other, node)?, direction);
            if offset.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, min)| offset < min) {
                best = Some((other, offset));
            }
        }

        match best {
            Some((next, _)) => Ok(next),
            None if candidates == 0 => Ok(edge),
            None => Err(CelticError::internal(format!(
                "no next edge around node {} (degree {}) from edge {}",
                node.0,
                self.node(node).degree(),
                edge.0
            ))),
        }
    }

    /// A copy with every node rotated by `angle` radians about `center`.
    pub fn rotated(&self, angle: f64, center: Point) -> Graph {
        let (s, c) = angle.sin_cos();
        let mut out = Graph {
            nodes: Vec::with_capacity(self.nodes.len()),
            edges: Vec::with_capacity(self.edges.len()),
        };
        for n in &self.nodes {
            let d: Vec2 = n.position - center;
            out.add_node(center + Vec2::new(d.x * c - d.y * s, d.x * s + d.y * c));
        }
        for e in &self.edges {
            let idx = EdgeIdx(out.edges.len() as u32);
            out.edges.push(Edge::new(&out.nodes, e.nodes[0], e.nodes[1]));
            out.nodes[e.nodes[0].0 as usize].incident.push(idx);
            out.nodes[e.nodes[1].0 as usize].incident.push(idx);
        }
        out
    }

    /// Check the arena invariant: every edge endpoint is a node of this graph, and every
    /// incidence entry names an edge that really touches its node.
    pub fn check_arena(&self) -> CelticResult<()> {
        let n = self.nodes.len();
        for (i, e) in self.edges.iter().enumerate() {
            for end in e.nodes {
                if end.0 as usize >= n {
                    return Err(CelticError::internal(format!(
                        "edge {i} references node {} outside the graph",
                        end.0
                    )));
                }
            }
        }
        for (i, node) in self.nodes.iter().enumerate() {
            for &e in &node.incident {
                let touches = self
                    .edges
                    .get(e.0 as usize)
                    .is_some_and(|edge| edge.end_slot(NodeIdx(i as u32)).is_some());
                if !touches {
                    return Err(CelticError::internal(format!(
                        "node {i} lists edge {} which does not touch it",
                        e.0
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check that the graph is usable for tracing: at least two nodes, at least one edge,
    /// and no node of degree below two.
    pub fn validate(&self) -> CelticResult<()> {
        if self.nodes.len() < 2 {
            return Err(CelticError::degenerate_lattice(format!(
                "lattice has {} node(s), need at least 2",
                self.nodes.len()
            )));
        }
        if self.edges.is_empty() {
            return Err(CelticError::degenerate_lattice("lattice has no edges"));
        }
        if let Some((i, node)) = self
            .nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.degree() < 2)
        {
            return Err(CelticError::degenerate_lattice(format!(
                "node {i} has degree {}, need at least 2",
                node.degree()
            )));
        }
        self.check_arena()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/model.rs"]
mod tests;
