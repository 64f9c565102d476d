//! Lattice builders.
//!
//! Each builder is a pure function of a bounding box and density parameters. Builders never
//! fall back to another shape: parameters that cannot produce a graph where every node has
//! at least two edges are rejected with [`CelticError::DegenerateLattice`].

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{CelticError, CelticResult};
use crate::graph::model::{Graph, NodeIdx};

const SQRT3_2: f64 = 0.866_025_403_784_438_6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatticeKind {
    /// Concentric orbits around a center node.
    Radial,
    /// Square grid with both diagonals in every cell.
    Grid,
    /// Triangular lattice inscribed in an equilateral triangle.
    Triangular,
    /// Square grid of five-node "plus" clusters.
    Clustered,
}

type BuildFn = fn(Rect, &Density) -> CelticResult<Graph>;

impl LatticeKind {
    pub const ALL: [LatticeKind; 4] = [
        LatticeKind::Radial,
        LatticeKind::Grid,
        LatticeKind::Triangular,
        LatticeKind::Clustered,
    ];

    fn builder(self) -> BuildFn {
        match self {
            Self::Radial => build_radial,
            Self::Grid => build_grid,
            Self::Triangular => build_triangular,
            Self::Clustered => build_clustered,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Grid => "grid",
            Self::Triangular => "triangular",
            Self::Clustered => "clustered",
        }
    }
}

impl std::fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LatticeKind {
    type Err = CelticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CelticError::validation(format!(
                    "unknown lattice kind '{s}' (expected radial, grid, triangular or clustered)"
                ))
            })
    }
}

/// Density parameters. Each lattice kind reads only the fields it needs:
///
/// - grid, triangular: `edge_size`
/// - clustered: `edge_size` (cluster spacing) and `cluster_size` (arm length)
/// - radial: `nb_orbits` and `nodes_per_orbit`
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Density {
    pub edge_size: f64,
    pub cluster_size: f64,
    pub nb_orbits: u32,
    pub nodes_per_orbit: u32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            edge_size: 50.0,
            cluster_size: 15.0,
            nb_orbits: 3,
            nodes_per_orbit: 8,
        }
    }
}

impl Density {
    pub fn grid(edge_size: f64) -> Self {
        Self {
            edge_size,
            ..Self::default()
        }
    }

    pub fn clustered(edge_size: f64, cluster_size: f64) -> Self {
        Self {
            edge_size,
            cluster_size,
            ..Self::default()
        }
    }

    pub fn radial(nb_orbits: u32, nodes_per_orbit: u32) -> Self {
        Self {
            nb_orbits,
            nodes_per_orbit,
            ..Self::default()
        }
    }
}

/// Build a lattice of `kind` inside `bounds`.
///
/// The returned graph is guaranteed to have at least two nodes, at least one edge, and no
/// node of degree below two.
#[tracing::instrument(level = "debug")]
pub fn build_lattice(kind: LatticeKind, bounds: Rect, density: &Density) -> CelticResult<Graph> {
    let w = bounds.width();
    let h = bounds.height();
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(CelticError::degenerate_lattice(format!(
            "{kind} lattice bounds {w}x{h} are empty"
        )));
    }

    let graph = (kind.builder())(bounds, density)?;
    graph.validate()?;
    tracing::debug!(
        %kind,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built lattice"
    );
    Ok(graph)
}

fn require_edge_size(kind: LatticeKind, edge_size: f64) -> CelticResult<f64> {
    if edge_size.is_finite() && edge_size > 0.0 {
        Ok(edge_size)
    } else {
        Err(CelticError::degenerate_lattice(format!(
            "{kind} lattice edge size must be > 0, got {edge_size}"
        )))
    }
}

/// How many lattice steps of `step` fit in `extent`, rounded down to an even number.
///
/// Even counts on both axes are what make the diagonal grid weave into exactly two ribbons.
fn even_count(extent: f64, step: f64) -> usize {
    let n = (extent / step).floor() as usize;
    n / 2 * 2
}

fn build_radial(bounds: Rect, density: &Density) -> CelticResult<Graph> {
    let nbo = density.nb_orbits as usize;
    let nbp = density.nodes_per_orbit as usize;
    if nbo < 1 || nbp < 3 {
        return Err(CelticError::degenerate_lattice(format!(
            "radial lattice needs >= 1 orbit of >= 3 nodes, got {nbo} x {nbp}"
        )));
    }

    let center = bounds.center();
    let spacing = bounds.width().min(bounds.height()) / (2.0 * nbo as f64);

    let mut g = Graph::new();
    let hub = g.add_node(center);
    let mut orbits: Vec<Vec<NodeIdx>> = Vec::with_capacity(nbo);
    for o in 0..nbo {
        let radius = (o + 1) as f64 * spacing;
        let ring = (0..nbp)
            .map(|p| {
                let theta = p as f64 * std::f64::consts::TAU / nbp as f64;
                g.add_node(Point::new(
                    center.x + radius * theta.sin(),
                    center.y + radius * theta.cos(),
                ))
            })
            .collect();
        orbits.push(ring);
    }

    for o in 0..nbo {
        for p in 0..nbp {
            let inward = if o == 0 { hub } else { orbits[o - 1][p] };
            g.add_edge(orbits[o][p], inward)?;
            g.add_edge(orbits[o][p], orbits[o][(p + 1) % nbp])?;
        }
    }
    Ok(g)
}

fn build_grid(bounds: Rect, density: &Density) -> CelticResult<Graph> {
    let step = require_edge_size(LatticeKind::Grid, density.edge_size)?;
    let cols = even_count(bounds.width(), step);
    let rows = even_count(bounds.height(), step);
    if cols < 2 || rows < 2 {
        return Err(CelticError::degenerate_lattice(format!(
            "grid lattice of {:.0}x{:.0} with edge size {step} has no cell",
            bounds.width(),
            bounds.height()
        )));
    }

    // Center the grid in the bounds.
    let x0 = bounds.x0 + (bounds.width() - (cols - 1) as f64 * step) / 2.0;
    let y0 = bounds.y0 + (bounds.height() - (rows - 1) as f64 * step) / 2.0;

    let mut g = Graph::new();
    let grid: Vec<Vec<NodeIdx>> = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    g.add_node(Point::new(
                        x0 + col as f64 * step,
                        y0 + row as f64 * step,
                    ))
                })
                .collect()
        })
        .collect();

    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                g.add_edge(grid[row][col], grid[row][col + 1])?;
            }
            if row + 1 < rows {
                g.add_edge(grid[row][col], grid[row + 1][col])?;
            }
            if col + 1 < cols && row + 1 < rows {
                g.add_edge(grid[row][col], grid[row + 1][col + 1])?;
                g.add_edge(grid[row + 1][col], grid[row][col + 1])?;
            }
        }
    }
    Ok(g)
}

fn build_triangular(bounds: Rect, density: &Density) -> CelticResult<Graph> {
    let step = require_edge_size(LatticeKind::Triangular, density.edge_size)?;
    let size = bounds.width().min(bounds.height());
    let n = 1 + (size / SQRT3_2 / step).floor() as usize;
    if n < 2 {
        return Err(CelticError::degenerate_lattice(format!(
            "triangular lattice of size {size:.0} with edge size {step} has no triangle"
        )));
    }

    let x0 = bounds.x0 + (bounds.width() - (n - 1) as f64 * step) / 2.0;
    let y0 = bounds.y0 + (bounds.height() - SQRT3_2 * (n - 1) as f64 * step) / 2.0;

    // rows[row][col] exists for row + col < n.
    let mut g = Graph::new();
    let rows: Vec<Vec<NodeIdx>> = (0..n)
        .map(|row| {
            (0..n - row)
                .map(|col| {
                    g.add_node(Point::new(
                        x0 + col as f64 * step + row as f64 * step / 2.0,
                        y0 + SQRT3_2 * row as f64 * step,
                    ))
                })
                .collect()
        })
        .collect();

    for row in 0..n {
        for col in 0..n - row {
            if row + col + 1 < n {
                g.add_edge(rows[row][col], rows[row][col + 1])?;
                g.add_edge(rows[row][col], rows[row + 1][col])?;
                g.add_edge(rows[row + 1][col], rows[row][col + 1])?;
            }
        }
    }
    Ok(g)
}

fn build_clustered(bounds: Rect, density: &Density) -> CelticResult<Graph> {
    let step = require_edge_size(LatticeKind::Clustered, density.edge_size)?;
    let arm = density.cluster_size;
    if !(arm.is_finite() && arm > 0.0 && arm < step / 2.0) {
        return Err(CelticError::degenerate_lattice(format!(
            "cluster size must be in (0, {}), got {arm}",
            step / 2.0
        )));
    }

    let cols = even_count(bounds.width(), step);
    let rows = even_count(bounds.height(), step);
    if cols < 2 || rows < 2 {
        return Err(CelticError::degenerate_lattice(format!(
            "clustered lattice of {:.0}x{:.0} with spacing {step} has no cluster pair",
            bounds.width(),
            bounds.height()
        )));
    }

    let x0 = bounds.x0 + (bounds.width() - (cols - 1) as f64 * step) / 2.0;
    let y0 = bounds.y0 + (bounds.height() - (rows - 1) as f64 * step) / 2.0;

    // Each cluster is [center, east, north, west, south] in screen coordinates.
    let mut g = Graph::new();
    let mut clusters: Vec<Vec<[NodeIdx; 5]>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut line = Vec::with_capacity(cols);
        for col in 0..cols {
            let c = Point::new(x0 + col as f64 * step, y0 + row as f64 * step);
            let ids = [
                g.add_node(c),
                g.add_node(Point::new(c.x + arm, c.y)),
                g.add_node(Point::new(c.x, c.y - arm)),
                g.add_node(Point::new(c.x - arm, c.y)),
                g.add_node(Point::new(c.x, c.y + arm)),
            ];
            for &spoke in &ids[1..] {
                g.add_edge(ids[0], spoke)?;
            }
            for k in 1..5 {
                g.add_edge(ids[k], ids[k % 4 + 1])?;
            }
            line.push(ids);
        }
        clusters.push(line);
    }

    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                g.add_edge(clusters[row][col][1], clusters[row][col + 1][3])?;
            }
            if row + 1 < rows {
                g.add_edge(clusters[row][col][4], clusters[row + 1][col][2])?;
            }
        }
    }
    Ok(g)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/lattice.rs"]
mod tests;
