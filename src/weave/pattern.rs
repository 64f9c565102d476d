use crate::foundation::core::Viewport;
use crate::foundation::error::{CelticError, CelticResult};
use crate::foundation::rng::PatternRng;
use crate::graph::lattice::build_lattice;
use crate::graph::model::Graph;
use crate::weave::ledger::EdgeDirectionLedger;
use crate::weave::params::PatternParams;
use crate::weave::spline::{ShapeParams, Spline, synthesize};
use crate::weave::tracer::{Loop, trace_loops};

/// Palettes below this size cannot give every ribbon its own color; everything is drawn in
/// the foreground color instead.
pub const MIN_COLORED_PALETTE: usize = 4;

/// Palette index of the foreground color.
pub const FOREGROUND: usize = 0;
/// Palette index of the background color.
pub const BACKGROUND: usize = 1;

/// One complete interlace pattern: the lattice, its fully consumed ledger, and the ribbons
/// traced from it.
///
/// Patterns are built whole or not at all: any failure while tracing or synthesizing drops
/// the partial state and reports the error.
#[derive(Clone, Debug)]
pub struct Pattern {
    graph: Graph,
    ledger: EdgeDirectionLedger,
    loops: Vec<Loop>,
    discarded: Vec<Loop>,
    splines: Vec<Spline>,
    shape: ShapeParams,
    ncolors: usize,
}

impl Pattern {
    /// Trace `graph` and synthesize one spline per non-degenerate loop.
    ///
    /// Spline colors are palette indices drawn from `rng` in trace order.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
    pub fn build<R: PatternRng + ?Sized>(
        graph: Graph,
        shape: ShapeParams,
        ncolors: usize,
        rng: &mut R,
    ) -> CelticResult<Self> {
        graph.check_arena()?;
        let mut ledger = EdgeDirectionLedger::new(graph.edge_count());
        let report = trace_loops(&graph, &mut ledger)?;
        if !ledger.is_complete() || report.total_steps() != 2 * graph.edge_count() {
            return Err(CelticError::internal(format!(
                "trace used {} of {} passages",
                report.total_steps(),
                2 * graph.edge_count()
            )));
        }

        let mut splines = Vec::with_capacity(report.loops.len());
        for lp in &report.loops {
            let color = pick_color(ncolors, rng);
            splines.push(synthesize(&graph, lp, shape, color)?);
        }

        tracing::debug!(
            splines = splines.len(),
            discarded = report.discarded.len(),
            "built pattern"
        );
        Ok(Self {
            graph,
            ledger,
            loops: report.loops,
            discarded: report.discarded,
            splines,
            shape,
            ncolors,
        })
    }

    /// Build the lattice described by `params` inside `viewport`, rotate it, and trace it.
    pub fn generate<R: PatternRng + ?Sized>(
        params: &PatternParams,
        viewport: Viewport,
        ncolors: usize,
        rng: &mut R,
    ) -> CelticResult<Self> {
        let lattice = build_lattice(params.kind, viewport.inset(params.margin), &params.density)?;
        let graph = lattice.rotated(params.angle, viewport.center());
        Self::build(graph, params.shape, ncolors, rng)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn ledger(&self) -> &EdgeDirectionLedger {
        &self.ledger
    }

    /// Loops that produced splines, parallel to [`Pattern::splines`].
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn discarded_loops(&self) -> &[Loop] {
        &self.discarded
    }

    pub fn splines(&self) -> &[Spline] {
        &self.splines
    }

    pub fn shape(&self) -> ShapeParams {
        self.shape
    }

    /// Palette index for drawing `segment` of `spline`.
    ///
    /// A pattern made of a single ribbon cycles through the palette segment by segment so it
    /// does not come out monochrome.
    pub fn segment_color(&self, spline: &Spline, segment: usize) -> usize {
        if self.ncolors < MIN_COLORED_PALETTE {
            FOREGROUND
        } else if self.splines.len() == 1 {
            2 + segment % (self.ncolors - 3)
        } else {
            spline.color()
        }
    }
}

fn pick_color<R: PatternRng + ?Sized>(ncolors: usize, rng: &mut R) -> usize {
    if ncolors < MIN_COLORED_PALETTE {
        return FOREGROUND;
    }
    let choices = u32::try_from(ncolors - 2).unwrap_or(u32::MAX);
    2 + rng.uniform_int(choices) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/weave/pattern.rs"]
mod tests;
