//! Celtic knot interlace patterns.
//!
//! A pattern is built in four stages:
//!
//! - Build a planar lattice graph ([`build_lattice`]) and rotate it into place
//! - Trace every (edge, direction) passage into closed loops ([`trace_loops`])
//! - Turn each loop into a closed cubic Bézier ribbon ([`synthesize`])
//! - Grow the ribbons onto a [`Canvas`] with the [`Animator`], cutting gaps at crossings so they
//!   appear to weave over and under each other
#![forbid(unsafe_code)]

mod animate;
mod foundation;
mod graph;
mod render;
mod weave;

pub use crate::foundation::core::{BezPath, CubicBez, Line, Point, Rect, Rgba8Premul, Vec2, Viewport};
pub use crate::foundation::error::{CelticError, CelticResult};
pub use crate::foundation::rng::{PatternRng, XorShift128Plus};

pub use crate::graph::lattice::{Density, LatticeKind, build_lattice};
pub use crate::graph::model::{Direction, Edge, EdgeIdx, Graph, Node, NodeIdx, rotational_offset};

pub use crate::weave::ledger::EdgeDirectionLedger;
pub use crate::weave::params::PatternParams;
pub use crate::weave::pattern::{BACKGROUND, FOREGROUND, MIN_COLORED_PALETTE, Pattern};
pub use crate::weave::spline::{ShapeParams, Spline, synthesize, turn_segment};
pub use crate::weave::tracer::{Loop, LoopStep, TraceReport, TraceState, trace_loops};

pub use crate::animate::animator::{Animator, AnimatorState};
pub use crate::animate::canvas::{Canvas, CanvasOp, Pen, RecordingCanvas};
pub use crate::animate::config::AnimatorConfig;
pub use crate::animate::palette::Palette;
pub use crate::animate::stroke::{WeaveStep, settle_step, weave_step};

pub use crate::render::raster::{FrameRGBA, RasterCanvas};
