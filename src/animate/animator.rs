use std::time::Duration;

use crate::animate::canvas::{Canvas, Pen};
use crate::animate::config::AnimatorConfig;
use crate::animate::palette::Palette;
use crate::animate::stroke::{settle_step, weave_step};
use crate::foundation::core::Viewport;
use crate::foundation::error::{CelticError, CelticResult};
use crate::foundation::rng::{PatternRng, XorShift128Plus};
use crate::weave::params::PatternParams;
use crate::weave::pattern::Pattern;

const GRAPH_NODE_RADIUS: f64 = 5.0;

/// Where the animator is in its build / grow / settle / erase cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatorState {
    /// Next tick builds a fresh pattern.
    Building,
    /// Ribbon heads are advancing.
    Growing,
    /// Next tick draws the closing strokes.
    Settling,
    /// Next tick clears the canvas and drops the pattern.
    ErasePending,
}

#[derive(Clone, Debug)]
struct ActivePattern {
    pattern: Pattern,
    params: PatternParams,
    viewport: Viewport,
    next_step: u64,
    total_steps: u64,
}

impl ActivePattern {
    fn t(&self, step: f64) -> f64 {
        self.next_step as f64 * step
    }

    fn is_grown(&self) -> bool {
        self.next_step >= self.total_steps
    }
}

/// Frame-driven pattern animator.
///
/// Each call to [`Animator::tick`] does a bounded amount of drawing and returns how long the
/// caller should wait before the next tick. The animator owns the current pattern; nothing
/// outside it holds pattern state between ticks.
#[derive(Debug)]
pub struct Animator<R: PatternRng = XorShift128Plus> {
    config: AnimatorConfig,
    rng: R,
    palette: Palette,
    state: AnimatorState,
    active: Option<ActivePattern>,
    reset_requested: bool,
    resize_pending: bool,
    patterns_completed: u64,
}

impl Animator<XorShift128Plus> {
    /// Animator driven by the deterministic default generator.
    pub fn with_seed(config: AnimatorConfig, seed: u64) -> CelticResult<Self> {
        Self::new(config, XorShift128Plus::from_seed_u64(seed))
    }
}

impl<R: PatternRng> Animator<R> {
    pub fn new(config: AnimatorConfig, mut rng: R) -> CelticResult<Self> {
        config.validate()?;
        let palette = Palette::smooth(
            config.ncolors,
            config.foreground_color(),
            config.background_color(),
            &mut rng,
        );
        Ok(Self {
            config,
            rng,
            palette,
            state: AnimatorState::Building,
            active: None,
            reset_requested: false,
            resize_pending: false,
            patterns_completed: 0,
        })
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// The pattern being drawn, if any.
    pub fn pattern(&self) -> Option<&Pattern> {
        self.active.as_ref().map(|a| &a.pattern)
    }

    pub fn params(&self) -> Option<&PatternParams> {
        self.active.as_ref().map(|a| &a.params)
    }

    /// Canvas size the current pattern was built for.
    pub fn viewport(&self) -> Option<Viewport> {
        self.active.as_ref().map(|a| a.viewport)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn patterns_completed(&self) -> u64 {
        self.patterns_completed
    }

    /// Fraction of the current pattern grown so far.
    pub fn progress(&self) -> f64 {
        match &self.active {
            Some(a) if a.total_steps > 0 => a.next_step as f64 / a.total_steps as f64,
            _ => 0.0,
        }
    }

    /// Abandon the current pattern. Takes effect at the next tick.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// The canvas changed size. A pattern in progress is abandoned at the next tick and the
    /// next build uses the new size.
    pub fn notify_resize(&mut self) {
        self.resize_pending = true;
    }

    /// Advance the animation by one tick and return the delay the caller should wait.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> CelticResult<Duration> {
        self.apply_interrupts();
        match self.state {
            AnimatorState::Building => {
                let active = self.build(canvas)?;
                self.active = Some(active);
                self.state = AnimatorState::Growing;
                Ok(Duration::ZERO)
            }
            AnimatorState::Growing => {
                if self.grow(canvas)? {
                    self.state = AnimatorState::Settling;
                }
                Ok(self.config.tick_delay())
            }
            AnimatorState::Settling => {
                self.settle(canvas)?;
                self.patterns_completed += 1;
                self.state = AnimatorState::ErasePending;
                Ok(self.config.pause())
            }
            AnimatorState::ErasePending => {
                canvas.clear();
                self.active = None;
                self.palette = Palette::smooth(
                    self.config.ncolors,
                    self.config.foreground_color(),
                    self.config.background_color(),
                    &mut self.rng,
                );
                self.state = AnimatorState::Building;
                Ok(Duration::ZERO)
            }
        }
    }

    /// Tick until the current (or next) pattern has been fully drawn and settled.
    ///
    /// Returns the sum of the delays the ticks asked for.
    pub fn finish_pattern<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> CelticResult<Duration> {
        let target = self.patterns_completed + 1;
        let mut waited = Duration::ZERO;
        while self.patterns_completed < target {
            waited += self.tick(canvas)?;
        }
        Ok(waited)
    }

    fn apply_interrupts(&mut self) {
        let reset = std::mem::take(&mut self.reset_requested);
        let in_progress = matches!(
            self.state,
            AnimatorState::Growing | AnimatorState::Settling
        );
        if in_progress && (reset || self.resize_pending) {
            tracing::debug!(reset, resized = self.resize_pending, "abandoning pattern");
            self.state = AnimatorState::ErasePending;
        }
    }

    fn build<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> CelticResult<ActivePattern> {
        let viewport = canvas.viewport_size();
        if std::mem::take(&mut self.resize_pending) {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "applying resize"
            );
        }

        let mut last_err = None;
        for attempt in 1..=self.config.max_build_attempts {
            let params = PatternParams::random(&mut self.rng, self.config.lattice);
            match Pattern::generate(&params, viewport, self.palette.len(), &mut self.rng) {
                Ok(pattern) => {
                    if self.config.show_graph {
                        self.draw_graph(canvas, &pattern);
                    }
                    tracing::debug!(
                        attempt,
                        kind = %params.kind,
                        splines = pattern.splines().len(),
                        "pattern ready"
                    );
                    let total_steps = (1.0 / self.config.step).ceil() as u64;
                    return Ok(ActivePattern {
                        pattern,
                        params,
                        viewport,
                        next_step: 0,
                        total_steps,
                    });
                }
                Err(e) if e.is_retryable() => {
                    tracing::warn!(attempt, kind = %params.kind, error = %e, "pattern build rejected, retrying");
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let attempts = self.config.max_build_attempts;
        Err(last_err.unwrap_or_else(|| {
            CelticError::internal(format!("no pattern built after {attempts} attempts"))
        }))
    }

    fn draw_graph<C: Canvas + ?Sized>(&self, canvas: &mut C, pattern: &Pattern) {
        let pen = Pen::new(self.palette.foreground(), 1.0);
        let graph = pattern.graph();
        for edge in graph.edges() {
            let [a, b] = edge.endpoints();
            canvas.draw_line(graph.node(a).position(), graph.node(b).position(), pen);
        }
        for node in graph.nodes() {
            canvas.draw_circle(node.position(), GRAPH_NODE_RADIUS, pen);
        }
    }

    /// Draw up to `steps_per_tick` sub-steps. Returns whether the heads came full circle.
    fn grow<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> CelticResult<bool> {
        let Self {
            config,
            palette,
            active,
            ..
        } = self;
        let active = active
            .as_mut()
            .ok_or_else(|| CelticError::internal("growing without a pattern"))?;

        let shadow_pen = Pen::new(palette.background(), active.params.shadow_width);
        for _ in 0..config.steps_per_tick {
            if active.is_grown() {
                break;
            }
            let t = active.t(config.step);
            for spline in active.pattern.splines() {
                let ws = weave_step(spline, t, config.step, active.params.shadow_width);
                if let Some(shadow) = ws.shadow {
                    canvas.draw_line(shadow.p0, shadow.p1, shadow_pen);
                }
                let color = palette.color(active.pattern.segment_color(spline, ws.segment));
                let pen = Pen::new(color, active.params.curve_width);
                canvas.draw_line(ws.head.p0, ws.head.p1, pen);
            }
            active.next_step += 1;
        }
        Ok(active.is_grown())
    }

    fn settle<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> CelticResult<()> {
        let active = self
            .active
            .as_ref()
            .ok_or_else(|| CelticError::internal("settling without a pattern"))?;
        let t = active.t(self.config.step);
        for spline in active.pattern.splines() {
            let ws = settle_step(spline, t, self.config.step, active.params.shadow_width);
            let color = self
                .palette
                .color(active.pattern.segment_color(spline, ws.segment));
            canvas.draw_line(
                ws.head.p0,
                ws.head.p1,
                Pen::new(color, active.params.curve_width),
            );
        }
        tracing::info!(
            kind = %active.params.kind,
            width = active.viewport.width,
            height = active.viewport.height,
            splines = active.pattern.splines().len(),
            completed = self.patterns_completed + 1,
            "pattern complete"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/animator.rs"]
mod tests;
