use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{CelticError, CelticResult};
use crate::graph::lattice::LatticeKind;

/// Settings that stay fixed across patterns.
///
/// Missing JSON fields take their defaults, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimatorConfig {
    /// Palette size. Below 4 every ribbon is drawn in the foreground color.
    pub ncolors: usize,
    /// Delay requested after each growing tick, in microseconds.
    pub delay_us: u64,
    /// How long a finished pattern stays on screen before it is erased, in milliseconds.
    pub pause_ms: u64,
    /// Draw the lattice under the ribbons.
    pub show_graph: bool,
    /// Straight RGB.
    pub foreground: [u8; 3],
    /// Straight RGB.
    pub background: [u8; 3],
    /// Parametric advance of every ribbon head per sub-step.
    pub step: f64,
    /// Sub-steps drawn per growing tick.
    pub steps_per_tick: u32,
    /// Lattice builds tried before a pattern build gives up.
    pub max_build_attempts: u32,
    /// Pin every pattern to one lattice kind.
    pub lattice: Option<LatticeKind>,
    /// RNG seed. Absent means the caller picks one.
    pub seed: Option<u64>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            ncolors: 20,
            delay_us: 10_000,
            pause_ms: 5_000,
            show_graph: false,
            foreground: [51, 51, 51],
            background: [0, 0, 0],
            step: 0.0001,
            steps_per_tick: 100,
            max_build_attempts: 32,
            lattice: None,
            seed: None,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json_str(s: &str) -> CelticResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CelticError::serde(format!("parse animator config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CelticResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CelticError::validation(format!("open animator config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            CelticError::serde(format!(
                "parse animator config '{}': {e}",
                path.display()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> CelticResult<()> {
        if !(self.step.is_finite() && self.step > 0.0 && self.step < 1.0) {
            return Err(CelticError::validation(format!(
                "step must be in (0, 1), got {}",
                self.step
            )));
        }
        if self.steps_per_tick == 0 {
            return Err(CelticError::validation("steps_per_tick must be > 0"));
        }
        if self.max_build_attempts == 0 {
            return Err(CelticError::validation("max_build_attempts must be > 0"));
        }
        Ok(())
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_micros(self.delay_us)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn foreground_color(&self) -> Rgba8Premul {
        let [r, g, b] = self.foreground;
        Rgba8Premul::opaque(r, g, b)
    }

    pub fn background_color(&self) -> Rgba8Premul {
        let [r, g, b] = self.background;
        Rgba8Premul::opaque(r, g, b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/config.rs"]
mod tests;
