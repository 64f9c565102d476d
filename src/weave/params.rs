use crate::foundation::rng::PatternRng;
use crate::graph::lattice::{Density, LatticeKind};
use crate::weave::spline::ShapeParams;

/// Everything needed to build and draw one pattern, drawn fresh from the RNG for every
/// pattern.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternParams {
    pub kind: LatticeKind,
    pub density: Density,
    /// Inset of the lattice bounds from the viewport edges. May be negative.
    pub margin: f64,
    /// Rotation of the whole lattice about the viewport center, in radians.
    pub angle: f64,
    pub shape: ShapeParams,
    /// Ribbon stroke width in pixels.
    pub curve_width: f64,
    /// Width of the background-colored stroke that cuts gaps at crossings.
    pub shadow_width: f64,
}

impl PatternParams {
    /// Draw a random parameter set, optionally pinned to one lattice kind.
    pub fn random<R: PatternRng + ?Sized>(rng: &mut R, pinned: Option<LatticeKind>) -> Self {
        let curve_width = f64::from(4 + rng.uniform_int(5));
        let shape1 = f64::from(rng.uniform_int(20)) / 10.0 - 1.0;
        let shape2 = f64::from(rng.uniform_int(20)) / 10.0 - 1.0;
        let edge_size = f64::from(20 + 10 * rng.uniform_int(5));
        let angle = f64::from(rng.uniform_int(360)).to_radians();

        let kind = pinned.unwrap_or_else(|| match rng.uniform_int(4) {
            0 => LatticeKind::Grid,
            1 => LatticeKind::Clustered,
            2 => LatticeKind::Triangular,
            _ => LatticeKind::Radial,
        });

        let (density, margin) = match kind {
            LatticeKind::Grid => (
                Density::grid(edge_size),
                f64::from(rng.uniform_int(30) * 10),
            ),
            LatticeKind::Clustered => {
                let spacing = f64::from(50 + 10 * rng.uniform_int(3));
                let arm = (spacing / f64::from(2 + rng.uniform_int(3))).floor() - 1.0;
                (
                    Density::clustered(spacing, arm),
                    f64::from(rng.uniform_int(30) * 10),
                )
            }
            LatticeKind::Triangular => (
                Density::grid(edge_size),
                f64::from(rng.uniform_int(10) * 10),
            ),
            LatticeKind::Radial => {
                let nb_orbits = 2 + rng.uniform_int(20);
                let nodes_per_orbit = 4 + rng.uniform_int(20);
                (
                    Density::radial(nb_orbits, nodes_per_orbit),
                    f64::from(rng.uniform_int(10) * 20) - 50.0,
                )
            }
        };

        Self {
            kind,
            density,
            margin,
            angle,
            shape: ShapeParams { shape1, shape2 },
            curve_width,
            shadow_width: curve_width + 4.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/weave/params.rs"]
mod tests;
