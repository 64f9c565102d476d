use crate::foundation::core::Rgba8Premul;
use crate::foundation::rng::PatternRng;
use crate::weave::pattern::{BACKGROUND, FOREGROUND, MIN_COLORED_PALETTE};

const MAX_REPICKS: usize = 64;

/// Indexed colors used to draw a pattern.
///
/// Index 0 is the foreground, index 1 the background; the rest is a smooth ramp through a
/// few random anchor colors, closed back onto its first anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba8Premul>,
}

#[derive(Clone, Copy, Debug)]
struct Anchor {
    hue: f32,
    sat: f32,
    val: f32,
}

impl Anchor {
    fn random<R: PatternRng + ?Sized>(rng: &mut R) -> Self {
        Self {
            hue: rng.uniform_int(360) as f32 / 360.0,
            sat: rng.uniform_float() as f32,
            val: rng.uniform_float() as f32 * 0.8 + 0.2,
        }
    }

    fn distance(self, other: Self) -> f32 {
        let mut dh = (self.hue - other.hue).abs();
        if dh > 0.5 {
            dh = 1.0 - dh;
        }
        let ds = self.sat - other.sat;
        let dv = self.val - other.val;
        (dh * dh + ds * ds + dv * dv).sqrt()
    }

    fn lerp(self, other: Self, f: f32) -> Self {
        let mut dh = other.hue - self.hue;
        if dh > 0.5 {
            dh -= 1.0;
        } else if dh < -0.5 {
            dh += 1.0;
        }
        Self {
            hue: (self.hue + dh * f).rem_euclid(1.0),
            sat: self.sat + (other.sat - self.sat) * f,
            val: self.val + (other.val - self.val) * f,
        }
    }

    fn to_rgba(self) -> Rgba8Premul {
        let hsva = ecolor::Hsva {
            h: self.hue,
            s: self.sat,
            v: self.val,
            a: 1.0,
        };
        let color = ecolor::Color32::from(ecolor::Rgba::from(hsva));
        Rgba8Premul::opaque(color.r(), color.g(), color.b())
    }
}

impl Palette {
    /// Foreground and background only.
    pub fn mono(foreground: Rgba8Premul, background: Rgba8Premul) -> Self {
        Self {
            colors: vec![foreground, background],
        }
    }

    /// A palette of `ncolors` entries whose ramp is drawn from `rng`.
    ///
    /// Sizes below the colored minimum yield [`Palette::mono`].
    pub fn smooth<R: PatternRng + ?Sized>(
        ncolors: usize,
        foreground: Rgba8Premul,
        background: Rgba8Premul,
        rng: &mut R,
    ) -> Self {
        let mut palette = Self::mono(foreground, background);
        if ncolors < MIN_COLORED_PALETTE {
            return palette;
        }

        let anchors = pick_anchors(rng);
        let ramp = ncolors - 2;
        for i in 0..ramp {
            let u = i as f32 * anchors.len() as f32 / ramp as f32;
            let leg = (u.floor() as usize).min(anchors.len() - 1);
            let next = (leg + 1) % anchors.len();
            let c = anchors[leg].lerp(anchors[next], u - leg as f32);
            palette.colors.push(c.to_rgba());
        }
        palette
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn foreground(&self) -> Rgba8Premul {
        self.colors[FOREGROUND]
    }

    pub fn background(&self) -> Rgba8Premul {
        self.colors[BACKGROUND]
    }

    /// Color at `index`, or the foreground when out of range.
    pub fn color(&self, index: usize) -> Rgba8Premul {
        self.colors
            .get(index)
            .copied()
            .unwrap_or(self.colors[FOREGROUND])
    }

    pub fn colors(&self) -> &[Rgba8Premul] {
        &self.colors
    }
}

fn anchor_count<R: PatternRng + ?Sized>(rng: &mut R) -> usize {
    match rng.uniform_int(20) {
        0..=5 => 2,
        6..=15 => 3,
        16..=18 => 4,
        _ => 5,
    }
}

/// Anchors that are not too close to their neighbor, with enough average saturation and
/// brightness. Repicks are bounded; the last attempt is kept if none satisfies the limits.
fn pick_anchors<R: PatternRng + ?Sized>(rng: &mut R) -> Vec<Anchor> {
    let n = anchor_count(rng);
    let mut anchors = Vec::with_capacity(n);
    for _ in 0..MAX_REPICKS {
        anchors.clear();
        for i in 0..n {
            let mut a = Anchor::random(rng);
            if i > 0 {
                let j = if i + 1 == n { 0 } else { i - 1 };
                let mut tries = 0;
                while tries < MAX_REPICKS && a.distance(anchors[j]) < 0.2 {
                    a = Anchor::random(rng);
                    tries += 1;
                }
            }
            anchors.push(a);
        }
        let mean_sat = anchors.iter().map(|a| a.sat).sum::<f32>() / n as f32;
        let mean_val = anchors.iter().map(|a| a.val).sum::<f32>() / n as f32;
        if mean_sat >= 0.2 && mean_val >= 0.3 {
            break;
        }
    }
    anchors
}

#[cfg(test)]
#[path = "../../tests/unit/animate/palette.rs"]
mod tests;
