//! Randomness consumed by lattice parameter selection, palette generation and ribbon colors.
//!
//! Everything random in a pattern flows through [`PatternRng`], so a pattern is fully
//! reproducible from the generator state it was built with.

use rand::{Rng, RngCore};

/// The random source a pattern is built from.
pub trait PatternRng {
    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn uniform_int(&mut self, n: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;
}

impl<R: Rng + ?Sized> PatternRng for R {
    fn uniform_int(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }

    fn uniform_float(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// The xorshift128+ generator.
///
/// Vigna, Sebastiano (2014). "Further scramblings of Marsaglia's xorshift
/// generators". arXiv:1404.0390
///
/// Fast and with good statistical quality, but not cryptographically secure. Unlike the
/// generators in `rand`, its state is plain data: it can be hashed, compared and serialized,
/// which is what makes pattern reproduction from a logged seed possible.
#[derive(Debug, Hash, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct XorShift128Plus {
    state: [u64; 2],
}

impl XorShift128Plus {
    /// Construct from raw state. An all-zero state is replaced by a fixed non-zero one, since
    /// xorshift never leaves the zero state.
    pub fn new(seed: [u64; 2]) -> Self {
        if seed == [0, 0] {
            return Self::from_seed_u64(0);
        }
        Self { state: seed }
    }

    /// Expand a single 64-bit seed into generator state with splitmix64.
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut z = seed;
        let a = splitmix64(&mut z);
        let b = splitmix64(&mut z);
        Self {
            state: [a, b | 1],
        }
    }
}

fn splitmix64(z: &mut u64) -> u64 {
    *z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut x = *z;
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

impl RngCore for XorShift128Plus {
    fn next_u64(&mut self) -> u64 {
        let mut s1 = self.state[0];
        let s0 = self.state[1];
        self.state[0] = s0;
        s1 ^= s1 << 23;
        self.state[1] = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26);
        self.state[1].wrapping_add(s0)
    }

    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
