//! xorshift64* random number generator
//!
//! A fast, deterministic PRNG: same seed always produces the same sequence.
//! This is the only source of randomness the random-graph generator may use,
//! so that identical `(V, E, seed, directed, wmin, wmax)` requests always
//! produce byte-identical `PREVIEW` output.

/// Deterministic RNG using the xorshift64* algorithm.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new generator from `seed`. A seed of 0 is remapped to 1
    /// (xorshift requires nonzero state).
    pub fn new(seed: i64) -> Self {
        let seed = seed as u64;
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advance the state and return the next `u64`.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform integer in `[min, max)`.
    ///
    /// # Panics
    /// Panics if `min >= max`.
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");
        let span = (max - min) as u64;
        min + (self.next_u64() % span) as i64
    }
}
