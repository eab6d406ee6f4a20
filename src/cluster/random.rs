use rand::{rngs::StdRng, Rng, SeedableRng};

/// Default seed for the random source
pub const DEFAULT_SEED: u64 = 1234567890;

/// Source of randomness for tie-breaking and bit assignment
pub trait RandomSource {
    /// Draws a random bit
    fn next_bit(&mut self) -> bool;

    /// Draws an index in `0..n` (n > 0)
    fn choose(&mut self, n: usize) -> usize;
}

/// Seeded pseudo-random source (reproducible runs)
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SeededRandom {
    fn next_bit(&mut self) -> bool {
        self.rng.gen_range(0..=1u8) == 1
    }

    fn choose(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }

    fn choose(&mut self, n: usize) -> usize {
        (**self).choose(n)
    }
}
