use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};

/// Source of uniform draws for line lengths and byte dumps.
pub trait UniformSource {
    /// A uniform value in `[0, 1)`.
    fn uniform_f64(&mut self) -> f64;
    /// A uniform 32-bit value.
    fn next_u32(&mut self) -> u32;
}

/// Deterministic generator: the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Seeds a new generator. Every seed, including `0`, is valid.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededRng {
    fn uniform_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
