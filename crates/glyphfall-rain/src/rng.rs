//! Seedable random source for the renderer.
//!
//! Wraps `ChaCha8Rng` so a fixed seed replays the exact same rain.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random source used by the renderer unless another [`rand::Rng`] is supplied.
#[derive(Debug, Clone)]
pub struct RainRng(pub ChaCha8Rng);

impl RainRng {
    /// Create a generator that replays the same sequence for the same seed.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed_u64)
    }
}

impl RngCore for RainRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RainRng::from_seed_u64(7);
        let mut b = RainRng::from_seed_u64(7);
        let xs: Vec<u32> = (0..16).map(|_| a.gen_range(0..1000)).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }
}
