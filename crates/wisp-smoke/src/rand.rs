//! Lightweight xorshift32 PRNG, seeded from the smoke config

pub struct SmokeRng {
    state: u32,
}

impl SmokeRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly, so 1.0 is never produced
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns -1.0 or 1.0 with equal probability
    pub fn sign(&mut self) -> f32 {
        if self.next_f32() < 0.5 {
            -1.0
        } else {
            1.0
        }
    }

    /// Returns an index in [0, len). `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = SmokeRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_unit_interval_is_half_open() {
        let mut rng = SmokeRng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!(v >= 0.0 && v < 1.0);
        }
    }

    #[test]
    fn rng_sign_produces_both() {
        let mut rng = SmokeRng::new(123);
        let signs: Vec<f32> = (0..100).map(|_| rng.sign()).collect();
        assert!(signs.iter().any(|&s| s == 1.0));
        assert!(signs.iter().any(|&s| s == -1.0));
        assert!(signs.iter().all(|&s| s.abs() == 1.0));
    }

    #[test]
    fn rng_index_in_bounds() {
        let mut rng = SmokeRng::new(99);
        for _ in 0..1000 {
            assert!(rng.index(2) < 2);
        }
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut rng = SmokeRng::new(0);
        let a = rng.next_f32();
        let b = rng.next_f32();
        assert_ne!(a, b);
    }
}
