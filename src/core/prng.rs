// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It picks start sites and drives the runner's policies, and keeps runs
// reproducible when a seed is given.

use std::time::{SystemTime, UNIX_EPOCH};

const ZERO_STATE_FALLBACK: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { ZERO_STATE_FALLBACK } else { seed };
        Self { state: seed }
    }

    /// Seeded from the wall clock; used when no explicit seed is configured.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos ^ ZERO_STATE_FALLBACK)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    pub fn next_f32_01(&mut self) -> f32 {
        // Convert to [0,1).
        let x = self.next_u32();
        (x as f32) / (u32::MAX as f32 + 1.0)
    }

    /// Uniform in `[low, high)`; returns `low` for an empty range.
    #[inline]
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u32;
        let v = self.next_u32() % span;
        low + v as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut p = Prng::new(0);
        let first = p.next_u32();
        let second = p.next_u32();
        assert!(first != 0 || second != 0);
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut p = Prng::new(99);
        for _ in 0..1_000 {
            let v = p.gen_range_usize(3, 8);
            assert!((3..8).contains(&v));
        }
        assert_eq!(p.gen_range_usize(5, 5), 5);
        for _ in 0..100 {
            let f = p.next_f32_01();
            assert!((0.0..1.0).contains(&f));
        }
    }
}
