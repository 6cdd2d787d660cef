//! Injectable random number generation.
//!
//! RULE: The assignment engine never calls a platform RNG directly.
//! Every shuffle draws from a SeatRng handed to it by the caller,
//! so tests can substitute a seeded stream.
//!
//! A server started with a master seed derives one stream per draw
//! from (master_seed XOR draw_index * golden ratio), which replays the
//! same sequence of shuffles across restarts.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::sync::atomic::{AtomicU64, Ordering};

const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// A named random stream for a single draw.
pub struct SeatRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SeatRng {
    /// Deterministic stream from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Fresh stream seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random()).with_name("entropy")
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform index in [0, n). Unbiased, unlike a plain modulo.
    pub fn next_index_below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Fisher–Yates shuffle in place. Every permutation is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index_below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Hands out one SeatRng per draw. Shared by all request handlers.
pub struct RngBank {
    master_seed: Option<u64>,
    draws: AtomicU64,
}

impl RngBank {
    /// Reproducible bank: draw k is always seeded the same way.
    pub fn seeded(master_seed: u64) -> Self {
        Self {
            master_seed: Some(master_seed),
            draws: AtomicU64::new(0),
        }
    }

    /// Bank whose draws are independent and unpredictable.
    pub fn from_entropy() -> Self {
        Self {
            master_seed: None,
            draws: AtomicU64::new(0),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Number of streams handed out so far.
    pub fn draws(&self) -> u64 {
        self.draws.load(Ordering::Relaxed)
    }

    pub fn next_draw(&self) -> SeatRng {
        let draw = self.draws.fetch_add(1, Ordering::Relaxed);
        match self.master_seed {
            Some(seed) => SeatRng::new(seed ^ draw.wrapping_mul(SEED_SPREAD)).with_name("seeded"),
            None => SeatRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = SeatRng::new(7);
        let mut items: Vec<u32> = (1..=50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let mut rng = SeatRng::new(1);
        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![9];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![9]);
    }

    #[test]
    fn seeded_bank_replays_the_same_draws() {
        let a = RngBank::seeded(42);
        let b = RngBank::seeded(42);
        for _ in 0..5 {
            assert_eq!(a.next_draw().next_u64(), b.next_draw().next_u64());
        }
        assert_eq!(a.draws(), 5);
    }

    #[test]
    fn consecutive_seeded_draws_differ() {
        let bank = RngBank::seeded(42);
        let first = bank.next_draw().next_u64();
        let second = bank.next_draw().next_u64();
        assert_ne!(first, second);
    }

    #[test]
    fn shuffle_reaches_every_permutation_of_three() {
        let mut rng = SeatRng::new(2024);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut items = [1, 2, 3];
            rng.shuffle(&mut items);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6, "Fisher–Yates must reach all 3! orderings");
    }
}
