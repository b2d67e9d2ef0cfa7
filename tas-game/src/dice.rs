//! Dice primitives shared by world generation and trade.
//!
//! Everything in the rules engine rolls through the [`Dice`] trait so the
//! pipeline never sees a concrete generator. Production code uses
//! [`RollStream`]; scenario tests script exact faces with [`LoadedDice`].

use std::collections::VecDeque;

use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Source of die rolls. Modifiers are applied by the caller.
pub trait Dice {
    /// Roll a single six-sided die (1..=6).
    fn d6(&mut self) -> i32;

    /// Roll a three-sided die (1..=3).
    fn d3(&mut self) -> i32;

    /// Pick uniformly among `sides` positions, returning 1..=sides.
    /// Zero sides yields 0.
    fn dx(&mut self, sides: usize) -> usize;

    /// Sum of `n` six-sided dice.
    fn sum(&mut self, n: u32) -> i32 {
        (0..n).map(|_| self.d6()).sum()
    }

    /// Two dice read as tens and ones (11..=66).
    fn d66(&mut self) -> i32 {
        let tens = self.d6();
        let ones = self.d6();
        tens * 10 + ones
    }
}

/// Random roll stream with a draw counter, seeded from entropy or a user seed.
#[derive(Debug, Clone)]
pub struct RollStream<R = ChaCha20Rng> {
    rng: R,
    draws: u64,
}

impl RollStream<ChaCha20Rng> {
    /// Stream seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }

    /// Stream seeded directly from a 64-bit seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Stream for one named domain (`b"world"`, `b"sector-names"`, ...) of a
    /// user seed. Domains sharing a seed never share a sequence.
    #[must_use]
    pub fn for_domain(seed: u64, domain_tag: &[u8]) -> Self {
        Self::seeded(derive_stream_seed(seed, domain_tag))
    }
}

impl<R: RngCore> RollStream<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of dice rolled against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    fn bump(&mut self) {
        self.draws = self.draws.saturating_add(1);
    }
}

impl<R: RngCore> Dice for RollStream<R> {
    fn d6(&mut self) -> i32 {
        self.bump();
        self.rng.gen_range(1..=6)
    }

    fn d3(&mut self) -> i32 {
        self.bump();
        self.rng.gen_range(1..=3)
    }

    fn dx(&mut self, sides: usize) -> usize {
        if sides == 0 {
            return 0;
        }
        self.bump();
        self.rng.gen_range(1..=sides)
    }
}

/// Derive an independent 64-bit seed for a named stream.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).map_or(user_seed, |mut mac| {
        mac.update(domain_tag);
        let digest = mac.finalize().into_bytes();
        let mut seed_bytes = [0_u8; 8];
        seed_bytes.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(seed_bytes)
    })
}

/// Scripted dice: every roll consumes the next face in order.
///
/// Once the script runs out every roll returns the fallback face, so a
/// scenario only needs to spell out the rolls it cares about.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    faces: VecDeque<i32>,
    fallback: i32,
    consumed: usize,
}

impl LoadedDice {
    #[must_use]
    pub fn new(faces: impl IntoIterator<Item = i32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: 1,
            consumed: 0,
        }
    }

    #[must_use]
    pub const fn with_fallback(mut self, face: i32) -> Self {
        self.fallback = face;
        self
    }

    /// Faces read so far, including fallback rolls.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Scripted faces not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }

    fn next_face(&mut self) -> i32 {
        self.consumed += 1;
        self.faces.pop_front().unwrap_or(self.fallback)
    }
}

impl Dice for LoadedDice {
    fn d6(&mut self) -> i32 {
        self.next_face()
    }

    fn d3(&mut self) -> i32 {
        self.next_face()
    }

    fn dx(&mut self, sides: usize) -> usize {
        if sides == 0 {
            return 0;
        }
        let face = usize::try_from(self.next_face()).unwrap_or(1);
        face.clamp(1, sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_stream_faces_stay_in_range() {
        let mut dice = RollStream::seeded(0xD1CE);
        for _ in 0..2_000 {
            assert!((1..=6).contains(&dice.d6()));
            assert!((1..=3).contains(&dice.d3()));
            assert!((1..=20).contains(&dice.dx(20)));
            assert!((2..=12).contains(&dice.sum(2)));
            let d66 = dice.d66();
            assert!((1..=6).contains(&(d66 / 10)));
            assert!((1..=6).contains(&(d66 % 10)));
        }
        assert_eq!(dice.dx(0), 0);
    }

    #[test]
    fn draws_are_counted_per_die() {
        let mut dice = RollStream::seeded(1);
        let _ = dice.sum(3);
        let _ = dice.d66();
        assert_eq!(dice.draws(), 5);
    }

    #[test]
    fn same_seed_repeats_and_domains_diverge() {
        let mut a = RollStream::for_domain(42, b"world");
        let mut b = RollStream::for_domain(42, b"world");
        let seq_a: Vec<i32> = (0..32).map(|_| a.d6()).collect();
        let seq_b: Vec<i32> = (0..32).map(|_| b.d6()).collect();
        assert_eq!(seq_a, seq_b);

        assert_ne!(
            derive_stream_seed(42, b"world"),
            derive_stream_seed(42, b"sector-names")
        );
    }

    #[test]
    fn loaded_dice_reads_script_then_fallback() {
        let mut dice = LoadedDice::new([3, 4, 6]).with_fallback(2);
        assert_eq!(dice.sum(2), 7);
        assert_eq!(dice.d66(), 62);
        assert_eq!(dice.d3(), 2);
        assert_eq!(dice.consumed(), 5);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn loaded_dice_clamps_positions() {
        let mut dice = LoadedDice::new([9, -1]);
        assert_eq!(dice.dx(4), 4);
        assert_eq!(dice.dx(4), 1);
    }
}
