//! Random number helpers shared by distributions and generators.
//!
//! Everything here operates on `&mut dyn RngCore` so that generator trees can
//! thread one explicit random source through every draw.
use rand::RngCore;

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits.
    ((rng.next_u64() >> 11) as f64) * (1.0 / ((1u64 << 53) as f64))
}

/// Draw an index uniformly from `0..n` without modulo bias.
///
/// `n` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, n: usize) -> usize {
    debug_assert!(n > 0, "rand_index requires a non-empty range");
    let n = n as u64;
    // 2^64 mod n; values below this would over-represent the low residues.
    let threshold = n.wrapping_neg() % n;
    loop {
        let x = rng.next_u64();
        if x >= threshold {
            return (x % n) as usize;
        }
    }
}

/// Fisher–Yates shuffle. Every permutation is equally likely under a fair source.
pub(crate) fn shuffle_in_place<T>(items: &mut [T], rng: &mut dyn RngCore) {
    for i in (1..items.len()).rev() {
        let j = rand_index(rng, i + 1);
        items.swap(i, j);
    }
}

/// Pick an index from a categorical distribution given by `probs`.
///
/// `probs` must be non-empty; it need not be normalized. Falls back to the last
/// index with positive weight when rounding leaves a remainder.
pub(crate) fn pick_categorical(probs: &[f64], rng: &mut dyn RngCore) -> usize {
    let total: f64 = probs.iter().sum();
    let mut roll = rand01(rng) * total;
    for (i, p) in probs.iter().enumerate() {
        if *p <= 0.0 {
            continue;
        }
        roll -= p;
        if roll < 0.0 {
            return i;
        }
    }

    probs
        .iter()
        .rposition(|p| *p > 0.0)
        .unwrap_or(probs.len() - 1)
}

/// Creates a deterministic seed for an independent branch (thread, scene index)
/// from a base seed.
pub fn seed_for_branch(base_seed: u64, branch: u64) -> u64 {
    mix_u64(base_seed ^ branch.wrapping_mul(0x9E3779B97F4A7C15))
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
