//! Sampling primitives shared by the cluster-assignment, CL and CM engines.
//!
//! Weighted sampling is implemented as an explicit cumulative-weight draw
//! rather than reaching for a distribution object, so the same primitive
//! can be reused both for single draws (cluster assignment) and for batch
//! draws (edge placement) without re-building a lookup structure each time.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Derives a reproducible, independent RNG stream for one parallel task.
///
/// Each worker in the CL/CM engines operates on a disjoint shard of
/// clusters (or the distinguished background task); seeding every task's
/// RNG from `(seed, task_id)` via a splitmix-style mix keeps runs
/// reproducible for a given seed and thread assignment without the workers
/// ever sharing RNG state.
pub fn task_rng(seed: u64, task_id: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(task_id)))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Draws one index from `weights` with probability proportional to its
/// weight. Returns `None` if the weights are empty or sum to zero.
pub fn weighted_choice<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return None;
    }
    let r = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if r < cumulative {
            return Some(i);
        }
    }
    // Floating point rounding can leave `r` fractionally past the last
    // cumulative bucket; fall back to the last non-zero-weight index.
    weights.iter().rposition(|&w| w > 0.0)
}

/// Draws `count` indices into `weights` with replacement, weighted by
/// value. Panics are impossible: an empty or all-zero `weights` yields an
/// empty result.
pub fn weighted_sample_with_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[f64],
    count: usize,
) -> Vec<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return Vec::new();
    }
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut running = 0.0;
    for &w in weights {
        running += w;
        cumulative.push(running);
    }
    (0..count)
        .map(|_| {
            let r = rng.random_range(0.0..total);
            match cumulative.partition_point(|&c| c <= r) {
                idx if idx < cumulative.len() => idx,
                _ => cumulative.len() - 1,
            }
        })
        .collect()
}

/// Randomized rounding: rounds a non-negative real `x` up to `floor(x) + 1`
/// with probability `x - floor(x)`, otherwise down to `floor(x)`.
pub fn randround<R: Rng + ?Sized>(rng: &mut R, x: f64) -> u32 {
    let floor = x.floor();
    let frac = (x - floor).clamp(0.0, 1.0);
    let base = floor as u32;
    if rng.random_bool(frac) {
        base + 1
    } else {
        base
    }
}

/// Shuffles `items` in place using the Fisher-Yates algorithm.
pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    items.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn weighted_choice_picks_only_nonzero_weight() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(weighted_choice(&mut rng, &[0.0, 5.0, 0.0]), Some(1));
        }
    }

    #[test]
    fn weighted_choice_empty_weights_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(weighted_choice(&mut rng, &[]), None);
        assert_eq!(weighted_choice(&mut rng, &[0.0, 0.0]), None);
    }

    #[test]
    fn weighted_sample_respects_count() {
        let mut rng = StdRng::seed_from_u64(2);
        let draws = weighted_sample_with_replacement(&mut rng, &[1.0, 1.0, 1.0], 100);
        assert_eq!(draws.len(), 100);
        assert!(draws.iter().all(|&i| i < 3));
    }

    #[test]
    fn randround_is_exact_on_integers() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(randround(&mut rng, 4.0), 4);
        }
    }

    #[test]
    fn randround_converges_to_expectation() {
        let mut rng = StdRng::seed_from_u64(4);
        let trials = 20_000;
        let sum: u64 = (0..trials).map(|_| randround(&mut rng, 2.3) as u64).sum();
        let mean = sum as f64 / trials as f64;
        assert!((mean - 2.3).abs() < 0.05, "mean was {mean}");
    }

    #[test]
    fn task_rng_is_deterministic_and_task_dependent() {
        let mut a = task_rng(7, 3);
        let mut b = task_rng(7, 3);
        assert_eq!(a.random::<u64>(), b.random::<u64>());

        let mut c = task_rng(7, 3);
        let mut d = task_rng(7, 4);
        assert_ne!(c.random::<u64>(), d.random::<u64>());
    }

    #[test]
    fn shuffle_preserves_multiset() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut items = vec![1, 1, 2, 3, 3, 3];
        let mut sorted_before = items.clone();
        sorted_before.sort_unstable();
        shuffle(&mut rng, &mut items);
        let mut sorted_after = items.clone();
        sorted_after.sort_unstable();
        assert_eq!(sorted_before, sorted_after);
    }
}
