use crate::estimate::RankEstimator;
use rand::{rngs::SmallRng, SeedableRng};
use rayon::prelude::*;

// SplitMix64 finalizer; gives every dimension its own well-separated seed
fn seed_for(base: u64, n: u64) -> u64 {
    let mut z = base.wrapping_add(n.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Runs the full sweep with one rayon task per dimension.
///
/// Every dimension gets its own matrix buffer and its own generator seeded from
/// `seed`, so workers share no mutable state and the output is identical for a
/// given seed no matter how the tasks are scheduled. Results come back as
/// (dimension, probability) pairs in ascending dimension order.
pub fn par_sweep(max_dimension: usize, iterations: usize, seed: u64) -> Vec<(usize, f64)> {
    (0..=max_dimension)
        .into_par_iter()
        .map(|n| {
            let mut rng = SmallRng::seed_from_u64(seed_for(seed, n as u64));
            let mut estimator = RankEstimator::new(n);
            (n, estimator.estimate(&mut rng, n, iterations))
        })
        .collect()
}
