use crate::matrix::BitMatrix;
use rand::Rng;

/// Default upper bound of the dimension sweep, inclusive
pub const DEFAULT_MAX_DIMENSION: usize = 700;

/// Default number of Monte Carlo trials per dimension
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Monte Carlo estimator of the probability that a uniformly random square matrix
/// over the two-element field has full rank.
///
/// The estimator owns a single [`BitMatrix`] buffer sized to its maximum dimension,
/// which every trial of every [`estimate`](RankEstimator::estimate) call reuses.
///
/// # Examples
///
/// ```
/// use gf2rank::RankEstimator;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let mut estimator = RankEstimator::new(32);
/// let p = estimator.estimate(&mut rng, 32, 500);
/// assert!((0.0..=1.0).contains(&p));
/// ```
pub struct RankEstimator {
    matrix: BitMatrix,
}

impl RankEstimator {
    pub fn new(max_dimension: usize) -> Self {
        RankEstimator {
            matrix: BitMatrix::with_capacity(max_dimension),
        }
    }

    #[inline]
    pub fn max_dimension(&self) -> usize {
        self.matrix.max_dimension()
    }

    /// Estimates the full-rank probability for dimension `n` as the fraction of
    /// `iterations` freshly sampled matrices that pass the rank test.
    ///
    /// The result is always in `[0.0, 1.0]`. The empty matrix is vacuously full
    /// rank, so `n = 0` returns exactly 1.0 without drawing from `rng` at all.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the estimator's maximum dimension, or if `iterations`
    /// is zero.
    pub fn estimate(&mut self, rng: &mut impl Rng, n: usize, iterations: usize) -> f64 {
        assert!(
            n <= self.max_dimension(),
            "dimension {} exceeds maximum dimension {}",
            n,
            self.max_dimension()
        );
        assert!(iterations > 0, "iterations must be positive");

        if n == 0 {
            return 1.0;
        }

        let mut full_rank = 0usize;
        for _ in 0..iterations {
            self.matrix.fill_random(rng, n);
            if self.matrix.is_full_rank(n) {
                full_rank += 1;
            }
        }
        full_rank as f64 / iterations as f64
    }

    /// Runs [`estimate`](RankEstimator::estimate) for every dimension from 0 to the
    /// maximum, returning the (dimension, probability) pairs in ascending order.
    pub fn sweep(&mut self, rng: &mut impl Rng, iterations: usize) -> Vec<(usize, f64)> {
        (0..=self.max_dimension())
            .map(|n| (n, self.estimate(rng, n, iterations)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn estimates_are_probabilities() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut estimator = RankEstimator::new(8);
        for n in 0..=8 {
            let p = estimator.estimate(&mut rng, n, 50);
            assert!((0.0..=1.0).contains(&p), "estimate {} out of range", p);
        }
    }

    #[test]
    fn empty_matrix_is_certain() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut estimator = RankEstimator::new(4);
        assert_eq!(estimator.estimate(&mut rng, 0, 1), 1.0);
        assert_eq!(estimator.estimate(&mut rng, 0, 1000), 1.0);
    }

    #[test]
    fn approaches_the_gf2_limit() {
        // For growing n the full-rank probability tends to prod(1 - 2^-k), about
        // 0.288788; at n = 64 the two differ by far less than the sampling error.
        let limit: f64 = (1..=64).map(|k| 1.0 - 2.0_f64.powi(-k)).product();

        let mut rng = SmallRng::seed_from_u64(7);
        let mut estimator = RankEstimator::new(64);
        let p = estimator.estimate(&mut rng, 64, 2000);
        assert!(
            (p - limit).abs() < 0.06,
            "estimate {} strayed from limit {}",
            p,
            limit
        );
    }

    #[test]
    fn one_by_one_matches_coin_flip() {
        // A 1x1 matrix is full rank iff its single bit is 1
        let mut rng = SmallRng::seed_from_u64(9);
        let mut estimator = RankEstimator::new(1);
        let p = estimator.estimate(&mut rng, 1, 4000);
        assert!((p - 0.5).abs() < 0.05, "estimate {} strayed from 0.5", p);
    }

    #[test]
    fn sweep_is_ascending_and_complete() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut estimator = RankEstimator::new(6);
        let results = estimator.sweep(&mut rng, 30);
        assert_eq!(results.len(), 7);
        assert_eq!(results[0], (0, 1.0));
        for (i, &(n, p)) in results.iter().enumerate() {
            assert_eq!(n, i);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    #[should_panic(expected = "iterations must be positive")]
    fn zero_iterations_panics() {
        let mut rng = SmallRng::seed_from_u64(1);
        RankEstimator::new(4).estimate(&mut rng, 2, 0);
    }
}
