//! `gf2rank` estimates, by Monte Carlo sampling, the probability that a uniformly
//! random n-by-n matrix over the two-element finite field has full rank, for every
//! n from 0 up to a configured maximum. Some features include:
//! - bit-packed matrix rows ([`BitRow`]) stored in 64-bit blocks, so row updates
//!   during elimination cost one word operation per 64 columns
//! - an in-place full-rank test ([`BitMatrix::is_full_rank`]) using Gaussian
//!   elimination with partial pivoting, stopping at the first missing pivot
//! - a fixed-capacity matrix buffer allocated once and refilled for every trial
//! - a sequential sweep driver ([`RankEstimator`]) and a rayon-parallel one
//!   ([`par_sweep`]) that keeps results in ascending dimension order
//!
//! As n grows, the estimated probability settles near the known constant
//! `prod_k (1 - 2^-k)`, approximately 0.288788.

#![allow(
    clippy::needless_range_loop,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod bitrow;
pub mod estimate;
pub mod matrix;
pub mod parallel;

pub use bitrow::{BitBlock, BitRow, RowBits, BLOCKSIZE};
pub use estimate::{RankEstimator, DEFAULT_ITERATIONS, DEFAULT_MAX_DIMENSION};
pub use matrix::BitMatrix;
pub use parallel::par_sweep;
