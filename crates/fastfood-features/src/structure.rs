//! Random structured-matrix factors.
//!
//! Each block of the structured projection is described by four factors,
//! all sampled at fit time from one shared seeded generator: a Gaussian
//! vector `G`, a sign vector `B`, a permutation `P` and a scaling vector
//! `S`. The scaling entries are chi-distributed with `d` degrees of freedom
//! and divided by the Euclidean norm of `G`, so each row of the implied
//! structured matrix has the same norm distribution as a row of a dense
//! `d x d` i.i.d. Gaussian matrix.
//!
//! Draw order is part of the contract: per block `G`, then `B`, then `P`,
//! then `S`, with blocks generated in stacking order. A fixed seed therefore
//! reproduces identical fitted state.

use rand_distr::{ChiSquared, Distribution};
use scirs2_core::ndarray::Array1;
use scirs2_core::random::{Rng, StdRng};
use scirs2_core::StandardNormal;

/// The four structured factors of one projection block.
#[derive(Debug, Clone, PartialEq)]
pub struct FastfoodBlock {
    /// Gaussian vector `G`, i.i.d. standard normal.
    pub(crate) gaussian: Array1<f64>,
    /// Sign vector `B`, entries in {-1, +1}.
    pub(crate) signs: Array1<f64>,
    /// Permutation `P`, a bijection on `[0, d)`.
    pub(crate) permutation: Vec<usize>,
    /// Scaling vector `S`, chi(d) samples divided by `||G||_2`.
    pub(crate) scaling: Array1<f64>,
}

impl FastfoodBlock {
    /// Sample one block of structured factors from `rng`.
    pub(crate) fn sample(dim: usize, rng: &mut StdRng) -> Self {
        let gaussian = gaussian_vector(dim, rng);
        let signs = sign_vector(dim, rng);
        let permutation = random_permutation(dim, rng);
        let scaling = scaling_vector(dim, &gaussian, rng);

        Self {
            gaussian,
            signs,
            permutation,
            scaling,
        }
    }

    /// Per-block working dimension.
    pub fn dim(&self) -> usize {
        self.gaussian.len()
    }
}

fn gaussian_vector(dim: usize, rng: &mut StdRng) -> Array1<f64> {
    Array1::from_shape_fn(dim, |_| rng.sample(StandardNormal))
}

fn sign_vector(dim: usize, rng: &mut StdRng) -> Array1<f64> {
    Array1::from_shape_fn(dim, |_| if rng.random::<bool>() { 1.0 } else { -1.0 })
}

/// Uniformly random permutation of `[0, dim)` via Fisher-Yates.
pub(crate) fn random_permutation(dim: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..dim).collect();
    for i in (1..dim).rev() {
        let j = rng.random_range(0..=i);
        indices.swap(i, j);
    }
    indices
}

/// Chi(d)-distributed entries normalized by `||g||_2`.
///
/// A chi deviate is the square root of a chi-squared deviate with the same
/// degrees of freedom.
fn scaling_vector(dim: usize, gaussian: &Array1<f64>, rng: &mut StdRng) -> Array1<f64> {
    let chi_squared = ChiSquared::new(dim as f64).unwrap();
    let inverse_norm = 1.0 / gaussian.dot(gaussian).sqrt();
    Array1::from_shape_fn(dim, |_| chi_squared.sample(rng).sqrt() * inverse_norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::random::SeedableRng;

    fn sample_test_block(dim: usize, seed: u64) -> FastfoodBlock {
        let mut rng = StdRng::seed_from_u64(seed);
        FastfoodBlock::sample(dim, &mut rng)
    }

    #[test]
    fn test_block_factor_lengths() {
        let block = sample_test_block(16, 42);
        assert_eq!(block.dim(), 16);
        assert_eq!(block.gaussian.len(), 16);
        assert_eq!(block.signs.len(), 16);
        assert_eq!(block.permutation.len(), 16);
        assert_eq!(block.scaling.len(), 16);
    }

    #[test]
    fn test_signs_are_plus_or_minus_one() {
        let block = sample_test_block(64, 7);
        assert!(block.signs.iter().all(|&b| b == 1.0 || b == -1.0));
        // Both signs should show up in 64 draws.
        assert!(block.signs.iter().any(|&b| b == 1.0));
        assert!(block.signs.iter().any(|&b| b == -1.0));
    }

    #[test]
    fn test_permutation_is_bijection() {
        for seed in 0..20 {
            let block = sample_test_block(32, seed);
            let mut sorted = block.permutation.clone();
            sorted.sort_unstable();
            let expected: Vec<usize> = (0..32).collect();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_scaling_is_positive() {
        let block = sample_test_block(16, 3);
        assert!(block.scaling.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn test_same_seed_reproduces_block() {
        let a = sample_test_block(16, 123);
        let b = sample_test_block(16, 123);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = sample_test_block(16, 1);
        let b = sample_test_block(16, 2);
        assert_ne!(a.gaussian, b.gaussian);
    }

    #[test]
    fn test_scaling_tracks_gaussian_row_norm() {
        // E[chi(d)] ~ sqrt(d) and ||G||_2 ~ sqrt(d), so the mean scaling
        // entry should sit near 1 for moderate d.
        let dim = 256;
        let mut rng = StdRng::seed_from_u64(9);
        let block = FastfoodBlock::sample(dim, &mut rng);
        let mean = block.scaling.sum() / dim as f64;
        assert!((mean - 1.0).abs() < 0.2, "mean scaling {} too far from 1", mean);
    }
}
