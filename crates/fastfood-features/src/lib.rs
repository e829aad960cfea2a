//! # Fastfood Features
//!
//! Randomized, explicit feature maps for scalable kernel approximation.
//!
//! Kernel machines evaluate `K(x, y)` for every pair of points, which is
//! quadratic in the dataset size. For shift-invariant kernels, Bochner's
//! theorem lets us instead sample random frequencies from the kernel's
//! Fourier transform and map every point to a finite trigonometric feature
//! vector `z(x)` with `K(x, y) ~ z(x)^T z(y)`, so any linear model on `z`
//! approximates the kernel machine at linear cost.
//!
//! The centerpiece of this crate is the **Fastfood** approximator for the
//! Gaussian kernel `K(x, y) = exp(-||x - y||^2 / (2 sigma^2))`. Where the
//! classical sampler multiplies by a dense `d x n` Gaussian matrix, Fastfood
//! factors the projection into structured pieces,
//!
//! `V = (1/(sigma sqrt(d))) * diag(S) * H * diag(G) * P * H * diag(B)`
//!
//! (sign diagonal, fast Walsh-Hadamard transform, random permutation,
//! Gaussian diagonal, second Hadamard transform, row-norm-matching scale),
//! which needs O(n) storage and O(n log d) time per row instead of O(nd).
//!
//! Also included are the dense Monte-Carlo samplers ([`RbfSampler`],
//! [`SkewedChi2Sampler`]), the deterministic [`AdditiveChi2Sampler`] and the
//! data-dependent [`Nystroem`] low-rank approximator. All estimators expose
//! the same two-operation contract through the [`FeatureMap`] trait.
//!
//! ## References
//!
//! - Le, Q., Sarlos, T., & Smola, A. (2013). "Fastfood - Approximating
//!   Kernel Expansions in Loglinear Time." ICML.
//! - Rahimi, A., & Recht, B. (2007). "Random Features for Large-Scale
//!   Kernel Machines." NIPS.
//!
//! ## Example
//!
//! ```rust
//! use fastfood_features::{Fastfood, FastfoodConfig, FeatureMap};
//! use scirs2_core::ndarray::Array2;
//!
//! let config = FastfoodConfig::new(1.0, 100).with_seed(42);
//! let mut fastfood = Fastfood::new(config).unwrap();
//!
//! // 10 input features pad to blocks of 16; 100 requested components round
//! // up to 7 blocks = 112, doubled by the cosine/sine map.
//! let x = Array2::from_shape_fn((20, 10), |(i, j)| (i as f64 - j as f64) * 0.05);
//! let features = fastfood.fit_transform(&x.view()).unwrap();
//! assert_eq!(features.ncols(), 224);
//! assert_eq!(fastfood.realized_components(), Some(112));
//! ```

pub mod dimensions;
pub mod error;
pub mod fastfood;
pub mod features;
mod hadamard;
pub mod nystroem;
pub mod samplers;
pub mod structure;
mod transform;
pub mod types;

// Re-export main types for convenience
pub use dimensions::DimensionPlan;
pub use error::{FeatureMapError, Result};
pub use fastfood::{Fastfood, FastfoodConfig};
pub use features::FeatureMode;
pub use nystroem::{LandmarkKernel, Nystroem, NystroemConfig};
pub use samplers::{AdditiveChi2Sampler, RbfSampler, SkewedChi2Sampler};
pub use structure::FastfoodBlock;
pub use types::FeatureMap;

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray::Array2;

    #[test]
    fn test_estimators_share_the_feature_map_contract() {
        let mut estimators: Vec<Box<dyn FeatureMap>> = vec![
            Box::new(Fastfood::new(FastfoodConfig::new(1.0, 8).with_seed(0)).unwrap()),
            Box::new(RbfSampler::new(0.5, 8).unwrap().with_seed(0)),
            Box::new(SkewedChi2Sampler::new(1.0, 8).unwrap().with_seed(0)),
            Box::new(AdditiveChi2Sampler::new(2).unwrap()),
            Box::new(Nystroem::new(
                NystroemConfig::new(LandmarkKernel::Rbf { gamma: 1.0 }, 3)
                    .unwrap()
                    .with_seed(0),
            )),
        ];

        let x = Array2::from_shape_fn((5, 4), |(i, j)| (i + j) as f64 * 0.25);
        for estimator in estimators.iter_mut() {
            let features = estimator.fit_transform(&x.view()).unwrap();
            assert_eq!(features.nrows(), 5);
            assert_eq!(Some(features.ncols()), estimator.output_width());
        }
    }

    #[test]
    fn test_estimator_names() {
        assert_eq!(
            Fastfood::new(FastfoodConfig::new(1.0, 4)).unwrap().name(),
            "Fastfood"
        );
        assert_eq!(RbfSampler::new(1.0, 4).unwrap().name(), "RbfSampler");
        assert_eq!(
            AdditiveChi2Sampler::new(2).unwrap().name(),
            "AdditiveChi2Sampler"
        );
    }
}
