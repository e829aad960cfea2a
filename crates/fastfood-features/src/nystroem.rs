//! Nystroem low-rank kernel approximation.
//!
//! Builds an approximate feature map for an arbitrary kernel from a random
//! subset of the training rows: with landmark kernel matrix `W = U S V^T`,
//! the embedding of a row `x` is `k(x, landmarks) * (U S^{-1/2} V^T)^T`, so
//! inner products of embeddings reproduce `C W^{-1} C^T`, the classical
//! Nystroem approximation.
//!
//! ## References
//!
//! - Williams & Seeger (2001): "Using the Nystroem Method to Speed Up
//!   Kernel Machines"
//! - Yang et al. (2012): "Nystroem Method vs Random Fourier Features: A
//!   Theoretical and Empirical Comparison"

use serde::{Deserialize, Serialize};

use scirs2_core::ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use scirs2_core::random::{SeedableRng, StdRng};

use crate::error::{FeatureMapError, Result};
use crate::structure::random_permutation;
use crate::types::{check_input, FeatureMap};

/// Kernel used internally to compare rows against the landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LandmarkKernel {
    /// `exp(-gamma * ||x - y||_2^2)`
    Rbf { gamma: f64 },
    /// `exp(-gamma * ||x - y||_1)`
    Laplacian { gamma: f64 },
    /// `<x, y>`
    Linear,
}

impl LandmarkKernel {
    pub(crate) fn compute(&self, x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> f64 {
        match self {
            LandmarkKernel::Rbf { gamma } => {
                let sq_dist: f64 = x
                    .iter()
                    .zip(y.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (-gamma * sq_dist).exp()
            }
            LandmarkKernel::Laplacian { gamma } => {
                let l1_dist: f64 = x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).sum();
                (-gamma * l1_dist).exp()
            }
            LandmarkKernel::Linear => x.iter().zip(y.iter()).map(|(a, b)| a * b).sum(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            LandmarkKernel::Rbf { gamma } | LandmarkKernel::Laplacian { gamma } => {
                if !(*gamma > 0.0) || !gamma.is_finite() {
                    return Err(FeatureMapError::invalid_parameter(
                        "gamma",
                        gamma,
                        "must be a positive finite number",
                    ));
                }
            }
            LandmarkKernel::Linear => {}
        }
        Ok(())
    }
}

/// Configuration for the Nystroem approximator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NystroemConfig {
    /// Kernel to approximate.
    pub kernel: LandmarkKernel,
    /// Requested number of landmark rows. Clamped to the training-set size
    /// at fit time; read [`Nystroem::n_landmarks`] for the realized count.
    pub n_components: usize,
    /// Random seed for the landmark selection.
    pub seed: Option<u64>,
}

impl NystroemConfig {
    /// Create a new configuration.
    pub fn new(kernel: LandmarkKernel, n_components: usize) -> Result<Self> {
        kernel.validate()?;
        if n_components < 1 {
            return Err(FeatureMapError::invalid_parameter(
                "n_components",
                n_components,
                "at least one landmark is required",
            ));
        }
        Ok(Self {
            kernel,
            n_components,
            seed: None,
        })
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone)]
struct NystroemState {
    /// Landmark rows, shape `(m, input_dim)`.
    components: Array2<f64>,
    /// `U S^{-1/2} V^T` of the landmark kernel matrix, shape `(m, m)`.
    normalization: Array2<f64>,
    /// Positions of the landmarks in the training data.
    landmark_indices: Vec<usize>,
}

/// Low-rank kernel feature map using a subset of the training rows.
#[derive(Debug, Clone)]
pub struct Nystroem {
    config: NystroemConfig,
    state: Option<NystroemState>,
}

impl Nystroem {
    /// Create a new, unfitted approximator.
    pub fn new(config: NystroemConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &NystroemConfig {
        &self.config
    }

    /// Realized number of landmarks, once fitted.
    pub fn n_landmarks(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.components.nrows())
    }

    /// Positions of the selected landmarks in the training data.
    pub fn landmark_indices(&self) -> Option<&[usize]> {
        self.state.as_ref().map(|s| s.landmark_indices.as_slice())
    }
}

impl FeatureMap for Nystroem {
    fn fit(&mut self, data: &ArrayView2<f64>) -> Result<()> {
        self.config.kernel.validate()?;
        check_input(data, "fit")?;

        let n_samples = data.nrows();
        let m = self.config.n_components.min(n_samples);

        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or(42));
        let mut landmark_indices = random_permutation(n_samples, &mut rng);
        landmark_indices.truncate(m);

        let mut components = Array2::zeros((m, data.ncols()));
        for (i, &idx) in landmark_indices.iter().enumerate() {
            components.row_mut(i).assign(&data.row(idx));
        }

        // Kernel matrix on the landmarks.
        let mut w = Array2::zeros((m, m));
        for i in 0..m {
            for j in i..m {
                let value = self
                    .config
                    .kernel
                    .compute(&components.row(i), &components.row(j));
                w[[i, j]] = value;
                w[[j, i]] = value;
            }
        }

        let (mut u, s, vt) = scirs2_linalg::svd(&w.view(), false, None).map_err(|e| {
            FeatureMapError::computation(format!("SVD of landmark kernel matrix failed: {e:?}"))
        })?;

        // U S^{-1/2} V^T; singular values below 1e-12 are clamped so the
        // inverse square root stays finite on rank-deficient landmark sets.
        for (k, mut column) in u.axis_iter_mut(Axis(1)).enumerate() {
            let denom = s[k].max(1e-12).sqrt();
            column.mapv_inplace(|v| v / denom);
        }
        let normalization = u.dot(&vt);

        self.state = Some(NystroemState {
            components,
            normalization,
            landmark_indices,
        });
        Ok(())
    }

    fn transform(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.state.as_ref().ok_or_else(|| {
            FeatureMapError::shape_mismatch(
                "transform: fit has not been called",
                vec![],
                vec![],
            )
        })?;
        check_input(data, "transform")?;
        if data.ncols() != state.components.ncols() {
            return Err(FeatureMapError::shape_mismatch(
                "transform",
                vec![state.components.ncols()],
                vec![data.ncols()],
            ));
        }

        let m = state.components.nrows();
        let mut embedded = Array2::zeros((data.nrows(), m));
        for (i, row) in data.axis_iter(Axis(0)).enumerate() {
            for j in 0..m {
                embedded[[i, j]] = self.config.kernel.compute(&row, &state.components.row(j));
            }
        }

        Ok(embedded.dot(&state.normalization.t()))
    }

    fn output_width(&self) -> Option<usize> {
        self.n_landmarks()
    }

    fn name(&self) -> &str {
        "Nystroem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(rows: usize, cols: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, cols), |(i, j)| ((i * cols + j) as f64 * 0.43).cos())
    }

    #[test]
    fn test_kernel_values() {
        let x = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let rbf = LandmarkKernel::Rbf { gamma: 0.5 };
        let value = rbf.compute(&x.row(0), &x.row(1));
        assert!((value - (-1.0_f64).exp()).abs() < 1e-12);

        let laplacian = LandmarkKernel::Laplacian { gamma: 1.0 };
        assert!((laplacian.compute(&x.row(0), &x.row(1)) - (-2.0_f64).exp()).abs() < 1e-12);

        let linear = LandmarkKernel::Linear;
        assert_eq!(linear.compute(&x.row(0), &x.row(0)), 1.0);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(NystroemConfig::new(LandmarkKernel::Rbf { gamma: 0.0 }, 5).is_err());
        assert!(NystroemConfig::new(LandmarkKernel::Linear, 0).is_err());
    }

    #[test]
    fn test_fit_transform_shapes() {
        let config = NystroemConfig::new(LandmarkKernel::Rbf { gamma: 1.0 }, 4)
            .unwrap()
            .with_seed(0);
        let mut nystroem = Nystroem::new(config);
        let x = sample_data(10, 3);

        let features = nystroem.fit_transform(&x.view()).unwrap();
        assert_eq!(features.dim(), (10, 4));
        assert_eq!(nystroem.n_landmarks(), Some(4));
        assert_eq!(nystroem.landmark_indices().unwrap().len(), 4);
    }

    #[test]
    fn test_landmark_count_is_clamped() {
        let config = NystroemConfig::new(LandmarkKernel::Rbf { gamma: 1.0 }, 50)
            .unwrap()
            .with_seed(0);
        let mut nystroem = Nystroem::new(config);
        let x = sample_data(6, 3);
        nystroem.fit(&x.view()).unwrap();

        assert_eq!(nystroem.n_landmarks(), Some(6));
        assert_eq!(nystroem.output_width(), Some(6));
    }

    #[test]
    fn test_full_landmark_set_recovers_kernel_matrix() {
        // With every training row used as a landmark, the feature inner
        // products reproduce the exact kernel matrix.
        let kernel = LandmarkKernel::Rbf { gamma: 0.7 };
        let config = NystroemConfig::new(kernel, 6).unwrap().with_seed(1);
        let mut nystroem = Nystroem::new(config);
        let x = sample_data(6, 2);

        let z = nystroem.fit_transform(&x.view()).unwrap();
        let approx = z.dot(&z.t());

        for i in 0..6 {
            for j in 0..6 {
                let exact = kernel.compute(&x.row(i), &x.row(j));
                assert!(
                    (approx[[i, j]] - exact).abs() < 1e-6,
                    "K[{},{}]: approx {} vs exact {}",
                    i,
                    j,
                    approx[[i, j]],
                    exact
                );
            }
        }
    }

    #[test]
    fn test_seeded_landmark_selection_is_reproducible() {
        let x = sample_data(12, 3);
        let make = || {
            let config = NystroemConfig::new(LandmarkKernel::Rbf { gamma: 1.0 }, 5)
                .unwrap()
                .with_seed(99);
            Nystroem::new(config)
        };

        let mut a = make();
        let mut b = make();
        assert_eq!(
            a.fit_transform(&x.view()).unwrap(),
            b.fit_transform(&x.view()).unwrap()
        );
        assert_eq!(a.landmark_indices(), b.landmark_indices());
    }

    #[test]
    fn test_unfitted_and_mismatched_transform() {
        let config = NystroemConfig::new(LandmarkKernel::Linear, 3).unwrap();
        let nystroem = Nystroem::new(config);
        assert!(nystroem.transform(&sample_data(2, 3).view()).is_err());

        let mut nystroem = nystroem;
        nystroem.fit(&sample_data(5, 3).view()).unwrap();
        assert!(nystroem.transform(&sample_data(2, 4).view()).is_err());
    }
}
