//! Monte-Carlo feature-map samplers.
//!
//! The dense counterparts of the structured approximator: the plain
//! random-Fourier RBF sampler (Rahimi & Recht, 2007), the skewed
//! chi-squared sampler (Li, Ionescu & Sminchisescu, 2010) and the
//! deterministic additive chi-squared map (Vedaldi & Zisserman, 2010).
//! They trade the structured transform's O(n log d) cost for a dense O(nd)
//! projection but share the same estimator contract.

use std::f64::consts::PI;

use scirs2_core::ndarray::{Array1, Array2, ArrayView2};
use scirs2_core::random::{Rng, SeedableRng, StdRng};
use scirs2_core::StandardNormal;

use crate::error::{FeatureMapError, Result};
use crate::types::{check_input, FeatureMap};

fn not_fitted(context: &str) -> FeatureMapError {
    FeatureMapError::shape_mismatch(format!("{context}: fit has not been called"), vec![], vec![])
}

fn check_columns(expected: usize, data: &ArrayView2<f64>, context: &str) -> Result<()> {
    if data.ncols() != expected {
        return Err(FeatureMapError::shape_mismatch(
            context,
            vec![expected],
            vec![data.ncols()],
        ));
    }
    Ok(())
}

/// Uniform draw from `[0, 2 pi)`.
fn random_offset(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * 2.0 * PI
}

#[derive(Debug, Clone)]
struct ProjectionState {
    /// Random projection weights, shape `(input_dim, n_components)`.
    weights: Array2<f64>,
    /// Random offsets for the cosine features, length `n_components`.
    offsets: Array1<f64>,
}

/// Offset-cosine projection `cos(X W + b) * sqrt(2 / n)` shared by the
/// Monte-Carlo samplers.
fn offset_cosine_features(data: &Array2<f64>, state: &ProjectionState) -> Array2<f64> {
    let n = state.offsets.len();
    let scale = (2.0 / n as f64).sqrt();

    let mut projection = data.dot(&state.weights);
    for mut row in projection.rows_mut() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = (*value + state.offsets[j]).cos() * scale;
        }
    }
    projection
}

/// Monte-Carlo approximation of the RBF kernel feature map.
///
/// Approximates `K(x, y) = exp(-gamma * ||x - y||^2)` by sampling random
/// frequencies from the kernel's Fourier transform, `N(0, 2 gamma)`.
#[derive(Debug, Clone)]
pub struct RbfSampler {
    gamma: f64,
    n_components: usize,
    seed: Option<u64>,
    state: Option<ProjectionState>,
}

impl RbfSampler {
    /// Create a new sampler.
    pub fn new(gamma: f64, n_components: usize) -> Result<Self> {
        if !(gamma > 0.0) || !gamma.is_finite() {
            return Err(FeatureMapError::invalid_parameter(
                "gamma",
                gamma,
                "must be a positive finite number",
            ));
        }
        if n_components < 1 {
            return Err(FeatureMapError::invalid_parameter(
                "n_components",
                n_components,
                "at least one component is required",
            ));
        }
        Ok(Self {
            gamma,
            n_components,
            seed: None,
            state: None,
        })
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl FeatureMap for RbfSampler {
    fn fit(&mut self, data: &ArrayView2<f64>) -> Result<()> {
        check_input(data, "fit")?;
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or(42));

        let std = (2.0 * self.gamma).sqrt();
        // Weights fill in row-major order, then the offsets; the draw order
        // fixes the fitted state for a given seed.
        let weights = Array2::from_shape_fn((data.ncols(), self.n_components), |_| {
            let sample: f64 = rng.sample(StandardNormal);
            sample * std
        });
        let offsets = Array1::from_shape_fn(self.n_components, |_| random_offset(&mut rng));

        self.state = Some(ProjectionState { weights, offsets });
        Ok(())
    }

    fn transform(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.state.as_ref().ok_or_else(|| not_fitted("transform"))?;
        check_input(data, "transform")?;
        check_columns(state.weights.nrows(), data, "transform")?;

        Ok(offset_cosine_features(&data.to_owned(), state))
    }

    fn output_width(&self) -> Option<usize> {
        self.state.as_ref().map(|_| self.n_components)
    }

    fn name(&self) -> &str {
        "RbfSampler"
    }
}

/// Monte-Carlo approximation of the skewed chi-squared kernel feature map.
///
/// Frequencies follow the sech spectral distribution, sampled by inverse
/// CDF; inputs are shifted by the skewedness and log-transformed before the
/// projection, so entries must be non-negative.
#[derive(Debug, Clone)]
pub struct SkewedChi2Sampler {
    skewedness: f64,
    n_components: usize,
    seed: Option<u64>,
    state: Option<ProjectionState>,
}

impl SkewedChi2Sampler {
    /// Create a new sampler.
    pub fn new(skewedness: f64, n_components: usize) -> Result<Self> {
        if !(skewedness > 0.0) || !skewedness.is_finite() {
            return Err(FeatureMapError::invalid_parameter(
                "skewedness",
                skewedness,
                "must be a positive finite number",
            ));
        }
        if n_components < 1 {
            return Err(FeatureMapError::invalid_parameter(
                "n_components",
                n_components,
                "at least one component is required",
            ));
        }
        Ok(Self {
            skewedness,
            n_components,
            seed: None,
            state: None,
        })
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl FeatureMap for SkewedChi2Sampler {
    fn fit(&mut self, data: &ArrayView2<f64>) -> Result<()> {
        check_input(data, "fit")?;
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or(42));

        // Inverse CDF of the sech distribution.
        let weights = Array2::from_shape_fn((data.ncols(), self.n_components), |_| {
            let u = rng.random::<f64>();
            (1.0 / PI) * (PI / 2.0 * u).tan().ln()
        });
        let offsets = Array1::from_shape_fn(self.n_components, |_| random_offset(&mut rng));

        self.state = Some(ProjectionState { weights, offsets });
        Ok(())
    }

    fn transform(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.state.as_ref().ok_or_else(|| not_fitted("transform"))?;
        check_input(data, "transform")?;
        check_columns(state.weights.nrows(), data, "transform")?;

        if data.iter().any(|&x| x < 0.0) {
            return Err(FeatureMapError::computation(
                "skewed chi-squared features require non-negative input entries",
            ));
        }

        let shifted = data.mapv(|x| (x + self.skewedness).ln());
        Ok(offset_cosine_features(&shifted, state))
    }

    fn output_width(&self) -> Option<usize> {
        self.state.as_ref().map(|_| self.n_components)
    }

    fn name(&self) -> &str {
        "SkewedChi2Sampler"
    }
}

/// Deterministic feature map for the additive chi-squared kernel.
///
/// Each input entry expands into `2 * sample_steps - 1` features obtained by
/// sampling the kernel's Fourier characteristic at regular intervals; no
/// randomness is involved.
#[derive(Debug, Clone)]
pub struct AdditiveChi2Sampler {
    sample_steps: usize,
    sample_interval: Option<f64>,
    fitted: Option<AdditiveState>,
}

#[derive(Debug, Clone, Copy)]
struct AdditiveState {
    input_dim: usize,
    interval: f64,
}

impl AdditiveChi2Sampler {
    /// Create a new sampler with the given number of sampling steps.
    pub fn new(sample_steps: usize) -> Result<Self> {
        if sample_steps < 1 {
            return Err(FeatureMapError::invalid_parameter(
                "sample_steps",
                sample_steps,
                "at least one sampling step is required",
            ));
        }
        Ok(Self {
            sample_steps,
            sample_interval: None,
            fitted: None,
        })
    }

    /// Override the sampling interval. Required when `sample_steps` is not
    /// in `{1, 2, 3}`.
    pub fn with_sample_interval(mut self, interval: f64) -> Self {
        self.sample_interval = Some(interval);
        self
    }
}

impl FeatureMap for AdditiveChi2Sampler {
    fn fit(&mut self, data: &ArrayView2<f64>) -> Result<()> {
        check_input(data, "fit")?;

        let interval = match self.sample_interval {
            Some(interval) => interval,
            None => match self.sample_steps {
                1 => 0.8,
                2 => 0.5,
                3 => 0.4,
                steps => {
                    return Err(FeatureMapError::invalid_parameter(
                        "sample_interval",
                        "none",
                        format!("required when sample_steps = {steps} is not in {{1, 2, 3}}"),
                    ))
                }
            },
        };

        self.fitted = Some(AdditiveState {
            input_dim: data.ncols(),
            interval,
        });
        Ok(())
    }

    fn transform(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.fitted.ok_or_else(|| not_fitted("transform"))?;
        check_input(data, "transform")?;
        if data.ncols() != state.input_dim {
            return Err(FeatureMapError::shape_mismatch(
                "transform",
                vec![state.input_dim],
                vec![data.ncols()],
            ));
        }
        if data.iter().any(|&x| x < 0.0) {
            return Err(FeatureMapError::computation(
                "additive chi-squared features require non-negative input entries",
            ));
        }

        let (rows, dim) = data.dim();
        let interval = state.interval;
        let blocks = 2 * self.sample_steps - 1;
        let mut out = Array2::zeros((rows, dim * blocks));

        for r in 0..rows {
            for c in 0..dim {
                let x = data[[r, c]];
                if x == 0.0 {
                    continue;
                }
                out[[r, c]] = (x * interval).sqrt();

                let log_step = interval * x.ln();
                let step = 2.0 * x * interval;
                for j in 1..self.sample_steps {
                    let factor = (step / (PI * j as f64 * interval).cosh()).sqrt();
                    let phase = j as f64 * log_step;
                    out[[r, (2 * j - 1) * dim + c]] = factor * phase.cos();
                    out[[r, 2 * j * dim + c]] = factor * phase.sin();
                }
            }
        }

        Ok(out)
    }

    fn output_width(&self) -> Option<usize> {
        self.fitted
            .map(|state| state.input_dim * (2 * self.sample_steps - 1))
    }

    fn name(&self) -> &str {
        "AdditiveChi2Sampler"
    }
}
