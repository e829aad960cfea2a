//! The Fastfood approximator.
//!
//! Approximates the Gaussian kernel `K(x, y) = exp(-||x - y||^2 / (2
//! sigma^2))` with an explicit feature map whose random projection is a
//! product of structured factors instead of a dense Gaussian matrix,
//! bringing the per-row cost down to O(n log d) time and O(n) memory.
//!
//! ## Reference
//!
//! Le, Q., Sarlos, T., & Smola, A. (2013). "Fastfood - Approximating Kernel
//! Expansions in Loglinear Time." ICML.
//!
//! ## Example
//!
//! ```rust
//! use fastfood_features::{Fastfood, FastfoodConfig, FeatureMap};
//! use scirs2_core::ndarray::Array2;
//!
//! let config = FastfoodConfig::new(1.0, 64).with_seed(42);
//! let mut fastfood = Fastfood::new(config).unwrap();
//!
//! let x = Array2::from_shape_fn((10, 5), |(i, j)| (i + j) as f64 * 0.1);
//! let features = fastfood.fit_transform(&x.view()).unwrap();
//! assert_eq!(features.nrows(), 10);
//! // Realized width: 64 components fit exactly into 8 blocks of 8, doubled
//! // by the cosine/sine pair.
//! assert_eq!(features.ncols(), 128);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use scirs2_core::ndarray::{s, Array1, Array2, ArrayView2};
use scirs2_core::random::{Rng, SeedableRng, StdRng};

use crate::dimensions::DimensionPlan;
use crate::error::{FeatureMapError, Result};
use crate::features::{map_full, map_reduced, FeatureMode};
use crate::structure::FastfoodBlock;
use crate::transform::project;
use crate::types::{check_input, FeatureMap};

/// Configuration for the Fastfood approximator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastfoodConfig {
    /// Gaussian kernel bandwidth `sigma`.
    pub sigma: f64,
    /// Requested number of projection components, before the full-mode
    /// doubling. The realized count may be larger; see
    /// [`Fastfood::realized_components`].
    pub n_components: usize,
    /// Output mode of the trigonometric map.
    pub mode: FeatureMode,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl FastfoodConfig {
    /// Create a new configuration with the default full output mode.
    pub fn new(sigma: f64, n_components: usize) -> Self {
        Self {
            sigma,
            n_components,
            mode: FeatureMode::Full,
            seed: None,
        }
    }

    /// Set the output mode.
    pub fn with_mode(mut self, mode: FeatureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.sigma > 0.0) || !self.sigma.is_finite() {
            return Err(FeatureMapError::invalid_parameter(
                "sigma",
                self.sigma,
                "kernel bandwidth must be a positive finite number",
            ));
        }
        if self.n_components < 1 {
            return Err(FeatureMapError::invalid_parameter(
                "n_components",
                self.n_components,
                "at least one component is required",
            ));
        }
        Ok(())
    }
}

/// Immutable state produced by `fit`.
///
/// Created once per `fit` call and never mutated afterwards; `transform` is
/// a pure function of this state and its input.
#[derive(Debug, Clone)]
struct FittedState {
    plan: DimensionPlan,
    blocks: Vec<FastfoodBlock>,
    phases: Option<Array1<f64>>,
}

/// Structured random-feature approximator for the Gaussian kernel.
///
/// The projection is data-oblivious: `fit` reads only the column count of
/// the training data, so fitting is cheap and `transform` parallelizes
/// trivially across rows.
#[derive(Debug, Clone)]
pub struct Fastfood {
    config: FastfoodConfig,
    state: Option<FittedState>,
}

impl Fastfood {
    /// Create a new, unfitted approximator.
    pub fn new(config: FastfoodConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &FastfoodConfig {
        &self.config
    }

    /// The dimensional plan computed at fit time.
    pub fn plan(&self) -> Option<&DimensionPlan> {
        self.state.as_ref().map(|s| &s.plan)
    }

    /// Realized projection width `n` (a multiple of the padded block width,
    /// never smaller than the requested component count).
    pub fn realized_components(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.plan.output_dim)
    }

    fn fitted(&self) -> Result<&FittedState> {
        self.state.as_ref().ok_or_else(|| {
            FeatureMapError::shape_mismatch(
                "transform: fit has not been called",
                vec![],
                vec![],
            )
        })
    }
}

impl FeatureMap for Fastfood {
    /// Fit to the shape of `data`.
    ///
    /// Only the column count is consumed; the values are never read. All
    /// randomness is drawn here, in a fixed documented order (per block `G`,
    /// `B`, `P`, `S`; blocks in stacking order; reduced-mode phases last),
    /// from a generator seeded by the configured seed (42 when unset).
    fn fit(&mut self, data: &ArrayView2<f64>) -> Result<()> {
        self.config.validate()?;
        check_input(data, "fit")?;

        let plan = DimensionPlan::new(data.ncols(), self.config.n_components)?;
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or(42));

        let blocks: Vec<FastfoodBlock> = (0..plan.num_blocks)
            .map(|_| FastfoodBlock::sample(plan.padded_dim, &mut rng))
            .collect();

        let phases = match self.config.mode {
            FeatureMode::Full => None,
            FeatureMode::Reduced => Some(Array1::from_shape_fn(plan.output_dim, |_| {
                rng.random::<f64>() * 2.0 * PI
            })),
        };

        self.state = Some(FittedState {
            plan,
            blocks,
            phases,
        });
        Ok(())
    }

    fn transform(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>> {
        let state = self.fitted()?;
        check_input(data, "transform")?;

        if data.ncols() != state.plan.original_dim {
            return Err(FeatureMapError::shape_mismatch(
                "transform",
                vec![state.plan.original_dim],
                vec![data.ncols()],
            ));
        }

        let mut padded = Array2::zeros((data.nrows(), state.plan.padded_dim));
        padded
            .slice_mut(s![.., ..state.plan.original_dim])
            .assign(data);

        let projection = project(&state.blocks, &padded.view(), self.config.sigma);

        match self.config.mode {
            FeatureMode::Full => Ok(map_full(&projection)),
            FeatureMode::Reduced => {
                let phases = state.phases.as_ref().ok_or_else(|| {
                    FeatureMapError::MissingPhaseVector(
                        "reduced mode requires a phase vector sampled at fit time".to_string(),
                    )
                })?;
                Ok(map_reduced(&projection, phases))
            }
        }
    }

    fn output_width(&self) -> Option<usize> {
        self.state.as_ref().map(|s| match self.config.mode {
            FeatureMode::Full => 2 * s.plan.output_dim,
            FeatureMode::Reduced => s.plan.output_dim,
        })
    }

    fn name(&self) -> &str {
        "Fastfood"
    }
}
