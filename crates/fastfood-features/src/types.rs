//! Core types for approximate kernel feature maps.

use scirs2_core::ndarray::{Array2, ArrayView2};

use crate::error::{FeatureMapError, Result};

/// Trait for estimators that map data into an explicit feature space.
///
/// Every estimator in this crate follows the same two-operation contract:
/// `fit` learns fitted state from training data (labels are never consumed)
/// and `transform` maps data into the feature space using that state.
/// `transform` is a pure function of the fitted state and its input, so a
/// fitted estimator may be shared across threads.
pub trait FeatureMap: Send + Sync {
    /// Fit the estimator to training data of shape `(n_samples, n_features)`.
    ///
    /// Refitting replaces the fitted state wholesale; it is not an
    /// incremental update.
    fn fit(&mut self, data: &ArrayView2<f64>) -> Result<()>;

    /// Map data into the feature space.
    ///
    /// # Returns
    /// A matrix of shape `(n_samples, output_width)`.
    fn transform(&self, data: &ArrayView2<f64>) -> Result<Array2<f64>>;

    /// Fit to `data`, then transform it.
    fn fit_transform(&mut self, data: &ArrayView2<f64>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Width of the produced feature vectors, once fitted.
    ///
    /// May exceed what was requested (padding, block stacking); callers must
    /// read this back rather than assume the requested width.
    fn output_width(&self) -> Option<usize>;

    /// Get estimator name for identification.
    fn name(&self) -> &str;
}

/// Reject degenerate input shapes (no rows or no feature columns).
pub(crate) fn check_input(data: &ArrayView2<f64>, context: &str) -> Result<()> {
    if data.nrows() == 0 {
        return Err(FeatureMapError::invalid_dimension(
            context,
            "input has zero rows",
        ));
    }
    if data.ncols() == 0 {
        return Err(FeatureMapError::invalid_dimension(
            context,
            "input has zero feature columns",
        ));
    }
    Ok(())
}
