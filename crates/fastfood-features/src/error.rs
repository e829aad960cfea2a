//! Error types for fastfood-features.
//!
//! All estimators in this crate fail synchronously at the offending call and
//! leave no partially-fitted state behind. The variants below cover the full
//! failure surface: bad configuration, degenerate input shapes, shape
//! disagreements between `fit` and `transform`, a missing reduced-mode phase
//! vector, and failures reported by the numeric backend.

use thiserror::Error;

/// Errors that can occur while fitting or applying a feature map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureMapError {
    /// A configuration value is outside its valid range.
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Input data has a degenerate shape (no rows or no feature columns).
    #[error("Invalid dimension in {context}: {reason}")]
    InvalidDimension { context: String, reason: String },

    /// The input shape disagrees with the shape observed at fit time, or the
    /// estimator has not been fitted at all.
    #[error("Shape mismatch in {context}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        context: String,
    },

    /// Reduced-mode transform was requested but fit produced no phase vector.
    #[error("Missing phase vector: {0}")]
    MissingPhaseVector(String),

    /// A numeric computation failed (for example a decomposition that did
    /// not converge).
    #[error("Computation error: {0}")]
    ComputationError(String),
}

impl FeatureMapError {
    /// Create an invalid-parameter error.
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        FeatureMapError::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-dimension error.
    pub fn invalid_dimension(context: impl Into<String>, reason: impl Into<String>) -> Self {
        FeatureMapError::InvalidDimension {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a shape-mismatch error.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: Vec<usize>,
        got: Vec<usize>,
    ) -> Self {
        FeatureMapError::ShapeMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    /// Create a computation error.
    pub fn computation(msg: impl Into<String>) -> Self {
        FeatureMapError::ComputationError(msg.into())
    }
}

/// Result type for feature-map operations.
pub type Result<T> = std::result::Result<T, FeatureMapError>;
