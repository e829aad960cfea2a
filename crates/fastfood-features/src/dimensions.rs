//! Dimensionality planning for the structured transform.
//!
//! The fast orthogonal transform only operates on power-of-two widths, so
//! input rows are zero-padded up to the next power of two and the requested
//! output width is rounded up to a whole number of stacked blocks. The plan
//! computed here is pure arithmetic on the input shape; it never touches the
//! data values.

use serde::{Deserialize, Serialize};

use crate::error::{FeatureMapError, Result};

/// Fitted dimensional bookkeeping for a structured feature map.
///
/// Invariants: `padded_dim` is a power of two and the smallest one that is
/// `>= original_dim`; `output_dim = num_blocks * padded_dim` and is never
/// smaller than the requested component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionPlan {
    /// Feature count of the training data.
    pub original_dim: usize,
    /// Per-block working dimension `d` (power of two).
    pub padded_dim: usize,
    /// Number of independent structured blocks `k`.
    pub num_blocks: usize,
    /// Realized projection width `n = k * d`, before the trigonometric map.
    pub output_dim: usize,
}

impl DimensionPlan {
    /// Plan the working dimensions for `original_dim` input features and
    /// `requested_components` output components.
    ///
    /// The realized `output_dim` may exceed `requested_components`; callers
    /// must read it back rather than assume the request was met exactly.
    pub fn new(original_dim: usize, requested_components: usize) -> Result<Self> {
        if original_dim < 1 {
            return Err(FeatureMapError::invalid_dimension(
                "dimension planning",
                "input must have at least one feature column",
            ));
        }
        if requested_components < 1 {
            return Err(FeatureMapError::invalid_dimension(
                "dimension planning",
                "at least one output component is required",
            ));
        }

        let padded_dim = original_dim.next_power_of_two();
        let num_blocks = (requested_components + padded_dim - 1) / padded_dim;
        let output_dim = num_blocks * padded_dim;

        Ok(Self {
            original_dim,
            padded_dim,
            num_blocks,
            output_dim,
        })
    }

    /// Number of zeros appended to each input row.
    pub fn pad_width(&self) -> usize {
        self.padded_dim - self.original_dim
    }
}
