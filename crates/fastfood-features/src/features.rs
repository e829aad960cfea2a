//! Trigonometric feature mapping.
//!
//! Converts a real-valued projection into the final randomized Fourier
//! feature vector. Both modes are deterministic functions of their inputs.

use serde::{Deserialize, Serialize};

use scirs2_core::ndarray::{Array1, Array2};

/// Output mode of the feature map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureMode {
    /// `[cos(proj), sin(proj)] / sqrt(n)`; doubles the width, needs no extra
    /// randomness.
    Full,
    /// `cos(proj + U) * sqrt(2 / n)` with a fitted phase vector `U`; keeps
    /// the width at `n`.
    Reduced,
}

impl Default for FeatureMode {
    fn default() -> Self {
        FeatureMode::Full
    }
}

/// Full-mode map: concatenated cosine and sine features scaled by
/// `1 / sqrt(n)`.
pub(crate) fn map_full(projection: &Array2<f64>) -> Array2<f64> {
    let (rows, n) = projection.dim();
    let scale = 1.0 / (n as f64).sqrt();

    let mut out = Array2::zeros((rows, 2 * n));
    for r in 0..rows {
        for j in 0..n {
            let p = projection[[r, j]];
            out[[r, j]] = p.cos() * scale;
            out[[r, n + j]] = p.sin() * scale;
        }
    }
    out
}

/// Reduced-mode map: phase-shifted cosine scaled by `sqrt(2 / n)`.
pub(crate) fn map_reduced(projection: &Array2<f64>, phases: &Array1<f64>) -> Array2<f64> {
    let (rows, n) = projection.dim();
    debug_assert_eq!(phases.len(), n);
    let scale = (2.0 / n as f64).sqrt();

    let mut out = Array2::zeros((rows, n));
    for r in 0..rows {
        for j in 0..n {
            out[[r, j]] = (projection[[r, j]] + phases[j]).cos() * scale;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_full_mode_width_and_layout() {
        let projection = Array2::from_shape_vec((1, 2), vec![0.0, PI / 2.0]).unwrap();
        let features = map_full(&projection);
        assert_eq!(features.dim(), (1, 4));

        let scale = 1.0 / (2.0_f64).sqrt();
        // cos block then sin block.
        assert!((features[[0, 0]] - scale).abs() < 1e-12);
        assert!(features[[0, 1]].abs() < 1e-12);
        assert!(features[[0, 2]].abs() < 1e-12);
        assert!((features[[0, 3]] - scale).abs() < 1e-12);
    }

    #[test]
    fn test_full_mode_feature_norm_is_one() {
        // cos^2 + sin^2 = 1 per component, so every feature row has unit
        // squared norm after the 1/sqrt(n) scaling.
        let projection =
            Array2::from_shape_vec((2, 3), vec![0.3, -1.2, 2.5, 0.0, 4.4, -0.7]).unwrap();
        let features = map_full(&projection);
        for r in 0..2 {
            let norm_sq: f64 = features.row(r).iter().map(|f| f * f).sum();
            assert!((norm_sq - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reduced_mode_width_and_values() {
        let projection = Array2::from_shape_vec((1, 2), vec![0.5, 1.5]).unwrap();
        let phases = Array1::from_vec(vec![0.25, -0.5]);
        let features = map_reduced(&projection, &phases);
        assert_eq!(features.dim(), (1, 2));

        let scale = (2.0 / 2.0_f64).sqrt();
        assert!((features[[0, 0]] - 0.75_f64.cos() * scale).abs() < 1e-12);
        assert!((features[[0, 1]] - 1.0_f64.cos() * scale).abs() < 1e-12);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let projection = Array2::from_shape_vec((1, 4), vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(map_full(&projection), map_full(&projection));

        let phases = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(
            map_reduced(&projection, &phases),
            map_reduced(&projection, &phases)
        );
    }
}
