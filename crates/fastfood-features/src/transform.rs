// Allow needless_range_loop for the staged vector operations, which are
// clearer with indexed loops.
#![allow(clippy::needless_range_loop)]

//! The structured transform engine.
//!
//! For one block the projection operator is
//!
//! `V = (1/(sigma * sqrt(d))) * diag(S) * H * diag(G) * P * H * diag(B)`
//!
//! where `H` is the order-`d` unnormalized Walsh-Hadamard transform and `P`
//! permutes coordinates as `y[i] = x[P[i]]`. The fast path below applies the
//! six stages directly in O(d log d) time and O(d) scratch per row, instead
//! of materializing the `d x d` operator. For `k` blocks the per-row output
//! is the concatenation of the block outputs in stacking order.
//!
//! A dense reference operator is kept behind a test-only interface; the fast
//! path must agree with it to floating tolerance for every block, seed and
//! power-of-two width.

use scirs2_core::ndarray::{Array2, ArrayView2, Axis};

use crate::hadamard::walsh_hadamard;
use crate::structure::FastfoodBlock;

/// Apply the structured projection of every block to every row of `padded`.
///
/// `padded` must already be zero-padded to the blocks' working dimension.
/// Returns a matrix of shape `(rows, k * d)`.
pub(crate) fn project(blocks: &[FastfoodBlock], padded: &ArrayView2<f64>, sigma: f64) -> Array2<f64> {
    let dim = blocks[0].dim();
    let rows = padded.nrows();
    let inv_scale = 1.0 / (sigma * (dim as f64).sqrt());

    let mut out = Array2::zeros((rows, dim * blocks.len()));
    let mut scratch = vec![0.0; dim];
    let mut permuted = vec![0.0; dim];

    for (r, row) in padded.axis_iter(Axis(0)).enumerate() {
        for (b, block) in blocks.iter().enumerate() {
            // Stage 1: sign flip.
            for i in 0..dim {
                scratch[i] = row[i] * block.signs[i];
            }
            // Stage 2: fast orthogonal transform.
            walsh_hadamard(&mut scratch);
            // Stage 3: permute, y[i] = x[P[i]].
            for i in 0..dim {
                permuted[i] = scratch[block.permutation[i]];
            }
            // Stage 4: Gaussian diagonal.
            for i in 0..dim {
                permuted[i] *= block.gaussian[i];
            }
            // Stage 5: fast orthogonal transform.
            walsh_hadamard(&mut permuted);
            // Stage 6: scaling diagonal and global factor.
            let offset = b * dim;
            for i in 0..dim {
                out[[r, offset + i]] = permuted[i] * block.scaling[i] * inv_scale;
            }
        }
    }

    out
}

/// Dense realization of one block's operator, for verification only.
#[cfg(test)]
pub(crate) fn dense_operator(block: &FastfoodBlock, sigma: f64) -> Array2<f64> {
    use crate::hadamard::hadamard_matrix;

    let dim = block.dim();
    let h = hadamard_matrix(dim);

    // H * diag(B): scale column j by B[j].
    let mut hb = h.clone();
    for i in 0..dim {
        for j in 0..dim {
            hb[[i, j]] *= block.signs[j];
        }
    }

    // P * (H diag(B)): row i is row P[i] of the operand.
    let mut phb = Array2::zeros((dim, dim));
    for i in 0..dim {
        for j in 0..dim {
            phb[[i, j]] = hb[[block.permutation[i], j]];
        }
    }

    // diag(G) * ...: scale row i by G[i].
    for i in 0..dim {
        for j in 0..dim {
            phb[[i, j]] *= block.gaussian[i];
        }
    }

    // H * ...
    let mut v = h.dot(&phb);

    // diag(S) and the global 1/(sigma sqrt(d)) factor.
    let inv_scale = 1.0 / (sigma * (dim as f64).sqrt());
    for i in 0..dim {
        for j in 0..dim {
            v[[i, j]] *= block.scaling[i] * inv_scale;
        }
    }

    v
}
