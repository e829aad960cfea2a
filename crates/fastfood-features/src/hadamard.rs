//! Fast Walsh-Hadamard transform.
//!
//! Applies the order-`d` unnormalized Hadamard transform in O(d log d) via
//! the in-place butterfly recursion. The transform is its own inverse up to
//! a factor of `d`.

/// In-place fast Walsh-Hadamard transform.
///
/// The length of `v` must be a power of two.
pub(crate) fn walsh_hadamard(v: &mut [f64]) {
    let n = v.len();
    debug_assert!(n.is_power_of_two());

    let mut h = 1;
    while h < n {
        for i in (0..n).step_by(h * 2) {
            for j in i..(i + h) {
                let x = v[j];
                let y = v[j + h];
                v[j] = x + y;
                v[j + h] = x - y;
            }
        }
        h *= 2;
    }
}

/// Dense order-`n` Hadamard matrix in natural ordering, `H[i][j] =
/// (-1)^popcount(i & j)`. Used only to build the dense reference operator.
#[cfg(test)]
pub(crate) fn hadamard_matrix(n: usize) -> scirs2_core::ndarray::Array2<f64> {
    debug_assert!(n.is_power_of_two());
    scirs2_core::ndarray::Array2::from_shape_fn((n, n), |(i, j)| {
        if (i & j).count_ones() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray::Array1;

    #[test]
    fn test_walsh_hadamard_order_two() {
        let mut v = vec![1.0, 2.0];
        walsh_hadamard(&mut v);
        assert_eq!(v, vec![3.0, -1.0]);
    }

    #[test]
    fn test_walsh_hadamard_impulse_spreads_evenly() {
        let mut v = vec![0.0; 8];
        v[0] = 1.0;
        walsh_hadamard(&mut v);
        assert!(v.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_walsh_hadamard_self_inverse_up_to_scale() {
        let original: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).sin()).collect();
        let mut v = original.clone();
        walsh_hadamard(&mut v);
        walsh_hadamard(&mut v);
        for (a, b) in v.iter().zip(original.iter()) {
            assert!((a / 16.0 - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_butterfly_matches_dense_matrix() {
        for d in [2usize, 4, 8, 16, 32] {
            let x: Vec<f64> = (0..d).map(|i| ((i * 13 % 7) as f64) - 3.0).collect();
            let mut fast = x.clone();
            walsh_hadamard(&mut fast);

            let h = hadamard_matrix(d);
            let dense = h.dot(&Array1::from_vec(x));
            for i in 0..d {
                assert!((fast[i] - dense[i]).abs() < 1e-12);
            }
        }
    }
}
