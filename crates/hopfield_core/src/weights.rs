//! Weight Builder: outer-product association matrix.
//!
//! The matrix is the mean of `p ⊗ p` over the raw training patterns,
//! then centered on its global mean and scaled to unit global standard
//! deviation. Storage is row-major and never mutated after construction.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{HopfieldError, Result, ShapeError};

/// Symmetric N×N association matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl WeightMatrix {
    /// Wrap explicit row-major data. `data.len()` must be a non-zero square.
    ///
    /// No symmetry or normalization is enforced here; this is the entry point
    /// for hand-built networks.
    pub fn from_row_major(data: Vec<f64>) -> Result<Self> {
        let dim = integer_sqrt(data.len());
        if dim == 0 || dim * dim != data.len() {
            return Err(ShapeError::NotSquare { len: data.len() }.into());
        }
        Ok(Self { dim, data })
    }

    /// Number of neurons (N).
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.dim)
    }

    /// `out = W · x`, summing each row left to right.
    ///
    /// Panics if `x` or `out` is not `dim` long; callers validate first.
    pub fn mul_vec_into(&self, x: &[f64], out: &mut [f64]) {
        assert_eq!(x.len(), self.dim);
        assert_eq!(out.len(), self.dim);
        for (o, row) in out.iter_mut().zip(self.rows()) {
            *o = row.iter().zip(x).map(|(w, v)| w * v).sum();
        }
    }

    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        self.mul_vec_into(x, &mut out);
        out
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| (i + 1..self.dim).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// Check that `patterns` is non-empty and rectangular; returns N.
pub fn validate_patterns<P: AsRef<[f64]>>(patterns: &[P]) -> Result<usize> {
    let first = patterns.first().ok_or(ShapeError::EmptyPatterns)?;
    let dim = first.as_ref().len();
    for (index, p) in patterns.iter().enumerate() {
        let len = p.as_ref().len();
        if len == 0 {
            return Err(ShapeError::EmptyPattern { index }.into());
        }
        if len != dim {
            return Err(ShapeError::LengthMismatch {
                index,
                expected: dim,
                actual: len,
            }
            .into());
        }
    }
    Ok(dim)
}

/// Build the normalized association matrix from raw patterns.
///
/// Fails with a shape error on empty or ragged input and with
/// [`HopfieldError::DegenerateWeights`] when every entry is identical, so no
/// NaN or infinity can reach the recall loop.
pub fn build_weights<P: AsRef<[f64]>>(patterns: &[P]) -> Result<WeightMatrix> {
    let dim = validate_patterns(patterns)?;
    let mut data = vec![0.0f64; dim * dim];

    for p in patterns {
        let p = p.as_ref();
        for (i, &pi) in p.iter().enumerate() {
            let row = &mut data[i * dim..(i + 1) * dim];
            for (w, &pj) in row.iter_mut().zip(p) {
                *w += pi * pj;
            }
        }
    }

    let count = patterns.len() as f64;
    for w in data.iter_mut() {
        *w /= count;
    }

    let mean = mean(&data);
    for w in data.iter_mut() {
        *w -= mean;
    }

    let std_dev = std_dev(&data);
    if std_dev == 0.0 || !std_dev.is_finite() {
        log::warn!("weight matrix has standard deviation {}", std_dev);
        return Err(HopfieldError::DegenerateWeights { std_dev });
    }
    for w in data.iter_mut() {
        *w /= std_dev;
    }

    log::debug!(
        "built {}x{} weight matrix from {} patterns",
        dim,
        dim,
        patterns.len()
    );
    Ok(WeightMatrix { dim, data })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    libm::sqrt(var)
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = libm::sqrt(n as f64) as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pattern_outer_product_is_normalized() {
        let w = build_weights(&[[1.0, -1.0]]).unwrap();
        // Outer product [[1,-1],[-1,1]] has mean 0 and std 1 already.
        assert_eq!(w.as_slice(), &[1.0, -1.0, -1.0, 1.0]);
        assert!(w.is_symmetric());
    }

    #[test]
    fn test_normalized_entries_have_zero_mean_unit_std() {
        let w = build_weights(&[vec![0.3, 0.7, 0.1], vec![0.9, 0.2, 0.4]]).unwrap();
        assert!(mean(w.as_slice()).abs() < 1e-12);
        assert!((std_dev(w.as_slice()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_ragged_inputs_fail() {
        let empty: [Vec<f64>; 0] = [];
        assert_eq!(
            build_weights(&empty),
            Err(HopfieldError::Shape(ShapeError::EmptyPatterns))
        );
        assert_eq!(
            build_weights(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]),
            Err(HopfieldError::Shape(ShapeError::LengthMismatch {
                index: 1,
                expected: 2,
                actual: 3
            }))
        );
        assert_eq!(
            build_weights(&[Vec::<f64>::new()]),
            Err(HopfieldError::Shape(ShapeError::EmptyPattern { index: 0 }))
        );
    }

    #[test]
    fn test_uniform_patterns_are_degenerate() {
        let err = build_weights(&[[1.0, 1.0], [1.0, 1.0]]).unwrap_err();
        assert_eq!(err, HopfieldError::DegenerateWeights { std_dev: 0.0 });
        assert!(matches!(
            build_weights(&[[0.0, 0.0, 0.0]]),
            Err(HopfieldError::DegenerateWeights { .. })
        ));
    }

    #[test]
    fn test_non_finite_input_is_degenerate() {
        assert!(matches!(
            build_weights(&[[f64::NAN, 1.0]]),
            Err(HopfieldError::DegenerateWeights { .. })
        ));
    }

    #[test]
    fn test_from_row_major_requires_square() {
        assert!(WeightMatrix::from_row_major(vec![0.0; 9]).is_ok());
        assert_eq!(
            WeightMatrix::from_row_major(vec![0.0; 6]),
            Err(HopfieldError::Shape(ShapeError::NotSquare { len: 6 }))
        );
        assert!(WeightMatrix::from_row_major(Vec::new()).is_err());
    }

    #[test]
    fn test_mul_vec() {
        let w = WeightMatrix::from_row_major(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(w.mul_vec(&[1.0, 1.0]), vec![3.0, 7.0]);
        assert_eq!(w.row(1), &[3.0, 4.0]);
        assert!(!w.is_symmetric());
    }
}
