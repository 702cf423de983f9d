//! Input validation shared by every likelihood entry point

use nalgebra::DVector;

use crate::error::{LikelihoodError, Result};

/// Ensure every label is exactly -1 or +1.
///
/// # Example
/// ```rust
/// use nalgebra::DVector;
/// use gp_probit::labels::check_labels;
///
/// assert!(check_labels(&DVector::from_vec(vec![1.0, -1.0])).is_ok());
/// assert!(check_labels(&DVector::from_vec(vec![1.0, 0.0])).is_err());
/// ```
pub fn check_labels(y: &DVector<f64>) -> Result<()> {
    match y.iter().position(|&v| v != 1.0 && v != -1.0) {
        Some(index) => Err(LikelihoodError::LabelDomain {
            index,
            value: y[index],
        }),
        None => Ok(()),
    }
}

/// Ensure `found` has the `expected` length.
pub fn check_len(context: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(LikelihoodError::ShapeMismatch {
            context,
            expected,
            found,
        })
    }
}

/// Ensure every variance is non-negative (NaN is rejected as well).
pub fn check_variances(v: &DVector<f64>) -> Result<()> {
    match v.iter().position(|&s| !(s >= 0.0)) {
        Some(index) => Err(LikelihoodError::NegativeVariance {
            index,
            value: v[index],
        }),
        None => Ok(()),
    }
}
