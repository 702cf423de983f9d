//! Error type shared by every likelihood operation

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Errors raised by likelihood evaluation
#[derive(Clone, Debug, PartialEq)]
pub enum LikelihoodError {
    /// A label was something other than -1 or +1
    LabelDomain {
        /// Position of the offending label
        index: usize,
        /// The offending value
        value: f64,
    },
    /// Derivatives were requested with respect to anything but the latent
    /// values, either by an unrecognised name or a target this likelihood
    /// has nothing to differentiate for
    UnsupportedDerivativeTarget(String),
    /// Two inputs which must be aligned index-for-index had different lengths
    ShapeMismatch {
        /// Which input was misaligned
        context: &'static str,
        /// Required length
        expected: usize,
        /// Length given
        found: usize,
    },
    /// A variance was negative or NaN
    NegativeVariance {
        /// Position of the offending variance
        index: usize,
        /// The offending value
        value: f64,
    },
    /// A site index was past the end of the label vector
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length of the label vector
        len: usize,
    },
}

impl Display for LikelihoodError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            LikelihoodError::LabelDomain { index, value } => write!(
                f,
                "Label at index {} is {}, labels must be -1 or +1",
                index, value
            ),
            LikelihoodError::UnsupportedDerivativeTarget(target) => write!(
                f,
                "Derivatives with respect to '{}' are not supported, only 'latent' is",
                target
            ),
            LikelihoodError::ShapeMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch in {}: expected length {}, found {}",
                context, expected, found
            ),
            LikelihoodError::NegativeVariance { index, value } => write!(
                f,
                "Variance at index {} is {}, variances must be >= 0",
                index, value
            ),
            LikelihoodError::IndexOutOfBounds { index, len } => write!(
                f,
                "Site index {} is out of bounds for {} labels",
                index, len
            ),
        }
    }
}

impl Error for LikelihoodError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<LikelihoodError> for io::Error {
    fn from(e: LikelihoodError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, e)
    }
}

/// Result type from likelihood evaluations
pub type Result<T> = std::result::Result<T, LikelihoodError>;
