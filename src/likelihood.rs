//! Likelihood contract for Gaussian Process posterior approximations
//!
//! A Laplace or EP driver only ever talks to a likelihood through
//! [`Likelihood`]; it never needs to know the functional form of p(y|f).

use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;

use crate::error::{LikelihoodError, Result};
use crate::labels::check_len;

/// Quantity a derivative is taken with respect to
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum DerivativeTarget {
    /// The latent function values f
    Latent,
    /// The likelihood's own hyperparameters
    Param,
}

impl FromStr for DerivativeTarget {
    type Err = LikelihoodError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "latent" => Ok(DerivativeTarget::Latent),
            "param" => Ok(DerivativeTarget::Param),
            _ => Err(LikelihoodError::UnsupportedDerivativeTarget(s.to_string())),
        }
    }
}

impl fmt::Display for DerivativeTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DerivativeTarget::Latent => write!(f, "latent"),
            DerivativeTarget::Param => write!(f, "param"),
        }
    }
}

/// Identifies a likelihood and the size of its parameter vector
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct LikelihoodSpec {
    /// Identifier tag, e.g. `"probit"`
    pub name: String,
    /// Number of entries `pack` produces
    pub n_params: usize,
}

/// Moments of one site's tilted distribution
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct TiltedMoments {
    /// Normalising constant (zeroth moment)
    pub m0: f64,
    /// Log of `m0`, kept finite where `m0` underflows
    pub ln_m0: f64,
    /// Mean (first moment)
    pub m1: f64,
    /// Variance (second central moment)
    pub m2: f64,
}

/// Posterior predictive distribution of the labels at test points
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Expected label
    pub ey: DVector<f64>,
    /// Variance of the label
    pub vary: DVector<f64>,
    /// Predictive probability of the supplied labels
    pub py: Option<DVector<f64>>,
    /// Log of `py`
    pub ln_py: Option<DVector<f64>>,
}

/// Observation model p(y|f) of a Gaussian Process
///
/// Every vector argument is aligned index-for-index with the others; a
/// length mismatch is reported as [`LikelihoodError::ShapeMismatch`].
pub trait Likelihood: Sync + Send + Clone + fmt::Debug {
    /// Identifier and parameter count
    fn spec(&self) -> LikelihoodSpec;

    /// Current hyperparameters as a flat vector
    fn pack(&self) -> Vec<f64>;
    /// Read hyperparameters from the front of `w`, returning the updated
    /// likelihood and the unconsumed rest of `w`.
    fn unpack<'w>(&self, w: &'w [f64]) -> (Self, &'w [f64]);
    /// Log prior density of the hyperparameters
    fn ln_prior(&self) -> f64;
    /// Gradient of `ln_prior` with respect to the packed hyperparameters
    fn ln_prior_grad(&self) -> Vec<f64>;

    /// Log likelihood, Σ ln p(yᵢ|fᵢ)
    fn ln_f(&self, y: &DVector<f64>, f: &DVector<f64>) -> Result<f64>;
    /// First derivative of the log likelihood
    fn grad(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<DVector<f64>>;
    /// Diagonal of the Hessian of the log likelihood. Off-diagonal entries
    /// are zero because observations are conditionally independent given f.
    fn hessian_diag(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<DVector<f64>>;
    /// Diagonal of the third derivative tensor of the log likelihood
    fn third_diag(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<DVector<f64>>;

    /// Moments of the tilted distribution N(f | μ, σ²) p(y[index] | f)
    fn tilted_moments(
        &self,
        y: &DVector<f64>,
        index: usize,
        cavity_var: f64,
        cavity_mean: f64,
    ) -> Result<TiltedMoments>;

    /// Tilted moments for every site at once
    fn tilted_moments_all(
        &self,
        y: &DVector<f64>,
        cavity_var: &DVector<f64>,
        cavity_mean: &DVector<f64>,
    ) -> Result<Vec<TiltedMoments>> {
        check_len("cavity_var", y.len(), cavity_var.len())?;
        check_len("cavity_mean", y.len(), cavity_mean.len())?;
        (0..y.len())
            .map(|i| self.tilted_moments(y, i, cavity_var[i], cavity_mean[i]))
            .collect()
    }

    /// Predictive distribution of the labels given the latent posterior
    /// N(ef, varf) at each test point. `py` is only reported when `y` is.
    fn predict(
        &self,
        ef: &DVector<f64>,
        varf: &DVector<f64>,
        y: Option<&DVector<f64>>,
    ) -> Result<Prediction>;

    /// Inverse link, the probability of the positive label at each f
    fn invlink(&self, f: &DVector<f64>) -> DVector<f64>;
}
