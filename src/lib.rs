//! Probit likelihood for Gaussian Process classification
//!
//! Models labels y ∈ {-1, +1} as p(y|f) = Φ(y f) of a latent GP value f and
//! supplies what Laplace and EP posterior approximations consume: the log
//! likelihood, its first three latent derivatives, EP tilted moments and the
//! predictive distribution. All operations are pure; one
//! [`ProbitLikelihood`] may be shared across threads.

#![warn(missing_docs)]

#[cfg(feature = "serde_support")]
#[macro_use]
extern crate serde_derive;

pub mod error;
pub mod labels;
pub mod likelihood;
pub mod normal;
pub mod probit;
pub mod record;

pub use crate::error::{LikelihoodError, Result};
pub use crate::likelihood::{
    DerivativeTarget, Likelihood, LikelihoodSpec, Prediction, TiltedMoments,
};
pub use crate::probit::ProbitLikelihood;
pub use crate::record::{record_append, LikelihoodRecord};
