//! History of likelihood states kept alongside an MCMC chain

use crate::likelihood::{Likelihood, LikelihoodSpec};

/// Record of a likelihood's hyperparameters over the draws of a chain
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct LikelihoodRecord {
    /// Which likelihood the record belongs to
    pub spec: LikelihoodSpec,
    /// Packed hyperparameters, one entry per recorded draw
    pub params: Vec<Vec<f64>>,
}

impl LikelihoodRecord {
    /// An empty record shaped for `likelihood`
    pub fn new<L: Likelihood>(likelihood: &L) -> Self {
        Self {
            spec: likelihood.spec(),
            params: Vec::new(),
        }
    }

    /// Number of recorded draws
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Store `likelihood`'s packed hyperparameters at `index` of `record`.
///
/// Without a record a fresh, empty one is returned, which is how chain
/// recorders initialise their history. Gaps before `index` are filled with
/// empty entries.
///
/// # Example
/// ```rust
/// use gp_probit::ProbitLikelihood;
/// use gp_probit::record::record_append;
///
/// let lik = ProbitLikelihood::new();
/// let rec = record_append(None, 0, &lik);
/// assert_eq!(rec.spec.name, "probit");
/// assert!(rec.is_empty());
///
/// let rec = record_append(Some(rec), 0, &lik);
/// assert_eq!(rec.len(), 1);
/// ```
pub fn record_append<L: Likelihood>(
    record: Option<LikelihoodRecord>,
    index: usize,
    likelihood: &L,
) -> LikelihoodRecord {
    match record {
        None => LikelihoodRecord::new(likelihood),
        Some(mut rec) => {
            if rec.params.len() <= index {
                rec.params.resize(index + 1, Vec::new());
            }
            rec.params[index] = likelihood.pack();
            rec
        }
    }
}
