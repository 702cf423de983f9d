//! Probit likelihood, p(y|f) = Φ(y f) for labels y ∈ {-1, +1}
//!
//! Every per-site formula goes through [`normal::inv_mills_ratio`],
//! [`normal::inv_mills_excess`] and [`normal::inv_mills_curvature`], so sites
//! deep in the saturated tail (`y f ≪ 0`) give finite, accurate values rather
//! than `0/0` or cancellation noise.

use itertools::izip;
use log::{debug, log_enabled, trace, Level};
use nalgebra::DVector;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{LikelihoodError, Result};
use crate::labels::{check_labels, check_len, check_variances};
use crate::likelihood::*;
use crate::normal;

/// Identifier tag of the probit likelihood
pub const NAME: &str = "probit";

/// Vector length at which evaluation moves onto the rayon pool by default
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Probit likelihood for binary classification
///
/// The model has no hyperparameters; the only setting is the vector length
/// at which elementwise evaluation is spread over threads, and it never
/// changes a result.
///
/// # Example
/// ```rust
/// use nalgebra::DVector;
/// use gp_probit::{DerivativeTarget, Likelihood, ProbitLikelihood};
///
/// let lik = ProbitLikelihood::new();
/// let y = DVector::from_vec(vec![1.0, -1.0]);
/// let f = DVector::from_vec(vec![0.0, 0.0]);
///
/// let energy = lik.ln_f(&y, &f).unwrap();
/// assert!((energy - 2.0 * 0.5_f64.ln()).abs() < 1E-12);
///
/// let g = lik.grad(&y, &f, DerivativeTarget::Latent).unwrap();
/// assert!((g[0] - 0.797_884_560_802_865_4).abs() < 1E-12);
/// assert!((g[1] + 0.797_884_560_802_865_4).abs() < 1E-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbitLikelihood {
    parallel_threshold: usize,
}

impl Default for ProbitLikelihood {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ProbitLikelihood {
    /// Create a probit likelihood with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate vectors of at least `n` entries in parallel.
    /// `0` always parallelises, `usize::MAX` never does.
    pub fn parallel_threshold(self, n: usize) -> Self {
        Self {
            parallel_threshold: n,
        }
    }

    /// Current parallel threshold
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Draw labels with P(yᵢ = +1) = Φ(fᵢ).
    pub fn sample_labels<R: Rng>(&self, f: &DVector<f64>, rng: &mut R) -> DVector<f64> {
        f.map(|fi| {
            if rng.gen::<f64>() < normal::cdf(fi) {
                1.0
            } else {
                -1.0
            }
        })
    }

    fn parallel(&self, n: usize) -> bool {
        let par = n >= self.parallel_threshold;
        if par {
            debug!("Evaluating {} sites on the rayon pool", n);
        }
        par
    }

    /// Apply `op` to aligned pairs `(a[i], b[i])`, keeping index order.
    fn map_pairs<F>(&self, a: &DVector<f64>, b: &DVector<f64>, op: F) -> DVector<f64>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        if self.parallel(a.len()) {
            let values: Vec<f64> = a
                .as_slice()
                .par_iter()
                .zip(b.as_slice().par_iter())
                .map(|(&x, &z)| op(x, z))
                .collect();
            DVector::from_vec(values)
        } else {
            DVector::from_iterator(a.len(), a.iter().zip(b.iter()).map(|(&x, &z)| op(x, z)))
        }
    }

    /// Validate a derivative request and its inputs.
    fn check_derivative(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<()> {
        if target != DerivativeTarget::Latent {
            return Err(LikelihoodError::UnsupportedDerivativeTarget(
                target.to_string(),
            ));
        }
        check_observations(y, f)
    }
}

fn check_observations(y: &DVector<f64>, f: &DVector<f64>) -> Result<()> {
    trace!("Checking {} observations", y.len());
    check_len("f", y.len(), f.len())?;
    check_labels(y)?;
    if log_enabled!(Level::Debug) {
        let saturated = y
            .iter()
            .zip(f.iter())
            .filter(|&(&yi, &fi)| yi * fi < normal::TAIL_CUTOFF)
            .count();
        if saturated > 0 {
            debug!(
                "{} of {} sites are in the saturated tail (y f < {})",
                saturated,
                y.len(),
                normal::TAIL_CUTOFF
            );
        }
    }
    Ok(())
}

/// ln Φ(y f)
#[inline]
fn ln_site(y: f64, f: f64) -> f64 {
    normal::ln_cdf(y * f)
}

/// y φ(f) / Φ(y f)
#[inline]
fn grad_site(y: f64, f: f64) -> f64 {
    y * normal::inv_mills_ratio(y * f)
}

/// -(φ/Φ)² - z φ/Φ with z = y f, factored as -r (r + z)
#[inline]
fn hessian_site(y: f64, f: f64) -> f64 {
    let z = y * f;
    -normal::inv_mills_ratio(z) * normal::inv_mills_excess(z)
}

/// 2 y r³ + 3 f r² - r (y - y f²) with r = φ(f) / Φ(y f), factored as
/// y r ((r + z)(2 r + z) - 1) with z = y f.
#[inline]
fn third_site(y: f64, f: f64) -> f64 {
    let z = y * f;
    y * normal::inv_mills_ratio(z) * normal::inv_mills_curvature(z)
}

/// Closed-form moments of N(f | mean, var) Φ(y f)
fn tilted_site(y: f64, var: f64, mean: f64) -> TiltedMoments {
    let s2 = 1.0 + var;
    let s = s2.sqrt();
    let z = y * mean / s;
    let r = normal::inv_mills_ratio(z);
    let e = normal::inv_mills_excess(z);
    TiltedMoments {
        m0: normal::cdf(z),
        ln_m0: normal::ln_cdf(z),
        m1: mean + y * (var / s) * r,
        // var / s2 < 1 keeps this finite for any finite cavity variance
        m2: var - var * (var / s2) * (r * e),
    }
}

impl Likelihood for ProbitLikelihood {
    fn spec(&self) -> LikelihoodSpec {
        LikelihoodSpec {
            name: NAME.to_string(),
            n_params: 0,
        }
    }

    fn pack(&self) -> Vec<f64> {
        Vec::new()
    }

    fn unpack<'w>(&self, w: &'w [f64]) -> (Self, &'w [f64]) {
        (*self, w)
    }

    fn ln_prior(&self) -> f64 {
        0.0
    }

    fn ln_prior_grad(&self) -> Vec<f64> {
        Vec::new()
    }

    fn ln_f(&self, y: &DVector<f64>, f: &DVector<f64>) -> Result<f64> {
        check_observations(y, f)?;
        // Summed in index order so the result does not depend on threading.
        Ok(self.map_pairs(y, f, ln_site).iter().sum())
    }

    fn grad(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<DVector<f64>> {
        self.check_derivative(y, f, target)?;
        Ok(self.map_pairs(y, f, grad_site))
    }

    fn hessian_diag(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<DVector<f64>> {
        self.check_derivative(y, f, target)?;
        Ok(self.map_pairs(y, f, hessian_site))
    }

    fn third_diag(
        &self,
        y: &DVector<f64>,
        f: &DVector<f64>,
        target: DerivativeTarget,
    ) -> Result<DVector<f64>> {
        self.check_derivative(y, f, target)?;
        Ok(self.map_pairs(y, f, third_site))
    }

    fn tilted_moments(
        &self,
        y: &DVector<f64>,
        index: usize,
        cavity_var: f64,
        cavity_mean: f64,
    ) -> Result<TiltedMoments> {
        if index >= y.len() {
            return Err(LikelihoodError::IndexOutOfBounds {
                index,
                len: y.len(),
            });
        }
        check_labels(y)?;
        if !(cavity_var >= 0.0) {
            return Err(LikelihoodError::NegativeVariance {
                index,
                value: cavity_var,
            });
        }
        Ok(tilted_site(y[index], cavity_var, cavity_mean))
    }

    fn tilted_moments_all(
        &self,
        y: &DVector<f64>,
        cavity_var: &DVector<f64>,
        cavity_mean: &DVector<f64>,
    ) -> Result<Vec<TiltedMoments>> {
        check_len("cavity_var", y.len(), cavity_var.len())?;
        check_len("cavity_mean", y.len(), cavity_mean.len())?;
        check_labels(y)?;
        check_variances(cavity_var)?;

        let moments: Vec<TiltedMoments> = if self.parallel(y.len()) {
            y.as_slice()
                .par_iter()
                .zip(cavity_var.as_slice().par_iter())
                .zip(cavity_mean.as_slice().par_iter())
                .map(|((&yi, &v), &m)| tilted_site(yi, v, m))
                .collect()
        } else {
            izip!(y.iter(), cavity_var.iter(), cavity_mean.iter())
                .map(|(&yi, &v, &m)| tilted_site(yi, v, m))
                .collect()
        };
        Ok(moments)
    }

    fn predict(
        &self,
        ef: &DVector<f64>,
        varf: &DVector<f64>,
        y: Option<&DVector<f64>>,
    ) -> Result<Prediction> {
        check_len("varf", ef.len(), varf.len())?;
        check_variances(varf)?;
        if let Some(y) = y {
            check_len("y", ef.len(), y.len())?;
            check_labels(y)?;
        }

        let a = self.map_pairs(ef, varf, |m, v| m / (1.0 + v).sqrt());
        let ey = a.map(|ai| 2.0 * normal::cdf(ai) - 1.0);
        // 1 - ey², without the cancellation as |ey| -> 1
        let vary = a.map(|ai| 4.0 * normal::cdf(ai) * normal::cdf(-ai));

        let (py, ln_py) = match y {
            Some(y) => {
                let py = self.map_pairs(&a, y, |ai, yi| normal::cdf(ai * yi));
                let ln_py = self.map_pairs(&a, y, |ai, yi| normal::ln_cdf(ai * yi));
                (Some(py), Some(ln_py))
            }
            None => (None, None),
        };

        Ok(Prediction {
            ey,
            vary,
            py,
            ln_py,
        })
    }

    fn invlink(&self, f: &DVector<f64>) -> DVector<f64> {
        f.map(normal::cdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert::close;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const R0: f64 = 0.797_884_560_802_865_4;

    fn vec(xs: &[f64]) -> DVector<f64> {
        DVector::from_column_slice(xs)
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn energy_at_origin() {
        let lik = ProbitLikelihood::new();
        let e = lik.ln_f(&vec(&[1.0, -1.0]), &vec(&[0.0, 0.0])).unwrap();
        close(e, -1.386_294_361_119_890_6, 1E-14);
    }

    #[test]
    fn derivatives_at_origin() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0]);
        let f = vec(&[0.0, 0.0]);

        let g = lik.grad(&y, &f, DerivativeTarget::Latent).unwrap();
        close(g[0], R0, 1E-14);
        close(g[1], -R0, 1E-14);

        let h = lik.hessian_diag(&y, &f, DerivativeTarget::Latent).unwrap();
        close(h[0], -0.636_619_772_367_581_4, 1E-14);
        close(h[1], -0.636_619_772_367_581_4, 1E-14);

        let t = lik.third_diag(&y, &f, DerivativeTarget::Latent).unwrap();
        close(t[0], 0.218_013_614_144_990_3, 1E-14);
        close(t[1], -0.218_013_614_144_990_3, 1E-14);
    }

    #[test]
    fn hessian_matches_unfactored_formula() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0, 1.0, -1.0]);
        let f = vec(&[-2.5, 0.3, 1.7, 3.9]);
        let h = lik.hessian_diag(&y, &f, DerivativeTarget::Latent).unwrap();
        let t = lik.third_diag(&y, &f, DerivativeTarget::Latent).unwrap();
        for i in 0..4 {
            let z = y[i] * f[i];
            let r = normal::pdf(f[i]) / normal::cdf(z);
            close(h[i], -r * r - z * r, 1E-12);
            let expected = 2.0 * y[i] * r.powi(3) + 3.0 * f[i] * r * r
                - r * (y[i] - y[i] * f[i] * f[i]);
            close(t[i], expected, 1E-11);
        }
    }

    #[test]
    fn derivatives_finite_in_saturated_tail() {
        init_logger();
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0, 1.0]);
        let f = vec(&[-40.0, 60.0, -1E4]);

        let e = lik.ln_f(&y, &f).unwrap();
        assert!(e.is_finite());

        let g = lik.grad(&y, &f, DerivativeTarget::Latent).unwrap();
        let h = lik.hessian_diag(&y, &f, DerivativeTarget::Latent).unwrap();
        let t = lik.third_diag(&y, &f, DerivativeTarget::Latent).unwrap();
        for i in 0..3 {
            assert!(g[i].is_finite() && h[i].is_finite() && t[i].is_finite());
            // Curvature of ln Φ lies in (-1, 0)
            assert!(h[i] < 0.0 && h[i] > -1.0);
        }
        // Gradient points back towards the observed label
        assert!(g[0] > 40.0);
        assert!(g[1] < -60.0);
    }

    #[test]
    fn gradient_symmetric_under_label_and_latent_flip() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0, 1.0]);
        let f = vec(&[0.4, -1.3, 2.2]);
        let g = lik.grad(&y, &f, DerivativeTarget::Latent).unwrap();
        let g_flip = lik.grad(&(-&y), &(-&f), DerivativeTarget::Latent).unwrap();
        // d/df ln Φ(y f) is odd in (y, f) jointly: flipping both negates it
        assert_eq!(g, -g_flip);
        let e = lik.ln_f(&y, &f).unwrap();
        assert_eq!(e, lik.ln_f(&(-&y), &(-&f)).unwrap());
    }

    #[test]
    fn rejects_bad_labels_everywhere() {
        let lik = ProbitLikelihood::new();
        let f = vec(&[0.0, 0.0]);
        for &bad in &[0.0, 2.0, 0.5] {
            let y = vec(&[1.0, bad]);
            let expected = LikelihoodError::LabelDomain {
                index: 1,
                value: bad,
            };
            assert_eq!(lik.ln_f(&y, &f), Err(expected.clone()));
            assert_eq!(
                lik.grad(&y, &f, DerivativeTarget::Latent),
                Err(expected.clone())
            );
            assert_eq!(
                lik.hessian_diag(&y, &f, DerivativeTarget::Latent),
                Err(expected.clone())
            );
            assert_eq!(
                lik.third_diag(&y, &f, DerivativeTarget::Latent),
                Err(expected.clone())
            );
            assert_eq!(lik.tilted_moments(&y, 0, 1.0, 0.0), Err(expected.clone()));
            assert_eq!(
                lik.predict(&f, &vec(&[1.0, 1.0]), Some(&y)),
                Err(expected.clone())
            );
        }
    }

    #[test]
    fn rejects_param_target() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0]);
        let f = vec(&[0.0]);
        let err = Err(LikelihoodError::UnsupportedDerivativeTarget(
            "param".to_string(),
        ));
        assert_eq!(lik.grad(&y, &f, DerivativeTarget::Param), err);
        assert_eq!(lik.hessian_diag(&y, &f, DerivativeTarget::Param), err);
        assert_eq!(lik.third_diag(&y, &f, DerivativeTarget::Param), err);
    }

    #[test]
    fn rejects_misaligned_inputs() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0]);
        let f = vec(&[0.0]);
        assert_eq!(
            lik.ln_f(&y, &f),
            Err(LikelihoodError::ShapeMismatch {
                context: "f",
                expected: 2,
                found: 1
            })
        );
        assert!(lik
            .tilted_moments_all(&y, &vec(&[1.0]), &vec(&[0.0, 0.0]))
            .is_err());
        assert!(lik.predict(&vec(&[0.0]), &vec(&[1.0, 1.0]), None).is_err());
    }

    #[test]
    fn tilted_moments_standard_cavity() {
        let lik = ProbitLikelihood::new();
        let m = lik.tilted_moments(&vec(&[1.0]), 0, 1.0, 0.0).unwrap();
        close(m.m0, 0.5, 1E-15);
        close(m.ln_m0, 0.5_f64.ln(), 1E-15);
        close(m.m1, 0.564_189_583_547_756_3, 1E-14);
        close(m.m2, 0.681_690_113_816_209_3, 1E-14);
        assert!(m.m1 > 0.0);
        assert!(m.m2 <= 1.0);
    }

    #[test]
    fn tilted_moments_zero_cavity_variance() {
        let lik = ProbitLikelihood::new();
        let m = lik.tilted_moments(&vec(&[-1.0, 1.0]), 1, 0.0, 1.0).unwrap();
        close(m.m0, 0.841_344_746_068_542_9, 1E-15);
        assert_eq!(m.m1, 1.0);
        assert_eq!(m.m2, 0.0);
    }

    #[test]
    fn tilted_moments_validates_site() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0]);
        assert_eq!(
            lik.tilted_moments(&y, 2, 1.0, 0.0),
            Err(LikelihoodError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(
            lik.tilted_moments(&y, 1, -0.5, 0.0),
            Err(LikelihoodError::NegativeVariance {
                index: 1,
                value: -0.5
            })
        );
    }

    #[test]
    fn tilted_moments_saturated_site_is_finite() {
        let lik = ProbitLikelihood::new();
        let m = lik.tilted_moments(&vec(&[-1.0]), 0, 0.5, 80.0).unwrap();
        assert_eq!(m.m0, 0.0);
        assert!(m.ln_m0.is_finite() && m.ln_m0 < -1000.0);
        assert!(m.m1.is_finite() && m.m1 < 80.0);
        assert!(m.m2 > 0.0 && m.m2 < 0.5);
    }

    #[test]
    fn tilted_moments_huge_cavity_variance() {
        let lik = ProbitLikelihood::new();
        let var = 1E300;
        let m = lik.tilted_moments(&vec(&[1.0]), 0, var, -1E10).unwrap();
        assert!(m.m1.is_finite() && m.m2.is_finite());
        assert!(m.m2 >= 0.0 && m.m2 <= var);
        // z ≈ 0, so m2 ≈ var (1 - 2/π) and m1 ≈ mean + √var φ(0)/Φ(0)
        close(m.m2 / var, 1.0 - R0 * R0, 1E-12);
        close(m.m1 / 1E150, R0, 1E-12);
        close(m.m0, 0.5, 1E-12);
    }

    #[test]
    fn third_derivative_accurate_in_saturated_tail() {
        let lik = ProbitLikelihood::new();
        let f = vec(&[-40.0, -1E3, -1E5, -1E7]);
        let t = lik
            .third_diag(&DVector::from_element(4, 1.0), &f, DerivativeTarget::Latent)
            .unwrap();
        // Reference values from 80-digit arithmetic
        let expected = [
            3.101_744_039_648_625e-5,
            1.999_976_000_299_996e-9,
            1.999_999_997_6e-15,
            1.999_999_999_999_76e-21,
        ];
        for i in 0..4 {
            assert!(t[i] > 0.0);
            close(t[i] / expected[i], 1.0, 1E-12);
        }
        // Odd in the label: flipping y and f negates it
        let flipped = lik
            .third_diag(&DVector::from_element(4, -1.0), &(-&f), DerivativeTarget::Latent)
            .unwrap();
        assert_eq!(flipped, -t);
    }

    #[test]
    fn tilted_moments_all_matches_single_site() {
        let y = vec(&[1.0, -1.0, 1.0, -1.0]);
        let var = vec(&[0.5, 2.0, 0.0, 10.0]);
        let mean = vec(&[0.1, -0.7, 3.0, 1.2]);
        let sequential = ProbitLikelihood::new().parallel_threshold(usize::MAX);
        let parallel = ProbitLikelihood::new().parallel_threshold(0);

        let all = sequential.tilted_moments_all(&y, &var, &mean).unwrap();
        assert_eq!(all, parallel.tilted_moments_all(&y, &var, &mean).unwrap());
        for i in 0..4 {
            assert_eq!(
                all[i],
                sequential.tilted_moments(&y, i, var[i], mean[i]).unwrap()
            );
        }
    }

    #[test]
    fn tilted_moments_all_rejects_negative_variance() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, 1.0]);
        assert_eq!(
            lik.tilted_moments_all(&y, &vec(&[1.0, -2.0]), &vec(&[0.0, 0.0])),
            Err(LikelihoodError::NegativeVariance {
                index: 1,
                value: -2.0
            })
        );
    }

    #[test]
    fn predictive_values() {
        let lik = ProbitLikelihood::new();
        let p = lik
            .predict(&vec(&[0.5, 0.0]), &vec(&[0.25, 3.0]), Some(&vec(&[-1.0, 1.0])))
            .unwrap();
        close(p.ey[0], 0.345_279_153_981_422_84, 1E-14);
        close(p.vary[0], 0.880_782_305_825_872_8, 1E-14);
        close(p.ey[1], 0.0, 1E-16);
        close(p.vary[1], 1.0, 1E-16);

        let py = p.py.unwrap();
        close(py[0], 0.327_360_423_009_288_5, 1E-14);
        close(py[1], 0.5, 1E-15);
        let ln_py = p.ln_py.unwrap();
        close(ln_py[0], py[0].ln(), 1E-14);
    }

    #[test]
    fn predictive_without_labels() {
        let lik = ProbitLikelihood::new();
        let p = lik.predict(&vec(&[1.0]), &vec(&[0.0]), None).unwrap();
        assert!(p.py.is_none());
        assert!(p.ln_py.is_none());
        close(p.ey[0], 2.0 * 0.841_344_746_068_542_9 - 1.0, 1E-15);
    }

    #[test]
    fn predictive_rejects_negative_variance() {
        let lik = ProbitLikelihood::new();
        assert_eq!(
            lik.predict(&vec(&[0.0]), &vec(&[-1.0]), None),
            Err(LikelihoodError::NegativeVariance {
                index: 0,
                value: -1.0
            })
        );
    }

    #[test]
    fn parallel_and_sequential_bit_identical() {
        init_logger();
        let mut rng = StdRng::seed_from_u64(0x7072_6f62);
        let n = 257;
        let f = DVector::from_fn(n, |_, _| 6.0 * (rng.gen::<f64>() - 0.5));
        let y = ProbitLikelihood::new().sample_labels(&f, &mut rng);

        let seq = ProbitLikelihood::new().parallel_threshold(usize::MAX);
        let par = ProbitLikelihood::new().parallel_threshold(0);
        let t = DerivativeTarget::Latent;

        assert_eq!(seq.ln_f(&y, &f), par.ln_f(&y, &f));
        assert_eq!(seq.grad(&y, &f, t), par.grad(&y, &f, t));
        assert_eq!(seq.hessian_diag(&y, &f, t), par.hessian_diag(&y, &f, t));
        assert_eq!(seq.third_diag(&y, &f, t), par.third_diag(&y, &f, t));
        let varf = f.map(|x| x * x);
        assert_eq!(
            seq.predict(&f, &varf, Some(&y)),
            par.predict(&f, &varf, Some(&y))
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let lik = ProbitLikelihood::new();
        let y = vec(&[1.0, -1.0, -1.0]);
        let f = vec(&[0.2, 1.9, -7.5]);
        let t = DerivativeTarget::Latent;
        assert_eq!(lik.ln_f(&y, &f), lik.ln_f(&y, &f));
        assert_eq!(lik.third_diag(&y, &f, t), lik.third_diag(&y, &f, t));
        assert_eq!(
            lik.tilted_moments(&y, 2, 0.3, -0.4),
            lik.tilted_moments(&y, 2, 0.3, -0.4)
        );
    }

    #[test]
    fn no_hyperparameters() {
        let lik = ProbitLikelihood::new().parallel_threshold(12);
        assert!(lik.pack().is_empty());
        assert!(lik.ln_prior_grad().is_empty());
        assert_eq!(lik.ln_prior(), 0.0);

        let w = [0.5, 1.5];
        let (unpacked, rest) = lik.unpack(&w);
        assert_eq!(unpacked, lik);
        assert_eq!(rest, &w[..]);

        let spec = lik.spec();
        assert_eq!(spec.name, "probit");
        assert_eq!(spec.n_params, 0);
    }

    #[test]
    fn invlink_is_cdf() {
        let lik = ProbitLikelihood::new();
        let p = lik.invlink(&vec(&[0.0, 1.0, -40.0]));
        close(p[0], 0.5, 1E-16);
        close(p[1], 0.841_344_746_068_542_9, 1E-15);
        assert!(p[2] >= 0.0 && p[2] < 1E-300);
    }

    #[test]
    fn sampled_labels_follow_invlink() {
        let mut rng = StdRng::seed_from_u64(0xABCD);
        let lik = ProbitLikelihood::new();
        let f = DVector::from_element(4000, 1.0);
        let y = lik.sample_labels(&f, &mut rng);
        assert!(check_labels(&y).is_ok());
        let positive = y.iter().filter(|&&v| v > 0.0).count() as f64 / 4000.0;
        close(positive, 0.841_344_746_068_542_9, 0.03);
    }
}
