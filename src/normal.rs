//! Standard normal primitives which stay finite in the lower tail
//!
//! The probit formulas divide the normal density by the normal CDF. Evaluated
//! directly, both underflow for arguments below about -38 and the quotient
//! becomes `0/0`; well before that `ln(cdf(x))` has already lost most of its
//! digits. Below [`TAIL_CUTOFF`] these functions switch to a continued
//! fraction for the Mills ratio, which is accurate to a few ulp there and never
//! underflows.

use std::f64::consts::FRAC_1_SQRT_2;

use rv::dist::Gaussian;
use rv::traits::Rv;
use special::Error;

/// Arguments below this use the Mills ratio continued fraction.
pub const TAIL_CUTOFF: f64 = -5.0;

// 40 levels are exact to double precision for t >= 5.
const MILLS_TERMS: usize = 40;

/// Standard normal density, φ(x)
#[inline]
pub fn pdf(x: f64) -> f64 {
    Gaussian::standard().f(&x)
}

/// Log of the standard normal density, ln φ(x)
#[inline]
pub fn ln_pdf(x: f64) -> f64 {
    Gaussian::standard().ln_f(&x)
}

/// Standard normal cumulative distribution function, Φ(x)
///
/// Computed through the complementary error function so that the lower tail
/// keeps full relative precision until it underflows.
#[inline]
pub fn cdf(x: f64) -> f64 {
    0.5 * (-x * FRAC_1_SQRT_2).compl_error()
}

/// Log of the standard normal CDF, ln Φ(x)
///
/// # Example
/// ```rust
/// use gp_probit::normal::ln_cdf;
///
/// // Φ(-40) underflows, its log does not.
/// assert!(ln_cdf(-40.0).is_finite());
/// assert!((ln_cdf(0.0) - 0.5_f64.ln()).abs() < 1E-15);
/// ```
pub fn ln_cdf(x: f64) -> f64 {
    if x < TAIL_CUTOFF {
        ln_pdf(x) + mills_ratio(-x).ln()
    } else if x > 0.0 {
        (-cdf(-x)).ln_1p()
    } else {
        cdf(x).ln()
    }
}

/// Inverse Mills ratio, φ(x) / Φ(x)
///
/// Behaves like `-x` as `x -> -∞` and decays to zero as `x -> ∞`.
pub fn inv_mills_ratio(x: f64) -> f64 {
    if x < TAIL_CUTOFF {
        1.0 / mills_ratio(-x)
    } else {
        pdf(x) / cdf(x)
    }
}

/// φ(x) / Φ(x) + x, which is positive for every x
///
/// For `x -> -∞` both terms grow like `|x|` while their sum shrinks like
/// `1 / |x|`, so below the cutoff the sum is read straight off the tail of the
/// continued fraction instead of being formed by subtraction.
pub fn inv_mills_excess(x: f64) -> f64 {
    if x < TAIL_CUTOFF {
        1.0 / continued_fraction(-x, 2)
    } else {
        inv_mills_ratio(x) + x
    }
}

/// (λ + x)(2λ + x) - 1 with λ = φ(x) / Φ(x), the factor that turns λ into
/// the third derivative of ln Φ.
///
/// In the lower tail the product tends to 1 while the result shrinks like
/// `2 / x⁴`. Below the cutoff it is rebuilt from the levels `D₂..D₅` of the
/// continued fraction as `2 (t + 9/D₄ - 8/D₅) / (D₂² D₃² D₄)` with `t = -x`,
/// which involves no subtraction of nearly equal terms.
pub fn inv_mills_curvature(x: f64) -> f64 {
    if x < TAIL_CUTOFF {
        let t = -x;
        let d5 = continued_fraction(t, 5);
        let d4 = t + 4.0 / d5;
        let d3 = t + 3.0 / d4;
        let d2 = t + 2.0 / d3;
        let num = t + 9.0 / d4 - 8.0 / d5;
        2.0 * (num / d4) / (d2 * d3) / (d2 * d3)
    } else {
        let r = inv_mills_ratio(x);
        let e = r + x;
        e * (r + e) - 1.0
    }
}

/// Mills ratio (1 - Φ(t)) / φ(t) for t >= 5.
fn mills_ratio(t: f64) -> f64 {
    1.0 / continued_fraction(t, 1)
}

/// Backward evaluation of `t + k / (t + (k + 1) / (t + (k + 2) / ...))`.
///
/// With `k = 1` this is the reciprocal of the Mills ratio, and with `k = 2`
/// it is the reciprocal of its excess over `t`.
fn continued_fraction(t: f64, k: usize) -> f64 {
    (k..=MILLS_TERMS)
        .rev()
        .fold(t, |acc, j| t + j as f64 / acc)
}
