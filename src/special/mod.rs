//! Special functions behind the CEV closed forms.
//!
//! `statrs` supplies the regularized incomplete gamma functions. The noncentral
//! chi-squared CDF is built on top of them as a Poisson mixture of central
//! chi-squared CDFs:
//!
//! ```text
//! P(X <= x; k, λ) = Σ_j  e^{-λ/2} (λ/2)^j / j!  ·  P(k/2 + j, x/2)
//! ```
//!
//! Each tail is summed on its own rather than as `1 - other tail`, so a tail
//! probability of 1e-20 keeps its relative accuracy.
//!
//! For shapes of [`LARGE_SHAPE`] and above the incomplete gamma functions are
//! evaluated with Temme's uniform asymptotic expansion instead of `statrs`,
//! whose series loses accuracy and slows down without bound as the shape grows.

use std::f64::consts::PI;

use statrs::function::gamma::{gamma_lr, gamma_ur, ln_gamma};

use crate::config::SeriesConfig;
use crate::error::DomainError;

/// Shape from which [`gamma_cdf`] switches to the asymptotic expansion.
pub const LARGE_SHAPE: f64 = 1e4;

/// Gamma CDF with unit scale: `P(shape, x)` for the lower tail, `Q(shape, x)` for the upper.
///
/// Returns NaN for a non-positive or NaN `shape` and for a NaN `x`.
pub fn gamma_cdf(x: f64, shape: f64, upper_tail: bool) -> f64 {
    if x.is_nan() || !(shape > 0.0) || shape.is_infinite() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return if upper_tail { 1.0 } else { 0.0 };
    }
    if x.is_infinite() {
        return if upper_tail { 0.0 } else { 1.0 };
    }

    let p = if shape >= LARGE_SHAPE {
        temme_gamma(x, shape, upper_tail)
    } else if upper_tail {
        gamma_ur(shape, x)
    } else {
        gamma_lr(shape, x)
    };
    p.clamp(0.0, 1.0)
}

/// Temme's expansion `Q(a, x) = erfc(η sqrt(a/2)) / 2 + R(a, η)`, with the
/// remainder carried to the `1/a` term. The dropped terms are below 1e-12
/// relative for `a >= LARGE_SHAPE`.
fn temme_gamma(x: f64, shape: f64, upper_tail: bool) -> f64 {
    let gap = (x - shape) / shape;
    let eta = (2.0 * gap_minus_ln1p(gap)).max(0.0).sqrt().copysign(gap);

    let (c0, c1) = if eta.abs() < 1e-3 {
        (
            -1.0 / 3.0 + eta * (1.0 / 12.0 + eta * (-2.0 / 135.0 + eta / 864.0)),
            -1.0 / 540.0 - eta / 288.0,
        )
    } else {
        (
            1.0 / gap - 1.0 / eta,
            1.0 / eta.powi(3) - 1.0 / gap.powi(3) - 1.0 / gap.powi(2) - 1.0 / (12.0 * gap),
        )
    };

    let remainder = (-0.5 * shape * eta * eta).exp() / (2.0 * PI * shape).sqrt() * (c0 + c1 / shape);
    let t = eta * (0.5 * shape).sqrt();
    if upper_tail {
        0.5 * libm::erfc(t) + remainder
    } else {
        0.5 * libm::erfc(-t) - remainder
    }
}

/// `e - ln(1 + e)` without cancellation for small `e`.
fn gap_minus_ln1p(e: f64) -> f64 {
    if e.abs() >= 0.5 {
        return e - e.ln_1p();
    }
    // ln(1 + e) = 2 atanh(u) with u = e / (2 + e), and e - 2u = u e
    let u = e / (2.0 + e);
    let u2 = u * u;
    let mut odd = 0.0;
    let mut k = 21.0;
    while k >= 3.0 {
        odd = odd * u2 + 1.0 / k;
        k -= 2.0;
    }
    u * e - 2.0 * u * u2 * odd
}

/// Poisson probability `e^{-λ} λ^m / m!` at an integer `m` close to `λ`.
///
/// For large `m` the exponent is formed from the deviance `λ((1 + d) ln(1 + d) - d)`
/// with `d = m / λ - 1`, which stays accurate where `m ln λ - λ - ln m!` cancels.
fn poisson_weight(m: f64, lambda: f64) -> f64 {
    if m < 16.0 {
        return (-lambda + m * lambda.ln() - ln_gamma(m + 1.0)).exp();
    }
    let d = (m - lambda) / lambda;
    let deviance = lambda * ((1.0 + d) * d.ln_1p() - d);
    (-deviance - stirling_correction(m)).exp() / (2.0 * PI * m).sqrt()
}

/// `ln m! - (m + 1/2) ln m + m - ln sqrt(2π)` for `m >= 16`.
fn stirling_correction(m: f64) -> f64 {
    let m2 = 1.0 / (m * m);
    (1.0 / 12.0 - m2 * (1.0 / 360.0 - m2 * (1.0 / 1260.0 - m2 / 1680.0))) / m
}

/// Terms summed on each side of the Poisson mode. Beyond `z (sqrt(λ) + z)` with
/// `z = sqrt(2 ln(1 / tolerance)) + 1` the remaining Poisson mass is below `tolerance`.
fn series_window(lambda: f64, tolerance: f64) -> f64 {
    let z = (2.0 * (1.0 / tolerance).ln()).sqrt() + 1.0;
    (z * (lambda.sqrt() + z)).ceil()
}

/// Noncentral chi-squared CDF with `df` degrees of freedom and noncentrality `nc`.
///
/// The Poisson series is summed outward from its mode, each direction over its
/// own window of `z (sqrt(nc / 2) + z)` terms, `z = sqrt(2 ln(1 / tolerance)) + 1`.
/// A direction stops early once the Poisson weight, the term's share of the
/// running sum and the term itself are all shrinking below `series.tolerance`.
/// The Poisson mass left outside the windows is below `series.tolerance`, so the
/// absolute error of the result is of that order; a tail probability far below
/// the tolerance may lose relative accuracy.
///
/// Returns NaN for invalid arguments (`df <= 0`, `nc < 0`, NaN inputs).
///
/// # Errors
///
/// [`DomainError::SeriesBudgetExceeded`] when the two windows together need more
/// than `series.max_terms` terms. This is checked before any term is summed.
/// With the default budget it happens once `nc` exceeds about 5e9.
///
/// # Examples
/// ```
/// use cev_lib::config::SeriesConfig;
/// use cev_lib::special::{gamma_cdf, ncx2_cdf};
///
/// // With zero noncentrality the distribution is a central chi-squared,
/// // i.e. a gamma with shape df/2 evaluated at x/2.
/// let series = SeriesConfig::default();
/// let p = ncx2_cdf(3.0, 4.0, 0.0, false, &series)?;
/// assert!((p - gamma_cdf(1.5, 2.0, false)).abs() < 1e-15);
/// # Ok::<(), cev_lib::DomainError>(())
/// ```
pub fn ncx2_cdf(
    x: f64,
    df: f64,
    nc: f64,
    upper_tail: bool,
    series: &SeriesConfig,
) -> Result<f64, DomainError> {
    if x.is_nan() || nc.is_nan() || !(df > 0.0) || nc < 0.0 || df.is_infinite() {
        return Ok(f64::NAN);
    }
    if x <= 0.0 {
        return Ok(if upper_tail { 1.0 } else { 0.0 });
    }
    if x.is_infinite() {
        return Ok(if upper_tail { 0.0 } else { 1.0 });
    }

    let half_x = 0.5 * x;
    let shape = 0.5 * df;
    if nc == 0.0 {
        return Ok(gamma_cdf(half_x, shape, upper_tail));
    }

    let lambda = 0.5 * nc;
    let mode = lambda.floor();
    let window = series_window(lambda, series.tolerance);
    let required = 1.0 + window + window.min(mode);
    if !(required <= series.max_terms as f64) {
        tracing::warn!(x, df, nc, required, max_terms = series.max_terms, "ncx2 series over budget");
        return Err(DomainError::SeriesBudgetExceeded {
            required: required as usize,
            max_terms: series.max_terms,
        });
    }
    let window = window as usize;

    let weight_at_mode = poisson_weight(mode, lambda);
    let mut sum = weight_at_mode * gamma_cdf(half_x, shape + mode, upper_tail);
    let mut terms = 1usize;

    // Upward from the mode: j = mode + 1, mode + 2, ...
    let mut weight = weight_at_mode;
    let mut prev_term = sum;
    let mut j = mode;
    for _ in 0..window {
        j += 1.0;
        weight *= lambda / j;
        let term = weight * gamma_cdf(half_x, shape + j, upper_tail);
        sum += term;
        terms += 1;
        if is_negligible(weight, term, prev_term, sum, series.tolerance) {
            break;
        }
        prev_term = term;
    }

    // Downward from the mode: j = mode - 1, ..., 0
    let mut weight = weight_at_mode;
    let mut prev_term = weight_at_mode;
    let mut j = mode;
    for _ in 0..window {
        if j <= 0.0 {
            break;
        }
        weight *= j / lambda;
        j -= 1.0;
        let term = weight * gamma_cdf(half_x, shape + j, upper_tail);
        sum += term;
        terms += 1;
        if is_negligible(weight, term, prev_term, sum, series.tolerance) {
            break;
        }
        prev_term = term;
    }

    tracing::trace!(x, df, nc, upper_tail, terms, "ncx2 series summed");

    Ok(sum.clamp(0.0, 1.0))
}

#[inline]
fn is_negligible(weight: f64, term: f64, prev_term: f64, sum: f64, tolerance: f64) -> bool {
    weight < tolerance && term <= tolerance * sum && term <= prev_term
}
