//! CEV European option price (Schroder 1989).
//!
//! With `k = cov(K)`, `f = cov(F)` and `d = 1 / (1 - beta)`:
//!
//! ```text
//! call = df * (F * Q(k; d + 2, f) - K * P(f; d, k))
//! put  = df * (K * Q(f; d, k) - F * P(k; d + 2, f))
//! ```
//!
//! where `P` and `Q` are the lower and upper tails of the noncentral chi-squared
//! CDF `(x; degrees of freedom, noncentrality)`. The put is the same expression
//! with every tail flipped and the sign reversed, which is how it is computed.
//! Paths absorbed at zero are worth nothing to a call and `K` to a put.

use crate::config::SeriesConfig;
use crate::error::DomainError;
use crate::model_params::{OptionType, ResolvedMarket};
use crate::models::cev::transform::ChangeOfVariable;
use crate::models::utils::price_bounds;
use crate::special::ncx2_cdf;

/// Price of a European option under CEV dynamics with elasticity `beta`.
pub fn price(
    strike: f64,
    market: &ResolvedMarket,
    beta: f64,
    option_type: OptionType,
    series: &SeriesConfig,
) -> Result<f64, DomainError> {
    let cov = ChangeOfVariable::new(market.sigma, beta, market.texp)?;
    let strike_cov = cov.apply("strike", strike)?;
    let forward_cov = cov.apply("forward", market.forward)?;
    let deg = cov.price_dof();

    let is_call = option_type == OptionType::Call;
    let term1 = ncx2_cdf(strike_cov, deg + 2.0, forward_cov, is_call, series)?;
    let term2 = ncx2_cdf(forward_cov, deg, strike_cov, !is_call, series)?;

    let raw = option_type.cp() * market.df * (market.forward * term1 - strike * term2);

    // Cancellation in deep out-of-the-money wings can push the difference a few
    // ulps outside the no-arbitrage range.
    let (lower, upper) = price_bounds(strike, market.forward, market.df, option_type);
    Ok(raw.clamp(lower, upper))
}
