//! Probability that the CEV process has been absorbed at zero by expiry.
//!
//! For `0 < beta < 1` the origin is attainable and absorbing. The absorption
//! probability is the upper tail of a gamma distribution:
//!
//! ```text
//! mass = Q(0.5 / (1 - beta), 0.5 * cov(F))
//! ```
//!
//! For `beta <= 0` the mass is reported as exactly zero.

use crate::error::DomainError;
use crate::model_params::ResolvedMarket;
use crate::models::cev::transform::ChangeOfVariable;
use crate::special::gamma_cdf;

/// Absorption probability at zero for elasticity `beta`.
///
/// Inputs are validated before the `beta <= 0` short cut, so a non-positive
/// forward is an error for every `beta`.
pub fn mass_zero(market: &ResolvedMarket, beta: f64) -> Result<f64, DomainError> {
    let cov = ChangeOfVariable::new(market.sigma, beta, market.texp)?;
    let forward_cov = cov.apply("forward", market.forward)?;

    if beta <= 0.0 {
        return Ok(0.0);
    }
    Ok(gamma_cdf(0.5 * forward_cov, cov.mass_shape(), true))
}
