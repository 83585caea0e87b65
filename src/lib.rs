//! # CEV-Lib: Closed-Form Pricing under Constant Elasticity of Variance
//!
//! `cev-lib` evaluates European option prices and the probability mass absorbed
//! at zero under the Constant Elasticity of Variance model
//!
//! ```text
//! dF = sigma * F^beta * dW,    beta < 1,  absorbed at F = 0
//! ```
//!
//! Both quantities are closed forms in special functions: the price goes through
//! the noncentral chi-squared CDF (Schroder 1989), the zero mass through the
//! gamma CDF. Every evaluator is a pure function and every input may be a
//! scalar or a vector.
//!
//! ## Quick Start
//!
//! ```rust
//! use cev_lib::{mass_zero, price, CevInputs};
//!
//! // A strip of calls on spot 100, one year and a bit, square-root elasticity
//! let inputs = CevInputs::new(1.2, 2.0)
//!     .spot(100.0)
//!     .strike(vec![90.0, 100.0, 110.0])
//!     .beta(0.5)
//!     .cp(1.0);
//!
//! let prices = price(&inputs)?;
//! assert_eq!(prices.len(), 3);
//! assert!(prices[0] > prices[1] && prices[1] > prices[2]);
//!
//! let mass = mass_zero(&inputs)?;
//! assert!(mass.iter().all(|&m| (0.0..=1.0).contains(&m)));
//! # Ok::<(), cev_lib::DomainError>(())
//! ```
//!
//! ## Input Resolution
//!
//! - `forward` defaults to `spot * exp(-divr * texp) / df`
//! - `df` defaults to `exp(-intr * texp)`
//! - `strike` defaults to the forward
//! - `beta`, `intr`, `divr` and the option type default to [`InputDefaults`]
//!
//! Explicitly supplied `forward` and `df` always win over derived values.
//!
//! ## Configuration Presets
//!
//! - `standard()`: double-precision series cutoff
//! - `precise()`: tighter cutoff for reference values
//! - `fast()`: looser cutoff for bulk evaluation

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod error;
pub mod inputs;
pub mod model_params;
pub mod models;
pub mod special;

// ================================================================================================
// IMPORTS
// ================================================================================================

use inputs::CevPoint;
use models::cev::{mass, price as cev_price};

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use config::{CevConfig, InputDefaults, SeriesConfig};
pub use error::DomainError;
pub use inputs::{CevInputs, Values};
pub use model_params::{ContractParams, MarketParams, ModelParams, OptionType, ResolvedMarket};
pub use models::cev::{ChangeOfVariable, CevModel};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured evaluator settings.
///
/// - [`standard()`]: the library default
/// - [`precise()`]: reference-grade series truncation
/// - [`fast()`]: bulk evaluation
pub mod default_configs {
    use crate::config::CevConfig;

    /// Library default: series cutoff at 1e-16, up to 1,000,000 terms.
    ///
    /// ```rust
    /// use cev_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.defaults.beta, 0.5);
    /// ```
    pub fn standard() -> CevConfig {
        CevConfig::standard()
    }

    /// Series cutoff at 1e-20, up to 4,000,000 terms.
    pub fn precise() -> CevConfig {
        CevConfig::precise()
    }

    /// Series cutoff at 1e-12, up to 100,000 terms.
    pub fn fast() -> CevConfig {
        CevConfig::fast()
    }
}

// ================================================================================================
// VECTORIZED EVALUATORS
// ================================================================================================

/// Price European options under CEV dynamics with the default configuration.
///
/// See [`price_with_config`].
pub fn price(inputs: &CevInputs) -> Result<Vec<f64>, DomainError> {
    price_with_config(inputs, &CevConfig::default())
}

/// Price European options under CEV dynamics.
///
/// Inputs are broadcast to a common length and resolved element by element; the
/// result has one discounted price per element, in input order. Resolution is
/// all-or-nothing: the first invalid element aborts the call.
///
/// # Errors
///
/// * [`DomainError::BetaOutOfRange`] if any `beta >= 1`
/// * [`DomainError::NonPositive`] for a non-positive strike, spot, forward, texp, sigma or df
/// * [`DomainError::InvalidOptionType`] if any `cp` is not +1 or -1
/// * [`DomainError::LengthMismatch`] / [`DomainError::EmptyInput`] for inputs that do not broadcast
/// * [`DomainError::InvalidSeries`] if `config.series` is out of range
/// * [`DomainError::SeriesBudgetExceeded`] if an element needs more series terms than
///   `config.series.max_terms` allows (very small `sigma * sqrt(texp)` relative to the forward level)
pub fn price_with_config(inputs: &CevInputs, config: &CevConfig) -> Result<Vec<f64>, DomainError> {
    config.series.validate()?;
    let points = inputs.resolve(&config.defaults)?;
    tracing::debug!(len = points.len(), "pricing CEV options");

    evaluate(&points, |p| {
        cev_price::price(
            p.strike(),
            &p.market,
            p.model.beta,
            p.contract.option_type,
            &config.series,
        )
    })
}

/// Probability of absorption at zero with the default configuration.
///
/// See [`mass_zero_with_config`].
pub fn mass_zero(inputs: &CevInputs) -> Result<Vec<f64>, DomainError> {
    mass_zero_with_config(inputs, &CevConfig::default())
}

/// Probability that the CEV process has been absorbed at zero by expiry.
///
/// `strike` and `cp` are ignored. Elements with `beta <= 0` report zero mass.
pub fn mass_zero_with_config(
    inputs: &CevInputs,
    config: &CevConfig,
) -> Result<Vec<f64>, DomainError> {
    config.series.validate()?;
    let points = inputs.resolve_market(&config.defaults)?;
    tracing::debug!(len = points.len(), "computing CEV zero mass");

    evaluate(&points, |p| mass::mass_zero(&p.market, p.model.beta))
}

#[cfg(not(feature = "parallel"))]
fn evaluate<F>(points: &[CevPoint], f: F) -> Result<Vec<f64>, DomainError>
where
    F: Fn(&CevPoint) -> Result<f64, DomainError> + Sync + Send,
{
    points.iter().map(f).collect()
}

#[cfg(feature = "parallel")]
fn evaluate<F>(points: &[CevPoint], f: F) -> Result<Vec<f64>, DomainError>
where
    F: Fn(&CevPoint) -> Result<f64, DomainError> + Sync + Send,
{
    use rayon::prelude::*;

    points.par_iter().map(f).collect()
}
