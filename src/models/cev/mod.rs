//! Constant Elasticity of Variance model: `dF = sigma * F^beta * dW`, absorbed at zero.
//!
//! The pricing and zero-mass formulas live in [`price`] and [`mass`]; both go
//! through the change of variable in [`transform`]. [`CevModel`] bundles
//! `sigma`, `beta` and the series settings for scalar use.

pub mod mass;
pub mod price;
pub mod transform;

use crate::config::SeriesConfig;
use crate::error::{ensure_beta, ensure_positive, DomainError};
use crate::model_params::{OptionType, ResolvedMarket};
use crate::models::traits::EuropeanModel;

pub use transform::ChangeOfVariable;

/// CEV model with volatility scale `sigma` and elasticity `beta < 1`.
///
/// # Examples
/// ```
/// use cev_lib::models::cev::CevModel;
/// use cev_lib::OptionType;
///
/// let model = CevModel::new(2.0, 0.5).unwrap();
/// let call = model.price(100.0, 100.0, 1.0, 1.2, OptionType::Call).unwrap();
/// assert!(call > 0.0 && call < 100.0);
///
/// // beta = 1 is the lognormal limit and is rejected
/// assert!(CevModel::new(2.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CevModel {
    sigma: f64,
    beta: f64,
    series: SeriesConfig,
}

impl CevModel {
    pub fn new(sigma: f64, beta: f64) -> Result<Self, DomainError> {
        Ok(Self {
            sigma: ensure_positive("sigma", sigma)?,
            beta: ensure_beta(beta)?,
            series: SeriesConfig::default(),
        })
    }

    /// Replace the noncentral chi-squared series settings.
    pub fn with_series(mut self, series: SeriesConfig) -> Result<Self, DomainError> {
        series.validate()?;
        self.series = series;
        Ok(self)
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    fn market(&self, forward: f64, df: f64, texp: f64) -> ResolvedMarket {
        ResolvedMarket {
            forward,
            df,
            texp,
            sigma: self.sigma,
        }
    }

    /// Discounted European option price.
    pub fn price(
        &self,
        strike: f64,
        forward: f64,
        df: f64,
        texp: f64,
        option_type: OptionType,
    ) -> Result<f64, DomainError> {
        ensure_positive("df", df)?;
        price::price(
            strike,
            &self.market(forward, df, texp),
            self.beta,
            option_type,
            &self.series,
        )
    }

    /// Probability of absorption at zero by `texp`.
    pub fn mass_zero(&self, forward: f64, texp: f64) -> Result<f64, DomainError> {
        mass::mass_zero(&self.market(forward, 1.0, texp), self.beta)
    }
}

impl EuropeanModel for CevModel {
    fn model_name(&self) -> &str {
        "cev"
    }

    fn price(
        &self,
        strike: f64,
        forward: f64,
        df: f64,
        texp: f64,
        option_type: OptionType,
    ) -> Result<f64, DomainError> {
        CevModel::price(self, strike, forward, df, texp, option_type)
    }
}
