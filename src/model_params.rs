//! Typed parameter containers for a single evaluation.
//!
//! [`MarketParams`] holds the market side, with the forward and discount factor
//! either supplied directly or derived from spot and flat rates; explicit values
//! always take precedence. [`ContractParams`] and [`ModelParams`] hold the
//! option and the elasticity. Resolving a [`MarketParams`] yields a
//! [`ResolvedMarket`], which is what the evaluators consume.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_beta, ensure_finite, ensure_positive, DomainError};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

impl OptionType {
    /// +1 for a call, -1 for a put.
    pub fn cp(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Parse the numeric `cp` flag. Only exactly +1 and -1 are accepted.
    ///
    /// ```
    /// use cev_lib::OptionType;
    ///
    /// assert_eq!(OptionType::from_cp(-1.0), Ok(OptionType::Put));
    /// assert!(OptionType::from_cp(0.0).is_err());
    /// ```
    pub fn from_cp(cp: f64) -> Result<Self, DomainError> {
        if cp == 1.0 {
            Ok(OptionType::Call)
        } else if cp == -1.0 {
            Ok(OptionType::Put)
        } else {
            Err(DomainError::InvalidOptionType { cp })
        }
    }
}

impl TryFrom<f64> for OptionType {
    type Error = DomainError;

    fn try_from(cp: f64) -> Result<Self, Self::Error> {
        OptionType::from_cp(cp)
    }
}

/// Market inputs of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Spot price of the underlying
    pub spot: f64,
    /// Time to expiry in years
    pub texp: f64,
    /// CEV volatility scale
    pub sigma: f64,
    /// Flat interest rate
    pub intr: f64,
    /// Dividend or convenience yield
    pub divr: f64,
    /// Forward price; overrides the value derived from spot when set
    pub forward: Option<f64>,
    /// Discount factor; overrides `exp(-intr * texp)` when set
    pub df: Option<f64>,
}

impl MarketParams {
    /// Market with zero rates and neither forward nor discount factor overridden.
    pub fn new(spot: f64, texp: f64, sigma: f64) -> Self {
        Self {
            spot,
            texp,
            sigma,
            intr: 0.0,
            divr: 0.0,
            forward: None,
            df: None,
        }
    }

    pub fn with_rates(mut self, intr: f64, divr: f64) -> Self {
        self.intr = intr;
        self.divr = divr;
        self
    }

    pub fn with_forward(mut self, forward: f64) -> Self {
        self.forward = Some(forward);
        self
    }

    pub fn with_df(mut self, df: f64) -> Self {
        self.df = Some(df);
        self
    }

    /// The supplied discount factor, else `exp(-intr * texp)`.
    pub fn discount_factor(&self) -> f64 {
        self.df.unwrap_or_else(|| (-self.intr * self.texp).exp())
    }

    /// The supplied forward, else `spot * exp(-divr * texp) / df`.
    pub fn forward_price(&self) -> f64 {
        self.forward
            .unwrap_or_else(|| self.spot * (-self.divr * self.texp).exp() / self.discount_factor())
    }

    /// Validate the inputs and collapse them into forward/discount-factor form.
    ///
    /// The spot and rates are only checked when they are actually used to derive
    /// the forward or discount factor.
    pub fn resolve(&self) -> Result<ResolvedMarket, DomainError> {
        let texp = ensure_positive("texp", self.texp)?;
        let sigma = ensure_positive("sigma", self.sigma)?;

        let df = match self.df {
            Some(df) => ensure_positive("df", df)?,
            None => {
                ensure_finite("intr", self.intr)?;
                ensure_positive("df", self.discount_factor())?
            }
        };
        let forward = match self.forward {
            Some(forward) => ensure_positive("forward", forward)?,
            None => {
                ensure_positive("spot", self.spot)?;
                ensure_finite("divr", self.divr)?;
                ensure_positive("forward", self.forward_price())?
            }
        };

        Ok(ResolvedMarket {
            forward,
            df,
            texp,
            sigma,
        })
    }
}

/// Market inputs after default resolution and validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMarket {
    pub forward: f64,
    pub df: f64,
    pub texp: f64,
    pub sigma: f64,
}

/// Contract inputs: strike and option type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractParams {
    /// Strike; at-the-money forward when unset
    pub strike: Option<f64>,
    pub option_type: OptionType,
}

impl ContractParams {
    pub fn new(strike: f64, option_type: OptionType) -> Self {
        Self {
            strike: Some(strike),
            option_type,
        }
    }

    /// An at-the-money-forward contract of the given type.
    pub fn at_the_money(option_type: OptionType) -> Self {
        Self {
            strike: None,
            option_type,
        }
    }

    pub fn strike_or(&self, forward: f64) -> f64 {
        self.strike.unwrap_or(forward)
    }
}

/// CEV model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Elasticity exponent: volatility scales with `F^(beta - 1)`
    pub beta: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self { beta: 0.5 }
    }
}

impl ModelParams {
    pub fn new(beta: f64) -> Result<Self, DomainError> {
        let params = Self { beta };
        params.validate()?;
        Ok(params)
    }

    /// Rejects `beta >= 1` and NaN. Negative values are allowed.
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_beta(self.beta).map(|_| ())
    }
}
