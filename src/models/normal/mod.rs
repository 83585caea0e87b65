//! Normal dynamics absorbed at zero: the beta = 0 member of the CEV family.
//!
//! With `dF = sigma dW` stopped at the origin, the reflection principle gives
//! the density of the surviving paths as `φ(x - F) - φ(x + F)` (in units of
//! `sigma * sqrt(texp)`), so the call price is a difference of two Bachelier
//! calls. This closed form does not go through the chi-squared machinery and
//! serves as an independent check of the CEV formula at beta = 0.

use crate::error::{ensure_positive, DomainError};
use crate::model_params::OptionType;
use crate::models::traits::EuropeanModel;
use crate::models::utils::{norm_cdf, norm_pdf};

/// Undiscounted Bachelier call on a forward that may be negative.
fn bachelier_call(forward: f64, strike: f64, stdev: f64) -> f64 {
    let d = (forward - strike) / stdev;
    (forward - strike) * norm_cdf(d) + stdev * norm_pdf(d)
}

/// Price of a European option when the forward follows an arithmetic Brownian
/// motion with volatility `sigma`, absorbed at zero.
///
/// Absorbed paths pay nothing to a call and the full strike to a put; the put
/// follows from parity since the stopped process is still a martingale.
pub fn absorbed_normal_price(
    strike: f64,
    forward: f64,
    df: f64,
    texp: f64,
    sigma: f64,
    option_type: OptionType,
) -> Result<f64, DomainError> {
    ensure_positive("strike", strike)?;
    ensure_positive("forward", forward)?;
    ensure_positive("df", df)?;
    ensure_positive("texp", texp)?;
    ensure_positive("sigma", sigma)?;

    let stdev = sigma * texp.sqrt();
    let call = df * (bachelier_call(forward, strike, stdev) - bachelier_call(-forward, strike, stdev));
    let price = match option_type {
        OptionType::Call => call,
        OptionType::Put => call - df * (forward - strike),
    };
    Ok(price.max(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorbedNormalModel {
    sigma: f64,
}

impl AbsorbedNormalModel {
    pub fn new(sigma: f64) -> Result<Self, DomainError> {
        Ok(Self {
            sigma: ensure_positive("sigma", sigma)?,
        })
    }
}

impl EuropeanModel for AbsorbedNormalModel {
    fn model_name(&self) -> &str {
        "absorbed-normal"
    }

    fn price(
        &self,
        strike: f64,
        forward: f64,
        df: f64,
        texp: f64,
        option_type: OptionType,
    ) -> Result<f64, DomainError> {
        absorbed_normal_price(strike, forward, df, texp, self.sigma, option_type)
    }
}
