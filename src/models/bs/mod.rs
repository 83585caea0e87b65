// Black (lognormal) pricing on the forward. This is the beta = 1 limit of the
// CEV model, where the CEV closed form has a pole; callers holding beta = 1
// route here instead.

use crate::error::{ensure_positive, DomainError};
use crate::model_params::OptionType;
use crate::models::traits::EuropeanModel;
use crate::models::utils::norm_cdf;

/// Black price of a European option on `forward`, discounted with `df`.
pub fn black_price(
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
    let d1 = (forward / strike).ln() / stdev + 0.5 * stdev;
    let d2 = d1 - stdev;

    let price = match option_type {
        OptionType::Call => df * (forward * norm_cdf(d1) - strike * norm_cdf(d2)),
        OptionType::Put => df * (strike * norm_cdf(-d2) - forward * norm_cdf(-d1)),
    };
    Ok(price.max(0.0))
}

/// Lognormal model with constant volatility `sigma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackModel {
    sigma: f64,
}

impl BlackModel {
    pub fn new(sigma: f64) -> Result<Self, DomainError> {
        Ok(Self {
            sigma: ensure_positive("sigma", sigma)?,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl EuropeanModel for BlackModel {
    fn model_name(&self) -> &str {
        "black"
    }

    fn price(
        &self,
        strike: f64,
        forward: f64,
        df: f64,
        texp: f64,
        option_type: OptionType,
    ) -> Result<f64, DomainError> {
        black_price(strike, forward, df, texp, self.sigma, option_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::utils::parity_residual;

    #[test]
    fn test_black_atm_matches_known_value() {
        // ATM forward, sigma = 20%, one year: C = F * (2 N(0.1) - 1)
        let call = black_price(100.0, 100.0, 1.0, 1.0, 0.2, OptionType::Call).unwrap();
        assert!((call - 7.965567455405796).abs() < 1e-10, "got {}", call);
    }

    #[test]
    fn test_black_parity() {
        let model = BlackModel::new(0.35).unwrap();
        for &strike in &[60.0, 100.0, 150.0] {
            let gap = parity_residual(&model, strike, 105.0, 0.95, 1.5).unwrap();
            assert!(gap.abs() < 1e-10, "parity gap {} at strike {}", gap, strike);
        }
    }

    #[test]
    fn test_black_rejects_bad_inputs() {
        assert!(black_price(0.0, 100.0, 1.0, 1.0, 0.2, OptionType::Call).is_err());
        assert!(black_price(100.0, 100.0, 1.0, 0.0, 0.2, OptionType::Put).is_err());
        assert!(BlackModel::new(-0.2).is_err());
    }
}
