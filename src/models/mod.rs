pub mod bs;
pub mod cev;
pub mod normal;

/// Common traits used by all European option models
pub mod traits {
    use crate::error::DomainError;
    use crate::model_params::OptionType;

    /// A model with a closed-form European option price in forward/discount-factor terms.
    pub trait EuropeanModel {
        /// Short identifier used in logs
        fn model_name(&self) -> &str;

        /// Discounted price of a European option struck at `strike` on `forward`.
        fn price(
            &self,
            strike: f64,
            forward: f64,
            df: f64,
            texp: f64,
            option_type: OptionType,
        ) -> Result<f64, DomainError>;
    }
}

/// Utility functions shared by the option models
pub mod utils {
    use crate::models::traits::EuropeanModel;
    use crate::error::DomainError;
    use crate::model_params::OptionType;

    /// Standard normal CDF, `0.5 * erfc(-x / sqrt(2))` so the left tail keeps precision
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x / std::f64::consts::SQRT_2)
    }

    /// Standard normal density
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
    }

    /// `C - P - df * (F - K)`: zero for any arbitrage-free model.
    pub fn parity_residual<M: EuropeanModel>(
        model: &M,
        strike: f64,
        forward: f64,
        df: f64,
        texp: f64,
    ) -> Result<f64, DomainError> {
        let call = model.price(strike, forward, df, texp, OptionType::Call)?;
        let put = model.price(strike, forward, df, texp, OptionType::Put)?;
        Ok(call - put - df * (forward - strike))
    }

    /// No-arbitrage bounds of a European option: `[0, F * df]` for a call, `[0, K * df]` for a put.
    pub fn price_bounds(strike: f64, forward: f64, df: f64, option_type: OptionType) -> (f64, f64) {
        match option_type {
            OptionType::Call => (0.0, forward * df),
            OptionType::Put => (0.0, strike * df),
        }
    }
}
