//! Vectorized inputs and their normalization into fully resolved points.
//!
//! [`CevInputs`] collects every input as a broadcastable [`Values`]. Before any
//! formula runs, [`CevInputs::resolve`] broadcasts them, fills unset inputs from
//! [`InputDefaults`], derives forward and discount factor where they were not
//! given, and validates each element. The evaluators only ever see
//! [`CevPoint`]s.

pub mod broadcast;

pub use broadcast::{broadcast_len, Values};

use crate::config::InputDefaults;
use crate::error::{ensure_positive, DomainError};
use crate::model_params::{ContractParams, MarketParams, ModelParams, OptionType, ResolvedMarket};

/// One fully resolved evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CevPoint {
    pub market: ResolvedMarket,
    pub contract: ContractParams,
    pub model: ModelParams,
}

impl CevPoint {
    /// The contract strike, or the forward when none was given.
    pub fn strike(&self) -> f64 {
        self.contract.strike_or(self.market.forward)
    }
}

/// Builder over broadcastable inputs.
///
/// `texp` and `sigma` are mandatory; one of `spot` or `forward` must be set.
///
/// ```
/// use cev_lib::CevInputs;
///
/// let inputs = CevInputs::new(1.2, 2.0)
///     .spot(100.0)
///     .strike(vec![90.0, 100.0, 110.0])
///     .beta(0.5);
/// assert_eq!(inputs.len(), Ok(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CevInputs {
    texp: Values,
    sigma: Values,
    strike: Option<Values>,
    spot: Option<Values>,
    forward: Option<Values>,
    beta: Option<Values>,
    intr: Option<Values>,
    divr: Option<Values>,
    df: Option<Values>,
    cp: Option<Values>,
}

impl CevInputs {
    pub fn new(texp: impl Into<Values>, sigma: impl Into<Values>) -> Self {
        Self {
            texp: texp.into(),
            sigma: sigma.into(),
            strike: None,
            spot: None,
            forward: None,
            beta: None,
            intr: None,
            divr: None,
            df: None,
            cp: None,
        }
    }

    pub fn strike(mut self, strike: impl Into<Values>) -> Self {
        self.strike = Some(strike.into());
        self
    }

    pub fn spot(mut self, spot: impl Into<Values>) -> Self {
        self.spot = Some(spot.into());
        self
    }

    /// Forward price; takes precedence over the spot-derived forward.
    pub fn forward(mut self, forward: impl Into<Values>) -> Self {
        self.forward = Some(forward.into());
        self
    }

    pub fn beta(mut self, beta: impl Into<Values>) -> Self {
        self.beta = Some(beta.into());
        self
    }

    pub fn intr(mut self, intr: impl Into<Values>) -> Self {
        self.intr = Some(intr.into());
        self
    }

    pub fn divr(mut self, divr: impl Into<Values>) -> Self {
        self.divr = Some(divr.into());
        self
    }

    /// Discount factor; takes precedence over `exp(-intr * texp)`.
    pub fn df(mut self, df: impl Into<Values>) -> Self {
        self.df = Some(df.into());
        self
    }

    /// Numeric call/put flag, +1 or -1 per element.
    pub fn cp(mut self, cp: impl Into<Values>) -> Self {
        self.cp = Some(cp.into());
        self
    }

    pub fn option_type(self, option_type: OptionType) -> Self {
        self.cp(option_type.cp())
    }

    /// Broadcast length over every supplied input.
    pub fn len(&self) -> Result<usize, DomainError> {
        broadcast_len(&self.named(true))
    }

    fn named(&self, with_contract: bool) -> Vec<(&'static str, &Values)> {
        let mut named = vec![("texp", &self.texp), ("sigma", &self.sigma)];
        let optional = [
            ("spot", &self.spot),
            ("forward", &self.forward),
            ("beta", &self.beta),
            ("intr", &self.intr),
            ("divr", &self.divr),
            ("df", &self.df),
        ];
        named.extend(optional.into_iter().filter_map(|(name, v)| v.as_ref().map(|v| (name, v))));
        if with_contract {
            let contract = [("strike", &self.strike), ("cp", &self.cp)];
            named.extend(contract.into_iter().filter_map(|(name, v)| v.as_ref().map(|v| (name, v))));
        }
        named
    }

    /// Broadcast, default and validate every element for pricing.
    pub fn resolve(&self, defaults: &InputDefaults) -> Result<Vec<CevPoint>, DomainError> {
        self.resolve_with(defaults, true)
    }

    /// Like [`CevInputs::resolve`], but `strike` and `cp` are neither broadcast
    /// nor validated. Used by the zero-mass evaluator, which takes neither.
    pub fn resolve_market(&self, defaults: &InputDefaults) -> Result<Vec<CevPoint>, DomainError> {
        self.resolve_with(defaults, false)
    }

    fn resolve_with(
        &self,
        defaults: &InputDefaults,
        with_contract: bool,
    ) -> Result<Vec<CevPoint>, DomainError> {
        if self.spot.is_none() && self.forward.is_none() {
            return Err(DomainError::MissingInput("spot or forward"));
        }
        let len = broadcast_len(&self.named(with_contract))?;
        (0..len)
            .map(|i| self.point(i, defaults, with_contract))
            .collect()
    }

    fn point(
        &self,
        i: usize,
        defaults: &InputDefaults,
        with_contract: bool,
    ) -> Result<CevPoint, DomainError> {
        let at = |values: &Option<Values>| values.as_ref().map(|v| v.at(i));

        let market = MarketParams {
            // Only read when no forward is given, and then spot is present.
            spot: at(&self.spot).unwrap_or(f64::NAN),
            texp: self.texp.at(i),
            sigma: self.sigma.at(i),
            intr: at(&self.intr).unwrap_or(defaults.intr),
            divr: at(&self.divr).unwrap_or(defaults.divr),
            forward: at(&self.forward),
            df: at(&self.df),
        }
        .resolve()?;

        let model = ModelParams::new(at(&self.beta).unwrap_or(defaults.beta))?;

        let contract = if with_contract {
            let strike = at(&self.strike)
                .map(|k| ensure_positive("strike", k))
                .transpose()?;
            let option_type = match at(&self.cp) {
                Some(cp) => OptionType::from_cp(cp)?,
                None => defaults.option_type,
            };
            ContractParams {
                strike,
                option_type,
            }
        } else {
            ContractParams::at_the_money(defaults.option_type)
        };

        Ok(CevPoint {
            market,
            contract,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_vector_against_scalar_market() {
        let inputs = CevInputs::new(1.2, 2.0)
            .spot(100.0)
            .strike(vec![80.0, 100.0, 120.0]);
        let points = inputs.resolve(&InputDefaults::default()).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[2].strike(), 120.0);
        for p in &points {
            assert_eq!(p.market.forward, 100.0);
            assert_eq!(p.market.df, 1.0);
            assert_eq!(p.model.beta, 0.5);
            assert_eq!(p.contract.option_type, OptionType::Call);
        }
    }

    #[test]
    fn test_missing_strike_is_at_the_money_forward() {
        let inputs = CevInputs::new(2.0, 0.4).spot(100.0).intr(0.05).divr(0.02);
        let point = inputs.resolve(&InputDefaults::default()).unwrap()[0];
        let expected_forward = 100.0 * (0.06_f64).exp();
        assert!((point.strike() - expected_forward).abs() < 1e-10);
    }

    #[test]
    fn test_explicit_forward_and_df_win() {
        let inputs = CevInputs::new(1.0, 0.4)
            .spot(100.0)
            .intr(0.05)
            .divr(0.03)
            .forward(vec![95.0, 105.0])
            .df(0.9);
        let points = inputs.resolve(&InputDefaults::default()).unwrap();
        assert_eq!(points[0].market.forward, 95.0);
        assert_eq!(points[1].market.forward, 105.0);
        assert!(points.iter().all(|p| p.market.df == 0.9));
    }

    #[test]
    fn test_defaults_are_applied() {
        let defaults = InputDefaults {
            beta: 0.3,
            intr: 0.1,
            divr: 0.0,
            option_type: OptionType::Put,
        };
        let point = CevInputs::new(1.0, 0.4).spot(100.0).resolve(&defaults).unwrap()[0];
        assert_eq!(point.model.beta, 0.3);
        assert_eq!(point.contract.option_type, OptionType::Put);
        assert!((point.market.df - (-0.1_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_cp_vector_mixes_calls_and_puts() {
        let points = CevInputs::new(1.0, 0.4)
            .forward(100.0)
            .cp(vec![1.0, -1.0])
            .resolve(&InputDefaults::default())
            .unwrap();
        assert_eq!(points[0].contract.option_type, OptionType::Call);
        assert_eq!(points[1].contract.option_type, OptionType::Put);
    }

    #[test]
    fn test_resolution_errors() {
        let defaults = InputDefaults::default();

        assert_eq!(
            CevInputs::new(1.0, 0.4).resolve(&defaults),
            Err(DomainError::MissingInput("spot or forward"))
        );
        assert!(matches!(
            CevInputs::new(1.0, 0.4).spot(100.0).cp(0.0).resolve(&defaults),
            Err(DomainError::InvalidOptionType { .. })
        ));
        assert!(matches!(
            CevInputs::new(1.0, 0.4).spot(100.0).beta(1.0).resolve(&defaults),
            Err(DomainError::BetaOutOfRange { .. })
        ));
        assert!(matches!(
            CevInputs::new(1.0, 0.4)
                .spot(100.0)
                .strike(vec![90.0, -1.0])
                .resolve(&defaults),
            Err(DomainError::NonPositive { name: "strike", .. })
        ));
        assert!(matches!(
            CevInputs::new(vec![1.0, 2.0], 0.4)
                .spot(100.0)
                .strike(vec![90.0, 95.0, 100.0])
                .resolve(&defaults),
            Err(DomainError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_market_resolution_ignores_contract_inputs() {
        let inputs = CevInputs::new(1.0, 0.4)
            .spot(vec![50.0, 100.0])
            .strike(vec![1.0, 2.0, 3.0])
            .cp(7.0);
        assert!(inputs.resolve(&InputDefaults::default()).is_err());
        let points = inputs.resolve_market(&InputDefaults::default()).unwrap();
        assert_eq!(points.len(), 2);
    }
}
