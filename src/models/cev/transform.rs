// src/models/cev/transform.rs

//! Change of variable shared by the CEV price and zero-mass formulas.
//!
//! Under `dF = sigma F^beta dW` the process `F^(2(1-beta)) / ((1-beta)^2 sigma^2)`
//! is a squared Bessel process, whose transition law at `texp` is a scaled
//! noncentral chi-squared. The transform maps a price level `X` onto that scale:
//!
//! ```text
//! betac = 1 - beta
//! scale = (betac * sigma)^2 * texp
//! cov(X) = X^(2 * betac) / scale
//! ```

use crate::error::{ensure_beta, ensure_positive, DomainError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeOfVariable {
    betac: f64,
    scale: f64,
}

impl ChangeOfVariable {
    /// Fails for `beta >= 1` (the `1 / (1 - beta)` pole) and for non-positive
    /// `sigma` or `texp`.
    pub fn new(sigma: f64, beta: f64, texp: f64) -> Result<Self, DomainError> {
        ensure_beta(beta)?;
        ensure_positive("sigma", sigma)?;
        ensure_positive("texp", texp)?;

        let betac = 1.0 - beta;
        let scale = ensure_positive("scale", (betac * sigma).powi(2) * texp)?;
        Ok(Self { betac, scale })
    }

    /// `1 - beta`
    pub fn betac(&self) -> f64 {
        self.betac
    }

    /// `(betac * sigma)^2 * texp`
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `X^(2 * betac) / scale` for a strictly positive price level `X`.
    pub fn apply(&self, name: &'static str, x: f64) -> Result<f64, DomainError> {
        ensure_positive(name, x)?;
        let y = x.powf(2.0 * self.betac) / self.scale;
        if y.is_finite() {
            Ok(y)
        } else {
            Err(DomainError::NonFinite { name, value: y })
        }
    }

    /// Degrees of freedom of the price formula's second chi-squared term; the
    /// first term uses this plus two.
    pub fn price_dof(&self) -> f64 {
        1.0 / self.betac
    }

    /// Gamma shape of the zero-mass formula.
    pub fn mass_shape(&self) -> f64 {
        0.5 / self.betac
    }
}
