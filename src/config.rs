//! Configuration for the vectorized evaluators.
//!
//! A [`CevConfig`] carries the defaults used when an input is omitted and the
//! truncation settings of the noncentral chi-squared series. It can be built in
//! code, taken from one of the presets, or read from TOML:
//!
//! ```toml
//! [defaults]
//! beta = 0.5
//! intr = 0.0
//! divr = 0.0
//! option_type = "call"
//!
//! [series]
//! tolerance = 1e-16
//! max_terms = 1000000
//! ```
//!
//! Every field is optional in the file; missing ones take the values above.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::model_params::OptionType;

/// Truncation settings of the Poisson series behind the noncentral chi-squared CDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Cutoff for Poisson weights and relative term size
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Most terms one CDF evaluation may need; the need grows with the square
    /// root of the noncentrality, and exceeding it is an error
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_terms: default_max_terms(),
        }
    }
}

impl SeriesConfig {
    /// `tolerance` must lie in (0, 1e-6] and `max_terms` be at least 1.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.tolerance > 0.0 && self.tolerance <= 1e-6) {
            return Err(DomainError::InvalidSeries {
                name: "tolerance",
                value: self.tolerance,
            });
        }
        if self.max_terms == 0 {
            return Err(DomainError::InvalidSeries {
                name: "max_terms",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Values used for inputs the caller leaves unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    /// Elasticity exponent
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Flat interest rate, used to derive the discount factor
    #[serde(default)]
    pub intr: f64,
    /// Dividend or convenience yield, used to derive the forward
    #[serde(default)]
    pub divr: f64,
    /// Option type when no `cp` is supplied
    #[serde(default)]
    pub option_type: OptionType,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            beta: default_beta(),
            intr: 0.0,
            divr: 0.0,
            option_type: OptionType::Call,
        }
    }
}

/// Main configuration struct for the vectorized evaluators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CevConfig {
    #[serde(default)]
    pub defaults: InputDefaults,

    #[serde(default)]
    pub series: SeriesConfig,
}

impl CevConfig {
    /// Default defaults and a series tolerance at double-precision resolution
    pub fn standard() -> Self {
        Self::default()
    }

    /// Tighter series cutoff and a larger term budget for reference-grade values
    pub fn precise() -> Self {
        Self {
            defaults: InputDefaults::default(),
            series: SeriesConfig {
                tolerance: 1e-20,
                max_terms: 4_000_000,
            },
        }
    }

    /// Looser cutoff for bulk evaluation where ~1e-12 accuracy is enough
    pub fn fast() -> Self {
        Self {
            defaults: InputDefaults::default(),
            series: SeriesConfig {
                tolerance: 1e-12,
                max_terms: 100_000,
            },
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CevConfig = toml::from_str(s).context("failed to parse CEV configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read CEV configuration from {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid configuration in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.series.validate()?;

        let defaults = &self.defaults;
        if !(defaults.beta < 1.0) {
            bail!("defaults.beta must be below 1, got {}", defaults.beta);
        }
        if !defaults.intr.is_finite() || !defaults.divr.is_finite() {
            bail!(
                "defaults.intr and defaults.divr must be finite, got {} and {}",
                defaults.intr,
                defaults.divr
            );
        }
        Ok(())
    }
}

fn default_tolerance() -> f64 {
    1e-16
}

fn default_max_terms() -> usize {
    1_000_000
}

fn default_beta() -> f64 {
    0.5
}
