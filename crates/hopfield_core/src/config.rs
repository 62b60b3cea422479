use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Args;

use crate::error::Result;
use crate::recall::{ConvergenceCriterion, SettleOptions, DEFAULT_MAX_ITERATIONS};

pub const DEFAULT_EPOCHS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Args))]
#[serde(default)]
pub struct RecallConfig {
    /// Settling passes over every pattern before the recovery pass
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_EPOCHS))]
    pub epochs: usize,

    /// Update steps allowed per pattern before giving up
    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_MAX_ITERATIONS))]
    pub max_iterations: usize,

    /// Accept a fixed point once no element moves by more than this (exact equality when unset)
    #[cfg_attr(feature = "cli", arg(long, value_parser = parse_tolerance))]
    pub tolerance: Option<f64>,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: None,
        }
    }
}

impl RecallConfig {
    pub fn criterion(&self) -> ConvergenceCriterion {
        match self.tolerance {
            Some(eps) => ConvergenceCriterion::Tolerance(eps),
            None => ConvergenceCriterion::Exact,
        }
    }

    /// Reject settings the settle loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        self.criterion().validate()
    }

    pub fn settle_options(&self) -> SettleOptions {
        SettleOptions {
            max_iterations: self.max_iterations,
            criterion: self.criterion(),
        }
    }
}

#[cfg(feature = "cli")]
fn parse_tolerance(s: &str) -> core::result::Result<f64, alloc::string::String> {
    use alloc::string::ToString;

    let eps: f64 = s.parse().map_err(|e: core::num::ParseFloatError| e.to_string())?;
    ConvergenceCriterion::Tolerance(eps)
        .validate()
        .map(|()| eps)
        .map_err(|e| e.to_string())
}
