//! Training + recovery pipeline.
//!
//! Weights are built once from the raw patterns. The patterns are then
//! squashed through the sigmoid and settled: `epochs` settling passes whose
//! results are discarded, followed by one recovery pass whose results are
//! returned. The settling passes never touch the weights; they are kept so a
//! pattern that cannot converge fails the run exactly as it would after a
//! single pass.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::activation::sigmoid_vec;
use crate::cancel::CancelToken;
use crate::config::RecallConfig;
use crate::error::{Result, ShapeError};
use crate::recall::{self, Settled};
use crate::weights::{build_weights, WeightMatrix};

/// One recovered pattern, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    pub index: usize,
    pub original: Vec<f64>,
    pub recovered: Vec<f64>,
    pub iterations: usize,
    pub energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallReport {
    pub dim: usize,
    pub epochs: usize,
    pub recoveries: Vec<Recovery>,
}

impl RecallReport {
    pub fn recovered(&self) -> Vec<Vec<f64>> {
        self.recoveries.iter().map(|r| r.recovered.clone()).collect()
    }
}

/// A weight matrix plus the settings used to recall through it.
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    weights: WeightMatrix,
    config: RecallConfig,
    cancel: Option<CancelToken>,
}

impl HopfieldNetwork {
    /// Build weights from raw (untransformed) patterns.
    pub fn train<P: AsRef<[f64]>>(raw_patterns: &[P], config: RecallConfig) -> Result<Self> {
        let weights = build_weights(raw_patterns)?;
        Ok(Self::from_weights(weights, config))
    }

    pub fn from_weights(weights: WeightMatrix, config: RecallConfig) -> Self {
        Self {
            weights,
            config,
            cancel: None,
        }
    }

    /// Poll `token` inside every settle loop run by this network.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn config(&self) -> &RecallConfig {
        &self.config
    }

    pub fn dim(&self) -> usize {
        self.weights.dim()
    }

    pub fn settle(&self, pattern: &[f64]) -> Result<Settled> {
        recall::settle_with(
            &self.weights,
            pattern,
            &self.config.settle_options(),
            self.cancel.as_ref(),
        )
    }

    pub fn energy(&self, pattern: &[f64]) -> Result<f64> {
        recall::energy(&self.weights, pattern)
    }

    /// Run the settling passes then the recovery pass over already
    /// preprocessed patterns.
    pub fn recall<P: AsRef<[f64]> + Sync>(&self, patterns: &[P]) -> Result<Vec<Settled>> {
        self.config.validate()?;
        for (index, p) in patterns.iter().enumerate() {
            let len = p.as_ref().len();
            if len != self.dim() {
                return Err(ShapeError::LengthMismatch {
                    index,
                    expected: self.dim(),
                    actual: len,
                }
                .into());
            }
        }

        for epoch in 0..self.config.epochs {
            log::trace!("settling pass {}/{}", epoch + 1, self.config.epochs);
            self.settle_each(patterns)?;
        }

        log::trace!("recovery pass over {} patterns", patterns.len());
        self.settle_each(patterns)
    }

    #[cfg(not(feature = "parallel"))]
    fn settle_each<P: AsRef<[f64]> + Sync>(&self, patterns: &[P]) -> Result<Vec<Settled>> {
        patterns
            .iter()
            .enumerate()
            .map(|(index, p)| self.settle(p.as_ref()).map_err(|e| e.at_pattern(index)))
            .collect()
    }

    /// One rayon task per pattern. Results are gathered in input order before
    /// the first error is picked, so failures match the sequential path.
    #[cfg(feature = "parallel")]
    fn settle_each<P: AsRef<[f64]> + Sync>(&self, patterns: &[P]) -> Result<Vec<Settled>> {
        let results: Vec<Result<Settled>> = patterns
            .par_iter()
            .enumerate()
            .map(|(index, p)| self.settle(p.as_ref()).map_err(|e| e.at_pattern(index)))
            .collect();
        results.into_iter().collect()
    }
}

/// Recover every pattern in `raw_patterns`, returning the settled vectors in
/// input order. Uses exact convergence and the default iteration cap.
pub fn recall_all<P: AsRef<[f64]>>(raw_patterns: &[P], epochs: usize) -> Result<Vec<Vec<f64>>> {
    let config = RecallConfig {
        epochs,
        ..RecallConfig::default()
    };
    recall_all_with(raw_patterns, &config).map(|report| report.recovered())
}

pub fn recall_all_with<P: AsRef<[f64]>>(
    raw_patterns: &[P],
    config: &RecallConfig,
) -> Result<RecallReport> {
    config.validate()?;
    let network = HopfieldNetwork::train(raw_patterns, *config)?;
    recover(&network, raw_patterns)
}

/// Preprocess `raw_patterns` with the sigmoid and recall them through an
/// existing network.
pub fn recover<P: AsRef<[f64]>>(
    network: &HopfieldNetwork,
    raw_patterns: &[P],
) -> Result<RecallReport> {
    let patterns: Vec<Vec<f64>> = raw_patterns
        .iter()
        .map(|p| sigmoid_vec(p.as_ref()))
        .collect();

    let settled = network.recall(&patterns)?;
    let recoveries = raw_patterns
        .iter()
        .zip(settled)
        .enumerate()
        .map(|(index, (raw, s))| {
            log::debug!(
                "pattern {} settled in {} iterations, energy {:.6}",
                index,
                s.iterations,
                s.energy
            );
            Recovery {
                index,
                original: raw.as_ref().to_vec(),
                recovered: s.pattern,
                iterations: s.iterations,
                energy: s.energy,
            }
        })
        .collect();

    Ok(RecallReport {
        dim: network.dim(),
        epochs: network.config().epochs,
        recoveries,
    })
}
