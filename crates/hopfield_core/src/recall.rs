//! Recall Engine: iterate `a <- sigmoid(W · a)` to a fixed point.
//!
//! Each call owns its activation vector; the weight matrix is only read.
//! Termination is bounded by `max_iterations` and, optionally, by a
//! [`CancelToken`].

use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::activation::{Activation, Sigmoid};
use crate::cancel::CancelToken;
use crate::error::{HopfieldError, Result, ShapeError};
use crate::weights::WeightMatrix;

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// When two consecutive activation vectors count as "the same".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ConvergenceCriterion {
    /// Bit-for-bit equality of every element.
    #[default]
    Exact,
    /// Every elementwise absolute difference at most the bound, so a bound of
    /// zero behaves like `Exact`. NaN never counts as settled.
    Tolerance(f64),
}

impl ConvergenceCriterion {
    pub fn is_settled(self, current: &[f64], next: &[f64]) -> bool {
        match self {
            ConvergenceCriterion::Exact => current == next,
            ConvergenceCriterion::Tolerance(eps) => current
                .iter()
                .zip(next)
                .all(|(a, b)| libm::fabs(a - b) <= eps),
        }
    }

    /// A tolerance must be finite and non-negative.
    pub fn validate(self) -> Result<()> {
        match self {
            ConvergenceCriterion::Tolerance(eps) if !(eps.is_finite() && eps >= 0.0) => {
                Err(HopfieldError::InvalidTolerance { tolerance: eps })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleOptions {
    pub max_iterations: usize,
    pub criterion: ConvergenceCriterion,
}

impl Default for SettleOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            criterion: ConvergenceCriterion::Exact,
        }
    }
}

/// A settled activation vector plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settled {
    pub pattern: Vec<f64>,
    /// Update steps applied, including the final confirming step.
    pub iterations: usize,
    pub energy: f64,
}

/// Hopfield energy `-½ Σᵢ aᵢ (W·a)ᵢ`.
pub fn energy(weights: &WeightMatrix, activation: &[f64]) -> Result<f64> {
    check_len(weights, activation)?;
    Ok(energy_unchecked(weights, activation))
}

fn energy_unchecked(weights: &WeightMatrix, activation: &[f64]) -> f64 {
    let field = weights.mul_vec(activation);
    let sum: f64 = activation.iter().zip(&field).map(|(a, h)| a * h).sum();
    -sum / 2.0
}

/// One synchronous update: `sigmoid(W · current)`.
pub fn update_activation(weights: &WeightMatrix, current: &[f64]) -> Result<Vec<f64>> {
    check_len(weights, current)?;
    let mut next = vec![0.0; weights.dim()];
    update_into(&Sigmoid, weights, current, &mut next);
    Ok(next)
}

/// True when one more update reproduces `pattern` exactly.
pub fn is_fixed_point(weights: &WeightMatrix, pattern: &[f64]) -> bool {
    update_activation(weights, pattern).is_ok_and(|next| next == pattern)
}

/// Settle `pattern` with exact-equality convergence.
///
/// `max_iterations` defaults to [`DEFAULT_MAX_ITERATIONS`].
pub fn settle(
    weights: &WeightMatrix,
    pattern: &[f64],
    max_iterations: Option<usize>,
) -> Result<Vec<f64>> {
    let options = SettleOptions {
        max_iterations: max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
        ..SettleOptions::default()
    };
    settle_with(weights, pattern, &options, None).map(|settled| settled.pattern)
}

pub fn settle_with(
    weights: &WeightMatrix,
    pattern: &[f64],
    options: &SettleOptions,
    cancel: Option<&CancelToken>,
) -> Result<Settled> {
    settle_with_activation(&Sigmoid, weights, pattern, options, cancel)
}

/// Settle loop over an arbitrary [`Activation`].
pub fn settle_with_activation<A: Activation>(
    activation: &A,
    weights: &WeightMatrix,
    pattern: &[f64],
    options: &SettleOptions,
    cancel: Option<&CancelToken>,
) -> Result<Settled> {
    check_len(weights, pattern)?;
    options.criterion.validate()?;

    let mut current = pattern.to_vec();
    let mut next = vec![0.0; current.len()];
    let mut iterations = 0;

    loop {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(HopfieldError::Cancelled { iterations });
        }
        if iterations >= options.max_iterations {
            log::warn!("no fixed point after {} iterations", iterations);
            return Err(HopfieldError::Convergence { iterations });
        }

        update_into(activation, weights, &current, &mut next);
        iterations += 1;

        let settled = options.criterion.is_settled(&current, &next);
        core::mem::swap(&mut current, &mut next);
        if settled {
            break;
        }
    }

    let energy = energy_unchecked(weights, &current);
    log::debug!(
        "settled after {} iterations, energy {:.6}",
        iterations,
        energy
    );
    Ok(Settled {
        pattern: current,
        iterations,
        energy,
    })
}

fn update_into<A: Activation>(
    activation: &A,
    weights: &WeightMatrix,
    current: &[f64],
    next: &mut [f64],
) {
    weights.mul_vec_into(current, next);
    for v in next.iter_mut() {
        *v = activation.activate(*v);
    }
}

fn check_len(weights: &WeightMatrix, pattern: &[f64]) -> Result<()> {
    if pattern.len() != weights.dim() {
        return Err(ShapeError::LengthMismatch {
            index: 0,
            expected: weights.dim(),
            actual: pattern.len(),
        }
        .into());
    }
    Ok(())
}
