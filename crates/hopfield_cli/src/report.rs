//! Reporting collaborator: turns recall results into text or JSON.

use anyhow::Result;
use hopfield_core::{sigmoid_vec, HopfieldNetwork, RecallReport};
use serde::Serialize;
use std::fmt::Write;

use crate::config::OutputFormat;

/// The normalized weight matrix and the energy of each preprocessed input.
#[derive(Debug, Clone, Serialize)]
pub struct WeightsReport {
    pub dim: usize,
    pub rows: Vec<Vec<f64>>,
    pub energies: Vec<f64>,
}

impl WeightsReport {
    pub fn new(network: &HopfieldNetwork, raw_patterns: &[Vec<f64>]) -> Result<Self> {
        let rows = network.weights().rows().map(<[f64]>::to_vec).collect();
        let energies = raw_patterns
            .iter()
            .map(|p| network.energy(&sigmoid_vec(p)))
            .collect::<hopfield_core::Result<Vec<f64>>>()?;
        Ok(Self {
            dim: network.dim(),
            rows,
            energies,
        })
    }
}

pub fn format_vector(values: &[f64], precision: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect();
    format!("[{}]", parts.join(", "))
}

pub fn render_recall(
    report: &RecallReport,
    format: OutputFormat,
    precision: usize,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for r in &report.recoveries {
                writeln!(
                    out,
                    "Damaged pattern: {}, Recovered pattern: {}  (iterations={}, energy={:.*})",
                    format_vector(&r.original, precision),
                    format_vector(&r.recovered, precision),
                    r.iterations,
                    precision,
                    r.energy
                )?;
            }
            Ok(out)
        }
    }
}

pub fn render_weights(
    report: &WeightsReport,
    format: OutputFormat,
    precision: usize,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "Weight matrix ({}x{}):", report.dim, report.dim)?;
            for row in &report.rows {
                writeln!(out, "  {}", format_vector(row, precision))?;
            }
            for (i, e) in report.energies.iter().enumerate() {
                writeln!(out, "Energy of pattern {}: {:.*}", i, precision, e)?;
            }
            Ok(out)
        }
    }
}
