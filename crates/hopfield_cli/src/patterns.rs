//! Pattern sources for the driver.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Damaged renderings of two reference digits; the third is a noisier copy
/// of the first.
pub const DAMAGED_DIGITS: [[f64; 4]; 3] = [
    [0.9, 0.1, 0.1, 0.9],
    [0.1, 0.9, 0.9, 0.1],
    [0.8, 0.2, 0.2, 0.8],
];

pub fn demo_patterns() -> Vec<Vec<f64>> {
    DAMAGED_DIGITS.iter().map(|p| p.to_vec()).collect()
}

/// Parse a JSON array of number arrays, e.g. `[[0.9, 0.1], [0.1, 0.9]]`.
///
/// Only the JSON shape is checked here; equal lengths are enforced by the
/// weight builder so its error names the offending pattern.
pub fn parse_patterns(json: &str) -> Result<Vec<Vec<f64>>> {
    serde_json::from_str(json).context("patterns must be a JSON array of number arrays")
}

pub fn load_patterns(path: &Path) -> Result<Vec<Vec<f64>>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading patterns from {}", path.display()))?;
    parse_patterns(&content).with_context(|| format!("parsing {}", path.display()))
}
