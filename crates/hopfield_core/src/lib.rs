//! # hopfield_core
//!
//! Associative-memory recall in the Hopfield family: build an outer-product
//! weight matrix from a handful of reference patterns, then iterate
//! `a <- sigmoid(W · a)` until a (possibly degraded) input reaches a fixed
//! point.
//!
//! ```rust
//! use hopfield_core::{recall_all, DEFAULT_EPOCHS};
//!
//! let damaged = [
//!     [0.9, 0.1, 0.1, 0.9],
//!     [0.1, 0.9, 0.9, 0.1],
//!     [0.8, 0.2, 0.2, 0.8],
//! ];
//! let recovered = recall_all(&damaged, DEFAULT_EPOCHS).unwrap();
//! assert_eq!(recovered.len(), 3);
//! ```
//!
//! Design constraints:
//! - Builds on `core` + `alloc` with default features off; `std` (default)
//!   adds wall-clock deadlines and `std::error::Error`
//! - Deterministic: fixed summation order and `libm` transcendental
//!   functions, so repeated runs are bit-identical
//! - Weights are read-only once built; every settle call owns its state

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod activation;
pub mod cancel;
pub mod config;
pub mod error;
pub mod network;
pub mod recall;
pub mod weights;

pub use activation::{sigmoid, sigmoid_derivative, sigmoid_vec, Activation, Sigmoid};
pub use cancel::CancelToken;
pub use config::{RecallConfig, DEFAULT_EPOCHS};
pub use error::{HopfieldError, Result, ShapeError};
pub use network::{recall_all, recall_all_with, recover, HopfieldNetwork, RecallReport, Recovery};
pub use recall::{
    energy, is_fixed_point, settle, settle_with, update_activation, ConvergenceCriterion,
    SettleOptions, Settled, DEFAULT_MAX_ITERATIONS,
};
pub use weights::{build_weights, WeightMatrix};

/// A fixed-length vector of neuron activations.
pub type Pattern = alloc::vec::Vec<f64>;
