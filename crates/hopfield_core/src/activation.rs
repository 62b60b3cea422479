use alloc::vec::Vec;

/// Logistic sigmoid `1 / (1 + e^-x)`.
///
/// Uses `libm::exp` so `std` and `no_std` builds produce identical bits.
/// Saturates to 0.0 / 1.0 for large |x|.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + libm::exp(-x))
}

/// Derivative of the sigmoid expressed in terms of its output `y`.
///
/// Only used for bookkeeping; recall never takes a gradient step.
#[inline]
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Elementwise sigmoid over a pattern.
pub fn sigmoid_vec(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&x| sigmoid(x)).collect()
}

/// Neuron non-linearity applied after the weighted sum.
pub trait Activation {
    fn activate(&self, x: f64) -> f64;

    /// Slope at output `y`.
    fn derivative(&self, y: f64) -> f64;

    fn activate_into(&self, input: &[f64], out: &mut [f64]) {
        for (o, &x) in out.iter_mut().zip(input) {
            *o = self.activate(x);
        }
    }
}

/// The logistic activation used by [`crate::recall::settle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    #[inline]
    fn activate(&self, x: f64) -> f64 {
        sigmoid(x)
    }

    #[inline]
    fn derivative(&self, y: f64) -> f64 {
        sigmoid_derivative(y)
    }
}
