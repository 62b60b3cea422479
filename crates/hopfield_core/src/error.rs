//! Error taxonomy for weight construction and recall.
//!
//! Every variant is fatal for the call that produced it. The orchestrator
//! never returns partial results; it wraps the first failure in
//! [`HopfieldError::Pattern`] so callers can name the offending input.

use alloc::boxed::Box;
use core::fmt;

/// Malformed input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// No patterns were supplied.
    EmptyPatterns,
    /// A pattern with zero neurons.
    EmptyPattern { index: usize },
    /// A pattern whose length differs from the first pattern (or the network).
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// Flat matrix data that is not N×N.
    NotSquare { len: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::EmptyPatterns => write!(f, "no patterns supplied"),
            ShapeError::EmptyPattern { index } => {
                write!(f, "pattern {} has zero length", index)
            }
            ShapeError::LengthMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "pattern {} has length {}, expected {}",
                index, actual, expected
            ),
            ShapeError::NotSquare { len } => {
                write!(f, "{} matrix entries do not form a square matrix", len)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HopfieldError {
    /// Input patterns empty, zero-length or ragged.
    Shape(ShapeError),
    /// Weight normalization would divide by a zero (or non-finite) deviation.
    DegenerateWeights { std_dev: f64 },
    /// No fixed point reached within the iteration cap.
    Convergence { iterations: usize },
    /// The settle loop observed a cancelled or expired token.
    Cancelled { iterations: usize },
    /// A convergence tolerance that is negative or not finite.
    InvalidTolerance { tolerance: f64 },
    /// A failure attributed to one input pattern.
    Pattern {
        index: usize,
        source: Box<HopfieldError>,
    },
}

impl HopfieldError {
    /// Stable short label for the failure, ignoring pattern context.
    pub fn kind(&self) -> &'static str {
        match self {
            HopfieldError::Shape(_) => "shape",
            HopfieldError::DegenerateWeights { .. } => "degenerate_weights",
            HopfieldError::Convergence { .. } => "convergence",
            HopfieldError::Cancelled { .. } => "cancelled",
            HopfieldError::InvalidTolerance { .. } => "invalid_tolerance",
            HopfieldError::Pattern { source, .. } => source.kind(),
        }
    }

    /// Index of the offending pattern, when one is known.
    pub fn pattern_index(&self) -> Option<usize> {
        match self {
            HopfieldError::Pattern { index, .. } => Some(*index),
            HopfieldError::Shape(ShapeError::EmptyPattern { index })
            | HopfieldError::Shape(ShapeError::LengthMismatch { index, .. }) => Some(*index),
            _ => None,
        }
    }

    /// The underlying error with any pattern context removed.
    pub fn root(&self) -> &HopfieldError {
        match self {
            HopfieldError::Pattern { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn at_pattern(self, index: usize) -> Self {
        match self {
            already @ HopfieldError::Pattern { .. } => already,
            other => HopfieldError::Pattern {
                index,
                source: Box::new(other),
            },
        }
    }
}

impl From<ShapeError> for HopfieldError {
    fn from(err: ShapeError) -> Self {
        HopfieldError::Shape(err)
    }
}

impl fmt::Display for HopfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopfieldError::Shape(e) => write!(f, "shape error: {}", e),
            HopfieldError::DegenerateWeights { std_dev } => write!(
                f,
                "degenerate weights: standard deviation {} cannot normalize the matrix",
                std_dev
            ),
            HopfieldError::Convergence { iterations } => write!(
                f,
                "no fixed point reached after {} iterations",
                iterations
            ),
            HopfieldError::Cancelled { iterations } => {
                write!(f, "recall cancelled after {} iterations", iterations)
            }
            HopfieldError::InvalidTolerance { tolerance } => write!(
                f,
                "invalid tolerance {}: must be finite and non-negative",
                tolerance
            ),
            HopfieldError::Pattern { index, source } => {
                write!(f, "pattern {}: {}", index, source)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShapeError {}

#[cfg(feature = "std")]
impl std::error::Error for HopfieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HopfieldError::Shape(e) => Some(e),
            HopfieldError::Pattern { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, HopfieldError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_pattern_context_keeps_kind() {
        let err = HopfieldError::Convergence { iterations: 10 }.at_pattern(2);
        assert_eq!(err.kind(), "convergence");
        assert_eq!(err.pattern_index(), Some(2));
        assert_eq!(err.root(), &HopfieldError::Convergence { iterations: 10 });
        assert_eq!(
            err.to_string(),
            "pattern 2: no fixed point reached after 10 iterations"
        );
    }

    #[test]
    fn test_context_is_not_nested_twice() {
        let err = HopfieldError::Cancelled { iterations: 1 }
            .at_pattern(1)
            .at_pattern(5);
        assert_eq!(err.pattern_index(), Some(1));
    }

    #[test]
    fn test_shape_index_is_reported() {
        let err: HopfieldError = ShapeError::LengthMismatch {
            index: 1,
            expected: 2,
            actual: 3,
        }
        .into();
        assert_eq!(err.kind(), "shape");
        assert_eq!(err.pattern_index(), Some(1));
    }
}
