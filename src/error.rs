//! Error types for statistical computations.

use std::fmt;

/// Result type for statistical computations.
pub type StatResult<T> = Result<T, StatError>;

/// Reasons a computation was rejected.
///
/// Every public operation validates its input before touching the numeric
/// kernels, so a caller either receives a finite result or one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    /// Malformed input such as an empty sequence or a NaN/infinite value.
    InvalidInput { context: String },

    /// A parameter lies outside its mathematical domain.
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    /// Two sequences that must be aligned have different lengths.
    LengthMismatch {
        context: String,
        left: usize,
        right: usize,
    },

    /// Not enough observations (or groups) for the requested statistic.
    InsufficientData {
        context: String,
        required: usize,
        actual: usize,
    },

    /// Input is well-formed but the statistic is undefined for it
    /// (zero variance, zero standard error, zero moving average).
    Degenerate { context: String },

    /// The problem has no solution: an LP without a feasible vertex, or a
    /// required sample larger than the population.
    Infeasible { context: String },

    /// The LP objective improves without bound over the feasible region.
    Unbounded { context: String },
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { context } => write!(f, "invalid input: {}", context),
            Self::InvalidParameter { parameter, message } => {
                write!(f, "invalid parameter '{}': {}", parameter, message)
            }
            Self::LengthMismatch {
                context,
                left,
                right,
            } => write!(
                f,
                "{}: sequences must have equal length (got {} and {})",
                context, left, right
            ),
            Self::InsufficientData {
                context,
                required,
                actual,
            } => write!(
                f,
                "{}: at least {} required, got {}",
                context, required, actual
            ),
            Self::Degenerate { context } => write!(f, "degenerate input: {}", context),
            Self::Infeasible { context } => write!(f, "infeasible: {}", context),
            Self::Unbounded { context } => write!(f, "unbounded: {}", context),
        }
    }
}

impl std::error::Error for StatError {}
