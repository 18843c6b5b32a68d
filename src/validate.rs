//! Input guards shared by the public operations.
//!
//! Each guard logs the rejection at `debug` level before returning it.

use crate::error::{StatError, StatResult};

fn reject<T>(err: StatError) -> StatResult<T> {
    log::debug!("rejected input: {}", err);
    Err(err)
}

pub(crate) fn finite(parameter: &'static str, value: f64) -> StatResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        reject(StatError::InvalidInput {
            context: format!("{} must be a finite number, got {}", parameter, value),
        })
    }
}

pub(crate) fn finite_slice<'a>(context: &str, data: &'a [f64]) -> StatResult<&'a [f64]> {
    if data.is_empty() {
        return reject(StatError::InvalidInput {
            context: format!("{} is empty", context),
        });
    }
    if let Some(i) = data.iter().position(|v| !v.is_finite()) {
        return reject(StatError::InvalidInput {
            context: format!("{} contains a non-finite value at index {}", context, i),
        });
    }
    Ok(data)
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> StatResult<f64> {
    finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        reject(StatError::InvalidParameter {
            parameter,
            message: format!("must be positive, got {}", value),
        })
    }
}

pub(crate) fn non_negative(parameter: &'static str, value: f64) -> StatResult<f64> {
    finite(parameter, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        reject(StatError::InvalidParameter {
            parameter,
            message: format!("must not be negative, got {}", value),
        })
    }
}

/// Real-valued lower bound, inclusive.
pub(crate) fn at_least_value(parameter: &'static str, minimum: f64, value: f64) -> StatResult<f64> {
    finite(parameter, value)?;
    if value >= minimum {
        Ok(value)
    } else {
        reject(StatError::InvalidParameter {
            parameter,
            message: format!("must be at least {}, got {}", minimum, value),
        })
    }
}

/// Closed interval [0, 1].
pub(crate) fn probability(parameter: &'static str, value: f64) -> StatResult<f64> {
    finite(parameter, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        reject(StatError::InvalidParameter {
            parameter,
            message: format!("must lie in [0, 1], got {}", value),
        })
    }
}

/// Open interval (0, 1).
pub(crate) fn open_unit(parameter: &'static str, value: f64) -> StatResult<f64> {
    finite(parameter, value)?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        reject(StatError::InvalidParameter {
            parameter,
            message: format!("must lie strictly between 0 and 1, got {}", value),
        })
    }
}

pub(crate) fn at_least(context: &str, required: usize, actual: usize) -> StatResult<()> {
    if actual >= required {
        Ok(())
    } else {
        reject(StatError::InsufficientData {
            context: context.to_string(),
            required,
            actual,
        })
    }
}

/// Integer parameter with a lower bound (a period, a count of steps).
pub(crate) fn at_least_param(
    parameter: &'static str,
    required: usize,
    actual: usize,
) -> StatResult<usize> {
    if actual >= required {
        Ok(actual)
    } else {
        reject(StatError::InvalidParameter {
            parameter,
            message: format!("must be at least {}, got {}", required, actual),
        })
    }
}

pub(crate) fn same_length(context: &str, left: usize, right: usize) -> StatResult<()> {
    if left == right {
        Ok(())
    } else {
        reject(StatError::LengthMismatch {
            context: context.to_string(),
            left,
            right,
        })
    }
}

pub(crate) fn degenerate<T>(context: impl Into<String>) -> StatResult<T> {
    reject(StatError::Degenerate {
        context: context.into(),
    })
}

pub(crate) fn infeasible<T>(context: impl Into<String>) -> StatResult<T> {
    reject(StatError::Infeasible {
        context: context.into(),
    })
}

pub(crate) fn unbounded<T>(context: impl Into<String>) -> StatResult<T> {
    reject(StatError::Unbounded {
        context: context.into(),
    })
}
