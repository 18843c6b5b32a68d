//! Descriptive statistics and standard errors.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation, O(ε) error independent of n.
//! - **Variance**: Welford's online update with Bessel's correction (n − 1).
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//!
//! Data can arrive either as raw observations or as already-summarised
//! statistics typed in by the user; [`SampleSummary`] is the common form
//! both are reduced to before any inference is run.
//!
//! The kernels are `u_numflow::stats::{mean, variance}`; this module adds
//! validation and error reporting around them.
//!
//! # Examples
//!
//! ```
//! use u_statlab::descriptive::{mean, std_dev, SampleSummary};
//!
//! let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! assert_eq!(mean(&data).unwrap(), 5.0);
//! assert!((std_dev(&data).unwrap() - 2.138089935299395).abs() < 1e-12);
//!
//! let s = SampleSummary::from_data(&data).unwrap();
//! assert_eq!(s.n, 8);
//! ```

use u_numflow::stats;

use crate::error::{StatError, StatResult};
use crate::validate;

/// Arithmetic mean.
///
/// # Errors
/// `InvalidInput` if `data` is empty or contains NaN/infinite values.
pub fn mean(data: &[f64]) -> StatResult<f64> {
    validate::finite_slice("sample", data)?;
    stats::mean(data).ok_or_else(|| StatError::InvalidInput {
        context: "sample mean is undefined".to_string(),
    })
}

/// Sample variance with Bessel's correction (denominator n − 1).
///
/// # Errors
/// `InvalidInput` for non-finite data, `InsufficientData` if n < 2.
///
/// # Examples
/// ```
/// use u_statlab::descriptive::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 32.0 / 7.0).abs() < 1e-12);
/// ```
pub fn variance(data: &[f64]) -> StatResult<f64> {
    validate::finite_slice("sample", data)?;
    validate::at_least("sample observations", 2, data.len())?;
    stats::variance(data)
        .map(|v| v.max(0.0))
        .ok_or_else(|| StatError::InvalidInput {
            context: "sample variance is undefined".to_string(),
        })
}

/// Sample standard deviation, `√variance`.
pub fn std_dev(data: &[f64]) -> StatResult<f64> {
    variance(data).map(f64::sqrt)
}

/// Standard error of the mean, σ/√n.
///
/// # Errors
/// `InvalidParameter` if σ is not positive or n is zero.
///
/// # Examples
/// ```
/// use u_statlab::descriptive::standard_error_mean;
/// assert_eq!(standard_error_mean(15.0, 25).unwrap(), 3.0);
/// ```
pub fn standard_error_mean(sigma: f64, n: usize) -> StatResult<f64> {
    validate::positive("sigma", sigma)?;
    validate::positive("n", n as f64)?;
    Ok(sigma / (n as f64).sqrt())
}

/// Standard error of a proportion, √(p(1−p)/n).
///
/// # Errors
/// `InvalidParameter` if p is outside [0, 1] or n is zero.
///
/// # Examples
/// ```
/// use u_statlab::descriptive::standard_error_proportion;
/// assert!((standard_error_proportion(0.5, 100).unwrap() - 0.05).abs() < 1e-15);
/// ```
pub fn standard_error_proportion(p: f64, n: usize) -> StatResult<f64> {
    validate::probability("p", p)?;
    validate::positive("n", n as f64)?;
    Ok((p * (1.0 - p) / n as f64).sqrt())
}

/// Mean, sample standard deviation, and size of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Sample mean x̄.
    pub mean: f64,
    /// Sample standard deviation s (or a known σ when the caller supplies one).
    pub std_dev: f64,
    /// Number of observations.
    pub n: usize,
}

impl SampleSummary {
    /// Builds a summary from statistics entered directly.
    ///
    /// # Errors
    /// `InvalidInput` for a non-finite mean, `InvalidParameter` for a
    /// negative or non-finite standard deviation or n = 0.
    pub fn new(mean: f64, std_dev: f64, n: usize) -> StatResult<Self> {
        validate::finite("mean", mean)?;
        validate::non_negative("std_dev", std_dev)?;
        validate::positive("n", n as f64)?;
        Ok(Self { mean, std_dev, n })
    }

    /// Summarises raw observations (requires at least two).
    pub fn from_data(data: &[f64]) -> StatResult<Self> {
        Ok(Self {
            mean: mean(data)?,
            std_dev: std_dev(data)?,
            n: data.len(),
        })
    }

    /// Sample variance s².
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Standard error of the mean, s/√n.
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.n as f64).sqrt()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e6_f64..1e6, min..=max)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn variance_non_negative(data in finite_vec(2, 100)) {
            prop_assert!(variance(&data).unwrap() >= 0.0);
        }

        #[test]
        fn variance_shift_invariant(data in finite_vec(2, 50), shift in -1e3_f64..1e3) {
            let shifted: Vec<f64> = data.iter().map(|x| x + shift).collect();
            let a = variance(&data).unwrap();
            let b = variance(&shifted).unwrap();
            prop_assert!((a - b).abs() <= 1e-6 * a.max(1.0), "{} vs {}", a, b);
        }

        #[test]
        fn mean_within_range(data in finite_vec(1, 100)) {
            let m = mean(&data).unwrap();
            let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-9 && m <= hi + 1e-9);
        }
    }
}
