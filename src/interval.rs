//! Confidence intervals.
//!
//! Every interval is `estimate ± critical · SE`. Critical values come from
//! [`crate::distribution::z_critical`] or [`crate::distribution::t_critical`],
//! so they carry the same table precision a printed textbook table has.
//!
//! # Examples
//!
//! ```
//! use u_statlab::interval::proportion_interval;
//!
//! // 45 of 100 respondents, 95% confidence
//! let ci = proportion_interval(0.45, 100, 0.95).unwrap();
//! assert!((ci.margin_of_error - 0.0975).abs() < 1e-3);
//! assert!(ci.lower < 0.45 && ci.upper > 0.45);
//! ```

use crate::descriptive::SampleSummary;
use crate::distribution::{t_critical, z_critical};
use crate::error::StatResult;
use crate::validate;

/// A two-sided confidence interval and the pieces it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Point estimate.
    pub estimate: f64,
    /// Standard error of the estimate.
    pub standard_error: f64,
    /// z or t critical value.
    pub critical_value: f64,
    /// critical · SE.
    pub margin_of_error: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Degrees of freedom when a t critical value was used.
    pub df: Option<f64>,
}

impl ConfidenceInterval {
    /// Returns `true` if `value` lies within [lower, upper].
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Interval width, upper − lower.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Builds `estimate ± critical · se` from already-computed parts.
///
/// # Errors
/// `InvalidInput` for non-finite arguments, `InvalidParameter` for a
/// negative SE or a non-positive critical value.
pub fn confidence_interval(
    estimate: f64,
    standard_error: f64,
    critical_value: f64,
) -> StatResult<ConfidenceInterval> {
    validate::finite("estimate", estimate)?;
    validate::non_negative("standard_error", standard_error)?;
    validate::positive("critical_value", critical_value)?;
    Ok(build(estimate, standard_error, critical_value, None))
}

fn build(estimate: f64, se: f64, critical: f64, df: Option<f64>) -> ConfidenceInterval {
    let margin = critical * se;
    ConfidenceInterval {
        estimate,
        standard_error: se,
        critical_value: critical,
        margin_of_error: margin,
        lower: estimate - margin,
        upper: estimate + margin,
        df,
    }
}

/// z-interval for a mean with known σ (`sample.std_dev` is taken as σ).
///
/// # Errors
/// `InvalidParameter` for a confidence level outside (0, 1) or σ = 0.
pub fn mean_interval_z(sample: &SampleSummary, confidence: f64) -> StatResult<ConfidenceInterval> {
    let z = z_critical(confidence)?;
    validate::positive("sigma", sample.std_dev)?;
    Ok(build(sample.mean, sample.standard_error(), z, None))
}

/// t-interval for a mean with unknown σ, df = n − 1.
///
/// # Errors
/// `InsufficientData` if n < 2, `InvalidParameter` for a confidence level
/// outside (0, 1).
///
/// # Examples
///
/// ```
/// use u_statlab::descriptive::SampleSummary;
/// use u_statlab::interval::mean_interval_t;
///
/// let s = SampleSummary::new(50.0, 8.0, 16).unwrap();
/// let ci = mean_interval_t(&s, 0.95).unwrap();
/// assert_eq!(ci.critical_value, 2.131); // df = 15
/// assert!((ci.margin_of_error - 4.262).abs() < 1e-9);
/// ```
pub fn mean_interval_t(sample: &SampleSummary, confidence: f64) -> StatResult<ConfidenceInterval> {
    validate::at_least("interval observations", 2, sample.n)?;
    let df = (sample.n - 1) as f64;
    let t = t_critical(df, confidence)?;
    Ok(build(sample.mean, sample.standard_error(), t, Some(df)))
}

/// z-interval for a proportion using the sample standard error
/// √(p̂(1−p̂)/n). Bounds are clamped to [0, 1].
///
/// # Errors
/// `InvalidParameter` for p̂ outside [0, 1], n = 0, or a confidence level
/// outside (0, 1).
pub fn proportion_interval(p_hat: f64, n: usize, confidence: f64) -> StatResult<ConfidenceInterval> {
    validate::probability("p_hat", p_hat)?;
    validate::positive("n", n as f64)?;
    let z = z_critical(confidence)?;
    let se = (p_hat * (1.0 - p_hat) / n as f64).sqrt();
    let mut ci = build(p_hat, se, z, None);
    ci.lower = ci.lower.max(0.0);
    ci.upper = ci.upper.min(1.0);
    Ok(ci)
}
