//! Sample-size planning.
//!
//! Required sample sizes for estimating a proportion or a mean to within a
//! margin of error E:
//!
//! ```text
//! proportion: n₀ = ⌈z² · p(1−p) / E²⌉
//! mean:       n₀ = ⌈z² · σ² / E²⌉
//! ```
//!
//! When the population size N is known the finite population correction
//! `n = ⌈n₀ / (1 + (n₀ − 1)/N)⌉` is applied. An initial size n₀ larger than
//! N is reported as infeasible rather than clamped.
//!
//! # Examples
//!
//! ```
//! use u_statlab::sample_size::sample_size_proportion;
//!
//! let plan = sample_size_proportion(1.96, 0.5, 0.05, None).unwrap();
//! assert_eq!(plan.required, 385);
//!
//! let plan = sample_size_proportion(1.96, 0.5, 0.05, Some(1000)).unwrap();
//! assert_eq!(plan.initial, 385);
//! assert_eq!(plan.required, 279);
//! ```

use crate::distribution::z_critical;
use crate::error::StatResult;
use crate::validate;

/// A sample-size plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSize {
    /// n₀, the size for an infinite population.
    pub initial: u64,
    /// Size after finite population correction (equals `initial` when no
    /// population was given).
    pub required: u64,
    /// Population size N, if known.
    pub population: Option<u64>,
}

fn plan(raw_initial: f64, population: Option<u64>) -> StatResult<SampleSize> {
    // `as u64` saturates, so anything at or past the top must be caught here
    if !(raw_initial.ceil() < u64::MAX as f64) {
        return validate::infeasible(format!(
            "required sample of {:e} is not representable as a count",
            raw_initial
        ));
    }
    let initial = raw_initial.ceil() as u64;
    let required = match population {
        None => initial,
        Some(big_n) => {
            validate::positive("population", big_n as f64)?;
            if initial > big_n {
                return validate::infeasible(format!(
                    "required sample of {} exceeds the population of {}",
                    initial, big_n
                ));
            }
            let n0 = initial as f64;
            (n0 / (1.0 + (n0 - 1.0) / big_n as f64)).ceil() as u64
        }
    };
    Ok(SampleSize {
        initial,
        required,
        population,
    })
}

/// Sample size for estimating a proportion.
///
/// `p` is the anticipated proportion (0.5 when nothing is known gives the
/// most conservative size).
///
/// # Errors
/// `InvalidParameter` unless z > 0, 0 < p < 1, 0 < E < 1, and N ≥ 1;
/// `Infeasible` if n₀ > N.
pub fn sample_size_proportion(
    z: f64,
    p: f64,
    margin: f64,
    population: Option<u64>,
) -> StatResult<SampleSize> {
    validate::positive("z", z)?;
    validate::open_unit("p", p)?;
    validate::open_unit("margin", margin)?;
    plan(z * z * (p * (1.0 - p)) / (margin * margin), population)
}

/// Sample size for estimating a mean with population standard deviation σ.
///
/// # Errors
/// `InvalidParameter` unless z, σ, and E are positive and N ≥ 1;
/// `Infeasible` if n₀ > N or n₀ is too large to count.
///
/// # Examples
///
/// ```
/// use u_statlab::sample_size::sample_size_mean;
///
/// // z = 1.96, σ = 15, E = 3 ⇒ ⌈96.04⌉
/// assert_eq!(sample_size_mean(1.96, 15.0, 3.0, None).unwrap().required, 97);
/// ```
pub fn sample_size_mean(
    z: f64,
    sigma: f64,
    margin: f64,
    population: Option<u64>,
) -> StatResult<SampleSize> {
    validate::positive("z", z)?;
    validate::positive("sigma", sigma)?;
    validate::positive("margin", margin)?;
    plan(z * z * sigma * sigma / (margin * margin), population)
}

/// [`sample_size_proportion`] with z taken from a confidence level.
pub fn sample_size_proportion_for_confidence(
    confidence: f64,
    p: f64,
    margin: f64,
    population: Option<u64>,
) -> StatResult<SampleSize> {
    sample_size_proportion(z_critical(confidence)?, p, margin, population)
}

/// [`sample_size_mean`] with z taken from a confidence level.
pub fn sample_size_mean_for_confidence(
    confidence: f64,
    sigma: f64,
    margin: f64,
    population: Option<u64>,
) -> StatResult<SampleSize> {
    sample_size_mean(z_critical(confidence)?, sigma, margin, population)
}
