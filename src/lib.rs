//! # u-statlab
//!
//! Numerical engine for introductory statistics: distribution functions,
//! confidence intervals, hypothesis tests, sample-size planning, one-way
//! ANOVA, simple regression, seasonal indices, and a two-variable linear
//! programming solver.
//!
//! Every operation is a pure function over numeric input. Invalid input is
//! rejected with a [`error::StatError`] before it reaches the numeric
//! kernels, so no public operation returns NaN or an infinite statistic.
//!
//! ## Modules
//!
//! - [`special`]: log-gamma, error function, regularized incomplete beta
//! - [`distribution`]: normal, Student's t, and F CDFs; z and t critical values
//! - [`descriptive`]: mean, standard deviation, standard errors, [`descriptive::SampleSummary`]
//! - [`interval`]: confidence intervals for means and proportions
//! - [`testing`]: z-tests, one-sample, two-sample and paired t-tests, proportion tests
//! - [`sample_size`]: required sample sizes with finite population correction
//! - [`anova`]: one-way analysis of variance
//! - [`regression`]: simple ordinary least squares
//! - [`seasonal`]: ratio-to-moving-average seasonal decomposition
//! - [`linprog`]: graphical (corner-point) LP solver for two variables
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade at `debug` level (rejected
//! input, critical-value fallbacks, LP enumeration counts). The crate never
//! installs a logger.

pub mod anova;
pub mod descriptive;
pub mod distribution;
pub mod error;
pub mod interval;
pub mod linprog;
pub mod regression;
pub mod sample_size;
pub mod seasonal;
pub mod special;
pub mod testing;
mod validate;

pub use error::{StatError, StatResult};
