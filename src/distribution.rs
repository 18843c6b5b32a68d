//! Distribution CDFs and critical values.
//!
//! Standard normal, Student's t, and F cumulative distribution functions,
//! plus the critical values used to build confidence intervals.
//!
//! Critical values come from fixed textbook tables with a normal fallback,
//! which is the same precision a printed table offers:
//!
//! - [`z_critical`] looks the confidence level up in a z table and falls
//!   back to [`inverse_normal_cdf`] for levels the table does not list.
//! - [`t_critical`] looks up the row for the largest tabulated df ≤ the
//!   requested df. For df ≥ 120, or a confidence level without a column,
//!   it returns the z critical value instead.
//!
//! # Examples
//!
//! ```
//! use u_statlab::distribution::{normal_cdf, t_critical};
//!
//! assert_eq!(normal_cdf(0.0), 0.5);
//! assert_eq!(t_critical(24.0, 0.95).unwrap(), 2.086); // df 24 uses the df 20 row
//! ```

use crate::error::StatResult;
use crate::special::{erf, regularized_incomplete_beta};
use crate::validate;

/// Inverse standard normal CDF (Wichura's AS 241), used for z critical
/// values at confidence levels the z table does not list. Returns NaN
/// outside [0, 1] and −∞ / +∞ at 0 / 1.
pub use u_numflow::special::inverse_normal_cdf;

/// Above this many degrees of freedom [`t_cdf`] uses the normal CDF.
pub const T_NORMAL_CUTOFF_DF: f64 = 100.0;

/// From this many degrees of freedom upward [`t_critical`] uses z.
pub const T_TABLE_MAX_DF: f64 = 120.0;

/// Confidence level tolerance when matching a table column.
const LEVEL_TOLERANCE: f64 = 1e-9;

/// Two-sided z critical values by confidence level.
static Z_TABLE: [(f64, f64); 8] = [
    (0.80, 1.282),
    (0.85, 1.440),
    (0.90, 1.645),
    (0.95, 1.960),
    (0.98, 2.326),
    (0.99, 2.576),
    (0.995, 2.807),
    (0.999, 3.291),
];

/// Confidence levels of the [`T_TABLE`] columns.
static T_LEVELS: [f64; 5] = [0.80, 0.90, 0.95, 0.98, 0.99];

/// Two-sided t critical values by df breakpoint.
static T_TABLE: [(u32, [f64; 5]); 27] = [
    (1, [3.078, 6.314, 12.706, 31.821, 63.657]),
    (2, [1.886, 2.920, 4.303, 6.965, 9.925]),
    (3, [1.638, 2.353, 3.182, 4.541, 5.841]),
    (4, [1.533, 2.132, 2.776, 3.747, 4.604]),
    (5, [1.476, 2.015, 2.571, 3.365, 4.032]),
    (6, [1.440, 1.943, 2.447, 3.143, 3.707]),
    (7, [1.415, 1.895, 2.365, 2.998, 3.499]),
    (8, [1.397, 1.860, 2.306, 2.896, 3.355]),
    (9, [1.383, 1.833, 2.262, 2.821, 3.250]),
    (10, [1.372, 1.812, 2.228, 2.764, 3.169]),
    (11, [1.363, 1.796, 2.201, 2.718, 3.106]),
    (12, [1.356, 1.782, 2.179, 2.681, 3.055]),
    (13, [1.350, 1.771, 2.160, 2.650, 3.012]),
    (14, [1.345, 1.761, 2.145, 2.624, 2.977]),
    (15, [1.341, 1.753, 2.131, 2.602, 2.947]),
    (16, [1.337, 1.746, 2.120, 2.583, 2.921]),
    (17, [1.333, 1.740, 2.110, 2.567, 2.898]),
    (18, [1.330, 1.734, 2.101, 2.552, 2.878]),
    (19, [1.328, 1.729, 2.093, 2.539, 2.861]),
    (20, [1.325, 1.725, 2.086, 2.528, 2.845]),
    (25, [1.316, 1.708, 2.060, 2.485, 2.787]),
    (30, [1.310, 1.697, 2.042, 2.457, 2.750]),
    (40, [1.303, 1.684, 2.021, 2.423, 2.704]),
    (50, [1.299, 1.676, 2.009, 2.403, 2.678]),
    (60, [1.296, 1.671, 2.000, 2.390, 2.660]),
    (80, [1.292, 1.664, 1.990, 2.374, 2.639]),
    (100, [1.290, 1.660, 1.984, 2.364, 2.626]),
];

// ---------------------------------------------------------------------------
// CDFs
// ---------------------------------------------------------------------------

/// Standard normal CDF Φ(z) = P(Z ≤ z).
///
/// Built on the A&S 7.1.26 [`erf`]; maximum absolute error < 1.5 × 10⁻⁷.
/// `normal_cdf(0.0)` is exactly 0.5, and negative arguments are mirrored
/// through `1 - Φ(|z|)`.
///
/// # Examples
/// ```
/// use u_statlab::distribution::normal_cdf;
/// assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
pub fn normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z < 0.0 {
        return 1.0 - normal_cdf(-z);
    }
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Student's t CDF P(T ≤ t) with `df` degrees of freedom.
///
/// For df > 100 the normal CDF is returned; otherwise
/// `1 − ½·I_{df/(df+t²)}(df/2, ½)` for t ≥ 0, and `½·I` for t < 0.
///
/// Returns NaN for non-positive or NaN `df`.
///
/// # Examples
/// ```
/// use u_statlab::distribution::t_cdf;
/// assert!((t_cdf(0.0, 7.0) - 0.5).abs() < 1e-12);
/// // t = 2.228 is the 97.5th percentile at df = 10
/// assert!((t_cdf(2.228, 10.0) - 0.975).abs() < 1e-4);
/// ```
pub fn t_cdf(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if df > T_NORMAL_CUTOFF_DF {
        return normal_cdf(t);
    }
    let ib = regularized_incomplete_beta(df / 2.0, 0.5, df / (df + t * t));
    if t >= 0.0 {
        1.0 - 0.5 * ib
    } else {
        0.5 * ib
    }
}

/// F-distribution CDF P(X ≤ f) with (d1, d2) degrees of freedom.
///
/// Computed as `1 − I_{d2/(d2+d1·f)}(d2/2, d1/2)`. Returns 0 for f ≤ 0 and
/// NaN when either df is non-positive.
///
/// # Examples
/// ```
/// use u_statlab::distribution::f_cdf;
/// // F(1, d2) is t² with d2 df: P(F ≤ 2.228²) = 0.95 at d2 = 10
/// assert!((f_cdf(2.228 * 2.228, 1.0, 10.0) - 0.95).abs() < 1e-3);
/// ```
pub fn f_cdf(f: f64, d1: f64, d2: f64) -> f64 {
    if f.is_nan() || d1.is_nan() || d2.is_nan() || d1 <= 0.0 || d2 <= 0.0 {
        return f64::NAN;
    }
    if f <= 0.0 {
        return 0.0;
    }
    1.0 - regularized_incomplete_beta(d2 / 2.0, d1 / 2.0, d2 / (d2 + d1 * f))
}

// ---------------------------------------------------------------------------
// Critical values
// ---------------------------------------------------------------------------

fn table_column(levels: impl Iterator<Item = f64>, confidence: f64) -> Option<usize> {
    levels
        .enumerate()
        .find(|(_, level)| (level - confidence).abs() < LEVEL_TOLERANCE)
        .map(|(i, _)| i)
}

/// Two-sided z critical value for a confidence level in (0, 1).
///
/// Tabulated levels (0.80, 0.85, 0.90, 0.95, 0.98, 0.99, 0.995, 0.999)
/// return the three-decimal textbook value; any other level is computed
/// with [`inverse_normal_cdf`] at `1 − (1 − confidence)/2`.
///
/// # Errors
/// [`crate::error::StatError::InvalidParameter`] unless 0 < confidence < 1.
///
/// # Examples
/// ```
/// use u_statlab::distribution::z_critical;
/// assert_eq!(z_critical(0.95).unwrap(), 1.960);
/// assert!((z_critical(0.75).unwrap() - 1.1503).abs() < 1e-3);
/// ```
pub fn z_critical(confidence: f64) -> StatResult<f64> {
    validate::open_unit("confidence", confidence)?;
    match table_column(Z_TABLE.iter().map(|&(level, _)| level), confidence) {
        Some(i) => Ok(Z_TABLE[i].1),
        None => Ok(inverse_normal_cdf(1.0 - (1.0 - confidence) / 2.0)),
    }
}

/// Two-sided t critical value for `df` degrees of freedom.
///
/// `df` may be fractional (Welch); it is rounded down to the nearest
/// tabulated breakpoint (1–20, 25, 30, 40, 50, 60, 80, 100). For df ≥ 120,
/// or a confidence level outside {0.80, 0.90, 0.95, 0.98, 0.99}, the z
/// critical value is returned.
///
/// # Errors
/// [`crate::error::StatError::InvalidParameter`] if df < 1 or confidence is outside (0, 1).
///
/// # Examples
/// ```
/// use u_statlab::distribution::t_critical;
/// assert_eq!(t_critical(10.0, 0.95).unwrap(), 2.228);
/// assert_eq!(t_critical(10.7, 0.99).unwrap(), 3.169);
/// assert_eq!(t_critical(500.0, 0.95).unwrap(), 1.960);
/// ```
pub fn t_critical(df: f64, confidence: f64) -> StatResult<f64> {
    validate::at_least_value("df", 1.0, df)?;
    validate::open_unit("confidence", confidence)?;

    if df >= T_TABLE_MAX_DF {
        log::debug!("t_critical: df {} beyond table, using z", df);
        return z_critical(confidence);
    }
    let Some(col) = table_column(T_LEVELS.iter().copied(), confidence) else {
        log::debug!(
            "t_critical: confidence {} not tabulated, using z",
            confidence
        );
        return z_critical(confidence);
    };

    let row = T_TABLE
        .iter()
        .rev()
        .find(|(breakpoint, _)| f64::from(*breakpoint) <= df)
        .unwrap_or(&T_TABLE[0]);
    Ok(row.1[col])
}
