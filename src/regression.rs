//! Simple linear regression.
//!
//! Ordinary least squares for y = intercept + slope · x, with R², the
//! standard errors of both coefficients, and per-observation predictions
//! and residuals.
//!
//! # Examples
//!
//! ```
//! use u_statlab::regression::simple_linear_regression;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.1, 3.9, 6.1, 7.9, 10.1];
//! let result = simple_linear_regression(&x, &y).unwrap();
//! assert!((result.slope - 2.0).abs() < 0.1);
//! assert!((result.intercept - 0.1).abs() < 0.2);
//! assert!(result.r_squared > 0.99);
//! ```

use u_numflow::stats;

use crate::distribution::t_cdf;
use crate::error::StatResult;
use crate::validate;

/// Result of a simple linear regression: y = intercept + slope · x.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionResult {
    /// Slope coefficient (β₁).
    pub slope: f64,
    /// Intercept (β₀).
    pub intercept: f64,
    /// Coefficient of determination, in [0, 1].
    pub r_squared: f64,
    /// Adjusted R² = 1 − (1 − R²)(n − 1)/(n − 2).
    pub adjusted_r_squared: f64,
    /// Standard error of the slope, √(MSE/Sxx).
    pub slope_se: f64,
    /// Standard error of the intercept, √(MSE(1/n + x̄²/Sxx)).
    pub intercept_se: f64,
    /// Mean squared error, SS_residual/(n − 2).
    pub mse: f64,
    /// Residual standard error, √MSE.
    pub residual_se: f64,
    /// t-statistic for H₀: β₁ = 0; `None` for a perfect fit (SE = 0) or
    /// when slope/SE overflows.
    pub slope_t: Option<f64>,
    /// Two-sided p-value for the slope, df = n − 2; `None` whenever
    /// `slope_t` is.
    pub slope_p_value: Option<f64>,
    /// Fitted values ŷᵢ, index-aligned with the input.
    pub predictions: Vec<f64>,
    /// Residuals yᵢ − ŷᵢ, index-aligned with the input.
    pub residuals: Vec<f64>,
    /// Number of observations.
    pub n: usize,
}

impl RegressionResult {
    /// Predicted y at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Residual degrees of freedom, n − 2.
    pub fn df(&self) -> usize {
        self.n - 2
    }
}

/// Fits y = intercept + slope · x by ordinary least squares.
///
/// # Algorithm
///
/// ```text
/// slope = Sxy / Sxx,  intercept = ȳ − slope · x̄
/// R² = 1 − SS_residual / Syy
/// ```
///
/// # Errors
///
/// `LengthMismatch` if x and y differ in length, `InsufficientData` for
/// n < 3, `InvalidInput` for non-finite values, `Degenerate` if every x is
/// the same.
///
/// # References
///
/// Draper & Smith (1998). "Applied Regression Analysis", 3rd edition.
///
/// # Examples
///
/// ```
/// use u_statlab::regression::simple_linear_regression;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let r = simple_linear_regression(&x, &y).unwrap();
/// assert!((r.slope - 2.0).abs() < 1e-10);
/// assert!(r.intercept.abs() < 1e-10);
/// assert!((r.r_squared - 1.0).abs() < 1e-10);
/// ```
pub fn simple_linear_regression(x: &[f64], y: &[f64]) -> StatResult<RegressionResult> {
    validate::same_length("regression x/y", x.len(), y.len())?;
    validate::at_least("regression observations", 3, x.len())?;
    validate::finite_slice("x", x)?;
    validate::finite_slice("y", y)?;

    let n = x.len();
    let nf = n as f64;
    let x_mean = stats::kahan_sum(x) / nf;
    let y_mean = stats::kahan_sum(y) / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 {
        return validate::degenerate("regression: all x values are equal");
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let predictions: Vec<f64> = x.iter().map(|&xi| intercept + slope * xi).collect();
    let residuals: Vec<f64> = y
        .iter()
        .zip(&predictions)
        .map(|(&yi, &fi)| yi - fi)
        .collect();
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();

    let r_squared = if syy > 0.0 {
        (1.0 - ss_res / syy).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let df_res = nf - 2.0;
    let adjusted_r_squared = 1.0 - (1.0 - r_squared) * (nf - 1.0) / df_res;

    let mse = ss_res / df_res;
    let residual_se = mse.sqrt();
    let slope_se = (mse / sxx).sqrt();
    let intercept_se = (mse * (1.0 / nf + x_mean * x_mean / sxx)).sqrt();

    let (slope_t, slope_p_value) = slope_significance(slope, slope_se, df_res);

    Ok(RegressionResult {
        slope,
        intercept,
        r_squared,
        adjusted_r_squared,
        slope_se,
        intercept_se,
        mse,
        residual_se,
        slope_t,
        slope_p_value,
        predictions,
        residuals,
        n,
    })
}

/// t and two-sided p for H₀: β₁ = 0, or `None` when t is undefined.
fn slope_significance(slope: f64, slope_se: f64, df: f64) -> (Option<f64>, Option<f64>) {
    if slope_se <= 0.0 {
        return (None, None);
    }
    let t = slope / slope_se;
    if !t.is_finite() {
        return (None, None);
    }
    let p = (2.0 * (1.0 - t_cdf(t.abs(), df))).clamp(0.0, 1.0);
    (Some(t), Some(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatError;

    #[test]
    fn perfect_fit() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0]; // y = 1 + 2x
        let r = simple_linear_regression(&x, &y).expect("should compute");
        assert!((r.slope - 2.0).abs() < 1e-10);
        assert!((r.intercept - 1.0).abs() < 1e-10);
        assert!((r.r_squared - 1.0).abs() < 1e-10);
        assert_eq!(r.slope_se, 0.0);
        assert_eq!(r.slope_t, None);
        assert!((r.predict(10.0) - 21.0).abs() < 1e-10);
    }

    #[test]
    fn hand_computed_standard_errors() {
        // x̄ = 3, Sxx = 10; y = [2, 4, 5, 4, 5]: ȳ = 4, Sxy = 6, Syy = 6
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let r = simple_linear_regression(&x, &y).expect("should compute");
        assert!((r.slope - 0.6).abs() < 1e-12);
        assert!((r.intercept - 2.2).abs() < 1e-12);
        // SS_res = Syy − Sxy²/Sxx = 6 − 3.6 = 2.4
        assert!((r.r_squared - 0.6).abs() < 1e-12);
        assert!((r.mse - 0.8).abs() < 1e-12);
        assert!((r.slope_se - 0.08_f64.sqrt()).abs() < 1e-12);
        assert!((r.intercept_se - (0.8_f64 * (0.2 + 0.9)).sqrt()).abs() < 1e-12);
        assert_eq!(r.df(), 3);
        let t = r.slope_t.expect("slope t");
        assert!((t - 0.6 / 0.08_f64.sqrt()).abs() < 1e-9);
        let p = r.slope_p_value.expect("slope p");
        assert!(p > 0.1 && p < 0.15, "p = {p}");
    }

    #[test]
    fn predictions_and_residuals_are_aligned() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.1, 3.9, 6.1, 7.9, 10.1];
        let r = simple_linear_regression(&x, &y).expect("should compute");
        assert_eq!(r.predictions.len(), 5);
        assert_eq!(r.residuals.len(), 5);
        for i in 0..5 {
            assert!((r.predictions[i] + r.residuals[i] - y[i]).abs() < 1e-12);
        }
        let sum: f64 = r.residuals.iter().sum();
        assert!(sum.abs() < 1e-10, "residuals sum = {sum}");
    }

    #[test]
    fn negative_slope() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 7.9, 6.1, 4.0];
        let r = simple_linear_regression(&x, &y).expect("should compute");
        assert!(r.slope < 0.0);
        assert!(r.slope_t.expect("t") < 0.0);
    }

    #[test]
    fn constant_y_has_unit_r_squared() {
        let r = simple_linear_regression(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0])
            .expect("should compute");
        assert_eq!(r.slope, 0.0);
        assert_eq!(r.r_squared, 1.0);
    }

    #[test]
    fn slope_significance_drops_overflowing_t() {
        assert_eq!(slope_significance(1e300, 1e-300, 3.0), (None, None));
        assert_eq!(slope_significance(2.0, 0.0, 3.0), (None, None));
        let (t, p) = slope_significance(0.6, 0.08_f64.sqrt(), 3.0);
        assert!((t.expect("t") - 0.6 / 0.08_f64.sqrt()).abs() < 1e-12);
        assert!(p.expect("p") > 0.1);
    }

    #[test]
    fn edge_cases() {
        assert!(matches!(
            simple_linear_regression(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(StatError::LengthMismatch { .. })
        ));
        assert!(matches!(
            simple_linear_regression(&[1.0, 2.0], &[1.0, 2.0]),
            Err(StatError::InsufficientData { .. })
        ));
        assert!(matches!(
            simple_linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(StatError::Degenerate { .. })
        ));
        assert!(simple_linear_regression(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_err());
    }
}
