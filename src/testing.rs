//! Hypothesis testing.
//!
//! One-sample z- and t-tests for a mean, z-tests for one and two
//! proportions, and two-sample (pooled or Welch) and paired t-tests.
//!
//! Every test reports its statistic, its p-value for the requested tail,
//! the degrees of freedom where a t distribution is involved, and whether
//! H₀ is rejected at the configured significance level.
//!
//! # Examples
//!
//! ```
//! use u_statlab::descriptive::SampleSummary;
//! use u_statlab::testing::{one_sample_t_test, TestOptions};
//!
//! // x̄ = 105, s = 15, n = 25, H₀: μ = 100
//! let sample = SampleSummary::new(105.0, 15.0, 25).unwrap();
//! let r = one_sample_t_test(&sample, 100.0, &TestOptions::default()).unwrap();
//! assert!((r.statistic - 1.667).abs() < 1e-3);
//! assert_eq!(r.df, Some(24.0));
//! assert!(!r.reject_null); // p ≈ 0.109 > 0.05
//! ```

use crate::descriptive::SampleSummary;
use crate::distribution::{normal_cdf, t_cdf};
use crate::error::StatResult;
use crate::validate;

/// Alternative hypothesis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tail {
    /// H₁: θ ≠ θ₀.
    #[default]
    TwoSided,
    /// H₁: θ < θ₀.
    Left,
    /// H₁: θ > θ₀.
    Right,
}

/// Whether two samples are assumed to share a population variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceAssumption {
    /// Pooled variance, df = n₁ + n₂ − 2.
    Equal,
    /// Welch's standard error with Welch–Satterthwaite df.
    Unequal,
}

/// Significance level and tail shared by every test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOptions {
    alpha: f64,
    tail: Tail,
}

impl TestOptions {
    /// Creates options for significance level `alpha` ∈ (0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_statlab::testing::{Tail, TestOptions};
    ///
    /// let opts = TestOptions::new(0.01, Tail::Right).unwrap();
    /// assert_eq!(opts.alpha(), 0.01);
    ///
    /// assert!(TestOptions::new(0.0, Tail::TwoSided).is_err());
    /// assert!(TestOptions::new(5.0, Tail::TwoSided).is_err());
    /// ```
    pub fn new(alpha: f64, tail: Tail) -> StatResult<Self> {
        validate::open_unit("alpha", alpha)?;
        Ok(Self { alpha, tail })
    }

    /// Replaces α, keeping the tail.
    ///
    /// # Errors
    /// `InvalidParameter` unless 0 < α < 1.
    pub fn with_alpha(self, alpha: f64) -> StatResult<Self> {
        Self::new(alpha, self.tail)
    }

    /// Replaces the tail, keeping α.
    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    /// Significance level α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Alternative hypothesis direction.
    pub fn tail(&self) -> Tail {
        self.tail
    }
}

impl Default for TestOptions {
    /// α = 0.05, two-sided.
    fn default() -> Self {
        Self {
            alpha: 0.05,
            tail: Tail::TwoSided,
        }
    }
}

/// Result of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestResult {
    /// Test statistic (z or t).
    pub statistic: f64,
    /// p-value for the requested tail, in [0, 1].
    pub p_value: f64,
    /// Degrees of freedom for t-based tests (fractional for Welch).
    pub df: Option<f64>,
    /// Standard error the statistic was scaled by.
    pub standard_error: f64,
    /// `true` when p < α.
    pub reject_null: bool,
}

/// Converts a statistic into a p-value for `tail`.
///
/// The two-sided value is 2·(1 − CDF(|s|)); the one-sided values halve it
/// when the statistic points toward the alternative and complement the half
/// otherwise.
fn tail_p_value(statistic: f64, tail: Tail, cdf: impl Fn(f64) -> f64) -> f64 {
    let two_sided = (2.0 * (1.0 - cdf(statistic.abs()))).clamp(0.0, 1.0);
    match tail {
        Tail::TwoSided => two_sided,
        Tail::Left if statistic < 0.0 => two_sided / 2.0,
        Tail::Right if statistic > 0.0 => two_sided / 2.0,
        Tail::Left | Tail::Right => 1.0 - two_sided / 2.0,
    }
}

fn finish(
    statistic: f64,
    se: f64,
    df: Option<f64>,
    opts: &TestOptions,
) -> StatResult<TestResult> {
    if !statistic.is_finite() {
        return validate::degenerate(format!(
            "test statistic overflowed (standard error {:e})",
            se
        ));
    }
    let p_value = match df {
        Some(df) => tail_p_value(statistic, opts.tail, |t| t_cdf(t, df)),
        None => tail_p_value(statistic, opts.tail, normal_cdf),
    };
    Ok(TestResult {
        statistic,
        p_value,
        df,
        standard_error: se,
        reject_null: p_value < opts.alpha,
    })
}

fn nonzero_se(se: f64, context: &str) -> StatResult<f64> {
    if se > 0.0 && se.is_finite() {
        Ok(se)
    } else {
        validate::degenerate(format!("{}: standard error is zero", context))
    }
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// One-sample z-test for a mean with known population σ.
///
/// `sample.std_dev` is taken as the known σ. z = (x̄ − μ₀) / (σ/√n).
///
/// # Errors
/// `InvalidInput` for a non-finite μ₀, `Degenerate` when σ = 0 or z overflows.
pub fn one_sample_z_test(
    sample: &SampleSummary,
    mu0: f64,
    opts: &TestOptions,
) -> StatResult<TestResult> {
    validate::finite("mu0", mu0)?;
    let se = nonzero_se(sample.standard_error(), "one-sample z-test")?;
    finish((sample.mean - mu0) / se, se, None, opts)
}

/// One-sample t-test for a mean with unknown σ: t = (x̄ − μ₀) / (s/√n),
/// df = n − 1.
///
/// # Errors
/// `InsufficientData` if n < 2, `Degenerate` when s = 0.
///
/// # Examples
///
/// ```
/// use u_statlab::descriptive::SampleSummary;
/// use u_statlab::testing::{one_sample_t_test, TestOptions};
///
/// let data = [5.1, 4.9, 5.2, 5.0, 4.8, 5.3, 5.1, 4.9];
/// let sample = SampleSummary::from_data(&data).unwrap();
/// let r = one_sample_t_test(&sample, 5.0, &TestOptions::default()).unwrap();
/// assert!(r.p_value > 0.05);
/// ```
pub fn one_sample_t_test(
    sample: &SampleSummary,
    mu0: f64,
    opts: &TestOptions,
) -> StatResult<TestResult> {
    validate::finite("mu0", mu0)?;
    validate::at_least("t-test observations", 2, sample.n)?;
    let se = nonzero_se(sample.standard_error(), "one-sample t-test")?;
    let df = (sample.n - 1) as f64;
    finish((sample.mean - mu0) / se, se, Some(df), opts)
}

/// Two-sample t-test for H₀: μ₁ = μ₂.
///
/// With [`VarianceAssumption::Equal`] the pooled variance
/// s²ₚ = ((n₁−1)s₁² + (n₂−1)s₂²)/(n₁+n₂−2) gives SE = sₚ√(1/n₁ + 1/n₂) and
/// df = n₁ + n₂ − 2. With [`VarianceAssumption::Unequal`] the Welch
/// standard error √(s₁²/n₁ + s₂²/n₂) is used together with the
/// Welch–Satterthwaite df, which is generally fractional.
///
/// # References
///
/// Welch (1947). "The generalization of Student's problem when several
/// different population variances are involved". Biometrika, 34, 28–35.
///
/// # Errors
/// `InsufficientData` if either n < 2, `Degenerate` when both variances are zero.
pub fn two_sample_t_test(
    a: &SampleSummary,
    b: &SampleSummary,
    variance: VarianceAssumption,
    opts: &TestOptions,
) -> StatResult<TestResult> {
    validate::at_least("first sample observations", 2, a.n)?;
    validate::at_least("second sample observations", 2, b.n)?;

    let n1 = a.n as f64;
    let n2 = b.n as f64;
    let (se, df) = match variance {
        VarianceAssumption::Equal => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * a.variance() + (n2 - 1.0) * b.variance()) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
        VarianceAssumption::Unequal => {
            let v1 = a.variance() / n1;
            let v2 = b.variance() / n2;
            let df = (v1 + v2).powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
            ((v1 + v2).sqrt(), df)
        }
    };
    let se = nonzero_se(se, "two-sample t-test")?;
    finish((a.mean - b.mean) / se, se, Some(df), opts)
}

/// Paired t-test: the differences xᵢ − yᵢ tested against 0.
///
/// # Errors
/// `LengthMismatch` for unequal lengths, plus the errors of
/// [`SampleSummary::from_data`] and [`one_sample_t_test`].
///
/// # Examples
///
/// ```
/// use u_statlab::testing::{paired_t_test, TestOptions};
///
/// let before = [5.0, 6.0, 7.0, 8.0, 9.0];
/// let after = [5.5, 6.2, 7.1, 8.3, 9.4];
/// let r = paired_t_test(&before, &after, &TestOptions::default()).unwrap();
/// assert!(r.statistic < 0.0); // after > before
/// ```
pub fn paired_t_test(x: &[f64], y: &[f64], opts: &TestOptions) -> StatResult<TestResult> {
    validate::same_length("paired samples", x.len(), y.len())?;
    let diffs: Vec<f64> = x.iter().zip(y).map(|(&a, &b)| a - b).collect();
    let summary = SampleSummary::from_data(&diffs)?;
    one_sample_t_test(&summary, 0.0, opts)
}

// ---------------------------------------------------------------------------
// Proportions
// ---------------------------------------------------------------------------

/// One-sample z-test for a proportion.
///
/// The standard error is computed under H₀ from the hypothesised
/// proportion: z = (p̂ − p₀) / √(p₀(1−p₀)/n).
///
/// # Errors
/// `InvalidParameter` if p̂ ∉ [0, 1], p₀ ∉ (0, 1), or n = 0.
pub fn one_proportion_z_test(
    p_hat: f64,
    n: usize,
    p0: f64,
    opts: &TestOptions,
) -> StatResult<TestResult> {
    validate::probability("p_hat", p_hat)?;
    validate::open_unit("p0", p0)?;
    validate::positive("n", n as f64)?;
    let se = (p0 * (1.0 - p0) / n as f64).sqrt();
    finish((p_hat - p0) / se, se, None, opts)
}

/// Two-proportion z-test for H₀: p₁ = p₂ using the pooled proportion
/// p̄ = (n₁p̂₁ + n₂p̂₂)/(n₁ + n₂).
///
/// # Errors
/// `InvalidParameter` for proportions outside [0, 1] or empty samples,
/// `Degenerate` when the pooled proportion is 0 or 1.
pub fn two_proportion_z_test(
    p1: f64,
    n1: usize,
    p2: f64,
    n2: usize,
    opts: &TestOptions,
) -> StatResult<TestResult> {
    validate::probability("p1", p1)?;
    validate::probability("p2", p2)?;
    validate::positive("n1", n1 as f64)?;
    validate::positive("n2", n2 as f64)?;

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let pooled = (p1 * n1f + p2 * n2f) / (n1f + n2f);
    let se = (pooled * (1.0 - pooled) * (1.0 / n1f + 1.0 / n2f)).sqrt();
    let se = nonzero_se(se, "two-proportion z-test")?;
    finish((p1 - p2) / se, se, None, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatError;

    fn summary(mean: f64, sd: f64, n: usize) -> SampleSummary {
        SampleSummary::new(mean, sd, n).expect("valid summary")
    }

    // -----------------------------------------------------------------------
    // p-value tails
    // -----------------------------------------------------------------------

    #[test]
    fn tails_split_two_sided_value() {
        let two = tail_p_value(1.5, Tail::TwoSided, normal_cdf);
        let right = tail_p_value(1.5, Tail::Right, normal_cdf);
        let left = tail_p_value(1.5, Tail::Left, normal_cdf);
        assert!((right - two / 2.0).abs() < 1e-15);
        assert!((left - (1.0 - two / 2.0)).abs() < 1e-15);

        let left_neg = tail_p_value(-1.5, Tail::Left, normal_cdf);
        assert!((left_neg - right).abs() < 1e-15);
    }

    #[test]
    fn zero_statistic_gives_half_in_either_tail() {
        assert_eq!(tail_p_value(0.0, Tail::TwoSided, normal_cdf), 1.0);
        assert_eq!(tail_p_value(0.0, Tail::Left, normal_cdf), 0.5);
        assert_eq!(tail_p_value(0.0, Tail::Right, normal_cdf), 0.5);
    }

    #[test]
    fn options_builders_keep_the_other_field() {
        let opts = TestOptions::default()
            .with_tail(Tail::Left)
            .with_alpha(0.01)
            .expect("valid alpha");
        assert_eq!(opts.alpha(), 0.01);
        assert_eq!(opts.tail(), Tail::Left);
        assert!(opts.with_alpha(1.0).is_err());
    }

    // -----------------------------------------------------------------------
    // One-sample mean tests
    // -----------------------------------------------------------------------

    #[test]
    fn one_sample_t_textbook_scenario() {
        let r = one_sample_t_test(&summary(105.0, 15.0, 25), 100.0, &TestOptions::default())
            .expect("should compute");
        assert!((r.statistic - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(r.df, Some(24.0));
        assert_eq!(r.standard_error, 3.0);
        assert!((r.p_value - 0.108).abs() < 1e-3, "p = {}", r.p_value);
        assert!(!r.reject_null);
    }

    #[test]
    fn one_sample_t_right_tail_rejects_at_ten_percent() {
        let opts = TestOptions::new(0.10, Tail::Right).unwrap();
        let r = one_sample_t_test(&summary(105.0, 15.0, 25), 100.0, &opts)
            .expect("should compute");
        assert!((r.p_value - 0.054).abs() < 1e-3, "p = {}", r.p_value);
        assert!(r.reject_null);
    }

    #[test]
    fn one_sample_t_raw_data_null_true() {
        let data = [5.0, 5.1, 4.9, 5.0, 5.1, 4.9, 5.0, 5.0];
        let s = SampleSummary::from_data(&data).unwrap();
        let r = one_sample_t_test(&s, 5.0, &TestOptions::default()).expect("should compute");
        assert!(r.p_value > 0.3, "p = {}", r.p_value);
    }

    #[test]
    fn one_sample_t_edge_cases() {
        let opts = TestOptions::default();
        assert!(matches!(
            one_sample_t_test(&summary(5.0, 1.0, 1), 5.0, &opts),
            Err(StatError::InsufficientData { .. })
        ));
        assert!(matches!(
            one_sample_t_test(&summary(5.0, 0.0, 10), 5.0, &opts),
            Err(StatError::Degenerate { .. })
        ));
        assert!(one_sample_t_test(&summary(5.0, 1.0, 10), f64::NAN, &opts).is_err());
    }

    #[test]
    fn one_sample_z_known_sigma() {
        // x̄ = 52, σ = 10, n = 100 ⇒ z = 2
        let r = one_sample_z_test(&summary(52.0, 10.0, 100), 50.0, &TestOptions::default())
            .expect("should compute");
        assert!((r.statistic - 2.0).abs() < 1e-12);
        assert_eq!(r.df, None);
        assert!((r.p_value - 0.0455).abs() < 1e-3, "p = {}", r.p_value);
        assert!(r.reject_null);
    }

    #[test]
    fn overflowing_statistic_is_degenerate() {
        let sample = SampleSummary::new(1e300, 1e-300, 1).expect("valid summary");
        assert!(matches!(
            one_sample_z_test(&sample, -1e300, &TestOptions::default()),
            Err(StatError::Degenerate { .. })
        ));
    }

    #[test]
    fn one_sample_z_left_tail_wrong_direction() {
        let opts = TestOptions::default().with_tail(Tail::Left);
        let r = one_sample_z_test(&summary(52.0, 10.0, 100), 50.0, &opts)
            .expect("should compute");
        assert!(r.p_value > 0.97, "p = {}", r.p_value);
        assert!(!r.reject_null);
    }

    // -----------------------------------------------------------------------
    // Two-sample tests
    // -----------------------------------------------------------------------

    #[test]
    fn two_sample_pooled() {
        // s₁ = s₂ = 4, n₁ = n₂ = 16 ⇒ SE = √2, df = 30
        let a = summary(25.0, 4.0, 16);
        let b = summary(22.0, 4.0, 16);
        let r = two_sample_t_test(&a, &b, VarianceAssumption::Equal, &TestOptions::default())
            .expect("should compute");
        assert_eq!(r.df, Some(30.0));
        assert!((r.standard_error - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((r.statistic - 3.0 / 2.0_f64.sqrt()).abs() < 1e-12);
        assert!(r.reject_null, "p = {}", r.p_value);
    }

    #[test]
    fn two_sample_welch_df_is_fractional() {
        let a = summary(20.0, 2.0, 10);
        let b = summary(18.0, 6.0, 15);
        let r = two_sample_t_test(&a, &b, VarianceAssumption::Unequal, &TestOptions::default())
            .expect("should compute");
        // v₁ = 0.4, v₂ = 2.4 ⇒ df = 7.84 / (0.16/9 + 5.76/14)
        let expected_df = 7.84 / (0.16 / 9.0 + 5.76 / 14.0);
        let df = r.df.expect("t-test has df");
        assert!((df - expected_df).abs() < 1e-12, "df = {df}");
        assert!(df.fract() != 0.0);
        assert!((r.standard_error - 2.8_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn two_sample_raw_data_different_means() {
        let a = SampleSummary::from_data(&[1.0, 2.0, 3.0, 2.0, 1.5, 2.5]).unwrap();
        let b = SampleSummary::from_data(&[10.0, 11.0, 12.0, 10.5, 11.5, 10.5]).unwrap();
        for variance in [VarianceAssumption::Equal, VarianceAssumption::Unequal] {
            let r = two_sample_t_test(&a, &b, variance, &TestOptions::default())
                .expect("should compute");
            assert!(r.p_value < 0.001, "p = {}", r.p_value);
            assert!(r.statistic < 0.0);
        }
    }

    #[test]
    fn two_sample_edge_cases() {
        let opts = TestOptions::default();
        let ok = summary(1.0, 1.0, 5);
        assert!(two_sample_t_test(&summary(1.0, 1.0, 1), &ok, VarianceAssumption::Equal, &opts)
            .is_err());
        let flat = summary(1.0, 0.0, 5);
        assert!(matches!(
            two_sample_t_test(&flat, &flat, VarianceAssumption::Unequal, &opts),
            Err(StatError::Degenerate { .. })
        ));
    }

    #[test]
    fn paired_significant_difference() {
        let before = [5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let after = [6.2, 7.1, 8.3, 9.0, 10.4, 11.1, 12.2, 13.3];
        let r = paired_t_test(&before, &after, &TestOptions::default()).expect("should compute");
        assert!(r.p_value < 0.001, "p = {}", r.p_value);
        assert_eq!(r.df, Some(7.0));
    }

    #[test]
    fn paired_edge_cases() {
        let opts = TestOptions::default();
        assert!(matches!(
            paired_t_test(&[1.0, 2.0], &[3.0], &opts),
            Err(StatError::LengthMismatch { .. })
        ));
        assert!(paired_t_test(&[1.0], &[2.0], &opts).is_err());
    }

    // -----------------------------------------------------------------------
    // Proportions
    // -----------------------------------------------------------------------

    #[test]
    fn one_proportion_uses_null_standard_error() {
        // p̂ = 0.56, p₀ = 0.5, n = 400 ⇒ SE₀ = 0.025, z = 2.4
        let r = one_proportion_z_test(0.56, 400, 0.5, &TestOptions::default())
            .expect("should compute");
        assert!((r.standard_error - 0.025).abs() < 1e-12);
        assert!((r.statistic - 2.4).abs() < 1e-9);
        assert!((r.p_value - 0.0164).abs() < 1e-3, "p = {}", r.p_value);
    }

    #[test]
    fn one_proportion_rejects_bad_parameters() {
        let opts = TestOptions::default();
        assert!(one_proportion_z_test(1.1, 10, 0.5, &opts).is_err());
        assert!(one_proportion_z_test(0.5, 10, 0.0, &opts).is_err());
        assert!(one_proportion_z_test(0.5, 10, 1.0, &opts).is_err());
        assert!(one_proportion_z_test(0.5, 0, 0.5, &opts).is_err());
    }

    #[test]
    fn two_proportion_pooled() {
        // p̂₁ = 0.6 (n = 200), p̂₂ = 0.5 (n = 200) ⇒ p̄ = 0.55
        let r = two_proportion_z_test(0.6, 200, 0.5, 200, &TestOptions::default())
            .expect("should compute");
        let se = (0.55_f64 * 0.45 * (2.0 / 200.0)).sqrt();
        assert!((r.standard_error - se).abs() < 1e-12);
        assert!((r.statistic - 0.1 / se).abs() < 1e-9);
        assert!(r.reject_null);
    }

    #[test]
    fn two_proportion_all_successes_is_degenerate() {
        assert!(matches!(
            two_proportion_z_test(1.0, 20, 1.0, 30, &TestOptions::default()),
            Err(StatError::Degenerate { .. })
        ));
    }
}
