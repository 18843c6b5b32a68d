//! One-way analysis of variance.
//!
//! # Algorithm
//!
//! ```text
//! SS_between = Σ nᵢ (x̄ᵢ − x̄)²          df = k − 1
//! SS_within  = Σᵢ Σⱼ (xᵢⱼ − x̄ᵢ)²       df = N − k
//! SS_total   = Σ (x − x̄)²  = SS_between + SS_within
//! F = MS_between / MS_within,  p = 1 − F_cdf(F; k − 1, N − k)
//! ```
//!
//! # References
//!
//! Fisher (1925). "Statistical Methods for Research Workers".

use u_numflow::stats;

use crate::distribution::f_cdf;
use crate::error::StatResult;
use crate::validate;

/// Result of a one-way ANOVA.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaResult {
    /// F-statistic.
    pub f_statistic: f64,
    /// p-value, P(F ≥ observed).
    pub p_value: f64,
    /// Degrees of freedom between groups, k − 1.
    pub df_between: usize,
    /// Degrees of freedom within groups, N − k.
    pub df_within: usize,
    /// Sum of squares between groups.
    pub ss_between: f64,
    /// Sum of squares within groups.
    pub ss_within: f64,
    /// Total sum of squares about the grand mean.
    pub ss_total: f64,
    /// Mean square between.
    pub ms_between: f64,
    /// Mean square within.
    pub ms_within: f64,
    /// Mean of each group, in input order.
    pub group_means: Vec<f64>,
    /// Size of each group, in input order.
    pub group_sizes: Vec<usize>,
    /// Mean of all observations pooled together.
    pub grand_mean: f64,
}

impl AnovaResult {
    /// Whether H₀ (all group means equal) is rejected at level `alpha`.
    pub fn rejects_null(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// One-way ANOVA: H₀: all group means are equal.
///
/// # Errors
///
/// `InsufficientData` for fewer than 2 groups or a group with fewer than 2
/// observations, `InvalidInput` for non-finite values, `Degenerate` when
/// every group is constant (MS_within = 0) or F overflows.
///
/// # Examples
///
/// ```
/// use u_statlab::anova::one_way_anova;
///
/// let group1 = [5.0, 6.0, 7.0, 5.5, 6.5];
/// let group2 = [8.0, 9.0, 8.5, 9.5, 8.0];
/// let group3 = [4.0, 3.0, 3.5, 4.5, 4.0];
/// let r = one_way_anova(&[&group1, &group2, &group3]).unwrap();
/// assert!(r.p_value < 0.01);
/// assert_eq!((r.df_between, r.df_within), (2, 12));
/// ```
pub fn one_way_anova(groups: &[&[f64]]) -> StatResult<AnovaResult> {
    let k = groups.len();
    validate::at_least("ANOVA groups", 2, k)?;
    for (i, g) in groups.iter().enumerate() {
        validate::finite_slice(&format!("group {}", i + 1), g)?;
        validate::at_least(&format!("group {} observations", i + 1), 2, g.len())?;
    }

    let group_sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    let total_n: usize = group_sizes.iter().sum();

    let group_sums: Vec<f64> = groups.iter().map(|g| stats::kahan_sum(g)).collect();
    let grand_mean = stats::kahan_sum(&group_sums) / total_n as f64;
    let group_means: Vec<f64> = group_sums
        .iter()
        .zip(&group_sizes)
        .map(|(&s, &n)| s / n as f64)
        .collect();

    let ss_between: f64 = group_means
        .iter()
        .zip(&group_sizes)
        .map(|(&m, &n)| n as f64 * (m - grand_mean).powi(2))
        .sum();

    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &m)| g.iter().map(|&x| (x - m).powi(2)).sum::<f64>())
        .sum();

    let ss_total: f64 = groups
        .iter()
        .flat_map(|g| g.iter())
        .map(|&x| (x - grand_mean).powi(2))
        .sum();

    let df_between = k - 1;
    let df_within = total_n - k;

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    if ms_within <= 0.0 {
        return validate::degenerate("ANOVA: every group is constant, F is undefined");
    }

    let f_statistic = ms_between / ms_within;
    if !f_statistic.is_finite() {
        return validate::degenerate("ANOVA: MS_within is too small, F overflowed");
    }
    let p_value =
        (1.0 - f_cdf(f_statistic, df_between as f64, df_within as f64)).clamp(0.0, 1.0);

    Ok(AnovaResult {
        f_statistic,
        p_value,
        df_between,
        df_within,
        ss_between,
        ss_within,
        ss_total,
        ms_between,
        ms_within,
        group_means,
        group_sizes,
        grand_mean,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn groups_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
        proptest::collection::vec(proptest::collection::vec(-1e3_f64..1e3, 2..15), 2..6)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn sum_of_squares_decomposes(groups in groups_strategy()) {
            let refs: Vec<&[f64]> = groups.iter().map(|g| g.as_slice()).collect();
            if let Ok(r) = one_way_anova(&refs) {
                let scale = r.ss_total.max(1.0);
                prop_assert!(
                    (r.ss_between + r.ss_within - r.ss_total).abs() <= 1e-9 * scale,
                    "{} + {} != {}", r.ss_between, r.ss_within, r.ss_total
                );
            }
        }

        #[test]
        fn p_value_in_unit_interval(groups in groups_strategy()) {
            let refs: Vec<&[f64]> = groups.iter().map(|g| g.as_slice()).collect();
            if let Ok(r) = one_way_anova(&refs) {
                prop_assert!((0.0..=1.0).contains(&r.p_value));
                prop_assert!(r.f_statistic >= 0.0);
            }
        }
    }
}
