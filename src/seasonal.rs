//! Classical multiplicative seasonal decomposition.
//!
//! Seasonal indices by the ratio-to-moving-average method.
//!
//! # Algorithm
//!
//! ```text
//! h      = ⌊P/2⌋
//! MA_i   = (Σ_{j=-h..h} w_j x_{i+j}) / P      for h ≤ i < n − h
//!          w_j = 1, except w_{±h} = ½ when P is even
//! r_i    = x_i / MA_i
//! S_k    = mean{ r_i : i mod P = k },  then S_k ← S_k / mean(S)
//! d_i    = x_i / S_{i mod P}
//! ```
//!
//! Positions are counted from the first observation, so `indices[0]` belongs
//! to the season of `data[0]`.
//!
//! # Reference
//!
//! Makridakis, Wheelwright & Hyndman (1998). "Forecasting: Methods and
//! Applications", 3rd edition, ch. 3.

use crate::error::StatResult;
use crate::regression::{simple_linear_regression, RegressionResult};
use crate::validate;

/// Result of a seasonal decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalResult {
    /// Seasonal period P.
    pub period: usize,
    /// Normalized seasonal indices, one per position in the cycle; their
    /// mean is 1.
    pub indices: Vec<f64>,
    /// Observations divided by their seasonal index.
    pub deseasonalized: Vec<f64>,
    /// Centered moving average; `None` in the first and last ⌊P/2⌋ slots.
    pub moving_averages: Vec<Option<f64>>,
    /// Observation / moving average; `None` where the average is.
    pub ratios: Vec<Option<f64>>,
}

impl SeasonalResult {
    /// Seasonal index for observation `i` (0-based, may lie past the data).
    pub fn index_at(&self, i: usize) -> f64 {
        self.indices[i % self.period]
    }

    /// Least-squares trend of the deseasonalized series on t = 1..n.
    ///
    /// # Errors
    /// Propagates regression errors; with n ≥ 2P ≥ 4 distinct time points
    /// these cannot occur for a successfully decomposed series.
    pub fn trend(&self) -> StatResult<RegressionResult> {
        let t: Vec<f64> = (1..=self.deseasonalized.len()).map(|t| t as f64).collect();
        simple_linear_regression(&t, &self.deseasonalized)
    }

    /// Reseasonalized trend forecast for the next `steps` periods:
    /// `(intercept + slope · t) · S_{(t−1) mod P}` for t = n+1..n+steps.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_statlab::seasonal::seasonal_decomposition;
    ///
    /// let sales = [10.0, 20.0, 30.0, 20.0, 12.0, 22.0, 32.0, 22.0, 14.0, 24.0, 34.0, 24.0];
    /// let d = seasonal_decomposition(&sales, 4).unwrap();
    /// let next_year = d.forecast(4).unwrap();
    /// assert_eq!(next_year.len(), 4);
    /// // third quarter stays the peak
    /// assert!(next_year[2] > next_year[0]);
    /// ```
    pub fn forecast(&self, steps: usize) -> StatResult<Vec<f64>> {
        let fit = self.trend()?;
        let n = self.deseasonalized.len();
        Ok((n..n + steps)
            .map(|i| fit.predict((i + 1) as f64) * self.index_at(i))
            .collect())
    }
}

/// Decomposes `data` (chronological) into seasonal indices of period
/// `period` and a deseasonalized series.
///
/// # Errors
///
/// - `InvalidParameter` if `period < 2`
/// - `InsufficientData` if fewer than `2 · period` observations are given
/// - `InvalidInput` for non-finite values
/// - `Degenerate` if a moving average or a seasonal index is zero
///
/// # Examples
///
/// ```
/// use u_statlab::seasonal::seasonal_decomposition;
///
/// let quarterly = [100.0, 120.0, 90.0, 130.0, 110.0, 130.0, 100.0, 140.0];
/// let d = seasonal_decomposition(&quarterly, 4).unwrap();
/// assert_eq!(d.indices.len(), 4);
/// let avg = d.indices.iter().sum::<f64>() / 4.0;
/// assert!((avg - 1.0).abs() < 1e-9);
/// assert!(d.moving_averages[0].is_none() && d.moving_averages[7].is_none());
/// ```
pub fn seasonal_decomposition(data: &[f64], period: usize) -> StatResult<SeasonalResult> {
    validate::at_least_param("period", 2, period)?;
    validate::at_least("seasonal observations", 2 * period, data.len())?;
    validate::finite_slice("data", data)?;

    let n = data.len();
    let moving_averages = centered_moving_average(data, period);

    let mut ratios = vec![None; n];
    for (i, ma) in moving_averages.iter().enumerate() {
        if let Some(ma) = *ma {
            if ma == 0.0 {
                return validate::degenerate(format!("moving average at position {} is zero", i));
            }
            ratios[i] = Some(data[i] / ma);
        }
    }

    let mut sums = vec![0.0; period];
    let mut counts = vec![0_usize; period];
    for (i, r) in ratios.iter().enumerate() {
        if let Some(r) = *r {
            sums[i % period] += r;
            counts[i % period] += 1;
        }
    }
    // n ≥ 2P leaves at least P consecutive defined ratios, so every count > 0
    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| s / c as f64)
        .collect();

    let raw_mean = raw.iter().sum::<f64>() / period as f64;
    if raw_mean == 0.0 {
        return validate::degenerate("seasonal indices average to zero");
    }
    let indices: Vec<f64> = raw.iter().map(|s| s / raw_mean).collect();
    if let Some(k) = indices.iter().position(|&s| s == 0.0) {
        return validate::degenerate(format!("seasonal index for position {} is zero", k));
    }

    let deseasonalized = data
        .iter()
        .enumerate()
        .map(|(i, &x)| x / indices[i % period])
        .collect();

    Ok(SeasonalResult {
        period,
        indices,
        deseasonalized,
        moving_averages,
        ratios,
    })
}

/// Centered moving average of width `period`, `None` within ⌊P/2⌋ of
/// either end. Assumes `data.len() > 2 · ⌊P/2⌋`.
fn centered_moving_average(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = data.len();
    let half = period / 2;
    let even = period % 2 == 0;
    let mut out = vec![None; n];

    for (i, slot) in out.iter_mut().enumerate().take(n - half).skip(half) {
        let window = &data[i - half..=i + half];
        let sum = if even {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            inner + 0.5 * (window[0] + window[window.len() - 1])
        } else {
            window.iter().sum()
        };
        *slot = Some(sum / period as f64);
    }
    out
}
