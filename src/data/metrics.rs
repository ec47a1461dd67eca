use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{DataError, Result};
use super::model::Number;

/// Distance between two entries of the percentile table.
pub const PERCENTILE_STEP: usize = 5;

// ---------------------------------------------------------------------------
// Metrics – summary statistics of one column within one region
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub region: String,
    pub column: String,
    pub max: Number,
    pub min: Number,
    pub mean: f64,
    pub median: Number,
    pub standard_deviation: f64,
    /// Percentile (0, 5, …, 100) → value.
    pub percentiles: BTreeMap<u8, Number>,
}

impl Metrics {
    /// Compute every statistic over `values`. The slice is sorted in place.
    pub fn compute(region: String, column: String, values: &mut [Number]) -> Result<Self> {
        if values.is_empty() {
            return Err(DataError::range("no values for region"));
        }
        values.sort_by(Number::total_cmp);

        let n = values.len();
        let mean = mean(values);
        let median = median(values);

        let percentiles = (0..=100u8)
            .step_by(PERCENTILE_STEP)
            .map(|p| {
                let v = if p == 50 { median } else { percentile(values, p) };
                (p, v)
            })
            .collect();

        Ok(Self {
            region,
            column,
            max: values[n - 1],
            min: values[0],
            mean,
            median,
            standard_deviation: population_std_dev(values, mean),
            percentiles,
        })
    }
}

fn mean(values: &[Number]) -> f64 {
    values.iter().map(|v| v.as_f64()).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor `N`).
fn population_std_dev(values: &[Number], mean: f64) -> f64 {
    let sum_sq: f64 = values.iter().map(|v| (v.as_f64() - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Odd `N`: the middle element. Even `N`: the element at `N/2` averaged
/// with itself, so the upper-middle value as a float. Not the textbook
/// mean of the two central elements.
fn median(sorted: &[Number]) -> Number {
    let n = sorted.len();
    if n % 2 != 0 {
        sorted[n / 2]
    } else {
        let lo = sorted[n / 2].as_f64();
        let hi = sorted[n.div_ceil(2)].as_f64();
        Number::Float((lo + hi) / 2.0)
    }
}

/// Nearest-rank percentile with half-to-even rounding of the rank.
fn percentile(sorted: &[Number], p: u8) -> Number {
    let rank = (f64::from(p) / 100.0 * sorted.len() as f64).round_ties_even() as i64;
    let idx = (rank - 1).max(0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}
