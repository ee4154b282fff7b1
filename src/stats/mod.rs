//! Descriptive statistics over numeric cells
//!
//! Missing cells are skipped by every function here; callers pass the
//! already-filtered `f64` values.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Summary produced by `describe`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Row labels of a `describe` table, in output order
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Statistics in `LABELS` order
    pub fn as_array(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
        ]
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        None
    } else {
        Some(data.iter().sum::<f64>() / data.len() as f64)
    }
}

/// Variance with `ddof` delta degrees of freedom; `None` when not enough data
pub fn variance(data: &[f64], ddof: usize) -> Option<f64> {
    if data.len() <= ddof {
        return None;
    }
    let m = mean(data)?;
    let sum_squared_diff = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>();
    Some(sum_squared_diff / (data.len() - ddof) as f64)
}

/// Sample standard deviation
pub fn std(data: &[f64]) -> Option<f64> {
    variance(data, 1).map(f64::sqrt)
}

/// Linear-interpolated quantile of already sorted data
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Option<f64> {
    if sorted_data.is_empty() {
        return None;
    }

    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return Some(sorted_data[idx_floor]);
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    Some(sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil)
}

/// Count, mean, sample std, min, quartiles and max. `None` for empty input.
pub fn describe(data: &[f64]) -> Option<DescriptiveStats> {
    if data.is_empty() {
        return None;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    Some(DescriptiveStats {
        count,
        mean: mean(&sorted)?,
        // a single observation has no sample deviation
        std: std(&sorted).unwrap_or(f64::NAN),
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: sorted[count - 1],
    })
}

/// `describe` as cells in `DescriptiveStats::LABELS` order.
/// Empty input gives a count of 0 and missing statistics.
pub fn describe_cells(data: &[f64]) -> Vec<Value> {
    match describe(data) {
        Some(summary) => summary.as_array().iter().map(|&v| Value::from(v)).collect(),
        None => {
            let mut cells = vec![Value::NA; DescriptiveStats::LABELS.len()];
            cells[0] = Value::Float(0.0);
            cells
        }
    }
}
