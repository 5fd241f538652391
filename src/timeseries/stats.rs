use chrono::{DateTime, FixedOffset};

use crate::timeseries::TimeSeriesPoint;

/// Summary statistics over a point sequence. Recomputed on every request,
/// never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub max_value: Option<f64>,
    /// Every timestamp whose value ties at the maximum (at least one entry
    /// for a non-empty input).
    pub max_timestamps: Vec<DateTime<FixedOffset>>,
    pub median_value: Option<f64>,
}

impl StatsSummary {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            max_value: None,
            max_timestamps: Vec::new(),
            median_value: None,
        }
    }
}

/// Compute maximum (with tied timestamps) and median over a point sequence.
///
/// The input is not guaranteed sorted and is never mutated; the median sort
/// operates on a copied value vector. Empty input yields an empty summary,
/// which the presentation renders as "N/A".
#[must_use]
pub fn summarize(points: &[TimeSeriesPoint]) -> StatsSummary {
    if points.is_empty() {
        return StatsSummary::empty();
    }

    let max_value = points
        .iter()
        .map(|p| p.value)
        .max_by(f64::total_cmp)
        .unwrap_or(f64::NAN);

    let max_timestamps = points
        .iter()
        .filter(|p| p.value == max_value)
        .map(|p| p.timestamp)
        .collect();

    let mut values: Vec<f64> = points.iter().map(|p| p.value).collect();
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    let median_value = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    StatsSummary {
        max_value: Some(max_value),
        max_timestamps,
        median_value: Some(median_value),
    }
}
