use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// A single chart-ready measurement.
///
/// The timestamp is the vendor's wall-clock time with the configured source
/// offset attached. On the wire it serializes as the naive local string
/// (`2024-01-01T10:00:00`), which is what the dashboard was built against.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimeSeriesPoint {
    /// Local wall-clock time of the measurement
    #[serde(serialize_with = "serialize_local_naive")]
    #[schema(value_type = String, example = "2024-01-01T10:00:00")]
    pub timestamp: DateTime<FixedOffset>,
    /// Water height in centimeters
    pub value: f64,
}

impl TimeSeriesPoint {
    /// The naive local timestamp string used on the wire and in CSV rows.
    #[must_use]
    pub fn local_timestamp(&self) -> String {
        local_naive_string(&self.timestamp)
    }
}

/// Render a timestamp as the naive vendor-local wire string.
#[must_use]
pub fn local_naive_string(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.f")
        .to_string()
}

fn serialize_local_naive<S>(
    timestamp: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.naive_local().format("%Y-%m-%dT%H:%M:%S%.f"))
}

#[cfg(test)]
mod tests {
    use super::TimeSeriesPoint;
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn serializes_as_naive_local_string() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let point = TimeSeriesPoint {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
                .and_local_timezone(offset)
                .unwrap(),
            value: 12.3,
        };

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"timestamp": "2024-01-01T10:00:00", "value": 12.3})
        );
    }
}
