use chrono::{DateTime, Duration, Utc};

/// Windows longer than this many days request the pre-aggregated vendor feed.
/// Long ranges would otherwise return an excessive number of raw samples.
const DOWNSAMPLE_THRESHOLD_DAYS: i64 = 31;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Which vendor feed a query hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Raw per-sample readings (`type=data`)
    Raw,
    /// Pre-aggregated/downsampled readings (`type=dataD`)
    Downsampled,
}

impl Granularity {
    #[must_use]
    pub fn vendor_query_type(self) -> &'static str {
        match self {
            Self::Raw => "data",
            Self::Downsampled => "dataD",
        }
    }
}

/// The effective time range a vendor query covers. Derived on every request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
}

/// Resolve an optional start/end pair into the effective query window.
///
/// Defaults: start = now minus 24 hours, end = now. A reversed range is
/// passed through unmodified; the vendor answers it with an empty set.
#[must_use]
pub fn resolve(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> QueryWindow {
    let start = start.unwrap_or_else(|| Utc::now() - Duration::hours(24));
    let end = end.unwrap_or_else(Utc::now);

    let millis = (end - start).num_milliseconds();
    let quotient = millis / MILLIS_PER_DAY;
    let remainder = millis % MILLIS_PER_DAY;
    // Equivalent to `millis.div_ceil(MILLIS_PER_DAY)` (MILLIS_PER_DAY > 0);
    // `i64::div_ceil` is still unstable (`int_roundings`).
    let days = if remainder > 0 { quotient + 1 } else { quotient };
    let granularity = if days > DOWNSAMPLE_THRESHOLD_DAYS {
        Granularity::Downsampled
    } else {
        Granularity::Raw
    };

    QueryWindow {
        start,
        end,
        granularity,
    }
}

#[cfg(test)]
mod tests {
    use super::{Granularity, resolve};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn defaults_to_last_24_hours() {
        let window = resolve(None, None);
        let span = window.end - window.start;

        // Allow a few seconds of skew between the two now() calls
        assert!(span >= Duration::hours(24) - Duration::seconds(5));
        assert!(span <= Duration::hours(24) + Duration::seconds(5));
        assert_eq!(window.granularity, Granularity::Raw);
    }

    #[test]
    fn omitted_end_defaults_to_now() {
        let start = Utc::now() - Duration::hours(2);
        let window = resolve(Some(start), None);

        assert_eq!(window.start, start);
        assert!((window.end - Utc::now()).num_seconds().abs() < 5);
    }

    #[test]
    fn thirty_one_days_stays_raw() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(31);

        assert_eq!(resolve(Some(start), Some(end)).granularity, Granularity::Raw);
    }

    #[test]
    fn thirty_two_days_downsamples() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(32);

        assert_eq!(
            resolve(Some(start), Some(end)).granularity,
            Granularity::Downsampled
        );
    }

    #[test]
    fn one_second_past_threshold_downsamples() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(31) + Duration::seconds(1);

        assert_eq!(
            resolve(Some(start), Some(end)).granularity,
            Granularity::Downsampled
        );
    }

    #[test]
    fn reversed_range_passes_through() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let window = resolve(Some(start), Some(end));

        assert_eq!(window.start, start);
        assert_eq!(window.end, end);
        assert_eq!(window.granularity, Granularity::Raw);
    }

    #[test]
    fn vendor_query_types() {
        assert_eq!(Granularity::Raw.vendor_query_type(), "data");
        assert_eq!(Granularity::Downsampled.vendor_query_type(), "dataD");
    }
}
