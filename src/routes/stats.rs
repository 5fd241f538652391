use axum::{
    Json,
    extract::{Query, State},
    http::header::{self, HeaderMap},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::error::AppResult;
use crate::i18n::Labels;
use crate::timeseries::{point, stats, window};
use crate::vendor::adapter;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    /// Start of the query window (ISO 8601). Defaults to 24 hours ago.
    pub start_date: Option<DateTime<Utc>>,
    /// End of the query window (ISO 8601). Defaults to now.
    pub end_date: Option<DateTime<Utc>>,
    /// Locale tag for display strings; falls back to Accept-Language,
    /// then the configured default.
    pub locale: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Maximum value, null when the series is empty
    pub max_value: Option<f64>,
    /// Maximum rendered with the locale number format, "N/A" when empty
    pub max_value_display: String,
    /// Every timestamp tied at the maximum (local wall-clock strings)
    pub max_timestamps: Vec<String>,
    /// The same timestamps rendered with the full locale date format
    pub max_timestamps_display: Vec<String>,
    /// Median value, null when the series is empty
    pub median_value: Option<f64>,
    /// Median rendered with the locale number format, "N/A" when empty
    pub median_value_display: String,
    /// Localized labels for the table, chart and range picker
    pub labels: Labels,
}

/// Get summary statistics for a date range
///
/// Runs the same vendor pipeline as `/api/timeseries` and summarizes the
/// points: maximum (with every tied timestamp) and median, plus the
/// localized display strings the stats table renders. An empty series is
/// not an error; values come back null with "N/A" display strings.
#[utoipa::path(
    get,
    path = "/api/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Summary statistics", body = StatsResponse),
        (status = 500, description = "Upstream vendor failure"),
    ),
    tag = "stats"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
    headers: HeaderMap,
) -> AppResult<Json<StatsResponse>> {
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let formatters = state
        .formatters
        .resolve(query.locale.as_deref(), accept_language);

    let window = window::resolve(query.start_date, query.end_date);
    let records = state.vendor_client.get_device_log(&window).await?;
    let points = adapter::adapt(&records, state.config.vendor_utc_offset);
    let summary = stats::summarize(&points);

    let labels = formatters.labels().clone();
    let placeholder = labels.placeholder.to_string();

    Ok(Json(StatsResponse {
        max_value: summary.max_value,
        max_value_display: summary
            .max_value
            .map_or_else(|| placeholder.clone(), |v| formatters.number(v)),
        max_timestamps: summary
            .max_timestamps
            .iter()
            .map(point::local_naive_string)
            .collect(),
        max_timestamps_display: summary
            .max_timestamps
            .iter()
            .map(|t| formatters.tooltip(t))
            .collect(),
        median_value: summary.median_value,
        median_value_display: summary
            .median_value
            .map_or(placeholder, |v| formatters.number(v)),
        labels,
    }))
}
