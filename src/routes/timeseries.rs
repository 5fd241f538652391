use axum::{
    Json,
    extract::{Query, State},
    http::header::{self, HeaderValue},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;
use utoipa::IntoParams;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::timeseries::{TimeSeriesPoint, window};
use crate::vendor::adapter;

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesQuery {
    /// Start of the query window (ISO 8601). Defaults to 24 hours ago.
    pub start_date: Option<DateTime<Utc>>,
    /// End of the query window (ISO 8601). Defaults to now.
    pub end_date: Option<DateTime<Utc>>,
    /// Response format: json (default) or csv
    #[serde(default = "default_format")]
    pub format: String,
}

/// Get the water-level time series for a date range
///
/// Proxies the vendor device log, flattened to `{timestamp, value}` points.
/// Long ranges are served from the vendor's downsampled feed.
#[utoipa::path(
    get,
    path = "/api/timeseries",
    params(TimeSeriesQuery),
    responses(
        (status = 200, description = "Chart-ready points", body = Vec<TimeSeriesPoint>),
        (status = 500, description = "Upstream vendor failure"),
    ),
    tag = "timeseries"
)]
pub async fn get_timeseries(
    State(state): State<AppState>,
    Query(query): Query<TimeSeriesQuery>,
) -> AppResult<Response> {
    let window = window::resolve(query.start_date, query.end_date);
    let records = state.vendor_client.get_device_log(&window).await?;
    let points = adapter::adapt(&records, state.config.vendor_utc_offset);

    tracing::debug!(
        points = points.len(),
        start = %window.start,
        end = %window.end,
        "Time series assembled"
    );

    match query.format.to_lowercase().as_str() {
        "csv" => build_csv_response(points),
        _ => Ok(Json(points).into_response()),
    }
}

fn build_csv_response(points: Vec<TimeSeriesPoint>) -> AppResult<Response> {
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<String, std::io::Error>>(100);

    tokio::spawn(async move {
        let _ = tx.send(Ok("time,value\n".to_string())).await;

        for point in &points {
            let row = format!("{},{}\n", point.local_timestamp(), point.value);
            if tx.send(Ok(row)).await.is_err() {
                break;
            }
        }
    });

    let stream = ReceiverStream::new(rx);
    let body = axum::body::Body::from_stream(stream);

    Response::builder()
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"))
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}
