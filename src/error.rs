use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Vendor responded with a non-success HTTP status.
    #[error("Vendor HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// Transport-level failure reaching the vendor (DNS, TLS, timeout, ...).
    #[error("Vendor request failed: {0}")]
    Network(String),

    /// Vendor answered 2xx but its envelope carried `status != "ok"`.
    #[error("Vendor status \"{status}\": {message}")]
    UpstreamStatus {
        status: String,
        message: String,
        code: i64,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// The `err_code` reported in the failure envelope. Upstream HTTP errors
    /// carry the vendor's status code, vendor envelope errors carry the
    /// vendor's own code.
    #[must_use]
    pub fn err_code(&self) -> i64 {
        match self {
            Self::UpstreamHttp { status, .. } => i64::from(*status),
            Self::UpstreamStatus { code, .. } => *code,
            Self::BadRequest(_) => 400,
            Self::Network(_) | Self::Internal(_) | Self::Config(_) => 500,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Any upstream failure surfaces as a 500 from the proxy,
            // matching the contract the dashboard was built against.
            Self::UpstreamHttp { status, body } => {
                tracing::error!(vendor_status = status, body = %body, "Vendor HTTP error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Network(msg) => {
                tracing::error!(error = %msg, "Vendor request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::UpstreamStatus { status, message, code } => {
                tracing::error!(
                    vendor_status = %status,
                    err_code = code,
                    err_msg = %message,
                    "Vendor rejected request"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "status": "error",
            "err_msg": self.to_string(),
            "err_code": self.err_code(),
            "data": [],
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
