use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::cors::cors_headers;

// Taken from https://github.com/tokio-rs/axum/blob/main/examples/anyhow-error-response/src/main.rs
#[derive(Debug)]
pub struct ProxyError {
    pub status: StatusCode,
    pub message: HttpErrorResponse,
    /// Validated origin to reflect in the CORS headers, if any
    pub cors_origin: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HttpErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl HttpErrorResponse {
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

impl From<String> for HttpErrorResponse {
    fn from(message: String) -> Self {
        HttpErrorResponse {
            error: message,
            origin: None,
            detail: None,
            raw: None,
        }
    }
}

impl From<&str> for HttpErrorResponse {
    fn from(message: &str) -> Self {
        HttpErrorResponse::from(message.to_string())
    }
}

impl ProxyError {
    pub fn new(status: StatusCode, message: impl Into<HttpErrorResponse>) -> Self {
        ProxyError {
            status,
            message: message.into(),
            cors_origin: None,
        }
    }

    pub fn with_cors(mut self, origin: &str) -> Self {
        self.cors_origin = Some(origin.to_string());
        self
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let headers = cors_headers(self.cors_origin.as_deref());
        (self.status, headers, Json(self.message)).into_response()
    }
}

pub type ProxyResult<T, E = ProxyError> = Result<T, E>;

#[macro_export]
macro_rules! bail_proxy {
    ($status_code:expr, $error_message:expr) => {
        return Err($crate::error::ProxyError::new($status_code, $error_message))
    };
}

/// Keeps at most `max` characters of `text`, counted as Unicode scalar values.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
