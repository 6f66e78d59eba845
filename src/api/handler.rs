use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::api::cors::cors_headers;
use crate::api::request::EvaluationRequest;
use crate::api::AppState;
use crate::bail_proxy;
use crate::error::{truncate_chars, HttpErrorResponse, ProxyError, ProxyResult};
use crate::extractors::RequestOrigin;
use crate::upstream::prompt::PromptPair;

const MAX_DETAIL_CHARS: usize = 300;
const MAX_RAW_CHARS: usize = 400;
/// Largest submission body read, checked after the method and origin gates
pub(crate) const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[axum_macros::debug_handler]
#[tracing::instrument(level = "info", skip_all, fields(%method, origin = %origin.raw))]
pub(crate) async fn handle_evaluation(
    State(state): State<AppState>,
    method: Method,
    origin: RequestOrigin,
    body: Body,
) -> ProxyResult<Response> {
    if method == Method::OPTIONS {
        return Ok((StatusCode::NO_CONTENT, cors_headers(origin.allowed.as_deref())).into_response());
    }

    if method != Method::POST {
        warn!("Rejected {} request", method);
        return Ok((StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response());
    }

    let Some(allowed) = origin.allowed else {
        warn!("Rejected request from disallowed origin");
        return Err(ProxyError::new(
            StatusCode::FORBIDDEN,
            HttpErrorResponse::from("Origin not allowed").with_origin(origin.raw),
        ));
    };

    let Ok(body) = to_bytes(body, MAX_BODY_BYTES).await else {
        warn!("Failed to read request body");
        return Err(ProxyError::new(StatusCode::BAD_REQUEST, "Invalid JSON").with_cors(&allowed));
    };

    let verdict = evaluate(&state, &body)
        .await
        .map_err(|err| err.with_cors(&allowed))?;
    Ok((StatusCode::OK, cors_headers(Some(&allowed)), Json(verdict)).into_response())
}

/// Validates the submission, asks the provider for a verdict and parses it.
async fn evaluate(state: &AppState, body: &[u8]) -> ProxyResult<Value> {
    let request = EvaluationRequest::from_body(body).inspect_err(|err| {
        warn!(status = %err.status, "Rejected invalid submission");
    })?;

    let Some(provider) = &state.provider else {
        error!("No OpenAI API key configured");
        bail_proxy!(StatusCode::INTERNAL_SERVER_ERROR, "Missing OPENAI_API_KEY");
    };

    let prompt = PromptPair::for_request(&request);
    let text = match provider.complete(&prompt).await {
        Ok(text) => text,
        Err(err) => {
            error!("Upstream evaluation failed: {}", err);
            return Err(ProxyError::new(
                StatusCode::BAD_GATEWAY,
                HttpErrorResponse::from("OpenAI error")
                    .with_detail(truncate_chars(&err.detail(), MAX_DETAIL_CHARS)),
            ));
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(verdict) => {
            let label = verdict.get("verdict").and_then(|v| v.as_str());
            info!(verdict = label, "Relaying evaluation");
            Ok(verdict)
        }
        Err(err) => {
            error!("Model returned non-JSON output: {}", err);
            Err(ProxyError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                HttpErrorResponse::from("Model returned non-JSON")
                    .with_raw(truncate_chars(&text, MAX_RAW_CHARS)),
            ))
        }
    }
}
