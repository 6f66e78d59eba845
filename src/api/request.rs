use axum::http::StatusCode;
use serde_json::Value;

use crate::bail_proxy;
use crate::error::ProxyResult;

pub(crate) const MIN_RESPONSE_CHARS: usize = 10;
pub(crate) const MAX_RESPONSE_CHARS: usize = 2000;

/// A learner submission that passed validation and is ready to be sent upstream.
#[derive(Debug, PartialEq)]
pub struct EvaluationRequest {
    pub response_text: String,
    pub learning_objective: String,
    pub criteria: Vec<String>,
}

impl EvaluationRequest {
    /// Parses and validates a raw request body.
    ///
    /// Fields are checked in order and the first failure wins. A `criteria` field that is not
    /// an array is treated as empty rather than rejected.
    pub fn from_body(body: &[u8]) -> ProxyResult<Self> {
        let Ok(body) = serde_json::from_slice::<Value>(body) else {
            bail_proxy!(StatusCode::BAD_REQUEST, "Invalid JSON");
        };

        let response_text = field_text(body.get("response_text")).trim().to_string();
        // Counts Unicode scalar values, so astral characters count once rather than as two
        // UTF-16 units, and `str::trim` keeps U+FEFF
        let length = response_text.chars().count();
        if !(MIN_RESPONSE_CHARS..=MAX_RESPONSE_CHARS).contains(&length) {
            bail_proxy!(StatusCode::BAD_REQUEST, "Response length out of range");
        }

        let learning_objective = field_text(body.get("learning_objective"))
            .trim()
            .to_string();
        if learning_objective.is_empty() {
            bail_proxy!(StatusCode::BAD_REQUEST, "Missing learning_objective");
        }

        let criteria = match body.get("criteria") {
            Some(Value::Array(items)) => items.iter().map(|c| string_form(Some(c))).collect(),
            _ => Vec::new(),
        };

        Ok(EvaluationRequest {
            response_text,
            learning_objective,
            criteria,
        })
    }
}

/// Text of a top-level field. Falsy values (`false`, zero, empty array) count as missing.
fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::Array(items)) if items.is_empty() => String::new(),
        other => string_form(other),
    }
}

/// Renders a loosely typed JSON field as text. Missing and null fields become empty.
fn string_form(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
