//! Store API error taxonomy and error-body extraction.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure; the store API could not be reached.
    #[error("store API unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The store API rejected the request.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
    },

    /// A successful status carried a body that does not match the
    /// expected shape.
    #[error("unexpected response from store API: {0}")]
    UnexpectedResponse(String),
}

/// Build the rejection error for a non-2xx response.
///
/// Prefers field-qualified validation messages (`detail` as a list of
/// `{loc, msg}` entries), then flat `detail` / `message` strings, then
/// the HTTP status itself.
pub(crate) fn rejection(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(extract_message)
        .unwrap_or_else(|| format!("request failed with status {status}"));

    ApiError::Rejected { status, message }
}

fn extract_message(value: &Value) -> Option<String> {
    match value.get("detail") {
        Some(Value::Array(entries)) => {
            let fields: Vec<String> = entries.iter().filter_map(field_message).collect();
            if fields.is_empty() {
                None
            } else {
                Some(fields.join("; "))
            }
        }
        Some(Value::String(detail)) => Some(detail.clone()),
        _ => value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned),
    }
}

fn field_message(entry: &Value) -> Option<String> {
    let msg = entry.get("msg").and_then(Value::as_str)?;

    let loc = entry
        .get("loc")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(name) => Some(name.clone()),
                    Value::Number(index) => Some(index.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();

    if loc.is_empty() {
        Some(msg.to_owned())
    } else {
        Some(format!("{loc}: {msg}"))
    }
}
