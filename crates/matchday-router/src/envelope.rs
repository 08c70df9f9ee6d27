use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use matchday_core::{Analysis, RelayError};

use crate::cors::apply_cors;

fn json_response(status: StatusCode, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    apply_cors(response.headers_mut());
    response
}

/// 200 envelope: `{ text, used: { version, model } }`, with a `note` inside
/// `used` when the conservative default was substituted.
pub fn success(analysis: &Analysis) -> Response {
    let mut used = serde_json::to_value(analysis.used).unwrap_or(Value::Null);
    if let (Some(note), Some(map)) = (analysis.note, used.as_object_mut()) {
        map.insert("note".to_string(), Value::String(note.to_string()));
    }
    json_response(
        StatusCode::OK,
        json!({ "text": analysis.text, "used": used }),
    )
}

/// Error envelope. Upstream failures carry their surfaced status and the
/// upstream error body as `details`; the credential never appears anywhere.
pub fn failure(error: &RelayError) -> Response {
    let status =
        StatusCode::from_u16(error.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match error {
        RelayError::MissingCredential => json!({ "error": "Missing GEMINI_API_KEY" }),
        RelayError::EmptyInput => json!({ "error": "No input text provided" }),
        RelayError::InvalidBody(message) => {
            json!({ "error": "Invalid request body", "message": message })
        }
        RelayError::MethodNotAllowed(method) => json!({
            "error": "Method not allowed",
            "message": format!("{method} is not supported on this endpoint"),
        }),
        RelayError::NoCandidates => json!({
            "error": "Gemini error",
            "message": error.to_string(),
            "used": Value::Null,
            "details": Value::Null,
        }),
        RelayError::UpstreamAuth(failure) | RelayError::AllCandidatesFailed(failure) => json!({
            "error": "Gemini error",
            "message": failure.message,
            "used": failure
                .candidate
                .and_then(|candidate| serde_json::to_value(candidate).ok())
                .unwrap_or(Value::Null),
            "details": failure.details.clone().unwrap_or(Value::Null),
        }),
    };
    let mut response = json_response(status, body);
    if matches!(error, RelayError::MethodNotAllowed(_)) {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("GET,POST,OPTIONS"));
    }
    response
}
