use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use matchday_core::{RelayEngine, RelayError, decode};

use crate::cors;
use crate::envelope;

#[derive(Clone)]
pub struct RelayState {
    pub engine: Arc<RelayEngine>,
}

pub fn relay_router(engine: Arc<RelayEngine>) -> Router {
    let state = RelayState { engine };
    Router::new()
        .route("/api/analyze", any(analyze))
        .route("/api/health", get(health))
        .with_state(state)
}

async fn analyze(
    State(state): State<RelayState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return cors::preflight();
    }
    if method != Method::GET && method != Method::POST {
        return envelope::failure(&RelayError::MethodNotAllowed(method.to_string()));
    }

    // A misconfigured deployment reports the credential error before anything
    // is read from the request.
    if !state.engine.has_credential() {
        return envelope::failure(&RelayError::MissingCredential);
    }

    let decoded = if method == Method::GET {
        decode::decode_query(query.as_deref())
    } else {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        decode::decode_body(content_type, &body)
    };
    let input = match decoded {
        Ok(input) => input,
        Err(err) => {
            debug!(error = %err, "request rejected before upstream");
            return envelope::failure(&err);
        }
    };

    match state.engine.run(&input).await {
        Ok(analysis) => envelope::success(&analysis),
        Err(err) => envelope::failure(&err),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    has_key: bool,
    hint: &'static str,
}

async fn health(State(state): State<RelayState>) -> Response {
    let mut response = Json(HealthResponse {
        ok: true,
        has_key: state.engine.has_credential(),
        hint: "GET /api/analyze?text=ola",
    })
    .into_response();
    cors::apply_cors(response.headers_mut());
    response
}
