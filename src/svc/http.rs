//! HTTP transport — maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command` — dispatch a command. Body = JSON input, request
//!   headers → session (the auth layer in front sets `x-actor-id`).
//! - `GET /health` — health check returning `{ "ok": true, "commands": [...] }`.
//!
//! Every response body is an `ApiEnvelope`, errors included.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::service::Service;
use super::session::Session;

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<R: Send + Sync + 'static>(service: Arc<Service<R>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", axum::routing::post(command_handler))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<R: Send + Sync + 'static>(
    service: Arc<Service<R>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "serving engagement commands");
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    let commands: Vec<&str> = service.commands();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /:command` — dispatch with the JSON body as input and headers as
/// session variables.
async fn command_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let session = session_from_headers(&headers);
    let envelope = service.dispatch_request(&super::service::CommandRequest {
        command,
        input,
        session_variables: session.variables().clone(),
    });
    let status =
        StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

/// Extract session variables from HTTP headers.
///
/// All headers are lowercased and included as session variables.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut vars = std::collections::HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            vars.insert(name.as_str().to_string(), v.to_string());
        }
    }
    Session::from_map(vars)
}
