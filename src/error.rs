//! Request-boundary error handling.
//!
//! The two liveness handlers cannot fail, so there is no per-handler error
//! type here. What this module guards against is the *unexpected* case: a
//! panic escaping a handler. [`handle_panic`] is installed via
//! `tower_http::catch_panic::CatchPanicLayer::custom` and converts any panic
//! into a `500` JSON response, so a single broken request can never take the
//! process down or leak internals to the client.
//!
//! The panic payload is logged server-side at `error` level; the client only
//! ever sees the fixed body `{"error": "internal server error"}`.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Convert a caught handler panic into an opaque `500` response.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}
