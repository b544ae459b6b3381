//! HTTP surface of the service.
//!
//! The route table is deliberately explicit (two GET routes, nothing else)
//! so the dispatch behavior is auditable at a glance. Unmatched paths fall
//! through to axum's default 404; a matched path with the wrong method yields
//! 405. Everything else here is middleware assembly.

pub mod cors;
pub mod health;
pub mod request_id;
pub mod root;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, error};

/// Build the complete application: route table plus middleware stack.
///
/// Layer order, outermost first: trace, request-id, CORS, timeout, panic
/// boundary. CORS sits outside the timeout so even a 408 carries the
/// allow-origin headers a browser needs to read it.
pub fn app(config: Arc<Config>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .with_state(Arc::clone(&config))
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors::layer(&config))
        .layer(middleware::from_fn(request_id::propagate_request_id))
        .layer(trace_layer)
}
