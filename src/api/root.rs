//! Root identity endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::Config;

/// `GET /` response body.
#[derive(Debug, Serialize)]
pub struct RootInfo {
    pub message: String,
}

/// `GET /` — identifies the service and confirms it is accepting requests.
///
/// The message is rebuilt per request from immutable config; there is no
/// state to observe and nothing here can fail.
pub async fn root(State(config): State<Arc<Config>>) -> Json<RootInfo> {
    Json(RootInfo {
        message: format!("{} is running", config.service_name),
    })
}
