//! Liveness probe endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::Config;

/// `GET /health` response body.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
}

/// `GET /health` — always `200` with `{"status": "ok", "service": "<id>"}`.
///
/// No downstream dependencies are consulted and nothing blocks, so this is
/// safe to wire up as a container or load-balancer liveness probe: it answers
/// exactly when the process can accept requests.
pub async fn health(State(config): State<Arc<Config>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: config.service_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok_with_the_configured_service_id() {
        let config = Arc::new(Config::from_lookup(|_| None).unwrap());
        let Json(body) = health(State(config)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.service, "kiro-ai");
    }

    #[test]
    fn serializes_to_the_exact_contract_shape() {
        let body = HealthStatus {
            status: "ok",
            service: "kiro-ai".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "status": "ok", "service": "kiro-ai" })
        );
    }
}
