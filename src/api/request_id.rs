//! `X-Request-ID` propagation.
//!
//! Every response carries an `X-Request-ID` header: the caller's value when
//! one was supplied, otherwise a freshly minted UUID v4. The id is attached
//! to a tracing span so the access log lines and any diagnostics for the
//! same request share one identifier.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument as _;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Axum middleware: tag the request with an id and echo it on the response.
pub async fn propagate_request_id(req: Request, next: Next) -> Response {
    let id = match req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => Uuid::new_v4().to_string(),
    };

    let span = tracing::info_span!("request", request_id = %id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use tower::ServiceExt; // oneshot

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(propagate_request_id))
    }

    #[tokio::test]
    async fn mints_an_id_when_the_caller_sends_none() {
        let resp = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("response should carry a request id")
            .to_str()
            .unwrap();
        Uuid::parse_str(id).expect("generated id should be a UUID");
    }

    #[tokio::test]
    async fn echoes_a_caller_supplied_id() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "trace-me-7f3a")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers().get(REQUEST_ID_HEADER).unwrap(),
            "trace-me-7f3a"
        );
    }

    #[tokio::test]
    async fn generated_ids_are_unique_per_request() {
        let app = app();
        let mut ids = Vec::new();
        for _ in 0..2 {
            let resp = app
                .clone()
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            ids.push(
                resp.headers()
                    .get(REQUEST_ID_HEADER)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .to_owned(),
            );
        }
        assert_ne!(ids[0], ids[1]);
    }
}
