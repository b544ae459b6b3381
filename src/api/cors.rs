//! Credentialed CORS for the browser front-ends.
//!
//! The allow-list is exact-match: a request `Origin` is echoed back in
//! `Access-Control-Allow-Origin` only when it equals one of the configured
//! origins byte-for-byte. Because responses carry
//! `Access-Control-Allow-Credentials: true`, browsers require concrete
//! values in the remaining CORS headers, so methods and headers mirror
//! whatever the preflight asked for instead of using the wildcard forms.
//!
//! Wildcard *origins* never reach this module: config validation rejects them
//! at startup.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;

/// Build the CORS layer from the validated origin allow-list.
pub fn layer(config: &Config) -> CorsLayer {
    // Config validation guarantees every entry is printable ASCII, so the
    // HeaderValue conversion cannot reject anything here.
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
