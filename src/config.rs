//! Runtime configuration for kiro-ai-service.
//!
//! Config is read once at startup from process environment variables and
//! validated before the server opens its port. Invalid values are rejected
//! with a clear error rather than silently falling back to defaults.
//!
//! Recognized variables (all optional):
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8001` |
//! | `ALLOWED_ORIGINS` | `https://localhost:3000,https://localhost:4000` |
//! | `SERVICE_NAME` | `Kiro AI Service` |
//! | `SERVICE_ID` | `kiro-ai` |
//! | `REQUEST_TIMEOUT_SECS` | `30` |
//! | `SHUTDOWN_GRACE_SECS` | `5` |

use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use thiserror::Error;

/// A configuration value that cannot be used to start the server.
///
/// All variants are startup-fatal: they surface through `main`'s error chain
/// and the process exits non-zero.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOST `{0}` is not a valid IP address")]
    InvalidHost(String),

    #[error("PORT `{0}` is not a valid port number")]
    InvalidPort(String),

    #[error("{name} `{value}` is not a positive whole number of seconds")]
    InvalidSeconds { name: &'static str, value: String },

    #[error("ALLOWED_ORIGINS must contain at least one origin")]
    EmptyOriginList,

    /// Browsers reject `Access-Control-Allow-Origin: *` on credentialed
    /// responses, so a wildcard entry can never produce working CORS here.
    #[error("ALLOWED_ORIGINS entry `{0}` contains a wildcard, which is incompatible with credentialed CORS")]
    WildcardOrigin(String),

    #[error("ALLOWED_ORIGINS entry `{0}` is not an http(s) origin of the form scheme://host[:port]")]
    InvalidOrigin(String),

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}

/// Immutable process-wide configuration.
///
/// Built once in `main`, wrapped in an `Arc`, and shared read-only with every
/// handler. There is no reload path; changing configuration means restarting
/// the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (default: all interfaces).
    pub host: IpAddr,

    /// TCP port to listen on (default: 8001).
    pub port: u16,

    /// Exact-match CORS origin allow-list.
    ///
    /// Entries are compared byte-for-byte against the request `Origin`
    /// header. Wildcards are rejected at load time; see
    /// [`ConfigError::WildcardOrigin`].
    pub allowed_origins: Vec<String>,

    /// Human-readable service name, used in the root endpoint's message.
    pub service_name: String,

    /// Machine-readable service identifier, reported by `/health`.
    pub service_id: String,

    /// Defensive per-request deadline. Handlers finish in microseconds, so
    /// this only ever fires on slow-loris style clients.
    pub request_timeout: Duration,

    /// How long in-flight requests may keep draining after a shutdown signal.
    pub shutdown_grace: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// The indirection exists so tests can supply variables without mutating
    /// process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host_raw = lookup("HOST").unwrap_or_else(|| defaults::HOST.to_string());
        let host: IpAddr = host_raw.parse().map_err(|_| ConfigError::InvalidHost(host_raw))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults::PORT,
        };

        let origins_raw =
            lookup("ALLOWED_ORIGINS").unwrap_or_else(|| defaults::ALLOWED_ORIGINS.to_string());
        let allowed_origins = parse_origin_list(&origins_raw)?;

        let service_name =
            lookup("SERVICE_NAME").unwrap_or_else(|| defaults::SERVICE_NAME.to_string());
        if service_name.trim().is_empty() {
            return Err(ConfigError::EmptyValue("SERVICE_NAME"));
        }

        let service_id = lookup("SERVICE_ID").unwrap_or_else(|| defaults::SERVICE_ID.to_string());
        if service_id.trim().is_empty() {
            return Err(ConfigError::EmptyValue("SERVICE_ID"));
        }

        let request_timeout = Duration::from_secs(parse_seconds(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            defaults::REQUEST_TIMEOUT_SECS,
        )?);

        let shutdown_grace = Duration::from_secs(parse_seconds(
            "SHUTDOWN_GRACE_SECS",
            lookup("SHUTDOWN_GRACE_SECS"),
            defaults::SHUTDOWN_GRACE_SECS,
        )?);

        Ok(Self {
            host,
            port,
            allowed_origins,
            service_name,
            service_id,
            request_timeout,
            shutdown_grace,
        })
    }

    /// The socket address the listener binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Split and validate a comma-separated origin list.
///
/// Each entry must be an absolute `http://` or `https://` origin with no
/// path component and no wildcard. Surrounding whitespace is tolerated;
/// empty entries (e.g. a trailing comma) are not.
fn parse_origin_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    let entries: Vec<&str> = raw.split(',').map(str::trim).collect();
    if entries.iter().all(|e| e.is_empty()) {
        return Err(ConfigError::EmptyOriginList);
    }

    let mut origins = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.is_empty() {
            return Err(ConfigError::InvalidOrigin(String::new()));
        }
        if entry.contains('*') {
            return Err(ConfigError::WildcardOrigin(entry.to_string()));
        }
        let rest = entry
            .strip_prefix("https://")
            .or_else(|| entry.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidOrigin(entry.to_string()))?;
        // An origin is scheme://host[:port]. Anything after the authority
        // (path, query, fragment) would never match a browser's Origin
        // header, and non-ASCII bytes cannot be echoed into a header value.
        if rest.is_empty() || rest.contains('/') || !entry.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ConfigError::InvalidOrigin(entry.to_string()));
        }
        origins.push(entry.to_string());
    }
    Ok(origins)
}

fn parse_seconds(
    name: &'static str,
    raw: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidSeconds { name, value: raw }),
    }
}

mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8001;
    pub const ALLOWED_ORIGINS: &str = "https://localhost:3000,https://localhost:4000";
    pub const SERVICE_NAME: &str = "Kiro AI Service";
    pub const SERVICE_ID: &str = "kiro-ai";
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const SHUTDOWN_GRACE_SECS: u64 = 5;
}
