//! Backend endpoint configuration.
//!
//! The base URL resolves from the environment at client construction time,
//! mirroring how deployments point different installs at different backends.

use std::env;

/// Default Augur backend endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8019";

/// Environment variable that overrides the backend endpoint.
pub const BASE_URL_ENV: &str = "AUGUR_API_URL";

/// Resolve the backend base URL from the environment.
///
/// Reads `AUGUR_API_URL` and falls back to `DEFAULT_BASE_URL` when the
/// variable is unset or blank. The result is normalized.
pub fn resolve_base_url() -> String {
    match env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => normalize_base_url(&url),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Trim the trailing slash so endpoint paths can always be appended.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
