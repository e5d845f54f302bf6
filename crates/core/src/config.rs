//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the gateway client.
//! Nothing in this crate reads environment variables while a diagnosis is running.

use std::time::Duration;

use crate::constants::DEFAULT_GATEWAY_URL;
use crate::{DxError, DxResult};

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    gateway_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// A trailing `/` on `gateway_url` is dropped so route paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidInput`] if `gateway_url` is empty or not an http(s) URL.
    pub fn new(gateway_url: impl Into<String>, timeout: Option<Duration>) -> DxResult<Self> {
        let gateway_url = gateway_url.into().trim().trim_end_matches('/').to_string();
        if gateway_url.is_empty() {
            return Err(DxError::InvalidInput("gateway_url cannot be empty".into()));
        }
        if !(gateway_url.starts_with("http://") || gateway_url.starts_with("https://")) {
            return Err(DxError::InvalidInput(format!(
                "gateway_url must start with http:// or https://, got: '{}'",
                gateway_url
            )));
        }

        Ok(Self {
            gateway_url,
            timeout,
        })
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of a gateway route, e.g. `route("parse")`.
    pub fn route(&self, path: &str) -> String {
        format!("{}/{}", self.gateway_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout: None,
        }
    }
}

/// Resolve the gateway URL from an optional override value.
///
/// If `value` is `None` or empty/whitespace, returns the default gateway URL.
pub fn gateway_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash_and_builds_routes() {
        let cfg = ClientConfig::new("http://127.0.0.1:3000/api/", None).unwrap();
        assert_eq!(cfg.gateway_url(), "http://127.0.0.1:3000/api");
        assert_eq!(cfg.route("parse"), "http://127.0.0.1:3000/api/parse");
        assert_eq!(cfg.route("/triage"), "http://127.0.0.1:3000/api/triage");
    }

    #[test]
    fn new_rejects_empty_and_non_http_urls() {
        assert!(matches!(
            ClientConfig::new("  ", None),
            Err(DxError::InvalidInput(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com", None),
            Err(DxError::InvalidInput(_))
        ));
    }

    #[test]
    fn gateway_url_falls_back_to_default() {
        assert_eq!(gateway_url_from_env_value(None), DEFAULT_GATEWAY_URL);
        assert_eq!(
            gateway_url_from_env_value(Some("   ".into())),
            DEFAULT_GATEWAY_URL
        );
        assert_eq!(
            gateway_url_from_env_value(Some(" http://gw:8080/api ".into())),
            "http://gw:8080/api"
        );
    }
}
