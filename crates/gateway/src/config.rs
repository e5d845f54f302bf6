//! Gateway configuration.
//!
//! Resolved once at startup from the process environment (after `.env` is loaded) and then
//! shared read-only with every handler.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_VENDOR_URL: &str = "https://api.infermedica.com/v3";
pub const DEFAULT_MODEL: &str = "infermedica-en";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    app_id: String,
    app_key: String,
    model: String,
    vendor_url: String,
    addr: SocketAddr,
    cors_origin: HeaderValue,
    public_dir: PathBuf,
}

impl GatewayConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `INFERMEDICA_APP_ID`, `INFERMEDICA_APP_KEY`: vendor credentials (default: empty)
    /// - `INFERMEDICA_MODEL`: vendor model (default: "infermedica-en")
    /// - `INFERMEDICA_API_URL`: vendor base URL (default: "https://api.infermedica.com/v3")
    /// - `DX_GATEWAY_ADDR`: listen address (default: "0.0.0.0:3000"); `PORT` overrides the port
    /// - `CORS_ORIGIN`: allowed browser origin (default: "http://localhost:3000")
    /// - `DX_PUBLIC_DIR`: static file directory (default: "public")
    ///
    /// # Errors
    ///
    /// Returns an error if the address, port or CORS origin cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut addr: SocketAddr = var("DX_GATEWAY_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.into())
            .parse()?;
        if let Some(port) = var("PORT") {
            addr.set_port(port.parse()?);
        }

        let cors_origin = var("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());
        let cors_origin = HeaderValue::from_str(&cors_origin)
            .map_err(|_| anyhow::anyhow!("invalid CORS_ORIGIN: '{}'", cors_origin))?;

        Ok(Self {
            app_id: var("INFERMEDICA_APP_ID").unwrap_or_default(),
            app_key: var("INFERMEDICA_APP_KEY").unwrap_or_default(),
            model: var("INFERMEDICA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            vendor_url: var("INFERMEDICA_API_URL")
                .unwrap_or_else(|| DEFAULT_VENDOR_URL.into())
                .trim_end_matches('/')
                .to_string(),
            addr,
            cors_origin,
            public_dir: var("DX_PUBLIC_DIR")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.into())
                .into(),
        })
    }

    /// False when either vendor credential is missing; calls will still be forwarded.
    pub fn has_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.app_key.is_empty()
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full vendor URL of an endpoint, e.g. `vendor_endpoint("triage")`.
    pub fn vendor_endpoint(&self, endpoint: &str) -> String {
        format!("{}/{}", self.vendor_url, endpoint)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn cors_origin(&self) -> &HeaderValue {
        &self.cors_origin
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}
