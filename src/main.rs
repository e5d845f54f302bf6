use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dx_gateway::GatewayConfig;

/// Main entry point for the dxv2 gateway
///
/// Loads `.env`, initialises logging and serves the proxy gateway until stopped.
///
/// # Environment Variables
/// - `INFERMEDICA_APP_ID`, `INFERMEDICA_APP_KEY`: vendor credentials injected into every call
/// - `INFERMEDICA_MODEL`: vendor model (default: "infermedica-en")
/// - `INFERMEDICA_API_URL`: vendor base URL (default: "https://api.infermedica.com/v3")
/// - `DX_GATEWAY_ADDR`: listen address (default: "0.0.0.0:3000"); `PORT` overrides the port
/// - `CORS_ORIGIN`: allowed browser origin (default: "http://localhost:3000")
/// - `DX_PUBLIC_DIR`: static front-end directory (default: "public")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dx_gateway=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = GatewayConfig::from_env()?;
    dx_gateway::serve(cfg).await
}
