//! # dxv2 Gateway
//!
//! Proxy between dxv2 clients and the Infermedica API.
//!
//! Handles:
//! - forwarding search, parse, diagnosis, triage and info calls with injected credentials
//! - carrying the client's interview id into the vendor's `Interview-Id` header
//! - serving the static front-end, CORS, request logging
//! - OpenAPI/Swagger documentation of the `/api` routes
//!
//! The gateway holds no per-user state; all evidence and interview logic lives in `dx-core`.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod proxy;

use axum::{
    extract::Request,
    http::Method,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::GatewayConfig;

/// Shared, read-only state of every handler.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<GatewayConfig>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        Self {
            cfg: Arc::new(cfg),
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.cfg
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        proxy::health,
        proxy::search,
        proxy::parse,
        proxy::diagnosis,
        proxy::triage,
        proxy::info,
    ),
    components(schemas(
        proxy::HealthRes,
        dx_core::ParseRequest,
        dx_core::InterviewRequest,
        dx_core::EvidenceItem,
        dx_core::Choice,
        dx_core::EvidenceSource,
        dx_core::Sex,
        dx_core::Age,
        dx_core::AgeUnit,
    ))
)]
pub struct ApiDoc;

async fn log_api_requests(request: Request, next: Next) -> Response {
    if request.uri().path().starts_with("/api/") {
        tracing::info!(method = %request.method(), path = request.uri().path(), "api request");
    }
    next.run(request).await
}

/// Builds the full gateway router: API routes, docs, static files, CORS and logging.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.cfg.cors_origin().clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    let public_dir = state.cfg.public_dir().to_path_buf();

    Router::new()
        .route("/api/health", get(proxy::health))
        .route("/api/search", get(proxy::search))
        .route("/api/parse", post(proxy::parse))
        .route("/api/diagnosis", post(proxy::diagnosis))
        .route("/api/triage", post(proxy::triage))
        .route("/api/info", get(proxy::info))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors)
        .layer(middleware::from_fn(log_api_requests))
}

/// Binds the configured address and serves until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(cfg: GatewayConfig) -> anyhow::Result<()> {
    if !cfg.has_credentials() {
        tracing::warn!("INFERMEDICA_APP_ID or INFERMEDICA_APP_KEY missing. Set them in .env");
    }
    let addr = cfg.addr();
    let app = router(AppState::new(cfg));

    tracing::info!("-- Starting dxv2 gateway on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
