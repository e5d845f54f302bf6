//! Forwarding handlers.
//!
//! Every handler injects the vendor credentials, forwards one call and relays the vendor's
//! status code and body text unchanged. Only a transport failure to the vendor produces a
//! response of the gateway's own (`500 {"error": ...}`).

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use utoipa::{IntoParams, ToSchema};

use dx_core::constants::{CLIENT_INTERVIEW_HEADER, VENDOR_INTERVIEW_HEADER};

use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Symptom phrase to look up
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
}

/// Vendor answer, relayed as-is.
struct Relayed {
    status: StatusCode,
    body: String,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> Response {
    tracing::error!("{} proxy error: {:?}", endpoint, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// Adds vendor credentials and sends the request.
async fn send(state: &AppState, request: reqwest::RequestBuilder) -> reqwest::Result<Relayed> {
    let cfg = &state.cfg;
    let response = request
        .header("App-Id", cfg.app_id())
        .header("App-Key", cfg.app_key())
        .header("Model", cfg.model())
        .header(header::ACCEPT.as_str(), "application/json")
        .send()
        .await?;
    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = response.text().await?;
    Ok(Relayed { status, body })
}

/// Posts a diagnosis or triage body, carrying the interview id across.
async fn forward_interview(
    state: &AppState,
    endpoint: &'static str,
    headers: &HeaderMap,
    body: Value,
) -> Response {
    let payload = body.to_string();
    let mut request = state
        .http
        .post(state.cfg.vendor_endpoint(endpoint))
        .header(header::CONTENT_TYPE.as_str(), "application/json")
        .body(payload.clone());
    if let Some(id) = headers
        .get(CLIENT_INTERVIEW_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        request = request.header(VENDOR_INTERVIEW_HEADER, id);
    }

    let started = Instant::now();
    match send(state, request).await {
        Ok(relayed) => {
            tracing::info!(
                endpoint,
                ms = started.elapsed().as_millis() as u64,
                req_bytes = payload.len(),
                res_bytes = relayed.body.len(),
                status = relayed.status.as_u16(),
                "vendor call"
            );
            relayed.into_response()
        }
        Err(err) => transport_error(endpoint, err),
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Gateway is alive", body = HealthRes)
    )
)]
/// Liveness check; does not contact the vendor.
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes { ok: true })
}

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Vendor search hits, relayed"),
        (status = 500, description = "Vendor unreachable")
    )
)]
/// Looks up a phrase in the vendor's concept search.
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let phrase = params.q.unwrap_or_default();
    let request = state
        .http
        .get(state.cfg.vendor_endpoint("search"))
        .query(&[("phrase", phrase.as_str())]);
    match send(&state, request).await {
        Ok(relayed) => relayed.into_response(),
        Err(err) => transport_error("search", err),
    }
}

#[utoipa::path(
    post,
    path = "/api/parse",
    request_body = dx_core::ParseRequest,
    responses(
        (status = 200, description = "Vendor mentions, relayed"),
        (status = 405, description = "Parse is not enabled for these credentials"),
        (status = 500, description = "Vendor unreachable")
    )
)]
/// Extracts mentions from free text. Only `text`, `sex` and `age` are forwarded.
pub async fn parse(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let text = body
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let payload = json!({
        "text": text,
        "age": body.get("age"),
        "sex": body.get("sex"),
    });
    let request = state
        .http
        .post(state.cfg.vendor_endpoint("parse"))
        .json(&payload);
    match send(&state, request).await {
        Ok(relayed) => relayed.into_response(),
        Err(err) => transport_error("parse", err),
    }
}

#[utoipa::path(
    post,
    path = "/api/diagnosis",
    request_body = dx_core::InterviewRequest,
    params(
        ("X-Interview-Id" = Option<String>, Header, description = "Interview correlation id")
    ),
    responses(
        (status = 200, description = "Vendor diagnosis, relayed"),
        (status = 500, description = "Vendor unreachable")
    )
)]
/// Forwards the body verbatim to the vendor diagnosis endpoint.
pub async fn diagnosis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    forward_interview(&state, "diagnosis", &headers, body).await
}

#[utoipa::path(
    post,
    path = "/api/triage",
    request_body = dx_core::InterviewRequest,
    params(
        ("X-Interview-Id" = Option<String>, Header, description = "Interview correlation id")
    ),
    responses(
        (status = 200, description = "Vendor triage, relayed"),
        (status = 500, description = "Vendor unreachable")
    )
)]
/// Forwards the body verbatim to the vendor triage endpoint.
pub async fn triage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    forward_interview(&state, "triage", &headers, body).await
}

#[utoipa::path(
    get,
    path = "/api/info",
    responses(
        (status = 200, description = "Vendor model information, relayed"),
        (status = 500, description = "Vendor unreachable")
    )
)]
/// Snapshot of the vendor model in use.
pub async fn info(State(state): State<AppState>) -> Response {
    let request = state.http.get(state.cfg.vendor_endpoint("info"));
    match send(&state, request).await {
        Ok(relayed) => relayed.into_response(),
        Err(err) => transport_error("info", err),
    }
}
