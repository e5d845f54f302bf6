//! `GatewayClient` against a throwaway HTTP server that mimics the gateway routes.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dx_core::{
    Capability, ClientConfig, Demographics, DiagnosisOrchestrator, DxError, GatewayClient,
    ParseRequest, Session, Sex, TriageLevel, VendorApi,
};

#[derive(Clone, Default)]
struct Seen {
    interview_ids: Arc<Mutex<Vec<String>>>,
    search_terms: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn spawn(app: Router) -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ClientConfig::new(format!("http://{}/api", addr), None).unwrap()
}

async fn search(State(seen): State<Seen>, Query(q): Query<HashMap<String, String>>) -> String {
    let term = q.get("q").cloned().unwrap_or_default();
    seen.search_terms.lock().unwrap().push(term.clone());
    match term.as_str() {
        "fever" => json!([{ "id": "c_1", "type": "condition" }, { "id": "s_98", "type": "symptom" }]),
        "cough" => json!([{ "id": "s_102", "label": "Cough" }]),
        _ => Value::Null,
    }
    .to_string()
}

async fn record_interview(seen: &Seen, headers: &HeaderMap, body: Value) {
    let id = headers
        .get("x-interview-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    seen.interview_ids.lock().unwrap().push(id);
    seen.bodies.lock().unwrap().push(body);
}

async fn diagnosis(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record_interview(&seen, &headers, body).await;
    Json(json!({
        "should_stop": true,
        "conditions": [{ "id": "c_10", "name": "Influenza", "common_name": "Flu", "probability": 0.62 }]
    }))
}

async fn triage(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record_interview(&seen, &headers, body).await;
    Json(json!({ "triage": { "level": "emergency" } }))
}

fn fallback_gateway(seen: Seen) -> Router {
    Router::new()
        .route(
            "/api/parse",
            post(|| async { (StatusCode::METHOD_NOT_ALLOWED, "parse disabled").into_response() }),
        )
        .route("/api/search", get(search))
        .route("/api/diagnosis", post(diagnosis))
        .route("/api/triage", post(triage))
        .with_state(seen)
}

#[tokio::test]
async fn parse_405_surfaces_structured_status() {
    let client = GatewayClient::new(spawn(fallback_gateway(Seen::default())).await).unwrap();
    let request = ParseRequest::new("fever", &Demographics::new(Sex::Male, 30));

    let err = client.parse(&request).await.unwrap_err();

    match err {
        DxError::Boundary {
            capability,
            status,
            body,
        } => {
            assert_eq!(capability, Capability::Parse);
            assert_eq!(status.as_u16(), 405);
            assert_eq!(body, "parse disabled");
        }
        other => panic!("expected boundary error, got {other:?}"),
    }
}

#[tokio::test]
async fn search_null_body_reads_as_no_hits() {
    let seen = Seen::default();
    let client = GatewayClient::new(spawn(fallback_gateway(seen.clone())).await).unwrap();

    assert!(client.search("glitter & glue").await.unwrap().is_empty());
    assert_eq!(
        seen.search_terms.lock().unwrap().as_slice(),
        ["glitter & glue".to_string()]
    );
}

#[tokio::test]
async fn fallback_run_over_http_threads_interview_id() {
    let seen = Seen::default();
    let client = GatewayClient::new(spawn(fallback_gateway(seen.clone())).await).unwrap();

    let mut session = Session::new();
    session.add_symptom("fever");
    session.add_symptom("sparkles");
    session.add_symptom("cough");
    session.set_demographics(Demographics::new(Sex::Female, 52));
    let id = session.interview_id().to_string();
    let mut orchestrator = DiagnosisOrchestrator::new(client, session);

    let report = orchestrator.start_diagnosis().await.unwrap();

    assert_eq!(report.level(), Some(TriageLevel::Emergency));
    assert!(report.to_string().contains("Flu — 62.0% probability"));

    assert_eq!(
        seen.search_terms.lock().unwrap().as_slice(),
        ["fever", "sparkles", "cough"]
    );
    assert_eq!(seen.interview_ids.lock().unwrap().as_slice(), [id.clone(), id]);

    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(
        bodies[0],
        json!({
            "sex": "female",
            "age": { "value": 52, "unit": "year" },
            "evidence": [
                { "id": "s_98", "choice_id": "present", "source": "initial" },
                { "id": "s_102", "choice_id": "present", "source": "initial" }
            ]
        })
    );
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = ClientConfig::new(format!("http://{}/api", addr), None).unwrap();
    let client = GatewayClient::new(config).unwrap();

    let err = client.search("fever").await.unwrap_err();
    assert!(matches!(err, DxError::Transport(_)));
}
