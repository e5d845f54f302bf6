//! In-memory [`VendorApi`] used by the unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{
    Capability, InterviewRequest, ParseRequest, ParseResponse, SearchHit, VendorApi,
};
use crate::interview::InterviewId;
use crate::{DxError, DxResult};

/// Canned answer for one capability.
#[derive(Debug, Clone)]
pub(crate) enum Reply<T> {
    Ok(T),
    /// Non-success status with a raw body.
    Status(u16, &'static str),
    /// A success status whose body is not valid JSON.
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self, capability: Capability) -> DxResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status, body) => Err(DxError::Boundary {
                capability,
                status: StatusCode::from_u16(*status).expect("valid status"),
                body: body.to_string(),
            }),
            Reply::Malformed => Err(DxError::Decode(
                serde_json::from_str::<serde_json::Value>("{not json").unwrap_err(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Search(String),
    Parse(ParseRequest),
    Diagnosis(InterviewId, InterviewRequest),
    Triage(InterviewId, InterviewRequest),
}

impl Call {
    fn capability(&self) -> Capability {
        match self {
            Call::Search(_) => Capability::Search,
            Call::Parse(_) => Capability::Parse,
            Call::Diagnosis(..) => Capability::Diagnosis,
            Call::Triage(..) => Capability::Triage,
        }
    }
}

pub(crate) struct FakeApi {
    parse: Reply<ParseResponse>,
    search: HashMap<String, Reply<Vec<SearchHit>>>,
    diagnosis: Reply<serde_json::Value>,
    triage: Reply<serde_json::Value>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            parse: Reply::Ok(ParseResponse::default()),
            search: HashMap::new(),
            diagnosis: Reply::Ok(serde_json::json!({ "conditions": [] })),
            triage: Reply::Ok(serde_json::json!({})),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_parse(mut self, reply: Reply<ParseResponse>) -> Self {
        self.parse = reply;
        self
    }

    pub(crate) fn with_search(mut self, term: &str, reply: Reply<Vec<SearchHit>>) -> Self {
        self.search.insert(term.to_string(), reply);
        self
    }

    pub(crate) fn with_diagnosis(mut self, reply: Reply<serde_json::Value>) -> Self {
        self.diagnosis = reply;
        self
    }

    pub(crate) fn with_triage(mut self, reply: Reply<serde_json::Value>) -> Self {
        self.triage = reply;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, capability: Capability) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.capability() == capability)
            .count()
    }

    pub(crate) fn searched_terms(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(term) => Some(term),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Decodes a JSON literal into a wire type for test fixtures.
pub(crate) fn fixture<T: DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).expect("valid fixture")
}

#[async_trait]
impl VendorApi for FakeApi {
    async fn search(&self, term: &str) -> DxResult<Vec<SearchHit>> {
        self.record(Call::Search(term.to_string()));
        match self.search.get(term) {
            Some(reply) => reply.resolve(Capability::Search),
            None => Ok(Vec::new()),
        }
    }

    async fn parse(&self, request: &ParseRequest) -> DxResult<ParseResponse> {
        self.record(Call::Parse(request.clone()));
        self.parse.resolve(Capability::Parse)
    }

    async fn diagnosis(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        self.record(Call::Diagnosis(interview_id, request.clone()));
        self.diagnosis.resolve(Capability::Diagnosis)
    }

    async fn triage(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        self.record(Call::Triage(interview_id, request.clone()));
        self.triage.resolve(Capability::Triage)
    }
}
