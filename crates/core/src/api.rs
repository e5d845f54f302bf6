//! The vendor boundary as seen from the client.
//!
//! [`VendorApi`] is the seam between orchestration and I/O: [`crate::client::GatewayClient`]
//! implements it over HTTP against the proxy gateway, and tests implement it in memory.
//! Request and response bodies here are the wire shapes of the gateway's `/api` routes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::demographics::{Age, Demographics, Sex};
use crate::evidence::{Choice, EvidenceItem};
use crate::interview::InterviewId;
use crate::DxResult;

/// The four vendor capabilities the client uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Search,
    Parse,
    Diagnosis,
    Triage,
}

impl Capability {
    /// Gateway route of this capability, relative to the API base URL.
    pub fn route(&self) -> &'static str {
        match self {
            Capability::Search => "search",
            Capability::Parse => "parse",
            Capability::Diagnosis => "diagnosis",
            Capability::Triage => "triage",
        }
    }

    pub(crate) fn error_label(&self) -> &'static str {
        match self {
            Capability::Search => "Search error",
            Capability::Parse => "Parse error",
            Capability::Diagnosis => "Infermedica API error",
            Capability::Triage => "Infermedica triage error",
        }
    }
}

/// Body of `POST /api/parse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParseRequest {
    #[serde(default)]
    pub text: String,
    pub sex: Sex,
    pub age: Age,
}

impl ParseRequest {
    pub fn new(text: impl Into<String>, demographics: &Demographics) -> Self {
        Self {
            text: text.into(),
            sex: demographics.sex,
            age: demographics.age,
        }
    }
}

/// A concept the vendor recognised in free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    #[serde(default)]
    pub choice_id: Option<Choice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

/// One candidate concept returned by `GET /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body shared by `POST /api/diagnosis` and `POST /api/triage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InterviewRequest {
    pub sex: Sex,
    pub age: Age,
    pub evidence: Vec<EvidenceItem>,
}

impl InterviewRequest {
    pub fn new(demographics: &Demographics, evidence: Vec<EvidenceItem>) -> Self {
        Self {
            sex: demographics.sex,
            age: demographics.age,
            evidence,
        }
    }
}

/// Asynchronous access to the vendor capabilities.
///
/// A non-success response must be reported as [`crate::DxError::Boundary`] carrying the
/// status code and raw body text, so callers can branch on the status.
#[async_trait]
pub trait VendorApi: Send + Sync {
    async fn search(&self, term: &str) -> DxResult<Vec<SearchHit>>;

    async fn parse(&self, request: &ParseRequest) -> DxResult<ParseResponse>;

    async fn diagnosis(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value>;

    async fn triage(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value>;
}

#[async_trait]
impl<T: VendorApi + ?Sized> VendorApi for Arc<T> {
    async fn search(&self, term: &str) -> DxResult<Vec<SearchHit>> {
        (**self).search(term).await
    }

    async fn parse(&self, request: &ParseRequest) -> DxResult<ParseResponse> {
        (**self).parse(request).await
    }

    async fn diagnosis(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        (**self).diagnosis(interview_id, request).await
    }

    async fn triage(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        (**self).triage(interview_id, request).await
    }
}
