//! HTTP implementation of [`VendorApi`] against the proxy gateway.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::{
    Capability, InterviewRequest, ParseRequest, ParseResponse, SearchHit, VendorApi,
};
use crate::config::ClientConfig;
use crate::constants::CLIENT_INTERVIEW_HEADER;
use crate::interview::InterviewId;
use crate::{DxError, DxResult};

/// Talks to the gateway's `/api` routes. Cheap to clone.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl GatewayClient {
    /// # Errors
    ///
    /// Returns [`DxError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> DxResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_interview(
        &self,
        capability: Capability,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        let response = self
            .http
            .post(self.config.route(capability.route()))
            .header(CLIENT_INTERVIEW_HEADER, interview_id.to_string())
            .json(request)
            .send()
            .await?;
        read_json(capability, response).await
    }
}

/// Reads a response body, turning non-success statuses into [`DxError::Boundary`].
async fn read_json<T: DeserializeOwned>(
    capability: Capability,
    response: reqwest::Response,
) -> DxResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::debug!(?capability, %status, "gateway returned non-success status");
        return Err(DxError::Boundary {
            capability,
            status,
            body,
        });
    }
    serde_json::from_str(&body).map_err(DxError::Decode)
}

#[async_trait]
impl VendorApi for GatewayClient {
    async fn search(&self, term: &str) -> DxResult<Vec<SearchHit>> {
        let response = self
            .http
            .get(self.config.route(Capability::Search.route()))
            .query(&[("q", term)])
            .send()
            .await?;
        let hits: Option<Vec<SearchHit>> = read_json(Capability::Search, response).await?;
        Ok(hits.unwrap_or_default())
    }

    async fn parse(&self, request: &ParseRequest) -> DxResult<ParseResponse> {
        let response = self
            .http
            .post(self.config.route(Capability::Parse.route()))
            .json(request)
            .send()
            .await?;
        read_json(Capability::Parse, response).await
    }

    async fn diagnosis(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        self.post_interview(Capability::Diagnosis, interview_id, request)
            .await
    }

    async fn triage(
        &self,
        interview_id: InterviewId,
        request: &InterviewRequest,
    ) -> DxResult<serde_json::Value> {
        self.post_interview(Capability::Triage, interview_id, request)
            .await
    }
}
