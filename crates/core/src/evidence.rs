//! Evidence assembly: turning free-text symptom terms into vendor evidence items.
//!
//! Two strategies are tried in order:
//!
//! 1. **parse**: all terms are joined into one sentence and sent to the vendor's text
//!    understanding capability; every returned mention becomes one evidence item.
//! 2. **search**: only when parse answers `405 Method Not Allowed` (the capability is disabled
//!    for the account). Each term is looked up on its own and the best hit becomes one item.
//!
//! Any other parse failure is returned to the caller unchanged.
//!
//! Search lookups run one after another in input order. A lookup that fails or finds nothing
//! drops its term and never aborts the remaining lookups.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::{Capability, ParseRequest, SearchHit, VendorApi};
use crate::constants::SYMPTOM_CONCEPT_TYPE;
use crate::demographics::Demographics;
use crate::symptoms::SymptomSet;
use crate::{DxError, DxResult};

/// Presence state of an observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    #[default]
    Present,
    Absent,
    Unknown,
}

/// Where an evidence item came from, in the vendor's vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// Reported by the patient up front. Everything dxv2 builds is `initial`.
    #[default]
    Initial,
    Suggest,
    Predefined,
    RedFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EvidenceItem {
    pub id: String,
    #[serde(default)]
    pub choice_id: Choice,
    #[serde(default)]
    pub source: EvidenceSource,
}

impl EvidenceItem {
    pub fn initial(id: impl Into<String>, choice_id: Choice) -> Self {
        Self {
            id: id.into(),
            choice_id,
            source: EvidenceSource::Initial,
        }
    }
}

/// Builds the evidence list for one diagnosis run.
///
/// # Errors
///
/// Returns [`DxError::NoSymptoms`] for an empty set, or whatever the parse capability failed
/// with unless that failure was a `405` (see module docs).
pub async fn build_evidence<A>(
    api: &A,
    symptoms: &SymptomSet,
    demographics: &Demographics,
) -> DxResult<Vec<EvidenceItem>>
where
    A: VendorApi + ?Sized,
{
    if symptoms.is_empty() {
        return Err(DxError::NoSymptoms);
    }

    match evidence_from_parse(api, symptoms, demographics).await {
        Ok(evidence) => {
            tracing::info!(items = evidence.len(), "evidence built from parse");
            Ok(evidence)
        }
        Err(err) if is_parse_unavailable(&err) => {
            tracing::info!("parse capability unavailable, falling back to term search");
            let evidence = evidence_from_search(api, symptoms).await;
            tracing::info!(items = evidence.len(), "evidence built from search");
            Ok(evidence)
        }
        Err(err) => Err(err),
    }
}

/// Parse strategy: one evidence item per mention, in mention order.
pub async fn evidence_from_parse<A>(
    api: &A,
    symptoms: &SymptomSet,
    demographics: &Demographics,
) -> DxResult<Vec<EvidenceItem>>
where
    A: VendorApi + ?Sized,
{
    let request = ParseRequest::new(symptoms.joined_text(), demographics);
    let parsed = api.parse(&request).await?;

    Ok(parsed
        .mentions
        .into_iter()
        .map(|m| EvidenceItem::initial(m.id, m.choice_id.unwrap_or_default()))
        .collect())
}

/// Search strategy: at most one evidence item per term, in term order.
pub async fn evidence_from_search<A>(api: &A, symptoms: &SymptomSet) -> Vec<EvidenceItem>
where
    A: VendorApi + ?Sized,
{
    let mut evidence = Vec::new();
    for term in symptoms.iter() {
        let hits = match api.search(term).await {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(term, error = %err, "search failed, dropping term");
                continue;
            }
        };
        match pick_hit(&hits).and_then(|hit| hit.id.as_deref()) {
            Some(id) if !id.is_empty() => {
                evidence.push(EvidenceItem::initial(id, Choice::Present));
            }
            _ => tracing::debug!(term, "no search hit"),
        }
    }
    evidence
}

/// First hit typed as a symptom, else the first hit of any type.
pub fn pick_hit(hits: &[SearchHit]) -> Option<&SearchHit> {
    hits.iter()
        .find(|hit| hit.kind.as_deref() == Some(SYMPTOM_CONCEPT_TYPE))
        .or_else(|| hits.first())
}

fn is_parse_unavailable(err: &DxError) -> bool {
    matches!(
        err,
        DxError::Boundary {
            capability: Capability::Parse,
            status,
            ..
        } if *status == StatusCode::METHOD_NOT_ALLOWED
    )
}
