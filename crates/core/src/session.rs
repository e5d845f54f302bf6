//! Per-session state: the interview id, the user's inputs and the last result.
//!
//! One [`Session`] exists per front-end session. It is created once, owned by the
//! orchestrator, and only changed through the methods below.

use serde::Serialize;

use crate::demographics::Demographics;
use crate::interview::InterviewId;
use crate::symptoms::SymptomSet;
use crate::triage::TriageLevel;

/// Snapshot of the most recent successful run, kept for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastResult {
    pub interview_id: InterviewId,
    pub mapped_level: Option<TriageLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_level: Option<String>,
    pub diagnosis: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct Session {
    interview_id: InterviewId,
    symptoms: SymptomSet,
    demographics: Option<Demographics>,
    last_result: Option<LastResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_interview_id(InterviewId::new())
    }

    pub fn with_interview_id(interview_id: InterviewId) -> Self {
        tracing::debug!(%interview_id, "session created");
        Self {
            interview_id,
            symptoms: SymptomSet::new(),
            demographics: None,
            last_result: None,
        }
    }

    pub fn interview_id(&self) -> InterviewId {
        self.interview_id
    }

    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }

    /// See [`SymptomSet::add`].
    pub fn add_symptom(&mut self, term: impl AsRef<str>) -> bool {
        self.symptoms.add(term)
    }

    /// See [`SymptomSet::remove`].
    pub fn remove_symptom(&mut self, term: &str) -> bool {
        self.symptoms.remove(term)
    }

    pub fn demographics(&self) -> Option<&Demographics> {
        self.demographics.as_ref()
    }

    pub fn set_demographics(&mut self, demographics: Demographics) {
        self.demographics = Some(demographics);
    }

    pub fn last_result(&self) -> Option<&LastResult> {
        self.last_result.as_ref()
    }

    /// Replaces the cached result. There is exactly one slot.
    pub(crate) fn store_result(&mut self, result: LastResult) {
        self.last_result = Some(result);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
