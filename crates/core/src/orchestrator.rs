//! Diagnosis orchestration for one session.
//!
//! A run is strictly sequential: evidence, then diagnosis, then triage. The triage call reuses
//! the diagnosis request body and interview id unchanged, because the vendor links the two
//! calls into one interview. Nothing is cached unless every step succeeds.

use crate::api::{InterviewRequest, VendorApi};
use crate::diagnosis::DiagnosisResult;
use crate::evidence::build_evidence;
use crate::export::{self, ExportDocument};
use crate::session::{LastResult, Session};
use crate::triage::{TriageLevel, TriageResult};
use crate::{DxError, DxResult};

/// Displayable outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    diagnosis: DiagnosisResult,
    level: Option<TriageLevel>,
    symptom_count: usize,
}

impl Report {
    pub fn new(
        diagnosis: DiagnosisResult,
        level: Option<TriageLevel>,
        symptom_count: usize,
    ) -> Self {
        Self {
            diagnosis,
            level,
            symptom_count,
        }
    }

    pub fn diagnosis(&self) -> &DiagnosisResult {
        &self.diagnosis
    }

    pub fn level(&self) -> Option<TriageLevel> {
        self.level
    }

    pub fn symptom_count(&self) -> usize {
        self.symptom_count
    }
}

pub struct DiagnosisOrchestrator<A> {
    api: A,
    session: Session,
}

impl<A: VendorApi> DiagnosisOrchestrator<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs evidence assembly, diagnosis and triage for the current session inputs.
    ///
    /// On success the session's last result is replaced. On failure the error is logged here
    /// and returned; the last result is left as it was.
    ///
    /// # Errors
    ///
    /// - validation failures: [`DxError::NoSymptoms`], [`DxError::MissingDemographics`],
    ///   [`DxError::NoRecognizableSymptoms`]
    /// - [`DxError::Boundary`] when a vendor call answers with a non-success status
    /// - transport and decode failures
    pub async fn start_diagnosis(&mut self) -> DxResult<Report> {
        let interview_id = self.session.interview_id();
        match self.run().await {
            Ok(report) => Ok(report),
            Err(err) if err.is_validation() => {
                tracing::warn!(%interview_id, "diagnosis not started: {}", err);
                Err(err)
            }
            Err(err) => {
                tracing::error!(%interview_id, "diagnosis failed: {:?}", err);
                Err(err)
            }
        }
    }

    async fn run(&mut self) -> DxResult<Report> {
        if self.session.symptoms().is_empty() {
            return Err(DxError::NoSymptoms);
        }
        let demographics = *self
            .session
            .demographics()
            .ok_or(DxError::MissingDemographics)?;

        let evidence = build_evidence(&self.api, self.session.symptoms(), &demographics).await?;
        if evidence.is_empty() {
            return Err(DxError::NoRecognizableSymptoms);
        }

        let interview_id = self.session.interview_id();
        let request = InterviewRequest::new(&demographics, evidence);

        let diagnosis = self.api.diagnosis(interview_id, &request).await?;
        let diagnosis = DiagnosisResult::from_value(diagnosis)?;

        let triage = self.api.triage(interview_id, &request).await?;
        let triage = TriageResult::from_value(&triage);

        tracing::info!(
            %interview_id,
            conditions = diagnosis.conditions().len(),
            vendor_level = triage.vendor_level.as_deref().unwrap_or("-"),
            "diagnosis complete"
        );

        self.session.store_result(LastResult {
            interview_id,
            mapped_level: triage.level,
            vendor_level: triage.vendor_level,
            diagnosis: diagnosis.raw().clone(),
        });

        Ok(Report::new(
            diagnosis,
            triage.level,
            self.session.symptoms().len(),
        ))
    }

    /// Export document of the last result, or `None` before the first successful run.
    pub fn export(&self) -> DxResult<Option<ExportDocument>> {
        self.session
            .last_result()
            .map(export::document)
            .transpose()
    }
}
