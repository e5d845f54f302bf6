use reqwest::StatusCode;

use crate::api::Capability;

#[derive(Debug, thiserror::Error)]
pub enum DxError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Please add at least one symptom.")]
    NoSymptoms,
    #[error("Please provide patient gender and age.")]
    MissingDemographics,
    #[error("No recognizable symptoms were parsed. Try more specific terms.")]
    NoRecognizableSymptoms,

    #[error("{}: {} {body}", .capability.error_label(), .status.as_u16())]
    Boundary {
        capability: Capability,
        status: StatusCode,
        body: String,
    },
    #[error("request to gateway failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(serde_json::Error),
    #[error("failed to serialize result: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to write export file: {0}")]
    ExportWrite(std::io::Error),
}

impl DxError {
    /// True for failures the user can fix by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DxError::InvalidInput(_)
                | DxError::NoSymptoms
                | DxError::MissingDemographics
                | DxError::NoRecognizableSymptoms
        )
    }

    /// Status code of a non-success boundary response, if this is one.
    pub fn boundary_status(&self) -> Option<StatusCode> {
        match self {
            DxError::Boundary { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type DxResult<T> = std::result::Result<T, DxError>;
