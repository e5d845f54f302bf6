//! # dxv2 Core
//!
//! Client-side logic of the dxv2 symptom checker:
//! - turning free-text symptoms into vendor evidence (parse, falling back to term search)
//! - running the diagnosis and triage calls of one interview and merging their results
//! - mapping the vendor triage vocabulary onto three internal tiers
//! - plain-text presentation and JSON export of the last result
//!
//! **No server concerns**: credential injection and forwarding to the vendor belong in
//! `dx-gateway`. This crate only talks to the gateway, through [`VendorApi`].

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod demographics;
pub mod diagnosis;
pub mod error;
pub mod evidence;
pub mod export;
pub mod interview;
pub mod orchestrator;
pub mod report;
pub mod session;
pub mod symptoms;
pub mod triage;

#[cfg(test)]
mod testing;

pub use api::{Capability, InterviewRequest, ParseRequest, VendorApi};
pub use client::GatewayClient;
pub use config::ClientConfig;
pub use demographics::{Age, AgeUnit, Demographics, Sex};
pub use diagnosis::{Condition, DiagnosisResult};
pub use error::{DxError, DxResult};
pub use evidence::{Choice, EvidenceItem, EvidenceSource};
pub use export::ExportDocument;
pub use interview::InterviewId;
pub use orchestrator::{DiagnosisOrchestrator, Report};
pub use session::{LastResult, Session};
pub use symptoms::SymptomSet;
pub use triage::{TriageLevel, TriageResult};
