//! Constants used throughout the dxv2 core crate.
//!
//! Gateway routes, header names and fixed user-facing strings live here so the client, the
//! gateway and the renderer agree on them.

/// Default base URL of the proxy gateway's API routes.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000/api";

/// Header the client uses to send the interview correlation id to the gateway.
pub const CLIENT_INTERVIEW_HEADER: &str = "x-interview-id";

/// Header the vendor expects the interview correlation id in.
pub const VENDOR_INTERVIEW_HEADER: &str = "interview-id";

/// Delimiter used when joining symptom terms into one free-text parse request.
pub const SYMPTOM_TEXT_DELIMITER: &str = ", ";

/// Vendor concept type preferred when picking a search hit.
pub const SYMPTOM_CONCEPT_TYPE: &str = "symptom";

/// Prefix of exported result files; the interview id and `.json` follow.
pub const EXPORT_FILE_PREFIX: &str = "dxv2_result_";

/// Shortlist of frequently reported symptoms offered to the user as quick picks.
pub const COMMON_SYMPTOMS: [&str; 12] = [
    "Headache",
    "Fever",
    "Cough",
    "Fatigue",
    "Nausea",
    "Diarrhea",
    "Abdominal pain",
    "Body aches",
    "Difficulty breathing",
    "Rash",
    "Vomiting",
    "Chest pain",
];

pub const EMERGENCY_BANNER: &str = "This may be an emergency. Go to the nearest emergency department or call local emergency services now.";

pub const NO_HINT_FALLBACK: &str = "Professional medical evaluation recommended.";

pub const NO_CONDITIONS_TITLE: &str = "No specific conditions identified";

pub const NO_CONDITIONS_DESCRIPTION: &str = "Based on the provided symptoms, no specific medical conditions could be identified. Please consult a healthcare professional.";
