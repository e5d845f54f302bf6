//! Triage level normalisation.
//!
//! The vendor reports urgency in its own vocabulary, either as a top-level `triage_level` or
//! nested as `triage.level`. Both shapes are read into one [`TriageResult`], whose vendor level
//! is then mapped onto three internal tiers. Levels outside the table map to no tier at all:
//! the caller shows no banner rather than guessing.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    #[serde(rename = "Emergency")]
    Emergency,
    #[serde(rename = "Non-emergency care")]
    NonEmergencyCare,
    #[serde(rename = "Self-care")]
    SelfCare,
}

impl TriageLevel {
    /// Maps a vendor triage level onto an internal tier. Pure and total.
    pub fn from_vendor(vendor_level: &str) -> Option<Self> {
        match vendor_level {
            "emergency_ambulance" | "emergency" => Some(TriageLevel::Emergency),
            "consultation_24" | "consultation" => Some(TriageLevel::NonEmergencyCare),
            "self_care" => Some(TriageLevel::SelfCare),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Emergency => "Emergency",
            TriageLevel::NonEmergencyCare => "Non-emergency care",
            TriageLevel::SelfCare => "Self-care",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, TriageLevel::Emergency)
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty string at `value`, if there is one.
fn level_at(value: Option<&serde_json::Value>) -> Option<&str> {
    value
        .and_then(serde_json::Value::as_str)
        .filter(|level| !level.is_empty())
}

/// Top-level `triage_level` wins; an absent or empty one falls through to `triage.level`.
fn vendor_level_of(body: &serde_json::Value) -> Option<String> {
    level_at(body.get("triage_level"))
        .or_else(|| level_at(body.get("triage").and_then(|t| t.get("level"))))
        .map(str::to_string)
}

/// Normalised triage outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageResult {
    pub vendor_level: Option<String>,
    pub level: Option<TriageLevel>,
}

impl TriageResult {
    pub fn from_vendor_level(vendor_level: Option<String>) -> Self {
        let level = vendor_level.as_deref().and_then(TriageLevel::from_vendor);
        Self {
            vendor_level,
            level,
        }
    }

    /// Reads the level out of a raw triage response body. A body without a recognisable
    /// level gives an unmapped result.
    pub fn from_value(body: &serde_json::Value) -> Self {
        Self::from_vendor_level(vendor_level_of(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_the_fixed_vocabulary() {
        assert_eq!(
            TriageLevel::from_vendor("emergency_ambulance"),
            Some(TriageLevel::Emergency)
        );
        assert_eq!(TriageLevel::from_vendor("emergency"), Some(TriageLevel::Emergency));
        assert_eq!(
            TriageLevel::from_vendor("consultation_24"),
            Some(TriageLevel::NonEmergencyCare)
        );
        assert_eq!(
            TriageLevel::from_vendor("consultation"),
            Some(TriageLevel::NonEmergencyCare)
        );
        assert_eq!(TriageLevel::from_vendor("self_care"), Some(TriageLevel::SelfCare));
    }

    #[test]
    fn unknown_levels_are_unmapped() {
        for level in ["unknown_code", "", "Emergency", "EMERGENCY", "self-care"] {
            assert_eq!(TriageLevel::from_vendor(level), None, "{level}");
        }
    }

    #[test]
    fn mapping_is_idempotent() {
        for level in ["emergency", "consultation_24", "self_care", "nope"] {
            assert_eq!(TriageLevel::from_vendor(level), TriageLevel::from_vendor(level));
        }
    }

    #[test]
    fn tiers_serialize_with_display_names() {
        assert_eq!(
            serde_json::to_value(TriageLevel::NonEmergencyCare).unwrap(),
            json!("Non-emergency care")
        );
        assert_eq!(TriageLevel::SelfCare.to_string(), "Self-care");
    }

    #[test]
    fn decodes_top_level_shape() {
        let result = TriageResult::from_value(&json!({
            "triage_level": "consultation",
            "serious": [],
            "teleconsultation_applicable": true
        }));
        assert_eq!(result.vendor_level.as_deref(), Some("consultation"));
        assert_eq!(result.level, Some(TriageLevel::NonEmergencyCare));
    }

    #[test]
    fn decodes_nested_shape() {
        let result =
            TriageResult::from_value(&json!({ "triage": { "level": "emergency_ambulance" } }));
        assert_eq!(result.vendor_level.as_deref(), Some("emergency_ambulance"));
        assert_eq!(result.level, Some(TriageLevel::Emergency));
    }

    #[test]
    fn missing_or_unknown_level_is_not_an_error() {
        for body in [
            json!({}),
            json!({ "triage_level": null }),
            json!({ "triage": {} }),
            json!({ "triage": "high" }),
            json!({ "triage_level": 3 }),
            json!({ "triage_level": "", "triage": { "level": "" } }),
            json!([]),
        ] {
            let result = TriageResult::from_value(&body);
            assert_eq!(result.level, None, "{body}");
            assert_eq!(result.vendor_level, None, "{body}");
        }

        let result = TriageResult::from_value(&json!({ "triage_level": "mystery" }));
        assert_eq!(result.vendor_level.as_deref(), Some("mystery"));
        assert_eq!(result.level, None);
    }

    #[test]
    fn empty_top_level_falls_through_to_nested_level() {
        for top in [json!(""), json!(null)] {
            let result = TriageResult::from_value(&json!({
                "triage_level": top,
                "triage": { "level": "emergency" }
            }));
            assert_eq!(result.vendor_level.as_deref(), Some("emergency"));
            assert_eq!(result.level, Some(TriageLevel::Emergency));
        }
    }

    #[test]
    fn top_level_wins_over_nested_level() {
        let result = TriageResult::from_value(&json!({
            "triage_level": "self_care",
            "triage": { "level": "emergency" }
        }));
        assert_eq!(result.level, Some(TriageLevel::SelfCare));
    }
}
