//! Diagnosis payload: kept verbatim for export, with a typed view for display.

use serde::{Deserialize, Serialize};

use crate::{DxError, DxResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionExtras {
    #[serde(default)]
    pub hint: Option<String>,
}

/// One candidate condition as reported by the vendor.
///
/// Every field is optional: this is a display view over a payload that is exported verbatim,
/// so a sparse condition still renders instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub extras: Option<ConditionExtras>,
}

impl Condition {
    /// Lay name when the vendor has one, else the canonical name.
    pub fn display_name(&self) -> &str {
        match self.common_name.as_deref() {
            Some(common) if !common.is_empty() => common,
            _ => self.name.as_deref().unwrap_or_default(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        self.extras
            .as_ref()
            .and_then(|e| e.hint.as_deref())
            .filter(|h| !h.is_empty())
    }

    /// Probability as a percentage rounded half-up to one decimal, e.g. `0.3125` -> `31.3`.
    /// NaN when the vendor sent no probability.
    pub fn percent(&self) -> f64 {
        self.probability.map_or(f64::NAN, |p| (p * 1000.0).round() / 10.0)
    }
}

/// Diagnosis response of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisResult {
    raw: serde_json::Value,
    conditions: Vec<Condition>,
}

impl DiagnosisResult {
    /// Wraps a raw diagnosis body. A missing or `null` `conditions` field reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::Decode`] if `conditions` is present but not a list of conditions.
    pub fn from_value(raw: serde_json::Value) -> DxResult<Self> {
        let conditions = match raw.get("conditions") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(list) => serde_json::from_value(list.clone()).map_err(DxError::Decode)?,
        };
        Ok(Self { raw, conditions })
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The vendor payload exactly as received.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}
