//! Interview correlation identifiers.
//!
//! The vendor tracks a clinical interview across calls by an opaque id sent in a header. dxv2
//! generates one id per session and sends it unchanged with every diagnosis and triage call of
//! that session.
//!
//! ## Canonical form
//! - Hyphenated UUID version 4, lowercase: `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`
//! - `y` is one of `8`, `9`, `a`, `b` (RFC 4122 variant)
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! This is the value `Uuid::new_v4().to_string()` produces. Externally supplied ids must
//! already be canonical; [`InterviewId::parse`] does not normalise uppercase or simple forms.

use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::{DxError, DxResult};

/// Per-session interview correlation id in canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterviewId(Uuid);

impl InterviewId {
    /// Generates a fresh random interview id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses an id that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::InvalidInput`] if `input` is not a lowercase hyphenated UUID v4.
    pub fn parse(input: &str) -> DxResult<Self> {
        if Self::is_canonical(input) {
            if let Ok(uuid) = Uuid::parse_str(input) {
                return Ok(Self(uuid));
            }
        }
        Err(DxError::InvalidInput(format!(
            "interview id must be a lowercase hyphenated UUID v4, got: '{}'",
            input
        )))
    }

    /// Returns true if `input` is a lowercase hyphenated UUID v4.
    pub fn is_canonical(input: &str) -> bool {
        let bytes = input.as_bytes();
        if bytes.len() != 36 {
            return false;
        }
        bytes.iter().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => *b == b'-',
            14 => *b == b'4',
            19 => matches!(b, b'8' | b'9' | b'a' | b'b'),
            _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InterviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for InterviewId {
    type Err = DxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterviewId::parse(s)
    }
}

impl serde::Serialize for InterviewId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_canonical_id() {
        let id = InterviewId::new().to_string();
        assert_eq!(id.len(), 36);
        assert!(InterviewId::is_canonical(&id), "not canonical: {id}");
    }

    #[test]
    fn new_ids_differ() {
        assert_ne!(InterviewId::new(), InterviewId::new());
    }

    #[test]
    fn parse_round_trips_canonical_id() {
        let canonical = "550e8400-e29b-41d4-a716-446655440000";
        let id = InterviewId::parse(canonical).unwrap();
        assert_eq!(id.to_string(), canonical);
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for input in [
            "550E8400-E29B-41D4-A716-446655440000",
            "550e8400e29b41d4a716446655440000",
            "550e8400-e29b-11d4-a716-446655440000",
            "550e8400-e29b-41d4-c716-446655440000",
            "550e8400-e29b-41d4-a716-44665544000",
            "550e8400-e29b-41d4-a716-44665544000z",
        ] {
            match InterviewId::parse(input) {
                Err(DxError::InvalidInput(msg)) => assert!(msg.contains("UUID v4")),
                other => panic!("expected InvalidInput for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = InterviewId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"550e8400-e29b-41d4-a716-446655440000\""
        );
    }
}
