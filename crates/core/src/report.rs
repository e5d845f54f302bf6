//! Plain-text presentation of results and errors.

use std::fmt;

use crate::constants::{
    EMERGENCY_BANNER, NO_CONDITIONS_DESCRIPTION, NO_CONDITIONS_TITLE, NO_HINT_FALLBACK,
};
use crate::diagnosis::Condition;
use crate::orchestrator::Report;
use crate::DxError;

/// One result row, e.g. `Flu — 62.0% probability`.
pub fn condition_line(condition: &Condition) -> String {
    format!(
        "{} — {:.1}% probability",
        condition.display_name(),
        condition.percent()
    )
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.level().is_some_and(|l| l.is_emergency()) {
            writeln!(f, "{}", EMERGENCY_BANNER)?;
            writeln!(f)?;
        }
        writeln!(f, "Diagnosis Results")?;

        let conditions = self.diagnosis().conditions();
        if conditions.is_empty() {
            writeln!(f, "{}", NO_CONDITIONS_TITLE)?;
            return write!(f, "{}", NO_CONDITIONS_DESCRIPTION);
        }

        writeln!(f, "Analysis of {} symptoms:", self.symptom_count())?;
        for (i, condition) in conditions.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}", condition_line(condition))?;
            let hint = condition.hint().unwrap_or(NO_HINT_FALLBACK);
            if i + 1 == conditions.len() {
                write!(f, "  {}", hint)?;
            } else {
                writeln!(f, "  {}", hint)?;
            }
        }
        Ok(())
    }
}

/// User-facing message for a failed run.
///
/// Validation failures are shown as-is; everything else is prefixed so the user knows the
/// run itself failed.
pub fn error_message(err: &DxError) -> String {
    if err.is_validation() {
        err.to_string()
    } else {
        format!("Error during diagnosis: {}. Verify backend credentials.", err)
    }
}
