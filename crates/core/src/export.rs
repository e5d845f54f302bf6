//! JSON export of the last result.

use std::path::{Path, PathBuf};

use crate::constants::EXPORT_FILE_PREFIX;
use crate::session::LastResult;
use crate::{DxError, DxResult};

/// A rendered export file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

impl ExportDocument {
    /// Writes the document into `dir` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::ExportWrite`] if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> DxResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents).map_err(DxError::ExportWrite)?;
        tracing::info!("exported result to {}", path.display());
        Ok(path)
    }
}

/// Pretty-printed JSON of `result`, named after its interview id.
pub fn document(result: &LastResult) -> DxResult<ExportDocument> {
    let contents = serde_json::to_string_pretty(result).map_err(DxError::Serialization)?;
    Ok(ExportDocument {
        file_name: file_name(result),
        contents,
    })
}

fn file_name(result: &LastResult) -> String {
    format!("{}{}.json", EXPORT_FILE_PREFIX, result.interview_id)
}
