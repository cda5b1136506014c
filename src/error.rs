use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can stop a session or a single panel from rendering.
#[derive(Debug, Error)]
pub enum ExplainError {
    /// No file was found for a required artifact.
    #[error("artifact not found: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    /// The file exists but could not be read or does not have the expected shape.
    #[error("artifact {} is unreadable: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// Raw input incompatible with the fitted preprocessing step.
    #[error("column '{column}': {reason}")]
    TransformMismatch { column: String, reason: String },

    #[error("{what} index {index} is out of range (0..{len})")]
    SelectionOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl ExplainError {
    pub fn corrupt(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ExplainError::ArtifactCorrupt {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplainError>;
