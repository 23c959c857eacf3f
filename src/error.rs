use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while analyzing a contract.
///
/// An unsupported media type is not represented here: extraction yields empty
/// text for it and logs a warning instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Unreadable {media} document: {reason}")]
    UnreadableDocument { media: &'static str, reason: String },

    #[error("{} is {size} bytes, above the {limit} byte limit", .path.display())]
    DocumentTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Failed to render report: {0}")]
    RenderFailure(String),

    #[error("Failed to append audit record to {}: {source}", .path.display())]
    AuditWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub fn unreadable(media: &'static str, reason: impl ToString) -> Self {
        AnalysisError::UnreadableDocument {
            media,
            reason: reason.to_string(),
        }
    }
}

impl From<printpdf::Error> for AnalysisError {
    fn from(e: printpdf::Error) -> Self {
        AnalysisError::RenderFailure(e.to_string())
    }
}
