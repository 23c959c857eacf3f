//! Text extraction for the supported contract formats.
//!
//! - [`text`]: UTF-8 plain text, passed through verbatim.
//! - [`pdf`]: per-page text via `lopdf`, pages joined with `\n`.
//! - [`docx`]: body paragraphs of a WordprocessingML package, joined with `\n`.
//!
//! Unsupported media types extract to an empty string rather than an error.

use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::models::{Document, MediaType};

pub mod docx;
pub mod pdf;
pub mod text;

/// Signature shared by every format-specific extractor.
pub type ExtractFn = fn(&[u8]) -> Result<String, AnalysisError>;

/// Look up the extractor for a media type. `None` for unsupported types.
pub fn extractor_for(media_type: &MediaType) -> Option<ExtractFn> {
    match media_type {
        MediaType::PlainText => Some(text::extract),
        MediaType::Pdf => Some(pdf::extract),
        MediaType::WordDocument => Some(docx::extract),
        MediaType::Unsupported(_) => None,
    }
}

/// Extract the contract text from a document.
pub fn extract_text(document: &Document) -> Result<String, AnalysisError> {
    let Some(extract) = extractor_for(&document.media_type) else {
        // Scoring still runs on the empty string, so the report shows a
        // non-zero score for a document that was never read.
        warn!(
            file = %document.file_name,
            mime = document.media_type.mime(),
            "unsupported media type, analyzing empty text"
        );
        return Ok(String::new());
    };

    let text = extract(&document.bytes)?;
    debug!(
        file = %document.file_name,
        media = %document.media_type,
        chars = text.chars().count(),
        "extracted text"
    );
    Ok(text)
}
