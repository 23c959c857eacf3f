use std::path::Path;

use crate::models::MediaType;

/// MIME reported for files whose extension is not recognized.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Guess the media type of a contract from its file extension.
pub fn detect_media_type(path: &Path) -> MediaType {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("txt") => MediaType::PlainText,
        Some("pdf") => MediaType::Pdf,
        Some("docx") => MediaType::WordDocument,
        _ => MediaType::Unsupported(FALLBACK_MIME.to_string()),
    }
}
