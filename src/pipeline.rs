//! Drives one contract through extraction, scoring and auditing.

use std::path::Path;

use tracing::info;

use crate::audit::{append_or_warn, AuditSink};
use crate::detector::detect_media_type;
use crate::error::AnalysisError;
use crate::extract::extract_text;
use crate::models::{Assessment, AuditRecord, Document, MediaType, PREVIEW_CHARS};
use crate::rules::analyze;
use crate::score::{normalize, risk_level};

/// Read a contract from disk.
///
/// The media type comes from `declared_mime` when given, otherwise from the
/// file extension. Files larger than `max_bytes` are rejected unread.
pub fn load_document(
    path: &Path,
    declared_mime: Option<&str>,
    max_bytes: u64,
) -> Result<Document, AnalysisError> {
    let io_err = |source: std::io::Error| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_bytes {
        return Err(AnalysisError::DocumentTooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }

    let media_type = match declared_mime {
        Some(mime) => MediaType::from_mime(mime),
        None => detect_media_type(path),
    };

    Ok(Document {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        media_type,
        bytes: std::fs::read(path).map_err(io_err)?,
    })
}

/// Extract, score and audit a document.
///
/// Extraction failures propagate. Audit failures are logged and ignored so the
/// assessment is always returned once scoring succeeded.
pub fn assess(
    document: &Document,
    summary: &str,
    audit: Option<&dyn AuditSink>,
) -> Result<Assessment, AnalysisError> {
    let text = extract_text(document)?;

    let analysis = analyze(&text);
    let score = normalize(analysis.raw_score);
    let level = risk_level(score);

    info!(
        file = %document.file_name,
        raw_score = analysis.raw_score,
        score,
        level = %level,
        risks = analysis.risks.len(),
        "contract assessed"
    );

    if let Some(sink) = audit {
        append_or_warn(sink, &AuditRecord::now(&document.file_name, score));
    }

    Ok(Assessment {
        file_name: document.file_name.clone(),
        media_type: document.media_type.clone(),
        preview: text.chars().take(PREVIEW_CHARS).collect(),
        text,
        risks: analysis.risks,
        clauses: analysis.clauses,
        raw_score: analysis.raw_score,
        score,
        level,
        summary: summary.to_string(),
    })
}
