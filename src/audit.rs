//! Append-only audit trail: one JSON line per analyzed contract.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::models::AuditRecord;

/// Where audit records go.
pub trait AuditSink {
    fn append(&self, record: &AuditRecord) -> Result<(), AnalysisError>;
}

impl AuditRecord {
    /// Build a record stamped with the local time of the call (ISO-8601, no offset).
    pub fn now(file: &str, risk_score: u8) -> Self {
        AuditRecord {
            file: file.to_string(),
            risk_score,
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

/// Line-delimited JSON file opened in append mode for every record.
///
/// Each record is written with a single `write_all` of the full line, so
/// concurrent processes appending to the same file never interleave within
/// a line.
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditSink {
    fn append(&self, record: &AuditRecord) -> Result<(), AnalysisError> {
        let write_err = |source: std::io::Error| AnalysisError::AuditWriteFailure {
            path: self.path.clone(),
            source,
        };

        let mut line = serde_json::to_string(record).map_err(|e| write_err(e.into()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.write_all(line.as_bytes()).map_err(write_err)?;

        debug!(path = %self.path.display(), file = %record.file, "audit record appended");
        Ok(())
    }
}

/// Append `record`, logging instead of failing.
///
/// A failed audit write never blocks the assessment from being reported.
/// Returns whether the record was written.
pub fn append_or_warn(sink: &dyn AuditSink, record: &AuditRecord) -> bool {
    match sink.append(record) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, file = %record.file, "audit record dropped");
            false
        }
    }
}

/// Keeps records in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryAuditSink {
    pub records: std::cell::RefCell<Vec<AuditRecord>>,
}

#[cfg(test)]
impl AuditSink for MemoryAuditSink {
    fn append(&self, record: &AuditRecord) -> Result<(), AnalysisError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
