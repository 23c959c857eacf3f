use serde::{Deserialize, Serialize};

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Number of characters of extracted text kept for previews.
pub const PREVIEW_CHARS: usize = 1500;

/// A contract handed to the tool: raw bytes plus the media type it was declared as.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MediaType {
    PlainText,
    Pdf,
    WordDocument,
    /// Anything else; keeps the declared MIME string for diagnostics.
    Unsupported(String),
}

impl MediaType {
    /// Map a declared MIME string onto a media type. Matching is exact, as
    /// browsers and upload widgets report it.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim() {
            MIME_PLAIN_TEXT => MediaType::PlainText,
            MIME_PDF => MediaType::Pdf,
            MIME_DOCX => MediaType::WordDocument,
            other => MediaType::Unsupported(other.to_string()),
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            MediaType::PlainText => MIME_PLAIN_TEXT,
            MediaType::Pdf => MIME_PDF,
            MediaType::WordDocument => MIME_DOCX,
            MediaType::Unsupported(mime) => mime,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::PlainText => write!(f, "Plain text"),
            MediaType::Pdf => write!(f, "PDF"),
            MediaType::WordDocument => write!(f, "Word document"),
            MediaType::Unsupported(mime) => write!(f, "Unsupported ({})", mime),
        }
    }
}

/// Explanation attached to a detected clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseFinding {
    pub description: String,
    /// 0..=100
    pub severity: u8,
}

/// Clause findings keyed by clause name, in first-insertion order.
///
/// Inserting a name that is already present replaces its finding in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClauseFindings(Vec<(String, ClauseFinding)>);

impl ClauseFindings {
    pub fn insert(&mut self, name: impl Into<String>, finding: ClauseFinding) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = finding,
            None => self.0.push((name, finding)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClauseFinding)> {
        self.0.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn badge(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::Medium => "MEDIUM RISK",
            RiskLevel::High => "HIGH RISK",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Result of running one contract through the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub file_name: String,
    pub media_type: MediaType,
    #[serde(skip)]
    pub text: String,
    pub preview: String,
    pub risks: Vec<String>,
    pub clauses: ClauseFindings,
    pub raw_score: i32,
    pub score: u8,
    pub level: RiskLevel,
    pub summary: String,
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub file: String,
    pub risk_score: u8,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(description: &str, severity: u8) -> ClauseFinding {
        ClauseFinding {
            description: description.to_string(),
            severity,
        }
    }

    #[test]
    fn test_from_mime() {
        assert_eq!(MediaType::from_mime("text/plain"), MediaType::PlainText);
        assert_eq!(MediaType::from_mime("application/pdf"), MediaType::Pdf);
        assert_eq!(MediaType::from_mime(MIME_DOCX), MediaType::WordDocument);
        assert_eq!(
            MediaType::from_mime("application/msword"),
            MediaType::Unsupported("application/msword".to_string())
        );
    }

    #[test]
    fn test_clause_findings_last_write_wins_in_place() {
        let mut clauses = ClauseFindings::default();
        clauses.insert("Penalty Clause", finding("first", 20));
        clauses.insert("Jurisdiction Clause", finding("other", 20));
        clauses.insert("Penalty Clause", finding("second", 30));

        assert_eq!(clauses.len(), 2);
        let entries: Vec<(&str, &ClauseFinding)> = clauses.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("Penalty Clause", &finding("second", 30)),
                ("Jurisdiction Clause", &finding("other", 20)),
            ]
        );
    }

    #[test]
    fn test_clause_findings_serialize_as_pairs() {
        let mut clauses = ClauseFindings::default();
        clauses.insert("Termination Clause", finding("x", 30));
        let json = serde_json::to_value(&clauses).unwrap();
        assert_eq!(
            json,
            serde_json::json!([["Termination Clause", {"description": "x", "severity": 30}]])
        );
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::High.badge(), "HIGH RISK");
    }
}
