//! Report renderers for contract assessments.
//!
//! - [`terminal`]: colored badge, score, risk list and clause table; respects
//!   `--verbose` / `--quiet`.
//! - [`pdf`]: downloadable report with score, summary, key risks, clause
//!   insights and mitigations, one section per contract.

pub mod pdf;
pub mod terminal;

/// Title shared by every report format.
pub const REPORT_TITLE: &str = "Contract Risk Assessment Report";

/// Generic negotiation advice printed under every assessment.
pub const MITIGATIONS: [&str; 4] = [
    "Negotiate mutual termination rights",
    "Add penalty caps and clearer definitions",
    "Propose neutral arbitration location",
    "Define clearer performance timelines",
];

/// `Overall Risk Score: 60/100`
pub fn score_line(score: u8) -> String {
    format!("Overall Risk Score: {}/100", score)
}
