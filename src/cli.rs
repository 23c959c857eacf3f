use std::path::{Path, PathBuf};

use clap::Parser;

use crate::models::RiskLevel;

#[derive(Parser, Debug)]
#[command(
    name = "contract-riskr",
    about = "Score contract documents for risky clauses and produce a risk report",
    version
)]
pub struct Cli {
    /// Contract files to analyze (.txt, .pdf, .docx)
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Declared MIME type, overriding detection by file extension
    #[arg(long, value_name = "MIME")]
    pub media_type: Option<String>,

    /// Config file [default: ./.contract-riskr/config.toml, fallback ~/.config/contract-riskr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Write a PDF report; without a value the configured `pdf_name` is used
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub pdf: Option<Option<PathBuf>>,

    /// Audit log path (overrides config)
    #[arg(long, value_name = "FILE")]
    pub audit_log: Option<PathBuf>,

    /// Do not append to the audit log
    #[arg(long)]
    pub no_audit: bool,

    /// Exit with status 1 when any contract reaches this risk level
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<LevelArg>,

    /// Show the extracted text preview and info-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print one summary line per contract
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// PDF output path: the value given to `--pdf`, else `configured`.
    pub fn pdf_path(&self, configured: &Path) -> PathBuf {
        match &self.pdf {
            Some(Some(path)) => path.clone(),
            _ => configured.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<&LevelArg> for RiskLevel {
    fn from(arg: &LevelArg) -> Self {
        match arg {
            LevelArg::Low => RiskLevel::Low,
            LevelArg::Medium => RiskLevel::Medium,
            LevelArg::High => RiskLevel::High,
        }
    }
}
