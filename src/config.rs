use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_SUMMARY: &str = "This contract outlines the agreement between involved parties and defines \
obligations, termination conditions, penalties, and jurisdiction. \
Some clauses may require legal review.";

/// Root configuration structure, deserialized from `.contract-riskr/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub audit: AuditConfig,
    pub upload: UploadConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Append a record to the audit log for every analyzed contract.
    pub enabled: bool,
    /// Line-delimited JSON log. Relative paths resolve against the working directory.
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("audit_log.json"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Documents above this size are rejected before they are read.
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 200 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Summary paragraph shown in every report.
    pub summary: String,
    /// PDF output path for `--report pdf` or a bare `--pdf`.
    pub pdf_name: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY.to_string(),
            pdf_name: PathBuf::from("contract_risk_report.pdf"),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `./.contract-riskr/config.toml`
/// 3. `~/.config/contract-riskr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = Path::new(".contract-riskr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("contract-riskr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}
