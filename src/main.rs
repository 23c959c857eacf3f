//! `contract-riskr`: screen contract documents for risky clauses.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. For each file: read it and resolve its media type ([`pipeline::load_document`],
//!    [`detector`]).
//! 4. Extract text ([`extract`]), run the rules ([`rules`]) and clamp the score ([`score`]).
//! 5. Append an audit record ([`audit`]); failures are logged, never fatal.
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0`, or `1` when `--fail-on` is set and a contract reaches that level.

mod audit;
mod cli;
mod config;
mod detector;
mod error;
mod extract;
mod models;
mod pipeline;
mod report;
mod rules;
mod score;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use audit::{AuditSink, FileAuditSink};
use cli::{Cli, ReportFormat};
use config::load_config;
use models::RiskLevel;
use pipeline::{assess, load_document};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    let sink = FileAuditSink::new(
        cli.audit_log
            .clone()
            .unwrap_or_else(|| config.audit.path.clone()),
    );
    let audit: Option<&dyn AuditSink> = if cli.no_audit || !config.audit.enabled {
        None
    } else {
        tracing::debug!(path = %sink.path().display(), "audit log enabled");
        Some(&sink)
    };

    // Resolve effective report format: --pdf implies PDF format
    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report.clone(),
    };
    let pdf_path = cli.pdf_path(&config.report.pdf_name);

    let pb = if cli.files.len() > 1 && !cli.quiet {
        let pb = ProgressBar::new(cli.files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut assessments = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        if let Some(pb) = &pb {
            pb.set_message(path.display().to_string());
        }

        let document = load_document(path, cli.media_type.as_deref(), config.upload.max_bytes)
            .with_context(|| format!("Cannot load {}", path.display()))?;
        let assessment = assess(&document, &config.report.summary, audit)
            .with_context(|| format!("Cannot analyze {}", path.display()))?;
        assessments.push(assessment);

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&assessments, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&assessments)?);
        }
        ReportFormat::Pdf => {
            report::pdf::render(&assessments, &pdf_path)?;
        }
    }

    if let Some(level) = &cli.fail_on {
        let threshold: RiskLevel = level.into();
        if assessments.iter().any(|a| a.level >= threshold) {
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "contract_riskr=info"
    } else {
        "contract_riskr=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
