use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Assessment, RiskLevel};
use crate::report::{score_line, MITIGATIONS, REPORT_TITLE};

const BAR_WIDTH: usize = 20;

/// Render a colored terminal report for every assessment.
pub fn render(assessments: &[Assessment], verbose: bool, quiet: bool) {
    if quiet {
        for a in assessments {
            println!(
                "{}  Score: {}/100  {}  Risks: {}",
                a.file_name,
                a.score,
                colorize_level(a.level, a.level.badge()),
                a.risks.len()
            );
        }
        return;
    }

    println!(
        "\n {} v{}",
        "contract-riskr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    for a in assessments {
        render_one(a, verbose);
    }
}

fn render_one(a: &Assessment, verbose: bool) {
    println!(" Contract: {} ({})\n", a.file_name, a.media_type);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", REPORT_TITLE.bold());
    println!(" │  {:<48} │", colorize_level(a.level, &format!("● {}", a.level.badge())));
    println!(" │  {:<48} │", score_line(a.score));
    println!(
        " │  {:<48} │",
        format!("Key risks: {}   Clauses flagged: {}", a.risks.len(), a.clauses.len())
    );
    println!(
        " │  {:<48} │",
        format!("Characters analyzed: {}", a.text.chars().count())
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    println!(" {} {}\n", "[SUMMARY]".cyan().bold(), a.summary);

    if a.risks.is_empty() {
        println!(" {} No key risks detected.\n", "[RISKS]".green().bold());
    } else {
        println!(" {} Key risk indicators:", "[RISKS]".red().bold());
        for risk in &a.risks {
            println!("   • {}", risk);
        }
        println!();
    }

    if !a.clauses.is_empty() {
        println!(" {} Clause insights:\n", "[CLAUSES]".yellow().bold());
        render_clause_table(a);
        println!();
    }

    println!(" {} Suggested risk mitigation:", "[ADVICE]".blue().bold());
    for item in MITIGATIONS {
        println!("   {} {}", "✔".green(), item);
    }
    println!();

    if verbose {
        println!(" {} Extracted text (preview):\n", "[TEXT]".dimmed().bold());
        if a.preview.is_empty() {
            println!("   {}", "(no text extracted)".dimmed());
        }
        for line in a.preview.lines() {
            println!("   {}", line.dimmed());
        }
        println!();
    }
}

fn render_clause_table(a: &Assessment) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Clause").add_attribute(Attribute::Bold),
            Cell::new("Finding").add_attribute(Attribute::Bold),
            Cell::new("Severity").add_attribute(Attribute::Bold),
        ]);

    for (name, finding) in a.clauses.iter() {
        let color = match finding.severity {
            0..=20 => Color::Yellow,
            _ => Color::Red,
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&finding.description),
            Cell::new(severity_bar(finding.severity, BAR_WIDTH))
                .fg(color)
                .set_alignment(CellAlignment::Left),
        ]);
    }

    println!("{}", table);
}

fn colorize_level(level: RiskLevel, text: &str) -> ColoredString {
    match level {
        RiskLevel::Low => text.green().bold(),
        RiskLevel::Medium => text.yellow().bold(),
        RiskLevel::High => text.red().bold(),
    }
}

/// `█████░░░░░ 30` style meter for a 0..=100 severity.
fn severity_bar(severity: u8, width: usize) -> String {
    let filled = (severity.min(100) as usize * width + 50) / 100;
    format!(
        "{}{} {:>3}",
        "█".repeat(filled),
        "░".repeat(width - filled),
        severity
    )
}
