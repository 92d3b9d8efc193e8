//! Human-readable summaries printed to stdout.

use crate::core::Category;
use crate::migratability::Migratability;
use crate::pipeline::{ClassifyOutcome, FileFailure, MigrationSummary, ReportSummary};
use colored::*;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use std::env;
use std::io::IsTerminal;

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `NO_COLOR` and `CLICOLOR=0` turn colors off; `CLICOLOR_FORCE` turns them on.
    pub fn from_env() -> Self {
        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0") {
            return Self::Always;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return Self::Never;
        }
        Self::Auto
    }

    pub fn should_use_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }

    /// Apply this mode to every `colored` string in the process.
    pub fn apply(self) {
        colored::control::set_override(self.should_use_color());
    }
}

fn paint_category(category: Category) -> ColoredString {
    let label = category.label();
    match category {
        Category::CommonLogic | Category::CommonUi => label.green(),
        Category::AdaptableLibrary => label.cyan(),
        Category::PlatformUncommittedLibrary => label.yellow(),
        Category::PlatformLogic | Category::PlatformUi => label.red(),
    }
}

fn paint_verdict(verdict: Migratability) -> ColoredString {
    let label = verdict.label();
    match verdict {
        Migratability::CommonReady => label.green(),
        Migratability::Migratable => label.cyan(),
        Migratability::Partial => label.yellow(),
        Migratability::PlatformOnly => label.red(),
    }
}

fn format_failures(out: &mut String, failures: &[FileFailure]) {
    if failures.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n", "Skipped files:".yellow().bold()));
    for failure in failures {
        out.push_str(&format!("  {} {}\n", failure.path.display(), failure.error.dimmed()));
    }
}

pub fn format_migration_summary(summary: &MigrationSummary) -> String {
    let mut out = format!(
        "{} {} of {} file(s), {} declaration(s)\n",
        "Migrated".green().bold(),
        summary.processed,
        summary.files_found,
        summary.declarations
    );
    for category in Category::ALL {
        let count = summary.by_category.get(&category).copied().unwrap_or(0);
        if count > 0 {
            out.push_str(&format!("  {:<30} {}\n", paint_category(category), count));
        }
    }
    out.push_str(&format!(
        "{} file(s) written to {}\n",
        summary.files_written,
        summary.output_dir.display()
    ));
    format_failures(&mut out, &summary.failures);
    out
}

pub fn format_report_summary(summary: &ReportSummary) -> String {
    let mut out = format!(
        "{} {} of {} file(s)\n",
        "Assessed".green().bold(),
        summary.analyzed,
        summary.files_found
    );
    for verdict in [
        Migratability::CommonReady,
        Migratability::Migratable,
        Migratability::Partial,
        Migratability::PlatformOnly,
    ] {
        let count = summary.by_verdict.get(&verdict).copied().unwrap_or(0);
        out.push_str(&format!("  {:<16} {}\n", paint_verdict(verdict), count));
    }
    out.push_str(&format!("Reports written to {}\n", summary.output_dir.display()));
    format_failures(&mut out, &summary.failures);
    out
}

/// One row per declaration. `coarse` swaps the category column for the
/// four-way taxonomy.
pub fn format_classification_table(outcome: &ClassifyOutcome, coarse: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["File", "Line", "Declaration", "Kind", "Category", "Reason"]);

    for record in &outcome.records {
        let category = if coarse {
            record.coarse.label().to_string()
        } else {
            record.category.label().to_string()
        };
        table.add_row(vec![
            record.file.display().to_string(),
            record.line.to_string(),
            record.name.clone(),
            record.kind.label().to_string(),
            category,
            record.reasons.first().cloned().unwrap_or_default(),
        ]);
    }

    let mut out = format!("{table}\n");
    out.push_str(&format!(
        "{} declaration(s) in {} file(s)\n",
        outcome.records.len(),
        outcome.files_found
    ));
    format_failures(&mut out, &outcome.failures);
    out
}
