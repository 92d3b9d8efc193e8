use crate::migratability::{Migratability, MigratabilityResult};
use chrono::{DateTime, Utc};

pub const REPORT_TEXT_FILE: &str = "report.txt";

/// `report.txt`: a header with verdict counts, then one block per file.
pub fn render_report_text(results: &[MigratabilityResult], generated_at: DateTime<Utc>) -> String {
    let count = |verdict: Migratability| {
        results
            .iter()
            .filter(|r| r.migratability == verdict)
            .count()
    };

    let mut out = format!(
        "# KMP migratability report\n# Generated: {}\n# Files: {} (common-ready {}, migratable {}, partial {}, platform-only {})\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        results.len(),
        count(Migratability::CommonReady),
        count(Migratability::Migratable),
        count(Migratability::Partial),
        count(Migratability::PlatformOnly),
    );

    let blocks: Vec<String> = results.iter().map(|r| r.to_readable_string()).collect();
    out.push_str(&blocks.join("\n"));
    out
}
