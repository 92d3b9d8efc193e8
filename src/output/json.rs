use crate::migratability::MigratabilityResult;
use crate::pipeline::DeclarationRecord;

pub const REPORT_JSON_FILE: &str = "report.json";

/// `report.json`: one record per file, original source included.
pub fn render_report_json(results: &[MigratabilityResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

pub fn render_classification_json(records: &[DeclarationRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
