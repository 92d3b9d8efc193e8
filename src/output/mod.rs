//! Rendering of run results: DOT graphs, Gradle snippets, JSON and text
//! reports, and terminal summaries.

pub mod dot;
pub mod gradle;
pub mod json;
pub mod terminal;
pub mod text;

pub use json::{render_classification_json, render_report_json};
pub use terminal::{
    format_classification_table, format_migration_summary, format_report_summary, ColorMode,
};
pub use text::render_report_text;

/// Output format for `classify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}
