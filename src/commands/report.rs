use super::CommandContext;
use crate::cli::SourceArgs;
use crate::output::{format_report_summary, ColorMode};
use crate::pipeline::{run_report, ReportSummary};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ReportConfig {
    pub config_path: Option<PathBuf>,
    pub source: SourceArgs,
    pub output_dir: Option<PathBuf>,
    pub quiet: bool,
    pub verbosity: u8,
}

pub fn handle_report(config: ReportConfig) -> Result<ReportSummary> {
    let mut ctx = CommandContext::build(
        config.config_path.as_deref(),
        &config.source,
        config.quiet,
        config.verbosity,
    )?;
    if let Some(dir) = config.output_dir {
        ctx.options.output_dir = dir;
    }

    let summary = run_report(&ctx.options, &ctx.progress).with_context(|| {
        format!(
            "Migratability report for {} failed",
            ctx.options.source_dir.display()
        )
    })?;

    ctx.progress.clear().ok();
    ColorMode::from_env().apply();
    print!("{}", format_report_summary(&summary));
    Ok(summary)
}
