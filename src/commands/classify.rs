use super::CommandContext;
use crate::classifier::RuleTable;
use crate::cli::SourceArgs;
use crate::output::{
    format_classification_table, render_classification_json, ColorMode, OutputFormat,
};
use crate::pipeline::classify_tree;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ClassifyConfig {
    pub config_path: Option<PathBuf>,
    pub source: SourceArgs,
    pub coarse: bool,
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbosity: u8,
}

pub fn handle_classify(config: ClassifyConfig) -> Result<()> {
    let ctx = CommandContext::build(
        config.config_path.as_deref(),
        &config.source,
        config.quiet,
        config.verbosity,
    )?;

    let rules = RuleTable::from_config(&ctx.config.rules);
    let outcome = classify_tree(&ctx.options, &rules, &ctx.config.detection, &ctx.progress)
        .with_context(|| format!("Classification of {} failed", ctx.options.source_dir.display()))?;

    ctx.progress.clear().ok();
    match config.format {
        OutputFormat::Json => {
            let json = render_classification_json(&outcome.records)
                .context("Failed to serialize classification")?;
            println!("{json}");
        }
        OutputFormat::Terminal => {
            ColorMode::from_env().apply();
            print!("{}", format_classification_table(&outcome, config.coarse));
        }
    }
    Ok(())
}
