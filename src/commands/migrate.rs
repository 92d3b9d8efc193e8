use super::CommandContext;
use crate::classifier::RuleTable;
use crate::cli::SourceArgs;
use crate::output::{format_migration_summary, ColorMode};
use crate::pipeline::{run_migration, MigrationSummary};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct MigrateConfig {
    pub config_path: Option<PathBuf>,
    pub source: SourceArgs,
    pub output_dir: Option<PathBuf>,
    pub ast_graphs: bool,
    pub no_clean: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

pub fn handle_migrate(config: MigrateConfig) -> Result<MigrationSummary> {
    let mut ctx = CommandContext::build(
        config.config_path.as_deref(),
        &config.source,
        config.quiet,
        config.verbosity,
    )?;
    if let Some(dir) = config.output_dir {
        ctx.options.output_dir = dir;
    }
    ctx.options.ast_graphs |= config.ast_graphs;
    if config.no_clean {
        ctx.options.clean = false;
    }

    let rules = RuleTable::from_config(&ctx.config.rules);
    let summary = run_migration(&ctx.options, &rules, &ctx.config.detection, &ctx.progress)
        .with_context(|| {
            format!(
                "Migration of {} failed",
                ctx.options.source_dir.display()
            )
        })?;

    ctx.progress.clear().ok();
    ColorMode::from_env().apply();
    print!("{}", format_migration_summary(&summary));
    Ok(summary)
}
