//! Command handlers. Each one resolves configuration, runs the pipeline and
//! prints a summary; errors surface as `anyhow` with context.

pub mod classify;
pub mod init;
pub mod migrate;
pub mod report;

use crate::cli::{configure_thread_pool, SourceArgs};
use crate::config::{load_config, load_config_from_path, KmpmapConfig};
use crate::pipeline::RunOptions;
use crate::progress::{ProgressConfig, ProgressManager};
use anyhow::Result;
use std::path::Path;

/// Settings every command starts from
pub struct CommandContext {
    pub config: KmpmapConfig,
    pub options: RunOptions,
    pub progress: ProgressManager,
}

impl CommandContext {
    /// Load configuration, apply CLI overrides and set up the thread pool.
    pub fn build(
        config_path: Option<&Path>,
        source: &SourceArgs,
        quiet: bool,
        verbosity: u8,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config_from_path(path)?,
            None => load_config(),
        };

        let mut options = RunOptions::from_config(&config);
        if let Some(dir) = &source.source_dir {
            options.source_dir = dir.clone();
        }
        options.parallel = !source.no_parallel;
        options.allow_partial |= source.allow_partial;

        if options.parallel {
            configure_thread_pool(source.jobs);
        }
        log::debug!("Run options: {:?}", options);

        Ok(Self {
            config,
            options,
            progress: ProgressManager::new(ProgressConfig::from_env(quiet, verbosity)),
        })
    }
}
