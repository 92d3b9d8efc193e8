use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kmpmap")]
#[command(about = "Kotlin Multiplatform migration analyzer for Android sources", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Suppress progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: nearest .kmpmap.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Options shared by every command that walks a source tree
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Root of the Kotlin sources to analyze
    #[arg(short, long = "source-dir")]
    pub source_dir: Option<PathBuf>,

    /// Number of worker threads (0 = all cores)
    #[arg(short, long, default_value = "0")]
    pub jobs: usize,

    /// Analyze files one at a time
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Keep going on files whose syntax tree contains errors
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify declarations and generate the multiplatform layout
    Migrate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(short, long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Also write one syntax-tree graph per source file
        #[arg(long = "ast-graphs")]
        ast_graphs: bool,

        /// Keep previous contents of the output directory
        #[arg(long = "no-clean")]
        no_clean: bool,
    },

    /// Assess per-file migratability and write report.json / report.txt
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory
        #[arg(short, long = "output-dir")]
        output_dir: Option<PathBuf>,
    },

    /// Print the category of every declaration without writing files
    Classify {
        #[command(flatten)]
        source: SourceArgs,

        /// Use the four-way taxonomy without the UI/logic split
        #[arg(long)]
        coarse: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
