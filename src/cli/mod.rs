//! CLI module for kmpmap
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)
//!
//! Command handlers live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{Cli, Commands, SourceArgs};
pub use setup::{configure_thread_pool, get_worker_count, init_logging, log_level};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    use clap::Parser;
    Cli::parse()
}
