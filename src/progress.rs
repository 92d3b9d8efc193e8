//! Progress feedback for long runs.
//!
//! Bars are drawn on stderr with `indicatif` and are hidden entirely in
//! quiet mode (`--quiet` or `KMPMAP_QUIET`) or when stderr is not a
//! terminal, so piped output and CI logs stay clean.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;

pub const TEMPLATE_FILE_ANALYSIS: &str = "{msg} {pos}/{len} files ({percent}%) - {eta}";
pub const TEMPLATE_SPINNER: &str = "{spinner} {msg}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
    pub verbosity: u8,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        let env_quiet = std::env::var("KMPMAP_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
            verbosity,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }
        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

#[derive(Clone)]
pub struct ProgressManager {
    multi: Arc<MultiProgress>,
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            multi: Arc::new(MultiProgress::new()),
            config,
        }
    }

    /// Manager whose bars are always hidden
    pub fn hidden() -> Self {
        Self::new(ProgressConfig {
            quiet_mode: true,
            verbosity: 0,
        })
    }

    /// Returns a hidden bar if progress should not be shown
    pub fn create_bar(&self, len: u64, template: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new(len));
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("█▓▒░  "));
        }
        pb
    }

    pub fn create_spinner(&self, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template(TEMPLATE_SPINNER) {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Clear bars before printing final output.
    pub fn clear(&self) -> std::io::Result<()> {
        self.multi.clear()
    }
}
