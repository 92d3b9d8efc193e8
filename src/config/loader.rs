use std::fs;
use std::path::{Path, PathBuf};

use super::core::KmpmapConfig;
use crate::errors::{KmpmapError, Result};

pub const CONFIG_FILE_NAME: &str = ".kmpmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<KmpmapConfig, String> {
    let config = toml::from_str::<KmpmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Try a single candidate path. Missing files are silent, broken files warn.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<KmpmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file, falling back to defaults.
pub fn load_config_from_dir(start: PathBuf) -> KmpmapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            KmpmapConfig::default()
        })
}

pub fn load_config() -> KmpmapConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            KmpmapConfig::default()
        }
    }
}

/// Load an explicitly requested config file. Any failure is fatal.
pub fn load_config_from_path(path: &Path) -> Result<KmpmapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| KmpmapError::config_in(format!("cannot read file: {e}"), path))?;
    parse_and_validate_config(&contents).map_err(|message| KmpmapError::config_in(message, path))
}

/// Commented configuration written by `kmpmap init`.
pub fn default_config_template() -> &'static str {
    r#"# kmpmap configuration

# Kotlin source root and generated output location (CLI flags override these)
source_dir = "src"
output_dir = "kmp-migration"

[detection]
# Annotation short names marking UI declarations
ui_annotations = ["Composable", "Preview"]
# Supertype fragments marking view-like classes, and fragments that veto them
view_base_fragments = ["Activity", "Fragment", "View", "Dialog", "Adapter"]
view_base_exclusions = ["ViewModel"]

[rules]
# Set to true to use only the prefixes listed here
replace_defaults = false
platform = []
host_runtime = []
adaptable = []
ui = []
ui_blacklist = []

[parse]
# Analyze files with syntax errors instead of skipping them
allow_partial = false

[output]
ast_graphs = false
dependency_graph = true
gradle_snippets = true
clean = true

[ignore]
patterns = ["**/build/**", "**/test/**", "**/androidTest/**"]
"#
}
