//! Configuration loaded from `.kmpmap.toml`.

mod core;
mod loader;

pub use core::{
    DetectionConfig, IgnoreConfig, KmpmapConfig, OutputConfig, ParseConfig, RulesConfig,
};

pub use loader::{
    default_config_template, directory_ancestors, load_config, load_config_from_dir,
    load_config_from_path, parse_and_validate_config, CONFIG_FILE_NAME,
};
