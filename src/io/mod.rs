pub mod report;
pub mod walker;
pub mod writer;

pub use report::MigrationReport;
pub use walker::{find_kotlin_files, FileWalker};
pub use writer::{OutputWriter, MIGRATION_REPORT_FILE};

use crate::errors::{KmpmapError, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| KmpmapError::read(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KmpmapError::write(path, e))?;
    }
    fs::write(path, content).map_err(|e| KmpmapError::write(path, e))
}
