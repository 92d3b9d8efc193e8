use crate::errors::{KmpmapError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only `migration_report.txt`.
///
/// The file is opened, appended to and closed once per source file, so a run
/// that dies midway still leaves a report for every file written so far.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    path: PathBuf,
}

impl MigrationReport {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, lines: &[String]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| KmpmapError::write(&self.path, e))?;

        let mut block = String::new();
        for line in lines {
            block.push_str(line);
            block.push('\n');
        }
        file.write_all(block.as_bytes())
            .map_err(|e| KmpmapError::write(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_and_extends() {
        let dir = TempDir::new().unwrap();
        let report = MigrationReport::new(dir.path().join("migration_report.txt"));
        report
            .append(&["Source: A.kt".to_string(), "  [COMMON_LOGIC] FUNCTION: a".to_string()])
            .unwrap();
        report.append(&["Source: B.kt".to_string()]).unwrap();

        let text = std::fs::read_to_string(report.path()).unwrap();
        assert_eq!(
            text,
            "Source: A.kt\n  [COMMON_LOGIC] FUNCTION: a\nSource: B.kt\n"
        );
    }
}
