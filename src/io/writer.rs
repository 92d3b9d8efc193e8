//! Persists generation plans under the output directory.

use super::report::MigrationReport;
use crate::errors::{KmpmapError, Result};
use crate::generator::{FilePlan, GeneratedFile};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const MIGRATION_REPORT_FILE: &str = "migration_report.txt";

/// Single writer for one run.
///
/// Owns the report appender and the set of paths already written, so
/// overloads and same-named declarations get `_2`, `_3`, ... suffixes
/// instead of overwriting each other.
#[derive(Debug)]
pub struct OutputWriter {
    root: PathBuf,
    reserved: HashSet<PathBuf>,
    report: MigrationReport,
    files_written: usize,
}

impl OutputWriter {
    /// Create (and optionally clean) the output directory.
    pub fn prepare(root: &Path, clean: bool) -> Result<Self> {
        let io_err = |source| KmpmapError::OutputDir {
            path: root.to_path_buf(),
            source,
        };
        if clean && root.exists() {
            log::debug!("Cleaning output directory {}", root.display());
            fs::remove_dir_all(root).map_err(io_err)?;
        }
        fs::create_dir_all(root).map_err(io_err)?;

        Ok(Self {
            root: root.to_path_buf(),
            reserved: HashSet::new(),
            report: MigrationReport::new(root.join(MIGRATION_REPORT_FILE)),
            files_written: 0,
        })
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    pub fn report_path(&self) -> &Path {
        self.report.path()
    }

    /// Write the plan's emissions, then append its report block.
    /// Returns the paths written, relative to the output root.
    ///
    /// A plan is all or nothing: if any write fails, files already written
    /// for it are removed, their names are released and no report block is
    /// appended.
    pub fn write_plan(&mut self, plan: &FilePlan) -> Result<Vec<PathBuf>> {
        let mut claimed = Vec::new();
        let mut written = Vec::new();

        let outcome = self
            .write_emissions(plan, &mut claimed, &mut written)
            .and_then(|()| self.report.append(&plan.report_lines));
        if let Err(e) = outcome {
            self.roll_back(&claimed, &written);
            return Err(e);
        }
        Ok(written)
    }

    fn write_emissions(
        &mut self,
        plan: &FilePlan,
        claimed: &mut Vec<PathBuf>,
        written: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for emission in &plan.emissions {
            let files = emission.files();
            let wanted: Vec<&PathBuf> = files.iter().map(|f| &f.path).collect();
            let paths = self.reserve(&wanted);
            claimed.extend(paths.iter().cloned());

            for (path, file) in paths.into_iter().zip(files) {
                self.write_at(&path, &file.contents)?;
                written.push(path);
            }
        }
        Ok(())
    }

    fn roll_back(&mut self, claimed: &[PathBuf], written: &[PathBuf]) {
        for path in written {
            let full = self.root.join(path);
            match fs::remove_file(&full) {
                Ok(()) => self.files_written -= 1,
                Err(e) => log::warn!("Could not remove {}: {}", full.display(), e),
            }
        }
        for path in claimed {
            self.reserved.remove(path);
        }
    }

    /// Write a standalone artifact, suffixing its name if the path is taken.
    pub fn write_file(&mut self, file: &GeneratedFile) -> Result<PathBuf> {
        let path = self.reserve(&[&file.path]).remove(0);
        self.write_at(&path, &file.contents)?;
        Ok(path)
    }

    /// Pick the smallest suffix that is free for every path in the group.
    fn reserve(&mut self, paths: &[&PathBuf]) -> Vec<PathBuf> {
        let mut n = 1;
        loop {
            let candidates: Vec<PathBuf> = paths.iter().map(|p| with_suffix(p, n)).collect();
            if candidates.iter().all(|c| !self.reserved.contains(c)) {
                if n > 1 {
                    log::debug!(
                        "Output path collision for {}, using suffix _{}",
                        paths[0].display(),
                        n
                    );
                }
                self.reserved.extend(candidates.iter().cloned());
                return candidates;
            }
            n += 1;
        }
    }

    fn write_at(&mut self, relative: &Path, contents: &str) -> Result<()> {
        let full = self.root.join(relative);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| KmpmapError::write(&full, e))?;
        }
        fs::write(&full, contents).map_err(|e| KmpmapError::write(&full, e))?;
        self.files_written += 1;
        Ok(())
    }
}

/// `dir/Name.kt` with n = 2 -> `dir/Name_2.kt`; n = 1 leaves the path alone.
pub fn with_suffix(path: &Path, n: usize) -> PathBuf {
    if n <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    };
    path.with_file_name(name)
}
