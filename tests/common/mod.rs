// Shared fixtures for kmpmap integration tests
#![allow(dead_code)]

use kmpmap::pipeline::RunOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project with a Kotlin source tree and an output location.
pub struct KotlinProject {
    pub dir: TempDir,
}

impl KotlinProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir_all(dir.path().join("src")).expect("src dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("kmp-migration")
    }

    /// Write `contents` to `src/<relative>`.
    pub fn add(&self, relative: &str, contents: &str) -> &Self {
        let path = self.source_dir().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("parent dir");
        fs::write(path, contents).expect("write source");
        self
    }

    pub fn output(&self, relative: &str) -> String {
        fs::read_to_string(self.output_dir().join(relative))
            .unwrap_or_else(|e| panic!("missing output {relative}: {e}"))
    }

    pub fn output_exists(&self, relative: &str) -> bool {
        self.output_dir().join(relative).exists()
    }

    pub fn options(&self) -> RunOptions {
        RunOptions {
            source_dir: self.source_dir(),
            output_dir: self.output_dir(),
            parallel: false,
            allow_partial: false,
            ast_graphs: false,
            dependency_graph: true,
            gradle_snippets: true,
            clean: true,
            ignore_patterns: Vec::new(),
        }
    }
}
