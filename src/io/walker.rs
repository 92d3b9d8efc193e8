use crate::errors::{KmpmapError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Finds Kotlin sources under a root directory.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: vec!["kt".to_string()],
            ignore_patterns: vec![],
        }
    }

    /// Invalid glob patterns are logged and skipped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    log::warn!("Ignoring invalid ignore pattern '{}': {}", pattern, e);
                    None
                }
            })
            .collect();
        self
    }

    /// All matching files, sorted by path so runs are reproducible.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(KmpmapError::SourceDirMissing {
                path: self.root.clone(),
            });
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_root_error(&e) => {
                    return Err(KmpmapError::SourceDirUnreadable {
                        path: self.root.clone(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    log::warn!(
                        "Skipping unreadable entry under {}: {}",
                        self.root.display(),
                        e
                    );
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        if !self.extensions.iter().any(|e| *e == ext) {
            return false;
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

/// Only a failure to read the root itself stops the walk; nested entries
/// that cannot be read are skipped.
fn is_root_error(err: &ignore::Error) -> bool {
    err.depth() == Some(0)
}

pub fn find_kotlin_files(root: &Path, ignore_patterns: &[String]) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns)
        .walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "fun x() {}\n").unwrap();
    }

    #[test]
    fn test_walk_finds_kotlin_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b/Second.kt");
        touch(dir.path(), "a/First.kt");
        touch(dir.path(), "a/notes.txt");
        touch(dir.path(), "Script.kts");

        let files = find_kotlin_files(dir.path(), &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a/First.kt"), PathBuf::from("b/Second.kt")]
        );
    }

    #[test]
    fn test_ignore_patterns_are_relative_to_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main/App.kt");
        touch(dir.path(), "test/AppTest.kt");

        let files = find_kotlin_files(dir.path(), &["test/**".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main/App.kt"));
    }

    #[test]
    fn test_only_root_level_walk_errors_are_fatal() {
        let denied = || {
            Box::new(ignore::Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        };
        let root = ignore::Error::WithDepth {
            depth: 0,
            err: denied(),
        };
        let nested = ignore::Error::WithDepth {
            depth: 1,
            err: denied(),
        };
        let deep = ignore::Error::WithPath {
            path: PathBuf::from("src/locked"),
            err: Box::new(ignore::Error::WithDepth {
                depth: 3,
                err: denied(),
            }),
        };

        assert!(is_root_error(&root));
        assert!(!is_root_error(&nested));
        assert!(!is_root_error(&deep));
        assert!(!is_root_error(&ignore::Error::Io(std::io::Error::other("gitignore"))));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_stop_walk() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/First.kt");
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("a/Broken.kt"))
            .unwrap();

        let files = find_kotlin_files(dir.path(), &[]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a/First.kt"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = find_kotlin_files(&dir.path().join("missing"), &[]).unwrap_err();
        assert!(matches!(err, KmpmapError::SourceDirMissing { .. }));
        assert!(err.is_fatal());
    }
}
