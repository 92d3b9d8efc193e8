//! Error types for kmpmap runs.
//!
//! Errors fall into two severities:
//!
//! - **Fatal**: the run cannot start or cannot produce output at all
//!   (missing source directory, unusable configuration, grammar load failure).
//! - **Recoverable**: a single source file could not be read, parsed or
//!   written. The file contributes nothing and the run continues.
//!
//! There is no retry policy. Parse and read failures are deterministic, so
//! a second attempt on the same input fails the same way.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for kmpmap operations
#[derive(Debug, Error)]
pub enum KmpmapError {
    /// Root source directory does not exist or is not a directory
    #[error("Source directory not found: {}", path.display())]
    SourceDirMissing { path: PathBuf },

    /// Root source directory exists but could not be walked
    #[error("Failed to read source directory {}: {message}", path.display())]
    SourceDirUnreadable { path: PathBuf, message: String },

    /// Output directory could not be prepared
    #[error("Failed to prepare output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or value errors
    #[error(
        "Configuration error{}: {message}",
        path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default()
    )]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// The Kotlin grammar could not be loaded into the parser
    #[error("Failed to load Kotlin grammar: {0}")]
    Grammar(String),

    /// A source file could not be read
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file did not parse cleanly
    #[error("Parse error in {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A generated artifact could not be written
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KmpmapError {
    /// Create a configuration error tied to a config file
    pub fn config_in(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a parse error with a 1-based location
    pub fn parse(
        path: impl Into<PathBuf>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this error aborts the whole run.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::SourceDirMissing { .. }
            | Self::SourceDirUnreadable { .. }
            | Self::OutputDir { .. }
            | Self::Config { .. }
            | Self::Grammar(_) => true,
            Self::Read { .. } | Self::Parse { .. } | Self::Write { .. } => false,
        }
    }

    /// File a recoverable error is about
    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, KmpmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let err = KmpmapError::SourceDirMissing {
            path: PathBuf::from("app/src"),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Source directory not found: app/src");
    }

    #[test]
    fn test_parse_error_is_recoverable() {
        let err = KmpmapError::parse("Main.kt", 3, 7, "unexpected token");
        assert!(!err.is_fatal());
        assert_eq!(err.file(), Some(Path::new("Main.kt")));
        assert_eq!(
            err.to_string(),
            "Parse error in Main.kt:3:7: unexpected token"
        );
    }

    #[test]
    fn test_config_error_display_with_path() {
        let err = KmpmapError::config_in("empty prefix", ".kmpmap.toml");
        assert_eq!(
            err.to_string(),
            "Configuration error in .kmpmap.toml: empty prefix"
        );
        let bare = KmpmapError::Config {
            message: "empty prefix".to_string(),
            path: None,
        };
        assert_eq!(bare.to_string(), "Configuration error: empty prefix");
    }

    #[test]
    fn test_read_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = KmpmapError::read("a.kt", io);
        assert!(!err.is_fatal());
        assert!(std::error::Error::source(&err).is_some());
    }
}
