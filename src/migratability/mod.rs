//! File-level migratability verdicts.

pub mod scanner;

pub use scanner::{detect_usages, strip_comments};

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of platform API a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageKind {
    Storage,
    Logging,
    Threading,
    Time,
    State,
    Ui,
    Resources,
    Network,
    Http,
    Json,
    DependencyInjection,
}

impl UsageKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Storage => "STORAGE",
            Self::Logging => "LOGGING",
            Self::Threading => "THREADING",
            Self::Time => "TIME",
            Self::State => "STATE",
            Self::Ui => "UI",
            Self::Resources => "RESOURCES",
            Self::Network => "NETWORK",
            Self::Http => "HTTP",
            Self::Json => "JSON",
            Self::DependencyInjection => "DEPENDENCY_INJECTION",
        }
    }

    /// Has a mature multiplatform library replacement
    const fn is_replaceable(self) -> bool {
        matches!(
            self,
            Self::Storage
                | Self::Logging
                | Self::Threading
                | Self::Time
                | Self::Network
                | Self::Http
                | Self::Json
        )
    }

    /// Bound to the platform UI or resource system
    const fn is_platform_bound(self) -> bool {
        matches!(self, Self::Ui | Self::Resources)
    }

    pub const fn replacement(self) -> Option<&'static str> {
        match self {
            Self::Storage => Some("Use Multiplatform-Settings or a SQLDelight database"),
            Self::Logging => Some("Use the Kermit or Napier logging library"),
            Self::Threading => Some("Use kotlinx.coroutines for cross-platform concurrency"),
            Self::Time => Some("Use kotlinx-datetime for dates and times"),
            Self::State => Some("Use the multiplatform AndroidX Lifecycle ViewModel"),
            Self::Network => Some("Use a Ktor-based network observer"),
            Self::Http => Some("Use io.ktor:ktor-client instead of OkHttp/Retrofit"),
            Self::Json => Some("Use kotlinx.serialization instead of Gson/org.json"),
            Self::Ui | Self::Resources | Self::DependencyInjection => None,
        }
    }
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Migratability {
    CommonReady,
    Migratable,
    Partial,
    PlatformOnly,
}

impl Migratability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CommonReady => "COMMON_READY",
            Self::Migratable => "MIGRATABLE",
            Self::Partial => "PARTIAL",
            Self::PlatformOnly => "PLATFORM_ONLY",
        }
    }
}

impl fmt::Display for Migratability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verdict for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratabilityResult {
    pub file_path: PathBuf,
    pub migratability: Migratability,
    pub usages: BTreeSet<UsageKind>,
    pub reasons: Vec<String>,
    pub suggested_replacements: Vec<String>,
    /// Full original text of the file
    pub source: String,
}

impl MigratabilityResult {
    /// Block used in `report.txt`.
    pub fn to_readable_string(&self) -> String {
        let usages = self
            .usages
            .iter()
            .map(|u| u.label())
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!(
            "[{}] {}\n  Platform usages: [{}]\n",
            self.migratability,
            self.file_path.display(),
            usages
        );
        for reason in &self.reasons {
            out.push_str(&format!("  - {reason}\n"));
        }
        for replacement in &self.suggested_replacements {
            out.push_str(&format!("  * {replacement}\n"));
        }
        out
    }
}

/// Maps a usage set to a verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigratabilityAnalyzer;

impl MigratabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scan `source` and classify it.
    pub fn analyze_source(&self, file_path: &Path, source: String) -> MigratabilityResult {
        let usages = detect_usages(&source);
        self.analyze(file_path, usages, source)
    }

    pub fn analyze(
        &self,
        file_path: &Path,
        usages: BTreeSet<UsageKind>,
        source: String,
    ) -> MigratabilityResult {
        let mut reasons = Vec::new();
        let mut replacements: Vec<String> = Vec::new();

        let migratability = if usages.is_empty() {
            reasons.push("No platform APIs detected".to_string());
            Migratability::CommonReady
        } else if usages.iter().any(|u| u.is_platform_bound()) {
            let bound: Vec<_> = usages
                .iter()
                .filter(|u| u.is_platform_bound())
                .map(|u| u.label())
                .collect();
            reasons.push(format!(
                "Uses platform UI or resource APIs with no common replacement: [{}]",
                bound.join(", ")
            ));
            Migratability::PlatformOnly
        } else if usages
            .iter()
            .all(|u| u.is_replaceable() || *u == UsageKind::State)
        {
            for suggestion in usages.iter().filter_map(|u| u.replacement()) {
                if !replacements.iter().any(|r| r == suggestion) {
                    replacements.push(suggestion.to_string());
                }
            }
            reasons.push("All platform usages have known multiplatform replacements".to_string());
            Migratability::Migratable
        } else {
            reasons.push(
                "Mixes platform API kinds without replacements; split logic from platform code manually"
                    .to_string(),
            );
            Migratability::Partial
        };

        MigratabilityResult {
            file_path: file_path.to_path_buf(),
            migratability,
            usages,
            reasons,
            suggested_replacements: replacements,
            source,
        }
    }
}
