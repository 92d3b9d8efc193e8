use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for kmpmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KmpmapConfig {
    /// Root of the Kotlin source tree to analyze
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory receiving generated stubs, copies and reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Structural UI detection
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Additions to (or replacements for) the classification prefix tables
    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub parse: ParseConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

impl Default for KmpmapConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            detection: DetectionConfig::default(),
            rules: RulesConfig::default(),
            parse: ParseConfig::default(),
            output: OutputConfig::default(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl KmpmapConfig {
    /// Reject values that would make classification meaningless.
    pub fn validate(&self) -> Result<(), String> {
        self.rules.validate()?;
        self.detection.validate()
    }

    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore.patterns
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("kmp-migration")
}

/// Structural signals that mark a declaration as UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionConfig {
    /// Annotation short names that mark UI code (default: Composable, Preview)
    #[serde(default = "default_ui_annotations")]
    pub ui_annotations: Vec<String>,

    /// Supertype text fragments that mark a view-like base
    #[serde(default = "default_view_base_fragments")]
    pub view_base_fragments: Vec<String>,

    /// Fragments that veto a view-like match (default: ViewModel)
    #[serde(default = "default_view_base_exclusions")]
    pub view_base_exclusions: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ui_annotations: default_ui_annotations(),
            view_base_fragments: default_view_base_fragments(),
            view_base_exclusions: default_view_base_exclusions(),
        }
    }
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        let lists = [
            ("detection.ui_annotations", &self.ui_annotations),
            ("detection.view_base_fragments", &self.view_base_fragments),
            ("detection.view_base_exclusions", &self.view_base_exclusions),
        ];
        for (key, values) in lists {
            if values.iter().any(|v| v.trim().is_empty()) {
                return Err(format!("{key} contains an empty entry"));
            }
        }
        Ok(())
    }

    pub fn is_ui_annotation(&self, short_name: &str) -> bool {
        self.ui_annotations.iter().any(|a| a == short_name)
    }

    /// A supertype entry is view-like when it contains a base fragment and
    /// no exclusion fragment.
    pub fn is_view_like(&self, supertype: &str) -> bool {
        self.view_base_fragments
            .iter()
            .any(|f| supertype.contains(f.as_str()))
            && !self
                .view_base_exclusions
                .iter()
                .any(|e| supertype.contains(e.as_str()))
    }
}

fn default_ui_annotations() -> Vec<String> {
    vec!["Composable".to_string(), "Preview".to_string()]
}

fn default_view_base_fragments() -> Vec<String> {
    ["Activity", "Fragment", "View", "Dialog", "Adapter"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_view_base_exclusions() -> Vec<String> {
    vec!["ViewModel".to_string()]
}

/// Prefix table overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RulesConfig {
    /// Use only the lists below instead of extending the built-in tables
    #[serde(default)]
    pub replace_defaults: bool,

    #[serde(default)]
    pub platform: Vec<String>,

    #[serde(default)]
    pub host_runtime: Vec<String>,

    #[serde(default)]
    pub adaptable: Vec<String>,

    #[serde(default)]
    pub ui: Vec<String>,

    /// Fully-qualified names never treated as UI
    #[serde(default)]
    pub ui_blacklist: Vec<String>,
}

impl RulesConfig {
    fn validate(&self) -> Result<(), String> {
        let lists = [
            ("rules.platform", &self.platform),
            ("rules.host_runtime", &self.host_runtime),
            ("rules.adaptable", &self.adaptable),
            ("rules.ui", &self.ui),
            ("rules.ui_blacklist", &self.ui_blacklist),
        ];
        for (key, values) in lists {
            if values.iter().any(|v| v.trim().is_empty()) {
                return Err(format!("{key} contains an empty prefix"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseConfig {
    /// Analyze files whose syntax tree contains errors instead of skipping them
    #[serde(default)]
    pub allow_partial: bool,
}

/// Which supplementary artifacts `migrate` writes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// One `ast/<file>.kt.dot` per source file
    #[serde(default)]
    pub ast_graphs: bool,

    #[serde(default = "default_true")]
    pub dependency_graph: bool,

    #[serde(default = "default_true")]
    pub gradle_snippets: bool,

    /// Remove the output directory before writing
    #[serde(default = "default_true")]
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ast_graphs: false,
            dependency_graph: true,
            gradle_snippets: true,
            clean: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IgnoreConfig {
    /// Glob patterns matched against paths relative to the source root
    #[serde(default)]
    pub patterns: Vec<String>,
}
