//! kmpmap: classify Kotlin/Android sources for a Kotlin Multiplatform migration.
//!
//! The analysis runs in four stages per file: the import table maps short
//! names to fully-qualified dependencies, the signal extractor collects
//! top-level declarations with their dependencies and structural UI flags,
//! the classifier assigns each declaration a [`Category`], and the
//! generator plans copies and `expect`/`actual` stub pairs. A separate,
//! keyword-based pass assigns each file a [`Migratability`] verdict.

pub mod analyzers;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod generator;
pub mod io;
pub mod migratability;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod progress;

// Re-export commonly used types
pub use crate::analyzers::{ImportTable, SignalExtractor};
pub use crate::classifier::{ClassificationResult, Classifier, Decision, RuleTable};
pub use crate::config::KmpmapConfig;
pub use crate::core::{
    Category, CoarseCategory, DeclarationKind, DependencyId, SourceDeclaration, StructuralFlags,
};
pub use crate::errors::{KmpmapError, Result};
pub use crate::generator::{FilePlan, StubGenerator};
pub use crate::migratability::{
    Migratability, MigratabilityAnalyzer, MigratabilityResult, UsageKind,
};
pub use crate::parser::{KotlinParser, ParsedFile};
pub use crate::pipeline::{
    classify_tree, run_migration, run_report, DeclarationRecord, FileAnalyzer, RunOptions,
};
