//! Per-file orchestration for `migrate`, `report` and `classify`.
//!
//! Each run has two phases. The analysis phase is a pure function of one
//! file's text and the shared rule table, so files are fanned out with
//! rayon; every worker hands back an owned [`FileOutcome`] and nothing
//! borrowed from a syntax tree crosses file boundaries. The write phase is
//! sequential and consumes outcomes in walk order, so reports and collision
//! suffixes come out the same no matter how many threads ran.

use crate::analyzers::{ImportTable, SignalExtractor};
use crate::classifier::{ClassificationResult, Classifier, RuleTable};
use crate::config::{DetectionConfig, KmpmapConfig};
use crate::core::{Category, CoarseCategory, DeclarationKind, DependencyId, StructuralFlags};
use crate::errors::{KmpmapError, Result};
use crate::generator::{FilePlan, GeneratedFile, StubGenerator};
use crate::io::{self, find_kotlin_files, OutputWriter};
use crate::migratability::{Migratability, MigratabilityAnalyzer, MigratabilityResult};
use crate::output::{dot, gradle, json, text};
use crate::parser::KotlinParser;
use crate::progress::{ProgressManager, TEMPLATE_FILE_ANALYSIS};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flattened, owned view of one classified declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationRecord {
    pub file: PathBuf,
    pub name: String,
    pub kind: DeclarationKind,
    pub line: usize,
    pub category: Category,
    pub coarse: CoarseCategory,
    pub dependencies: Vec<DependencyId>,
    pub flags: StructuralFlags,
    pub reasons: Vec<String>,
}

impl DeclarationRecord {
    pub fn from_result(file: &Path, result: &ClassificationResult<'_>) -> Self {
        let declaration = &result.declaration;
        Self {
            file: file.to_path_buf(),
            name: declaration.name().to_string(),
            kind: declaration.kind(),
            line: declaration.line(),
            category: result.category,
            coarse: result.category.coarse(),
            dependencies: declaration.dependencies().to_vec(),
            flags: declaration.flags(),
            reasons: result.reasons.clone(),
        }
    }
}

/// Everything the write phase needs from one analyzed file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub records: Vec<DeclarationRecord>,
    pub plan: FilePlan,
    /// Fully-qualified imports in source order
    pub imports: Vec<String>,
    pub ast_dot: Option<String>,
}

/// A file that contributed nothing to the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Resolved settings for one run: config file values with CLI overrides applied.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub parallel: bool,
    pub allow_partial: bool,
    pub ast_graphs: bool,
    pub dependency_graph: bool,
    pub gradle_snippets: bool,
    pub clean: bool,
    pub ignore_patterns: Vec<String>,
}

impl RunOptions {
    pub fn from_config(config: &KmpmapConfig) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            output_dir: config.output_dir.clone(),
            parallel: true,
            allow_partial: config.parse.allow_partial,
            ast_graphs: config.output.ast_graphs,
            dependency_graph: config.output.dependency_graph,
            gradle_snippets: config.output.gradle_snippets,
            clean: config.output.clean,
            ignore_patterns: config.ignore_patterns().to_vec(),
        }
    }
}

/// Parse, extract, classify and plan a single file.
pub struct FileAnalyzer<'r> {
    rules: &'r RuleTable,
    detection: &'r DetectionConfig,
    ast_graphs: bool,
}

impl<'r> FileAnalyzer<'r> {
    pub fn new(rules: &'r RuleTable, detection: &'r DetectionConfig) -> Self {
        Self {
            rules,
            detection,
            ast_graphs: false,
        }
    }

    pub fn with_ast_graphs(mut self, enabled: bool) -> Self {
        self.ast_graphs = enabled;
        self
    }

    pub fn analyze_path(&self, parser: &mut KotlinParser, path: &Path) -> Result<FileOutcome> {
        let source = io::read_file(path)?;
        self.analyze_source(parser, path, source)
    }

    pub fn analyze_source(
        &self,
        parser: &mut KotlinParser,
        path: &Path,
        source: String,
    ) -> Result<FileOutcome> {
        let parsed = parser.parse(path, source)?;
        let directives = parsed.import_directives();
        let table = ImportTable::build(&directives);

        let declarations = SignalExtractor::new(self.detection).extract(&parsed, &table);
        let results = Classifier::new(self.rules).classify_all(declarations);
        let package = parsed.package_name();
        let plan = StubGenerator::new().plan(path, &package, &results);

        log::debug!(
            "{}: {} declaration(s), package '{}'",
            path.display(),
            results.len(),
            package
        );

        Ok(FileOutcome {
            path: path.to_path_buf(),
            records: results
                .iter()
                .map(|r| DeclarationRecord::from_result(path, r))
                .collect(),
            plan,
            imports: directives.into_iter().map(|d| d.fq_name).collect(),
            ast_dot: self.ast_graphs.then(|| dot::ast_graph(&parsed)),
        })
    }
}

/// Run `work` over every file, in parallel when asked, keeping walk order.
/// Each worker owns one parser.
fn fan_out<T, F>(
    files: &[PathBuf],
    options: &RunOptions,
    progress: &ProgressManager,
    message: &'static str,
    work: F,
) -> Vec<(PathBuf, Result<T>)>
where
    T: Send,
    F: Fn(&mut KotlinParser, &Path) -> Result<T> + Sync,
{
    let bar = progress.create_bar(files.len() as u64, TEMPLATE_FILE_ANALYSIS);
    bar.set_message(message);
    let allow_partial = options.allow_partial;

    let run_one = |parser: &mut Result<KotlinParser>, path: &PathBuf| {
        let outcome = match parser {
            Ok(parser) => work(parser, path.as_path()),
            Err(e) => Err(KmpmapError::Grammar(e.to_string())),
        };
        bar.inc(1);
        (path.clone(), outcome)
    };
    let new_parser = || KotlinParser::new().map(|p| p.allow_partial(allow_partial));

    let outcomes = if options.parallel {
        files
            .par_iter()
            .map_init(new_parser, run_one)
            .collect()
    } else {
        let mut parser = new_parser();
        files.iter().map(|path| run_one(&mut parser, path)).collect()
    };

    bar.finish_and_clear();
    outcomes
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

fn record_failure(failures: &mut Vec<FileFailure>, path: &Path, error: &KmpmapError) {
    log::error!("Failed to process {}: {}", path.display(), error);
    if let Some(file) = error.file().filter(|file| *file != path) {
        log::debug!("Failing path for {}: {}", path.display(), file.display());
    }
    failures.push(FileFailure {
        path: path.to_path_buf(),
        error: error.to_string(),
    });
}

/// Result of `migrate`
#[derive(Debug, Clone, Serialize)]
pub struct MigrationSummary {
    pub output_dir: PathBuf,
    pub files_found: usize,
    pub processed: usize,
    pub failed: usize,
    pub declarations: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub files_written: usize,
    pub failures: Vec<FileFailure>,
}

/// Classify every file and write stubs, copies and the migration report.
///
/// The source directory is checked before the output directory is touched:
/// a missing source tree leaves any previous output in place.
pub fn run_migration(
    options: &RunOptions,
    rules: &RuleTable,
    detection: &DetectionConfig,
    progress: &ProgressManager,
) -> Result<MigrationSummary> {
    let files = find_kotlin_files(&options.source_dir, &options.ignore_patterns)?;
    KotlinParser::new()?;
    let mut writer = OutputWriter::prepare(&options.output_dir, options.clean)?;

    log::info!(
        "Analyzing {} Kotlin file(s) under {}",
        files.len(),
        options.source_dir.display()
    );

    let analyzer = FileAnalyzer::new(rules, detection).with_ast_graphs(options.ast_graphs);
    let outcomes = fan_out(&files, options, progress, "Classifying", |parser, path| {
        analyzer.analyze_path(parser, path)
    });

    let mut summary = MigrationSummary {
        output_dir: options.output_dir.clone(),
        files_found: files.len(),
        processed: 0,
        failed: 0,
        declarations: 0,
        by_category: BTreeMap::new(),
        files_written: 0,
        failures: Vec::new(),
    };
    let mut graph_edges = Vec::new();
    let spinner = progress.create_spinner("Writing output");

    for (path, outcome) in outcomes {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                record_failure(&mut summary.failures, &path, &e);
                continue;
            }
        };

        if let Err(e) = writer.write_plan(&outcome.plan) {
            record_failure(&mut summary.failures, &path, &e);
            continue;
        }
        if let Some(ast) = &outcome.ast_dot {
            let file = GeneratedFile {
                path: dot::ast_graph_path(&path),
                contents: ast.clone(),
            };
            if let Err(e) = writer.write_file(&file) {
                log::warn!("Skipping syntax graph for {}: {}", path.display(), e);
            }
        }

        summary.processed += 1;
        summary.declarations += outcome.records.len();
        for record in &outcome.records {
            *summary.by_category.entry(record.category).or_default() += 1;
        }
        graph_edges.push((relative_to(&options.source_dir, &path), outcome.imports));
    }

    write_graph_artifacts(&mut writer, options, &graph_edges)?;
    spinner.finish_and_clear();

    summary.failed = summary.failures.len();
    summary.files_written = writer.files_written();
    Ok(summary)
}

fn write_graph_artifacts(
    writer: &mut OutputWriter,
    options: &RunOptions,
    edges: &[(PathBuf, Vec<String>)],
) -> Result<()> {
    if options.dependency_graph {
        writer.write_file(&GeneratedFile {
            path: PathBuf::from(dot::DEPENDENCY_GRAPH_FILE),
            contents: dot::dependency_graph(edges),
        })?;
    }
    if options.gradle_snippets {
        let snippets = gradle::GradleSnippets::from_imports(
            edges
                .iter()
                .flat_map(|(_, imports)| imports.iter().map(String::as_str)),
        );
        writer.write_file(&GeneratedFile {
            path: PathBuf::from(gradle::COMMON_SNIPPET_FILE),
            contents: snippets.render_common(),
        })?;
        writer.write_file(&GeneratedFile {
            path: PathBuf::from(gradle::ANDROID_SNIPPET_FILE),
            contents: snippets.render_android(),
        })?;
    }
    Ok(())
}

/// Result of `report`
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub output_dir: PathBuf,
    pub files_found: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub by_verdict: BTreeMap<Migratability, usize>,
    pub failures: Vec<FileFailure>,
}

/// Migratability verdict per file plus `report.json`, `report.txt` and the
/// dependency graph.
pub fn run_report(options: &RunOptions, progress: &ProgressManager) -> Result<ReportSummary> {
    let files = find_kotlin_files(&options.source_dir, &options.ignore_patterns)?;
    KotlinParser::new()?;
    let mut writer = OutputWriter::prepare(&options.output_dir, false)?;

    let analyzer = MigratabilityAnalyzer::new();
    // Imports only feed the graph, so a damaged tree is still worth reading.
    let report_options = RunOptions {
        allow_partial: true,
        ..options.clone()
    };
    let outcomes = fan_out(&files, &report_options, progress, "Scanning", |parser, path| {
        let source = io::read_file(path)?;
        let imports = match parser.parse(path, source.clone()) {
            Ok(parsed) => parsed
                .import_directives()
                .into_iter()
                .map(|d| d.fq_name)
                .collect(),
            Err(e) => {
                log::warn!("No import graph for {}: {}", path.display(), e);
                Vec::new()
            }
        };
        Ok((analyzer.analyze_source(path, source), imports))
    });

    let mut results: Vec<MigratabilityResult> = Vec::new();
    let mut failures = Vec::new();
    let mut edges = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok((result, imports)) => {
                edges.push((relative_to(&options.source_dir, &path), imports));
                results.push(result);
            }
            Err(e) => record_failure(&mut failures, &path, &e),
        }
    }

    let report_json = json::render_report_json(&results).map_err(|e| {
        KmpmapError::write(options.output_dir.join(json::REPORT_JSON_FILE), e.into())
    })?;
    writer.write_file(&GeneratedFile {
        path: PathBuf::from(json::REPORT_JSON_FILE),
        contents: report_json,
    })?;
    writer.write_file(&GeneratedFile {
        path: PathBuf::from(text::REPORT_TEXT_FILE),
        contents: text::render_report_text(&results, chrono::Utc::now()),
    })?;
    if options.dependency_graph {
        writer.write_file(&GeneratedFile {
            path: PathBuf::from(dot::DEPENDENCY_GRAPH_FILE),
            contents: dot::dependency_graph(&edges),
        })?;
    }

    let mut by_verdict = BTreeMap::new();
    for result in &results {
        *by_verdict.entry(result.migratability).or_default() += 1;
    }

    Ok(ReportSummary {
        output_dir: options.output_dir.clone(),
        files_found: files.len(),
        analyzed: results.len(),
        failed: failures.len(),
        by_verdict,
        failures,
    })
}

/// Result of `classify`
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyOutcome {
    pub files_found: usize,
    pub records: Vec<DeclarationRecord>,
    pub failures: Vec<FileFailure>,
}

/// Classify without writing anything.
pub fn classify_tree(
    options: &RunOptions,
    rules: &RuleTable,
    detection: &DetectionConfig,
    progress: &ProgressManager,
) -> Result<ClassifyOutcome> {
    let files = find_kotlin_files(&options.source_dir, &options.ignore_patterns)?;
    KotlinParser::new()?;

    let analyzer = FileAnalyzer::new(rules, detection);
    let outcomes = fan_out(&files, options, progress, "Classifying", |parser, path| {
        analyzer.analyze_path(parser, path)
    });

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(outcome) => records.extend(outcome.records),
            Err(e) => record_failure(&mut failures, &path, &e),
        }
    }

    Ok(ClassifyOutcome {
        files_found: files.len(),
        records,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Emission;
    use indoc::indoc;

    fn analyze(source: &str) -> FileOutcome {
        let rules = RuleTable::default();
        let detection = DetectionConfig::default();
        let mut parser = KotlinParser::new().unwrap();
        FileAnalyzer::new(&rules, &detection)
            .analyze_source(&mut parser, Path::new("src/Feature.kt"), source.to_string())
            .unwrap()
    }

    #[test]
    fn test_outcome_is_owned_and_complete() {
        let outcome = analyze(indoc! {"
            package com.example.feature

            import android.content.Context
            import kotlin.math.max

            fun clamp(v: Int) = max(0, v)
            fun open(context: Context) {}
        "});

        assert_eq!(
            outcome.imports,
            vec!["android.content.Context", "kotlin.math.max"]
        );
        let categories: Vec<_> = outcome.records.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![Category::AdaptableLibrary, Category::PlatformLogic]
        );
        assert_eq!(outcome.records[1].coarse, CoarseCategory::AndroidPlatform);
        assert!(matches!(outcome.plan.emissions[1], Emission::Pair(_)));
        assert!(outcome.ast_dot.is_none());
    }

    #[test]
    fn test_parse_failure_is_recoverable() {
        let rules = RuleTable::default();
        let detection = DetectionConfig::default();
        let mut parser = KotlinParser::new().unwrap();
        let err = FileAnalyzer::new(&rules, &detection)
            .analyze_source(&mut parser, Path::new("Bad.kt"), "class {".to_string())
            .unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_run_options_follow_config() {
        let mut config = KmpmapConfig::default();
        config.output.ast_graphs = true;
        config.parse.allow_partial = true;
        let options = RunOptions::from_config(&config);
        assert!(options.ast_graphs);
        assert!(options.allow_partial);
        assert!(options.parallel);
        assert_eq!(options.output_dir, PathBuf::from("kmp-migration"));
    }
}
