//! Planning of generated sources and report lines.
//!
//! Planning is pure: [`StubGenerator::plan`] turns the classification of one
//! file into owned [`GeneratedFile`] values and report lines. Nothing here
//! touches the file system; the [`OutputWriter`](crate::io::OutputWriter)
//! persists plans in walk order.

pub mod signature;
mod stubs;

pub use signature::signature;

use crate::classifier::ClassificationResult;
use crate::core::DependencyId;
use std::path::{Path, PathBuf};

/// A file to write, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// `expect` declaration for `commonMain` plus its `actual` for `androidMain`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubPair {
    /// Signature embedded verbatim in both files
    pub signature: String,
    pub portable: GeneratedFile,
    pub platform: GeneratedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    DirectCopy(GeneratedFile),
    Pair(StubPair),
}

impl Emission {
    /// Files of this emission in write order; a pair is portable first.
    pub fn files(&self) -> Vec<&GeneratedFile> {
        match self {
            Emission::DirectCopy(file) => vec![file],
            Emission::Pair(pair) => vec![&pair.portable, &pair.platform],
        }
    }
}

/// Everything generated for one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePlan {
    pub source_path: PathBuf,
    /// Lines appended to `migration_report.txt`, including the trailing blank line
    pub report_lines: Vec<String>,
    pub emissions: Vec<Emission>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StubGenerator;

impl StubGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(
        &self,
        source_path: &Path,
        package: &str,
        results: &[ClassificationResult<'_>],
    ) -> FilePlan {
        let mut report_lines = Vec::with_capacity(results.len() + 2);
        report_lines.push(format!("Source: {}", source_path.display()));
        for result in results {
            report_lines.push(format!(
                "  [{}] {}: {}",
                result.category,
                result.declaration.kind(),
                result.declaration.name()
            ));
        }
        report_lines.push(String::new());

        let emissions = results
            .iter()
            .map(|result| self.emission(package, result))
            .collect();

        FilePlan {
            source_path: source_path.to_path_buf(),
            report_lines,
            emissions,
        }
    }

    fn emission(&self, package: &str, result: &ClassificationResult<'_>) -> Emission {
        let declaration = &result.declaration;
        let file_name = format!("{}.kt", declaration.name());
        let package_dir = package_path(package);
        let imports = declaration.dependencies();

        if result.category.needs_stub_pair() {
            let bodies = stubs::stub_bodies(declaration, result.category);
            let folder = PathBuf::from(result.category.folder());
            Emission::Pair(StubPair {
                signature: bodies.signature,
                portable: GeneratedFile {
                    path: folder
                        .join("commonMain")
                        .join("kotlin")
                        .join(&package_dir)
                        .join(&file_name),
                    contents: render_file(package, imports, &bodies.expect),
                },
                platform: GeneratedFile {
                    path: folder
                        .join("androidMain")
                        .join("kotlin")
                        .join(&package_dir)
                        .join(&file_name),
                    contents: render_file(package, imports, &bodies.actual),
                },
            })
        } else {
            Emission::DirectCopy(GeneratedFile {
                path: PathBuf::from(result.category.folder())
                    .join(&package_dir)
                    .join(&file_name),
                contents: render_file(package, imports, declaration.text()),
            })
        }
    }
}

/// `com.example.app` -> `com/example/app`
pub fn package_path(package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Package line, sorted imports, then the body.
pub fn render_file(package: &str, imports: &[DependencyId], body: &str) -> String {
    let mut out = String::new();
    if !package.is_empty() {
        out.push_str(&format!("package {package}\n\n"));
    }

    let mut sorted: Vec<&str> = imports.iter().map(DependencyId::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    if !sorted.is_empty() {
        for import in sorted {
            out.push_str(&format!("import {import}\n"));
        }
        out.push('\n');
    }

    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out
}
