//! Top-level declarations as seen by the classifier and generator.

use super::{DeclarationKind, DependencyId, StructuralFlags};
use std::collections::HashSet;
use tree_sitter::Node;

/// One named top-level construct of a Kotlin file.
///
/// The syntax node and the source text are borrowed from the
/// [`ParsedFile`](crate::parser::ParsedFile) that produced them, so a
/// declaration cannot outlive the processing of its file. The dependency
/// list and flags are owned and never change after construction.
#[derive(Debug, Clone)]
pub struct SourceDeclaration<'a> {
    name: String,
    kind: DeclarationKind,
    node: Node<'a>,
    source: &'a str,
    dependencies: Vec<DependencyId>,
    flags: StructuralFlags,
}

impl<'a> SourceDeclaration<'a> {
    /// Build a declaration. Duplicate dependencies are dropped, keeping the
    /// position of the first occurrence.
    pub fn new(
        name: impl Into<String>,
        kind: DeclarationKind,
        node: Node<'a>,
        source: &'a str,
        dependencies: Vec<DependencyId>,
        flags: StructuralFlags,
    ) -> Self {
        let mut seen = HashSet::with_capacity(dependencies.len());
        let dependencies = dependencies
            .into_iter()
            .filter(|dep| seen.insert(dep.clone()))
            .collect();

        Self {
            name: name.into(),
            kind,
            node,
            source,
            dependencies,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn node(&self) -> Node<'a> {
        self.node
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Full original text of the declaration, annotations included
    pub fn text(&self) -> &'a str {
        &self.source[self.node.byte_range()]
    }

    /// Dependencies in order of first occurrence in the source
    pub fn dependencies(&self) -> &[DependencyId] {
        &self.dependencies
    }

    pub fn flags(&self) -> StructuralFlags {
        self.flags
    }

    /// 1-based line of the declaration start
    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }
}
