//! Kotlin front-end built on tree-sitter.
//!
//! [`KotlinParser`] turns file text into a [`ParsedFile`], which owns both the
//! source and the syntax tree. Everything downstream (signal extraction,
//! classification, stub generation) borrows from the `ParsedFile` and is done
//! with it before the next file starts.

pub mod syntax;

use crate::errors::{KmpmapError, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Node kinds that can become a `SourceDeclaration`
const DECLARATION_KINDS: &[&str] = &[
    "function_declaration",
    "property_declaration",
    "class_declaration",
    "object_declaration",
];

/// A single `import` line of a Kotlin file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    /// Fully-qualified imported name, without a trailing `.*`
    pub fq_name: String,
    /// Name after `as`, if any
    pub alias: Option<String>,
    /// `import a.b.*`
    pub is_star: bool,
}

impl ImportDirective {
    pub fn new(fq_name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            alias,
            is_star: false,
        }
    }

    /// Name the directive binds in the file: the alias if present, else the
    /// last segment. Star imports bind nothing.
    pub fn short_name(&self) -> Option<&str> {
        if self.is_star {
            return None;
        }
        self.alias
            .as_deref()
            .or_else(|| self.fq_name.rsplit('.').next())
            .filter(|name| !name.is_empty())
    }

    /// Parse the text of an import node (`import a.b.C as D`).
    pub fn parse(text: &str) -> Option<Self> {
        let body = text
            .trim()
            .strip_prefix("import")?
            .trim()
            .trim_end_matches(';')
            .trim();
        let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");

        let (path, alias) = match compact.rsplit_once(" as ") {
            Some((path, alias)) => (path, Some(clean_identifier(alias))),
            None => (compact.as_str(), None),
        };
        let path: String = path
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '`')
            .collect();

        let (fq_name, is_star) = match path.strip_suffix(".*") {
            Some(stripped) => (stripped.to_string(), true),
            None => (path, false),
        };
        if fq_name.is_empty() {
            return None;
        }

        Some(Self {
            fq_name,
            alias: alias.filter(|a| !a.is_empty()),
            is_star,
        })
    }
}

fn clean_identifier(text: &str) -> String {
    text.trim().trim_matches('`').to_string()
}

/// Source text plus its syntax tree.
pub struct ParsedFile {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish()
    }
}

impl ParsedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Declared package, or an empty string for the default package
    pub fn package_name(&self) -> String {
        syntax::named_children(self.root())
            .into_iter()
            .find(|node| node.kind() == "package_header")
            .map(|node| {
                let text = syntax::text(node, &self.source);
                text.trim()
                    .strip_prefix("package")
                    .unwrap_or(text)
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '`' && *c != ';')
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Import directives in source order.
    pub fn import_directives(&self) -> Vec<ImportDirective> {
        let mut import_nodes = Vec::new();
        for node in syntax::named_children(self.root()) {
            if !node.kind().contains("import") {
                continue;
            }
            // Some grammar versions wrap the headers in an `import_list`.
            let nested: Vec<_> = syntax::named_children(node)
                .into_iter()
                .filter(|child| child.kind().contains("import"))
                .collect();
            if nested.is_empty() {
                import_nodes.push(node);
            } else {
                import_nodes.extend(nested);
            }
        }

        import_nodes
            .into_iter()
            .filter_map(|node| ImportDirective::parse(syntax::text(node, &self.source)))
            .collect()
    }

    /// Top-level nodes whose syntax kind can hold a declaration.
    pub fn top_level_nodes(&self) -> Vec<Node<'_>> {
        syntax::named_children(self.root())
            .into_iter()
            .filter(|node| DECLARATION_KINDS.contains(&node.kind()))
            .collect()
    }

    /// First error or missing node in document order.
    pub fn first_error(&self) -> Option<Node<'_>> {
        let root = self.root();
        if !root.has_error() {
            return None;
        }
        let mut found = None;
        syntax::walk(root, |node| {
            if found.is_some() {
                return syntax::Descend::No;
            }
            if node.is_error() || node.is_missing() {
                found = Some(node);
                return syntax::Descend::No;
            }
            if node.has_error() {
                syntax::Descend::Yes
            } else {
                syntax::Descend::No
            }
        });
        found
    }
}

/// Tree-sitter parser configured for Kotlin.
pub struct KotlinParser {
    parser: Parser,
    allow_partial: bool,
}

impl KotlinParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
            .map_err(|e| KmpmapError::Grammar(e.to_string()))?;
        Ok(Self {
            parser,
            allow_partial: false,
        })
    }

    /// Accept trees that contain error nodes instead of rejecting the file.
    pub fn allow_partial(mut self, allow: bool) -> Self {
        self.allow_partial = allow;
        self
    }

    pub fn parse(&mut self, path: impl Into<PathBuf>, source: String) -> Result<ParsedFile> {
        let path = path.into();
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| KmpmapError::parse(&path, 1, 1, "parser produced no syntax tree"))?;

        let parsed = ParsedFile { path, source, tree };

        if !self.allow_partial {
            if let Some(node) = parsed.first_error() {
                let position = node.start_position();
                let message = if node.is_missing() {
                    format!("missing `{}`", node.kind())
                } else {
                    format!(
                        "unexpected syntax near `{}`",
                        syntax::snippet(syntax::text(node, parsed.source()), 20)
                    )
                };
                return Err(KmpmapError::parse(
                    parsed.path(),
                    position.row + 1,
                    position.column + 1,
                    message,
                ));
            }
        }

        Ok(parsed)
    }
}
