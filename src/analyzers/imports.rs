//! Import tracking for reference resolution
//!
//! Maps the short names a Kotlin file can use to the fully-qualified names
//! its import directives bind them to:
//! - plain imports (`import a.b.C` binds `C`)
//! - aliased imports (`import a.b.C as D` binds `D`)
//! - star imports (`import a.b.*`) bind nothing

use crate::core::DependencyId;
use crate::parser::ImportDirective;
use std::collections::HashMap;

/// Short name -> fully-qualified name for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    entries: HashMap<String, String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from directives in source order. A later directive
    /// binding the same short name replaces the earlier one.
    pub fn build(directives: &[ImportDirective]) -> Self {
        let mut table = Self::new();
        for directive in directives {
            if let Some(short) = directive.short_name() {
                table
                    .entries
                    .insert(short.to_string(), directive.fq_name.clone());
            }
        }
        table
    }

    pub fn resolve(&self, short_name: &str) -> Option<DependencyId> {
        self.entries.get(short_name).map(DependencyId::new)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(text: &str) -> ImportDirective {
        ImportDirective::parse(text).unwrap()
    }

    #[test]
    fn test_plain_import_binds_last_segment() {
        let table = ImportTable::build(&[directive("import android.content.Context")]);
        assert_eq!(
            table.resolve("Context"),
            Some(DependencyId::new("android.content.Context"))
        );
        assert!(table.resolve("content").is_none());
    }

    #[test]
    fn test_alias_takes_precedence() {
        let table = ImportTable::build(&[directive("import android.util.Log as AndroidLog")]);
        assert!(table.resolve("AndroidLog").is_some());
        assert!(table.resolve("Log").is_none());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let table = ImportTable::build(&[
            directive("import java.util.Date"),
            directive("import java.sql.Date"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("Date").unwrap().as_str(), "java.sql.Date");
    }

    #[test]
    fn test_star_imports_contribute_nothing() {
        let table = ImportTable::build(&[directive("import kotlinx.coroutines.*")]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_file_has_empty_table() {
        assert!(ImportTable::build(&[]).is_empty());
    }
}
