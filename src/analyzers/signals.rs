//! Per-declaration dependency and structural signal extraction.

use super::imports::ImportTable;
use crate::config::DetectionConfig;
use crate::core::{DeclarationKind, DependencyId, SourceDeclaration, StructuralFlags};
use crate::parser::syntax::{self, Descend};
use crate::parser::ParsedFile;
use tree_sitter::Node;

/// Turns the top-level nodes of a parsed file into [`SourceDeclaration`]s.
pub struct SignalExtractor<'c> {
    detection: &'c DetectionConfig,
}

impl<'c> SignalExtractor<'c> {
    pub fn new(detection: &'c DetectionConfig) -> Self {
        Self { detection }
    }

    /// Extract every supported top-level declaration, in source order.
    pub fn extract<'a>(
        &self,
        parsed: &'a ParsedFile,
        imports: &ImportTable,
    ) -> Vec<SourceDeclaration<'a>> {
        let source = parsed.source();
        parsed
            .top_level_nodes()
            .into_iter()
            .filter_map(|node| {
                let declaration = self.extract_one(node, source, imports);
                if declaration.is_none() {
                    log::debug!(
                        "{}:{}: skipping unnamed `{}`",
                        parsed.path().display(),
                        node.start_position().row + 1,
                        node.kind()
                    );
                }
                declaration
            })
            .collect()
    }

    fn extract_one<'a>(
        &self,
        node: Node<'a>,
        source: &'a str,
        imports: &ImportTable,
    ) -> Option<SourceDeclaration<'a>> {
        let kind = declaration_kind(node, source)?;
        let name = syntax::declaration_name(node, source)?;
        let dependencies = referenced_dependencies(node, source, imports);
        let flags = self.structural_flags(node, source);

        Some(SourceDeclaration::new(
            name,
            kind,
            node,
            source,
            dependencies,
            flags,
        ))
    }

    fn structural_flags(&self, node: Node<'_>, source: &str) -> StructuralFlags {
        let ui_annotated = syntax::annotation_short_names(node, source)
            .iter()
            .any(|name| self.detection.is_ui_annotation(name));
        let extends_view_like_base = syntax::supertype_texts(node, source)
            .iter()
            .any(|entry| self.detection.is_view_like(entry));

        StructuralFlags {
            ui_annotated,
            extends_view_like_base,
        }
    }
}

/// Map a syntax node onto the closed declaration kind set.
pub fn declaration_kind(node: Node<'_>, source: &str) -> Option<DeclarationKind> {
    match node.kind() {
        "function_declaration" => Some(DeclarationKind::Function),
        "property_declaration" => Some(DeclarationKind::Property),
        "object_declaration" => Some(DeclarationKind::Object),
        "class_declaration" => {
            if syntax::keyword_child(node, "interface").is_some() {
                return Some(DeclarationKind::Interface);
            }
            let words = syntax::modifier_words(node, source);
            if words.iter().any(|w| w == "enum") {
                Some(DeclarationKind::EnumClass)
            } else if words.iter().any(|w| w == "data") {
                Some(DeclarationKind::DataClass)
            } else {
                Some(DeclarationKind::Class)
            }
        }
        _ => None,
    }
}

/// Resolve every identifier in the declaration through the import table.
/// The declaration's own name is skipped.
fn referenced_dependencies(
    node: Node<'_>,
    source: &str,
    imports: &ImportTable,
) -> Vec<DependencyId> {
    let own_name = syntax::name_node(node).map(|n| n.byte_range());
    let mut dependencies = Vec::new();

    syntax::walk(node, |n| {
        if syntax::is_identifier_leaf(n) {
            if Some(n.byte_range()) != own_name {
                let short = syntax::text(n, source).trim_matches('`');
                if let Some(dep) = imports.resolve(short) {
                    dependencies.push(dep);
                }
            }
            return Descend::No;
        }
        Descend::Yes
    });

    dependencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::KotlinParser;
    use indoc::indoc;

    fn parse(source: &str) -> ParsedFile {
        KotlinParser::new()
            .unwrap()
            .parse("Sample.kt", source.to_string())
            .unwrap()
    }

    fn extract(parsed: &ParsedFile) -> Vec<SourceDeclaration<'_>> {
        let detection = DetectionConfig::default();
        let imports = ImportTable::build(&parsed.import_directives());
        SignalExtractor::new(&detection).extract(parsed, &imports)
    }

    fn deps<'a>(decl: &'a SourceDeclaration<'_>) -> Vec<&'a str> {
        decl.dependencies().iter().map(|d| d.as_str()).collect()
    }

    #[test]
    fn test_kinds_and_names() {
        let parsed = parse(indoc! {"
            fun load() {}
            val limit = 3
            class Cache
            data class Entry(val key: String)
            enum class Mode { ON, OFF }
            interface Source
            object Registry
            typealias Handler = () -> Unit
        "});
        let decls = extract(&parsed);
        let summary: Vec<_> = decls.iter().map(|d| (d.name(), d.kind())).collect();
        assert_eq!(
            summary,
            vec![
                ("load", DeclarationKind::Function),
                ("limit", DeclarationKind::Property),
                ("Cache", DeclarationKind::Class),
                ("Entry", DeclarationKind::DataClass),
                ("Mode", DeclarationKind::EnumClass),
                ("Source", DeclarationKind::Interface),
                ("Registry", DeclarationKind::Object),
            ]
        );
    }

    #[test]
    fn test_dependencies_from_params_body_and_return_type() {
        let parsed = parse(indoc! {"
            import android.content.Context
            import android.util.Log
            import java.io.File
            import kotlin.math.abs

            fun cacheDir(context: Context): File {
                Log.d(\"cache\", \"resolving\")
                return context.cacheDir
            }
        "});
        let decls = extract(&parsed);
        assert_eq!(
            deps(&decls[0]),
            vec!["android.content.Context", "java.io.File", "android.util.Log"]
        );
    }

    #[test]
    fn test_unresolved_and_own_name_are_ignored() {
        let parsed = parse(indoc! {"
            import com.example.Helper

            fun Helper() = Local()
        "});
        let decls = extract(&parsed);
        assert!(decls[0].dependencies().is_empty());
    }

    #[test]
    fn test_aliased_reference_resolves_to_fq_name() {
        let parsed = parse(indoc! {"
            import android.util.Log as AndroidLog

            fun trace() { AndroidLog.i(\"t\", \"x\") }
        "});
        let decls = extract(&parsed);
        assert_eq!(deps(&decls[0]), vec!["android.util.Log"]);
    }

    #[test]
    fn test_annotation_flags_and_dependency() {
        let parsed = parse(indoc! {"
            import androidx.compose.runtime.Composable

            @Composable
            fun Greeting(name: String) {}
        "});
        let decls = extract(&parsed);
        assert!(decls[0].flags().ui_annotated);
        assert!(!decls[0].flags().extends_view_like_base);
        assert_eq!(deps(&decls[0]), vec!["androidx.compose.runtime.Composable"]);
    }

    #[test]
    fn test_view_like_base_detection() {
        let parsed = parse(indoc! {"
            class MainActivity : AppCompatActivity()
            class HomeViewModel : ViewModel()
            class Repo : Source
        "});
        let decls = extract(&parsed);
        let flags: Vec<_> = decls
            .iter()
            .map(|d| d.flags().extends_view_like_base)
            .collect();
        assert_eq!(flags, vec![true, false, false]);
    }
}
