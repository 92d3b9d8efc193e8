//! Graphviz output: the file-to-import dependency graph and per-file syntax trees.

use crate::parser::syntax;
use crate::parser::ParsedFile;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const DEPENDENCY_GRAPH_FILE: &str = "dependency-graph.dot";

const AST_LABEL_LIMIT: usize = 25;

/// `app/ui/Main.kt` -> `app_ui_Main`
pub fn file_node_id(relative: &Path) -> String {
    relative
        .with_extension("")
        .to_string_lossy()
        .replace(['/', '\\'], "_")
}

/// `android.content.Context` -> `android_content_Context`
pub fn import_node_id(import: &str) -> String {
    import.replace('.', "_")
}

/// One edge per (file, import) pair, files and imports in the given order.
pub fn dependency_graph(files: &[(PathBuf, Vec<String>)]) -> String {
    let mut dot = String::from("digraph G {\n");
    for (file, imports) in files {
        let from = file_node_id(file);
        for import in imports {
            let _ = writeln!(dot, "  \"{}\" -> \"{}\";", from, import_node_id(import));
        }
    }
    dot.push_str("}\n");
    dot
}

/// Escape for a double-quoted DOT label and cut to the label limit.
fn label_snippet(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "")
        .replace('\n', "\\n");
    if escaped.chars().count() > AST_LABEL_LIMIT {
        let mut cut: String = escaped.chars().take(AST_LABEL_LIMIT).collect();
        // Never leave a dangling escape
        if cut.ends_with('\\') && !cut.ends_with("\\\\") {
            cut.pop();
        }
        cut.push_str("...");
        cut
    } else {
        escaped
    }
}

/// `digraph AST` with one box per named syntax node.
pub fn ast_graph(parsed: &ParsedFile) -> String {
    let source = parsed.source();
    let mut dot = String::from("digraph AST {\n");
    dot.push_str("  rankdir=TB;\n");
    dot.push_str("  node [shape=box, style=filled, color=\"#dddddd\", fontname=\"Verdana\"];\n");

    let mut next_id = 0usize;
    let mut stack = vec![(parsed.root(), None::<usize>)];
    while let Some((node, parent)) = stack.pop() {
        let id = next_id;
        next_id += 1;

        let fill = if parent.is_none() { "lightblue" } else { "white" };
        let _ = writeln!(
            dot,
            "  node_{} [label=\"{}\\n({})\", fillcolor={}];",
            id,
            node.kind(),
            label_snippet(syntax::text(node, source)),
            fill
        );
        if let Some(parent) = parent {
            let _ = writeln!(dot, "  node_{} -> node_{};", parent, id);
        }

        let mut children = syntax::named_children(node);
        children.reverse();
        stack.extend(children.into_iter().map(|child| (child, Some(id))));
    }

    dot.push_str("}\n");
    dot
}

/// Output path of a file's syntax graph: `ast/<file name>.dot`
pub fn ast_graph_path(source_path: &Path) -> PathBuf {
    let name = source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source.kt".to_string());
    PathBuf::from("ast").join(format!("{name}.dot"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::KotlinParser;

    #[test]
    fn test_dependency_graph_edges() {
        let dot = dependency_graph(&[(
            PathBuf::from("ui/Main.kt"),
            vec![
                "android.content.Context".to_string(),
                "kotlin.math.abs".to_string(),
            ],
        )]);
        assert_eq!(
            dot,
            "digraph G {\n  \"ui_Main\" -> \"android_content_Context\";\n  \"ui_Main\" -> \"kotlin_math_abs\";\n}\n"
        );
    }

    #[test]
    fn test_label_snippet_escapes_and_cuts() {
        assert_eq!(label_snippet("say(\"hi\")"), "say(\\\"hi\\\")");
        assert_eq!(label_snippet("a\nb"), "a\\nb");
        let long = "x".repeat(40);
        assert_eq!(label_snippet(&long), format!("{}...", "x".repeat(25)));
    }

    #[test]
    fn test_ast_graph_shape() {
        let parsed = KotlinParser::new()
            .unwrap()
            .parse("Tiny.kt", "fun a() {}\n".to_string())
            .unwrap();
        let dot = ast_graph(&parsed);
        assert!(dot.starts_with("digraph AST {\n  rankdir=TB;\n"));
        assert!(dot.contains(
            "node_0 [label=\"source_file\\n(fun a() {}\\n)\", fillcolor=lightblue];"
        ));
        assert!(dot.contains("node_0 -> node_1;"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_ast_graph_path() {
        assert_eq!(
            ast_graph_path(Path::new("src/ui/Main.kt")),
            PathBuf::from("ast/Main.kt.dot")
        );
    }
}
