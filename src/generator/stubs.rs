use super::signature::signature;
use crate::core::{Category, DeclarationKind, SourceDeclaration};
use crate::parser::syntax;

const UI_GUIDANCE: &str = "Migrate Android UI (View/Fragment/XML) to Compose Multiplatform";
const LOGIC_GUIDANCE: &str =
    "Migrate Android logic (Context/system services) to a KMP equivalent such as moko-resources, Kermit or expect/actual utilities";

pub(crate) fn guidance(category: Category) -> &'static str {
    if category.is_ui() {
        UI_GUIDANCE
    } else {
        LOGIC_GUIDANCE
    }
}

/// Bodies of the `expect` and `actual` declarations, without package or imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StubBodies {
    pub signature: String,
    pub expect: String,
    pub actual: String,
}

pub(crate) fn stub_bodies(declaration: &SourceDeclaration<'_>, category: Category) -> StubBodies {
    let sig = signature(declaration);
    let msg = guidance(category);

    let (expect, actual) = match declaration.kind() {
        DeclarationKind::Function => (
            format!("expect {sig}"),
            format!(
                "actual {sig} {{\n    // TODO: {msg}\n    throw NotImplementedError(\"Pending migration: {msg}\")\n}}"
            ),
        ),
        DeclarationKind::Property => {
            let mut actual = format!(
                "actual {sig}\n    get() = throw NotImplementedError(\"Pending migration: {msg}\")"
            );
            if sig.starts_with("var ") {
                actual.push_str(&format!(
                    "\n    set(value) {{\n        throw NotImplementedError(\"Pending migration: {msg}\")\n    }}"
                ));
            }
            (format!("expect {sig}"), actual)
        }
        DeclarationKind::Interface => {
            let body = syntax::class_body_inner(declaration.node(), declaration.source())
                .map(|b| indent_block(&b))
                .unwrap_or_default();
            let keyword = if is_fun_interface(declaration) {
                "fun interface"
            } else {
                "interface"
            };
            (
                format!("expect {keyword} {sig} {{\n{body}\n}}"),
                format!("actual {keyword} {sig} {{\n{body}\n}}"),
            )
        }
        DeclarationKind::DataClass => (
            format!("expect class {sig}"),
            format!("actual data class {sig}"),
        ),
        DeclarationKind::EnumClass => {
            let entries = syntax::enum_entries(declaration.node(), declaration.source()).join(", ");
            (
                format!("expect enum class {sig} {{\n    {entries}\n}}"),
                format!("actual enum class {sig} {{\n    {entries}\n}}"),
            )
        }
        DeclarationKind::Object => (
            format!("expect object {sig}"),
            format!("actual object {sig} {{\n    // TODO: fill in object members\n}}"),
        ),
        DeclarationKind::Class => (
            format!("expect class {sig} {{\n    // TODO: add members\n}}"),
            format!("actual class {sig} {{\n    // TODO: {msg}\n}}"),
        ),
    };

    StubBodies {
        signature: sig,
        expect,
        actual,
    }
}

/// `fun interface` (single abstract method) declarations.
fn is_fun_interface(declaration: &SourceDeclaration<'_>) -> bool {
    let node = declaration.node();
    syntax::keyword_child(node, "fun").is_some()
        || syntax::modifier_words(node, declaration.source())
            .iter()
            .any(|w| w == "fun")
}

/// Re-indent a copied body by four spaces, dropping its common indentation.
fn indent_block(body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("    {}", &line[common.min(line.len() - line.trim_start().len())..])
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}
