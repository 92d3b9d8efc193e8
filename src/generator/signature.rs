//! Declaration signatures shared by both halves of a stub pair.

use crate::core::{DeclarationKind, SourceDeclaration};
use crate::parser::syntax::{self, Param};

const DEFAULT_TYPE: &str = "Any";
const DEFAULT_RETURN_TYPE: &str = "Unit";
/// Stand-in for a type the source leaves to inference. The marker keeps the
/// guess visible in generated stubs.
const INFERRED_TYPE: &str = "Any /* inferred */";

/// Signature text of a declaration without the `expect`/`actual` keyword.
///
/// | kind         | shape                        |
/// |--------------|------------------------------|
/// | function     | `fun <T> R.name(a: A): Ret`  |
/// | property     | `val R.name: T`              |
/// | class        | `Name<T>(a: A)`              |
/// | data class   | `Name(val a: A, var b: B)`   |
/// | enum, interface, object | `Name<T>`         |
pub fn signature(declaration: &SourceDeclaration<'_>) -> String {
    let node = declaration.node();
    let source = declaration.source();
    let name = declaration.name();

    match declaration.kind() {
        DeclarationKind::Function => {
            let parts = syntax::function_parts(node, source);
            let header = if parts.header.is_empty() {
                name.to_string()
            } else {
                parts.header
            };
            let return_type = match parts.return_type {
                Some(declared) => declared,
                None if parts.expression_body => INFERRED_TYPE.to_string(),
                None => DEFAULT_RETURN_TYPE.to_string(),
            };
            format!(
                "fun {}({}): {}",
                header,
                render_params(&parts.params, false),
                return_type
            )
        }
        DeclarationKind::Property => {
            let parts = syntax::property_parts(node, source);
            let keyword = if parts.mutable { "var" } else { "val" };
            let target = if parts.prefix.is_empty() || parts.prefix.ends_with('.') {
                format!("{}{}", parts.prefix, name)
            } else {
                format!("{} {}", parts.prefix, name)
            };
            let type_text = parts.type_text.as_deref().unwrap_or(INFERRED_TYPE);
            format!("{keyword} {target}: {type_text}")
        }
        DeclarationKind::Class => {
            let params = syntax::class_params(node, source);
            format!(
                "{}{}({})",
                name,
                type_parameters(declaration),
                render_params(&params, false)
            )
        }
        DeclarationKind::DataClass => {
            let params = syntax::class_params(node, source);
            format!(
                "{}{}({})",
                name,
                type_parameters(declaration),
                render_params(&params, true)
            )
        }
        DeclarationKind::EnumClass | DeclarationKind::Interface | DeclarationKind::Object => {
            format!("{}{}", name, type_parameters(declaration))
        }
    }
}

fn type_parameters(declaration: &SourceDeclaration<'_>) -> String {
    syntax::type_parameters(declaration.node(), declaration.source())
        .map(|tp| tp.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn render_params(params: &[Param], with_binding: bool) -> String {
    params
        .iter()
        .map(|param| {
            let type_text = if param.type_text.is_empty() {
                DEFAULT_TYPE
            } else {
                param.type_text.as_str()
            };
            if with_binding {
                let binding = if param.binding == "var" { "var" } else { "val" };
                format!("{} {}: {}", binding, param.name, type_text)
            } else {
                format!("{}: {}", param.name, type_text)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
