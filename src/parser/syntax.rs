//! Grammar-level helpers over Kotlin syntax nodes.
//!
//! The helpers only rely on node kinds that are stable across Kotlin
//! grammar releases and fall back to text where a field or wrapper node is
//! missing. Everything here is a pure function of a node and its source.

use tree_sitter::Node;

/// Whether [`walk`] should visit the children of the current node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    Yes,
    No,
}

/// Preorder traversal without recursion.
pub fn walk<'a, F>(root: Node<'a>, mut visit: F)
where
    F: FnMut(Node<'a>) -> Descend,
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if visit(node) == Descend::Yes {
            let mut children = children(node);
            children.reverse();
            stack.extend(children);
        }
    }
}

pub fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Single-line prefix of `text`, at most `max` characters.
pub fn snippet(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    let mut out: String = line.chars().take(max).collect();
    if line.chars().count() > max || text.trim().lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}

/// Named leaf whose kind is some flavour of identifier.
pub fn is_identifier_leaf(node: Node<'_>) -> bool {
    node.is_named() && node.named_child_count() == 0 && node.kind().ends_with("identifier")
}

fn first_identifier_leaf(node: Node<'_>) -> Option<Node<'_>> {
    let mut found = None;
    walk(node, |n| {
        if found.is_some() {
            return Descend::No;
        }
        if is_identifier_leaf(n) {
            found = Some(n);
            return Descend::No;
        }
        Descend::Yes
    });
    found
}

/// Node holding the declared name, if the declaration has one.
pub fn name_node(node: Node<'_>) -> Option<Node<'_>> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(name);
    }
    let kids = named_children(node);
    if let Some(var) = kids.iter().find(|n| n.kind() == "variable_declaration") {
        return first_identifier_leaf(*var);
    }
    kids.into_iter().find(|n| is_identifier_leaf(*n))
}

pub fn declaration_name(node: Node<'_>, source: &str) -> Option<String> {
    name_node(node)
        .map(|n| text(n, source).trim_matches('`').to_string())
        .filter(|name| !name.is_empty())
}

/// Direct unnamed child with the given token text (`interface`, `fun`, `val`).
pub fn keyword_child<'a>(node: Node<'a>, keyword: &str) -> Option<Node<'a>> {
    children(node)
        .into_iter()
        .find(|n| !n.is_named() && n.kind() == keyword)
}

fn modifier_nodes(node: Node<'_>) -> Vec<Node<'_>> {
    named_children(node)
        .into_iter()
        .filter(|n| n.kind() == "modifiers")
        .collect()
}

/// Modifier words (`data`, `enum`, `private`, ...), annotations excluded.
pub fn modifier_words(node: Node<'_>, source: &str) -> Vec<String> {
    let mut words = Vec::new();
    for modifiers in modifier_nodes(node) {
        walk(modifiers, |n| {
            if n.kind() == "annotation" {
                return Descend::No;
            }
            if n.child_count() == 0 {
                let word = text(n, source).trim();
                if !word.is_empty() {
                    words.push(word.to_string());
                }
            }
            Descend::Yes
        });
    }
    // Some grammar versions hang class modifiers directly off the declaration.
    for child in children(node) {
        if child.child_count() == 0 && matches!(child.kind(), "data" | "enum") {
            words.push(child.kind().to_string());
        }
    }
    words
}

/// Annotation nodes attached to the declaration itself.
pub fn annotation_nodes(node: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    for modifiers in modifier_nodes(node) {
        walk(modifiers, |n| {
            if n.kind() == "annotation" {
                found.push(n);
                return Descend::No;
            }
            Descend::Yes
        });
    }
    found.extend(
        named_children(node)
            .into_iter()
            .filter(|n| n.kind() == "annotation"),
    );
    found
}

/// `@file:Foo.Bar(1)` -> `Bar`
pub fn annotation_short_name(annotation_text: &str) -> String {
    let mut name = annotation_text.trim().trim_start_matches('@');
    if let Some(paren) = name.find('(') {
        name = &name[..paren];
    }
    if let Some((_, rest)) = name.split_once(':') {
        name = rest;
    }
    if let Some(generic) = name.find('<') {
        name = &name[..generic];
    }
    name.trim()
        .rsplit('.')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches('`')
        .to_string()
}

pub fn annotation_short_names(node: Node<'_>, source: &str) -> Vec<String> {
    annotation_nodes(node)
        .into_iter()
        .map(|a| annotation_short_name(text(a, source)))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Texts of the supertype list entries (`AppCompatActivity()`, `Adapter<VH>`).
pub fn supertype_texts(node: Node<'_>, source: &str) -> Vec<String> {
    let mut entries = Vec::new();
    walk(node, |n| {
        if n == node {
            return Descend::Yes;
        }
        match n.kind() {
            "class_body" | "enum_class_body" | "primary_constructor" | "modifiers"
            | "function_body" => Descend::No,
            "delegation_specifiers" => {
                entries.extend(
                    named_children(n)
                        .into_iter()
                        .map(|s| text(s, source).trim().to_string()),
                );
                Descend::No
            }
            "delegation_specifier" => {
                entries.push(text(n, source).trim().to_string());
                Descend::No
            }
            _ => Descend::Yes,
        }
    });
    entries.retain(|e| !e.is_empty());
    entries
}

fn first_named_child_of_kind<'a>(node: Node<'a>, kinds: &[&str]) -> Option<Node<'a>> {
    named_children(node)
        .into_iter()
        .find(|n| kinds.contains(&n.kind()))
}

/// Text of the `<...>` type parameter list, when declared.
pub fn type_parameters<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    first_named_child_of_kind(node, &["type_parameters"]).map(|n| text(n, source).trim())
}

/// Inner text of the class body braces.
pub fn class_body_inner(node: Node<'_>, source: &str) -> Option<String> {
    let body = first_named_child_of_kind(node, &["class_body"])?;
    let raw = text(body, source).trim();
    let inner = raw
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .unwrap_or(raw);
    Some(inner.trim_matches('\n').to_string())
}

/// Entry names of an enum class body, in declaration order.
pub fn enum_entries(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(body) = first_named_child_of_kind(node, &["enum_class_body"]) else {
        return Vec::new();
    };
    let entries: Vec<String> = named_children(body)
        .into_iter()
        .filter(|n| n.kind() == "enum_entry")
        .filter_map(|entry| declaration_name(entry, source))
        .collect();
    if !entries.is_empty() {
        return entries;
    }

    let raw = text(body, source).trim();
    let inner = raw
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
        .unwrap_or(raw);
    let head = match find_top_level(inner, ';') {
        Some(idx) => &inner[..idx],
        None => inner,
    };
    split_top_level(head, ',')
        .into_iter()
        .filter_map(|entry| {
            entry
                .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
                .find(|w| !w.is_empty())
                .map(|w| w.trim_matches('`').to_string())
        })
        .collect()
}

/// One parameter reconstructed from source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// `val`, `var`, `vararg`, or empty
    pub binding: String,
    pub name: String,
    /// Type text, empty if the parameter had none
    pub type_text: String,
}

/// Parse a parenthesized parameter list.
pub fn parse_params(list_text: &str) -> Vec<Param> {
    let trimmed = list_text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(trimmed);

    split_top_level(inner, ',')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(|param| {
            let without_default = match find_top_level(param, '=') {
                Some(idx) => &param[..idx],
                None => param,
            };
            let (head, type_text) = match find_top_level(without_default, ':') {
                Some(idx) => (
                    &without_default[..idx],
                    without_default[idx + 1..].trim(),
                ),
                None => (without_default, ""),
            };
            let words: Vec<&str> = head
                .split_whitespace()
                .filter(|w| !w.starts_with('@'))
                .collect();
            let name = words.last()?.trim_matches('`').to_string();
            let binding = words
                .iter()
                .rev()
                .skip(1)
                .find(|w| matches!(**w, "val" | "var"))
                .map(|w| w.to_string())
                .unwrap_or_default();
            Some(Param {
                binding,
                name,
                type_text: collapse_whitespace(type_text),
            })
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Signature pieces of a function declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionParts {
    /// Text between `fun` and the parameter list: type parameters, receiver and name
    pub header: String,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    /// `fun f() = expr`, where an omitted return type is inferred
    pub expression_body: bool,
}

pub fn function_parts(node: Node<'_>, source: &str) -> FunctionParts {
    let Some(params_node) = first_named_child_of_kind(
        node,
        &["function_value_parameters", "value_parameters"],
    ) else {
        return FunctionParts {
            header: declaration_name(node, source).unwrap_or_default(),
            ..FunctionParts::default()
        };
    };

    let decl_start = node.start_byte();
    let params_range = params_node.byte_range();
    let fun_end = keyword_child(node, "fun")
        .map(|k| k.end_byte())
        .unwrap_or(decl_start);
    let header = source
        .get(fun_end..params_range.start)
        .map(collapse_whitespace)
        .unwrap_or_default();

    let tail = source.get(params_range.end..node.end_byte()).unwrap_or("");
    let block = find_top_level(tail, '{');
    let equals = find_top_level(tail, '=');
    let expression_body = match (equals, block) {
        (Some(eq), Some(brace)) => eq < brace,
        (Some(_), None) => true,
        (None, _) => false,
    };
    let tail_end = [block, equals]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(tail.len());
    let mut return_text = tail[..tail_end].trim();
    if let Some(idx) = find_word(return_text, "where") {
        return_text = return_text[..idx].trim();
    }
    let return_type = return_text
        .strip_prefix(':')
        .map(|t| collapse_whitespace(t))
        .filter(|t| !t.is_empty());

    FunctionParts {
        header,
        params: parse_params(text(params_node, source)),
        return_type,
        expression_body,
    }
}

/// Signature pieces of a property declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyParts {
    pub mutable: bool,
    /// Type parameters and receiver before the name, with trailing dot kept
    pub prefix: String,
    pub name: String,
    pub type_text: Option<String>,
}

pub fn property_parts(node: Node<'_>, source: &str) -> PropertyParts {
    let mut keyword = None;
    walk(node, |n| {
        if keyword.is_some() || n.kind() == "modifiers" {
            return Descend::No;
        }
        if !n.is_named() && matches!(n.kind(), "val" | "var") {
            keyword = Some(n);
            return Descend::No;
        }
        if n.kind() == "variable_declaration" {
            return Descend::No;
        }
        Descend::Yes
    });

    let name = declaration_name(node, source).unwrap_or_default();
    let variable = first_named_child_of_kind(node, &["variable_declaration"]);

    let (prefix, type_text) = match (keyword, variable) {
        (Some(kw), Some(var)) => {
            let prefix = source
                .get(kw.end_byte()..var.start_byte())
                .map(collapse_whitespace)
                .unwrap_or_default();
            let var_text = text(var, source);
            let type_text = find_top_level(var_text, ':')
                .map(|idx| collapse_whitespace(&var_text[idx + 1..]))
                .filter(|t| !t.is_empty());
            (prefix, type_text)
        }
        _ => (String::new(), None),
    };

    PropertyParts {
        mutable: keyword.map(|k| k.kind() == "var").unwrap_or(false),
        prefix,
        name,
        type_text,
    }
}

/// Primary constructor parameters of a class, if it declares any.
pub fn class_params(node: Node<'_>, source: &str) -> Vec<Param> {
    let Some(ctor) = first_named_child_of_kind(node, &["primary_constructor", "class_parameters"])
    else {
        return Vec::new();
    };
    let ctor_text = text(ctor, source);
    match ctor_text.find('(') {
        Some(open) => parse_params(&ctor_text[open..]),
        None => Vec::new(),
    }
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    text.match_indices(word).map(|(idx, _)| idx).find(|&idx| {
        let before = text[..idx].chars().next_back();
        let after = text[idx + word.len()..].chars().next();
        let boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric() && c != '_');
        boundary(before) && boundary(after)
    })
}

/// Byte offset of the first `needle` not nested in brackets or strings.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    scan_top_level(text, needle).into_iter().next()
}

/// Split on `sep` outside of brackets, generics, lambdas and strings.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for idx in scan_top_level(text, sep) {
        parts.push(&text[start..idx]);
        start = idx + sep.len_utf8();
    }
    parts.push(&text[start..]);
    parts
}

fn scan_top_level(text: &str, needle: char) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut depth = 0i32;
    let mut in_string: Option<char> = None;
    let mut escaped = false;
    let mut prev = '\0';

    for (idx, c) in text.char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            prev = c;
            continue;
        }
        if depth == 0 && c == needle {
            hits.push(idx);
            prev = c;
            continue;
        }
        match c {
            '"' | '\'' => in_string = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            // `->` closes nothing
            '>' if prev != '-' => depth -= 1,
            _ => {}
        }
        depth = depth.max(0);
        prev = c;
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::KotlinParser;
    use indoc::indoc;

    #[test]
    fn test_split_top_level_respects_nesting() {
        let parts = split_top_level(
            "a: Map<K, V>, b: (Int, Int) -> Unit, c: String = \"x,y\"",
            ',',
        );
        assert_eq!(
            parts,
            vec!["a: Map<K, V>", " b: (Int, Int) -> Unit", " c: String = \"x,y\""]
        );
    }

    #[test]
    fn test_parse_params_strips_modifiers_and_defaults() {
        let params =
            parse_params("(private val id: Long, var title: String = \"\", vararg tags: String)");
        let rendered: Vec<_> = params.iter().map(Param::render).collect();
        assert_eq!(rendered, vec!["id: Long", "title: String", "tags: String"]);
        assert_eq!(params[0].binding, "val");
        assert_eq!(params[1].binding, "var");
        assert_eq!(params[2].binding, "");
    }

    #[test]
    fn test_parse_params_handles_function_types() {
        let params = parse_params("(onClick: (View) -> Unit, @DrawableRes icon: Int)");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].type_text, "(View) -> Unit");
        assert_eq!(params[1].name, "icon");
    }

    #[test]
    fn test_annotation_short_name_variants() {
        assert_eq!(annotation_short_name("@Composable"), "Composable");
        assert_eq!(
            annotation_short_name("@androidx.compose.runtime.Composable"),
            "Composable"
        );
        assert_eq!(annotation_short_name("@Preview(showBackground = true)"), "Preview");
        assert_eq!(annotation_short_name("@get:JvmName(\"x\")"), "JvmName");
    }

    #[test]
    fn test_snippet_truncates() {
        assert_eq!(snippet("short", 25), "short");
        assert_eq!(snippet("abcdefghij", 4), "abcd...");
        assert_eq!(snippet("one\ntwo", 10), "one...");
    }

    #[test]
    fn test_function_parts_with_receiver_and_generics() {
        let mut parser = KotlinParser::new().unwrap();
        let parsed = parser
            .parse(
                "Ext.kt",
                "fun <T : Any> List<T>.second(default: T): T where T : Comparable<T> = get(1)\n"
                    .to_string(),
            )
            .unwrap();
        let node = parsed.top_level_nodes()[0];
        let parts = function_parts(node, parsed.source());
        assert_eq!(parts.header, "<T : Any> List<T>.second");
        assert_eq!(parts.params[0].name, "default");
        assert_eq!(parts.params[0].type_text, "T");
        assert_eq!(parts.return_type.as_deref(), Some("T"));
        assert!(parts.expression_body);
    }

    #[test]
    fn test_property_parts() {
        let mut parser = KotlinParser::new().unwrap();
        let parsed = parser
            .parse(
                "Prop.kt",
                "var counter: Int = 0\nval String.shout: String get() = uppercase()\n".to_string(),
            )
            .unwrap();
        let nodes = parsed.top_level_nodes();

        let counter = property_parts(nodes[0], parsed.source());
        assert!(counter.mutable);
        assert_eq!(counter.name, "counter");
        assert_eq!(counter.type_text.as_deref(), Some("Int"));

        let shout = property_parts(nodes[1], parsed.source());
        assert!(!shout.mutable);
        assert_eq!(shout.prefix, "String.");
        assert_eq!(shout.name, "shout");
    }

    #[test]
    fn test_class_helpers() {
        let mut parser = KotlinParser::new().unwrap();
        let parsed = parser
            .parse(
                "Types.kt",
                indoc! {"
                    @Suppress(\"unused\")
                    data class User(val id: Long, var name: String)
                    enum class Color { RED, GREEN, BLUE }
                    class Screen : AppCompatActivity(), Listener
                "}
                .to_string(),
            )
            .unwrap();
        let src = parsed.source();
        let nodes = parsed.top_level_nodes();

        assert!(modifier_words(nodes[0], src).contains(&"data".to_string()));
        assert_eq!(annotation_short_names(nodes[0], src), vec!["Suppress"]);
        let params: Vec<_> = class_params(nodes[0], src).iter().map(Param::render).collect();
        assert_eq!(params, vec!["id: Long", "name: String"]);

        assert!(modifier_words(nodes[1], src).contains(&"enum".to_string()));
        assert_eq!(enum_entries(nodes[1], src), vec!["RED", "GREEN", "BLUE"]);

        assert_eq!(declaration_name(nodes[2], src).as_deref(), Some("Screen"));
        assert_eq!(
            supertype_texts(nodes[2], src),
            vec!["AppCompatActivity()", "Listener"]
        );
    }
}
