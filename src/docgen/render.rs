//! Page template engine.
//!
//! Two constructs are recognized:
//!
//! - `${name}` substitutes a scalar. Missing names and non-scalar values
//!   render as the empty string.
//! - `${#name}...${/name}` is a section. A list renders the body once per
//!   element with the element as the innermost scope; a map renders it
//!   once with the map as scope; any other truthy value renders it once
//!   in the current scope. `null`, `false`, missing names, and empty
//!   lists, maps, or strings skip it.
//!
//! Names resolve from the innermost scope outwards. `$${` is a literal
//! `${`. Substituted text is never re-interpreted.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::RenderError;

/// Regex for `${name}`, `${#name}`, and `${/name}` tags.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([#/]?)([^}]+)\}").expect("valid regex"));

/// Sentinel marker for escaped `$${` sequences.
const ESCAPE_SENTINEL: &str = "\x00ESC_DOLLAR\x00";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var(String),
    Section { name: String, body: Vec<Self> },
}

/// A parsed page template, reusable across documents.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    nodes: Vec<Node>,
}

impl PageTemplate {
    /// Parses template source.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` when a section is left open or a close tag
    /// does not match the innermost open section.
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let working = source.replace("$${", ESCAPE_SENTINEL);

        // Open sections, innermost last, each with the nodes collected so far.
        let mut stack: Vec<(String, Vec<Node>)> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();
        let mut last = 0;

        for caps in TAG_RE.captures_iter(&working) {
            let Some(tag) = caps.get(0) else { continue };
            push_text(current(&mut stack, &mut nodes), &working[last..tag.start()]);
            last = tag.end();

            let name = caps[2].trim().to_string();
            match &caps[1] {
                "#" => stack.push((name, Vec::new())),
                "/" => match stack.pop() {
                    Some((open, body)) if open == name => {
                        current(&mut stack, &mut nodes).push(Node::Section { name, body });
                    }
                    _ => return Err(RenderError::UnexpectedClose(name)),
                },
                _ => current(&mut stack, &mut nodes).push(Node::Var(name)),
            }
        }
        push_text(current(&mut stack, &mut nodes), &working[last..]);

        if let Some((open, _)) = stack.pop() {
            return Err(RenderError::UnterminatedSection(open));
        }
        Ok(Self { nodes })
    }

    /// Renders the template against `data`.
    #[must_use]
    pub fn render(&self, data: &Value) -> String {
        let mut out = String::new();
        let mut scopes = vec![data];
        render_nodes(&self.nodes, &mut scopes, &mut out);
        out
    }
}

/// Parses and renders in one step.
///
/// # Errors
///
/// Returns `RenderError` if the template is malformed.
pub fn render(source: &str, data: &Value) -> Result<String, RenderError> {
    Ok(PageTemplate::parse(source)?.render(data))
}

fn current<'a>(stack: &'a mut [(String, Vec<Node>)], root: &'a mut Vec<Node>) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some((_, body)) => body,
        None => root,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.replace(ESCAPE_SENTINEL, "${")));
    }
}

fn lookup<'a>(scopes: &[&'a Value], name: &str) -> Option<&'a Value> {
    scopes.iter().rev().find_map(|scope| scope.get(name))
}

fn render_nodes<'a>(nodes: &'a [Node], scopes: &mut Vec<&'a Value>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(name) => match lookup(scopes, name) {
                Some(Value::String(s)) => out.push_str(s),
                Some(value @ (Value::Number(_) | Value::Bool(_))) => {
                    out.push_str(&value.to_string());
                }
                _ => {}
            },
            Node::Section { name, body } => {
                let Some(value) = lookup(scopes, name) else {
                    continue;
                };
                match value {
                    Value::Array(items) => {
                        for item in items {
                            scopes.push(item);
                            render_nodes(body, scopes, out);
                            scopes.pop();
                        }
                    }
                    Value::Object(map) if !map.is_empty() => {
                        scopes.push(value);
                        render_nodes(body, scopes, out);
                        scopes.pop();
                    }
                    Value::Bool(true) | Value::Number(_) => render_nodes(body, scopes, out),
                    Value::String(s) if !s.is_empty() => render_nodes(body, scopes, out),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_variables() {
        let out = render("= ${template}\n", &json!({"template": "eap64-basic-s2i"})).unwrap();
        assert_eq!(out, "= eap64-basic-s2i\n");
    }

    #[test]
    fn missing_variable_is_empty() {
        assert_eq!(render("[${nope}]", &json!({})).unwrap(), "[]");
    }

    #[test]
    fn escaped_dollar_is_literal() {
        let out = render("$${APPLICATION_NAME} ${x}", &json!({"x": "y"})).unwrap();
        assert_eq!(out, "${APPLICATION_NAME} y");
    }

    #[test]
    fn substituted_text_is_not_reinterpreted() {
        let out = render("${v}", &json!({"v": "${other}", "other": "no"})).unwrap();
        assert_eq!(out, "${other}");
    }

    #[test]
    fn list_section_repeats_per_element() {
        let out = render(
            "${#rows}<${cell}>${/rows}",
            &json!({"rows": [{"cell": "a"}, {"cell": "b"}]}),
        )
        .unwrap();
        assert_eq!(out, "<a><b>");
    }

    #[test]
    fn missing_or_empty_section_is_skipped() {
        let data = json!({"empty": [], "no": false});
        assert_eq!(render("a${#gone}x${/gone}b", &data).unwrap(), "ab");
        assert_eq!(render("a${#empty}x${/empty}b", &data).unwrap(), "ab");
        assert_eq!(render("a${#no}x${/no}b", &data).unwrap(), "ab");
    }

    #[test]
    fn empty_map_element_still_renders() {
        // A list holding one empty map renders its body once.
        let data = json!({"clustering": [{}]});
        let out = render("${#clustering}== Clustering${/clustering}", &data).unwrap();
        assert_eq!(out, "== Clustering");
    }

    #[test]
    fn nested_sections_fall_back_to_outer_scope() {
        let data = json!({
            "template": "t",
            "objects": [{"Route": [{"table": "\n|r | none | <default>"}]}]
        });
        let out = render(
            "${#objects}${#Route}${template}:${table}${/Route}${#Service}S${/Service}${/objects}",
            &data,
        )
        .unwrap();
        assert_eq!(out, "t:\n|r | none | <default>");
    }

    #[test]
    fn unterminated_section_fails() {
        let err = render("${#objects} body", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnterminatedSection(name) if name == "objects"));
    }

    #[test]
    fn mismatched_close_fails() {
        let err = render("${#a}${/b}", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnexpectedClose(name) if name == "b"));
        assert!(render("${/a}", &json!({})).is_err());
    }

    #[test]
    fn parsed_template_is_reusable() {
        let page = PageTemplate::parse("${name};").unwrap();
        assert_eq!(page.render(&json!({"name": "one"})), "one;");
        assert_eq!(page.render(&json!({"name": "two"})), "two;");
    }
}
