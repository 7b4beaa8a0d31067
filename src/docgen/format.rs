//! AsciiDoc table row formatting.
//!
//! Cells that look like identifiers, paths, or environment variable
//! names are set in monospace. The heuristic is deliberately loose and
//! also catches short all-caps words; generated pages depend on it.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Cell text for a value that is absent or unknown.
pub const PLACEHOLDER: &str = "--";

/// Cells made only of these characters are treated as identifiers.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_${}:-]+$").expect("valid regex"));

/// Cell text for a flag.
#[must_use]
pub const fn bool_text(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

/// Renders one cell, wrapping it in backticks if it looks like code.
///
/// The empty string and [`PLACEHOLDER`] pass through untouched. Non-string
/// values are stringified before the heuristic applies: flags as
/// `True`/`False`, null as `None`, everything else as JSON.
#[must_use]
pub fn fix_width(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Bool(flag) => bool_text(*flag).to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    };

    if text.is_empty() || text == PLACEHOLDER {
        return text;
    }

    if text.starts_with(['$', '/']) || text.ends_with('}') || IDENTIFIER_RE.is_match(&text) {
        format!("`{text}`")
    } else {
        text
    }
}

/// Renders a table row: a new line, then `|` before the first cell and
/// ` | ` between cells.
#[must_use]
pub fn build_row(cells: &[Value]) -> String {
    let cells: Vec<String> = cells.iter().map(fix_width).collect();
    format!("\n|{}", cells.join(" | "))
}

/// Renders a cell spanning `rows` rows, as used for per-object headers.
///
/// The text is emitted verbatim, without the monospace heuristic.
#[must_use]
pub fn merged_cell(rows: usize, text: &str) -> String {
    format!("\n.{rows}+| {text}")
}

/// A row value: the text, or [`PLACEHOLDER`] when absent.
#[must_use]
pub fn or_placeholder<T: ToString>(value: Option<T>) -> Value {
    value.map_or_else(|| Value::from(PLACEHOLDER), |v| Value::from(v.to_string()))
}
