// Rust guideline compliant 2026-10-18

//! Output escaping callbacks installed on value objects by the view layer.

use crate::Value;
use std::sync::Arc;

/// Escaping callback applied to display values in escaped view mode.
pub type EscapeFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Returns an escape function that leaves values unchanged.
#[must_use]
pub fn identity() -> EscapeFn {
    Arc::new(Value::clone)
}

/// Returns an escape function for HTML text and attribute content.
#[must_use]
pub fn html() -> EscapeFn {
    Arc::new(|value| map_text(value, escape_html))
}

/// Returns an escape function for XML content.
#[must_use]
pub fn xml() -> EscapeFn {
    Arc::new(|value| map_text(value, escape_xml))
}

/// Escapes `& < > " '` for HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    escape_with(text, "&#039;")
}

/// Escapes `& < > " '` for XML.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    escape_with(text, "&apos;")
}

fn escape_with(text: &str, apostrophe: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str(apostrophe),
            _ => out.push(c),
        }
    }
    out
}

fn map_text(value: &Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::Text(text) => Value::Text(f(text)),
        other => other.clone(),
    }
}
