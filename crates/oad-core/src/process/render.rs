use serde_json::Value;

use super::example::{DEPTH_SENTINEL, MAX_DEPTH};

/// Serialize an example value to its displayed representation for the given
/// content type. JSON is pretty-printed, XML is rendered by recursive tag
/// wrapping, form content renders as `key=value&...` pairs, and null
/// serializes to the empty string.
pub fn render_example(value: &Value, content_type: &str, root_tag: &str) -> String {
    if value.is_null() {
        return String::new();
    }
    if content_type.contains("xml") {
        return render_xml(value, root_tag, 0);
    }
    if content_type.contains("form") {
        return render_form(value);
    }
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Straightforward recursive tag wrapping, depth-bounded the same way the
/// synthesizer is.
fn render_xml(value: &Value, tag: &str, depth: usize) -> String {
    if depth > MAX_DEPTH {
        return format!("<{tag}>{DEPTH_SENTINEL}</{tag}>");
    }
    match value {
        Value::Object(map) => {
            let inner: String = map
                .iter()
                .map(|(key, child)| render_xml(child, key, depth + 1))
                .collect();
            format!("<{tag}>{inner}</{tag}>")
        }
        Value::Array(items) => items
            .iter()
            .map(|item| render_xml(item, tag, depth + 1))
            .collect(),
        Value::Null => format!("<{tag}/>"),
        scalar => format!("<{tag}>{}</{tag}>", escape_xml(&scalar_text(scalar))),
    }
}

fn render_form(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, child)| format!("{key}={}", scalar_text(child)))
            .collect::<Vec<_>>()
            .join("&"),
        other => scalar_text(other),
    }
}

/// Inline text form of a value: strings unquoted, everything else compact
/// JSON. Used for form pairs, XML leaves, and header example values.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
