pub mod document;

pub use document::Document;

use serde_json::Value;

use crate::error::ParseError;

/// Parse an OpenAPI spec from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let raw: serde_yaml_ng::Value = serde_yaml_ng::from_str(input)?;
    let root = yaml_to_json(raw);
    validate_version(&root)?;
    Ok(Document::new(root))
}

/// Parse an OpenAPI spec from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let root: Value = serde_json::from_str(input)?;
    validate_version(&root)?;
    Ok(Document::new(root))
}

/// Gate on the spec version without validating anything else about the
/// document shape. An absent `openapi` field is tolerated (the processor is
/// duck-typed), but a Swagger 2.0 document or an explicit non-3.x version
/// is rejected up front.
fn validate_version(root: &Value) -> Result<(), ParseError> {
    if let Some(swagger) = root.get("swagger").and_then(Value::as_str) {
        return Err(ParseError::UnsupportedVersion(swagger.to_string()));
    }
    if let Some(version) = root.get("openapi").and_then(Value::as_str) {
        if !version.starts_with("3.") {
            return Err(ParseError::UnsupportedVersion(version.to_string()));
        }
    }
    Ok(())
}

/// Bridge a YAML value to JSON. YAML permits non-string mapping keys
/// (unquoted response codes like `200:` parse as integers); those are
/// stringified so the whole document fits in one `serde_json::Value` tree.
fn yaml_to_json(value: serde_yaml_ng::Value) -> Value {
    use serde_yaml_ng::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map(Value::from).unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => {
            let mut out = serde_json::Map::new();
            for (key, val) in map {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Number(n) => n.to_string(),
                    _ => continue,
                };
                out.insert(key, yaml_to_json(val));
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
