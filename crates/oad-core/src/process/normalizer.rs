use serde_json::{Map, Value};

use super::resolver::resolve;

/// Resolve a schema node to a concrete shape: follow top-level `$ref`
/// chains and flatten composition keywords.
///
/// Only the node itself is normalized — refs nested inside `properties` or
/// `items` are left in place, which is what keeps this terminating on
/// cyclic schema graphs (the example synthesizer's depth bound handles the
/// rest). Returns `None` only when a top-level ref cannot be resolved.
pub fn normalize(root: &Value, schema: &Value) -> Option<Value> {
    normalize_chain(root, schema, &mut Vec::new())
}

fn normalize_chain(root: &Value, schema: &Value, seen: &mut Vec<String>) -> Option<Value> {
    let Some(obj) = schema.as_object() else {
        // JSON Schema allows bare booleans; pass anything non-object through.
        return Some(schema.clone());
    };

    if let Some(pointer) = obj.get("$ref").and_then(Value::as_str) {
        if seen.iter().any(|p| p == pointer) {
            // Circular ref chain — return as-is rather than expanding.
            return Some(schema.clone());
        }
        seen.push(pointer.to_string());
        let target = resolve(root, pointer)?;
        return normalize_chain(root, target, seen);
    }

    if let Some(members) = obj.get("allOf").and_then(Value::as_array) {
        return Some(merge_all_of(root, members));
    }

    for keyword in ["anyOf", "oneOf"] {
        if let Some(alternatives) = obj.get(keyword).and_then(Value::as_array) {
            match alternatives.first() {
                Some(first) => return normalize_chain(root, first, &mut Vec::new()),
                // An empty composition array is returned unchanged.
                None => return Some(schema.clone()),
            }
        }
    }

    Some(schema.clone())
}

/// Flatten `allOf` members into a single object schema. Later members win
/// on property collisions; the first non-empty `type` encountered is
/// adopted. An empty member list yields `{type: "object", properties: {}}`.
fn merge_all_of(root: &Value, members: &[Value]) -> Value {
    let mut merged_type: Option<String> = None;
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();

    for member in members {
        let Some(normalized) = normalize_chain(root, member, &mut Vec::new()) else {
            // Unresolvable member ref — locally recoverable, skip it.
            continue;
        };
        if merged_type.is_none() {
            merged_type = normalized
                .get("type")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string);
        }
        if let Some(props) = normalized.get("properties").and_then(Value::as_object) {
            for (name, prop) in props {
                properties.insert(name.clone(), prop.clone());
            }
        }
        if let Some(names) = normalized.get("required").and_then(Value::as_array) {
            for name in names {
                if !required.contains(name) {
                    required.push(name.clone());
                }
            }
        }
    }

    let mut out = Map::new();
    out.insert(
        "type".to_string(),
        Value::String(merged_type.unwrap_or_else(|| "object".to_string())),
    );
    out.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(out)
}
