use serde_json::Value;

/// Resolve a `#/a/b/c` reference pointer against the document root.
///
/// Any pointer that is not internal (`#/...`), or whose path does not exist,
/// resolves to `None` — never an error. The result may be a single object,
/// an array (a parameter group), or any other JSON value. A pointer
/// resolution is a single lookup, so no cycle detection is needed here.
pub fn resolve<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    let rest = pointer.strip_prefix("#/")?;
    if rest.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in rest.split('/') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Flatten an ordered parameter list, replacing `$ref` entries with their
/// resolved values. A ref that resolves to an array is a parameter group and
/// is expanded in place; groups may nest. Unresolvable entries are skipped.
pub fn resolve_parameter_list(root: &Value, params: Option<&Value>) -> Vec<Value> {
    let mut out = Vec::new();
    if let Some(entries) = params.and_then(Value::as_array) {
        for entry in entries {
            flatten_entry(root, entry, &mut out);
        }
    }
    out
}

fn flatten_entry(root: &Value, entry: &Value, out: &mut Vec<Value>) {
    match entry.get("$ref").and_then(Value::as_str) {
        Some(pointer) => match resolve(root, pointer) {
            Some(Value::Array(group)) => {
                for member in group {
                    flatten_entry(root, member, out);
                }
            }
            Some(resolved) => out.push(resolved.clone()),
            None => {
                log::warn!("skipping unresolvable parameter reference {pointer}");
            }
        },
        None => out.push(entry.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "components": {
                "parameters": {
                    "Limit": {"name": "limit", "in": "query"}
                },
                "parameterGroups": {
                    "Tracing": [
                        {"name": "X-Request-Id", "in": "header"},
                        {"name": "X-Span-Id", "in": "header"}
                    ],
                    "All": [
                        {"$ref": "#/components/parameterGroups/Tracing"},
                        {"$ref": "#/components/parameters/Limit"}
                    ]
                }
            }
        })
    }

    #[test]
    fn resolves_nested_pointer() {
        let root = doc();
        let limit = resolve(&root, "#/components/parameters/Limit").unwrap();
        assert_eq!(limit["name"], "limit");
    }

    #[test]
    fn missing_and_malformed_pointers_are_none() {
        let root = doc();
        assert!(resolve(&root, "#/components/parameters/Nope").is_none());
        assert!(resolve(&root, "#/nope/deeper/still").is_none());
        assert!(resolve(&root, "http://example.com/schema.json").is_none());
        assert!(resolve(&root, "").is_none());
        assert!(resolve(&root, "#/").is_none());
    }

    #[test]
    fn resolves_array_index_segments() {
        let root = doc();
        let first = resolve(&root, "#/components/parameterGroups/Tracing/0").unwrap();
        assert_eq!(first["name"], "X-Request-Id");
    }

    #[test]
    fn flattens_nested_parameter_groups_in_order() {
        let root = doc();
        let params = json!([
            {"$ref": "#/components/parameterGroups/All"},
            {"name": "verbose", "in": "query"}
        ]);
        let resolved = resolve_parameter_list(&root, Some(&params));
        let names: Vec<_> = resolved.iter().map(|p| p["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["X-Request-Id", "X-Span-Id", "limit", "verbose"]);
    }

    #[test]
    fn unresolvable_entries_are_skipped() {
        let root = doc();
        let params = json!([
            {"$ref": "#/components/parameters/Missing"},
            {"name": "kept", "in": "query"}
        ]);
        let resolved = resolve_parameter_list(&root, Some(&params));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0]["name"], "kept");
    }
}
