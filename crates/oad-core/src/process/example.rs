use std::collections::HashMap;

use serde_json::{Map, Value, json};

use super::normalizer::normalize;

/// Recursion ceiling for example synthesis and XML rendering. Cyclic schema
/// graphs (tree-shaped domain models referencing themselves) are valid
/// OpenAPI; bounding depth with a sentinel is the termination guarantee.
pub const MAX_DEPTH: usize = 10;

/// Placeholder returned once the depth ceiling is exceeded.
pub const DEPTH_SENTINEL: &str = "[Max depth exceeded]";

/// The closed set of schema `type` keywords the synthesizer dispatches on.
/// Absent or unrecognized keywords are an explicit variant, not a silent
/// fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    Unknown,
}

impl SchemaType {
    /// Classify a raw `type` keyword. Non-standard numeric-like names
    /// (`float`, `int64`, `decimal`, ...) are treated as numbers so they
    /// still synthesize `0` instead of degrading to null.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "array" => SchemaType::Array,
            "object" => SchemaType::Object,
            "null" => SchemaType::Null,
            other if is_numeric_like(other) => SchemaType::Number,
            _ => SchemaType::Unknown,
        }
    }
}

fn is_numeric_like(keyword: &str) -> bool {
    let lowered = keyword.to_ascii_lowercase();
    ["int", "float", "double", "long", "decimal"]
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Builds representative example values for schemas that carry no explicit
/// `example`. One synthesizer serves one document for one processing pass;
/// its caches are keyed by schema shape and are not namespaced across
/// documents.
pub struct ExampleSynthesizer<'a> {
    root: &'a Value,
    // Memoized per (schema shape, depth): large specs repeat the same
    // property shapes hundreds of times.
    example_cache: HashMap<(String, usize), Value>,
    type_cache: HashMap<String, SchemaType>,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            example_cache: HashMap::new(),
            type_cache: HashMap::new(),
        }
    }

    /// Synthesize an example for `schema` at the given descent depth.
    /// Depth starts at 0 and increments per property or array-item descent.
    pub fn synthesize(&mut self, schema: &Value, depth: usize) -> Value {
        if depth > MAX_DEPTH {
            return Value::String(DEPTH_SENTINEL.to_string());
        }

        let Some(normalized) = normalize(self.root, schema) else {
            // Unresolvable ref — degrade to null rather than failing.
            return Value::Null;
        };

        // Explicit examples always win, regardless of declared type.
        if let Some(example) = explicit_example(&normalized) {
            return example.clone();
        }

        let key = (normalized.to_string(), depth);
        if let Some(cached) = self.example_cache.get(&key) {
            return cached.clone();
        }

        let value = self.dispatch(&normalized, depth);
        self.example_cache.insert(key, value.clone());
        value
    }

    fn dispatch(&mut self, schema: &Value, depth: usize) -> Value {
        if let Some(first) = schema
            .get("enum")
            .and_then(Value::as_array)
            .and_then(|values| values.first())
        {
            return first.clone();
        }

        match self.schema_type(schema) {
            SchemaType::Object => self.object_example(schema, depth),
            SchemaType::Array => {
                let items = schema
                    .get("items")
                    .cloned()
                    .unwrap_or_else(|| json!({"type": "string"}));
                Value::Array(vec![self.synthesize(&items, depth + 1)])
            }
            SchemaType::String => Value::String("string".to_string()),
            SchemaType::Number | SchemaType::Integer => json!(0),
            SchemaType::Boolean => Value::Bool(true),
            SchemaType::Null | SchemaType::Unknown => Value::Null,
        }
    }

    fn object_example(&mut self, schema: &Value, depth: usize) -> Value {
        let mut out = Map::new();
        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                out.insert(name.clone(), self.synthesize(property, depth + 1));
            }
        }
        Value::Object(out)
    }

    /// Classify the schema's declared type. Schemas that omit `type` but
    /// carry `properties` or `items` are inferred as object/array; a bare
    /// absent type stays `Unknown` and synthesizes null.
    fn schema_type(&mut self, schema: &Value) -> SchemaType {
        match schema.get("type").and_then(Value::as_str) {
            Some(keyword) => {
                if let Some(cached) = self.type_cache.get(keyword) {
                    return *cached;
                }
                let classified = SchemaType::from_keyword(keyword);
                self.type_cache.insert(keyword.to_string(), classified);
                classified
            }
            None if schema.get("properties").is_some() => SchemaType::Object,
            None if schema.get("items").is_some() => SchemaType::Array,
            None => SchemaType::Unknown,
        }
    }
}

/// Explicit example carried by a schema, parameter, or media-type node:
/// the `example` field, else the first entry of an `examples` map/array.
pub(crate) fn explicit_example(node: &Value) -> Option<&Value> {
    node.get("example").or_else(|| first_named_example(node))
}

/// First entry of an `examples` map or array, if present and non-empty.
fn first_named_example(schema: &Value) -> Option<&Value> {
    match schema.get("examples") {
        Some(Value::Object(map)) => map.values().next().map(unwrap_example_value),
        Some(Value::Array(items)) => items.first(),
        _ => None,
    }
}

/// OpenAPI `examples` map entries wrap the payload in a `value` field.
fn unwrap_example_value(entry: &Value) -> &Value {
    entry.get("value").unwrap_or(entry)
}
