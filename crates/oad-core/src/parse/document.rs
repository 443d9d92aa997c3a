use serde_json::Value;

/// A parsed OpenAPI specification, held as a duck-typed JSON tree.
///
/// The processor only ever reads the tree; missing optional sections
/// degrade to defaults instead of failing, so no shape is enforced here.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Spec title, for display in CLI summaries.
    pub fn title(&self) -> Option<&str> {
        self.root
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
    }

    /// Declared OpenAPI version string, if any.
    pub fn openapi_version(&self) -> Option<&str> {
        self.root.get("openapi").and_then(Value::as_str)
    }

    /// Number of path entries.
    pub fn path_count(&self) -> usize {
        self.root
            .get("paths")
            .and_then(Value::as_object)
            .map(|paths| paths.len())
            .unwrap_or(0)
    }

    /// Number of named component schemas.
    pub fn schema_count(&self) -> usize {
        self.root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
            .map(|schemas| schemas.len())
            .unwrap_or(0)
    }
}
