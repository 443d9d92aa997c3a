use serde::Serialize;

/// One (HTTP method, path) pair with everything a renderer needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Uppercase method name (GET, POST, ...).
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL-safe anchor derived from the summary.
    pub anchor: String,
    /// First declared tag; the resource this endpoint belongs to.
    pub tag: String,
    pub deprecated: bool,
    /// Merged path-level and operation-level parameters, in override order.
    pub parameters: Vec<ParameterView>,
    /// Final header list for code samples — header parameters plus any
    /// injected auth header, deduplicated case-insensitively by name.
    pub headers: Vec<HeaderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyView>,
    pub responses: Vec<ResponseView>,
    pub requires_auth: bool,
}

/// A resolved parameter row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterView {
    pub name: String,
    /// Parameter location: path, query, header, or cookie.
    pub location: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display label for the parameter's type ("string", "array of integer").
    pub param_type: String,
    /// Inline example value.
    pub example: String,
}

/// A header name/value pair for rendered code samples.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderLine {
    pub name: String,
    pub value: String,
}

/// A normalized request body with a rendered example.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyView {
    pub content_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub example: String,
}

/// One response status with a rendered example, when content is declared.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}
