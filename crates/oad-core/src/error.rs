use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// Fatal processing failures. Locally recoverable conditions (unresolvable
/// single refs, missing optional sections, empty composition arrays) never
/// surface here — they degrade to documented defaults instead.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("specification document is empty")]
    EmptyDocument,

    #[error("operation {method} {path} ({summary}) declares no tags")]
    MissingTags {
        method: String,
        path: String,
        summary: String,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template rendering failed: {0}")]
    Render(String),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
