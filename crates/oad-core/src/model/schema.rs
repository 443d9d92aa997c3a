use serde::Serialize;

use super::types::NormalizedName;

/// A named component schema with a generated example, for the models
/// section of the documentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModel {
    pub name: NormalizedName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
    /// Pretty-printed JSON example.
    pub example: String,
}

/// A field row in a schema table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub name: String,
    pub field_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
