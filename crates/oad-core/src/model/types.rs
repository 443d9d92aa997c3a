use std::fmt;

use serde::Serialize;

use super::endpoint::Endpoint;
use super::schema::SchemaModel;

/// The template-ready structure handed to documentation renderers.
///
/// Field names serialize in camelCase — renderers address `hasAuth`,
/// `excludeBrand`, etc. and never see the original specification document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
    pub info: ApiInfo,
    pub servers: Vec<ServerView>,
    pub has_auth: bool,
    /// Flat list, for the quick-reference view.
    pub endpoints: Vec<Endpoint>,
    /// Grouped and ordered, for the main body.
    pub resources: Vec<Resource>,
    pub schemas: Vec<SchemaModel>,
    pub exclude_brand: bool,
    pub version: String,
    pub timestamp: String,
}

/// API metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
}

/// A server URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerView {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named grouping of endpoints sharing a first declared tag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    /// Filesystem-safe name for split-file output.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub endpoints: Vec<Endpoint>,
}

/// A name with casing variants pre-computed for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub snake_case: String,
    pub kebab_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
