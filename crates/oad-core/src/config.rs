use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::process::ProcessOptions;

/// Top-level project configuration loaded from `.oad.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OadConfig {
    pub input: String,
    pub processing: ProcessingConfig,
    pub branding: BrandingConfig,
    /// Generators to run, keyed by ID, in declaration order.
    pub generators: IndexMap<GeneratorId, GeneratorConfig>,
}

impl Default for OadConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            processing: ProcessingConfig::default(),
            branding: BrandingConfig::default(),
            generators: IndexMap::new(),
        }
    }
}

impl OadConfig {
    /// Assemble processor options from the config plus the values supplied
    /// by the caller (the branding/versioning collaborator).
    pub fn process_options(&self, version: String, timestamp: String) -> ProcessOptions {
        ProcessOptions {
            exclude_brand: self.branding.exclude_brand,
            base_url: self.processing.base_url.clone(),
            tag_order: self.processing.tag_order.clone(),
            url_encode_anchors: self.processing.url_encode_anchors,
            version,
            timestamp,
        }
    }
}

/// Options steering the document processor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Explicit resource ordering; unlisted tags follow alphabetically.
    pub tag_order: Vec<String>,
    /// Fallback server URL when the spec declares none.
    pub base_url: Option<String>,
    /// Preserve summary casing in anchors (set false to lowercase them).
    pub url_encode_anchors: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            tag_order: Vec::new(),
            base_url: None,
            url_encode_anchors: true,
        }
    }
}

/// Branding pass-through options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Suppress the generator branding footer in rendered output.
    pub exclude_brand: bool,
}

/// Which documentation generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorId {
    Markdown,
    Html,
    Postman,
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorId::Markdown => "markdown",
            GeneratorId::Html => "html",
            GeneratorId::Postman => "postman",
        };
        write!(f, "{name}")
    }
}

/// Per-generator output options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub output: String,
    pub layout: OutputLayout,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: "docs".to_string(),
            layout: OutputLayout::Single,
        }
    }
}

/// How generated documentation is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// One file holding the whole reference.
    Single,
    /// An index plus one file per resource.
    Split,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oad.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OadConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OadConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oad configuration — https://github.com/oad-dev/openapi-docgen
input: openapi.yaml

processing:
  tag_order: []              # resources listed here come first, in this order
    # - Dashboard
    # - Users
  # base_url: https://api.example.com   # fallback when the spec declares no servers
  url_encode_anchors: true   # false lowercases anchors

branding:
  exclude_brand: false       # true suppresses the generator footer

generators:
  markdown:
    output: docs/markdown
    layout: single           # single | split (split = index + one file per resource)
  # html:
  #   output: docs/html
  # postman:
  #   output: docs/postman
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OadConfig::default();
        assert_eq!(config.input, "openapi.yaml");
        assert!(config.processing.tag_order.is_empty());
        assert!(config.processing.url_encode_anchors);
        assert!(!config.branding.exclude_brand);
        assert!(config.generators.is_empty());
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
input: spec.yaml
processing:
  tag_order:
    - Dashboard
    - Users
  base_url: https://api.example.com
  url_encode_anchors: false
branding:
  exclude_brand: true
generators:
  markdown:
    output: out/md
    layout: split
  postman:
    output: out/postman
"#;
        let config: OadConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "spec.yaml");
        assert_eq!(config.processing.tag_order, ["Dashboard", "Users"]);
        assert_eq!(
            config.processing.base_url.as_deref(),
            Some("https://api.example.com")
        );
        assert!(!config.processing.url_encode_anchors);
        assert!(config.branding.exclude_brand);
        assert_eq!(config.generators.len(), 2);
        assert_eq!(config.generators[&GeneratorId::Markdown].output, "out/md");
        assert_eq!(
            config.generators[&GeneratorId::Markdown].layout,
            OutputLayout::Split
        );
        assert_eq!(
            config.generators[&GeneratorId::Postman].layout,
            OutputLayout::Single
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "input: api.yaml\n";
        let config: OadConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.input, "api.yaml");
        assert!(config.processing.url_encode_anchors);
    }

    #[test]
    fn test_default_content_parses() {
        let config: OadConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert!(config.generators.contains_key(&GeneratorId::Markdown));
    }

    #[test]
    fn test_process_options_passthrough() {
        let mut config = OadConfig::default();
        config.branding.exclude_brand = true;
        config.processing.tag_order = vec!["Users".to_string()];
        let options = config.process_options("9.9.9".to_string(), "2026-01-01".to_string());
        assert!(options.exclude_brand);
        assert_eq!(options.tag_order, ["Users"]);
        assert_eq!(options.version, "9.9.9");
        assert_eq!(options.timestamp, "2026-01-01");
    }
}
