pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod process;

use config::{GeneratorConfig, GeneratorId};
use model::TemplateData;

/// A generated documentation file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for documentation generators that produce files from template data.
///
/// Generators never see the original specification document — only the
/// processed [`TemplateData`].
pub trait DocGenerator {
    fn id(&self) -> GeneratorId;

    fn generate(
        &self,
        data: &TemplateData,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, error::GeneratorError>;
}
