use minijinja::Environment;

use oad_core::config::{GeneratorConfig, GeneratorId};
use oad_core::error::GeneratorError;
use oad_core::model::TemplateData;
use oad_core::{DocGenerator, GeneratedFile};

/// Single-page HTML documentation generator. Markup is escaped by
/// minijinja's auto-escaping for `.html` templates.
pub struct HtmlGenerator;

impl DocGenerator for HtmlGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Html
    }

    fn generate(
        &self,
        data: &TemplateData,
        _config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut env = Environment::new();
        env.add_template("index.html", include_str!("templates/index.html.j2"))
            .map_err(|e| GeneratorError::Render(e.to_string()))?;

        let content = env
            .get_template("index.html")
            .and_then(|template| template.render(minijinja::Value::from_serialize(data)))
            .map_err(|e| GeneratorError::Render(e.to_string()))?;

        Ok(vec![GeneratedFile {
            path: "index.html".to_string(),
            content,
        }])
    }
}
