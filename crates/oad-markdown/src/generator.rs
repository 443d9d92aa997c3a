use minijinja::{Environment, context};

use oad_core::config::{GeneratorConfig, GeneratorId, OutputLayout};
use oad_core::error::GeneratorError;
use oad_core::model::TemplateData;
use oad_core::{DocGenerator, GeneratedFile};

/// Markdown documentation generator.
pub struct MarkdownGenerator;

impl MarkdownGenerator {
    fn environment() -> Result<Environment<'static>, GeneratorError> {
        let mut env = Environment::new();
        for (name, source) in [
            ("endpoint.md", include_str!("templates/endpoint.md.j2")),
            ("reference.md", include_str!("templates/reference.md.j2")),
            ("index.md", include_str!("templates/index.md.j2")),
            ("resource.md", include_str!("templates/resource.md.j2")),
        ] {
            env.add_template(name, source)
                .map_err(|e| GeneratorError::Render(e.to_string()))?;
        }
        Ok(env)
    }

    fn render(
        env: &Environment<'_>,
        name: &str,
        context: minijinja::Value,
    ) -> Result<String, GeneratorError> {
        env.get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|e| GeneratorError::Render(e.to_string()))
    }
}

impl DocGenerator for MarkdownGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Markdown
    }

    fn generate(
        &self,
        data: &TemplateData,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let env = Self::environment()?;
        let root = minijinja::Value::from_serialize(data);

        match config.layout {
            OutputLayout::Single => Ok(vec![GeneratedFile {
                path: "api.md".to_string(),
                content: Self::render(&env, "reference.md", root)?,
            }]),
            OutputLayout::Split => {
                let mut files = vec![GeneratedFile {
                    path: "index.md".to_string(),
                    content: Self::render(&env, "index.md", root)?,
                }];
                for resource in &data.resources {
                    let content = Self::render(
                        &env,
                        "resource.md",
                        context! {
                            resource => resource,
                            excludeBrand => data.exclude_brand,
                            version => &data.version,
                            timestamp => &data.timestamp,
                        },
                    )?;
                    files.push(GeneratedFile {
                        path: format!("{}.md", resource.slug),
                        content,
                    });
                }
                Ok(files)
            }
        }
    }
}
