use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oad_core::config::{self, CONFIG_FILE_NAME, GeneratorId, OadConfig};
use oad_core::model::TemplateData;
use oad_core::parse::{self, Document};
use oad_core::process::{ProcessOptions, process_with_options};
use oad_core::{DocGenerator, GeneratedFile};
use oad_html::HtmlGenerator;
use oad_markdown::MarkdownGenerator;
use oad_postman::PostmanGenerator;

#[derive(Parser)]
#[command(name = "oad", about = "OpenAPI 3.x documentation generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation from an OpenAPI spec
    Generate {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate that an OpenAPI spec parses and processes cleanly
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the processed template data for an OpenAPI spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new oad configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input } => cmd_generate(input),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oad", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Explicit registry of the built-in generators. Passed around as a value —
/// there is no global generator state.
struct GeneratorRegistry {
    generators: Vec<Box<dyn DocGenerator>>,
}

impl GeneratorRegistry {
    fn builtin() -> Self {
        Self {
            generators: vec![
                Box::new(MarkdownGenerator),
                Box::new(HtmlGenerator),
                Box::new(PostmanGenerator),
            ],
        }
    }

    fn get(&self, id: GeneratorId) -> Option<&dyn DocGenerator> {
        self.generators
            .iter()
            .find(|generator| generator.id() == id)
            .map(|generator| &**generator)
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OadConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(doc)
}

fn load_template_data(path: &Path, cfg: &OadConfig) -> Result<TemplateData> {
    let doc = load_document(path)?;
    let options = build_options(cfg);
    let data = process_with_options(&doc, &options)?;
    Ok(data)
}

/// Assemble processor options, supplying the branding/versioning values the
/// core treats as opaque pass-through.
fn build_options(cfg: &OadConfig) -> ProcessOptions {
    cfg.process_options(
        env!("CARGO_PKG_VERSION").to_string(),
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    )
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Generate the "do not edit" README.
fn readme_content() -> &'static str {
    r#"# Generated Documentation — Do Not Edit

This directory is **auto-generated** by [oad](https://github.com/oad-dev/openapi-docgen).
Any manual changes will be overwritten the next time `oad generate` is run.

To regenerate, run:
```
oad generate
```

To customize the output, edit your `.oad.yaml` configuration file.
"#
}

fn cmd_generate(input: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let data = load_template_data(&input, &cfg)?;
    log::info!(
        "processed {} endpoints across {} resources",
        data.endpoints.len(),
        data.resources.len()
    );

    if cfg.generators.is_empty() {
        eprintln!("No generators configured. Add a `generators` section to your config.");
        return Ok(());
    }

    let registry = GeneratorRegistry::builtin();
    for (gen_id, gen_config) in &cfg.generators {
        eprintln!("Generating {} → {}", gen_id, gen_config.output);
        let generator = registry
            .get(*gen_id)
            .with_context(|| format!("no generator registered for '{gen_id}'"))?;
        let files = generator
            .generate(&data, gen_config)
            .with_context(|| format!("{gen_id} generation failed"))?;

        let output_dir = PathBuf::from(&gen_config.output);
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory {}", output_dir.display())
        })?;

        write_files(&output_dir, &files)?;

        let readme_path = output_dir.join("README.md");
        fs::write(&readme_path, readme_content())
            .with_context(|| format!("failed to write {}", readme_path.display()))?;
        eprintln!("  wrote {}", readme_path.display());

        eprintln!(
            "Generated {} files in {}",
            files.len() + 1, // +1 for README
            output_dir.display()
        );
    }

    eprintln!(
        "\nThe generated directories should not be edited manually — changes will be overwritten."
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = load_document(&input)?;

    eprintln!(
        "Valid OpenAPI {} spec: {}",
        doc.openapi_version().unwrap_or("3.x"),
        doc.title().unwrap_or("(untitled)")
    );
    eprintln!("  Paths: {}", doc.path_count());
    eprintln!("  Schemas: {}", doc.schema_count());

    // Also validate that a full processing pass succeeds.
    let cfg = try_load_config()?.unwrap_or_default();
    let data = process_with_options(&doc, &build_options(&cfg))?;
    eprintln!("  Endpoints: {}", data.endpoints.len());
    eprintln!("  Resources: {}", data.resources.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let data = load_template_data(&input, &cfg)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&data)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&data)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_all_builtin_generators() {
        let registry = GeneratorRegistry::builtin();
        for id in [GeneratorId::Markdown, GeneratorId::Html, GeneratorId::Postman] {
            let generator = registry.get(id).expect("builtin generator");
            assert_eq!(generator.id(), id);
        }
    }

    #[test]
    fn write_files_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let files = [GeneratedFile {
            path: "nested/api.md".to_string(),
            content: "# Docs".to_string(),
        }];
        write_files(dir.path(), &files).unwrap();

        let written = fs::read_to_string(dir.path().join("nested/api.md")).unwrap();
        assert_eq!(written, "# Docs");
    }

    #[test]
    fn load_document_accepts_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("spec.yaml");
        fs::write(
            &yaml_path,
            "openapi: \"3.0.0\"\ninfo:\n  title: From YAML\n  version: \"1.0\"\n",
        )
        .unwrap();
        assert_eq!(load_document(&yaml_path).unwrap().title(), Some("From YAML"));

        let json_path = dir.path().join("spec.json");
        fs::write(
            &json_path,
            r#"{"openapi": "3.0.0", "info": {"title": "From JSON", "version": "1.0"}}"#,
        )
        .unwrap();
        assert_eq!(load_document(&json_path).unwrap().title(), Some("From JSON"));
    }
}
