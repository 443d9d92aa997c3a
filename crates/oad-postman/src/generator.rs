use serde_json::{Value, json};

use oad_core::config::{GeneratorConfig, GeneratorId};
use oad_core::error::GeneratorError;
use oad_core::model::{Endpoint, TemplateData};
use oad_core::{DocGenerator, GeneratedFile};

const COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Postman collection v2.1 generator. One folder per resource, one request
/// per endpoint, headers taken from the endpoint's final header list.
pub struct PostmanGenerator;

impl DocGenerator for PostmanGenerator {
    fn id(&self) -> GeneratorId {
        GeneratorId::Postman
    }

    fn generate(
        &self,
        data: &TemplateData,
        _config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let base_url = data
            .servers
            .first()
            .map(|server| server.url.trim_end_matches('/').to_string())
            .unwrap_or_default();

        let folders: Vec<Value> = data
            .resources
            .iter()
            .map(|resource| {
                let items: Vec<Value> = resource
                    .endpoints
                    .iter()
                    .map(|endpoint| request_item(endpoint, &base_url))
                    .collect();
                json!({
                    "name": resource.name,
                    "description": resource.description,
                    "item": items,
                })
            })
            .collect();

        let collection = json!({
            "info": {
                "name": data.info.title,
                "description": data.info.description,
                "version": data.info.version,
                "schema": COLLECTION_SCHEMA,
            },
            "item": folders,
        });

        Ok(vec![GeneratedFile {
            path: "collection.json".to_string(),
            content: serde_json::to_string_pretty(&collection)?,
        }])
    }
}

fn request_item(endpoint: &Endpoint, base_url: &str) -> Value {
    let headers: Vec<Value> = endpoint
        .headers
        .iter()
        .map(|header| json!({"key": header.name, "value": header.value}))
        .collect();

    let query: Vec<Value> = endpoint
        .parameters
        .iter()
        .filter(|param| param.location == "query")
        .map(|param| {
            json!({
                "key": param.name,
                "value": param.example,
                "description": param.description,
            })
        })
        .collect();

    let variables: Vec<Value> = endpoint
        .parameters
        .iter()
        .filter(|param| param.location == "path")
        .map(|param| {
            json!({
                "key": param.name,
                "value": param.example,
                "description": param.description,
            })
        })
        .collect();

    let path = postman_path(&endpoint.path);
    let mut request = json!({
        "method": endpoint.method,
        "description": endpoint.description,
        "header": headers,
        "url": {
            "raw": format!("{base_url}{path}"),
            "host": [base_url],
            "path": path_segments(&path),
            "query": query,
            "variable": variables,
        },
    });

    if let Some(body) = &endpoint.request_body
        && let Value::Object(request_obj) = &mut request
    {
        let language = if body.content_type.contains("json") {
            "json"
        } else if body.content_type.contains("xml") {
            "xml"
        } else {
            "text"
        };
        request_obj.insert(
            "body".to_string(),
            json!({
                "mode": "raw",
                "raw": body.example,
                "options": {"raw": {"language": language}},
            }),
        );
    }

    json!({
        "name": endpoint.summary.clone().unwrap_or_else(|| format!("{} {}", endpoint.method, endpoint.path)),
        "request": request,
    })
}

/// Convert OpenAPI `{param}` path segments to Postman `:param` style.
fn postman_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                format!(":{name}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
