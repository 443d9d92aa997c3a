pub mod anchor;
pub mod example;
pub mod names;
pub mod normalizer;
pub mod render;
pub mod resolver;

use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::error::ProcessError;
use crate::model::{
    ApiInfo, Endpoint, FieldView, HeaderLine, ParameterView, RequestBodyView, Resource,
    ResponseView, SchemaModel, ServerView, TemplateData,
};
use crate::parse::Document;

use anchor::AnchorGenerator;
use example::{ExampleSynthesizer, explicit_example};
use names::normalize_name;
use normalizer::normalize;
use render::{render_example, scalar_text};
use resolver::{resolve, resolve_parameter_list};

/// Options controlling presentation fields of the processed output. None of
/// these affect structural correctness.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub exclude_brand: bool,
    /// Fallback server URL when the document declares none.
    pub base_url: Option<String>,
    /// Tags listed here come first, in this order (case-insensitive match);
    /// remaining tags sort alphabetically.
    pub tag_order: Vec<String>,
    /// When false, anchors are lowercased instead of case-preserved.
    pub url_encode_anchors: bool,
    /// Generator version, passed through to the output verbatim.
    pub version: String,
    /// Generation timestamp, passed through to the output verbatim. The
    /// processor never reads the clock itself.
    pub timestamp: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            exclude_brand: false,
            base_url: None,
            tag_order: Vec::new(),
            url_encode_anchors: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: String::new(),
        }
    }
}

const METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Process a specification document with default options.
pub fn process(doc: &Document) -> Result<TemplateData, ProcessError> {
    process_with_options(doc, &ProcessOptions::default())
}

/// Run one complete pass over the document and assemble the template data.
pub fn process_with_options(
    doc: &Document,
    options: &ProcessOptions,
) -> Result<TemplateData, ProcessError> {
    Processor::new(doc.root(), options)?.run()
}

/// One processor serves one document for one pass; its memoization caches
/// are not namespaced across documents.
pub struct Processor<'a> {
    root: &'a Value,
    options: &'a ProcessOptions,
    examples: ExampleSynthesizer<'a>,
    anchors: AnchorGenerator,
}

impl<'a> Processor<'a> {
    pub fn new(root: &'a Value, options: &'a ProcessOptions) -> Result<Self, ProcessError> {
        if root.is_null() {
            return Err(ProcessError::EmptyDocument);
        }
        Ok(Self {
            root,
            options,
            examples: ExampleSynthesizer::new(root),
            anchors: AnchorGenerator::new(options.url_encode_anchors),
        })
    }

    pub fn run(mut self) -> Result<TemplateData, ProcessError> {
        let info = self.info();
        let servers = self.servers();
        let endpoints = self.endpoints()?;
        let resources = self.resources(&endpoints);
        let schemas = self.schemas();
        let has_auth = self.document_has_auth() || endpoints.iter().any(|e| e.requires_auth);

        Ok(TemplateData {
            info,
            servers,
            has_auth,
            endpoints,
            resources,
            schemas,
            exclude_brand: self.options.exclude_brand,
            version: self.options.version.clone(),
            timestamp: self.options.timestamp.clone(),
        })
    }

    fn info(&self) -> ApiInfo {
        let info = self.root.get("info").cloned().unwrap_or(Value::Null);
        ApiInfo {
            title: text(&info, "title").unwrap_or_else(|| "API Documentation".to_string()),
            description: text(&info, "description"),
            version: text(&info, "version").unwrap_or_else(|| "1.0.0".to_string()),
        }
    }

    fn servers(&self) -> Vec<ServerView> {
        let mut servers: Vec<ServerView> = self
            .root
            .get("servers")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|server| {
                        Some(ServerView {
                            url: text(server, "url")?,
                            description: text(server, "description"),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        if servers.is_empty()
            && let Some(base) = &self.options.base_url
        {
            servers.push(ServerView {
                url: base.clone(),
                description: None,
            });
        }
        servers
    }

    fn endpoints(&mut self) -> Result<Vec<Endpoint>, ProcessError> {
        let root = self.root;
        let mut out = Vec::new();
        let Some(paths) = root.get("paths").and_then(Value::as_object) else {
            return Ok(out);
        };

        for (path, item) in paths {
            let Some(item_obj) = item.as_object() else {
                continue;
            };
            let path_params = resolve_parameter_list(root, item_obj.get("parameters"));
            for method in METHODS {
                if let Some(op) = item_obj.get(method).filter(|op| op.is_object()) {
                    out.push(self.endpoint(method, path, op, &path_params)?);
                }
            }
        }
        Ok(out)
    }

    fn endpoint(
        &mut self,
        method: &str,
        path: &str,
        op: &Value,
        path_params: &[Value],
    ) -> Result<Endpoint, ProcessError> {
        let method = method.to_uppercase();
        let summary = text(op, "summary");

        // Tags are mandatory: grouping has no sensible default bucket.
        let tag = first_tag(op).ok_or_else(|| ProcessError::MissingTags {
            method: method.clone(),
            path: path.to_string(),
            summary: summary.clone().unwrap_or_else(|| "no summary".to_string()),
        })?;

        let op_params = resolve_parameter_list(self.root, op.get("parameters"));
        let merged = merge_parameters(path_params, &op_params);

        let requires_auth = self.operation_requires_auth(op);
        let headers = self.header_lines(&merged, requires_auth);
        let parameters = merged
            .iter()
            .map(|param| self.parameter_view(param))
            .collect();

        let anchor_text = summary
            .clone()
            .unwrap_or_else(|| format!("{method} {path}"));

        Ok(Endpoint {
            anchor: self.anchors.anchor(&anchor_text),
            method,
            path: path.to_string(),
            summary,
            description: text(op, "description"),
            tag,
            deprecated: op.get("deprecated").and_then(Value::as_bool).unwrap_or(false),
            parameters,
            headers,
            request_body: self.request_body_view(op),
            responses: self.response_views(op),
            requires_auth,
        })
    }

    fn parameter_view(&mut self, param: &Value) -> ParameterView {
        let schema = param.get("schema").cloned().unwrap_or(Value::Null);
        let example = explicit_example(param)
            .cloned()
            .unwrap_or_else(|| self.examples.synthesize(&schema, 0));

        ParameterView {
            name: text(param, "name").unwrap_or_default(),
            location: text(param, "in").unwrap_or_else(|| "query".to_string()),
            required: param.get("required").and_then(Value::as_bool).unwrap_or(false),
            description: text(param, "description"),
            param_type: self.type_label(&schema),
            example: scalar_text(&example),
        }
    }

    /// Header lines for code samples: header parameters from the merged
    /// list, plus a synthesized auth header when the operation requires
    /// auth — unless a same-named header is already declared explicitly.
    fn header_lines(&mut self, merged: &[Value], requires_auth: bool) -> Vec<HeaderLine> {
        let mut lines: Vec<HeaderLine> = Vec::new();
        for param in merged {
            if text(param, "in").as_deref() != Some("header") {
                continue;
            }
            let Some(name) = text(param, "name") else {
                continue;
            };
            let schema = param.get("schema").cloned().unwrap_or(Value::Null);
            let example = explicit_example(param)
                .cloned()
                .unwrap_or_else(|| self.examples.synthesize(&schema, 0));
            lines.push(HeaderLine {
                name,
                value: scalar_text(&example),
            });
        }

        if requires_auth
            && let Some(auth) = self.auth_header()
            && !lines.iter().any(|l| l.name.eq_ignore_ascii_case(&auth.name))
        {
            lines.push(auth);
        }
        lines
    }

    /// Synthesize an example auth header from the first declared security
    /// scheme. An apiKey scheme that lives in the query or a cookie yields
    /// no header line.
    fn auth_header(&self) -> Option<HeaderLine> {
        let schemes = resolve(self.root, "#/components/securitySchemes")?.as_object()?;
        let (_, scheme) = schemes.iter().next()?;

        match scheme.get("type").and_then(Value::as_str) {
            Some("apiKey") => {
                let location = text(scheme, "in").unwrap_or_else(|| "header".to_string());
                if location != "header" {
                    return None;
                }
                Some(HeaderLine {
                    name: text(scheme, "name").unwrap_or_else(|| "X-API-Key".to_string()),
                    value: "YOUR_API_KEY".to_string(),
                })
            }
            Some("http") if text(scheme, "scheme").as_deref() == Some("basic") => {
                Some(HeaderLine {
                    name: "Authorization".to_string(),
                    value: "Basic YOUR_CREDENTIALS".to_string(),
                })
            }
            _ => Some(HeaderLine {
                name: "Authorization".to_string(),
                value: "Bearer YOUR_ACCESS_TOKEN".to_string(),
            }),
        }
    }

    /// An operation requires auth when it declares non-empty `security`
    /// explicitly, or declares none and the document carries global
    /// security or any security scheme. An explicit empty `security` array
    /// opts the operation out even under global security.
    fn operation_requires_auth(&self, op: &Value) -> bool {
        match op.get("security") {
            Some(Value::Array(list)) => !list.is_empty(),
            _ => self.document_has_auth(),
        }
    }

    fn document_has_auth(&self) -> bool {
        let global = self
            .root
            .get("security")
            .and_then(Value::as_array)
            .is_some_and(|list| !list.is_empty());
        let has_schemes = resolve(self.root, "#/components/securitySchemes")
            .and_then(Value::as_object)
            .is_some_and(|schemes| !schemes.is_empty());
        global || has_schemes
    }

    fn request_body_view(&mut self, op: &Value) -> Option<RequestBodyView> {
        let raw = op.get("requestBody")?;
        let body = self.deref_node(raw)?;
        let content = body.get("content").and_then(Value::as_object)?;
        let (content_type, media) = preferred_media(content)?;

        let example = self.media_example(media);
        Some(RequestBodyView {
            content_type: content_type.clone(),
            required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
            description: text(&body, "description"),
            example: render_example(&example, content_type, &xml_root_tag(media)),
        })
    }

    fn response_views(&mut self, op: &Value) -> Vec<ResponseView> {
        let root = self.root;
        let Some(responses) = op.get("responses").and_then(Value::as_object) else {
            return Vec::new();
        };

        responses
            .iter()
            .filter_map(|(status, raw)| {
                let response = match raw.get("$ref").and_then(Value::as_str) {
                    Some(pointer) => resolve(root, pointer)?.clone(),
                    None => raw.clone(),
                };
                let media = response
                    .get("content")
                    .and_then(Value::as_object)
                    .and_then(preferred_media);
                let (content_type, example) = match media {
                    Some((content_type, media)) => {
                        let example = self.media_example(media);
                        (
                            Some(content_type.clone()),
                            Some(render_example(&example, content_type, &xml_root_tag(media))),
                        )
                    }
                    None => (None, None),
                };
                Some(ResponseView {
                    status: status.clone(),
                    description: text(&response, "description"),
                    content_type,
                    example,
                })
            })
            .collect()
    }

    /// Example value for a media-type node: its explicit example, else one
    /// synthesized from its schema.
    fn media_example(&mut self, media: &Value) -> Value {
        if let Some(example) = explicit_example(media) {
            return example.clone();
        }
        let schema = media.get("schema").cloned().unwrap_or(Value::Null);
        self.examples.synthesize(&schema, 0)
    }

    /// Group endpoints into resources by first tag, then order them:
    /// configured tags first (in configured order, matched
    /// case-insensitively), remaining tags alphabetically.
    fn resources(&self, endpoints: &[Endpoint]) -> Vec<Resource> {
        let mut groups: IndexMap<String, Vec<Endpoint>> = IndexMap::new();
        for endpoint in endpoints {
            groups
                .entry(endpoint.tag.clone())
                .or_default()
                .push(endpoint.clone());
        }

        let mut ordered: Vec<(String, Vec<Endpoint>)> = Vec::new();
        for configured in &self.options.tag_order {
            let found = groups
                .keys()
                .find(|tag| tag.eq_ignore_ascii_case(configured))
                .cloned();
            if let Some(tag) = found
                && let Some(group) = groups.shift_remove(&tag)
            {
                ordered.push((tag, group));
            }
        }

        let mut remaining: Vec<(String, Vec<Endpoint>)> = groups.into_iter().collect();
        remaining.sort_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()));
        ordered.extend(remaining);

        ordered
            .into_iter()
            .map(|(tag, endpoints)| Resource {
                slug: normalize_name(&tag).snake_case,
                description: self.tag_description(&tag),
                name: tag,
                endpoints,
            })
            .collect()
    }

    fn tag_description(&self, name: &str) -> Option<String> {
        self.root
            .get("tags")
            .and_then(Value::as_array)?
            .iter()
            .find(|tag| tag.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|tag| text(tag, "description"))
    }

    fn schemas(&mut self) -> Vec<SchemaModel> {
        let root = self.root;
        let Some(schemas) = resolve(root, "#/components/schemas").and_then(Value::as_object) else {
            return Vec::new();
        };

        schemas
            .iter()
            .map(|(name, raw)| {
                let normalized = normalize(root, raw).unwrap_or_else(|| json!({}));
                let example = self.examples.synthesize(raw, 0);
                let fields = self.schema_fields(&normalized);
                SchemaModel {
                    name: normalize_name(name),
                    description: text(&normalized, "description").or_else(|| text(raw, "description")),
                    fields,
                    example: render_example(&example, "application/json", name),
                }
            })
            .collect()
    }

    fn schema_fields(&mut self, normalized: &Value) -> Vec<FieldView> {
        let required: Vec<&str> = normalized
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        normalized
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| FieldView {
                        name: name.clone(),
                        field_type: self.type_label(property),
                        required: required.contains(&name.as_str()),
                        description: text(property, "description"),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Follow a single `$ref` on a non-schema node (request body, response).
    fn deref_node(&self, node: &Value) -> Option<Value> {
        match node.get("$ref").and_then(Value::as_str) {
            Some(pointer) => resolve(self.root, pointer).cloned(),
            None => Some(node.clone()),
        }
    }

    /// Human-readable label for a schema's type, following one level of
    /// array nesting ("array of string").
    fn type_label(&self, schema: &Value) -> String {
        let Some(normalized) = normalize(self.root, schema) else {
            // Unresolvable ref — label with the target name it pointed at.
            return schema
                .get("$ref")
                .and_then(Value::as_str)
                .map(ref_tail)
                .unwrap_or_else(|| "object".to_string());
        };
        if let Some(pointer) = normalized.get("$ref").and_then(Value::as_str) {
            // Circular chain left unexpanded — label with the target name.
            return ref_tail(pointer);
        }
        match normalized.get("type").and_then(Value::as_str) {
            Some("array") => {
                let items = normalized.get("items").cloned().unwrap_or(Value::Null);
                format!("array of {}", self.type_label(&items))
            }
            Some(keyword) => keyword.to_string(),
            None if normalized.get("properties").is_some() => "object".to_string(),
            None => "any".to_string(),
        }
    }
}

/// Merge path-level and operation-level parameters keyed by (name, in).
/// An operation-level parameter replaces a same-keyed path-level one
/// entirely; new operation-level parameters append in declaration order.
fn merge_parameters(path_params: &[Value], op_params: &[Value]) -> Vec<Value> {
    let mut merged: Vec<Value> = path_params.to_vec();
    for param in op_params {
        if let Some(key) = param_key(param)
            && let Some(slot) = merged
                .iter_mut()
                .find(|existing| param_key(existing).as_ref() == Some(&key))
        {
            *slot = param.clone();
            continue;
        }
        merged.push(param.clone());
    }
    merged
}

fn param_key(param: &Value) -> Option<(String, String)> {
    Some((text(param, "name")?, text(param, "in")?))
}

/// Prefer `application/json`, fall back to the first declared content type.
fn preferred_media(content: &serde_json::Map<String, Value>) -> Option<(&String, &Value)> {
    content
        .get_key_value("application/json")
        .or_else(|| content.iter().next())
}

/// Root tag for XML example rendering: the schema's ref target name when
/// one is declared, else a generic root.
fn xml_root_tag(media: &Value) -> String {
    media
        .get("schema")
        .and_then(|schema| schema.get("$ref"))
        .and_then(Value::as_str)
        .map(ref_tail)
        .unwrap_or_else(|| "root".to_string())
}

fn ref_tail(pointer: &str) -> String {
    pointer.rsplit('/').next().unwrap_or(pointer).to_string()
}

fn text(node: &Value, key: &str) -> Option<String> {
    node.get(key)?.as_str().map(str::to_string)
}

fn first_tag(op: &Value) -> Option<String> {
    op.get("tags")?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_string)
}
