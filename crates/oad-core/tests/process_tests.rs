use oad_core::error::ProcessError;
use oad_core::parse::{self, Document};
use oad_core::process::{ProcessOptions, process, process_with_options};
use serde_json::{Value, json};

const AVIARY: &str = include_str!("fixtures/aviary.yaml");
const TRACING_GROUPS: &str = include_str!("fixtures/tracing-groups.yaml");
const MISSING_TAGS: &str = include_str!("fixtures/missing-tags.yaml");

fn options() -> ProcessOptions {
    ProcessOptions {
        version: "0.0.0-test".to_string(),
        timestamp: "2026-08-07T00:00:00Z".to_string(),
        ..ProcessOptions::default()
    }
}

#[test]
fn processes_info_and_servers() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    assert_eq!(data.info.title, "Aviary API");
    assert_eq!(data.info.version, "2.1.0");
    assert_eq!(data.servers.len(), 1);
    assert_eq!(data.servers[0].url, "https://api.aviary.dev/v1");
}

#[test]
fn endpoints_follow_declaration_order() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let listing: Vec<(&str, &str)> = data
        .endpoints
        .iter()
        .map(|e| (e.method.as_str(), e.path.as_str()))
        .collect();
    assert_eq!(
        listing,
        [
            ("GET", "/birds"),
            ("POST", "/birds"),
            ("GET", "/sightings"),
            ("GET", "/health"),
        ]
    );
}

#[test]
fn operation_parameter_overrides_path_parameter() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let list_birds = &data.endpoints[0];
    // limit (resolved from a component ref) + format, exactly once each.
    assert_eq!(list_birds.parameters.len(), 2);
    assert_eq!(list_birds.parameters[0].name, "limit");

    let format: Vec<_> = list_birds
        .parameters
        .iter()
        .filter(|p| p.name == "format")
        .collect();
    assert_eq!(format.len(), 1);
    // The operation-level definition wins entirely.
    assert_eq!(
        format[0].description.as_deref(),
        Some("Operation-level response format")
    );
    assert_eq!(format[0].example, "json");
}

#[test]
fn global_security_injects_bearer_header() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    assert!(data.has_auth);
    let list_birds = &data.endpoints[0];
    assert!(list_birds.requires_auth);
    assert!(
        list_birds
            .headers
            .iter()
            .any(|h| h.name == "Authorization" && h.value == "Bearer YOUR_ACCESS_TOKEN")
    );
}

#[test]
fn explicit_empty_security_is_exempt() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let sightings = data
        .endpoints
        .iter()
        .find(|e| e.path == "/sightings")
        .unwrap();
    assert!(!sightings.requires_auth);
    assert!(sightings.headers.is_empty());
}

#[test]
fn anchors_preserve_unicode_in_both_modes() {
    let doc = parse::from_yaml(AVIARY).unwrap();

    let preserved = process(&doc).unwrap();
    let sightings = preserved
        .endpoints
        .iter()
        .find(|e| e.path == "/sightings")
        .unwrap();
    assert_eq!(sightings.anchor, "Kullanıcıları-getir-🚀");

    let folded_options = ProcessOptions {
        url_encode_anchors: false,
        ..options()
    };
    let folded = process_with_options(&doc, &folded_options).unwrap();
    let sightings = folded
        .endpoints
        .iter()
        .find(|e| e.path == "/sightings")
        .unwrap();
    assert_eq!(sightings.anchor, "kullanıcıları-getir-🚀");
}

#[test]
fn resources_order_alphabetically_by_default() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let names: Vec<_> = data.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Birds", "Ops", "Sightings"]);
    assert_eq!(
        data.resources[0].description.as_deref(),
        Some("Manage tracked birds.")
    );
}

#[test]
fn configured_tag_order_comes_first() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let tag_options = ProcessOptions {
        // Case-insensitive match against declared tags.
        tag_order: vec!["sightings".to_string(), "Ops".to_string()],
        ..options()
    };
    let data = process_with_options(&doc, &tag_options).unwrap();

    let names: Vec<_> = data.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Sightings", "Ops", "Birds"]);
}

#[test]
fn referenced_response_is_resolved() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let register = data
        .endpoints
        .iter()
        .find(|e| e.method == "POST" && e.path == "/birds")
        .unwrap();
    let created = register.responses.iter().find(|r| r.status == "201").unwrap();
    assert_eq!(created.description.as_deref(), Some("The registered bird"));
    assert_eq!(created.content_type.as_deref(), Some("application/json"));
    let example = created.example.as_deref().unwrap();
    assert!(example.contains("\"id\": 0"));
    assert!(example.contains("\"name\": \"string\""));
}

#[test]
fn all_of_request_body_is_flattened() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let register = data
        .endpoints
        .iter()
        .find(|e| e.method == "POST" && e.path == "/birds")
        .unwrap();
    let body = register.request_body.as_ref().unwrap();
    assert!(body.required);
    assert_eq!(body.content_type, "application/json");
    // Fields from both allOf members are present.
    assert!(body.example.contains("\"id\": 0"));
    assert!(body.example.contains("\"notes\": \"string\""));
}

#[test]
fn cyclic_schema_terminates_with_sentinel() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process(&doc).unwrap();

    let bird = data
        .schemas
        .iter()
        .find(|s| s.name.original == "Bird")
        .unwrap();
    // Bird -> Nest -> chicks[] -> Bird is a legitimate cycle; the example
    // must bottom out at the depth ceiling instead of recursing forever.
    assert!(bird.example.contains("[Max depth exceeded]"));
    assert!(bird.example.contains("\"active\""));

    let id = bird.fields.iter().find(|f| f.name == "id").unwrap();
    assert!(id.required);
    assert_eq!(id.field_type, "integer");
    let nest = bird.fields.iter().find(|f| f.name == "nest").unwrap();
    assert!(!nest.required);
    assert_eq!(nest.field_type, "object");
}

#[test]
fn header_group_plus_auth_yields_exactly_three_headers() {
    let doc = parse::from_yaml(TRACING_GROUPS).unwrap();
    let data = process(&doc).unwrap();

    let reports = data
        .endpoints
        .iter()
        .find(|e| e.path == "/reports")
        .unwrap();
    let names: Vec<_> = reports.headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, ["X-Request-Id", "X-Client-Version", "Authorization"]);
}

#[test]
fn explicit_auth_header_suppresses_injection() {
    let doc = parse::from_yaml(TRACING_GROUPS).unwrap();
    let data = process(&doc).unwrap();

    let export = data
        .endpoints
        .iter()
        .find(|e| e.path == "/reports/export")
        .unwrap();
    assert!(export.requires_auth);
    // The explicitly declared Authorization parameter wins; no duplicate.
    assert_eq!(export.headers.len(), 1);
    assert_eq!(export.headers[0].name, "Authorization");
    assert_eq!(export.headers[0].value, "string");
}

#[test]
fn missing_tags_is_a_fatal_error() {
    let doc = parse::from_yaml(MISSING_TAGS).unwrap();
    let err = process(&doc).unwrap_err();

    match &err {
        ProcessError::MissingTags { path, summary, .. } => {
            assert_eq!(path, "/orphans");
            assert_eq!(summary, "List orphans");
        }
        other => panic!("expected MissingTags, got {other:?}"),
    }
    assert!(err.to_string().contains("/orphans"));
}

#[test]
fn null_document_is_a_fatal_error() {
    let doc = Document::new(Value::Null);
    assert!(matches!(process(&doc), Err(ProcessError::EmptyDocument)));
}

#[test]
fn absent_sections_degrade_to_defaults() {
    let doc = Document::new(json!({"openapi": "3.1.0"}));
    let data = process(&doc).unwrap();

    assert_eq!(data.info.title, "API Documentation");
    assert_eq!(data.info.version, "1.0.0");
    assert!(data.servers.is_empty());
    assert!(data.endpoints.is_empty());
    assert!(data.resources.is_empty());
    assert!(data.schemas.is_empty());
    assert!(!data.has_auth);
}

#[test]
fn base_url_fills_in_missing_servers() {
    let doc = Document::new(json!({"info": {"title": "Bare", "version": "1.0"}}));
    let with_base = ProcessOptions {
        base_url: Some("https://api.example.com".to_string()),
        ..options()
    };
    let data = process_with_options(&doc, &with_base).unwrap();
    assert_eq!(data.servers.len(), 1);
    assert_eq!(data.servers[0].url, "https://api.example.com");
}

#[test]
fn xml_and_form_examples_render_per_content_type() {
    let doc = Document::new(json!({
        "openapi": "3.0.0",
        "info": {"title": "Mixed Media", "version": "1.0"},
        "paths": {
            "/widgets": {
                "post": {
                    "summary": "Create a widget",
                    "tags": ["Widgets"],
                    "requestBody": {
                        "content": {
                            "application/xml": {
                                "schema": {
                                    "type": "object",
                                    "properties": {"name": {"type": "string"}}
                                }
                            }
                        }
                    },
                    "responses": {"201": {"description": "created"}}
                }
            },
            "/widgets/search": {
                "post": {
                    "summary": "Search widgets",
                    "tags": ["Widgets"],
                    "requestBody": {
                        "content": {
                            "application/x-www-form-urlencoded": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "q": {"type": "string"},
                                        "limit": {"type": "integer"}
                                    }
                                }
                            }
                        }
                    },
                    "responses": {"200": {"description": "ok"}}
                }
            }
        }
    }));
    let data = process(&doc).unwrap();

    let create = data.endpoints.iter().find(|e| e.path == "/widgets").unwrap();
    assert_eq!(
        create.request_body.as_ref().unwrap().example,
        "<root><name>string</name></root>"
    );

    let search = data
        .endpoints
        .iter()
        .find(|e| e.path == "/widgets/search")
        .unwrap();
    assert_eq!(
        search.request_body.as_ref().unwrap().example,
        "q=string&limit=0"
    );
}

#[test]
fn processing_is_idempotent() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let opts = options();
    let first = process_with_options(&doc, &opts).unwrap();
    let second = process_with_options(&doc, &opts).unwrap();

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn version_and_timestamp_pass_through() {
    let doc = parse::from_yaml(AVIARY).unwrap();
    let data = process_with_options(&doc, &options()).unwrap();
    assert_eq!(data.version, "0.0.0-test");
    assert_eq!(data.timestamp, "2026-08-07T00:00:00Z");
}
