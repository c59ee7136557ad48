use super::types::{Operation, OperationCollection, ResponseEntry, SchemaNode};
use crate::config::GenerationOptions;
use crate::validator::ValidationIssue;
use http::Method;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// HTTP verbs recognised in a path item.
pub const METHODS: [&str; 8] = ["get", "post", "put", "delete", "patch", "options", "head", "trace"];

/// Verbs with a matching `rest.<verb>` handler factory in msw.
pub const MOCKABLE_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "options", "head"];

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const RESPONSE_REF_PREFIX: &str = "#/components/responses/";

#[allow(clippy::expect_used)]
static PATH_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}/]+)\}").expect("path parameter regex should be valid"));

/// Convert an OpenAPI path template into msw route syntax: `/pets/{petId}` → `/pets/:petId`.
pub fn to_route_path(path: &str) -> String {
    PATH_PARAM.replace_all(path, ":$1").into_owned()
}

fn components_of<'a>(doc: &'a Value, section: &str) -> Option<&'a Map<String, Value>> {
    doc.get("components")?.get(section)?.as_object()
}

/// Resolve a `#/components/schemas/*` pointer against the document.
pub fn resolve_schema_ref<'a>(doc: &'a Value, ref_path: &str) -> Option<&'a Value> {
    let name = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
    components_of(doc, "schemas")?.get(name)
}

fn resolve_response_ref<'a>(doc: &'a Value, ref_path: &str) -> Option<&'a Value> {
    let name = ref_path.strip_prefix(RESPONSE_REF_PREFIX)?;
    components_of(doc, "responses")?.get(name)
}

/// Recursively expand `$ref` references in a schema value.
///
/// Each expanded node is replaced by the component definition plus an `x-ref-name`
/// marker carrying the component name. A reference that recurs on its own expansion
/// chain is left as a bare `$ref`.
pub fn expand_schema_refs(doc: &Value, value: &mut Value) {
    let mut chain = Vec::new();
    expand_with_chain(doc, value, &mut chain);
}

fn expand_with_chain(doc: &Value, value: &mut Value, chain: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            if let Some(ref_path) = obj.get("$ref").and_then(|v| v.as_str()).map(str::to_owned) {
                let Some(name) = ref_path.strip_prefix(SCHEMA_REF_PREFIX) else {
                    return;
                };
                if chain.iter().any(|seen| seen == name) {
                    return;
                }
                if let Some(resolved) = resolve_schema_ref(doc, &ref_path) {
                    let mut new_val = resolved.clone();
                    chain.push(name.to_string());
                    expand_with_chain(doc, &mut new_val, chain);
                    chain.pop();
                    if let Value::Object(o) = &mut new_val {
                        o.insert("x-ref-name".to_string(), Value::String(name.to_string()));
                    }
                    *value = new_val;
                }
                return;
            }
            for v in obj.values_mut() {
                expand_with_chain(doc, v, chain);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                expand_with_chain(doc, v, chain);
            }
        }
        _ => {}
    }
}

fn unresolved_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            if let Some(r) = obj.get("$ref").and_then(|v| v.as_str()) {
                out.push(r.to_string());
            }
            obj.values().for_each(|v| unresolved_refs(v, out));
        }
        Value::Array(arr) => arr.iter().for_each(|v| unresolved_refs(v, out)),
        _ => {}
    }
}

/// Replace boolean sub-schemas (`true`/`false`, allowed since OpenAPI 3.1) with `{}`.
///
/// Only schema positions are rewritten; `additionalProperties: true` keeps its meaning.
pub fn normalize_boolean_schemas(value: &mut Value) {
    if value.is_boolean() {
        *value = Value::Object(Map::new());
        return;
    }
    let Value::Object(obj) = value else {
        return;
    };
    if let Some(Value::Object(props)) = obj.get_mut("properties") {
        props.values_mut().for_each(normalize_boolean_schemas);
    }
    if let Some(items) = obj.get_mut("items") {
        normalize_boolean_schemas(items);
    }
    if let Some(extra) = obj.get_mut("additionalProperties").filter(|v| v.is_object()) {
        normalize_boolean_schemas(extra);
    }
    for key in ["allOf", "oneOf", "anyOf"] {
        if let Some(Value::Array(list)) = obj.get_mut(key) {
            list.iter_mut().for_each(normalize_boolean_schemas);
        }
    }
}

fn parse_schema(mut value: Value, location: &str, issues: &mut Vec<ValidationIssue>) -> Option<SchemaNode> {
    normalize_boolean_schemas(&mut value);
    match serde_json::from_value::<SchemaNode>(value) {
        Ok(schema) => Some(schema),
        Err(err) => {
            issues.push(ValidationIssue::new(
                location,
                "InvalidSchema",
                format!("schema ignored, body will be null: {err}"),
            ));
            None
        }
    }
}

/// Pull the media-type level example (`example`, or the first `examples` entry).
fn media_example(media: &Value) -> Option<Value> {
    if let Some(example) = media.get("example").filter(|v| !v.is_null()) {
        return Some(example.clone());
    }
    media
        .get("examples")?
        .as_object()?
        .values()
        .find_map(|ex| ex.get("value").filter(|v| !v.is_null()).cloned())
}

/// Extract the body schemas of one response, keyed by media type.
///
/// A media-type `example` is carried onto the schema when the schema has none, so the
/// documented example is served verbatim.
pub fn extract_response_content(
    doc: &Value,
    response: &Value,
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) -> IndexMap<String, SchemaNode> {
    let mut content = IndexMap::new();
    let Some(media_map) = response.get("content").and_then(|c| c.as_object()) else {
        return content;
    };
    for (media_type, media) in media_map {
        let media_location = format!("{location} → {media_type}");
        let example = media_example(media);
        let mut schema = match media.get("schema") {
            Some(raw) => {
                let mut raw = raw.clone();
                expand_schema_refs(doc, &mut raw);
                let mut dangling = Vec::new();
                unresolved_refs(&raw, &mut dangling);
                for r in dangling {
                    if resolve_schema_ref(doc, &r).is_none() {
                        issues.push(ValidationIssue::new(
                            &media_location,
                            "UnresolvedRef",
                            format!("reference {r} does not resolve"),
                        ));
                    }
                }
                parse_schema(raw, &media_location, issues)
            }
            None => None,
        };
        if let Some(example) = example {
            let node = schema.get_or_insert_with(SchemaNode::default);
            if node.example.is_none() {
                node.example = Some(example);
            }
        }
        if let Some(schema) = schema {
            content.insert(media_type.clone(), schema);
        }
    }
    content
}

/// Build the ordered response list of one operation.
pub fn extract_responses(
    doc: &Value,
    operation: &Value,
    location: &str,
    options: &GenerationOptions,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<ResponseEntry> {
    let id = operation
        .get("operationId")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned);
    if id.is_none() {
        issues.push(ValidationIssue::new(
            location,
            "MissingOperationId",
            "no operationId; responses are served with a null body",
        ));
    }

    let mut out = Vec::new();
    let Some(responses) = operation.get("responses").and_then(|r| r.as_object()) else {
        return out;
    };
    for (code, response) in responses {
        if code.trim().parse::<u16>().is_err() {
            issues.push(ValidationIssue::new(
                location,
                "NonNumericStatus",
                format!("response '{code}' skipped"),
            ));
            continue;
        }
        if !options.accepts_code(code) {
            continue;
        }
        let response = match response.get("$ref").and_then(|r| r.as_str()) {
            Some(r) => match resolve_response_ref(doc, r) {
                Some(resolved) => resolved,
                None => {
                    issues.push(ValidationIssue::new(
                        location,
                        "UnresolvedRef",
                        format!("response reference {r} does not resolve"),
                    ));
                    &Value::Null
                }
            },
            None => response,
        };
        out.push(ResponseEntry {
            code: code.trim().to_string(),
            id: id.clone(),
            content: extract_response_content(doc, response, &format!("{location} → {code}"), issues),
        });
    }
    out
}

/// Reduce an OpenAPI document to its operations, in document order.
///
/// Paths filtered out by `includes`/`excludes` are skipped silently; operations left
/// without any response are skipped with an issue.
pub fn build_operations(
    doc: &Value,
    options: &GenerationOptions,
    issues: &mut Vec<ValidationIssue>,
) -> OperationCollection {
    let mut operations = Vec::new();
    let Some(paths) = doc.get("paths").and_then(|p| p.as_object()) else {
        return operations;
    };
    for (path, item) in paths {
        if !options.accepts_path(path) {
            tracing::debug!(path = %path, "path filtered out");
            continue;
        }
        let Some(item) = item.as_object() else {
            continue;
        };
        for (key, operation) in item {
            let verb = key.to_ascii_lowercase();
            if !METHODS.contains(&verb.as_str()) {
                continue;
            }
            if !MOCKABLE_METHODS.contains(&verb.as_str()) {
                issues.push(ValidationIssue::new(
                    format!("{path} → {verb}"),
                    "UnsupportedMethod",
                    "msw has no handler for this verb; operation not mocked",
                ));
                continue;
            }
            let Ok(method) = Method::from_bytes(verb.to_ascii_uppercase().as_bytes()) else {
                continue;
            };
            let location = format!("{path} → {verb}");
            let responses = extract_responses(doc, operation, &location, options, issues);
            if responses.is_empty() {
                issues.push(ValidationIssue::new(
                    &location,
                    "NoResponses",
                    "no numeric responses left; operation not mocked",
                ));
                continue;
            }
            operations.push(Operation {
                verb: method,
                path: to_route_path(path),
                responses,
            });
        }
    }
    operations
}

/// Component schemas with references expanded, for in-process sampling of registry
/// references.
pub fn collect_components(doc: &Value, issues: &mut Vec<ValidationIssue>) -> IndexMap<String, SchemaNode> {
    let mut out = IndexMap::new();
    let Some(schemas) = components_of(doc, "schemas") else {
        return out;
    };
    for (name, raw) in schemas {
        let mut raw = raw.clone();
        let mut chain = vec![name.clone()];
        expand_with_chain(doc, &mut raw, &mut chain);
        let location = format!("{SCHEMA_REF_PREFIX}{name}");
        if let Some(schema) = parse_schema(raw, &location, issues) {
            out.insert(name.clone(), schema);
        }
    }
    out
}

/// Base URL for the generated handlers: explicit option, else the first server URL.
pub fn resolve_base_url(doc: &Value, options: &GenerationOptions) -> String {
    let raw = options.base_url.clone().or_else(|| {
        doc.get("servers")?
            .as_array()?
            .first()?
            .get("url")?
            .as_str()
            .map(str::to_owned)
    });
    let Some(raw) = raw else {
        return String::new();
    };
    let raw = raw.trim();
    if url::Url::parse(raw).is_ok() || raw.starts_with('/') {
        raw.trim_end_matches('/').to_string()
    } else {
        tracing::warn!(url = %raw, "server URL is neither absolute nor a path; using no prefix");
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_route_path() {
        assert_eq!(to_route_path("/pets/{petId}"), "/pets/:petId");
        assert_eq!(
            to_route_path("/users/{userId}/posts/{postId}"),
            "/users/:userId/posts/:postId"
        );
        assert_eq!(to_route_path("/health"), "/health");
    }

    #[test]
    fn test_expand_schema_refs_marks_name() {
        let doc = json!({
            "components": {"schemas": {"Pet": {"type": "object", "properties": {"id": {"type": "integer"}}}}}
        });
        let mut value = json!({"type": "array", "items": {"$ref": "#/components/schemas/Pet"}});
        expand_schema_refs(&doc, &mut value);
        assert_eq!(value["items"]["x-ref-name"], "Pet");
        assert_eq!(value["items"]["properties"]["id"]["type"], "integer");
        assert!(value["items"].get("$ref").is_none());
    }

    #[test]
    fn test_expand_schema_refs_stops_on_cycles() {
        let doc = json!({
            "components": {"schemas": {"Node": {
                "type": "object",
                "properties": {"child": {"$ref": "#/components/schemas/Node"}}
            }}}
        });
        let mut value = json!({"$ref": "#/components/schemas/Node"});
        expand_schema_refs(&doc, &mut value);
        assert_eq!(value["x-ref-name"], "Node");
        assert_eq!(
            value["properties"]["child"],
            json!({"$ref": "#/components/schemas/Node"})
        );
    }

    #[test]
    fn test_normalize_boolean_schemas() {
        let mut value = json!({
            "type": "object",
            "properties": {"id": {"type": "string"}, "extra": true},
            "additionalProperties": true,
            "items": false,
            "oneOf": [true, {"type": "integer"}]
        });
        normalize_boolean_schemas(&mut value);
        assert_eq!(value["properties"]["extra"], json!({}));
        assert_eq!(value["properties"]["id"], json!({"type": "string"}));
        assert_eq!(value["additionalProperties"], json!(true));
        assert_eq!(value["items"], json!({}));
        assert_eq!(value["oneOf"][0], json!({}));
    }

    #[test]
    fn test_media_example_prefers_example() {
        assert_eq!(media_example(&json!({"example": 1})), Some(json!(1)));
        assert_eq!(
            media_example(&json!({"examples": {"a": {"value": {"x": 1}}}})),
            Some(json!({"x": 1}))
        );
        assert_eq!(media_example(&json!({})), None);
    }

    #[test]
    fn test_resolve_base_url() {
        let doc = json!({"servers": [{"url": "https://api.example.com/v1/"}]});
        let options = GenerationOptions::default();
        assert_eq!(resolve_base_url(&doc, &options), "https://api.example.com/v1");

        let relative = json!({"servers": [{"url": "/api"}]});
        assert_eq!(resolve_base_url(&relative, &options), "/api");

        let overridden = GenerationOptions {
            base_url: Some("http://localhost:3000".into()),
            ..Default::default()
        };
        assert_eq!(resolve_base_url(&doc, &overridden), "http://localhost:3000");
        assert_eq!(resolve_base_url(&json!({}), &options), "");
    }
}
