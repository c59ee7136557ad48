use super::build::{build_operations, collect_components, resolve_base_url, METHODS};
use super::types::{OperationCollection, SchemaNode};
use crate::config::GenerationOptions;
use crate::validator::{log_issues, ValidationIssue};
use anyhow::Context;
use indexmap::IndexMap;
use oas3::OpenApiV3Spec;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("OpenAPI document must be a JSON object")]
    NotAnObject,
    #[error("OpenAPI document has no `paths` object")]
    MissingPaths,
    #[error("failed to convert OpenAPI document: {0}")]
    Conversion(#[from] serde_json::Error),
}

/// An OpenAPI document reduced to what mock generation needs.
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    /// `info.title`, empty when absent.
    pub title: String,
    /// Prefix applied to every handler route.
    pub base_url: String,
    pub operations: OperationCollection,
    /// `components.schemas`, references expanded.
    pub components: IndexMap<String, SchemaNode>,
    pub issues: Vec<ValidationIssue>,
}

fn strip_unknown_verbs(val: &mut Value) {
    if let Some(Value::Object(paths_map)) = val.get_mut("paths") {
        for item in paths_map.values_mut() {
            if let Value::Object(obj) = item {
                obj.retain(|k, _| {
                    let lk = k.to_ascii_lowercase();
                    match lk.as_str() {
                        "summary" | "description" | "servers" | "parameters" | "$ref" => true,
                        m if METHODS.contains(&m) => true,
                        _ => k.starts_with("x-"),
                    }
                });
            }
        }
    }
}

/// Check the document against the typed OpenAPI model.
///
/// The typed model is stricter than generation needs (it targets 3.1), so a mismatch is
/// reported as an issue rather than an error.
fn check_typed_model(value: &Value, issues: &mut Vec<ValidationIssue>) {
    if let Err(err) = serde_json::from_value::<OpenApiV3Spec>(value.clone()) {
        issues.push(ValidationIssue::new(
            "#",
            "NonConformingDocument",
            format!("document does not match the OpenAPI 3 model: {err}"),
        ));
    }
}

/// Reduce an already-parsed OpenAPI document.
///
/// Key order of `value` is preserved, so operations and their responses come out in
/// declaration order.
///
/// # Errors
///
/// Returns [`SpecError`] when the document is not an object or has no `paths` object.
pub fn load_spec_from_value(mut value: Value, options: &GenerationOptions) -> anyhow::Result<LoadedSpec> {
    if !value.is_object() {
        return Err(SpecError::NotAnObject.into());
    }
    if !value.get("paths").is_some_and(Value::is_object) {
        return Err(SpecError::MissingPaths.into());
    }

    let mut issues = Vec::new();
    strip_unknown_verbs(&mut value);
    check_typed_model(&value, &mut issues);

    let title = value
        .get("info")
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let base_url = resolve_base_url(&value, options);
    let operations = build_operations(&value, options, &mut issues);
    let components = collect_components(&value, &mut issues);

    tracing::info!(
        title = %title,
        operations = operations.len(),
        components = components.len(),
        issues = issues.len(),
        "loaded OpenAPI document"
    );
    log_issues(&issues);

    Ok(LoadedSpec {
        title,
        base_url,
        operations,
        components,
        issues,
    })
}

/// Reduce a typed [`OpenApiV3Spec`].
///
/// The typed model stores paths and responses in sorted maps, so declaration order is
/// not recoverable here; prefer [`load_spec_from_value`] when rotation order matters.
pub fn load_spec_from_spec(spec: &OpenApiV3Spec, options: &GenerationOptions) -> anyhow::Result<LoadedSpec> {
    let value = serde_json::to_value(spec)
        .map_err(SpecError::from)
        .context("serializing typed OpenAPI document")?;
    load_spec_from_value(value, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_unknown_verbs() {
        let mut v = json!({
            "paths": {
                "/x": { "get": {}, "patch": {}, "unknown": {}, "x-extra": {} }
            }
        });
        strip_unknown_verbs(&mut v);
        assert!(v["paths"]["/x"].get("unknown").is_none());
        assert!(v["paths"]["/x"].get("patch").is_some());
        assert!(v["paths"]["/x"].get("x-extra").is_some());
    }

    #[test]
    fn test_rejects_non_object() {
        let err = load_spec_from_value(json!([1, 2]), &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<SpecError>(), Some(SpecError::NotAnObject)));
    }

    #[test]
    fn test_rejects_missing_paths() {
        let err = load_spec_from_value(json!({"openapi": "3.0.0"}), &GenerationOptions::default())
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<SpecError>(), Some(SpecError::MissingPaths)));
    }
}
