use askama::Template;
use std::fs;
use std::path::Path;

use super::operation::compile_operations;
use crate::config::GenerationOptions;
use crate::spec::{LoadedSpec, Operation};
use anyhow::Context;

/// Template data for the generated mock module
#[derive(Template)]
#[template(path = "mock.js.txt", escape = "none")]
pub struct MockModuleTemplate {
    /// API title shown in the header comment
    pub title: String,
    /// Import statements, one per line
    pub imports: Vec<String>,
    pub max_array_length: u64,
    /// Emit TypeScript annotations
    pub typescript: bool,
    /// Value of `rest.config.API_PREFIX`, already escaped
    pub base_url: String,
    /// Bootstrap with `setupServer` instead of `setupWorker`
    pub node: bool,
    /// Handler fragment
    pub handlers: String,
    /// Accessor fragment
    pub accessors: String,
}

/// Import statements for the mock module.
pub fn import_lines(options: &GenerationOptions) -> Vec<String> {
    let mut imports = vec![
        "import { rest } from 'mswx';".to_string(),
        "import { faker } from '@faker-js/faker';".to_string(),
    ];
    if let Some(path) = options.registry_import_path() {
        imports.push("import { generateMock } from '@anatine/zod-mock';".to_string());
        imports.push(format!("import {{ schemas }} from '{}';", escape_single_quoted(&path)));
    }
    if options.node {
        imports.push("import { setupServer } from 'msw/node';".to_string());
    } else {
        imports.push("import { setupWorker } from 'msw';".to_string());
    }
    imports
}

fn escape_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the complete mock module for a set of operations.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_mock_module(
    title: &str,
    operations: &[Operation],
    base_url: &str,
    options: &GenerationOptions,
) -> anyhow::Result<String> {
    let compiled = compile_operations(operations, options);
    let rendered = MockModuleTemplate {
        title: title.replace("*/", "* /").replace(['\n', '\r'], " "),
        imports: import_lines(options),
        max_array_length: options.max_array_length,
        typescript: options.is_typescript(),
        base_url: escape_single_quoted(base_url),
        node: options.node,
        handlers: compiled.handler_code(),
        accessors: compiled.accessor_code(),
    }
    .render()
    .context("rendering mock module template")?;
    tracing::debug!(
        handlers = compiled.handlers.len(),
        accessors = compiled.accessors.len(),
        bytes = rendered.len(),
        "rendered mock module"
    );
    Ok(rendered)
}

/// Render the mock module for a loaded document.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn generate_mock_module(spec: &LoadedSpec, options: &GenerationOptions) -> anyhow::Result<String> {
    render_mock_module(&spec.title, &spec.operations, &spec.base_url, options)
}

/// Write a generated mock module to disk
///
/// Parent directories are created as needed. An existing file is left untouched unless
/// `force` is set.
///
/// # Returns
///
/// `true` if the file was written, `false` if an existing file was kept.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails
pub fn write_mock_file(path: &Path, contents: &str, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        tracing::warn!(path = %path.display(), "skipping existing mock file");
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "generated mock module");
    Ok(true)
}
