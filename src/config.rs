//! # Generation Options
//!
//! Options controlling how an OpenAPI document is turned into mock handlers.
//!
//! [`GenerationOptions`] deserializes from a host tool's configuration (camelCase keys,
//! every field optional) and can be adjusted from the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `MOCKGEN_MAX_ARRAY_LENGTH` | `max_array_length` |
//! | `MOCKGEN_BASE_URL` | `base_url` |
//! | `MOCKGEN_NODE` | `node` (`1`/`true`/`yes`) |
//!
//! ```rust
//! use mockgen::config::GenerationOptions;
//!
//! let options = GenerationOptions {
//!     output: "src/mocks/handlers.ts".into(),
//!     ..Default::default()
//! };
//! assert!(options.is_typescript());
//! assert_eq!(options.max_array_length, 20);
//! ```

use serde::Deserialize;
use std::env;

/// Array length upper bound used when a schema has no `maxLength`.
pub const DEFAULT_MAX_ARRAY_LENGTH: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Output file path. Only its extension and directory depth matter to generation.
    pub output: String,
    /// Module exporting validation `schemas`; enables registry delegation for `$ref`.
    #[serde(alias = "zodios")]
    pub schema_registry_module: Option<String>,
    /// Bootstrap with `setupServer` from `msw/node` instead of a browser worker.
    pub node: bool,
    pub max_array_length: u64,
    /// Overrides the first `servers` URL of the document.
    pub base_url: Option<String>,
    /// Comma-separated path substrings; only matching paths are mocked.
    pub includes: Option<String>,
    /// Comma-separated path substrings; matching paths are skipped.
    pub excludes: Option<String>,
    /// Comma-separated status codes to keep.
    pub codes: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            output: "mock.js".to_string(),
            schema_registry_module: None,
            node: false,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            base_url: None,
            includes: None,
            excludes: None,
            codes: None,
        }
    }
}

impl GenerationOptions {
    /// Apply `MOCKGEN_*` environment variables on top of these options.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var("MOCKGEN_MAX_ARRAY_LENGTH") {
            match val.trim().parse::<u64>() {
                Ok(n) if n > 0 => self.max_array_length = n,
                _ => tracing::warn!(value = %val, "ignoring invalid MOCKGEN_MAX_ARRAY_LENGTH"),
            }
        }
        if let Ok(val) = env::var("MOCKGEN_BASE_URL") {
            self.base_url = Some(val);
        }
        if let Ok(val) = env::var("MOCKGEN_NODE") {
            self.node = parse_flag(&val);
        }
        self
    }

    /// Extension of `output` without the dot (`ts`, `js`), empty when absent.
    pub fn output_extension(&self) -> &str {
        let file = self.output.rsplit(['/', '\\']).next().unwrap_or_default();
        match file.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext,
            _ => "",
        }
    }

    pub fn is_typescript(&self) -> bool {
        self.output_extension() == "ts"
    }

    pub fn registry_enabled(&self) -> bool {
        self.schema_registry_module
            .as_deref()
            .is_some_and(|module| !module.trim().is_empty())
    }

    /// Import specifier for the schema registry module, relative to `output`.
    ///
    /// `output = "./src/mocks/handlers.ts"` and `schema_registry_module = "./src/api.ts"`
    /// give `"../../src/api"`.
    pub fn registry_import_path(&self) -> Option<String> {
        if !self.registry_enabled() {
            return None;
        }
        let module = self.schema_registry_module.as_deref()?.replace('\\', "/");
        let module = module.strip_prefix("./").unwrap_or(&module);
        let module = module.strip_suffix(".ts").unwrap_or(module);

        let output = self.output.replace('\\', "/");
        let mut segments: Vec<&str> = output.split('/').collect();
        segments.pop();
        let depth = segments
            .iter()
            .filter(|s| !s.is_empty() && **s != ".")
            .count();
        if depth == 0 {
            return Some(format!("./{module}"));
        }
        Some(format!("{}{module}", "../".repeat(depth)))
    }

    /// Whether a path survives the `includes`/`excludes` filters.
    pub fn accepts_path(&self, path: &str) -> bool {
        if let Some(includes) = self.includes.as_deref() {
            let mut keywords = split_list(includes).peekable();
            if keywords.peek().is_some() && !keywords.any(|k| path.contains(k)) {
                return false;
            }
        }
        if let Some(excludes) = self.excludes.as_deref() {
            if split_list(excludes).any(|k| path.contains(k)) {
                return false;
            }
        }
        true
    }

    /// Whether a response code survives the `codes` filter.
    pub fn accepts_code(&self, code: &str) -> bool {
        match self.codes.as_deref() {
            Some(codes) => {
                let mut wanted = split_list(codes).peekable();
                wanted.peek().is_none() || wanted.any(|c| c == code.trim())
            }
            None => true,
        }
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_flag(val: &str) -> bool {
    matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
