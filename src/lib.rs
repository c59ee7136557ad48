//! # mockgen
//!
//! **mockgen** turns an [OpenAPI 3](https://spec.openapis.org/oas/v3.0.3) document into the
//! source of a mock server: a JavaScript or TypeScript module that registers one
//! [msw](https://mswjs.io) request handler per operation and answers each request with
//! random data shaped by the documented response schemas, using `@faker-js/faker`.
//!
//! ## Overview
//!
//! Generation happens in three stages:
//!
//! - **[`spec`]** - reduces the document to an ordered list of operations, expanding
//!   `components.schemas` references and collecting non-fatal [`validator`] issues
//! - **[`generator`]** - compiles every response schema into a [`Generator`] and every
//!   operation into a handler plus named accessor functions, then renders the module with
//!   an Askama template
//! - **[`generator::write_mock_file`]** - writes the result to disk
//!
//! Supporting modules:
//!
//! - **[`config`]** - [`GenerationOptions`], deserializable and overridable from the environment
//! - **[`rotation`]** - per-path response rotation, mirroring the generated `createMockContext()`
//! - **[`sample`]** - evaluates a [`Generator`] in-process to inspect generated bodies
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host tool
//!     participant Spec as spec::load_spec_from_value
//!     participant Schema as generator::schema_to_generator
//!     participant Ops as generator::compile_operations
//!     participant Tpl as generator::render_mock_module
//!     participant FS as File System
//!
//!     Host->>Spec: parsed OpenAPI document + GenerationOptions
//!     Spec->>Spec: strip unknown keys, expand $ref
//!     Spec-->>Host: LoadedSpec (operations, components, issues)
//!     Host->>Tpl: generate_mock_module(&spec, &options)
//!     Tpl->>Ops: compile_operations(operations)
//!     Ops->>Schema: one call per identified response
//!     Schema-->>Ops: Generator
//!     Ops-->>Tpl: handlers + accessors
//!     Tpl-->>Host: module source text
//!     Host->>FS: write_mock_file(path, text, force)
//! ```
//!
//! ## Response Selection
//!
//! A generated handler cycles through its operation's documented responses in declaration
//! order. The cycle is keyed by request pathname, so the first request to `/pets/1`
//! returns the first documented response, the second request the second one, and so on.
//! Status `204` is always served without a body.
//!
//! ## Example
//!
//! ```rust
//! use mockgen::{compile_operations, load_spec_from_value, GenerationOptions, RotationState};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({
//!     "openapi": "3.0.0",
//!     "info": {"title": "Status", "version": "1"},
//!     "paths": {"/status": {"get": {
//!         "operationId": "getStatus",
//!         "responses": {
//!             "200": {"description": "up"},
//!             "503": {"description": "down"}
//!         }
//!     }}}
//! });
//! let options = GenerationOptions::default();
//! let spec = load_spec_from_value(doc, &options)?;
//! let compiled = compile_operations(&spec.operations, &options);
//!
//! let mut rotation = RotationState::new();
//! let handler = &compiled.handlers[0];
//! let first = handler.respond("/status", &mut rotation).map(|r| r.status);
//! let second = handler.respond("/status", &mut rotation).map(|r| r.status);
//! assert_eq!((first, second), (Some(200), Some(503)));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod generator;
pub mod logging;
pub mod rotation;
pub mod sample;
pub mod spec;
pub mod validator;

pub use config::GenerationOptions;
pub use generator::{
    compile_operations, generate_mock_module, render_mock_module, schema_to_generator,
    write_mock_file, CompiledOperations, Generator, HandlerDef, MockResponse,
};
pub use rotation::RotationState;
pub use sample::Sampler;
pub use spec::{
    load_spec_from_spec, load_spec_from_value, LoadedSpec, Operation, OperationCollection,
    ResponseEntry, SchemaNode, SpecError,
};
pub use validator::ValidationIssue;
