//! # Generator Module
//!
//! Turns the reduced OpenAPI operations into the source text of a JavaScript or
//! TypeScript mock-server module built on `msw` and `@faker-js/faker`.
//!
//! ## Architecture
//!
//! ```text
//! SchemaNode → schema compiler → Generator → JavaScript expression
//! Operation  → operation compiler → handlers + accessors → askama template → mock module
//! ```
//!
//! 1. **Schema compiler** ([`schema_to_generator`]) - walks one schema and produces a
//!    [`Generator`], a tagged description of how to produce a random value
//! 2. **Operation compiler** ([`compile_operations`]) - builds one handler per operation
//!    and one named accessor function per identified response
//! 3. **Template rendering** ([`render_mock_module`]) - assembles imports, the rotation
//!    context, handlers and accessors with the `mock.js.txt` Askama template
//!
//! The compilers never fail; schemas they do not understand produce `null`.
//!
//! ## Generated Module
//!
//! ```text
//! import { rest } from 'mswx';
//! import { faker } from '@faker-js/faker';
//! import { setupWorker } from 'msw';
//!
//! faker.seed(1);
//! const MAX_ARRAY_LENGTH = 20;
//!
//! export function createMockContext() { ... }      // per-path rotation counters
//! export function createHandlers(context) { ... }  // one rest.<verb>() per operation
//! export const handlers = createHandlers(createMockContext());
//! export const worker = setupWorker(...handlers);
//!
//! export function getListPets200Response() { return ... };
//! ```
//!
//! Each handler cycles through its documented responses in declaration order, keyed by
//! request pathname. Responses with status `204` never carry a body.
//!
//! ## Usage
//!
//! ```rust
//! use mockgen::config::GenerationOptions;
//! use mockgen::generator::generate_mock_module;
//! use mockgen::spec::load_spec_from_value;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({
//!     "openapi": "3.0.0",
//!     "info": {"title": "Pets", "version": "1"},
//!     "paths": {"/pets": {"get": {
//!         "operationId": "listPets",
//!         "responses": {"200": {
//!             "description": "ok",
//!             "content": {"application/json": {"schema": {"type": "boolean"}}}
//!         }}
//!     }}}
//! });
//! let options = GenerationOptions::default();
//! let spec = load_spec_from_value(doc, &options)?;
//! let module = generate_mock_module(&spec, &options)?;
//! assert!(module.contains("rest.get(`/pets`"));
//! assert!(module.contains("export function getListPets200Response()"));
//! # Ok(())
//! # }
//! ```

mod expr;
mod operation;
mod schema;
mod templates;


pub use expr::{Generator, LengthBound, StringFormat, MAX_ARRAY_LENGTH_IDENT, RECORD_ENTRIES};
pub use operation::{
    camel_case, compile_operations, response_identifier, transform_to_handler_code,
    transform_to_res_object, AccessorDef, CompiledOperations, HandlerDef, MockResponse, NO_CONTENT,
};
pub use schema::{schema_to_generator, string_format, transform_schema};
pub use templates::{
    generate_mock_module, import_lines, render_mock_module, write_mock_file, MockModuleTemplate,
};
