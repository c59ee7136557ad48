//! OpenAPI document reduction.
//!
//! Turns a parsed OpenAPI 3 document into the [`OperationCollection`] consumed by the
//! generator: one [`Operation`] per verb and path, responses in declaration order,
//! schema references expanded against `components.schemas`.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
