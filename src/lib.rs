//! Derive a language-neutral type model (named record types with typed,
//! annotated fields) from a JSON Schema document.
pub mod cli;
pub mod error;
pub mod extract;
pub mod ir;
pub mod path_de;
pub mod schema;

pub use error::{ErrorList, FieldError, RecordError, SchemaError, TypeError};
pub use extract::{Extractor, create_records};
pub use ir::{Constraint, FieldSpec, NumberInfo, RecordType, SliceInfo, StringInfo, TypeModel};
pub use schema::{SchemaNode, TypeIndex};
