//! Parse CosmWasm contract schemas and compose execute messages from them.

pub mod composer;
pub mod parser;
pub mod types;

pub use composer::{CallError, SchemaComposer};
pub use parser::{load_schema_file, parse_schema_json, parse_schema_value, RawSchemaDocument, SchemaError};
pub use types::*;
