//! Schema parser for CosmWasm contracts.
//!
//! Reads the document written by `cosmwasm-schema` (`schema/<contract>.json`)
//! or a bare `ExecuteMsg` JSON schema, and turns the execute message's
//! `oneOf` variants into an action catalogue.

use crate::types::*;
use message_composer::to_camel_case;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Combined schema document as emitted by `cosmwasm-schema`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSchemaDocument {
    #[serde(default)]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub contract_version: Option<String>,
    #[serde(default)]
    pub idl_version: Option<String>,
    #[serde(default)]
    pub instantiate: Option<Value>,
    #[serde(default)]
    pub execute: Option<Value>,
    #[serde(default)]
    pub query: Option<Value>,
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to parse schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("schema for '{0}' has no execute message")]
    MissingExecute(String),
    #[error("execute schema for '{0}' has no oneOf variants")]
    NoVariants(String),
    #[error("unsupported execute variant #{index}: {reason}")]
    UnsupportedVariant { index: usize, reason: String },
}

/// Parse schema JSON. `contract_name` is used when the document does not
/// carry its own name.
pub fn parse_schema_json(json: &str, contract_name: &str) -> Result<ContractSchema, SchemaError> {
    let value: Value = serde_json::from_str(json)?;
    parse_schema_value(&value, contract_name)
}

/// Read and parse a schema file; the contract name defaults to the file stem.
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<ContractSchema, SchemaError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");
    parse_schema_json(&content, fallback)
}

pub fn parse_schema_value(value: &Value, contract_name: &str) -> Result<ContractSchema, SchemaError> {
    let (name, version, execute) = if value.get("execute").is_some() {
        let doc: RawSchemaDocument = serde_json::from_value(value.clone())?;
        let name = doc
            .contract_name
            .unwrap_or_else(|| contract_name.to_string());
        match doc.execute {
            Some(execute) if !execute.is_null() => (name, doc.contract_version, execute),
            _ => return Err(SchemaError::MissingExecute(name)),
        }
    } else if value.get("oneOf").is_some() || value.get("enum").is_some() {
        (contract_name.to_string(), None, value.clone())
    } else {
        return Err(SchemaError::MissingExecute(contract_name.to_string()));
    };

    let mut schema = ContractSchema::new(name);
    schema.version = version;
    schema.definitions = collect_definitions(&execute);
    schema.actions = parse_execute(&execute, &schema.name, &schema.definitions)?;

    debug!(
        contract = %schema.name,
        actions = schema.actions.len(),
        "parsed contract schema"
    );
    Ok(schema)
}

fn collect_definitions(execute: &Value) -> BTreeMap<String, Value> {
    execute
        .get("definitions")
        .and_then(Value::as_object)
        .map(|defs| defs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

fn parse_execute(
    execute: &Value,
    contract: &str,
    definitions: &BTreeMap<String, Value>,
) -> Result<Vec<ActionSpec>, SchemaError> {
    // unit variants serialize to a bare string, not a `{"<action>": {...}}` object
    if string_enum(execute).is_some() {
        return Err(SchemaError::UnsupportedVariant {
            index: 0,
            reason: "unit variants compose to a bare string, not an action object".to_string(),
        });
    }

    let variants = execute
        .get("oneOf")
        .and_then(Value::as_array)
        .ok_or_else(|| SchemaError::NoVariants(contract.to_string()))?;

    let mut actions = Vec::new();
    for (index, variant) in variants.iter().enumerate() {
        if let Some(names) = string_enum(variant) {
            return Err(SchemaError::UnsupportedVariant {
                index,
                reason: format!(
                    "unit variants {:?} compose to a bare string, not an action object",
                    names
                ),
            });
        }
        actions.push(parse_struct_variant(variant, index, definitions)?);
    }

    if actions.is_empty() {
        return Err(SchemaError::NoVariants(contract.to_string()));
    }
    Ok(actions)
}

fn parse_struct_variant(
    variant: &Value,
    index: usize,
    definitions: &BTreeMap<String, Value>,
) -> Result<ActionSpec, SchemaError> {
    let unsupported = |reason: &str| SchemaError::UnsupportedVariant {
        index,
        reason: reason.to_string(),
    };

    let properties = variant
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| unsupported("variant has no properties"))?;
    if properties.len() != 1 {
        return Err(unsupported("variant must have exactly one property"));
    }
    let (name, body) = properties
        .iter()
        .next()
        .ok_or_else(|| unsupported("variant has no properties"))?;

    // newtype variants such as `Receive(Cw20ReceiveMsg)` point at a definition
    let unresolved;
    let body = match ref_name(body) {
        Some(target) => match definitions.get(&target) {
            Some(def) => def,
            None => {
                warn!(variant = %name, definition = %target, "unresolved definition, no fields recorded");
                unresolved = Value::Null;
                &unresolved
            }
        },
        None => body,
    };

    let fields = match body.get("properties").and_then(Value::as_object) {
        Some(props) => parse_fields(props, body.get("required")),
        None => Vec::new(),
    };

    Ok(ActionSpec {
        name: name.clone(),
        method_name: to_camel_case(name),
        doc: description(variant),
        fields,
    })
}

fn parse_fields(props: &Map<String, Value>, required: Option<&Value>) -> Vec<FieldSpec> {
    let required: Vec<&str> = required
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    props
        .iter()
        .map(|(name, value)| FieldSpec {
            name: name.clone(),
            camel_name: to_camel_case(name),
            field_type: parse_type_value(value),
            required: required.contains(&name.as_str()),
            doc: description(value),
        })
        .collect()
}

pub fn parse_type_value(value: &Value) -> SchemaType {
    if let Some(name) = ref_name(value) {
        return SchemaType::Ref { name };
    }

    if let Some(all_of) = value.get("allOf").and_then(Value::as_array) {
        return all_of.first().map(parse_type_value).unwrap_or(SchemaType::Any);
    }

    if let Some(any_of) = value.get("anyOf").and_then(Value::as_array) {
        let non_null: Vec<&Value> = any_of.iter().filter(|v| !is_null_type(v)).collect();
        let inner = match non_null.as_slice() {
            [single] => parse_type_value(single),
            _ => SchemaType::Any,
        };
        return if non_null.len() < any_of.len() {
            SchemaType::Nullable {
                inner: Box::new(inner),
            }
        } else {
            inner
        };
    }

    match value.get("type") {
        Some(Value::String(t)) => parse_type_name(t, value),
        Some(Value::Array(types)) => {
            let names: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
            let non_null: Vec<&str> = names.iter().copied().filter(|t| *t != "null").collect();
            let inner = match non_null.as_slice() {
                [single] => parse_type_name(single, value),
                _ => SchemaType::Any,
            };
            if non_null.len() < names.len() {
                SchemaType::Nullable {
                    inner: Box::new(inner),
                }
            } else {
                inner
            }
        }
        _ => SchemaType::Any,
    }
}

fn parse_type_name(type_name: &str, value: &Value) -> SchemaType {
    match type_name {
        "string" => SchemaType::String,
        "integer" => SchemaType::Integer {
            format: value
                .get("format")
                .and_then(Value::as_str)
                .map(String::from),
        },
        "number" => SchemaType::Number,
        "boolean" => SchemaType::Boolean,
        "array" => {
            let items = value
                .get("items")
                .map(parse_type_value)
                .unwrap_or(SchemaType::Any);
            SchemaType::Array {
                items: Box::new(items),
            }
        }
        "object" => SchemaType::Object,
        _ => SchemaType::Any,
    }
}

fn ref_name(value: &Value) -> Option<String> {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .map(|r| r.rsplit('/').next().unwrap_or(r).to_string())
}

fn is_null_type(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("null")
}

fn string_enum(value: &Value) -> Option<Vec<String>> {
    if value.get("type").and_then(Value::as_str) != Some("string") {
        return None;
    }
    value.get("enum").and_then(Value::as_array).map(|names| {
        names
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect()
    })
}

fn description(value: &Value) -> Option<String> {
    value
        .get("description")
        .and_then(Value::as_str)
        .map(String::from)
}
