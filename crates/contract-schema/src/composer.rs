//! Execute message composition driven by a parsed contract schema.

use message_composer::{to_snake_case, Coin, ComposeError, ExecuteEnvelope, MessageComposer};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::types::ContractSchema;

/// Why a call could not be composed from the schema.
#[derive(Error, Debug)]
pub enum CallError {
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("arguments for '{action}' must be a JSON object")]
    InvalidArguments { action: String },
    #[error("unknown field '{field}' for action '{action}'")]
    UnknownField { action: String, field: String },
    #[error("missing required field '{field}' for action '{action}'")]
    MissingField { action: String, field: String },
    #[error("field '{field}' given more than once for action '{action}'")]
    DuplicateField { action: String, field: String },
}

/// Builds envelopes for any action a contract schema declares.
///
/// Arguments arrive as a JSON object with camelCase keys; they are renamed
/// to snake_case and checked against the action's declared fields. Field
/// values are passed through untouched, the contract validates them.
#[derive(Debug, Clone)]
pub struct SchemaComposer {
    schema: ContractSchema,
    composer: MessageComposer,
}

impl SchemaComposer {
    pub fn new(
        schema: ContractSchema,
        sender: impl Into<String>,
        contract_address: impl Into<String>,
    ) -> Self {
        Self {
            schema,
            composer: MessageComposer::new(sender, contract_address),
        }
    }

    pub fn schema(&self) -> &ContractSchema {
        &self.schema
    }

    pub fn sender(&self) -> &str {
        self.composer.sender()
    }

    pub fn contract_address(&self) -> &str {
        self.composer.contract_address()
    }

    /// Build the payload for `method` without wrapping it.
    pub fn payload(&self, method: &str, args: &Value) -> Result<Value, CallError> {
        let action = self
            .schema
            .find_action(method)
            .ok_or_else(|| CallError::UnknownAction(method.to_string()))?;

        let empty = Map::new();
        let given = match args {
            Value::Null => &empty,
            Value::Object(obj) => obj,
            _ => {
                return Err(CallError::InvalidArguments {
                    action: action.name.clone(),
                })
            }
        };

        let mut fields = Map::new();
        for (key, value) in given {
            let field = action
                .find_field(key)
                .ok_or_else(|| CallError::UnknownField {
                    action: action.name.clone(),
                    field: key.clone(),
                })?;
            if value.is_null() && !field.required {
                continue;
            }
            if fields.insert(field.name.clone(), value.clone()).is_some() {
                return Err(CallError::DuplicateField {
                    action: action.name.clone(),
                    field: to_snake_case(key),
                });
            }
        }

        if let Some(missing) = action
            .required_fields()
            .find(|f| fields.get(&f.name).map_or(true, Value::is_null))
        {
            return Err(CallError::MissingField {
                action: action.name.clone(),
                field: missing.name.clone(),
            });
        }

        let mut payload = Map::new();
        payload.insert(action.name.clone(), Value::Object(fields));
        Ok(Value::Object(payload))
    }

    /// Build the execute envelope for `method`.
    pub fn compose(
        &self,
        method: &str,
        args: &Value,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, CallError> {
        let payload = self.payload(method, args)?;
        let envelope = self.composer.execute_raw(&payload, funds)?;
        debug!(
            contract = %self.schema.name,
            method,
            bytes = envelope.msg().len(),
            "composed execute message from schema"
        );
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema_value;
    use serde_json::json;

    fn composer() -> SchemaComposer {
        let execute = json!({
            "oneOf": [
                {
                    "type": "object",
                    "required": ["update_order"],
                    "properties": {
                        "update_order": {
                            "type": "object",
                            "required": ["id", "status"],
                            "properties": {
                                "id": { "type": "integer", "format": "uint64" },
                                "status": { "$ref": "#/definitions/OrderStatus" },
                                "tracking": {
                                    "anyOf": [{ "$ref": "#/definitions/TrackingInfo" }, { "type": "null" }]
                                }
                            }
                        }
                    }
                }
            ]
        });
        let schema = parse_schema_value(&execute, "shop").unwrap();
        SchemaComposer::new(schema, "juno1seller", "juno1shop")
    }

    #[test]
    fn test_payload_drops_null_optionals() {
        let payload = composer()
            .payload("updateOrder", &json!({ "id": 4, "status": "Shipped", "tracking": null }))
            .unwrap();
        assert_eq!(payload, json!({ "update_order": { "id": 4, "status": "Shipped" } }));
    }

    #[test]
    fn test_missing_required_field() {
        let err = composer()
            .payload("updateOrder", &json!({ "id": 4 }))
            .unwrap_err();
        assert!(matches!(err, CallError::MissingField { field, .. } if field == "status"));
    }

    #[test]
    fn test_unknown_field_and_action() {
        let err = composer()
            .payload("updateOrder", &json!({ "id": 4, "status": "Shipped", "eta": 3 }))
            .unwrap_err();
        assert!(matches!(err, CallError::UnknownField { field, .. } if field == "eta"));

        let err = composer().payload("shipEverything", &json!({})).unwrap_err();
        assert!(matches!(err, CallError::UnknownAction(name) if name == "shipEverything"));
    }

    #[test]
    fn test_duplicate_field_after_renaming() {
        let err = composer()
            .payload("update_order", &json!({ "id": 4, "status": "Shipped", "Id": 5 }))
            .unwrap_err();
        assert!(matches!(err, CallError::DuplicateField { field, .. } if field == "id"));
    }

    #[test]
    fn test_non_object_arguments() {
        let err = composer().payload("updateOrder", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, CallError::InvalidArguments { .. }));
    }

    #[test]
    fn test_envelope_payload_is_single_key_object() {
        let env = composer()
            .compose("updateOrder", &json!({ "id": 4, "status": "Received" }), None)
            .unwrap();
        let payload = env.payload_json().unwrap();
        assert_eq!(payload.as_object().map(|o| o.len()), Some(1));
        assert_eq!(env.action_name().as_deref(), Some("update_order"));
    }
}
