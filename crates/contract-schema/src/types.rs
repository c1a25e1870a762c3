//! Type definitions for CosmWasm contract schemas.

use message_composer::to_snake_case;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON schema types that appear in execute message fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaType {
    String,
    Integer { format: Option<String> },
    Number,
    Boolean,
    Array { items: Box<SchemaType> },
    Ref { name: String },
    Nullable { inner: Box<SchemaType> },
    Object,
    Any,
}

impl SchemaType {
    pub fn display_name(&self) -> String {
        match self {
            SchemaType::String => "string".to_string(),
            SchemaType::Integer { format } => match format.as_deref() {
                Some("uint8") => "u8".to_string(),
                Some("uint16") => "u16".to_string(),
                Some("uint32") => "u32".to_string(),
                Some("uint64") => "u64".to_string(),
                Some("uint128") => "u128".to_string(),
                Some("int32") => "i32".to_string(),
                Some("int64") => "i64".to_string(),
                Some("int128") => "i128".to_string(),
                Some(other) => other.to_string(),
                None => "integer".to_string(),
            },
            SchemaType::Number => "number".to_string(),
            SchemaType::Boolean => "bool".to_string(),
            SchemaType::Array { items } => format!("Vec<{}>", items.display_name()),
            SchemaType::Ref { name } => name.clone(),
            SchemaType::Nullable { inner } => format!("Option<{}>", inner.display_name()),
            SchemaType::Object => "object".to_string(),
            SchemaType::Any => "any".to_string(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, SchemaType::Nullable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// snake_case name as carried on the wire
    pub name: String,
    /// camelCase name accepted from callers
    pub camel_name: String,
    pub field_type: SchemaType,
    pub required: bool,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// snake_case action name, the payload's top-level key
    pub name: String,
    /// camelCase method name
    pub method_name: String,
    pub doc: Option<String>,
    pub fields: Vec<FieldSpec>,
}

impl ActionSpec {
    pub fn find_field(&self, name: &str) -> Option<&FieldSpec> {
        let snake = to_snake_case(name);
        self.fields.iter().find(|f| f.name == snake)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSchema {
    pub name: String,
    pub version: Option<String>,
    pub actions: Vec<ActionSpec>,
    pub definitions: BTreeMap<String, serde_json::Value>,
}

impl ContractSchema {
    pub fn new(name: String) -> Self {
        Self {
            name,
            version: None,
            actions: Vec::new(),
            definitions: BTreeMap::new(),
        }
    }

    /// Look up an action by its snake_case name or camelCase method name.
    pub fn find_action(&self, name: &str) -> Option<&ActionSpec> {
        let snake = to_snake_case(name);
        self.actions.iter().find(|a| a.name == snake)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.find_action(name).is_some()
    }

    pub fn list_actions(&self) -> Vec<ActionInfo> {
        self.actions.iter().map(ActionInfo::from).collect()
    }
}

/// Action summary for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
    pub method_name: String,
    pub params: Vec<ParamInfo>,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    pub type_name: String,
    pub required: bool,
    pub doc: Option<String>,
}

impl From<&ActionSpec> for ActionInfo {
    fn from(action: &ActionSpec) -> Self {
        ActionInfo {
            name: action.name.clone(),
            method_name: action.method_name.clone(),
            params: action
                .fields
                .iter()
                .map(|f| ParamInfo {
                    name: f.camel_name.clone(),
                    type_name: f.field_type.display_name(),
                    required: f.required,
                    doc: f.doc.clone(),
                })
                .collect(),
            doc: action.doc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, camel: &str, required: bool) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            camel_name: camel.to_string(),
            field_type: SchemaType::String,
            required,
            doc: None,
        }
    }

    #[test]
    fn test_display_names() {
        let t = SchemaType::Nullable {
            inner: Box::new(SchemaType::Array {
                items: Box::new(SchemaType::Integer {
                    format: Some("uint64".to_string()),
                }),
            }),
        };
        assert_eq!(t.display_name(), "Option<Vec<u64>>");
        assert_eq!(
            SchemaType::Ref {
                name: "Uint128".to_string()
            }
            .display_name(),
            "Uint128"
        );
    }

    #[test]
    fn test_find_action_by_either_case() {
        let mut schema = ContractSchema::new("trust".to_string());
        schema.actions.push(ActionSpec {
            name: "update_staking_info".to_string(),
            method_name: "updateStakingInfo".to_string(),
            doc: None,
            fields: vec![field("address", "address", true)],
        });

        assert!(schema.has_action("updateStakingInfo"));
        assert!(schema.has_action("update_staking_info"));
        assert!(!schema.has_action("review"));
    }

    #[test]
    fn test_find_field_by_camel_name() {
        let action = ActionSpec {
            name: "update_config".to_string(),
            method_name: "updateConfig".to_string(),
            doc: None,
            fields: vec![
                field("max_rating", "maxRating", true),
                field("logo", "logo", false),
            ],
        };
        assert_eq!(action.find_field("maxRating").unwrap().name, "max_rating");
        assert_eq!(action.required_fields().count(), 1);
    }
}
