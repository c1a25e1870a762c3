//! The `MsgExecuteContract` transaction envelope.

use serde::{Deserialize, Serialize};

use crate::coin::Coin;

/// Protobuf type URL of a CosmWasm execute-contract message.
pub const EXECUTE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";

/// Encode object handed to an external signer/broadcaster.
///
/// The JSON form mirrors the CosmJS encode object: `typeUrl` plus a `value`
/// whose `msg` bytes are base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteEnvelope {
    type_url: String,
    value: MsgExecuteContract,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgExecuteContract {
    sender: String,
    contract: String,
    #[serde(with = "base64_bytes")]
    msg: Vec<u8>,
    #[serde(default)]
    funds: Vec<Coin>,
}

impl ExecuteEnvelope {
    pub(crate) fn new(sender: &str, contract: &str, msg: Vec<u8>, funds: Vec<Coin>) -> Self {
        Self {
            type_url: EXECUTE_CONTRACT_TYPE_URL.to_string(),
            value: MsgExecuteContract {
                sender: sender.to_string(),
                contract: contract.to_string(),
                msg,
                funds,
            },
        }
    }

    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    pub fn value(&self) -> &MsgExecuteContract {
        &self.value
    }

    pub fn sender(&self) -> &str {
        &self.value.sender
    }

    pub fn contract(&self) -> &str {
        &self.value.contract
    }

    /// UTF-8 JSON payload bytes.
    pub fn msg(&self) -> &[u8] {
        &self.value.msg
    }

    pub fn funds(&self) -> &[Coin] {
        &self.value.funds
    }

    /// Parse the payload back into JSON.
    pub fn payload_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.value.msg)
    }

    /// Name of the action carried by the payload, i.e. its single top-level key.
    pub fn action_name(&self) -> Option<String> {
        match self.payload_json().ok()? {
            serde_json::Value::Object(map) if map.len() == 1 => map.keys().next().cloned(),
            _ => None,
        }
    }

    pub fn into_value(self) -> MsgExecuteContract {
        self.value
    }
}

impl MsgExecuteContract {
    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn msg(&self) -> &[u8] {
        &self.msg
    }

    pub fn funds(&self) -> &[Coin] {
        &self.funds
    }
}

pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
