//! Serialize-and-wrap routine shared by every contract composer.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::coin::Coin;
use crate::envelope::ExecuteEnvelope;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("failed to encode execute message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A contract's execute message: one variant per action, serialized as
/// `{"<action>": {...}}`.
pub trait ContractMsg: Serialize {
    /// snake_case name of the action, i.e. the payload's top-level key.
    fn action_name(&self) -> &'static str;
}

/// Builds execute envelopes for one (sender, contract) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageComposer {
    sender: String,
    contract_address: String,
}

impl MessageComposer {
    pub fn new(sender: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            contract_address: contract_address.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Wrap a contract action into an execute envelope.
    pub fn execute<M: ContractMsg>(
        &self,
        msg: &M,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        let envelope = self.execute_raw(msg, funds)?;
        debug!(
            action = msg.action_name(),
            contract = %self.contract_address,
            bytes = envelope.msg().len(),
            "composed execute message"
        );
        Ok(envelope)
    }

    /// Wrap any serializable payload. The caller is responsible for its
    /// `{"<action>": {...}}` shape.
    pub fn execute_raw<M: Serialize + ?Sized>(
        &self,
        msg: &M,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        let bytes = serde_json::to_vec(msg)?;
        Ok(ExecuteEnvelope::new(
            &self.sender,
            &self.contract_address,
            bytes,
            funds.unwrap_or_default(),
        ))
    }
}
