//! Typed message composers for the Commerce and Trust contracts.
//!
//! A composer is bound to one (sender, contract) pair and turns contract
//! actions into `MsgExecuteContract` envelopes ready for an external
//! signer/broadcaster.

pub mod case;
pub mod coin;
pub mod commerce;
pub mod composer;
pub mod envelope;
pub mod trust;

pub use case::{to_camel_case, to_snake_case};
pub use coin::{parse_coins, Coin, CoinParseError, Uint128};
pub use commerce::CommerceMessageComposer;
pub use composer::{ComposeError, ContractMsg, MessageComposer};
pub use envelope::{ExecuteEnvelope, MsgExecuteContract, EXECUTE_CONTRACT_TYPE_URL};
pub use trust::TrustMessageComposer;
