//! Trust contract: execute actions and composer.

use serde::{Deserialize, Serialize};

use crate::coin::{Coin, Uint128};
use crate::composer::{ComposeError, ContractMsg, MessageComposer};
use crate::envelope::ExecuteEnvelope;

/// Weights of the trust score formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustScoreParams {
    pub base_score: u64,
    pub denom_multiplier: u128,
    pub min_stake_days: u64,
    pub rating_floor_denominator: u64,
    pub rating_multiplier: u64,
    pub stake_amount_denominator: u64,
}

/// Stored with a plain serde derive, so variants go out in PascalCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewResult {
    ThumbsUp,
    ThumbsDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustExecuteMsg {
    /// Replace the contract configuration. DAO only.
    UpdateConfig {
        admin: String,
        maintainer: String,
        max_rating: u64,
        max_staked_days: u64,
        max_staked_tokens: Uint128,
        review_interval: u64,
        staking_contract: String,
        trust_score_params: TrustScoreParams,
    },
    /// Re-query staking info for an address and refresh its score.
    UpdateStakingInfo { address: String },
    /// Leave a review for an address with a pending review.
    Review { address: String, result: ReviewResult },
}

impl ContractMsg for TrustExecuteMsg {
    fn action_name(&self) -> &'static str {
        match self {
            TrustExecuteMsg::UpdateConfig { .. } => "update_config",
            TrustExecuteMsg::UpdateStakingInfo { .. } => "update_staking_info",
            TrustExecuteMsg::Review { .. } => "review",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfigParams {
    pub admin: String,
    pub maintainer: String,
    pub max_rating: u64,
    pub max_staked_days: u64,
    pub max_staked_tokens: Uint128,
    pub review_interval: u64,
    pub staking_contract: String,
    pub trust_score_params: TrustScoreParams,
}

impl From<UpdateConfigParams> for TrustExecuteMsg {
    fn from(p: UpdateConfigParams) -> Self {
        TrustExecuteMsg::UpdateConfig {
            admin: p.admin,
            maintainer: p.maintainer,
            max_rating: p.max_rating,
            max_staked_days: p.max_staked_days,
            max_staked_tokens: p.max_staked_tokens,
            review_interval: p.review_interval,
            staking_contract: p.staking_contract,
            trust_score_params: p.trust_score_params,
        }
    }
}

/// Composer for the Trust contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustMessageComposer {
    inner: MessageComposer,
}

impl TrustMessageComposer {
    pub fn new(sender: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            inner: MessageComposer::new(sender, contract_address),
        }
    }

    pub fn sender(&self) -> &str {
        self.inner.sender()
    }

    pub fn contract_address(&self) -> &str {
        self.inner.contract_address()
    }

    pub fn execute(
        &self,
        msg: &TrustExecuteMsg,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.inner.execute(msg, funds)
    }

    pub fn update_config(
        &self,
        params: UpdateConfigParams,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&params.into(), funds)
    }

    pub fn update_staking_info(
        &self,
        address: impl Into<String>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &TrustExecuteMsg::UpdateStakingInfo {
                address: address.into(),
            },
            funds,
        )
    }

    pub fn review(
        &self,
        address: impl Into<String>,
        result: ReviewResult,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &TrustExecuteMsg::Review {
                address: address.into(),
                result,
            },
            funds,
        )
    }
}
