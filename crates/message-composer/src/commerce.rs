//! Commerce contract: execute actions, their records, and composer.

use serde::{Deserialize, Serialize};

use crate::coin::{Coin, Uint128};
use crate::composer::{ComposeError, ContractMsg, MessageComposer};
use crate::envelope::{base64_bytes, ExecuteEnvelope};

/// Raw bytes, base64 encoded on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary(#[serde(with = "base64_bytes")] pub Vec<u8>);

impl Binary {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary(bytes)
    }
}

/// Amount of a CW20 token, identified by its contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cw20Coin {
    pub address: String,
    pub amount: Uint128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marketing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub featured_listings: Vec<Listing>,
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    pub network: Network,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Twitter,
    Facebook,
    GitHub,
    LinkedIn,
    Instagram,
    YouTube,
    Reddit,
    Medium,
    Discord,
    TikTok,
    Twitch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub active: bool,
    pub price: Cw20Coin,
    pub attributes: Attributes,
    pub options: Vec<ListingOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOption {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<ListingOptionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOptionItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cw20Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub listing_id: u64,
    pub options: Vec<OrderOption>,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOption {
    pub option_id: u64,
    pub selected_option: ListingOptionItem,
}

/// Stored with a plain serde derive, so variants go out in PascalCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Received,
    Fulfilling,
    Shipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    pub provider: String,
    pub url: String,
}

/// Hook message a CW20 token forwards to the contract on `send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveMsg {
    CreateOrder { items: Vec<OrderItem> },
}

impl ReceiveMsg {
    /// Encode as the `msg` field of a CW20 `send`.
    pub fn to_binary(&self) -> Result<Binary, ComposeError> {
        Ok(Binary(serde_json::to_vec(self)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommerceExecuteMsg {
    UpdateAdmins {
        admins: Vec<String>,
    },
    UpdateConfig {
        denom: String,
        trust_contract: String,
        withdrawal_address: String,
    },
    UpdateMarketing {
        marketing: Marketing,
    },
    Withdraw {
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<Uint128>,
    },
    CreateListing {
        active: bool,
        attributes: Attributes,
        options: Vec<ListingOption>,
        price: Uint128,
    },
    UpdateListing {
        active: bool,
        attributes: Attributes,
        id: u64,
        options: Vec<ListingOption>,
        price: Uint128,
    },
    DeleteListing {
        id: u64,
    },
    UpdateOrder {
        id: u64,
        status: OrderStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        tracking: Option<TrackingInfo>,
    },
    CompleteOrder {
        id: u64,
    },
    RefundOrder {
        id: u64,
    },
    CreateOrder {
        items: Vec<OrderItem>,
    },
    CancelOrder {
        id: u64,
    },
    Receive {
        amount: Uint128,
        msg: Binary,
        sender: String,
    },
}

impl ContractMsg for CommerceExecuteMsg {
    fn action_name(&self) -> &'static str {
        match self {
            CommerceExecuteMsg::UpdateAdmins { .. } => "update_admins",
            CommerceExecuteMsg::UpdateConfig { .. } => "update_config",
            CommerceExecuteMsg::UpdateMarketing { .. } => "update_marketing",
            CommerceExecuteMsg::Withdraw { .. } => "withdraw",
            CommerceExecuteMsg::CreateListing { .. } => "create_listing",
            CommerceExecuteMsg::UpdateListing { .. } => "update_listing",
            CommerceExecuteMsg::DeleteListing { .. } => "delete_listing",
            CommerceExecuteMsg::UpdateOrder { .. } => "update_order",
            CommerceExecuteMsg::CompleteOrder { .. } => "complete_order",
            CommerceExecuteMsg::RefundOrder { .. } => "refund_order",
            CommerceExecuteMsg::CreateOrder { .. } => "create_order",
            CommerceExecuteMsg::CancelOrder { .. } => "cancel_order",
            CommerceExecuteMsg::Receive { .. } => "receive",
        }
    }
}

/// Listing fields shared by `create_listing` and `update_listing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
    pub active: bool,
    pub attributes: Attributes,
    pub options: Vec<ListingOption>,
    pub price: Uint128,
}

/// Composer for the Commerce contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommerceMessageComposer {
    inner: MessageComposer,
}

impl CommerceMessageComposer {
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
        msg: &CommerceExecuteMsg,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.inner.execute(msg, funds)
    }

    pub fn update_admins(
        &self,
        admins: Vec<String>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::UpdateAdmins { admins }, funds)
    }

    pub fn update_config(
        &self,
        denom: impl Into<String>,
        trust_contract: impl Into<String>,
        withdrawal_address: impl Into<String>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &CommerceExecuteMsg::UpdateConfig {
                denom: denom.into(),
                trust_contract: trust_contract.into(),
                withdrawal_address: withdrawal_address.into(),
            },
            funds,
        )
    }

    pub fn update_marketing(
        &self,
        marketing: Marketing,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::UpdateMarketing { marketing }, funds)
    }

    /// Withdraw `amount`, or everything available when `None`.
    pub fn withdraw(
        &self,
        amount: Option<Uint128>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::Withdraw { amount }, funds)
    }

    pub fn create_listing(
        &self,
        listing: ListingParams,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &CommerceExecuteMsg::CreateListing {
                active: listing.active,
                attributes: listing.attributes,
                options: listing.options,
                price: listing.price,
            },
            funds,
        )
    }

    pub fn update_listing(
        &self,
        id: u64,
        listing: ListingParams,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &CommerceExecuteMsg::UpdateListing {
                active: listing.active,
                attributes: listing.attributes,
                id,
                options: listing.options,
                price: listing.price,
            },
            funds,
        )
    }

    pub fn delete_listing(
        &self,
        id: u64,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::DeleteListing { id }, funds)
    }

    pub fn update_order(
        &self,
        id: u64,
        status: OrderStatus,
        tracking: Option<TrackingInfo>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &CommerceExecuteMsg::UpdateOrder {
                id,
                status,
                tracking,
            },
            funds,
        )
    }

    pub fn complete_order(
        &self,
        id: u64,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::CompleteOrder { id }, funds)
    }

    pub fn refund_order(
        &self,
        id: u64,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::RefundOrder { id }, funds)
    }

    pub fn create_order(
        &self,
        items: Vec<OrderItem>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::CreateOrder { items }, funds)
    }

    pub fn cancel_order(
        &self,
        id: u64,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(&CommerceExecuteMsg::CancelOrder { id }, funds)
    }

    pub fn receive(
        &self,
        amount: Uint128,
        msg: Binary,
        sender: impl Into<String>,
        funds: Option<Vec<Coin>>,
    ) -> Result<ExecuteEnvelope, ComposeError> {
        self.execute(
            &CommerceExecuteMsg::Receive {
                amount,
                msg,
                sender: sender.into(),
            },
            funds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> CommerceMessageComposer {
        CommerceMessageComposer::new("juno1seller", "juno1shop")
    }

    fn payload(env: &ExecuteEnvelope) -> String {
        String::from_utf8(env.msg().to_vec()).unwrap()
    }

    fn attributes() -> Attributes {
        Attributes {
            name: "Mug".to_string(),
            description: None,
            images: vec!["ipfs://mug".to_string()],
        }
    }

    #[test]
    fn test_withdraw_omits_missing_amount() {
        let env = composer().withdraw(None, None).unwrap();
        assert_eq!(payload(&env), r#"{"withdraw":{}}"#);

        let env = composer().withdraw(Some(Uint128::new(25)), None).unwrap();
        assert_eq!(payload(&env), r#"{"withdraw":{"amount":"25"}}"#);
    }

    #[test]
    fn test_create_listing_payload() {
        let listing = ListingParams {
            active: true,
            attributes: attributes(),
            options: vec![ListingOption {
                id: 1,
                name: "Color".to_string(),
                description: None,
                options: vec![ListingOptionItem {
                    name: "Red".to_string(),
                    cost: Some(Cw20Coin {
                        address: "juno1token".to_string(),
                        amount: Uint128::new(5),
                    }),
                }],
            }],
            price: Uint128::new(100),
        };

        let env = composer().create_listing(listing, None).unwrap();
        assert_eq!(
            payload(&env),
            concat!(
                r#"{"create_listing":{"active":true,"#,
                r#""attributes":{"name":"Mug","images":["ipfs://mug"]},"#,
                r#""options":[{"id":1,"name":"Color","options":[{"name":"Red","#,
                r#""cost":{"address":"juno1token","amount":"5"}}]}],"price":"100"}}"#
            )
        );
    }

    #[test]
    fn test_update_order_with_tracking() {
        let env = composer()
            .update_order(
                3,
                OrderStatus::Shipped,
                Some(TrackingInfo {
                    provider: "UPS".to_string(),
                    url: "https://ups.example/1Z".to_string(),
                }),
                None,
            )
            .unwrap();
        assert_eq!(
            payload(&env),
            r#"{"update_order":{"id":3,"status":"Shipped","tracking":{"provider":"UPS","url":"https://ups.example/1Z"}}}"#
        );
    }

    #[test]
    fn test_order_status_wire_values() {
        let values: Vec<_> = [
            OrderStatus::Received,
            OrderStatus::Fulfilling,
            OrderStatus::Shipped,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
        assert_eq!(values, vec![r#""Received""#, r#""Fulfilling""#, r#""Shipped""#]);
        assert!(serde_json::from_str::<OrderStatus>(r#""shipped""#).is_err());
    }

    #[test]
    fn test_marketing_network_names() {
        let marketing = Marketing {
            name: "Josef's Store".to_string(),
            copyright: Some("Josef's Store 2022".to_string()),
            logo: None,
            featured_listings: vec![],
            socials: vec![Social {
                network: Network::GitHub,
                url: "https://github.com/swiftprotocol".to_string(),
            }],
        };
        let env = composer().update_marketing(marketing, None).unwrap();
        let json = env.payload_json().unwrap();
        assert_eq!(json["update_marketing"]["marketing"]["socials"][0]["network"], "git_hub");
        assert!(json["update_marketing"]["marketing"].get("logo").is_none());
    }

    #[test]
    fn test_receive_wraps_create_order_hook() {
        let hook = ReceiveMsg::CreateOrder {
            items: vec![OrderItem {
                listing_id: 1,
                options: vec![],
                amount: 2,
            }],
        };
        let binary = hook.to_binary().unwrap();
        assert_eq!(
            binary.as_slice(),
            br#"{"create_order":{"items":[{"listing_id":1,"options":[],"amount":2}]}}"#
        );

        let env = composer()
            .receive(Uint128::new(200), binary, "juno1buyer", None)
            .unwrap();
        let json = env.payload_json().unwrap();
        let encoded = json["receive"]["msg"].as_str().unwrap();
        let decoded: Binary = serde_json::from_value(serde_json::Value::String(encoded.to_string())).unwrap();
        let back: ReceiveMsg = serde_json::from_slice(decoded.as_slice()).unwrap();
        assert_eq!(back, hook);
    }

    #[test]
    fn test_every_action_has_single_key() {
        let c = composer();
        let envelopes = vec![
            c.update_admins(vec!["juno1a".to_string()], None).unwrap(),
            c.update_config("juno1token", "juno1trust", "juno1treasury", None).unwrap(),
            c.delete_listing(1, None).unwrap(),
            c.complete_order(1, None).unwrap(),
            c.refund_order(1, None).unwrap(),
            c.cancel_order(1, None).unwrap(),
            c.create_order(vec![], None).unwrap(),
            c.update_listing(
                4,
                ListingParams {
                    active: false,
                    attributes: attributes(),
                    options: vec![],
                    price: Uint128::new(1),
                },
                None,
            )
            .unwrap(),
        ];
        let expected = [
            "update_admins",
            "update_config",
            "delete_listing",
            "complete_order",
            "refund_order",
            "cancel_order",
            "create_order",
            "update_listing",
        ];
        for (env, name) in envelopes.iter().zip(expected) {
            assert_eq!(env.action_name().as_deref(), Some(name));
        }
    }
}
