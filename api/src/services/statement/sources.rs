// Store seams consumed by the statement generator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::DbError;

/// Identifies a fungible asset or an NFT collection.
///
/// Asset ids and collection ids live in disjoint namespaces, so the same
/// integer wrapped in each variant refers to two different tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRef {
    Asset(i64),
    Collection(i64),
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetRef::Asset(id) => write!(f, "asset {}", id),
            AssetRef::Collection(id) => write!(f, "collection {}", id),
        }
    }
}

/// Display metadata of a token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    /// Decimal precision, absent for NFT collections
    pub decimals: Option<u8>,
}

/// One native chain event as stored by the indexer
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub event_id: String,
    pub extrinsic_id: Option<String>,
    pub section: String,
    pub method: String,
    pub args: Value,
    /// Seconds since epoch
    pub timestamp: i64,
}

/// Decoded EVM log attached to a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvmSubEvent {
    #[serde(default)]
    pub event_name: String,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    pub name: Option<String>,
    pub formatted_amount: Option<String>,
    #[serde(default, deserialize_with = "deserialize_token_id")]
    pub token_id: Option<String>,
}

/// Token ids are written either as JSON numbers or strings
fn deserialize_token_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A `Transfer` sub-event paired with its parent transaction
#[derive(Debug, Clone, Serialize)]
pub struct EvmTransfer {
    pub hash: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    pub event: EvmSubEvent,
}

/// Matches events of one (section, method) whose `args.<field>` equals an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFilter {
    pub section: &'static str,
    pub method: &'static str,
    pub field: &'static str,
    pub address: String,
}

/// Inclusive time window of one report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from_ms: i64,
    pub to_ms: i64,
}

impl TimeWindow {
    pub fn from_secs(&self) -> i64 {
        self.from_ms.div_euclid(1000)
    }

    pub fn to_secs(&self) -> i64 {
        self.to_ms.div_euclid(1000)
    }
}

#[async_trait]
pub trait EventSource: Send + Sync {
    /// Events matching any of `filters` inside the window, newest first
    async fn find_events(
        &self,
        filters: &[AddressFilter],
        window: &TimeWindow,
    ) -> Result<Vec<RawEvent>, DbError>;
}

#[async_trait]
pub trait EvmTransferSource: Send + Sync {
    /// `Transfer` sub-events sent or received by `address` inside the window
    async fn find_transfers(
        &self,
        address: &str,
        window: &TimeWindow,
    ) -> Result<Vec<EvmTransfer>, DbError>;
}

#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn find_token(&self, asset: AssetRef) -> Result<Option<TokenMetadata>, DbError>;
}
