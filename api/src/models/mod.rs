// API request/response models

pub mod pagination;

pub use pagination::{PaginatedResponse, PaginationParams};

use serde::{Deserialize, Serialize};

use crate::entity::{events, extrinsics};

/// Query parameters for GET /events
#[derive(Debug, Deserialize)]
pub struct GetEventsQuery {
    pub extrinsic_id: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Query parameters for GET /tokens
#[derive(Debug, Deserialize)]
pub struct GetTokensQuery {
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

/// Query parameters for GET /addresses/{address}/report
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// Single extrinsic with the events it emitted
#[derive(Debug, Serialize)]
pub struct ExtrinsicDetail {
    #[serde(flatten)]
    pub extrinsic: extrinsics::Model,
    pub events: Vec<events::Model>,
}

/// Response structure for GET /chain/summary
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChainSummary {
    pub signed_extrinsics: u64,
    pub evm_transactions: u64,
    pub tokens: u64,
    pub latest_block: Option<i64>,
}
