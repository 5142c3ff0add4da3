// Handlers Module
// This module contains the API endpoint handlers

pub mod addresses;
pub mod blocks;
pub mod chain;
pub mod events;
pub mod extrinsics;
pub mod health;
pub mod tokens;
pub mod transactions;

use std::sync::Arc;

pub use addresses::{
    get_address_extrinsics, get_address_native_transfers, get_address_report,
    get_address_token_transfers, get_address_transactions,
};
pub use blocks::{get_block, get_block_extrinsics, get_block_transactions, get_blocks};
pub use chain::get_chain_summary;
pub use events::{get_event, get_events};
pub use extrinsics::{get_extrinsic, get_extrinsics};
pub use health::{health_check, readiness_check};
pub use tokens::{get_token, get_tokens};
pub use transactions::{get_transaction, get_transactions};

use crate::config::ApiConfig;
use crate::db::{DbPool, Repositories};
use crate::services::statement::StatementService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    pub repositories: Repositories,
    pub statements: StatementService,
}

impl AppState {
    pub fn new(pool: DbPool, config: &ApiConfig) -> Self {
        let repositories = pool.repositories();
        let statements = StatementService::new(
            Arc::new(repositories.events.clone()),
            Arc::new(repositories.evm_transactions.clone()),
            Arc::new(repositories.tokens.clone()),
            config.native_asset_id,
        );

        AppState {
            pool: Arc::new(pool),
            repositories,
            statements,
        }
    }
}
