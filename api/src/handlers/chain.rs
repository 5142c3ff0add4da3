// Handler for chain-wide figures

use axum::{extract::State, Json};

use crate::error::ExplorerResult;
use crate::handlers::AppState;
use crate::models::ChainSummary;

/// Handler for GET /chain/summary
pub async fn get_chain_summary(State(state): State<AppState>) -> ExplorerResult<Json<ChainSummary>> {
    let repos = &state.repositories;
    let (signed_extrinsics, evm_transactions, tokens, latest) = tokio::try_join!(
        repos.extrinsics.count_signed(),
        repos.evm_transactions.count(),
        repos.tokens.count(),
        repos.blocks.get_latest(),
    )?;

    Ok(Json(ChainSummary {
        signed_extrinsics,
        evm_transactions,
        tokens,
        latest_block: latest.map(|block| block.number),
    }))
}
