// Handlers for EVM transaction API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::entity::evm_transactions;
use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::models::{PaginatedResponse, PaginationParams};

/// Handler for GET /transactions - Returns all EVM transactions with pagination
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<evm_transactions::Model>>>> {
    let (rows, total) = state
        .repositories
        .evm_transactions
        .get_all_paginated(&pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /transactions/{hash} - Returns a single transaction by hash
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> ExplorerResult<Json<evm_transactions::Model>> {
    let tx = state
        .repositories
        .evm_transactions
        .get_by_hash(&hash)
        .await
        .map_err(|e| {
            tracing::warn!("Database error in get_transaction: {:?}", e);
            ExplorerError::from(e)
        })?;

    match tx {
        Some(model) => Ok(Json(model)),
        None => Err(ExplorerError::NotFound(format!(
            "Transaction {} not found",
            hash
        ))),
    }
}
