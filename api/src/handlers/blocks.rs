// Handlers for block-related API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::entity::{blocks, evm_transactions, extrinsics};
use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::models::{PaginatedResponse, PaginationParams};

/// Handler for GET /blocks - Returns blocks newest first
pub async fn get_blocks(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<blocks::Model>>>> {
    let (rows, total) = state.repositories.blocks.get_all_paginated(&pagination).await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /blocks/{number}
pub async fn get_block(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> ExplorerResult<Json<blocks::Model>> {
    state
        .repositories
        .blocks
        .get_by_number(number)
        .await?
        .map(Json)
        .ok_or_else(|| ExplorerError::NotFound(format!("Block {} not found", number)))
}

/// Handler for GET /blocks/{number}/extrinsics
pub async fn get_block_extrinsics(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> ExplorerResult<Json<Vec<extrinsics::Model>>> {
    let rows = state.repositories.extrinsics.get_for_block(number).await?;
    Ok(Json(rows))
}

/// Handler for GET /blocks/{number}/transactions
pub async fn get_block_transactions(
    State(state): State<AppState>,
    Path(number): Path<i64>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<evm_transactions::Model>>>> {
    let (rows, total) = state
        .repositories
        .evm_transactions
        .get_for_block(number, &pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}
