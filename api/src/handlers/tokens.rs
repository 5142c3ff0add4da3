// Handlers for token-related API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::entity::tokens;
use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::models::{GetTokensQuery, PaginatedResponse};

/// Handler for GET /tokens - Optionally filtered by `type` (ERC20, ERC721, ERC1155)
pub async fn get_tokens(
    State(state): State<AppState>,
    Query(params): Query<GetTokensQuery>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<tokens::Model>>>> {
    let (rows, total) = state
        .repositories
        .tokens
        .get_all_paginated(params.token_type.as_deref(), &params.pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &params.pagination)))
}

/// Handler for GET /tokens/{contract_address}
pub async fn get_token(
    State(state): State<AppState>,
    Path(contract_address): Path<String>,
) -> ExplorerResult<Json<tokens::Model>> {
    state
        .repositories
        .tokens
        .get_by_contract(&contract_address)
        .await?
        .map(Json)
        .ok_or_else(|| ExplorerError::NotFound(format!("Token {} not found", contract_address)))
}
