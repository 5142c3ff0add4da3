// Handlers for extrinsic-related API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::entity::extrinsics;
use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::models::{ExtrinsicDetail, PaginatedResponse, PaginationParams};

/// Handler for GET /extrinsics - Returns user extrinsics newest first
pub async fn get_extrinsics(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<extrinsics::Model>>>> {
    let (rows, total) = state
        .repositories
        .extrinsics
        .get_all_paginated(&pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /extrinsics/{id} - Accepts an extrinsic id or a retro id
pub async fn get_extrinsic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ExplorerResult<Json<ExtrinsicDetail>> {
    let extrinsic = state
        .repositories
        .extrinsics
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ExplorerError::NotFound(format!("Extrinsic {} not found", id)))?;

    let events = state
        .repositories
        .events
        .get_for_extrinsic(&extrinsic.extrinsic_id)
        .await?;

    Ok(Json(ExtrinsicDetail { extrinsic, events }))
}
