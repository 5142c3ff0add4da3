// Handlers for event-related API endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::entity::events;
use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::models::{GetEventsQuery, PaginatedResponse};

/// Retro extrinsic ids look like `0000123456-000002-1a2b3`
pub fn is_retro_extrinsic_id(id: &str) -> bool {
    let parts: Vec<&str> = id.split('-').collect();
    match parts.as_slice() {
        [block, index, hash] => {
            block.len() == 10
                && block.bytes().all(|b| b.is_ascii_digit())
                && index.len() == 6
                && index.bytes().all(|b| b.is_ascii_digit())
                && hash.len() == 5
                && hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        }
        _ => false,
    }
}

/// Handler for GET /events - Optionally scoped to one extrinsic
pub async fn get_events(
    State(state): State<AppState>,
    Query(params): Query<GetEventsQuery>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<events::Model>>>> {
    let extrinsic_id = match params.extrinsic_id {
        Some(id) if is_retro_extrinsic_id(&id) => {
            let extrinsic = state
                .repositories
                .extrinsics
                .get_by_retro_id(&id)
                .await?
                .ok_or_else(|| ExplorerError::NotFound(format!("Extrinsic {} not found", id)))?;
            Some(extrinsic.extrinsic_id)
        }
        other => other,
    };

    let (rows, total) = state
        .repositories
        .events
        .get_paginated(extrinsic_id.as_deref(), &params.pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &params.pagination)))
}

/// Handler for GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ExplorerResult<Json<events::Model>> {
    state
        .repositories
        .events
        .get_by_id(&event_id)
        .await?
        .map(Json)
        .ok_or_else(|| ExplorerError::NotFound(format!("Event {} not found", event_id)))
}
