// Handlers for per-address API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::entity::{events, evm_transactions, extrinsics};
use crate::error::{ExplorerError, ExplorerResult};
use crate::handlers::AppState;
use crate::models::{PaginatedResponse, PaginationParams, ReportQuery};
use crate::services::address::parse_address;
use crate::services::statement::sources::EvmTransfer;
use crate::services::statement::StatementError;

fn require_address(input: &str) -> ExplorerResult<String> {
    parse_address(input)
        .ok_or_else(|| ExplorerError::InvalidRequest(format!("Invalid address: {}", input)))
}

/// Wraps a CSV body as a download
fn csv_attachment(body: String, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// Handler for GET /addresses/{address}/extrinsics
pub async fn get_address_extrinsics(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<extrinsics::Model>>>> {
    let address = require_address(&address)?;
    let (rows, total) = state
        .repositories
        .extrinsics
        .get_for_address(&address, &pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /addresses/{address}/transactions
pub async fn get_address_transactions(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<evm_transactions::Model>>>> {
    let address = require_address(&address)?;
    let (rows, total) = state
        .repositories
        .evm_transactions
        .get_for_address(&address, &pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /addresses/{address}/native-transfers
pub async fn get_address_native_transfers(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<events::Model>>>> {
    let address = require_address(&address)?;
    let (rows, total) = state
        .repositories
        .events
        .get_native_transfers(&address, &pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /addresses/{address}/token-transfers
pub async fn get_address_token_transfers(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> ExplorerResult<Json<PaginatedResponse<Vec<EvmTransfer>>>> {
    let address = require_address(&address)?;
    let (rows, total) = state
        .repositories
        .evm_transactions
        .get_token_transfers(&address, &pagination)
        .await?;
    Ok(Json(PaginatedResponse::new(rows, total, &pagination)))
}

/// Handler for GET /addresses/{address}/report - CSV statement for a date range
pub async fn get_address_report(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<ReportQuery>,
) -> ExplorerResult<Response> {
    let csv = state
        .statements
        .generate_report(&address, &params.from, &params.to)
        .await
        .map_err(|e| {
            match &e {
                StatementError::InvalidInput(_) => tracing::warn!("Report for {} rejected: {}", address, e),
                _ => tracing::error!("Report for {} failed: {}", address, e),
            }
            ExplorerError::from(e)
        })?;

    Ok(csv_attachment(csv, &format!("statement-{}.csv", address.trim())))
}
