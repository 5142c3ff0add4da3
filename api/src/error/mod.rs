use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;
use crate::services::statement::StatementError;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;

impl ExplorerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExplorerError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ExplorerError::NotFound(_) => StatusCode::NOT_FOUND,
            ExplorerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ExplorerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err_msg = match self {
            ExplorerError::DatabaseError(msg)
            | ExplorerError::NotFound(msg)
            | ExplorerError::InvalidRequest(msg)
            | ExplorerError::InternalError(msg) => msg,
        };

        let body = Json(json!({
            "error": err_msg
        }));

        (status, body).into_response()
    }
}

// DbError to ExplorerError conversion implementation
impl From<DbError> for ExplorerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionError(msg) => ExplorerError::DatabaseError(msg),
            DbError::QueryError(msg) => ExplorerError::DatabaseError(msg),
        }
    }
}

impl From<StatementError> for ExplorerError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::InvalidInput(msg) => ExplorerError::InvalidRequest(msg),
            StatementError::StoreUnavailable(msg) => ExplorerError::DatabaseError(msg),
            other => ExplorerError::InternalError(other.to_string()),
        }
    }
}
