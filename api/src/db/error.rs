// Failures of the explorer's Postgres store

use thiserror::Error;

/// Store errors surfaced by the repositories.
///
/// Handlers turn both kinds into a 500; the statement pipeline reports them
/// as an unavailable store and aborts the report.
#[derive(Debug, Error)]
pub enum DbError {
    /// Pool exhausted or the server could not be reached
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// A statement against blocks, extrinsics, events, EVM transactions or tokens failed
    #[error("Database query error: {0}")]
    QueryError(String),
}

impl From<sea_orm::DbErr> for DbError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::ConnectionAcquire(e) => DbError::ConnectionError(e.to_string()),
            sea_orm::DbErr::Conn(e) => DbError::ConnectionError(e.to_string()),
            other => DbError::QueryError(other.to_string()),
        }
    }
}
