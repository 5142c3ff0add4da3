use thiserror::Error;

use super::sources::AssetRef;
use crate::db::DbError;

/// Failures of the statement pipeline.
///
/// `InvalidAmount`, `MetadataNotFound` and `MalformedEvent` only ever drop a
/// single ledger row; the remaining kinds abort the whole report.
#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("No token metadata for {0}")]
    MetadataNotFound(AssetRef),
    #[error("Malformed event {event_id}: {reason}")]
    MalformedEvent { event_id: String, reason: String },
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StatementError {
    /// Whether the error only invalidates the row being built
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            StatementError::InvalidAmount(_)
                | StatementError::MetadataNotFound(_)
                | StatementError::MalformedEvent { .. }
        )
    }
}

impl From<DbError> for StatementError {
    fn from(err: DbError) -> Self {
        StatementError::StoreUnavailable(err.to_string())
    }
}

impl From<csv::Error> for StatementError {
    fn from(err: csv::Error) -> Self {
        StatementError::Serialization(err.to_string())
    }
}
