// EVM transaction database operations

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde_json::Value;

use crate::db::error::DbError;
use crate::entity::evm_transactions;
use crate::models::PaginationParams;
use crate::services::statement::sources::{EvmSubEvent, EvmTransfer, EvmTransferSource, TimeWindow};

/// Matches transactions carrying a `Transfer` log from or to `$1`
const TRANSFER_TOUCHES_ADDRESS: &str = "EXISTS (SELECT 1 FROM jsonb_array_elements(events) AS e \
     WHERE e ->> 'eventName' = 'Transfer' \
     AND (lower(e ->> 'from') = $1 OR lower(e ->> 'to') = $1))";

fn transfer_condition(address: &str) -> SimpleExpr {
    Expr::cust_with_values(TRANSFER_TOUCHES_ADDRESS, [address.to_lowercase()])
}

/// Flattens the `Transfer` logs of a transaction that involve `address`.
///
/// Logs that do not decode are skipped, the indexer stores whatever the
/// chain emitted.
pub fn transfers_touching(model: &evm_transactions::Model, address: &str) -> Vec<EvmTransfer> {
    let Value::Array(logs) = &model.events else {
        return vec![];
    };

    logs.iter()
        .filter_map(|log| serde_json::from_value::<EvmSubEvent>(log.clone()).ok())
        .filter(|event| event.event_name == "Transfer")
        .filter(|event| {
            let matches = |side: &Option<String>| {
                side.as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(address))
            };
            matches(&event.from) || matches(&event.to)
        })
        .map(|event| EvmTransfer {
            hash: model.hash.clone(),
            timestamp: model.timestamp,
            event,
        })
        .collect()
}

/// Repository for EVM transaction database operations
#[derive(Clone)]
pub struct EvmTransactionRepository {
    conn: DatabaseConnection,
}

impl EvmTransactionRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        EvmTransactionRepository { conn }
    }

    pub async fn get_by_hash(
        &self,
        hash: &str,
    ) -> Result<Option<evm_transactions::Model>, DbError> {
        evm_transactions::Entity::find()
            .filter(Expr::cust_with_values("lower(hash) = $1", [hash.to_lowercase()]))
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn get_for_block(
        &self,
        block_number: i64,
        pagination: &PaginationParams,
    ) -> Result<(Vec<evm_transactions::Model>, u64), DbError> {
        let query = evm_transactions::Entity::find()
            .filter(evm_transactions::Column::BlockNumber.eq(block_number));

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_asc(evm_transactions::Column::Hash)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn get_all_paginated(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<evm_transactions::Model>, u64), DbError> {
        let total = evm_transactions::Entity::find().count(&self.conn).await?;

        let rows = evm_transactions::Entity::find()
            .order_by_desc(evm_transactions::Column::BlockNumber)
            .order_by_desc(evm_transactions::Column::Timestamp)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }

    /// Transactions sent by or to an address
    pub async fn get_for_address(
        &self,
        address: &str,
        pagination: &PaginationParams,
    ) -> Result<(Vec<evm_transactions::Model>, u64), DbError> {
        let address = address.to_lowercase();
        let query = evm_transactions::Entity::find().filter(
            Condition::any()
                .add(Expr::cust_with_values("lower(from_address) = $1", [address.clone()]))
                .add(Expr::cust_with_values("lower(to_address) = $1", [address])),
        );

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_desc(evm_transactions::Column::Timestamp)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }

    /// Token transfers of an address. Pages count transactions, each page
    /// is flattened into its matching transfer logs.
    pub async fn get_token_transfers(
        &self,
        address: &str,
        pagination: &PaginationParams,
    ) -> Result<(Vec<EvmTransfer>, u64), DbError> {
        let query = evm_transactions::Entity::find().filter(transfer_condition(address));

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_desc(evm_transactions::Column::Timestamp)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        let transfers = rows
            .iter()
            .flat_map(|row| transfers_touching(row, address))
            .collect();
        Ok((transfers, total))
    }

    pub async fn count(&self) -> Result<u64, DbError> {
        evm_transactions::Entity::find()
            .count(&self.conn)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl EvmTransferSource for EvmTransactionRepository {
    async fn find_transfers(
        &self,
        address: &str,
        window: &TimeWindow,
    ) -> Result<Vec<EvmTransfer>, DbError> {
        let rows = evm_transactions::Entity::find()
            .filter(evm_transactions::Column::Timestamp.between(window.from_ms, window.to_ms))
            .filter(transfer_condition(address))
            .order_by_desc(evm_transactions::Column::Timestamp)
            .all(&self.conn)
            .await?;

        Ok(rows
            .iter()
            .flat_map(|row| transfers_touching(row, address))
            .collect())
    }
}
