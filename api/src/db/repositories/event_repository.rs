// Native event database operations

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::db::error::DbError;
use crate::entity::events;
use crate::models::PaginationParams;
use crate::services::statement::sources::{AddressFilter, EventSource, RawEvent, TimeWindow};

/// (section, method, args field) triples listed as native transfers of an address
const NATIVE_TRANSFER_FIELDS: &[(&str, &str, &str)] = &[
    ("assets", "Transferred", "from"),
    ("assets", "Transferred", "to"),
    ("assets", "ApprovedTransfer", "source"),
    ("assets", "Issued", "source"),
    ("assets", "Issued", "owner"),
    ("assets", "Burned", "owner"),
    ("balances", "Reserved", "who"),
    ("balances", "Transfer", "from"),
    ("balances", "Transfer", "to"),
    ("balances", "Unreserved", "who"),
    ("nft", "Transfer", "previousOwner"),
    ("nft", "Transfer", "newOwner"),
    ("nft", "Mint", "owner"),
    ("sft", "Mint", "owner"),
    ("sft", "Transfer", "previousOwner"),
    ("sft", "Transfer", "newOwner"),
];

pub fn native_transfer_filters(address: &str) -> Vec<AddressFilter> {
    NATIVE_TRANSFER_FIELDS
        .iter()
        .map(|&(section, method, field)| AddressFilter {
            section,
            method,
            field,
            address: address.to_string(),
        })
        .collect()
}

/// Any of the filters; addresses compare case-insensitively
fn address_condition(filters: &[AddressFilter]) -> Condition {
    filters.iter().fold(Condition::any(), |cond, f| {
        cond.add(
            Condition::all()
                .add(events::Column::Section.eq(f.section))
                .add(events::Column::Method.eq(f.method))
                .add(Expr::cust_with_values(
                    format!("lower(args ->> '{}') = $1", f.field),
                    [f.address.to_lowercase()],
                )),
        )
    })
}

/// Repository for event database operations
#[derive(Clone)]
pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        EventRepository { conn }
    }

    pub async fn get_by_id(&self, event_id: &str) -> Result<Option<events::Model>, DbError> {
        events::Entity::find_by_id(event_id.to_string())
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// All events emitted by one extrinsic, in emission order
    pub async fn get_for_extrinsic(&self, extrinsic_id: &str) -> Result<Vec<events::Model>, DbError> {
        events::Entity::find()
            .filter(events::Column::ExtrinsicId.eq(extrinsic_id))
            .order_by_asc(events::Column::EventId)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Events newest block first, optionally restricted to one extrinsic
    pub async fn get_paginated(
        &self,
        extrinsic_id: Option<&str>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<events::Model>, u64), DbError> {
        let mut query = events::Entity::find();
        if let Some(extrinsic_id) = extrinsic_id {
            query = query.filter(events::Column::ExtrinsicId.eq(extrinsic_id));
        }

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_desc(events::Column::BlockNumber)
            .order_by_asc(events::Column::EventId)
            .offset(pagination.offset())
            .limit(pagination.page_size())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }

    /// Asset, balance, nft and sft movements touching an address
    pub async fn get_native_transfers(
        &self,
        address: &str,
        pagination: &PaginationParams,
    ) -> Result<(Vec<events::Model>, u64), DbError> {
        let query = events::Entity::find().filter(address_condition(&native_transfer_filters(address)));

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_desc(events::Column::BlockNumber)
            .order_by_asc(events::Column::EventId)
            .offset(pagination.offset())
            .limit(pagination.page_size())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }
}

impl From<events::Model> for RawEvent {
    fn from(model: events::Model) -> Self {
        RawEvent {
            event_id: model.event_id,
            extrinsic_id: model.extrinsic_id,
            section: model.section,
            method: model.method,
            args: model.args,
            timestamp: model.timestamp,
        }
    }
}

#[async_trait]
impl EventSource for EventRepository {
    async fn find_events(
        &self,
        filters: &[AddressFilter],
        window: &TimeWindow,
    ) -> Result<Vec<RawEvent>, DbError> {
        if filters.is_empty() {
            return Ok(vec![]);
        }

        let rows = events::Entity::find()
            .filter(events::Column::Timestamp.between(window.from_secs(), window.to_secs()))
            .filter(address_condition(filters))
            .order_by_desc(events::Column::Timestamp)
            .order_by_desc(events::Column::EventId)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(RawEvent::from).collect())
    }
}
