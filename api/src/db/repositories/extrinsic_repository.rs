// Extrinsic database operations

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::db::error::DbError;
use crate::entity::extrinsics;
use crate::models::PaginationParams;

/// Repository for extrinsic database operations
#[derive(Clone)]
pub struct ExtrinsicRepository {
    conn: DatabaseConnection,
}

impl ExtrinsicRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        ExtrinsicRepository { conn }
    }

    /// Looks up an extrinsic by its id or by its retro id
    pub async fn get_by_id(&self, id: &str) -> Result<Option<extrinsics::Model>, DbError> {
        extrinsics::Entity::find()
            .filter(
                Condition::any()
                    .add(extrinsics::Column::ExtrinsicId.eq(id))
                    .add(extrinsics::Column::RetroExtrinsicId.eq(id)),
            )
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn get_by_retro_id(
        &self,
        retro_id: &str,
    ) -> Result<Option<extrinsics::Model>, DbError> {
        extrinsics::Entity::find()
            .filter(extrinsics::Column::RetroExtrinsicId.eq(retro_id))
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn get_for_block(&self, block: i64) -> Result<Vec<extrinsics::Model>, DbError> {
        extrinsics::Entity::find()
            .filter(extrinsics::Column::Block.eq(block))
            .order_by_asc(extrinsics::Column::ExtrinsicId)
            .all(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// User-facing extrinsics, without the per-block timestamp inherent
    pub async fn get_all_paginated(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<extrinsics::Model>, u64), DbError> {
        let query = extrinsics::Entity::find().filter(
            Condition::all()
                .add(extrinsics::Column::Section.ne("timestamp"))
                .add(extrinsics::Column::Method.ne("set")),
        );
        self.paginate(query, pagination).await
    }

    /// Extrinsics signed by an address or submitted through its futurepass
    pub async fn get_for_address(
        &self,
        address: &str,
        pagination: &PaginationParams,
    ) -> Result<(Vec<extrinsics::Model>, u64), DbError> {
        let address = address.to_lowercase();
        let query = extrinsics::Entity::find().filter(
            Condition::any()
                .add(Expr::cust_with_values("lower(signer) = $1", [address.clone()]))
                .add(Expr::cust_with_values(
                    "lower(args ->> 'futurepass') = $1",
                    [address],
                )),
        );
        self.paginate(query, pagination).await
    }

    pub async fn count_signed(&self) -> Result<u64, DbError> {
        extrinsics::Entity::find()
            .filter(extrinsics::Column::IsSigned.eq(true))
            .count(&self.conn)
            .await
            .map_err(Into::into)
    }

    async fn paginate(
        &self,
        query: Select<extrinsics::Entity>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<extrinsics::Model>, u64), DbError> {
        let total = query.clone().count(&self.conn).await?;

        let rows = query
            .order_by_desc(extrinsics::Column::Block)
            .order_by_desc(extrinsics::Column::ExtrinsicId)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }
}
