// Block database operations

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

use crate::db::error::DbError;
use crate::entity::blocks;
use crate::models::PaginationParams;

/// Repository for block database operations
#[derive(Clone)]
pub struct BlockRepository {
    conn: DatabaseConnection,
}

impl BlockRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        BlockRepository { conn }
    }

    pub async fn get_by_number(&self, number: i64) -> Result<Option<blocks::Model>, DbError> {
        blocks::Entity::find_by_id(number)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Highest indexed block, if any
    pub async fn get_latest(&self) -> Result<Option<blocks::Model>, DbError> {
        blocks::Entity::find()
            .order_by_desc(blocks::Column::Number)
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Retrieves blocks paginated, newest first
    pub async fn get_all_paginated(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<blocks::Model>, u64), DbError> {
        let total = blocks::Entity::find().count(&self.conn).await?;

        let rows = blocks::Entity::find()
            .order_by_desc(blocks::Column::Number)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }
}
