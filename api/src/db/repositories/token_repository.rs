// Token database operations

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::db::error::DbError;
use crate::entity::tokens;
use crate::models::PaginationParams;
use crate::services::statement::sources::{AssetRef, TokenMetadata, TokenSource};

/// Repository for token database operations
#[derive(Clone)]
pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        TokenRepository { conn }
    }

    /// Contract addresses are stored checksummed, lookups ignore case
    pub async fn get_by_contract(
        &self,
        contract_address: &str,
    ) -> Result<Option<tokens::Model>, DbError> {
        tokens::Entity::find()
            .filter(Expr::cust_with_values(
                "lower(contract_address) = $1",
                [contract_address.to_lowercase()],
            ))
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    pub async fn get_all_paginated(
        &self,
        token_type: Option<&str>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<tokens::Model>, u64), DbError> {
        let mut query = tokens::Entity::find();
        if let Some(token_type) = token_type {
            query = query.filter(tokens::Column::TokenType.eq(token_type));
        }

        let total = query.clone().count(&self.conn).await?;
        let rows = query
            .order_by_asc(tokens::Column::Id)
            .limit(pagination.page_size())
            .offset(pagination.offset())
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn count(&self) -> Result<u64, DbError> {
        tokens::Entity::find()
            .count(&self.conn)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl TokenSource for TokenRepository {
    async fn find_token(&self, asset: AssetRef) -> Result<Option<TokenMetadata>, DbError> {
        let query = match asset {
            AssetRef::Asset(id) => tokens::Entity::find().filter(tokens::Column::AssetId.eq(id)),
            AssetRef::Collection(id) => {
                tokens::Entity::find().filter(tokens::Column::CollectionId.eq(id))
            }
        };

        let token = query.one(&self.conn).await?;
        Ok(token.map(|t| TokenMetadata {
            name: t.name,
            decimals: t.decimals.and_then(|d| u8::try_from(d).ok()),
        }))
    }
}
