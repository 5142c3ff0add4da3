//! SeaORM Entity for blocks table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: i64,
    #[sea_orm(column_type = "Text")]
    pub hash: String,
    #[sea_orm(column_type = "Text")]
    pub parent_hash: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    pub spec_version: Option<i32>,
    pub extrinsics_count: i32,
    pub events_count: i32,
    pub is_finalized: bool,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub evm_block: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
