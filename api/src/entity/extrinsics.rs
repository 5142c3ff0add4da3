//! SeaORM Entity for extrinsics table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extrinsics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub extrinsic_id: String,
    /// Legacy identifier of the form `0000000000-000000-abcde`
    #[sea_orm(column_type = "Text", nullable)]
    pub retro_extrinsic_id: Option<String>,
    pub block: i64,
    #[sea_orm(column_type = "Text")]
    pub hash: String,
    #[sea_orm(column_type = "Text")]
    pub section: String,
    #[sea_orm(column_type = "Text")]
    pub method: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub args: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub signer: Option<String>,
    pub is_signed: bool,
    pub success: bool,
    /// Seconds since epoch
    pub timestamp: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
