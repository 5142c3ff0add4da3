use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `args` keys holding the addresses native transfer events are looked up by
const EVENT_ADDRESS_FIELDS: &[&str] = &[
    "from",
    "to",
    "who",
    "owner",
    "source",
    "previousOwner",
    "newOwner",
];

const EXTRINSIC_ADDRESS_FIELDS: &[&str] = &["futurepass"];

fn lower_arg_index_sql(table: &str, field: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_args_{index}_lower ON {table} (lower(args ->> '{field}'))",
        index = field.to_lowercase(),
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blocks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Blocks::Number).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(Blocks::Hash).text().not_null())
                    .col(ColumnDef::new(Blocks::ParentHash).text().not_null())
                    .col(ColumnDef::new(Blocks::Timestamp).big_integer().not_null()) // milliseconds
                    .col(ColumnDef::new(Blocks::SpecVersion).integer())
                    .col(ColumnDef::new(Blocks::ExtrinsicsCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Blocks::EventsCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Blocks::IsFinalized).boolean().not_null().default(false))
                    .col(ColumnDef::new(Blocks::EvmBlock).json_binary())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blocks_hash")
                    .table(Blocks::Table)
                    .col(Blocks::Hash)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Extrinsics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Extrinsics::ExtrinsicId).text().not_null().primary_key())
                    .col(ColumnDef::new(Extrinsics::RetroExtrinsicId).text())
                    .col(ColumnDef::new(Extrinsics::Block).big_integer().not_null())
                    .col(ColumnDef::new(Extrinsics::Hash).text().not_null())
                    .col(ColumnDef::new(Extrinsics::Section).text().not_null())
                    .col(ColumnDef::new(Extrinsics::Method).text().not_null())
                    .col(ColumnDef::new(Extrinsics::Args).json_binary().not_null().default("{}"))
                    .col(ColumnDef::new(Extrinsics::Signer).text())
                    .col(ColumnDef::new(Extrinsics::IsSigned).boolean().not_null().default(false))
                    .col(ColumnDef::new(Extrinsics::Success).boolean().not_null().default(true))
                    .col(ColumnDef::new(Extrinsics::Timestamp).big_integer().not_null()) // seconds
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_extrinsics_block")
                    .table(Extrinsics::Table)
                    .col(Extrinsics::Block)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_extrinsics_retro_id")
                    .table(Extrinsics::Table)
                    .col(Extrinsics::RetroExtrinsicId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::EventId).text().not_null().primary_key())
                    .col(ColumnDef::new(Events::ExtrinsicId).text())
                    .col(ColumnDef::new(Events::BlockNumber).big_integer().not_null())
                    .col(ColumnDef::new(Events::Section).text().not_null())
                    .col(ColumnDef::new(Events::Method).text().not_null())
                    .col(ColumnDef::new(Events::Args).json_binary().not_null().default("{}"))
                    .col(ColumnDef::new(Events::Timestamp).big_integer().not_null()) // seconds
                    .to_owned(),
            )
            .await?;

        // Statement and native transfer lookups filter on these first
        manager
            .create_index(
                Index::create()
                    .name("idx_events_section_method_timestamp")
                    .table(Events::Table)
                    .col(Events::Section)
                    .col(Events::Method)
                    .col(Events::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_extrinsic_id")
                    .table(Events::Table)
                    .col(Events::ExtrinsicId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Address filters compare lower(args ->> field), one expression index per field
        for sql in EVENT_ADDRESS_FIELDS
            .iter()
            .map(|field| lower_arg_index_sql("events", field))
            .chain(EXTRINSIC_ADDRESS_FIELDS.iter().map(|field| lower_arg_index_sql("extrinsics", field)))
        {
            manager.get_connection().execute_unprepared(&sql).await?;
        }

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_extrinsics_signer_lower ON extrinsics (lower(signer))",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Extrinsics::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blocks::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Blocks {
    Table,
    Number,
    Hash,
    ParentHash,
    Timestamp,
    SpecVersion,
    ExtrinsicsCount,
    EventsCount,
    IsFinalized,
    EvmBlock,
}

#[derive(DeriveIden)]
enum Extrinsics {
    Table,
    ExtrinsicId,
    RetroExtrinsicId,
    Block,
    Hash,
    Section,
    Method,
    Args,
    Signer,
    IsSigned,
    Success,
    Timestamp,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    EventId,
    ExtrinsicId,
    BlockNumber,
    Section,
    Method,
    Args,
    Timestamp,
}
