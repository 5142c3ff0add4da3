use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EvmTransactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EvmTransactions::Hash).text().not_null().primary_key())
                    .col(ColumnDef::new(EvmTransactions::BlockNumber).big_integer().not_null())
                    .col(ColumnDef::new(EvmTransactions::Timestamp).big_integer().not_null()) // milliseconds
                    .col(ColumnDef::new(EvmTransactions::FromAddress).text().not_null())
                    .col(ColumnDef::new(EvmTransactions::ToAddress).text())
                    .col(ColumnDef::new(EvmTransactions::Value).text().not_null().default("0"))
                    .col(ColumnDef::new(EvmTransactions::Status).text())
                    .col(ColumnDef::new(EvmTransactions::Events).json_binary().not_null().default("[]"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evm_transactions_block_number")
                    .table(EvmTransactions::Table)
                    .col(EvmTransactions::BlockNumber)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evm_transactions_timestamp")
                    .table(EvmTransactions::Table)
                    .col(EvmTransactions::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_evm_transactions_from_lower \
                 ON evm_transactions (lower(from_address))",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_evm_transactions_to_lower \
                 ON evm_transactions (lower(to_address))",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tokens::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tokens::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Tokens::ContractAddress).text().not_null())
                    .col(ColumnDef::new(Tokens::AssetId).big_integer())
                    .col(ColumnDef::new(Tokens::CollectionId).big_integer())
                    .col(ColumnDef::new(Tokens::Name).text().not_null())
                    .col(ColumnDef::new(Tokens::Symbol).text())
                    .col(ColumnDef::new(Tokens::Decimals).small_integer())
                    .col(ColumnDef::new(Tokens::TokenType).text().not_null())
                    .col(ColumnDef::new(Tokens::TotalSupply).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tokens_contract_address")
                    .table(Tokens::Table)
                    .col(Tokens::ContractAddress)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Contract and hash lookups ignore case
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_tokens_contract_address_lower \
                 ON tokens (lower(contract_address))",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_evm_transactions_hash_lower \
                 ON evm_transactions (lower(hash))",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tokens_asset_id")
                    .table(Tokens::Table)
                    .col(Tokens::AssetId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tokens_collection_id")
                    .table(Tokens::Table)
                    .col(Tokens::CollectionId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tokens::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvmTransactions::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum EvmTransactions {
    Table,
    Hash,
    BlockNumber,
    Timestamp,
    FromAddress,
    ToAddress,
    Value,
    Status,
    Events,
}

#[derive(DeriveIden)]
enum Tokens {
    Table,
    Id,
    ContractAddress,
    AssetId,
    CollectionId,
    Name,
    Symbol,
    Decimals,
    TokenType,
    TotalSupply,
}
