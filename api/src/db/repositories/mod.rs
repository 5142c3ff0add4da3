// Database repository management

mod block_repository;
mod event_repository;
mod evm_transaction_repository;
mod extrinsic_repository;
mod token_repository;

pub use block_repository::BlockRepository;
pub use event_repository::EventRepository;
pub use evm_transaction_repository::EvmTransactionRepository;
pub use extrinsic_repository::ExtrinsicRepository;
pub use token_repository::TokenRepository;

use sea_orm::DatabaseConnection;

/// Container for all database repositories
#[derive(Clone)]
pub struct Repositories {
    pub blocks: BlockRepository,
    pub extrinsics: ExtrinsicRepository,
    pub events: EventRepository,
    pub evm_transactions: EvmTransactionRepository,
    pub tokens: TokenRepository,
}

impl Repositories {
    /// Creates a new repositories container with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Repositories {
            blocks: BlockRepository::new(conn.clone()),
            extrinsics: ExtrinsicRepository::new(conn.clone()),
            events: EventRepository::new(conn.clone()),
            evm_transactions: EvmTransactionRepository::new(conn.clone()),
            tokens: TokenRepository::new(conn),
        }
    }
}
