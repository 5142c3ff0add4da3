//! Entity module for database models

pub mod blocks;
pub mod events;
pub mod evm_transactions;
pub mod extrinsics;
pub mod tokens;
