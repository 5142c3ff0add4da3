// In-memory stores for exercising the statement pipeline without Postgres

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::sources::{
    AddressFilter, AssetRef, EventSource, EvmSubEvent, EvmTransfer, EvmTransferSource, RawEvent,
    TimeWindow, TokenMetadata, TokenSource,
};
use crate::db::DbError;

#[derive(Default)]
pub struct MemoryStore {
    events: Vec<RawEvent>,
    evm_transactions: Vec<(String, i64, Vec<EvmSubEvent>)>,
    tokens: HashMap<AssetRef, TokenMetadata>,
    failing: bool,
    event_queries: AtomicUsize,
    evm_queries: AtomicUsize,
    token_queries: AtomicUsize,
}

impl MemoryStore {
    pub fn with_event(mut self, event: RawEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_evm_transaction(mut self, hash: &str, timestamp_ms: i64, events: Vec<EvmSubEvent>) -> Self {
        self.evm_transactions.push((hash.to_string(), timestamp_ms, events));
        self
    }

    pub fn with_token(mut self, asset: AssetRef, metadata: TokenMetadata) -> Self {
        self.tokens.insert(asset, metadata);
        self
    }

    /// Every query fails as if the database were down
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn event_queries(&self) -> usize {
        self.event_queries.load(Ordering::SeqCst)
    }

    pub fn evm_queries(&self) -> usize {
        self.evm_queries.load(Ordering::SeqCst)
    }

    pub fn token_queries(&self) -> usize {
        self.token_queries.load(Ordering::SeqCst)
    }

    pub fn total_queries(&self) -> usize {
        self.event_queries() + self.evm_queries() + self.token_queries()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.failing {
            Err(DbError::ConnectionError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn same_address(value: Option<&str>, address: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(address))
}

#[async_trait]
impl EventSource for MemoryStore {
    async fn find_events(
        &self,
        filters: &[AddressFilter],
        window: &TimeWindow,
    ) -> Result<Vec<RawEvent>, DbError> {
        self.event_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut found: Vec<RawEvent> = self
            .events
            .iter()
            .filter(|e| e.timestamp >= window.from_secs() && e.timestamp <= window.to_secs())
            .filter(|e| {
                filters.iter().any(|f| {
                    f.section == e.section
                        && f.method == e.method
                        && same_address(e.args.get(f.field).and_then(Value::as_str), &f.address)
                })
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }
}

#[async_trait]
impl EvmTransferSource for MemoryStore {
    async fn find_transfers(
        &self,
        address: &str,
        window: &TimeWindow,
    ) -> Result<Vec<EvmTransfer>, DbError> {
        self.evm_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        Ok(self
            .evm_transactions
            .iter()
            .filter(|(_, ts, _)| *ts >= window.from_ms && *ts <= window.to_ms)
            .flat_map(|(hash, ts, events)| {
                events
                    .iter()
                    .filter(|e| {
                        e.event_name == "Transfer"
                            && (same_address(e.from.as_deref(), address)
                                || same_address(e.to.as_deref(), address))
                    })
                    .map(|e| EvmTransfer {
                        hash: hash.clone(),
                        timestamp: *ts,
                        event: e.clone(),
                    })
            })
            .collect())
    }
}

#[async_trait]
impl TokenSource for MemoryStore {
    async fn find_token(&self, asset: AssetRef) -> Result<Option<TokenMetadata>, DbError> {
        self.token_queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.tokens.get(&asset).cloned())
    }
}

/// Builds a stored event with the given args
pub fn event(section: &str, method: &str, args: Value, timestamp: i64) -> RawEvent {
    RawEvent {
        event_id: format!("{}-{}-{}", timestamp, section, method),
        extrinsic_id: Some(format!("{}-000001", timestamp)),
        section: section.to_string(),
        method: method.to_string(),
        args,
        timestamp,
    }
}
