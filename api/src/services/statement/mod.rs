//! Address activity statements.
//!
//! A statement lists every value movement of one address over a date range,
//! combining native chain events (assets, balances and nft pallets) with EVM
//! token transfer logs into a single CSV ledger.

pub mod amount;
pub mod classifier;
pub mod error;
pub mod evm_ledger;
pub mod ledger;
pub mod native_ledger;
pub mod sources;
pub mod token_resolver;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::services::address::parse_address;
pub use error::StatementError;
use evm_ledger::build_evm_ledger;
use ledger::assemble;
use native_ledger::build_native_ledger;
use sources::{EventSource, EvmTransferSource, TimeWindow, TokenSource};
use token_resolver::TokenResolver;

/// Validated statement parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub address: String,
    pub window: TimeWindow,
}

impl StatementRequest {
    /// Checks the address and both dates; `to` is widened to the end of its UTC day
    pub fn parse(address: &str, from: &str, to: &str) -> Result<Self, StatementError> {
        let address = parse_address(address)
            .ok_or_else(|| StatementError::InvalidInput(format!("Invalid address provided: {}", address)))?;
        let from = parse_date(from)
            .ok_or_else(|| StatementError::InvalidInput(format!("Invalid from date provided: {}", from)))?;
        let to = parse_date(to)
            .ok_or_else(|| StatementError::InvalidInput(format!("Invalid to date provided: {}", to)))?;

        if from > to {
            return Err(StatementError::InvalidInput(
                "From date cant be after to date".to_string(),
            ));
        }

        Ok(Self {
            address,
            window: TimeWindow {
                from_ms: from.timestamp_millis(),
                to_ms: end_of_day(to).timestamp_millis(),
            },
        })
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) and plain dates
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn end_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|eod| eod.and_utc())
        .unwrap_or(dt)
}

/// Produces address statements from the event, EVM transaction and token stores
#[derive(Clone)]
pub struct StatementService {
    events: Arc<dyn EventSource>,
    transfers: Arc<dyn EvmTransferSource>,
    tokens: Arc<dyn TokenSource>,
    native_asset_id: i64,
}

impl StatementService {
    pub fn new(
        events: Arc<dyn EventSource>,
        transfers: Arc<dyn EvmTransferSource>,
        tokens: Arc<dyn TokenSource>,
        native_asset_id: i64,
    ) -> Self {
        Self {
            events,
            transfers,
            tokens,
            native_asset_id,
        }
    }

    /// Renders the CSV statement of `address` between `from` and `to` (inclusive).
    ///
    /// Input is validated before any store is queried. Token lookups are
    /// memoized for this call only.
    pub async fn generate_report(&self, address: &str, from: &str, to: &str) -> Result<String, StatementError> {
        let request = StatementRequest::parse(address, from, to)?;
        let mut resolver = TokenResolver::new(self.tokens.as_ref());

        let native_rows = build_native_ledger(
            self.events.as_ref(),
            &mut resolver,
            &request.address,
            &request.window,
            self.native_asset_id,
        )
        .await?;
        let evm_rows = build_evm_ledger(self.transfers.as_ref(), &request.address, &request.window).await?;

        tracing::info!(
            "Statement for {}: {} native rows, {} EVM rows, {} tokens resolved",
            request.address,
            native_rows.len(),
            evm_rows.len(),
            resolver.cached()
        );

        assemble(&native_rows, &evm_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::statement::sources::{AssetRef, EvmSubEvent, TokenMetadata};
    use crate::services::statement::testing::{event, MemoryStore};
    use serde_json::json;

    const X: &str = "0xE04CC55ebEE1cBCE552f250e85c57B70B2E2625b";
    const Y: &str = "0x25451A4de12dcCc2D166922fA938E900fCc4ED24";
    const HEADER: &str = "Date,Tx Hash,Type,Amount,Currency,From,To";

    // 2024-03-10T12:00:00Z
    const MARCH_10_NOON: i64 = 1_710_072_000;

    fn service(store: MemoryStore) -> (StatementService, Arc<MemoryStore>) {
        let store = Arc::new(store);
        let service = StatementService::new(store.clone(), store.clone(), store.clone(), 1);
        (service, store)
    }

    fn root() -> TokenMetadata {
        TokenMetadata {
            name: "ROOT".to_string(),
            decimals: Some(18),
        }
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(parse_date("2024-03-10").unwrap().timestamp(), 1_710_028_800);
        assert_eq!(parse_date("2024-03-10T12:00:00Z").unwrap().timestamp(), MARCH_10_NOON);
        assert_eq!(parse_date("2024-03-10T14:00:00+02:00").unwrap().timestamp(), MARCH_10_NOON);
        assert_eq!(parse_date("2024-03-10T12:00:00").unwrap().timestamp(), MARCH_10_NOON);
        assert!(parse_date("10/03/2024").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_request_window_ends_at_end_of_day() {
        let request = StatementRequest::parse(X, "2024-03-01", "2024-03-10").unwrap();
        assert_eq!(request.window.from_ms, 1_709_251_200_000);
        assert_eq!(request.window.to_ms, 1_710_115_199_999);
        assert_eq!(request.window.to_secs(), 1_710_115_199);
    }

    #[test]
    fn test_same_day_range_is_valid() {
        assert!(StatementRequest::parse(X, "2024-03-10", "2024-03-10").is_ok());
    }

    #[test]
    fn test_invalid_requests() {
        let cases = [
            (X, "yesterday", "2024-03-10"),
            (X, "2024-03-10", "soon"),
            (X, "2024-03-11", "2024-03-10"),
            ("0x1234", "2024-03-01", "2024-03-10"),
            ("E04CC55ebEE1cBCE552f250e85c57B70B2E2625b", "2024-03-01", "2024-03-10"),
        ];
        for (address, from, to) in cases {
            assert!(
                matches!(StatementRequest::parse(address, from, to), Err(StatementError::InvalidInput(_))),
                "{} {} {}",
                address,
                from,
                to
            );
        }
    }

    #[tokio::test]
    async fn test_from_after_to_touches_no_store() {
        let (service, store) = service(MemoryStore::default());

        let err = service.generate_report(X, "2024-03-11", "2024-03-10").await.unwrap_err();

        assert!(matches!(err, StatementError::InvalidInput(_)));
        assert_eq!(store.total_queries(), 0);
    }

    #[tokio::test]
    async fn test_empty_range_yields_header_only() {
        let (service, _) = service(
            MemoryStore::default()
                .with_event(event(
                    "balances",
                    "Transfer",
                    json!({ "from": X, "to": Y, "amount": "1" }),
                    MARCH_10_NOON,
                ))
                .with_token(AssetRef::Asset(1), root()),
        );

        let text = service.generate_report(X, "2024-01-01", "2024-01-31").await.unwrap();
        assert_eq!(text, format!("{}\n", HEADER));
    }

    #[tokio::test]
    async fn test_asset_transfer_end_to_end() {
        let (service, _) = service(
            MemoryStore::default()
                .with_event(event(
                    "assets",
                    "Transferred",
                    json!({ "assetId": 1, "from": X, "to": Y, "amount": "1000000000000000000" }),
                    MARCH_10_NOON,
                ))
                .with_token(AssetRef::Asset(1), root()),
        );

        let text = service.generate_report(X, "2024-03-10", "2024-03-10").await.unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            format!("2024-03-10T12:00:00.000Z,{}-000001,out,1,ROOT,{},{}", MARCH_10_NOON, X, Y)
        );
        assert_eq!(lines.len(), 2);
    }

    #[tokio::test]
    async fn test_unresolved_asset_is_excluded() {
        let (service, _) = service(
            MemoryStore::default()
                .with_event(event(
                    "assets",
                    "Transferred",
                    json!({ "assetId": 1, "from": X, "to": Y, "amount": "1" }),
                    MARCH_10_NOON,
                ))
                .with_event(event(
                    "assets",
                    "Transferred",
                    json!({ "assetId": 99, "from": Y, "to": X, "amount": "1" }),
                    MARCH_10_NOON + 60,
                ))
                .with_token(AssetRef::Asset(1), root()),
        );

        let text = service.generate_report(X, "2024-03-01", "2024-03-31").await.unwrap();
        assert_eq!(text.lines().count(), 1 + 1);
    }

    #[tokio::test]
    async fn test_repeated_assets_query_token_store_once() {
        let (service, store) = service(
            MemoryStore::default()
                .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "1" }), MARCH_10_NOON))
                .with_event(event("balances", "Reserved", json!({ "who": X, "amount": "2" }), MARCH_10_NOON + 1))
                .with_event(event(
                    "assets",
                    "Transferred",
                    json!({ "assetId": 1, "from": Y, "to": X, "amount": "3" }),
                    MARCH_10_NOON + 2,
                ))
                .with_token(AssetRef::Asset(1), root()),
        );

        let text = service.generate_report(X, "2024-03-10", "2024-03-10").await.unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(store.token_queries(), 1);
    }

    #[tokio::test]
    async fn test_cache_does_not_outlive_a_report() {
        let (service, store) = service(
            MemoryStore::default()
                .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "1" }), MARCH_10_NOON))
                .with_token(AssetRef::Asset(1), root()),
        );

        service.generate_report(X, "2024-03-10", "2024-03-10").await.unwrap();
        service.generate_report(X, "2024-03-10", "2024-03-10").await.unwrap();

        assert_eq!(store.token_queries(), 2);
    }

    #[tokio::test]
    async fn test_native_rows_then_evm_rows() {
        let xrp = EvmSubEvent {
            event_name: "Transfer".to_string(),
            from: Some(Y.to_string()),
            to: Some(X.to_string()),
            token_type: Some("ERC20".to_string()),
            name: Some("XRP".to_string()),
            formatted_amount: Some("0.25".to_string()),
            token_id: None,
        };
        let (service, _) = service(
            MemoryStore::default()
                .with_event(event(
                    "balances",
                    "Transfer",
                    json!({ "from": X, "to": Y, "amount": "2000000000000000000" }),
                    MARCH_10_NOON - 3600,
                ))
                // newer than the native event, still listed after it
                .with_evm_transaction("0xfeed", MARCH_10_NOON * 1000, vec![xrp])
                .with_token(AssetRef::Asset(1), root()),
        );

        let text = service.generate_report(&X.to_lowercase(), "2024-03-10", "2024-03-10").await.unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",out,2,ROOT,"));
        assert_eq!(lines[2], format!("2024-03-10T12:00:00.000Z,0xfeed,in,0.25,XRP,{},{}", Y, X));
    }

    #[tokio::test]
    async fn test_store_failure_fails_the_report() {
        let (service, _) = service(MemoryStore::default().failing());

        let err = service.generate_report(X, "2024-03-10", "2024-03-10").await.unwrap_err();
        assert!(matches!(err, StatementError::StoreUnavailable(_)));
    }
}
