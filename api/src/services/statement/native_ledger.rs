// Ledger rows from native chain events

use super::amount::format_units;
use super::classifier::{address_filters, classify, Classification, ClassifiedTransfer, TransferAmount};
use super::error::StatementError;
use super::ledger::{iso_date, LedgerRow, ZERO_ADDRESS};
use super::sources::{EventSource, RawEvent, TimeWindow};
use super::token_resolver::TokenResolver;

/// Builds one row per matching event, keeping the store's newest-first order.
///
/// Rows whose token cannot be resolved, whose fungible token has no decimals
/// recorded, or whose payload cannot be read are left out.
pub async fn build_native_ledger(
    events: &dyn EventSource,
    resolver: &mut TokenResolver<'_>,
    address: &str,
    window: &TimeWindow,
    native_asset_id: i64,
) -> Result<Vec<LedgerRow>, StatementError> {
    let filters = address_filters(address);
    let found = events.find_events(&filters, window).await?;
    tracing::debug!("Statement: {} native events for {}", found.len(), address);

    let mut rows = Vec::with_capacity(found.len());
    for event in &found {
        match build_row(event, resolver, address, native_asset_id).await {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => {}
            Err(e) if e.is_row_level() => {
                tracing::debug!("Statement: dropping event {}: {}", event.event_id, e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(rows)
}

async fn build_row(
    event: &RawEvent,
    resolver: &mut TokenResolver<'_>,
    address: &str,
    native_asset_id: i64,
) -> Result<Option<LedgerRow>, StatementError> {
    let transfer = match classify(event, native_asset_id)? {
        Classification::Transfer(transfer) => transfer,
        Classification::Skip => return Ok(None),
    };

    // A nameless token cannot fill the currency column
    let token = resolver
        .resolve(transfer.asset)
        .await?
        .filter(|t| !t.name.trim().is_empty())
        .ok_or(StatementError::MetadataNotFound(transfer.asset))?;

    let amount = match &transfer.amount {
        TransferAmount::SerialNumbers(serials) => format!("TokenIds: {}", serials.join("|")),
        TransferAmount::Raw(raw) => {
            let Some(decimals) = token.decimals else {
                tracing::debug!("Statement: {} has no decimals, skipping {}", transfer.asset, event.event_id);
                return Ok(None);
            };
            format_units(raw, decimals)?
        }
    };

    let direction = transfer.direction(address);
    let ClassifiedTransfer { from, to, .. } = transfer;

    Ok(Some(LedgerRow {
        date: iso_date(event.timestamp.saturating_mul(1000)),
        tx_ref: event.extrinsic_id.clone().unwrap_or_else(|| "-".to_string()),
        direction,
        amount,
        currency: token.name,
        from: from.unwrap_or_else(|| ZERO_ADDRESS.to_string()),
        to: to.unwrap_or_else(|| ZERO_ADDRESS.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::statement::classifier::Direction;
    use crate::services::statement::sources::{AssetRef, TokenMetadata};
    use crate::services::statement::testing::{event, MemoryStore};
    use serde_json::json;

    const X: &str = "0xE04CC55ebEE1cBCE552f250e85c57B70B2E2625b";
    const Y: &str = "0x25451A4de12dcCc2D166922fA938E900fCc4ED24";

    fn window() -> TimeWindow {
        TimeWindow {
            from_ms: 0,
            to_ms: 10_000_000_000_000,
        }
    }

    fn token(name: &str, decimals: Option<u8>) -> TokenMetadata {
        TokenMetadata {
            name: name.to_string(),
            decimals,
        }
    }

    #[tokio::test]
    async fn test_asset_transfer_row() {
        let store = MemoryStore::default()
            .with_event(event(
                "assets",
                "Transferred",
                json!({ "assetId": 1, "from": X, "to": Y, "amount": "1000000000000000000" }),
                1_700_000_000,
            ))
            .with_token(AssetRef::Asset(1), token("ROOT", Some(18)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].direction, Some(Direction::Out));
        assert_eq!(rows[0].amount, "1");
        assert_eq!(rows[0].currency, "ROOT");
        assert_eq!(rows[0].date, "2023-11-14T22:13:20.000Z");
        assert_eq!(rows[0].tx_ref, "1700000000-000001");
        assert_eq!(rows[0].from, X);
        assert_eq!(rows[0].to, Y);
    }

    #[tokio::test]
    async fn test_unresolved_asset_is_dropped() {
        let store = MemoryStore::default()
            .with_event(event(
                "assets",
                "Transferred",
                json!({ "assetId": 1, "from": X, "to": Y, "amount": "10" }),
                30,
            ))
            .with_event(event(
                "assets",
                "Transferred",
                json!({ "assetId": 404, "from": Y, "to": X, "amount": "10" }),
                20,
            ))
            .with_token(AssetRef::Asset(1), token("ROOT", Some(1)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, "1");
    }

    #[tokio::test]
    async fn test_large_json_number_amount() {
        let args: serde_json::Value = serde_json::from_str(&format!(
            r#"{{"from": "{}", "to": "{}", "amount": 25000000000000000000}}"#,
            X, Y
        ))
        .unwrap();
        let store = MemoryStore::default()
            .with_event(event("balances", "Transfer", args, 30))
            .with_token(AssetRef::Asset(1), token("ROOT", Some(18)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].direction, Some(Direction::Out));
        assert_eq!(rows[0].amount, "25");
        assert_eq!(rows[0].currency, "ROOT");
    }

    #[tokio::test]
    async fn test_nameless_token_is_dropped() {
        let store = MemoryStore::default()
            .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "10" }), 30))
            .with_event(event(
                "assets",
                "Transferred",
                json!({ "assetId": 9, "from": X, "to": Y, "amount": "10" }),
                20,
            ))
            .with_token(AssetRef::Asset(1), token("", Some(0)))
            .with_token(AssetRef::Asset(9), token("SYLO", Some(0)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].currency, "SYLO");
    }

    #[tokio::test]
    async fn test_fungible_without_decimals_is_dropped() {
        let store = MemoryStore::default()
            .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "10" }), 30))
            .with_token(AssetRef::Asset(1), token("ROOT", None));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_zero_decimals_keeps_integer_amount() {
        let store = MemoryStore::default()
            .with_event(event("balances", "Transfer", json!({ "from": Y, "to": X, "amount": "250" }), 30))
            .with_token(AssetRef::Asset(1), token("POINTS", Some(0)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, "250");
        assert_eq!(rows[0].direction, Some(Direction::In));
    }

    #[tokio::test]
    async fn test_invalid_amount_drops_only_that_row() {
        let store = MemoryStore::default()
            .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "-5" }), 40))
            .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "5" }), 30))
            .with_token(AssetRef::Asset(1), token("ROOT", Some(0)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, "5");
    }

    #[tokio::test]
    async fn test_nft_transfer_amount_lists_serials() {
        let store = MemoryStore::default()
            .with_event(event(
                "nft",
                "Transfer",
                json!({ "previousOwner": Y, "newOwner": X, "collectionId": 1, "serialNumbers": [4, 9] }),
                30,
            ))
            .with_token(AssetRef::Asset(1), token("ROOT", Some(6)))
            .with_token(AssetRef::Collection(1), token("Root Punks", None));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].amount.starts_with("TokenIds: "));
        assert_eq!(rows[0].amount, "TokenIds: 4|9");
        assert_eq!(rows[0].currency, "Root Punks");
        assert_eq!(rows[0].direction, Some(Direction::In));
    }

    #[tokio::test]
    async fn test_one_sided_rows_use_zero_address() {
        let store = MemoryStore::default()
            .with_event(event(
                "assets",
                "Issued",
                json!({ "assetId": 5, "owner": X, "totalSupply": "1000" }),
                30,
            ))
            .with_token(AssetRef::Asset(5), token("SYLO", Some(3)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();
        assert_eq!(rows[0].from, ZERO_ADDRESS);
        assert_eq!(rows[0].to, X);
        assert_eq!(rows[0].amount, "1");
    }

    #[tokio::test]
    async fn test_rows_keep_store_order_and_share_lookups() {
        let store = MemoryStore::default()
            .with_event(event("balances", "Transfer", json!({ "from": X, "to": Y, "amount": "1" }), 10))
            .with_event(event("balances", "Transfer", json!({ "from": Y, "to": X, "amount": "2" }), 30))
            .with_event(event("balances", "Reserved", json!({ "who": X, "amount": "3" }), 20))
            .with_token(AssetRef::Asset(1), token("ROOT", Some(0)));
        let mut resolver = TokenResolver::new(&store);

        let rows = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap();
        let amounts: Vec<&str> = rows.iter().map(|r| r.amount.as_str()).collect();

        assert_eq!(amounts, vec!["2", "3", "1"]);
        assert_eq!(store.token_queries(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_aborts() {
        let store = MemoryStore::default().failing();
        let mut resolver = TokenResolver::new(&store);

        let err = build_native_ledger(&store, &mut resolver, X, &window(), 1).await.unwrap_err();
        assert!(matches!(err, StatementError::StoreUnavailable(_)));
    }
}
