//! Native event taxonomy for address statements.
//!
//! Each recognized `(section, method)` pair maps to one [`EventShape`] row
//! describing where the counterparties, the amount and the asset reference
//! live inside `args`. Extraction is driven entirely by that table, and the
//! same table produces the address filters of the store query.

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use super::error::StatementError;
use super::sources::{AddressFilter, AssetRef, RawEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    AssetTransfer,
    AssetIssued,
    AssetBurned,
    BalanceTransfer,
    BalanceReserved,
    BalanceUnreserved,
    NftTransfer,
}

/// Where an event keeps the asset it moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    /// `args.<field>` holds a fungible asset id
    AssetId(&'static str),
    /// `args.<field>` holds an NFT collection id
    CollectionId(&'static str),
    /// The chain's native asset, not named in the event
    Native,
}

/// Where an event keeps the quantity it moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Raw(&'static str),
    SerialNumbers(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventShape {
    pub section: &'static str,
    pub method: &'static str,
    pub kind: TransferKind,
    pub from: Option<&'static str>,
    pub to: Option<&'static str>,
    pub amount: AmountField,
    pub asset: AssetField,
}

pub const EVENT_SHAPES: &[EventShape] = &[
    EventShape {
        section: "assets",
        method: "Transferred",
        kind: TransferKind::AssetTransfer,
        from: Some("from"),
        to: Some("to"),
        amount: AmountField::Raw("amount"),
        asset: AssetField::AssetId("assetId"),
    },
    EventShape {
        section: "assets",
        method: "Issued",
        kind: TransferKind::AssetIssued,
        from: None,
        to: Some("owner"),
        amount: AmountField::Raw("totalSupply"),
        asset: AssetField::AssetId("assetId"),
    },
    EventShape {
        section: "assets",
        method: "Burned",
        kind: TransferKind::AssetBurned,
        from: Some("owner"),
        to: None,
        amount: AmountField::Raw("balance"),
        asset: AssetField::AssetId("assetId"),
    },
    EventShape {
        section: "balances",
        method: "Transfer",
        kind: TransferKind::BalanceTransfer,
        from: Some("from"),
        to: Some("to"),
        amount: AmountField::Raw("amount"),
        asset: AssetField::Native,
    },
    EventShape {
        section: "balances",
        method: "Reserved",
        kind: TransferKind::BalanceReserved,
        from: Some("who"),
        to: None,
        amount: AmountField::Raw("amount"),
        asset: AssetField::Native,
    },
    EventShape {
        section: "balances",
        method: "Unreserved",
        kind: TransferKind::BalanceUnreserved,
        from: None,
        to: Some("who"),
        amount: AmountField::Raw("amount"),
        asset: AssetField::Native,
    },
    EventShape {
        section: "nft",
        method: "Transfer",
        kind: TransferKind::NftTransfer,
        from: Some("previousOwner"),
        to: Some("newOwner"),
        amount: AmountField::SerialNumbers("serialNumbers"),
        asset: AssetField::CollectionId("collectionId"),
    },
];

pub fn shape_for(section: &str, method: &str) -> Option<&'static EventShape> {
    EVENT_SHAPES
        .iter()
        .find(|shape| shape.section == section && shape.method == method)
}

/// One store filter per address-bearing field of every known shape
pub fn address_filters(address: &str) -> Vec<AddressFilter> {
    EVENT_SHAPES
        .iter()
        .flat_map(|shape| {
            [shape.from, shape.to]
                .into_iter()
                .flatten()
                .map(move |field| AddressFilter {
                    section: shape.section,
                    method: shape.method,
                    field,
                    address: address.to_string(),
                })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// Compares `address` against both counterparties, sender side first
pub fn infer_direction(address: &str, from: Option<&str>, to: Option<&str>) -> Option<Direction> {
    let matches = |side: Option<&str>| side.is_some_and(|s| s.eq_ignore_ascii_case(address));

    if matches(from) {
        Some(Direction::Out)
    } else if matches(to) {
        Some(Direction::In)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferAmount {
    /// Unscaled integer as recorded on chain
    Raw(String),
    SerialNumbers(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTransfer {
    pub kind: TransferKind,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: TransferAmount,
    pub asset: AssetRef,
}

impl ClassifiedTransfer {
    pub fn direction(&self, address: &str) -> Option<Direction> {
        infer_direction(address, self.from.as_deref(), self.to.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Transfer(ClassifiedTransfer),
    /// Outside the statement taxonomy
    Skip,
}

/// Classifies one stored event; `balances.*` events move `native_asset_id`
pub fn classify(event: &RawEvent, native_asset_id: i64) -> Result<Classification, StatementError> {
    let Some(shape) = shape_for(&event.section, &event.method) else {
        return Ok(Classification::Skip);
    };

    let malformed = |reason: String| StatementError::MalformedEvent {
        event_id: event.event_id.clone(),
        reason,
    };
    let args = &event.args;

    let address_at = |field: Option<&'static str>| -> Result<Option<String>, StatementError> {
        match field {
            None => Ok(None),
            Some(field) => args
                .get(field)
                .and_then(Value::as_str)
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| malformed(format!("missing address field '{}'", field))),
        }
    };
    let from = address_at(shape.from)?;
    let to = address_at(shape.to)?;

    let amount = match shape.amount {
        AmountField::Raw(field) => TransferAmount::Raw(
            args.get(field)
                .and_then(integer_text)
                .ok_or_else(|| malformed(format!("missing amount field '{}'", field)))?,
        ),
        AmountField::SerialNumbers(field) => {
            let serials = args
                .get(field)
                .and_then(Value::as_array)
                .ok_or_else(|| malformed(format!("missing serial number list '{}'", field)))?;
            TransferAmount::SerialNumbers(
                serials
                    .iter()
                    .map(|s| integer_text(s).ok_or_else(|| malformed(format!("bad serial number {}", s))))
                    .collect::<Result<_, _>>()?,
            )
        }
    };

    let id_at = |field: &'static str| -> Result<i64, StatementError> {
        args.get(field)
            .and_then(|v| match v {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            })
            .ok_or_else(|| malformed(format!("missing or non-numeric '{}'", field)))
    };
    let asset = match shape.asset {
        AssetField::AssetId(field) => AssetRef::Asset(id_at(field)?),
        AssetField::CollectionId(field) => AssetRef::Collection(id_at(field)?),
        AssetField::Native => AssetRef::Asset(native_asset_id),
    };

    Ok(Classification::Transfer(ClassifiedTransfer {
        kind: shape.kind,
        from,
        to,
        amount,
        asset,
    }))
}

/// Integers are stored either as JSON numbers or as decimal strings.
///
/// Numbers beyond `u64` may come back in exponent form; those are expanded
/// to plain digits when integral.
fn integer_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u.to_string());
            }
            let exact = BigDecimal::from_str(&n.to_string()).ok()?;
            exact
                .is_integer()
                .then(|| exact.with_scale(0).into_bigint_and_exponent().0.to_string())
        }
        _ => None,
    }
}
