// Ledger rows and their CSV rendering

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::classifier::Direction;
use super::error::StatementError;

pub const LEDGER_HEADER: [&str; 7] = ["Date", "Tx Hash", "Type", "Amount", "Currency", "From", "To"];

/// Stands in for the side of a movement an event does not record
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// One value movement of a statement, in output column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub date: String,
    pub tx_ref: String,
    pub direction: Option<Direction>,
    pub amount: String,
    pub currency: String,
    pub from: String,
    pub to: String,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-03-01T12:00:00.000Z`
pub fn iso_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Header, then every native row, then every EVM row.
///
/// The two ledgers are concatenated as produced, not interleaved by date.
pub fn assemble(native_rows: &[LedgerRow], evm_rows: &[LedgerRow]) -> Result<String, StatementError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(LEDGER_HEADER)?;
    for row in native_rows.iter().chain(evm_rows) {
        wtr.serialize(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| StatementError::Serialization(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| StatementError::Serialization(e.to_string()))
}
