// Ledger rows from EVM token transfer logs

use super::classifier::Direction;
use super::error::StatementError;
use super::ledger::{iso_date, LedgerRow};
use super::sources::{EvmTransfer, EvmTransferSource, TimeWindow};

const FUNGIBLE_TOKEN_TYPE: &str = "ERC20";

/// One row per `Transfer` log touching `address`, in store order.
///
/// Token name and formatted amount were resolved when the log was indexed,
/// so no metadata lookup or decimal scaling happens here.
pub async fn build_evm_ledger(
    transfers: &dyn EvmTransferSource,
    address: &str,
    window: &TimeWindow,
) -> Result<Vec<LedgerRow>, StatementError> {
    let found = transfers.find_transfers(address, window).await?;
    tracing::debug!("Statement: {} EVM transfers for {}", found.len(), address);

    Ok(found.into_iter().map(|t| evm_row(t, address)).collect())
}

fn evm_row(transfer: EvmTransfer, address: &str) -> LedgerRow {
    let EvmTransfer { hash, timestamp, event } = transfer;

    let sent = event
        .from
        .as_deref()
        .is_some_and(|from| from.eq_ignore_ascii_case(address));
    let direction = if sent { Direction::Out } else { Direction::In };

    let amount = if event.token_type.as_deref() == Some(FUNGIBLE_TOKEN_TYPE) {
        event.formatted_amount
    } else {
        event.token_id
    };

    LedgerRow {
        date: iso_date(timestamp),
        tx_ref: hash,
        direction: Some(direction),
        amount: amount.unwrap_or_default(),
        currency: event.name.unwrap_or_default(),
        from: event.from.unwrap_or_default(),
        to: event.to.unwrap_or_default(),
    }
}
