//! Plain value transfers: transactions whose calldata names no known method.

use tracing::debug;
use txextract_core::{
    context,
    event::{Event, TransferEvent},
    method::names,
    tx::{Receipt, TransactionRecord},
};

/// Build the native-value `Transfer` event for `tx`.
///
/// Never decodes calldata, so it cannot fail.
pub fn handle_plain(tx: &TransactionRecord, receipt: Option<&Receipt>, block_time: i64) -> Event {
    let ctx = context::build(tx, receipt, block_time, names::UNKNOWN, None);
    debug!(
        "extractor,tx:{} handleEthTransfer from:{}, to:{}, value:{}, gasUsed:{}, status:{}",
        ctx.tx_hash, ctx.from, ctx.to, ctx.value, ctx.gas_used, ctx.status
    );
    Event::Transfer(TransferEvent {
        sender: tx.from,
        receiver: tx.recipient(),
        amount: tx.value,
        ctx,
    })
}
