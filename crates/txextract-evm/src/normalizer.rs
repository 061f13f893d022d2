//! Event normalizer: turns a decoded method call into a domain event.
//!
//! One arm per handled method. Owner-like fields (owner, sender, source,
//! destination) always come from `ctx.from`; argument-derived fields come from
//! the typed inputs.

use alloy_primitives::Address;
use tracing::debug;
use txextract_core::{
    context::TransactionContext,
    error::ExtractError,
    event::{
        ApprovalEvent, CutoffEvent, CutoffPairEvent, Event, OrderCancelledEvent,
        RingSubmissionEvent, TransferEvent, WethDepositEvent, WethWithdrawalEvent,
    },
    method::MethodKind,
    order::OrderHasher,
    status::TxStatus,
};

use crate::decoder::DecodedMethod;
use crate::inputs::MethodInputs;

/// Method-specific preconditions checked before calldata is decoded.
///
/// Order cancellation needs the protocol's delegate to compute the order
/// hash; without one there is no point decoding the call.
pub fn precheck(kind: MethodKind, ctx: &TransactionContext) -> Result<(), ExtractError> {
    match kind {
        MethodKind::CancelOrder => delegate_of(kind, ctx).map(|_| ()),
        _ => Ok(()),
    }
}

fn delegate_of(kind: MethodKind, ctx: &TransactionContext) -> Result<Address, ExtractError> {
    ctx.delegate_address.ok_or_else(|| ExtractError::Precheck {
        method: kind.as_str().to_string(),
        reason: "cannot get delegate address".into(),
    })
}

/// Build the event for a decoded method call.
///
/// Returns `Ok(None)` for methods outside the handled set.
pub fn dispatch(
    decoded: DecodedMethod,
    ctx: TransactionContext,
    hasher: &dyn OrderHasher,
) -> Result<Option<Event>, ExtractError> {
    let Some(inputs) = decoded.inputs else {
        return Ok(None);
    };
    let tx = ctx.tx_hash;

    let event = match inputs {
        MethodInputs::SubmitRing(inputs) => {
            let mut orders = inputs.orders(ctx.protocol)?;
            if let Some(delegate) = ctx.delegate_address {
                orders.iter_mut().for_each(|o| o.delegate_address = delegate);
            }
            let err = (ctx.status == TxStatus::Failed)
                .then(|| format!("method {} transaction failed", MethodKind::SubmitRing));
            debug!(
                "extractor,tx:{tx} submitRing method gas:{}, gasprice:{}, status:{}",
                ctx.gas_used, ctx.gas_price, ctx.status
            );
            Event::RingSubmission(RingSubmissionEvent {
                ctx,
                orders,
                fee_recipient: inputs.fee_recipient,
                fee_selections: inputs.fee_selections,
                err,
            })
        }
        MethodInputs::CancelOrder(inputs) => {
            let delegate = delegate_of(MethodKind::CancelOrder, &ctx)?;
            let mut order = inputs.order();
            order.protocol = ctx.protocol;
            order.delegate_address = delegate;
            order.hash = hasher.order_hash(&order);
            debug!(
                "extractor,tx:{tx} cancelOrder method order tokenS:{},tokenB:{},amountS:{},amountB:{}",
                order.token_s, order.token_b, order.amount_s, order.amount_b
            );
            Event::OrderCancellation(OrderCancelledEvent {
                ctx,
                order_hash: order.hash,
                amount_cancelled: inputs.cancel_amount(),
            })
        }
        MethodInputs::CutoffAll(inputs) => {
            debug!(
                "extractor,tx:{tx} cancelAllOrders method owner:{}, cutoff:{}",
                ctx.from, inputs.cutoff
            );
            Event::CutoffAll(CutoffEvent {
                owner: ctx.from,
                cutoff: inputs.cutoff,
                ctx,
            })
        }
        MethodInputs::CutoffPair(inputs) => {
            debug!(
                "extractor,tx:{tx} cancelAllOrdersByTradingPair method owner:{}, token1:{}, token2:{}, cutoff:{}",
                ctx.from, inputs.token1, inputs.token2, inputs.cutoff
            );
            Event::CutoffPair(CutoffPairEvent {
                owner: ctx.from,
                token1: inputs.token1,
                token2: inputs.token2,
                cutoff: inputs.cutoff,
                ctx,
            })
        }
        MethodInputs::Approve(inputs) => {
            debug!(
                "extractor,tx:{tx} approve method owner:{}, spender:{}, value:{}",
                ctx.from, inputs.spender, inputs.value
            );
            Event::Approval(ApprovalEvent {
                owner: ctx.from,
                spender: inputs.spender,
                amount: inputs.value,
                ctx,
            })
        }
        MethodInputs::Transfer(inputs) => {
            debug!(
                "extractor,tx:{tx} transfer method sender:{}, receiver:{}, value:{}",
                ctx.from, inputs.to, inputs.value
            );
            Event::Transfer(TransferEvent {
                sender: ctx.from,
                receiver: inputs.to,
                amount: inputs.value,
                ctx,
            })
        }
        MethodInputs::WethDeposit(_) => {
            debug!(
                "extractor,tx:{tx} wethDeposit method from:{}, to:{}, value:{}",
                ctx.from, ctx.to, ctx.value
            );
            Event::WethDeposit(WethDepositEvent {
                dst: ctx.from,
                amount: ctx.value,
                ctx,
            })
        }
        MethodInputs::WethWithdrawal(inputs) => {
            debug!(
                "extractor,tx:{tx} wethWithdrawal method from:{}, to:{}, value:{}",
                ctx.from, ctx.to, inputs.wad
            );
            Event::WethWithdrawal(WethWithdrawalEvent {
                src: ctx.from,
                amount: inputs.wad,
                ctx,
            })
        }
    };
    Ok(Some(event))
}
