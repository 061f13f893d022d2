//! Typed method inputs.
//!
//! `MethodDecoder` yields dynamic `DynSolValue`s; this module narrows them into
//! one struct per handled method. A value that does not fit the expected
//! shape is a `ShapeMismatch`: the registry handed out an ABI entry whose
//! parameters disagree with the method name.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use txextract_core::{error::ExtractError, method::MethodKind, order::Order};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRingInputs {
    /// Per order: owner, tokenS, wallet, authAddr
    pub address_list: Vec<[Address; 4]>,
    /// Per order: amountS, amountB, validSince, validUntil, lrcFee, rateAmountS
    pub uint_args_list: Vec<[U256; 6]>,
    /// Per order: marginSplitPercentage
    pub uint8_args_list: Vec<[u8; 1]>,
    pub buy_no_more_than_amount_b_list: Vec<bool>,
    pub v_list: Vec<u8>,
    pub r_list: Vec<B256>,
    pub s_list: Vec<B256>,
    pub fee_recipient: Address,
    pub fee_selections: u16,
}

impl SubmitRingInputs {
    /// Expand the packed ring arguments into one `Order` per ring member.
    ///
    /// Each order buys the token the next order sells; the last order closes
    /// the ring against the first.
    pub fn orders(&self, protocol: Address) -> Result<Vec<Order>, ExtractError> {
        let n = self.address_list.len();
        let sigs = 2 * n;
        if n < 2
            || self.uint_args_list.len() != n
            || self.uint8_args_list.len() != n
            || self.buy_no_more_than_amount_b_list.len() != n
            || self.v_list.len() != sigs
            || self.r_list.len() != sigs
            || self.s_list.len() != sigs
        {
            return Err(ExtractError::shape(
                MethodKind::SubmitRing.as_str(),
                "orders length invalid",
            ));
        }

        let orders = (0..n)
            .map(|i| {
                let addrs = &self.address_list[i];
                let uints = &self.uint_args_list[i];
                Order {
                    protocol,
                    owner: addrs[0],
                    token_s: addrs[1],
                    token_b: self.address_list[(i + 1) % n][1],
                    wallet_address: addrs[2],
                    auth_addr: addrs[3],
                    amount_s: uints[0],
                    amount_b: uints[1],
                    valid_since: uints[2],
                    valid_until: uints[3],
                    lrc_fee: uints[4],
                    buy_no_more_than_amount_b: self.buy_no_more_than_amount_b_list[i],
                    margin_split_percentage: self.uint8_args_list[i][0],
                    v: self.v_list[i],
                    r: self.r_list[i],
                    s: self.s_list[i],
                    ..Order::default()
                }
            })
            .collect();
        Ok(orders)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderInputs {
    /// owner, tokenS, tokenB, wallet, authAddr
    pub addresses: [Address; 5],
    /// amountS, amountB, validSince, validUntil, lrcFee, cancelAmount
    pub order_values: [U256; 6],
    pub buy_no_more_than_amount_b: bool,
    pub margin_split_percentage: u8,
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl CancelOrderInputs {
    /// The order being cancelled, without protocol/delegate/hash.
    pub fn order(&self) -> Order {
        let [owner, token_s, token_b, wallet_address, auth_addr] = self.addresses;
        let [amount_s, amount_b, valid_since, valid_until, lrc_fee, _] = self.order_values;
        Order {
            owner,
            token_s,
            token_b,
            wallet_address,
            auth_addr,
            amount_s,
            amount_b,
            valid_since,
            valid_until,
            lrc_fee,
            buy_no_more_than_amount_b: self.buy_no_more_than_amount_b,
            margin_split_percentage: self.margin_split_percentage,
            v: self.v,
            r: self.r,
            s: self.s,
            ..Order::default()
        }
    }

    pub fn cancel_amount(&self) -> U256 {
        self.order_values[5]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoffInputs {
    pub cutoff: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoffPairInputs {
    pub token1: Address,
    pub token2: Address,
    pub cutoff: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveInputs {
    pub spender: Address,
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInputs {
    pub to: Address,
    pub value: U256,
}

/// `deposit()` takes no arguments; the amount is the call's native value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WethDepositInputs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WethWithdrawalInputs {
    pub wad: U256,
}

/// Typed inputs of a handled method, one variant per `MethodKind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodInputs {
    SubmitRing(SubmitRingInputs),
    CancelOrder(CancelOrderInputs),
    CutoffAll(CutoffInputs),
    CutoffPair(CutoffPairInputs),
    Approve(ApproveInputs),
    Transfer(TransferInputs),
    WethDeposit(WethDepositInputs),
    WethWithdrawal(WethWithdrawalInputs),
}

impl MethodInputs {
    pub fn kind(&self) -> MethodKind {
        match self {
            MethodInputs::SubmitRing(_) => MethodKind::SubmitRing,
            MethodInputs::CancelOrder(_) => MethodKind::CancelOrder,
            MethodInputs::CutoffAll(_) => MethodKind::CutoffAll,
            MethodInputs::CutoffPair(_) => MethodKind::CutoffPair,
            MethodInputs::Approve(_) => MethodKind::Approve,
            MethodInputs::Transfer(_) => MethodKind::Transfer,
            MethodInputs::WethDeposit(_) => MethodKind::WethDeposit,
            MethodInputs::WethWithdrawal(_) => MethodKind::WethWithdrawal,
        }
    }

    /// Narrow decoded values into the inputs of `kind`.
    pub fn narrow(kind: MethodKind, values: &[DynSolValue]) -> Result<Self, ExtractError> {
        let n = Narrow::new(kind);
        let inputs = match kind {
            MethodKind::SubmitRing => {
                n.arity(values, 9)?;
                MethodInputs::SubmitRing(SubmitRingInputs {
                    address_list: n.list(&values[0], "addressList", |v| {
                        n.fixed(v, "addressList", |a| n.address(a, "addressList"))
                    })?,
                    uint_args_list: n.list(&values[1], "uintArgsList", |v| {
                        n.fixed(v, "uintArgsList", |u| n.uint(u, "uintArgsList"))
                    })?,
                    uint8_args_list: n.list(&values[2], "uint8ArgsList", |v| {
                        n.fixed(v, "uint8ArgsList", |u| n.uint8(u, "uint8ArgsList"))
                    })?,
                    buy_no_more_than_amount_b_list: n.list(
                        &values[3],
                        "buyNoMoreThanAmountBList",
                        |v| n.boolean(v, "buyNoMoreThanAmountBList"),
                    )?,
                    v_list: n.list(&values[4], "vList", |v| n.uint8(v, "vList"))?,
                    r_list: n.list(&values[5], "rList", |v| n.bytes32(v, "rList"))?,
                    s_list: n.list(&values[6], "sList", |v| n.bytes32(v, "sList"))?,
                    fee_recipient: n.address(&values[7], "feeRecipient")?,
                    fee_selections: n.uint16(&values[8], "feeSelections")?,
                })
            }
            MethodKind::CancelOrder => {
                n.arity(values, 7)?;
                MethodInputs::CancelOrder(CancelOrderInputs {
                    addresses: n.fixed(&values[0], "addresses", |v| n.address(v, "addresses"))?,
                    order_values: n.fixed(&values[1], "orderValues", |v| {
                        n.uint(v, "orderValues")
                    })?,
                    buy_no_more_than_amount_b: n.boolean(&values[2], "buyNoMoreThanAmountB")?,
                    margin_split_percentage: n.uint8(&values[3], "marginSplitPercentage")?,
                    v: n.uint8(&values[4], "v")?,
                    r: n.bytes32(&values[5], "r")?,
                    s: n.bytes32(&values[6], "s")?,
                })
            }
            MethodKind::CutoffAll => {
                n.arity(values, 1)?;
                MethodInputs::CutoffAll(CutoffInputs {
                    cutoff: n.uint(&values[0], "cutoff")?,
                })
            }
            MethodKind::CutoffPair => {
                n.arity(values, 3)?;
                MethodInputs::CutoffPair(CutoffPairInputs {
                    token1: n.address(&values[0], "token1")?,
                    token2: n.address(&values[1], "token2")?,
                    cutoff: n.uint(&values[2], "cutoff")?,
                })
            }
            MethodKind::Approve => {
                n.arity(values, 2)?;
                MethodInputs::Approve(ApproveInputs {
                    spender: n.address(&values[0], "spender")?,
                    value: n.uint(&values[1], "value")?,
                })
            }
            MethodKind::Transfer => {
                n.arity(values, 2)?;
                MethodInputs::Transfer(TransferInputs {
                    to: n.address(&values[0], "to")?,
                    value: n.uint(&values[1], "value")?,
                })
            }
            // Payable with no arguments: nothing to narrow.
            MethodKind::WethDeposit => MethodInputs::WethDeposit(WethDepositInputs),
            MethodKind::WethWithdrawal => {
                n.arity(values, 1)?;
                MethodInputs::WethWithdrawal(WethWithdrawalInputs {
                    wad: n.uint(&values[0], "wad")?,
                })
            }
        };
        Ok(inputs)
    }
}

/// Field-level narrowing helpers bound to one method for error reporting.
struct Narrow {
    method: &'static str,
}

impl Narrow {
    fn new(kind: MethodKind) -> Self {
        Self {
            method: kind.as_str(),
        }
    }

    fn mismatch(&self, field: &str, expected: &str) -> ExtractError {
        ExtractError::shape(self.method, format!("field '{field}': expected {expected}"))
    }

    fn arity(&self, values: &[DynSolValue], expected: usize) -> Result<(), ExtractError> {
        if values.len() != expected {
            return Err(ExtractError::shape(
                self.method,
                format!("expected {expected} inputs, got {}", values.len()),
            ));
        }
        Ok(())
    }

    fn address(&self, v: &DynSolValue, field: &str) -> Result<Address, ExtractError> {
        v.as_address().ok_or_else(|| self.mismatch(field, "address"))
    }

    fn uint(&self, v: &DynSolValue, field: &str) -> Result<U256, ExtractError> {
        v.as_uint()
            .map(|(u, _)| u)
            .ok_or_else(|| self.mismatch(field, "uint"))
    }

    fn uint8(&self, v: &DynSolValue, field: &str) -> Result<u8, ExtractError> {
        u8::try_from(self.uint(v, field)?).map_err(|_| self.mismatch(field, "uint8"))
    }

    fn uint16(&self, v: &DynSolValue, field: &str) -> Result<u16, ExtractError> {
        u16::try_from(self.uint(v, field)?).map_err(|_| self.mismatch(field, "uint16"))
    }

    fn boolean(&self, v: &DynSolValue, field: &str) -> Result<bool, ExtractError> {
        v.as_bool().ok_or_else(|| self.mismatch(field, "bool"))
    }

    fn bytes32(&self, v: &DynSolValue, field: &str) -> Result<B256, ExtractError> {
        match v.as_fixed_bytes() {
            Some((bytes, 32)) => Ok(B256::from_slice(bytes)),
            _ => Err(self.mismatch(field, "bytes32")),
        }
    }

    /// A dynamic or fixed-size array, each element narrowed with `item`.
    fn list<T>(
        &self,
        v: &DynSolValue,
        field: &str,
        item: impl Fn(&DynSolValue) -> Result<T, ExtractError>,
    ) -> Result<Vec<T>, ExtractError> {
        let elems = v
            .as_array()
            .or_else(|| v.as_fixed_array())
            .ok_or_else(|| self.mismatch(field, "array"))?;
        elems.iter().map(item).collect()
    }

    /// A fixed-size array of exactly `N` elements.
    fn fixed<T, const N: usize>(
        &self,
        v: &DynSolValue,
        field: &str,
        item: impl Fn(&DynSolValue) -> Result<T, ExtractError>,
    ) -> Result<[T; N], ExtractError> {
        let elems = v
            .as_fixed_array()
            .ok_or_else(|| self.mismatch(field, &format!("{N}-element array")))?;
        let items = elems.iter().map(item).collect::<Result<Vec<T>, _>>()?;
        items
            .try_into()
            .map_err(|_| self.mismatch(field, &format!("{N}-element array")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn uint(v: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(v), 256)
    }

    #[test]
    fn narrow_cutoff_pair() {
        let values = vec![
            DynSolValue::Address(addr(1)),
            DynSolValue::Address(addr(2)),
            uint(1_600_000_000),
        ];
        let inputs = MethodInputs::narrow(MethodKind::CutoffPair, &values).unwrap();
        assert_eq!(
            inputs,
            MethodInputs::CutoffPair(CutoffPairInputs {
                token1: addr(1),
                token2: addr(2),
                cutoff: U256::from(1_600_000_000u64),
            })
        );
        assert_eq!(inputs.kind(), MethodKind::CutoffPair);
    }

    #[test]
    fn wrong_arity_is_shape_mismatch() {
        let err = MethodInputs::narrow(MethodKind::Approve, &[uint(1)]).unwrap_err();
        assert!(matches!(err, ExtractError::ShapeMismatch { .. }));
    }

    #[test]
    fn wrong_field_type_is_shape_mismatch() {
        let values = vec![uint(1), uint(2)];
        let err = MethodInputs::narrow(MethodKind::Transfer, &values).unwrap_err();
        assert!(err.to_string().contains("field 'to': expected address"));
    }

    #[test]
    fn deposit_ignores_arguments() {
        let inputs = MethodInputs::narrow(MethodKind::WethDeposit, &[]).unwrap();
        assert_eq!(inputs, MethodInputs::WethDeposit(WethDepositInputs));
    }

    #[test]
    fn uint8_overflow_is_shape_mismatch() {
        let values = vec![
            DynSolValue::FixedArray(vec![DynSolValue::Address(addr(1)); 5]),
            DynSolValue::FixedArray(vec![uint(0); 6]),
            DynSolValue::Bool(false),
            uint(300),
            uint(27),
            DynSolValue::FixedBytes(B256::ZERO, 32),
            DynSolValue::FixedBytes(B256::ZERO, 32),
        ];
        let err = MethodInputs::narrow(MethodKind::CancelOrder, &values).unwrap_err();
        assert!(err.to_string().contains("marginSplitPercentage"));
    }

    fn ring(n: usize) -> SubmitRingInputs {
        SubmitRingInputs {
            address_list: (0..n)
                .map(|i| [addr(0x10 + i as u8), addr(0x20 + i as u8), addr(0x30), addr(0x40)])
                .collect(),
            uint_args_list: (0..n).map(|i| [U256::from(i + 1); 6]).collect(),
            uint8_args_list: vec![[50]; n],
            buy_no_more_than_amount_b_list: vec![false; n],
            v_list: vec![27; 2 * n],
            r_list: vec![B256::repeat_byte(0xaa); 2 * n],
            s_list: vec![B256::repeat_byte(0xbb); 2 * n],
            fee_recipient: address!("00000000000000000000000000000000000000fe"),
            fee_selections: 0,
        }
    }

    #[test]
    fn ring_orders_close_the_loop() {
        let protocol = addr(0x99);
        let orders = ring(3).orders(protocol).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].token_b, orders[1].token_s);
        assert_eq!(orders[1].token_b, orders[2].token_s);
        assert_eq!(orders[2].token_b, orders[0].token_s);
        assert_eq!(orders[1].amount_s, U256::from(2u64));
        assert_eq!(orders[0].margin_split_percentage, 50);
        assert!(orders.iter().all(|o| o.protocol == protocol));
    }

    #[test]
    fn ring_with_single_order_is_rejected() {
        let err = ring(1).orders(Address::ZERO).unwrap_err();
        assert!(err.to_string().contains("orders length invalid"));
    }

    #[test]
    fn ring_with_missing_signatures_is_rejected() {
        let mut inputs = ring(2);
        inputs.v_list.pop();
        assert!(inputs.orders(Address::ZERO).is_err());
    }

    #[test]
    fn cancel_order_fields() {
        let inputs = CancelOrderInputs {
            addresses: [addr(1), addr(2), addr(3), addr(4), addr(5)],
            order_values: [
                U256::from(10u64),
                U256::from(20u64),
                U256::from(30u64),
                U256::from(40u64),
                U256::from(50u64),
                U256::from(7u64),
            ],
            buy_no_more_than_amount_b: true,
            margin_split_percentage: 60,
            v: 28,
            r: B256::repeat_byte(1),
            s: B256::repeat_byte(2),
        };
        let order = inputs.order();
        assert_eq!(order.owner, addr(1));
        assert_eq!(order.token_b, addr(3));
        assert_eq!(order.auth_addr, addr(5));
        assert_eq!(order.lrc_fee, U256::from(50u64));
        assert_eq!(inputs.cancel_amount(), U256::from(7u64));
        assert_eq!(order.hash, B256::ZERO);
    }
}
