//! Keccak-256 order hashing.
//!
//! The hash covers the packed order fields in a fixed order:
//! `delegate, owner, tokenS, tokenB, wallet, authAddr` as 20-byte addresses,
//! `amountS, amountB, validSince, validUntil, lrcFee` as 32-byte big-endian
//! words, then one byte each for `buyNoMoreThanAmountB` and
//! `marginSplitPercentage`.

use alloy_primitives::B256;
use tiny_keccak::{Hasher, Keccak};
use txextract_core::order::{Order, OrderHasher};

/// Computes order hashes with Keccak-256 over the packed order fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeccakOrderHasher;

impl OrderHasher for KeccakOrderHasher {
    fn order_hash(&self, order: &Order) -> B256 {
        let mut keccak = Keccak::v256();
        for addr in [
            &order.delegate_address,
            &order.owner,
            &order.token_s,
            &order.token_b,
            &order.wallet_address,
            &order.auth_addr,
        ] {
            keccak.update(addr.as_slice());
        }
        for word in [
            &order.amount_s,
            &order.amount_b,
            &order.valid_since,
            &order.valid_until,
            &order.lrc_fee,
        ] {
            keccak.update(&word.to_be_bytes::<32>());
        }
        keccak.update(&[
            u8::from(order.buy_no_more_than_amount_b),
            order.margin_split_percentage,
        ]);

        let mut out = [0u8; 32];
        keccak.finalize(&mut out);
        B256::from(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    fn order() -> Order {
        Order {
            delegate_address: Address::repeat_byte(0xde),
            owner: Address::repeat_byte(1),
            token_s: Address::repeat_byte(2),
            token_b: Address::repeat_byte(3),
            amount_s: U256::from(1_000u64),
            amount_b: U256::from(2_000u64),
            lrc_fee: U256::from(5u64),
            margin_split_percentage: 50,
            ..Order::default()
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let hasher = KeccakOrderHasher;
        assert_eq!(hasher.order_hash(&order()), hasher.order_hash(&order()));
        assert_ne!(hasher.order_hash(&order()), B256::ZERO);
    }

    #[test]
    fn hash_depends_on_delegate() {
        let hasher = KeccakOrderHasher;
        let mut other = order();
        other.delegate_address = Address::repeat_byte(0xdf);
        assert_ne!(hasher.order_hash(&order()), hasher.order_hash(&other));
    }

    #[test]
    fn signature_is_not_hashed() {
        let hasher = KeccakOrderHasher;
        let mut signed = order();
        signed.v = 27;
        signed.r = B256::repeat_byte(9);
        assert_eq!(hasher.order_hash(&order()), hasher.order_hash(&signed));
    }

    #[test]
    fn hash_matches_packed_encoding() {
        let o = order();
        let mut packed = Vec::new();
        for addr in [o.delegate_address, o.owner, o.token_s, o.token_b, o.wallet_address, o.auth_addr] {
            packed.extend_from_slice(addr.as_slice());
        }
        for word in [o.amount_s, o.amount_b, o.valid_since, o.valid_until, o.lrc_fee] {
            packed.extend_from_slice(&word.to_be_bytes::<32>());
        }
        packed.extend_from_slice(&[0, 50]);
        assert_eq!(packed.len(), 6 * 20 + 5 * 32 + 2);
        assert_eq!(KeccakOrderHasher.order_hash(&o), alloy_primitives::keccak256(&packed));
    }
}
