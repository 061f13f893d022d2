//! Method kinds, interface descriptions, and the selector resolver trait.

use alloy_json_abi::Function;
use alloy_primitives::Selector;
use std::fmt;
use std::sync::Arc;

/// Method names as they appear in the contract ABIs.
pub mod names {
    pub const SUBMIT_RING: &str = "submitRing";
    pub const CANCEL_ORDER: &str = "cancelOrder";
    pub const CUTOFF_ALL: &str = "cancelAllOrders";
    pub const CUTOFF_PAIR: &str = "cancelAllOrdersByTradingPair";
    pub const APPROVE: &str = "approve";
    pub const TRANSFER: &str = "transfer";
    pub const WETH_DEPOSIT: &str = "deposit";
    pub const WETH_WITHDRAWAL: &str = "withdraw";
    /// Identifier recorded for transactions without a recognized method
    pub const UNKNOWN: &str = "unknown";
}

/// The closed set of methods the extractor turns into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    SubmitRing,
    CancelOrder,
    CutoffAll,
    CutoffPair,
    Approve,
    Transfer,
    WethDeposit,
    WethWithdrawal,
}

impl MethodKind {
    pub const ALL: [MethodKind; 8] = [
        MethodKind::SubmitRing,
        MethodKind::CancelOrder,
        MethodKind::CutoffAll,
        MethodKind::CutoffPair,
        MethodKind::Approve,
        MethodKind::Transfer,
        MethodKind::WethDeposit,
        MethodKind::WethWithdrawal,
    ];

    /// Map an ABI method name onto a handled kind. `None` means "not ours".
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::SubmitRing => names::SUBMIT_RING,
            MethodKind::CancelOrder => names::CANCEL_ORDER,
            MethodKind::CutoffAll => names::CUTOFF_ALL,
            MethodKind::CutoffPair => names::CUTOFF_PAIR,
            MethodKind::Approve => names::APPROVE,
            MethodKind::Transfer => names::TRANSFER,
            MethodKind::WethDeposit => names::WETH_DEPOSIT,
            MethodKind::WethWithdrawal => names::WETH_WITHDRAWAL,
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved interface description: the ABI function a selector maps to.
/// Cheap to clone; the ABI entry is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescription {
    pub selector: Selector,
    pub function: Arc<Function>,
}

impl MethodDescription {
    pub fn new(function: Function) -> Self {
        Self {
            selector: function.selector(),
            function: Arc::new(function),
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Handled kind of this method, if any.
    pub fn kind(&self) -> Option<MethodKind> {
        MethodKind::from_name(self.name())
    }

    /// Selector as a hex string ("0xaabbccdd")
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// A thread-safe, read-only view of the selector → description registry.
/// Concrete implementations live in `txextract-registry`.
pub trait MethodResolver: Send + Sync {
    fn resolve(&self, selector: &Selector) -> Option<MethodDescription>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrips_through_name() {
        for kind in MethodKind::ALL {
            assert_eq!(MethodKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(MethodKind::from_name("balanceOf"), None);
        assert_eq!(MethodKind::from_name(names::UNKNOWN), None);
    }

    #[test]
    fn description_selector_hex() {
        let func: Function = serde_json::from_str(
            r#"{
                "name": "approve",
                "type": "function",
                "inputs": [
                    {"name": "spender", "type": "address"},
                    {"name": "value", "type": "uint256"}
                ],
                "outputs": [{"name": "", "type": "bool"}],
                "stateMutability": "nonpayable"
            }"#,
        )
        .unwrap();
        let desc = MethodDescription::new(func);
        // keccak256("approve(address,uint256)")[:4]
        assert_eq!(desc.selector_hex(), "0x095ea7b3");
        assert_eq!(desc.kind(), Some(MethodKind::Approve));
    }
}
