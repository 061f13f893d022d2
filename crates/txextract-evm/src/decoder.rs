//! EVM method-call calldata decoder.
//!
//! Decodes transaction `input` data against the ABI entry a selector resolved to.
//!
//! # How it works
//! - First 4 bytes of calldata = keccak256(function_signature)[:4] (the selector)
//! - Remaining bytes = ABI-encoded parameter sequence
//! - Decoded values are narrowed into the typed inputs of the handled method,
//!   if the method is one the extractor handles

use alloy_core::dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_primitives::Selector;
use txextract_core::{
    error::{DecodeError, ExtractError},
    method::MethodDescription,
};

use crate::inputs::MethodInputs;

/// Width of the method selector prefix in bytes.
pub const SELECTOR_LEN: usize = 4;

/// Result of decoding a method call.
#[derive(Debug, Clone)]
pub struct DecodedMethod {
    pub name: String,
    pub selector: Selector,
    pub description: MethodDescription,
    /// `None` when the method is outside the handled set
    pub inputs: Option<MethodInputs>,
}

/// Stateless calldata decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct MethodDecoder;

impl MethodDecoder {
    /// Split calldata into its selector and argument bytes.
    pub fn split_selector(calldata: &[u8]) -> Result<(Selector, &[u8]), DecodeError> {
        if calldata.len() < SELECTOR_LEN {
            return Err(DecodeError::CalldataTooShort {
                len: calldata.len(),
            });
        }
        let (selector, args) = calldata.split_at(SELECTOR_LEN);
        Ok((Selector::from_slice(selector), args))
    }

    /// Decode the raw argument values declared by `description`.
    ///
    /// Does not interpret the values; see [`MethodDecoder::decode`] for the
    /// typed payload.
    pub fn decode_args(
        description: &MethodDescription,
        calldata: &[u8],
    ) -> Result<Vec<DynSolValue>, DecodeError> {
        let (selector, args) = Self::split_selector(calldata)?;
        if selector != description.selector {
            return Err(DecodeError::SelectorMismatch {
                expected: description.selector_hex(),
                got: format!("{selector}"),
            });
        }

        let types = param_types(description)?;
        if types.is_empty() {
            return Ok(vec![]);
        }

        let decoded = DynSolType::Tuple(types)
            .abi_decode_params(args)
            .map_err(|e| DecodeError::AbiDecodeFailed {
                reason: format!("{} input decode: {e}", description.name()),
            })?;

        Ok(match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        })
    }

    /// Decode calldata into a [`DecodedMethod`] with typed inputs.
    pub fn decode(
        description: &MethodDescription,
        calldata: &[u8],
    ) -> Result<DecodedMethod, ExtractError> {
        let values = Self::decode_args(description, calldata)?;
        let inputs = match description.kind() {
            Some(kind) => Some(MethodInputs::narrow(kind, &values)?),
            None => None,
        };

        Ok(DecodedMethod {
            name: description.name().to_string(),
            selector: description.selector,
            description: description.clone(),
            inputs,
        })
    }
}

/// Resolve the declared parameter types of a method.
fn param_types(description: &MethodDescription) -> Result<Vec<DynSolType>, DecodeError> {
    description
        .function
        .inputs
        .iter()
        .map(|p| {
            p.resolve().map_err(|e| DecodeError::UnresolvableType {
                method: description.name().to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_abi::Function;
    use alloy_primitives::{address, U256};

    fn approve() -> MethodDescription {
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
        MethodDescription::new(func)
    }

    fn approve_calldata() -> Vec<u8> {
        let args = DynSolValue::Tuple(vec![
            DynSolValue::Address(address!("0000000000000000000000000000000000000aaa")),
            DynSolValue::Uint(U256::from(100u64), 256),
        ]);
        let mut calldata = hex::decode("095ea7b3").unwrap();
        calldata.extend(args.abi_encode_params());
        calldata
    }

    #[test]
    fn decode_approve_calldata() {
        let decoded = MethodDecoder::decode(&approve(), &approve_calldata()).unwrap();
        assert_eq!(decoded.name, "approve");
        match decoded.inputs {
            Some(MethodInputs::Approve(inputs)) => {
                assert_eq!(
                    inputs.spender,
                    address!("0000000000000000000000000000000000000aaa")
                );
                assert_eq!(inputs.value, U256::from(100u64));
            }
            other => panic!("expected approve inputs, got {other:?}"),
        }
    }

    #[test]
    fn short_calldata_is_rejected() {
        let err = MethodDecoder::decode_args(&approve(), &[0x09, 0x5e]).unwrap_err();
        assert!(matches!(err, DecodeError::CalldataTooShort { len: 2 }));
    }

    #[test]
    fn truncated_arguments_are_rejected() {
        let mut calldata = approve_calldata();
        calldata.truncate(4 + 40);
        let err = MethodDecoder::decode_args(&approve(), &calldata).unwrap_err();
        assert!(matches!(err, DecodeError::AbiDecodeFailed { .. }));
    }

    #[test]
    fn selector_mismatch_is_rejected() {
        let mut calldata = approve_calldata();
        calldata[0] = 0xff;
        let err = MethodDecoder::decode_args(&approve(), &calldata).unwrap_err();
        assert!(matches!(err, DecodeError::SelectorMismatch { .. }));
    }

    #[test]
    fn unhandled_method_has_no_inputs() {
        let func: Function = serde_json::from_str(
            r#"{
                "name": "balanceOf",
                "type": "function",
                "inputs": [{"name": "owner", "type": "address"}],
                "outputs": [{"name": "", "type": "uint256"}],
                "stateMutability": "view"
            }"#,
        )
        .unwrap();
        let desc = MethodDescription::new(func);
        let mut calldata = desc.selector.to_vec();
        calldata.extend(
            DynSolValue::Tuple(vec![DynSolValue::Address(Default::default())]).abi_encode_params(),
        );
        let decoded = MethodDecoder::decode(&desc, &calldata).unwrap();
        assert!(decoded.inputs.is_none());
    }
}
