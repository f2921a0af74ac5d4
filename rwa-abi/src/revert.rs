// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Decoding of revert data returned by failed calls.

use crate::{codec, function_selector, Abi, ParamType, Value};
use alloy_primitives::U256;
use std::fmt;

/// Selector of the built-in `Error(string)` revert.
pub const ERROR_SELECTOR: [u8; 4] = function_selector!("Error(string)");

/// Selector of the built-in `Panic(uint256)` revert.
pub const PANIC_SELECTOR: [u8; 4] = function_selector!("Panic(uint256)");

/// Best-effort interpretation of revert bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// The call reverted without data.
    Empty,
    /// `revert("...")` or a failed `require`.
    Message(String),
    /// A compiler-inserted panic.
    Panic(U256),
    /// An error declared in the contract ABI.
    Custom { name: String, values: Vec<Value> },
    /// Data matching none of the above.
    Raw(Vec<u8>),
}

impl RevertReason {
    /// Decodes revert data, consulting the ABI's declared errors when one is given.
    pub fn decode(data: &[u8], abi: Option<&Abi>) -> Self {
        let Some((selector, args)) = data.split_first_chunk::<4>() else {
            return match data.is_empty() {
                true => Self::Empty,
                false => Self::Raw(data.to_vec()),
            };
        };
        if *selector == ERROR_SELECTOR {
            if let Ok(mut values) = codec::decode(&[ParamType::String], args) {
                if let Some(Value::String(msg)) = values.pop() {
                    return Self::Message(msg);
                }
            }
        } else if *selector == PANIC_SELECTOR {
            if let Ok(mut values) = codec::decode(&[ParamType::Uint(256)], args) {
                if let Some(Value::Uint(code, _)) = values.pop() {
                    return Self::Panic(code);
                }
            }
        } else if let Some(error) = abi.and_then(|abi| abi.error_by_selector(*selector)) {
            if let Ok(values) = error.decode(data) {
                return Self::Custom {
                    name: error.name.clone(),
                    values,
                };
            }
        }
        Self::Raw(data.to_vec())
    }

    /// Description of a panic code, as assigned by the Solidity compiler.
    pub fn panic_description(code: U256) -> Option<&'static str> {
        if code.bit_len() > 8 {
            return None;
        }
        Some(match code.as_limbs()[0] {
            0x00 => "generic compiler panic",
            0x01 => "assertion failed",
            0x11 => "arithmetic underflow or overflow",
            0x12 => "division or modulo by zero",
            0x21 => "invalid enum value",
            0x22 => "invalid storage byte array encoding",
            0x31 => "pop on empty array",
            0x32 => "array index out of bounds",
            0x41 => "out of memory",
            0x51 => "call to zero-initialized function",
            _ => return None,
        })
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("reverted without data"),
            Self::Message(msg) => write!(f, "reverted: {msg}"),
            Self::Panic(code) => match Self::panic_description(*code) {
                Some(desc) => write!(f, "panic 0x{code:x}: {desc}"),
                None => write!(f, "panic 0x{code:x}"),
            },
            Self::Custom { name, values } => {
                write!(f, "{name}")?;
                write!(f, "{}", Value::Tuple(values.clone()))
            }
            Self::Raw(data) => write!(f, "reverted with 0x{}", hex::encode(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};
    use sha3::{Digest, Keccak256};

    #[test]
    fn builtin_selectors() {
        assert_eq!(ERROR_SELECTOR, [0x08, 0xc3, 0x79, 0xa0]);
        assert_eq!(PANIC_SELECTOR, [0x4e, 0x48, 0x7b, 0x71]);
        assert_eq!(ERROR_SELECTOR[..], Keccak256::digest(b"Error(string)")[..4]);
    }

    #[test]
    fn message() {
        let mut data = ERROR_SELECTOR.to_vec();
        data.extend(codec::encode(&[ParamType::String], &["arrays not aligned".into()]).unwrap());
        let reason = RevertReason::decode(&data, None);
        assert_eq!(reason, RevertReason::Message("arrays not aligned".into()));
        assert_eq!(reason.to_string(), "reverted: arrays not aligned");
    }

    #[test]
    fn panic_code() {
        let data = hex!(
            "4e487b710000000000000000000000000000000000000000000000000000000000000011"
        );
        let reason = RevertReason::decode(&data, None);
        assert_eq!(reason, RevertReason::Panic(U256::from(0x11)));
        assert_eq!(reason.to_string(), "panic 0x11: arithmetic underflow or overflow");
    }

    #[test]
    fn custom_error() {
        let abi = Abi::parse(
            r#"[{"type":"error","name":"OwnableUnauthorizedAccount","inputs":[{"name":"account","type":"address"}]}]"#,
        )
        .unwrap();
        let account = address!("000000000000000000000000000000000000bEEF");
        let data = abi
            .error("OwnableUnauthorizedAccount")
            .unwrap()
            .encode(&[account.into()])
            .unwrap();
        assert_eq!(
            RevertReason::decode(&data, Some(&abi)),
            RevertReason::Custom {
                name: "OwnableUnauthorizedAccount".into(),
                values: vec![account.into()],
            }
        );
        assert_eq!(
            RevertReason::decode(&data, None),
            RevertReason::Raw(data.clone())
        );
    }

    #[test]
    fn empty_and_short() {
        assert_eq!(RevertReason::decode(&[], None), RevertReason::Empty);
        assert_eq!(
            RevertReason::decode(&[1, 2], None),
            RevertReason::Raw(vec![1, 2])
        );
        let truncated = [ERROR_SELECTOR.as_slice(), &[0; 8]].concat();
        assert!(matches!(
            RevertReason::decode(&truncated, None),
            RevertReason::Raw(_)
        ));
    }
}
