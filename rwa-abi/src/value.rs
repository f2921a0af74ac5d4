// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Dynamically typed ABI values.

use crate::ParamType;
use alloy_primitives::{Address, B256, I256, U256};
use std::fmt;

/// A decoded or to-be-encoded ABI value.
///
/// Integer and fixed byte variants carry their declared width so a decoded value
/// remembers the slot it came from. The codec accepts any width when encoding and
/// checks the magnitude against the target slot instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Address(Address),
    Bool(bool),
    Int(I256, usize),
    Uint(U256, usize),
    /// Left-aligned bytes with the meaningful length.
    FixedBytes(B256, usize),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Value>),
    FixedArray(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Short description used in type mismatch errors.
    pub fn kind(&self) -> String {
        match self {
            Self::Address(_) => "address".into(),
            Self::Bool(_) => "bool".into(),
            Self::Int(_, bits) => format!("int{bits}"),
            Self::Uint(_, bits) => format!("uint{bits}"),
            Self::FixedBytes(_, len) => format!("bytes{len}"),
            Self::Bytes(_) => "bytes".into(),
            Self::String(_) => "string".into(),
            Self::Array(items) => format!("array of {}", items.len()),
            Self::FixedArray(items) => format!("fixed array of {}", items.len()),
            Self::Tuple(items) => format!("tuple of {}", items.len()),
        }
    }

    /// True when the value could be encoded into a slot of type `ty`.
    pub fn matches(&self, ty: &ParamType) -> bool {
        match (self, ty) {
            (Self::Address(_), ParamType::Address) | (Self::Bool(_), ParamType::Bool) => true,
            (Self::Int(..) | Self::Uint(..), ParamType::Int(_) | ParamType::Uint(_)) => true,
            (Self::FixedBytes(_, len), ParamType::FixedBytes(size)) => len <= size,
            (Self::Bytes(_), ParamType::Bytes) | (Self::String(_), ParamType::String) => true,
            (Self::Array(items), ParamType::Array(inner)) => items.iter().all(|v| v.matches(inner)),
            (Self::FixedArray(items), ParamType::FixedArray(inner, len)) => {
                items.len() == *len && items.iter().all(|v| v.matches(inner))
            }
            (Self::Tuple(items), ParamType::Tuple(types)) => {
                items.len() == types.len() && items.iter().zip(types).all(|(v, t)| v.matches(t))
            }
            _ => false,
        }
    }

    /// A `uint256` from a machine integer.
    pub fn uint(value: u64) -> Self {
        Self::Uint(U256::from(value), 256)
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value, _) => Some(*value),
            Self::Int(value, _) if !value.is_negative() => Some(value.into_raw()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array, fixed array or tuple.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) | Self::FixedArray(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(
            f: &mut fmt::Formatter<'_>,
            items: &[Value],
            open: &str,
            close: &str,
        ) -> fmt::Result {
            f.write_str(open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(close)
        }
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(value, _) => write!(f, "{value}"),
            Self::Uint(value, _) => write!(f, "{value}"),
            Self::FixedBytes(bytes, len) => write!(f, "0x{}", hex::encode(&bytes[..*len])),
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(items) | Self::FixedArray(items) => list(f, items, "[", "]"),
            Self::Tuple(items) => list(f, items, "(", ")"),
        }
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Self::Uint(value, 256)
    }
}

impl From<I256> for Value {
    fn from(value: I256) -> Self {
        Self::Int(value, 256)
    }
}

impl From<B256> for Value {
    fn from(bytes: B256) -> Self {
        Self::FixedBytes(bytes, 32)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn matches_slots() {
        let pair: ParamType = "(string,uint256)".parse().unwrap();
        let value = Value::Tuple(vec!["re".into(), Value::uint(5)]);
        assert!(value.matches(&pair));
        assert!(!Value::Tuple(vec!["re".into()]).matches(&pair));
        assert!(Value::Int(I256::ONE, 8).matches(&ParamType::Uint(256)));
        assert!(!Value::FixedBytes(B256::ZERO, 32).matches(&ParamType::FixedBytes(4)));
    }

    #[test]
    fn display() {
        let value = Value::Tuple(vec![
            Value::Array(vec![Value::uint(1), Value::uint(2)]),
            "AU".into(),
            address!("000000000000000000000000000000000000dEaD").into(),
        ]);
        assert_eq!(
            value.to_string(),
            "([1, 2], \"AU\", 0x000000000000000000000000000000000000dEaD)"
        );
    }
}
