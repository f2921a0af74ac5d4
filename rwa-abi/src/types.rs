// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Solidity parameter types as they appear in ABI descriptors.

use crate::{Error, Result};
use std::{fmt, str::FromStr};

/// One ABI parameter type.
///
/// Integer widths are in bits; fixed byte widths are in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    Bool,
    Int(usize),
    Uint(usize),
    FixedBytes(usize),
    Bytes,
    String,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Builds a type from a descriptor `type` string and the already-parsed tuple components.
    ///
    /// `tuple`, `tuple[]` and `tuple[2][]` take their element shape from `components`.
    pub fn from_abi(ty: &str, components: Vec<ParamType>) -> Option<Self> {
        match ty.strip_prefix("tuple") {
            Some(suffix) => apply_suffix(ParamType::Tuple(components), suffix),
            None => parse(ty),
        }
    }

    /// True when the encoding of the type lives in the tail region.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(inner, _) => inner.is_dynamic(),
            Self::Tuple(inner) => inner.iter().any(Self::is_dynamic),
            _ => false,
        }
    }

    /// Number of 32-byte words the type occupies in a head region.
    pub fn head_words(&self) -> usize {
        if self.is_dynamic() {
            return 1;
        }
        match self {
            Self::FixedArray(inner, len) => inner.head_words() * len,
            Self::Tuple(inner) => inner.iter().map(Self::head_words).sum(),
            _ => 1,
        }
    }

    /// True for the single-word elementary types.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            Self::Address | Self::Bool | Self::Int(_) | Self::Uint(_) | Self::FixedBytes(_)
        )
    }

    /// The canonical name used in signatures, without component names.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
            Self::Tuple(inner) => {
                f.write_str("(")?;
                for (i, ty) in inner.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for ParamType {
    type Err = Error;

    /// Parses canonical notation, including parenthesized tuples such as `(uint256,string)[]`.
    fn from_str(s: &str) -> Result<Self> {
        parse(s.trim()).ok_or_else(|| Error::UnknownType {
            path: "$".into(),
            ty: s.into(),
        })
    }
}

fn parse(s: &str) -> Option<ParamType> {
    if let Some(head) = s.strip_suffix(']') {
        let open = head.rfind('[')?;
        let inner = parse(&head[..open])?;
        return dimension(inner, &head[open + 1..]);
    }
    if let Some(body) = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return split_top_level(body)?
            .into_iter()
            .map(parse)
            .collect::<Option<Vec<_>>>()
            .map(ParamType::Tuple);
    }
    elementary(s)
}

fn elementary(s: &str) -> Option<ParamType> {
    let ty = match s {
        "address" => ParamType::Address,
        "bool" => ParamType::Bool,
        "string" => ParamType::String,
        "bytes" => ParamType::Bytes,
        "uint" => ParamType::Uint(256),
        "int" => ParamType::Int(256),
        _ => {
            if let Some(bits) = s.strip_prefix("uint") {
                ParamType::Uint(int_width(bits)?)
            } else if let Some(bits) = s.strip_prefix("int") {
                ParamType::Int(int_width(bits)?)
            } else if let Some(len) = s.strip_prefix("bytes") {
                let len = digits(len)?;
                if !(1..=32).contains(&len) {
                    return None;
                }
                ParamType::FixedBytes(len)
            } else {
                return None;
            }
        }
    };
    Some(ty)
}

fn int_width(bits: &str) -> Option<usize> {
    let bits = digits(bits)?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits)
}

fn digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

fn dimension(inner: ParamType, dim: &str) -> Option<ParamType> {
    if dim.is_empty() {
        return Some(ParamType::Array(Box::new(inner)));
    }
    let len = digits(dim)?;
    Some(ParamType::FixedArray(Box::new(inner), len))
}

/// Applies array suffixes such as `[]` or `[3][]` to an already-built element type.
fn apply_suffix(mut ty: ParamType, mut suffix: &str) -> Option<ParamType> {
    while !suffix.is_empty() {
        let rest = suffix.strip_prefix('[')?;
        let close = rest.find(']')?;
        ty = dimension(ty, &rest[..close])?;
        suffix = &rest[close + 1..];
    }
    Some(ty)
}

fn split_top_level(body: &str) -> Option<Vec<&str>> {
    if body.is_empty() {
        return Some(vec![]);
    }
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&body[start..]);
    Some(parts)
}
