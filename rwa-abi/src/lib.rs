// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! ABI support for the RWA contract bindings.
//!
//! This crate parses JSON ABI descriptors, computes selectors and event topics, and moves
//! values through the canonical head/tail encoding. It performs no I/O.
//!
//! - [`Abi`] is the parsed descriptor, with [`Function`], [`Event`] and [`CustomError`] items.
//! - [`codec`] encodes and strictly decodes parameter lists and topics.
//! - [`AbiValue`] maps Rust types onto [`Value`]s; [`abi_struct!`] declares record types.
//! - [`RevertReason`] interprets revert data.

pub use alloy_primitives::{self, keccak256, Address, Bytes, FixedBytes, B256, I256, U256};

pub use descriptor::{Abi, Constructor, CustomError, Event, Function, Param, StateMutability};
pub use error::{Error, Result};
pub use revert::RevertReason;
pub use typed::{from_outputs, AbiValue};
pub use types::ParamType;
pub use value::Value;

pub mod codec;
pub mod descriptor;
pub mod revert;
pub mod typed;

mod error;
mod types;
mod value;

#[doc(hidden)]
pub use keccak_const;

#[doc(hidden)]
pub const fn digest_to_selector(digest: [u8; 32]) -> [u8; 4] {
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Computes a function or error selector from its canonical signature at compile time.
///
/// ```
/// const REGISTER: [u8; 4] = rwa_abi::function_selector!("registerAsset(string,address,string)");
/// ```
#[macro_export]
macro_rules! function_selector {
    ($signature:literal $(,)?) => {{
        const DIGEST: [u8; 32] = $crate::keccak_const::Keccak256::new()
            .update($signature.as_bytes())
            .finalize();
        $crate::digest_to_selector(DIGEST)
    }};
}

/// Computes an event topic from its canonical signature at compile time.
#[macro_export]
macro_rules! event_topic {
    ($signature:literal $(,)?) => {{
        const DIGEST: [u8; 32] = $crate::keccak_const::Keccak256::new()
            .update($signature.as_bytes())
            .finalize();
        $crate::B256::new(DIGEST)
    }};
}

#[test]
fn test_function_selector() {
    assert_eq!(u32::from_be_bytes(function_selector!("foo()")), 0xc2985578);
    assert_eq!(function_selector!("foo(address)"), [0xfd, 0xf8, 0x0b, 0xda]);

    const TEST_SELECTOR: [u8; 4] = function_selector!("foo(address,uint256)");
    assert_eq!(TEST_SELECTOR, 0xbd0d639f_u32.to_be_bytes());
    assert_eq!(
        function_selector!("registerAsset(string,address,string)"),
        descriptor::selector("registerAsset(string,address,string)")
    );
}

#[test]
fn test_event_topic() {
    use sha3::{Digest, Keccak256};

    let topic = event_topic!("AssetRegistered(uint256,string,address)");
    let expected = Keccak256::digest(b"AssetRegistered(uint256,string,address)");
    assert_eq!(topic.as_slice(), expected.as_slice());
    assert_eq!(topic, keccak256("AssetRegistered(uint256,string,address)"));
}
