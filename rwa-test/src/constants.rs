// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Defaults used by the [`crate::TestBackend`].

use alloy_primitives::{address, Address};

/// Default account of the [`crate::TestSigner`].
pub const DEFAULT_SENDER: Address = address!("DeaDbeefdEAdbeefdEadbEEFdeadbeEFdEaDbeeF");

/// Default address for contracts under test.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("dCE82b5f92C98F27F116F70491a487EFFDb6a2a9");

/// Default chain id. Arbitrum Sepolia.
pub const DEFAULT_CHAIN_ID: u64 = 421614;

/// Gas price suggested by the backend, in wei.
pub const DEFAULT_GAS_PRICE: u128 = 100_000_000;

/// Gas estimate returned for calls that do not revert.
pub const DEFAULT_GAS_ESTIMATE: u64 = 300_000;

/// Block the backend starts at.
pub const DEFAULT_BLOCK_NUMBER: u64 = 1;

/// Placeholder bytecode installed by [`crate::TestBackend::deploy`].
pub const STUB_CODE: &[u8] = &[0x60, 0x80, 0x60, 0x40, 0x52];
