// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory transport for testing contract bindings.
//!
//! [`TestBackend`] implements every capability of [`rwa_bind::ContractBackend`] without a
//! node. Calls are answered from mocked return data, transactions are recorded instead of
//! mined, and logs pushed with [`TestBackend::emit_log`] are kept for historical queries and
//! delivered to live subscriptions whose filter matches.
//!
//! ```
//! use rwa_bind::{rwa_abi::Abi, BoundContract};
//! use rwa_test::{constants::DEFAULT_CONTRACT_ADDRESS, TestBackend};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(TestBackend::new());
//! backend.deploy(DEFAULT_CONTRACT_ADDRESS);
//! let abi = Abi::parse(r#"[{"type":"function","name":"count","inputs":[],
//!     "outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}]"#).unwrap();
//! let contract = BoundContract::with_backend(DEFAULT_CONTRACT_ADDRESS, Arc::new(abi), backend);
//! assert_eq!(contract.address(), DEFAULT_CONTRACT_ADDRESS);
//! ```

pub mod builder;
pub mod constants;
pub mod signer;
pub mod state;

mod backend;

pub use backend::TestBackend;
pub use builder::TestBackendBuilder;
pub use signer::TestSigner;
pub use state::{BackendState, CallReturn};
