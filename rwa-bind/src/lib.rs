// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Runtime for typed contract bindings.
//!
//! A [`BoundContract`] pairs an address and a parsed ABI with up to three transport
//! capabilities: [`ContractCaller`] for reads, [`ContractTransactor`] for transactions and
//! [`ContractFilterer`] for logs. [`AlloyBackend`] provides all three over JSON-RPC.
//!
//! Typed handles are generated on top of it with [`contract_binding!`], [`caller_methods!`],
//! [`transactor_methods!`], [`abi_event!`] and [`event_filters!`].

pub use backend::{
    ContractBackend, ContractCaller, ContractFilterer, ContractTransactor, LogSubscription,
    SubscriptionFeed,
};
pub use config::{ChainConfig, ConfigError, ContractAddresses};
pub use contract::BoundContract;
pub use error::{Error, Result, TransportError};
pub use event::{ContractEvent, EventIterator, EventSubscription};
pub use opts::{CallOpts, FilterOpts, TransactOpts, WatchOpts};
pub use provider::AlloyBackend;
pub use signer::{LocalSigner, TxSigner};
pub use types::{BlockNumber, CallMsg, FilterQuery, RawLog, SignedTransaction, Transaction};

pub use rwa_abi;
pub use tokio_util::sync::CancellationToken;

pub mod backend;
pub mod config;
pub mod provider;

mod contract;
mod error;
mod event;
mod macros;
mod opts;
mod signer;
mod types;

#[doc(hidden)]
pub mod private {
    pub use alloy_primitives::Address;
    pub use lazy_static::lazy_static;
    pub use paste::paste;
    pub use rwa_abi::{
        from_outputs, typed, Abi, AbiValue, Error as AbiError, Result as AbiResult, Value,
    };
    pub use tokio::sync::mpsc;
}
