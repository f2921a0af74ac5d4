// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Per-operation options.
//!
//! Every option set carries an optional [`CancellationToken`]; cancelling it aborts the
//! in-flight transport request with [`Error::Cancelled`](crate::Error::Cancelled).

use crate::{signer::TxSigner, types::BlockNumber};
use alloy_primitives::{Address, U256};
use std::{fmt, sync::Arc};
use tokio_util::sync::CancellationToken;

/// Options for read-only calls.
#[derive(Debug, Clone, Default)]
pub struct CallOpts {
    /// Evaluate against the pending state.
    pub pending: bool,
    pub from: Option<Address>,
    /// Evaluate at a historical block. Ignored when `pending` is set.
    pub block_number: Option<u64>,
    pub cancel: Option<CancellationToken>,
}

impl CallOpts {
    pub fn block(&self) -> BlockNumber {
        match (self.pending, self.block_number) {
            (true, _) => BlockNumber::Pending,
            (false, Some(number)) => BlockNumber::Number(number),
            (false, None) => BlockNumber::Latest,
        }
    }

    pub fn at_block(mut self, number: u64) -> Self {
        self.block_number = Some(number);
        self
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Options for state-changing transactions.
///
/// Unset fields are filled from the transport: the nonce from the pending count, the gas
/// price from the node's suggestion and the gas limit from an estimate.
#[derive(Clone)]
pub struct TransactOpts {
    pub signer: Arc<dyn TxSigner>,
    pub nonce: Option<u64>,
    pub value: U256,
    pub gas_price: Option<u128>,
    pub gas_limit: Option<u64>,
    /// Sign but do not submit.
    pub no_send: bool,
    pub cancel: Option<CancellationToken>,
}

impl TransactOpts {
    pub fn new(signer: Arc<dyn TxSigner>) -> Self {
        Self {
            signer,
            nonce: None,
            value: U256::ZERO,
            gas_price: None,
            gas_limit: None,
            no_send: false,
            cancel: None,
        }
    }

    /// Address transactions are sent from.
    pub fn from(&self) -> Address {
        self.signer.address()
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn no_send(mut self) -> Self {
        self.no_send = true;
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl fmt::Debug for TransactOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactOpts")
            .field("from", &self.from())
            .field("nonce", &self.nonce)
            .field("value", &self.value)
            .field("gas_price", &self.gas_price)
            .field("gas_limit", &self.gas_limit)
            .field("no_send", &self.no_send)
            .finish_non_exhaustive()
    }
}

/// Options for historical log queries.
#[derive(Debug, Clone, Default)]
pub struct FilterOpts {
    pub start: u64,
    /// Last block to read. `None` reads up to the latest block.
    pub end: Option<u64>,
    pub cancel: Option<CancellationToken>,
}

/// Options for live log subscriptions.
#[derive(Debug, Clone, Default)]
pub struct WatchOpts {
    /// First block to deliver from. `None` starts at the head.
    pub start: Option<u64>,
    pub cancel: Option<CancellationToken>,
}
