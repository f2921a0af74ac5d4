// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Internal state of the [`crate::TestBackend`].

use alloy_primitives::{Address, Bytes};
use rwa_bind::{CallMsg, FilterQuery, RawLog, SignedTransaction, SubscriptionFeed, TransportError};
use std::collections::HashMap;

use crate::constants::{
    DEFAULT_BLOCK_NUMBER, DEFAULT_CHAIN_ID, DEFAULT_GAS_ESTIMATE, DEFAULT_GAS_PRICE,
};

/// Return data of a mocked call: `Ok` output or `Err` revert data.
pub type CallReturn = Result<Vec<u8>, Vec<u8>>;

/// Mocked calls keyed by target and exact calldata.
type MockCallWithAddress = (Address, Vec<u8>);

/// Mocked calls keyed by target and selector, used when no exact mock matches.
type MockSelectorWithAddress = (Address, [u8; 4]);

/// Everything the backend knows. Mocks, recorded traffic and log history.
#[derive(Debug)]
pub struct BackendState {
    pub chain_id: u64,
    pub block_number: u64,
    pub gas_price: u128,
    pub gas_estimate: u64,
    pub code: HashMap<Address, Bytes>,
    pub nonces: HashMap<Address, u64>,
    pub call_returns: HashMap<MockCallWithAddress, CallReturn>,
    pub selector_returns: HashMap<MockSelectorWithAddress, CallReturn>,
    /// Every message seen by `call_contract` and `estimate_gas`, in order.
    pub calls: Vec<CallMsg>,
    pub sent: Vec<SignedTransaction>,
    pub logs: Vec<RawLog>,
    pub subscriptions: Vec<(FilterQuery, SubscriptionFeed)>,
    /// Failures returned by the next transport requests, oldest first.
    pub failures: Vec<TransportError>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            block_number: DEFAULT_BLOCK_NUMBER,
            gas_price: DEFAULT_GAS_PRICE,
            gas_estimate: DEFAULT_GAS_ESTIMATE,
            code: HashMap::new(),
            nonces: HashMap::new(),
            call_returns: HashMap::new(),
            selector_returns: HashMap::new(),
            calls: Vec::new(),
            sent: Vec::new(),
            logs: Vec::new(),
            subscriptions: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl BackendState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next injected failure, if any.
    pub(crate) fn take_failure(&mut self) -> Result<(), TransportError> {
        match self.failures.is_empty() {
            true => Ok(()),
            false => Err(self.failures.remove(0)),
        }
    }

    /// Looks up the mocked result for a call, preferring an exact calldata match.
    pub(crate) fn call_return(&self, to: Address, data: &[u8]) -> Option<&CallReturn> {
        if let Some(ret) = self.call_returns.get(&(to, data.to_vec())) {
            return Some(ret);
        }
        let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
        self.selector_returns.get(&(to, selector))
    }

    pub(crate) fn next_log_index(&self) -> u64 {
        self.logs
            .iter()
            .filter(|log| log.block_number == self.block_number)
            .count() as u64
    }
}
