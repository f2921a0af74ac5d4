// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy_primitives::Address;
use std::collections::HashMap;

use crate::{constants::STUB_CODE, BackendState, TestBackend};

/// Builds a [`TestBackend`] with preset chain state.
#[derive(Debug, Default)]
pub struct TestBackendBuilder {
    chain_id: Option<u64>,
    block_number: Option<u64>,
    gas_price: Option<u128>,
    gas_estimate: Option<u64>,
    code: HashMap<Address, Vec<u8>>,
    nonces: HashMap<Address, u64>,
}

impl TestBackendBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
    pub fn block_number(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }
    pub fn gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }
    pub fn gas_estimate(mut self, gas: u64) -> Self {
        self.gas_estimate = Some(gas);
        self
    }
    /// Marks `address` as a deployed contract.
    pub fn contract(mut self, address: Address) -> Self {
        self.code.insert(address, STUB_CODE.to_vec());
        self
    }
    pub fn code(mut self, address: Address, code: Vec<u8>) -> Self {
        self.code.insert(address, code);
        self
    }
    pub fn nonce(mut self, address: Address, nonce: u64) -> Self {
        self.nonces.insert(address, nonce);
        self
    }
    pub fn build(self) -> TestBackend {
        let mut state = BackendState::new();
        if let Some(chain_id) = self.chain_id {
            state.chain_id = chain_id;
        }
        if let Some(block_number) = self.block_number {
            state.block_number = block_number;
        }
        if let Some(gas_price) = self.gas_price {
            state.gas_price = gas_price;
        }
        if let Some(gas) = self.gas_estimate {
            state.gas_estimate = gas;
        }
        state.code = self
            .code
            .into_iter()
            .map(|(address, code)| (address, code.into()))
            .collect();
        state.nonces = self.nonces;
        TestBackend::from(state)
    }
}
