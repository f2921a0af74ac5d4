// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! A mock transport for unit testing contract bindings.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use parking_lot::Mutex;
use rwa_abi::{Event, Function, Value};
use rwa_bind::{
    BlockNumber, CallMsg, ContractCaller, ContractFilterer, ContractTransactor, FilterQuery,
    LogSubscription, RawLog, SignedTransaction, TransportError,
};
use std::sync::Arc;

use crate::{
    constants::STUB_CODE,
    state::{BackendState, CallReturn},
    TestSigner,
};

/// Live subscriptions buffer this many logs before new ones are dropped.
const SUBSCRIPTION_BUFFER: usize = 64;

/// An in-memory implementation of every binding capability.
///
/// Clones share state, so a test can keep one handle for assertions while a binding owns
/// another.
///
/// # Examples
/// ```
/// use rwa_test::TestBackend;
/// use alloy_primitives::Address;
///
/// let backend = TestBackend::new();
/// let contract = Address::from([2u8; 20]);
/// backend.deploy(contract);
///
/// // Answer any call starting with this selector.
/// backend.mock_selector(contract, [0x06, 0x66, 0x1a, 0xbd], Ok(vec![0; 32]));
///
/// assert!(backend.sent_transactions().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    state: Arc<Mutex<BackendState>>,
}

impl From<BackendState> for TestBackend {
    fn from(state: BackendState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

impl TestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs placeholder bytecode so `address` looks like a deployed contract.
    pub fn deploy(&self, address: Address) {
        self.set_code(address, STUB_CODE.to_vec());
    }

    pub fn set_code(&self, address: Address, code: Vec<u8>) {
        self.state.lock().code.insert(address, code.into());
    }

    pub fn set_nonce(&self, address: Address, nonce: u64) {
        self.state.lock().nonces.insert(address, nonce);
    }

    pub fn set_gas_price(&self, gas_price: u128) {
        self.state.lock().gas_price = gas_price;
    }

    pub fn set_gas_estimate(&self, gas: u64) {
        self.state.lock().gas_estimate = gas;
    }

    pub fn set_block_number(&self, block_number: u64) {
        self.state.lock().block_number = block_number;
    }

    /// Advances to the next block, returning its number.
    pub fn mine(&self) -> u64 {
        let mut state = self.state.lock();
        state.block_number += 1;
        state.block_number
    }

    pub fn block_number(&self) -> u64 {
        self.state.lock().block_number
    }

    pub fn chain_id(&self) -> u64 {
        self.state.lock().chain_id
    }

    /// A [`TestSigner`] for `address` on this backend's chain.
    pub fn signer(&self, address: Address) -> TestSigner {
        TestSigner::new(address).with_chain_id(self.chain_id())
    }

    /// Mocks the result of calling `address` with exactly `calldata`.
    ///
    /// An `Err` result makes both calls and gas estimates revert with that data.
    pub fn mock_call(&self, address: Address, calldata: Vec<u8>, ret: CallReturn) {
        self.state.lock().call_returns.insert((address, calldata), ret);
    }

    /// Mocks the result of any call to `address` whose calldata starts with `selector`.
    pub fn mock_selector(&self, address: Address, selector: [u8; 4], ret: CallReturn) {
        self.state.lock().selector_returns.insert((address, selector), ret);
    }

    /// Mocks `function` called with `args` to return `outputs`.
    pub fn mock_function(
        &self,
        address: Address,
        function: &Function,
        args: &[Value],
        outputs: &[Value],
    ) -> rwa_abi::Result<()> {
        let calldata = function.encode_input(args)?;
        let output = function.encode_output(outputs)?;
        self.mock_call(address, calldata, Ok(output));
        Ok(())
    }

    /// Mocks `function` called with `args` to revert with `revert`.
    pub fn mock_revert(
        &self,
        address: Address,
        function: &Function,
        args: &[Value],
        revert: Vec<u8>,
    ) -> rwa_abi::Result<()> {
        let calldata = function.encode_input(args)?;
        self.mock_call(address, calldata, Err(revert));
        Ok(())
    }

    /// Makes the next transport request fail with `err`. Queued failures apply in order.
    pub fn fail_next(&self, err: TransportError) {
        self.state.lock().failures.push(err);
    }

    /// Messages seen by calls and gas estimates, in order.
    pub fn calls(&self) -> Vec<CallMsg> {
        self.state.lock().calls.clone()
    }

    pub fn sent_transactions(&self) -> Vec<SignedTransaction> {
        self.state.lock().sent.clone()
    }

    pub fn logs(&self) -> Vec<RawLog> {
        self.state.lock().logs.clone()
    }

    /// Records a log in the current block and delivers it to matching live subscriptions.
    ///
    /// The log is stamped with the current block number and the next free log index.
    pub fn emit_log(&self, address: Address, topics: Vec<B256>, data: Vec<u8>) -> RawLog {
        let mut state = self.state.lock();
        let log = RawLog {
            address,
            topics,
            data: data.into(),
            block_number: state.block_number,
            log_index: state.next_log_index(),
            ..Default::default()
        };
        state.logs.push(log.clone());
        state.subscriptions.retain(|(_, feed)| !feed.is_cancelled());
        for (query, feed) in &state.subscriptions {
            if query.matches(&log) {
                // a full buffer drops the log, as a lagging node stream would
                let _ = feed.try_send(log.clone());
            }
        }
        log
    }

    /// Encodes and emits `event` with `values` in declaration order.
    pub fn emit_event(
        &self,
        address: Address,
        event: &Event,
        values: &[Value],
    ) -> rwa_abi::Result<RawLog> {
        let (topics, data) = event.encode_log(values)?;
        Ok(self.emit_log(address, topics, data))
    }

    /// Live subscriptions whose consumer has not unsubscribed.
    pub fn active_subscriptions(&self) -> usize {
        let mut state = self.state.lock();
        state.subscriptions.retain(|(_, feed)| !feed.is_cancelled());
        state.subscriptions.len()
    }

    /// Ends every live subscription with `err`, as a dropped node connection would.
    pub fn fail_subscriptions(&self, err: TransportError) {
        let subscriptions = std::mem::take(&mut self.state.lock().subscriptions);
        for (_, feed) in subscriptions {
            feed.fail(err.clone());
        }
    }

    /// Read access to the full state, for assertions not covered by the accessors.
    pub fn inspect<T>(&self, f: impl FnOnce(&BackendState) -> T) -> T {
        f(&self.state.lock())
    }

    fn code(&self, account: Address) -> Result<Bytes, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        Ok(state.code.get(&account).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ContractCaller for TestBackend {
    async fn code_at(
        &self,
        account: Address,
        _block: BlockNumber,
    ) -> Result<Bytes, TransportError> {
        self.code(account)
    }

    async fn call_contract(
        &self,
        call: CallMsg,
        _block: BlockNumber,
    ) -> Result<Bytes, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.calls.push(call.clone());
        let Some(to) = call.to else {
            return Ok(Bytes::new());
        };
        match state.call_return(to, &call.data) {
            Some(Ok(output)) => Ok(output.clone().into()),
            Some(Err(revert)) => Err(TransportError::reverted(revert.clone())),
            None => Ok(Bytes::new()),
        }
    }
}

#[async_trait]
impl ContractTransactor for TestBackend {
    async fn pending_code_at(&self, account: Address) -> Result<Bytes, TransportError> {
        self.code(account)
    }

    async fn pending_nonce_at(&self, account: Address) -> Result<u64, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        Ok(state.nonces.get(&account).copied().unwrap_or_default())
    }

    async fn suggest_gas_price(&self) -> Result<u128, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        Ok(state.gas_price)
    }

    async fn estimate_gas(&self, call: CallMsg) -> Result<u64, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.calls.push(call.clone());
        if let Some(to) = call.to {
            if let Some(Err(revert)) = state.call_return(to, &call.data) {
                return Err(TransportError::reverted(revert.clone()));
            }
        }
        Ok(state.gas_estimate)
    }

    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        let nonce = state.nonces.entry(tx.from).or_default();
        if tx.tx.nonce != *nonce {
            return Err(TransportError::Rpc {
                code: -32000,
                message: format!("invalid nonce: expected {}, got {}", nonce, tx.tx.nonce),
                data: None,
            });
        }
        *nonce += 1;
        state.sent.push(tx.clone());
        Ok(())
    }
}

#[async_trait]
impl ContractFilterer for TestBackend {
    async fn filter_logs(&self, query: FilterQuery) -> Result<Vec<RawLog>, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        Ok(state.logs.iter().filter(|log| query.matches(log)).cloned().collect())
    }

    async fn subscribe_filter_logs(
        &self,
        query: FilterQuery,
    ) -> Result<LogSubscription, TransportError> {
        let mut state = self.state.lock();
        state.take_failure()?;
        let (feed, sub) = LogSubscription::channel(SUBSCRIPTION_BUFFER);
        state.subscriptions.push((query, feed));
        Ok(sub)
    }
}
