// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The dynamically typed contract handle every generated binding wraps.

use crate::{
    backend::{
        ContractBackend, ContractCaller, ContractFilterer, ContractTransactor, LogSubscription,
    },
    error::{Error, Result, TransportError},
    event::{ContractEvent, EventIterator, EventSubscription},
    opts::{CallOpts, FilterOpts, TransactOpts, WatchOpts},
    types::{CallMsg, FilterQuery, RawLog, SignedTransaction, Transaction},
};
use alloy_primitives::{hex, Address, Bytes};
use log::{debug, trace};
use rwa_abi::{Abi, RevertReason, Value};
use std::{future::Future, sync::Arc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A contract address paired with its ABI and the transports it may use.
///
/// Missing capabilities are reported as [`Error::Unsupported`] when an operation needs them.
#[derive(Clone)]
pub struct BoundContract {
    address: Address,
    abi: Arc<Abi>,
    caller: Option<Arc<dyn ContractCaller>>,
    transactor: Option<Arc<dyn ContractTransactor>>,
    filterer: Option<Arc<dyn ContractFilterer>>,
}

impl BoundContract {
    pub fn new(
        address: Address,
        abi: Arc<Abi>,
        caller: Option<Arc<dyn ContractCaller>>,
        transactor: Option<Arc<dyn ContractTransactor>>,
        filterer: Option<Arc<dyn ContractFilterer>>,
    ) -> Self {
        Self {
            address,
            abi,
            caller,
            transactor,
            filterer,
        }
    }

    /// Binds with a single backend serving all capabilities.
    pub fn with_backend<B: ContractBackend + 'static>(
        address: Address,
        abi: Arc<Abi>,
        backend: Arc<B>,
    ) -> Self {
        Self::new(address, abi, Some(backend.clone()), Some(backend.clone()), Some(backend))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    fn caller(&self) -> Result<&dyn ContractCaller> {
        self.caller.as_deref().ok_or(Error::Unsupported { capability: "caller" })
    }

    fn transactor(&self) -> Result<&dyn ContractTransactor> {
        self.transactor
            .as_deref()
            .ok_or(Error::Unsupported { capability: "transactor" })
    }

    fn filterer(&self) -> Result<&dyn ContractFilterer> {
        self.filterer
            .as_deref()
            .ok_or(Error::Unsupported { capability: "filterer" })
    }

    /// Invokes a constant method and decodes its outputs.
    ///
    /// Empty output from a method declaring outputs is an error: [`Error::NoCode`] when the
    /// address holds no contract, [`Error::NotFound`] otherwise.
    pub async fn call(&self, opts: &CallOpts, method: &str, args: &[Value]) -> Result<Vec<Value>> {
        let caller = self.caller()?;
        let function = self.abi.function(method)?;
        let input = function.encode_input(args)?;
        let block = opts.block();
        trace!(
            "calling {} on {} at {block:?}: {}",
            function.signature,
            self.address,
            short_hex(&input)
        );

        let msg = CallMsg {
            from: opts.from,
            to: Some(self.address),
            data: input.into(),
            ..Default::default()
        };
        let output = cancellable(opts.cancel.as_ref(), caller.call_contract(msg, block)).await?;
        if output.is_empty() && !function.outputs.is_empty() {
            let code =
                cancellable(opts.cancel.as_ref(), caller.code_at(self.address, block)).await?;
            if code.is_empty() {
                return Err(Error::NoCode(self.address));
            }
            return Err(Error::NotFound {
                method: method.to_string(),
            });
        }
        Ok(function.decode_output(&output)?)
    }

    /// Invokes a state-changing method.
    ///
    /// Sending value to a method that is not payable is refused before anything is signed.
    pub async fn transact(
        &self,
        opts: &TransactOpts,
        method: &str,
        args: &[Value],
    ) -> Result<SignedTransaction> {
        let function = self.abi.function(method)?;
        if !opts.value.is_zero() && !function.is_payable() {
            return Err(Error::NonPayable {
                method: method.to_string(),
            });
        }
        let input = function.encode_input(args)?;
        let tx = self.submit(opts, input.into()).await?;
        debug!("sent {} to {}: {}", function.name, self.address, tx.hash);
        Ok(tx)
    }

    /// Sends a transaction with caller-supplied calldata.
    pub async fn raw_transact(
        &self,
        opts: &TransactOpts,
        calldata: Vec<u8>,
    ) -> Result<SignedTransaction> {
        let tx = self.submit(opts, calldata.into()).await?;
        debug!("sent raw transaction to {}: {}", self.address, tx.hash);
        Ok(tx)
    }

    /// Sends plain value to the contract's receive or fallback function.
    pub async fn transfer(&self, opts: &TransactOpts) -> Result<SignedTransaction> {
        let tx = self.submit(opts, Bytes::new()).await?;
        debug!("sent {} wei to {}: {}", opts.value, self.address, tx.hash);
        Ok(tx)
    }

    async fn submit(&self, opts: &TransactOpts, data: Bytes) -> Result<SignedTransaction> {
        let transactor = self.transactor()?;
        let cancel = opts.cancel.as_ref();
        let from = opts.from();

        let nonce = match opts.nonce {
            Some(nonce) => nonce,
            None => cancellable(cancel, transactor.pending_nonce_at(from)).await?,
        };
        let gas_price = match opts.gas_price {
            Some(price) => price,
            None => cancellable(cancel, transactor.suggest_gas_price()).await?,
        };
        let gas_limit = match opts.gas_limit {
            Some(limit) => limit,
            None => {
                if !data.is_empty() {
                    let code = cancellable(cancel, transactor.pending_code_at(self.address)).await?;
                    if code.is_empty() {
                        return Err(Error::NoCode(self.address));
                    }
                }
                let msg = CallMsg {
                    from: Some(from),
                    to: Some(self.address),
                    gas: None,
                    gas_price: Some(gas_price),
                    value: opts.value,
                    data: data.clone(),
                };
                cancellable(cancel, transactor.estimate_gas(msg)).await?
            }
        };

        let tx = Transaction {
            nonce,
            gas_price,
            gas_limit,
            to: Some(self.address),
            value: opts.value,
            data,
        };
        trace!("signing {tx:?}");
        let signed = opts.signer.sign_transaction(tx)?;
        if opts.no_send {
            return Ok(signed);
        }
        cancellable(cancel, transactor.send_transaction(&signed)).await?;
        Ok(signed)
    }

    fn query(&self, event: &str, indexed: &[Vec<Value>]) -> Result<FilterQuery> {
        let event = self.abi.event(event)?;
        Ok(FilterQuery {
            addresses: vec![self.address],
            topics: event.topic_filter(indexed)?,
            ..Default::default()
        })
    }

    /// Fetches matching historical logs, ordered by block then log index.
    ///
    /// `indexed` holds one set of accepted values per indexed field, in declaration order;
    /// an empty set matches any value.
    pub async fn filter_logs(
        &self,
        opts: &FilterOpts,
        event: &str,
        indexed: &[Vec<Value>],
    ) -> Result<LogSubscription> {
        let filterer = self.filterer()?;
        let query = FilterQuery {
            from_block: Some(opts.start),
            to_block: opts.end,
            ..self.query(event, indexed)?
        };
        let mut logs = cancellable(opts.cancel.as_ref(), filterer.filter_logs(query)).await?;
        logs.sort_by_key(RawLog::position);
        trace!("fetched {} {event} logs from {}", logs.len(), self.address);
        Ok(LogSubscription::from_logs(logs))
    }

    /// Subscribes to matching logs as they are produced.
    pub async fn watch_logs(
        &self,
        opts: &WatchOpts,
        event: &str,
        indexed: &[Vec<Value>],
    ) -> Result<LogSubscription> {
        let filterer = self.filterer()?;
        let query = FilterQuery {
            from_block: opts.start,
            ..self.query(event, indexed)?
        };
        let sub = cancellable(opts.cancel.as_ref(), filterer.subscribe_filter_logs(query)).await?;
        debug!("watching {event} logs on {}", self.address);
        Ok(sub)
    }

    /// Decodes a log of `event` into its values, in declaration order.
    pub fn unpack_log(&self, event: &str, log: &RawLog) -> Result<Vec<Value>> {
        Ok(self.abi.event(event)?.decode_log(&log.topics, &log.data)?)
    }

    /// Decodes a log into a typed event record.
    pub fn parse_log<E: ContractEvent>(&self, log: RawLog) -> Result<E> {
        E::decode(self.abi.event(E::NAME)?, log)
    }

    /// Typed iterator over historical occurrences of `E`.
    pub async fn filter_events<E: ContractEvent>(
        &self,
        opts: &FilterOpts,
        indexed: &[Vec<Value>],
    ) -> Result<EventIterator<E>> {
        let event = self.abi.event(E::NAME)?.clone();
        let logs = self.filter_logs(opts, E::NAME, indexed).await?;
        Ok(EventIterator::new(event, logs))
    }

    /// Forwards live occurrences of `E` into `sink` from a background task.
    pub async fn watch_events<E: ContractEvent>(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<E>,
        indexed: &[Vec<Value>],
    ) -> Result<EventSubscription> {
        let event = self.abi.event(E::NAME)?.clone();
        let logs = self.watch_logs(opts, E::NAME, indexed).await?;
        Ok(EventSubscription::spawn(event, logs, sink))
    }

    /// Decodes revert data as the named custom error.
    pub fn parse_revert(&self, error: &str, data: &[u8]) -> Result<Vec<Value>> {
        Ok(self.abi.error(error)?.decode(data)?)
    }

    /// Interprets revert data against the built-in reverts and this contract's errors.
    pub fn revert_reason(&self, data: &[u8]) -> RevertReason {
        RevertReason::decode(data, Some(&self.abi))
    }
}

impl std::fmt::Debug for BoundContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundContract")
            .field("address", &self.address)
            .field("caller", &self.caller.is_some())
            .field("transactor", &self.transactor.is_some())
            .field("filterer", &self.filterer.is_some())
            .finish_non_exhaustive()
    }
}

/// Runs a transport request, abandoning it once `cancel` fires.
async fn cancellable<T>(
    cancel: Option<&CancellationToken>,
    request: impl Future<Output = Result<T, TransportError>>,
) -> Result<T> {
    let Some(cancel) = cancel else {
        return Ok(request.await?);
    };
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = request => Ok(result?),
    }
}

/// Formats calldata for log output.
fn short_hex(data: &[u8]) -> String {
    match data.len() {
        0..=36 => hex::encode_prefixed(data),
        _ => format!("{}..({} bytes)", hex::encode_prefixed(&data[..36]), data.len()),
    }
}
