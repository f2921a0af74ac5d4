// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Transport capabilities a bound contract is built from.
//!
//! A binding holds each capability separately, so a read-only handle can be constructed from
//! a [`ContractCaller`] alone. Anything implementing all three is a [`ContractBackend`].

use crate::{
    error::TransportError,
    types::{BlockNumber, CallMsg, FilterQuery, RawLog, SignedTransaction},
};
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// Read-only contract access.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Runtime bytecode of `account`. Empty when no contract is deployed.
    async fn code_at(&self, account: Address, block: BlockNumber) -> Result<Bytes, TransportError>;

    /// Executes a message call without creating a transaction.
    async fn call_contract(
        &self,
        call: CallMsg,
        block: BlockNumber,
    ) -> Result<Bytes, TransportError>;
}

/// Everything needed to fill, sign and submit a transaction.
#[async_trait]
pub trait ContractTransactor: Send + Sync {
    async fn pending_code_at(&self, account: Address) -> Result<Bytes, TransportError>;

    async fn pending_nonce_at(&self, account: Address) -> Result<u64, TransportError>;

    async fn suggest_gas_price(&self) -> Result<u128, TransportError>;

    /// Reverts surface here as [`TransportError::Rpc`] with the revert data attached.
    async fn estimate_gas(&self, call: CallMsg) -> Result<u64, TransportError>;

    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<(), TransportError>;
}

/// Historical and live log access.
#[async_trait]
pub trait ContractFilterer: Send + Sync {
    async fn filter_logs(&self, query: FilterQuery) -> Result<Vec<RawLog>, TransportError>;

    async fn subscribe_filter_logs(
        &self,
        query: FilterQuery,
    ) -> Result<LogSubscription, TransportError>;
}

/// A transport providing every capability.
pub trait ContractBackend: ContractCaller + ContractTransactor + ContractFilterer {}

impl<T: ContractCaller + ContractTransactor + ContractFilterer> ContractBackend for T {}

/// Consumer side of a log stream.
///
/// Logs arrive in delivery order. A stream that failed yields its buffered logs, then the
/// error once, then ends. Dropping the subscription cancels it.
#[derive(Debug)]
pub struct LogSubscription {
    logs: mpsc::Receiver<RawLog>,
    failure: Option<oneshot::Receiver<TransportError>>,
    cancel: CancellationToken,
}

/// Producer side of a [`LogSubscription`], held by the transport.
#[derive(Debug)]
pub struct SubscriptionFeed {
    logs: mpsc::Sender<RawLog>,
    failure: oneshot::Sender<TransportError>,
    cancel: CancellationToken,
}

impl LogSubscription {
    /// Creates a connected feed and subscription, buffering up to `buffer` logs.
    pub fn channel(buffer: usize) -> (SubscriptionFeed, Self) {
        let (logs_tx, logs_rx) = mpsc::channel(buffer.max(1));
        let (fail_tx, fail_rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let feed = SubscriptionFeed {
            logs: logs_tx,
            failure: fail_tx,
            cancel: cancel.clone(),
        };
        let sub = Self {
            logs: logs_rx,
            failure: Some(fail_rx),
            cancel,
        };
        (feed, sub)
    }

    /// A finite stream over already-fetched logs.
    pub fn from_logs(logs: Vec<RawLog>) -> Self {
        let (feed, sub) = Self::channel(logs.len());
        for log in logs {
            // capacity covers every log
            let _ = feed.try_send(log);
        }
        sub
    }

    /// Next log, the stream's error, or `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<Result<RawLog, TransportError>> {
        if let Some(log) = self.logs.recv().await {
            return Some(Ok(log));
        }
        let failure = self.failure.take()?;
        if self.cancel.is_cancelled() {
            return None;
        }
        failure.await.ok().map(Err)
    }

    /// Stops delivery. Logs already buffered can still be received.
    pub fn unsubscribe(&mut self) {
        self.cancel.cancel();
        self.logs.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl SubscriptionFeed {
    /// Delivers a log, waiting for buffer space. Fails once the consumer is gone.
    pub async fn send(&self, log: RawLog) -> Result<(), RawLog> {
        if self.cancel.is_cancelled() {
            return Err(log);
        }
        self.logs.send(log).await.map_err(|err| err.0)
    }

    /// Delivers a log without waiting. Fails if the buffer is full or the consumer is gone.
    pub fn try_send(&self, log: RawLog) -> Result<(), RawLog> {
        if self.cancel.is_cancelled() {
            return Err(log);
        }
        self.logs.try_send(log).map_err(|err| err.into_inner())
    }

    /// Ends the stream with an error.
    pub fn fail(self, err: TransportError) {
        let _ = self.failure.send(err);
    }

    /// Resolves once the consumer unsubscribed or dropped the subscription.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.logs.is_closed()
    }
}
