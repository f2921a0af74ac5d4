// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! JSON-RPC transport backed by an alloy [`Provider`].

use crate::{
    backend::{ContractCaller, ContractFilterer, ContractTransactor, LogSubscription},
    config::ChainConfig,
    error::{Result, TransportError},
    types::{BlockNumber, CallMsg, FilterQuery, RawLog, SignedTransaction},
};
use alloy::{
    eips::{BlockId, BlockNumberOrTag},
    network::TransactionBuilder,
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::types::{Filter, Log, TransactionRequest},
    transports::{RpcError, TransportErrorKind},
};
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::broadcast::error::RecvError;

/// Logs buffered per live subscription before the reader applies backpressure.
const SUBSCRIPTION_BUFFER: usize = 128;

impl From<RpcError<TransportErrorKind>> for TransportError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        match err.as_error_resp() {
            Some(payload) => Self::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
                data: payload.as_revert_data(),
            },
            None => Self::Connection(err.to_string()),
        }
    }
}

/// Serves every contract capability over an alloy provider.
#[derive(Debug, Clone)]
pub struct AlloyBackend<P> {
    provider: P,
}

impl<P> AlloyBackend<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl AlloyBackend<DynProvider> {
    /// Connects to the configured node, preferring the WebSocket endpoint when one is set.
    pub async fn connect(config: &ChainConfig) -> Result<Self> {
        let provider = match &config.ws_url {
            Some(url) => {
                debug!("connecting to {url}");
                ProviderBuilder::new()
                    .connect_ws(WsConnect::new(url.as_str()))
                    .await
                    .map_err(connection_error)?
                    .erased()
            }
            None => {
                debug!("connecting to {}", config.rpc_url);
                ProviderBuilder::new()
                    .connect(&config.rpc_url)
                    .await
                    .map_err(connection_error)?
                    .erased()
            }
        };
        if let Some(expected) = config.chain_id {
            let chain_id = provider.get_chain_id().await.map_err(TransportError::from)?;
            if chain_id != expected {
                return Err(crate::Error::Config(format!(
                    "node reports chain id {chain_id}, expected {expected}"
                )));
            }
        }
        Ok(Self::new(provider))
    }
}

fn connection_error(err: RpcError<TransportErrorKind>) -> TransportError {
    TransportError::Connection(err.to_string())
}

fn block_id(block: BlockNumber) -> BlockId {
    match block {
        BlockNumber::Latest => BlockId::latest(),
        BlockNumber::Pending => BlockId::pending(),
        BlockNumber::Earliest => BlockId::earliest(),
        BlockNumber::Number(number) => BlockId::number(number),
    }
}

fn request(call: CallMsg) -> TransactionRequest {
    let mut tx = TransactionRequest::default()
        .with_input(call.data)
        .with_value(call.value);
    if let Some(to) = call.to {
        tx = tx.with_to(to);
    }
    if let Some(from) = call.from {
        tx = tx.with_from(from);
    }
    if let Some(gas) = call.gas {
        tx = tx.with_gas_limit(gas);
    }
    if let Some(gas_price) = call.gas_price {
        tx = tx.with_gas_price(gas_price);
    }
    tx
}

fn filter(query: &FilterQuery) -> Filter {
    let mut filter = Filter::new();
    if !query.addresses.is_empty() {
        filter = filter.address(query.addresses.clone());
    }
    if let Some(from) = query.from_block {
        filter = filter.from_block(BlockNumberOrTag::Number(from));
    }
    if let Some(to) = query.to_block {
        filter = filter.to_block(BlockNumberOrTag::Number(to));
    }
    for (slot, set) in filter.topics.iter_mut().zip(&query.topics) {
        *slot = set.clone().into();
    }
    filter
}

fn raw_log(log: Log) -> RawLog {
    RawLog {
        address: log.inner.address,
        topics: log.inner.data.topics().to_vec(),
        data: log.inner.data.data.clone(),
        block_number: log.block_number.unwrap_or_default(),
        block_hash: log.block_hash.unwrap_or_default(),
        transaction_hash: log.transaction_hash.unwrap_or_default(),
        transaction_index: log.transaction_index.unwrap_or_default(),
        log_index: log.log_index.unwrap_or_default(),
        removed: log.removed,
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> ContractCaller for AlloyBackend<P> {
    async fn code_at(&self, account: Address, block: BlockNumber) -> Result<Bytes, TransportError> {
        Ok(self.provider.get_code_at(account).block_id(block_id(block)).await?)
    }

    async fn call_contract(
        &self,
        call: CallMsg,
        block: BlockNumber,
    ) -> Result<Bytes, TransportError> {
        Ok(self.provider.call(request(call)).block(block_id(block)).await?)
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> ContractTransactor for AlloyBackend<P> {
    async fn pending_code_at(&self, account: Address) -> Result<Bytes, TransportError> {
        Ok(self.provider.get_code_at(account).pending().await?)
    }

    async fn pending_nonce_at(&self, account: Address) -> Result<u64, TransportError> {
        Ok(self.provider.get_transaction_count(account).pending().await?)
    }

    async fn suggest_gas_price(&self) -> Result<u128, TransportError> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn estimate_gas(&self, call: CallMsg) -> Result<u64, TransportError> {
        Ok(self.provider.estimate_gas(request(call)).await?)
    }

    async fn send_transaction(&self, tx: &SignedTransaction) -> Result<(), TransportError> {
        let pending = self.provider.send_raw_transaction(&tx.raw).await?;
        debug!("node accepted {}", pending.tx_hash());
        Ok(())
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> ContractFilterer for AlloyBackend<P> {
    async fn filter_logs(&self, query: FilterQuery) -> Result<Vec<RawLog>, TransportError> {
        let logs = self.provider.get_logs(&filter(&query)).await?;
        Ok(logs.into_iter().map(raw_log).collect())
    }

    async fn subscribe_filter_logs(
        &self,
        query: FilterQuery,
    ) -> Result<LogSubscription, TransportError> {
        let mut sub = self.provider.subscribe_logs(&filter(&query)).await?;
        let (feed, logs) = LogSubscription::channel(SUBSCRIPTION_BUFFER);
        let provider = self.provider.clone();
        tokio::spawn(async move {
            loop {
                let next = tokio::select! {
                    biased;
                    _ = feed.cancelled() => break,
                    next = sub.recv() => next,
                };
                match next {
                    Ok(log) => {
                        if feed.send(raw_log(log)).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!("log subscription lagged, dropped {missed} logs")
                    }
                    Err(RecvError::Closed) => {
                        feed.fail(TransportError::SubscriptionClosed);
                        return;
                    }
                }
            }
            if let Err(err) = provider.unsubscribe(*sub.local_id()).await {
                debug!("failed to unsubscribe: {err}");
            }
        });
        Ok(logs)
    }
}
