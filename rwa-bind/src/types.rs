// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Transport-neutral request and log types.

use alloy_primitives::{Address, Bytes, B256, U256};

/// Block at which a read is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockNumber {
    #[default]
    Latest,
    Pending,
    Earliest,
    Number(u64),
}

/// A message for a read-only call or a gas estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMsg {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub gas: Option<u64>,
    pub gas_price: Option<u128>,
    pub value: U256,
    pub data: Bytes,
}

/// A log as delivered by the node, with its chain coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    pub block_number: u64,
    pub block_hash: B256,
    pub transaction_hash: B256,
    pub transaction_index: u64,
    pub log_index: u64,
    /// Set when a reorg removed the log.
    pub removed: bool,
}

impl RawLog {
    /// Ordering key: block, then log index within the block.
    pub fn position(&self) -> (u64, u64) {
        (self.block_number, self.log_index)
    }
}

/// Log query. Topic sets are positional; an empty set matches any topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub from_block: Option<u64>,
    /// `None` reads up to the latest block.
    pub to_block: Option<u64>,
    pub addresses: Vec<Address>,
    pub topics: Vec<Vec<B256>>,
}

impl FilterQuery {
    pub fn matches(&self, log: &RawLog) -> bool {
        if !self.addresses.is_empty() && !self.addresses.contains(&log.address) {
            return false;
        }
        if self.from_block.is_some_and(|from| log.block_number < from)
            || self.to_block.is_some_and(|to| log.block_number > to)
        {
            return false;
        }
        self.topics.iter().enumerate().all(|(i, set)| {
            set.is_empty() || log.topics.get(i).is_some_and(|topic| set.contains(topic))
        })
    }
}

/// A legacy transaction before signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
}

/// A signed transaction, as returned by every transacting method.
///
/// Holding one only means the transaction was submitted; its on-chain outcome must be
/// read from the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx: Transaction,
    pub from: Address,
    pub hash: B256,
    /// EIP-2718 encoding, as submitted to the node.
    pub raw: Bytes,
}

impl SignedTransaction {
    pub fn hash(&self) -> B256 {
        self.hash
    }
}
