// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! A deterministic signer for tests.

use alloy_primitives::{keccak256, Address};
use rwa_bind::{SignedTransaction, Transaction, TxSigner};

use crate::constants::{DEFAULT_CHAIN_ID, DEFAULT_SENDER};

/// Produces stable hashes without any key material.
///
/// The `raw` bytes of its transactions are a plain field concatenation, not a valid
/// EIP-2718 envelope. Only the [`crate::TestBackend`] accepts them.
#[derive(Debug, Clone)]
pub struct TestSigner {
    address: Address,
    chain_id: u64,
}

impl Default for TestSigner {
    fn default() -> Self {
        Self::new(DEFAULT_SENDER)
    }
}

impl TestSigner {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl TxSigner for TestSigner {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_transaction(&self, tx: Transaction) -> rwa_bind::Result<SignedTransaction> {
        let mut raw = Vec::with_capacity(128 + tx.data.len());
        raw.extend(self.chain_id.to_be_bytes());
        raw.extend_from_slice(self.address.as_slice());
        raw.extend(tx.nonce.to_be_bytes());
        raw.extend(tx.gas_price.to_be_bytes());
        raw.extend(tx.gas_limit.to_be_bytes());
        raw.extend_from_slice(tx.to.unwrap_or_default().as_slice());
        raw.extend(tx.value.to_be_bytes::<32>());
        raw.extend_from_slice(&tx.data);
        Ok(SignedTransaction {
            hash: keccak256(&raw),
            from: self.address,
            raw: raw.into(),
            tx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn hashes_are_stable_and_distinct() {
        let signer = TestSigner::default();
        let tx = Transaction {
            nonce: 1,
            value: U256::from(10),
            ..Default::default()
        };
        let a = signer.sign_transaction(tx.clone()).unwrap();
        let b = signer.sign_transaction(tx.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.from, DEFAULT_SENDER);

        let bumped = Transaction { nonce: 2, ..tx.clone() };
        assert_ne!(signer.sign_transaction(bumped).unwrap().hash, a.hash);

        let other_chain = signer.clone().with_chain_id(1).sign_transaction(tx).unwrap();
        assert_ne!(other_chain.hash, a.hash);
    }
}
