// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Transaction signing.

use crate::{
    error::{Error, Result},
    types::{SignedTransaction, Transaction},
};
use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    network::TxSignerSync,
    primitives::TxKind,
    signers::local::PrivateKeySigner,
};
use alloy_primitives::Address;
use std::str::FromStr;

/// Signs transactions on behalf of a single account.
pub trait TxSigner: Send + Sync {
    fn address(&self) -> Address;

    fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction>;
}

/// An in-process private key producing EIP-155 replay-protected legacy transactions.
#[derive(Clone)]
pub struct LocalSigner {
    key: PrivateKeySigner,
    chain_id: u64,
}

impl LocalSigner {
    pub fn new(key: PrivateKeySigner, chain_id: u64) -> Self {
        Self { key, chain_id }
    }

    /// Parses a hex private key, with or without the `0x` prefix.
    pub fn from_hex(key: &str, chain_id: u64) -> Result<Self> {
        let key = PrivateKeySigner::from_str(key.trim())
            .map_err(|err| Error::Signer(format!("invalid private key: {err}")))?;
        Ok(Self::new(key, chain_id))
    }

    /// A fresh random key, for tests and throwaway accounts.
    pub fn random(chain_id: u64) -> Self {
        Self::new(PrivateKeySigner::random(), chain_id)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.key.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl TxSigner for LocalSigner {
    fn address(&self) -> Address {
        self.key.address()
    }

    fn sign_transaction(&self, tx: Transaction) -> Result<SignedTransaction> {
        let mut legacy = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: tx.to.map_or(TxKind::Create, TxKind::Call),
            value: tx.value,
            input: tx.data.clone(),
        };
        let signature = self
            .key
            .sign_transaction_sync(&mut legacy)
            .map_err(|err| Error::Signer(err.to_string()))?;
        let envelope = TxEnvelope::from(legacy.into_signed(signature));
        Ok(SignedTransaction {
            tx,
            from: self.key.address(),
            hash: *envelope.tx_hash(),
            raw: envelope.encoded_2718().into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{consensus::Transaction as _, eips::eip2718::Decodable2718};
    use alloy_primitives::{address, U256};

    // first account of the standard development mnemonic
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn signs_replay_protected_legacy() {
        let signer = LocalSigner::from_hex(DEV_KEY, 421614).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let tx = Transaction {
            nonce: 4,
            gas_price: 100_000_000,
            gas_limit: 300_000,
            to: Some(Address::repeat_byte(0x11)),
            value: U256::from(5),
            data: vec![0xa6, 0xf2, 0xae, 0x3a].into(),
        };
        let signed = signer.sign_transaction(tx.clone()).unwrap();
        assert_eq!(signed.tx, tx);
        assert_eq!(signed.from, signer.address());

        let decoded = TxEnvelope::decode_2718(&mut signed.raw.as_ref()).unwrap();
        assert_eq!(*decoded.tx_hash(), signed.hash);
        assert_eq!(decoded.chain_id(), Some(421614));
        assert_eq!(decoded.nonce(), 4);
        assert_eq!(decoded.gas_limit(), 300_000);
        assert_eq!(decoded.value(), U256::from(5));
    }

    #[test]
    fn rejects_malformed_key() {
        assert!(matches!(
            LocalSigner::from_hex("0x1234", 1),
            Err(Error::Signer(_))
        ));
    }
}
