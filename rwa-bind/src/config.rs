// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Chain and deployment settings read from a TOML file.
//!
//! ```toml
//! rpc_url = "https://sepolia-rollup.arbitrum.io/rpc"
//! chain_id = 421614
//! gas_limit = 300000
//!
//! [contracts]
//! asset_manager = "0x..."
//! bond = "0x..."
//! property = "0x..."
//! ```

use crate::{error::Error, opts::TransactOpts, signer::TxSigner};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc};

/// Conventional file name.
pub const FILENAME: &str = "Rwa.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing config file {0}")]
    Missing(String),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// HTTP endpoint used for calls and transactions.
    pub rpc_url: String,
    /// WebSocket endpoint. Live event subscriptions need one.
    #[serde(default)]
    pub ws_url: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Fixed gas limit for transactions. Estimated per transaction when unset.
    #[serde(default)]
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub contracts: ContractAddresses,
}

/// Deployed addresses of the RWA contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub asset_manager: Option<Address>,
    pub bond: Option<Address>,
    pub property: Option<Address>,
}

impl ChainConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Reads [`FILENAME`] from `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(dir.as_ref().join(FILENAME))
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("rpc_url", &self.rpc_url, &["http://", "https://", "ws://", "wss://"])?;
        if let Some(ws_url) = &self.ws_url {
            check_url("ws_url", ws_url, &["ws://", "wss://"])?;
        }
        if self.gas_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "gas_limit",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Transaction options for `signer`, carrying the configured gas limit.
    pub fn transact_opts(&self, signer: Arc<dyn TxSigner>) -> TransactOpts {
        let opts = TransactOpts::new(signer);
        match self.gas_limit {
            Some(limit) => opts.with_gas_limit(limit),
            None => opts,
        }
    }
}

fn check_url(field: &'static str, url: &str, schemes: &[&str]) -> Result<(), ConfigError> {
    if schemes.iter().any(|scheme| url.starts_with(scheme)) {
        return Ok(());
    }
    Err(ConfigError::Invalid {
        field,
        reason: format!("`{url}` must start with one of {}", schemes.join(", ")),
    })
}
