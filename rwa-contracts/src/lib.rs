// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Typed bindings for the RWA marketplace contracts.
//!
//! - [`RwaManager`] binds `AssetManagerRWA`, the asset registry and portfolio store.
//! - [`BondContract`] binds `BondsContractV1`, the bond marketplace.
//! - [`PropertyContract`] binds `PropertyContractV3`, the property marketplace.
//!
//! Each handle splits into a caller, a transactor and a filterer, and can be wrapped in a
//! session carrying preset options.
//!
//! ```no_run
//! use rwa_bind::{AlloyBackend, CallOpts, ChainConfig};
//! use rwa_contracts::Contracts;
//! use std::sync::Arc;
//!
//! # async fn run() -> rwa_bind::Result<()> {
//! let config = ChainConfig::load("Rwa.toml")?;
//! let backend = Arc::new(AlloyBackend::connect(&config).await?);
//! let contracts = Contracts::bind(&config.contracts, backend)?;
//! if let Some(manager) = &contracts.asset_manager {
//!     let assets = manager.caller.get_all_assets(&CallOpts::default()).await?;
//!     println!("{} assets", assets.len());
//! }
//! # Ok(())
//! # }
//! ```

use log::debug;
use rwa_bind::{ContractAddresses, ContractBackend, Result};
use std::sync::Arc;

pub use asset_manager_rwa::RwaManager;
pub use bond::BondContract;
pub use property::PropertyContract;

pub mod asset_manager_rwa;
pub mod bond;
pub mod property;

/// Handles for every contract with a configured address.
#[derive(Debug, Clone, Default)]
pub struct Contracts {
    pub asset_manager: Option<RwaManager>,
    pub bond: Option<BondContract>,
    pub property: Option<PropertyContract>,
}

impl Contracts {
    /// Binds each configured address with `backend`. Unset addresses are left unbound.
    pub fn bind<B: ContractBackend + 'static>(
        addresses: &ContractAddresses,
        backend: Arc<B>,
    ) -> Result<Self> {
        let mut contracts = Self::default();
        if let Some(address) = addresses.asset_manager {
            debug!("binding AssetManagerRWA at {address}");
            contracts.asset_manager = Some(RwaManager::new(address, backend.clone())?);
        }
        if let Some(address) = addresses.bond {
            debug!("binding bond contract at {address}");
            contracts.bond = Some(BondContract::new(address, backend.clone())?);
        }
        if let Some(address) = addresses.property {
            debug!("binding property contract at {address}");
            contracts.property = Some(PropertyContract::new(address, backend)?);
        }
        Ok(contracts)
    }
}
