// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Bindings for `AssetManagerRWA`, the registry of tokenized assets and per-user portfolios.
//!
//! `registerAsset` allocates a fresh asset id and emits [`AssetRegistered`].
//! `createPortfolio` opens a portfolio for the sender. `refreshPortfolio` replaces a
//! portfolio snapshot and emits [`PortfolioUpdated`]; its id and quantity arrays are
//! positionally aligned, which the contract enforces and the binding does not.

use alloy_primitives::{Address, U256};
use rwa_abi::abi_struct;
use rwa_bind::{abi_event, caller_methods, contract_binding, event_filters, transactor_methods};

contract_binding! {
    /// A deployed `AssetManagerRWA`.
    pub struct RwaManager(include_str!("../abi/AssetManagerRWA.json"));
}

abi_struct! {
    /// `IAssetManager.Asset`
    pub struct Asset {
        pub name: String,
        pub asset_id: U256,
        pub contract_address: Address,
        pub category: String,
    }
}

abi_struct! {
    /// `IAssetManager.CategoryValue`
    pub struct CategoryValue {
        pub category: String,
        pub total_value: U256,
    }
}

abi_struct! {
    /// Outputs of `getPortfolio`.
    pub struct Portfolio {
        pub asset_ids: Vec<U256>,
        pub quantities: Vec<U256>,
        pub user_risk_profile: u8,
        pub current_value: U256,
        pub last_updated: U256,
        pub risk_analysis: u8,
        pub category_values: Vec<CategoryValue>,
    }
}

caller_methods! {
    RwaManager;
    fn get_all_assets = "getAllAssets"() -> Vec<Asset>;
    fn get_asset = "getAsset"(asset_id: U256) -> Asset;
    /// A user without a portfolio reads as all zeroes and empty arrays.
    fn get_portfolio = "getPortfolio"(user: Address) -> Portfolio;
    fn manager_name = "managerName"() -> String;
    fn name = "name"() -> String;
}

transactor_methods! {
    RwaManager;
    fn create_portfolio = "createPortfolio"(risk_profile: u8);
    fn refresh_portfolio = "refreshPortfolio"(
        user: Address,
        new_asset_ids: Vec<U256>,
        new_quantities: Vec<U256>,
        new_current_value: U256,
        new_risk_analysis: u8,
        new_category_values: Vec<CategoryValue>,
    );
    /// The allocated id is reported by the [`AssetRegistered`] log of the receipt.
    fn register_asset = "registerAsset"(asset_name: String, contract_address: Address, category: String);
}

abi_event! {
    pub struct AssetRegistered = "AssetRegistered" {
        pub asset_id: U256,
        pub name: String,
        pub contract_address: Address,
    }
}

abi_event! {
    pub struct PortfolioUpdated = "PortfolioUpdated" {
        pub user: Address,
        pub current_value: U256,
        pub risk_analysis: u8,
    }
}

event_filters! {
    RwaManager;
    AssetRegistered => asset_registered(asset_id: U256);
    PortfolioUpdated => portfolio_updated(user: Address);
}
