// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Bindings for `BondsContractV1`, an upgradeable multi-token bond marketplace.
//!
//! Each bond is a token id. `addBond` issues one, `buy` and `sell` trade it for value and
//! emit [`AssetBought`] and [`AssetSold`]. Balances and approvals follow the multi-token
//! standard; upgrades go through `upgradeToAndCall`.

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use rwa_abi::abi_struct;
use rwa_bind::{abi_event, caller_methods, contract_binding, event_filters, transactor_methods};

contract_binding! {
    /// A deployed `BondsContractV1` proxy.
    pub struct BondContract(include_str!("../abi/Bond.json"));
}

abi_struct! {
    /// `BondsContractV1.Bond`, the issuance metadata of one bond.
    pub struct Bond {
        pub name: String,
        pub symbol: String,
        pub doc_hash: String,
        pub country: String,
        pub issuer: Address,
        pub total_supply: U256,
        pub initial_price: U256,
        pub logo: String,
    }
}

caller_methods! {
    BondContract;
    fn upgrade_interface_version = "UPGRADE_INTERFACE_VERSION"() -> String;
    fn asset_name = "assetName"(id: U256) -> String;
    fn asset_symbol = "assetSymbol"(id: U256) -> String;
    fn asset_total_supply = "assetTotalSupply"(id: U256) -> U256;
    fn balance_of = "balanceOf"(account: Address, id: U256) -> U256;
    fn balance_of_batch = "balanceOfBatch"(accounts: Vec<Address>, ids: Vec<U256>) -> Vec<U256>;
    fn decimals = "decimals"() -> U256;
    fn get_all_asset_ids = "getAllAssetIds"() -> Vec<U256>;
    fn get_bonds_details_from_id = "getBondsDetailsFromId"(id: U256) -> Bond;
    fn get_buy_price = "getBuyPrice"(id: U256) -> U256;
    fn get_current_supply = "getCurrentSupply"(id: U256) -> U256;
    fn get_sell_price = "getSellPrice"(id: U256) -> U256;
    /// Ids of every bond `user` holds.
    fn get_user_asset_ids = "getUserAssetIds"(user: Address) -> Vec<U256>;
    fn is_approved_for_all = "isApprovedForAll"(account: Address, operator: Address) -> bool;
    fn name = "name"() -> String;
    fn owner = "owner"() -> Address;
    fn proxiable_uuid = "proxiableUUID"() -> B256;
    fn supports_interface = "supportsInterface"(interface_id: FixedBytes<4>) -> bool;
    fn symbol = "symbol"() -> String;
    fn total_bonds = "totalBonds"() -> U256;
    fn uri = "uri"(id: U256) -> String;
}

transactor_methods! {
    BondContract;
    fn add_bond = "addBond"(bond: Bond);
    /// Payable. The price is carried as the transaction value.
    fn buy = "buy"(id: U256);
    fn initialize = "initialize"();
    fn renounce_ownership = "renounceOwnership"();
    fn safe_batch_transfer_from = "safeBatchTransferFrom"(
        from: Address,
        to: Address,
        ids: Vec<U256>,
        values: Vec<U256>,
        data: Bytes,
    );
    fn safe_transfer_from = "safeTransferFrom"(from: Address, to: Address, id: U256, value: U256, data: Bytes);
    /// Payable.
    fn sell = "sell"(id: U256);
    fn set_approval_for_all = "setApprovalForAll"(operator: Address, approved: bool);
    fn transfer_ownership = "transferOwnership"(new_owner: Address);
    fn upgrade_to_and_call = "upgradeToAndCall"(new_implementation: Address, data: Bytes);
}

abi_event! {
    pub struct ApprovalForAll = "ApprovalForAll" {
        pub account: Address,
        pub operator: Address,
        pub approved: bool,
    }
}

abi_event! {
    pub struct AssetBought = "AssetBought" {
        pub asset_id: U256,
        pub buyer: Address,
        pub token_count: U256,
        pub price: U256,
        pub name: String,
        pub timestamp: U256,
    }
}

abi_event! {
    pub struct AssetIssued = "AssetIssued" {
        pub asset_id: U256,
        pub to: Address,
        pub total_supply: U256,
        pub initial_price: U256,
        pub name: String,
        pub symbol: String,
        pub timestamp: U256,
    }
}

abi_event! {
    pub struct AssetSold = "AssetSold" {
        pub asset_id: U256,
        pub seller: Address,
        pub token_count: U256,
        pub price: U256,
        pub name: String,
        pub timestamp: U256,
    }
}

abi_event! {
    pub struct Initialized = "Initialized" {
        pub version: u64,
    }
}

abi_event! {
    pub struct OwnershipTransferred = "OwnershipTransferred" {
        pub previous_owner: Address,
        pub new_owner: Address,
    }
}

abi_event! {
    pub struct TransferBatch = "TransferBatch" {
        pub operator: Address,
        pub from: Address,
        pub to: Address,
        pub ids: Vec<U256>,
        pub values: Vec<U256>,
    }
}

abi_event! {
    pub struct TransferSingle = "TransferSingle" {
        pub operator: Address,
        pub from: Address,
        pub to: Address,
        pub id: U256,
        pub value: U256,
    }
}

abi_event! {
    /// The `URI` event.
    pub struct Uri = "URI" {
        pub value: String,
        pub id: U256,
    }
}

abi_event! {
    pub struct Upgraded = "Upgraded" {
        pub implementation: Address,
    }
}

event_filters! {
    BondContract;
    ApprovalForAll => approval_for_all(account: Address, operator: Address);
    AssetBought => asset_bought(asset_id: U256, buyer: Address);
    AssetIssued => asset_issued(asset_id: U256, to: Address);
    AssetSold => asset_sold(asset_id: U256, seller: Address);
    Initialized => initialized();
    OwnershipTransferred => ownership_transferred(previous_owner: Address, new_owner: Address);
    TransferBatch => transfer_batch(operator: Address, from: Address, to: Address);
    TransferSingle => transfer_single(operator: Address, from: Address, to: Address);
    Uri => uri(id: U256);
    Upgraded => upgraded(implementation: Address);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rwa_abi::{AbiValue, RevertReason, Value};

    #[test]
    fn bond_record_matches_abi() {
        let abi = BondContract::abi().unwrap();
        assert_eq!(abi.function("addBond").unwrap().inputs[0].ty, Bond::param_type());
        assert_eq!(
            abi.function("getBondsDetailsFromId").unwrap().outputs[0].ty,
            Bond::param_type()
        );
        assert!(abi.function("buy").unwrap().is_payable());
        assert!(!abi.function("addBond").unwrap().is_payable());
    }

    #[test]
    fn declared_errors_decode() {
        let abi = BondContract::abi().unwrap();
        let unauthorized = abi.error("OwnableUnauthorizedAccount").unwrap();
        let account = Address::repeat_byte(7);
        let data = unauthorized.encode(&[account.into()]).unwrap();
        assert_eq!(
            RevertReason::decode(&data, Some(&abi)),
            RevertReason::Custom {
                name: "OwnableUnauthorizedAccount".into(),
                values: vec![Value::Address(account)],
            }
        );
    }

    #[test]
    fn uri_event_indexes_id_only() {
        let abi = BondContract::abi().unwrap();
        let event = abi.event("URI").unwrap();
        assert_eq!(event.signature, "URI(string,uint256)");
        assert_eq!(event.topic_count(), 2);
    }
}
