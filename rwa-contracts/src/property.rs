// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Bindings for `PropertyContractV3`, the upgradeable real-estate marketplace.
//!
//! A property is registered in two steps. `addPropertyDetails` stores a [`Property`] and
//! `addPropertyOtherDetails` stores the matching [`PropertyDetails`] at the same index.
//! The two records are updated separately with [`PropertyUpdate`] and
//! [`PropertyDetailsUpdate`].
//!
//! `disasterManagement` rebases the pricing of a property and emits [`DisasterEvent`].
//! Whether prices go down or up is decided on chain; the event reports both sides.
//!
//! The contract has its own per-id `approve` and `allowance` besides the multi-token
//! `setApprovalForAll`. Both are exposed as declared.

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use rwa_abi::abi_struct;
use rwa_bind::{abi_event, caller_methods, contract_binding, event_filters, transactor_methods};

contract_binding! {
    /// A deployed `PropertyContractV3` proxy.
    pub struct PropertyContract(include_str!("../abi/Property.json"));
}

abi_struct! {
    /// `addPropertyInArray.Property`, also the outputs of `allProperties`.
    pub struct Property {
        pub title: String,
        pub category: String,
        pub subcategory: String,
        pub location: String,
        pub document: String,
        pub country: String,
        pub condition: String,
        pub lot_size: U256,
        pub price: U256,
        pub number_of_nft: U256,
    }
}

abi_struct! {
    /// `addPropertyInArray.OtherDetails`, also the outputs of `allPropertiesDetails`.
    pub struct PropertyDetails {
        pub image_uri: String,
        pub neighbourhood: String,
        pub state: String,
        pub city: String,
        pub description: String,
        pub number_of_bhk: U256,
        pub interior_size: U256,
        pub archived: bool,
    }
}

abi_struct! {
    /// `addPropertyInArray.PropertyUpdate`
    pub struct PropertyUpdate {
        pub index: U256,
        pub price: U256,
        pub category: String,
        pub subcategory: String,
        pub title: String,
        pub location: String,
        pub country: String,
        pub condition: String,
        pub lot_size: U256,
    }
}

abi_struct! {
    /// `addPropertyInArray.OtherPropertyUpdate`
    pub struct PropertyDetailsUpdate {
        pub index: U256,
        pub interior_size: U256,
        pub number_of_bhk: U256,
        pub neighbourhood: String,
        pub state: String,
        pub city: String,
        pub description: String,
    }
}

abi_struct! {
    /// `addPropertyInArray.SearchParams`
    ///
    /// Empty strings and empty bounds leave a criterion open. Bounds are `[min, max]`.
    pub struct SearchParams {
        pub category: String,
        pub condition: String,
        pub country: String,
        pub price: Vec<U256>,
        pub area: Vec<U256>,
    }
}

impl SearchParams {
    pub fn new(
        category: impl Into<String>,
        condition: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            condition: condition.into(),
            country: country.into(),
            ..Default::default()
        }
    }

    pub fn price_between(mut self, min: U256, max: U256) -> Self {
        self.price = vec![min, max];
        self
    }

    pub fn area_between(mut self, min: U256, max: U256) -> Self {
        self.area = vec![min, max];
        self
    }
}

abi_struct! {
    /// Outputs of `allDisasters` and `latestDisasterDetail`.
    pub struct Disaster {
        pub reason: String,
        pub id: U256,
        pub time_of_disaster: U256,
    }
}

abi_struct! {
    /// Outputs of `latestDisaster`.
    pub struct LatestDisaster {
        pub reason: String,
        pub id: U256,
    }
}

caller_methods! {
    PropertyContract;
    fn upgrade_interface_version = "UPGRADE_INTERFACE_VERSION"() -> String;
    fn all_disasters = "allDisasters"(index: U256) -> Disaster;
    fn all_properties = "allProperties"(index: U256) -> Property;
    fn all_properties_details = "allPropertiesDetails"(index: U256) -> PropertyDetails;
    fn allowance = "allowance"(owner: Address, spender: Address, id: U256) -> U256;
    fn asset_name = "assetName"(id: U256) -> String;
    fn asset_symbol = "assetSymbol"(id: U256) -> String;
    fn asset_total_supply = "assetTotalSupply"(id: U256) -> U256;
    fn balance_of = "balanceOf"(account: Address, id: U256) -> U256;
    fn balance_of_batch = "balanceOfBatch"(accounts: Vec<Address>, ids: Vec<U256>) -> Vec<U256>;
    /// Number of registered properties.
    fn count = "count"() -> U256;
    fn get_all_asset_ids = "getAllAssetIds"() -> Vec<U256>;
    fn get_buy_price = "getBuyPrice"(id: U256) -> U256;
    fn get_sell_price = "getSellPrice"(id: U256) -> U256;
    fn get_user_asset_ids = "getUserAssetIds"(user: Address) -> Vec<U256>;
    fn is_approved_for_all = "isApprovedForAll"(account: Address, operator: Address) -> bool;
    fn keys = "keys"(index: U256) -> U256;
    fn latest_disaster = "latestDisaster"() -> LatestDisaster;
    fn latest_disaster_detail = "latestDisasterDetail"() -> Disaster;
    fn name = "name"() -> String;
    fn owned_properties = "ownedProperties"(owner: Address, index: U256) -> U256;
    fn owner = "owner"() -> Address;
    fn proxiable_uuid = "proxiableUUID"() -> B256;
    /// Indices of the properties matching every criterion of `params`.
    fn search_property = "searchProperty"(params: SearchParams) -> Vec<U256>;
    fn supply = "supply"(id: U256) -> U256;
    fn supports_interface = "supportsInterface"(interface_id: FixedBytes<4>) -> bool;
    fn symbol = "symbol"() -> String;
    fn total_buy_amount = "totalBuyAmount"(id: U256) -> U256;
    fn uri = "uri"(id: U256) -> String;
}

transactor_methods! {
    PropertyContract;
    /// First registration step.
    fn add_property_details = "addPropertyDetails"(symbol: String, details: Property);
    /// Second registration step, filling the record at the index of the first.
    fn add_property_other_details = "addPropertyOtherDetails"(details: PropertyDetails);
    fn approve = "approve"(spender: Address, id: U256, current_value: U256, value: U256);
    fn archive_property = "archiveProperty"(token_id: U256);
    /// Payable.
    fn buy = "buy"(id: U256);
    fn disaster_management = "disasterManagement"(id: U256, reason: String, new_price: U256);
    fn initialize = "initialize"(govt: Address);
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
    fn update_property = "updateProperty"(update: PropertyUpdate);
    fn update_property_details = "updatePropertyDetails"(update: PropertyDetailsUpdate);
    fn upgrade_to_and_call = "upgradeToAndCall"(new_implementation: Address, data: Bytes);
    fn withdraw = "withdraw"();
}

abi_event! {
    pub struct Approval = "Approval" {
        pub owner: Address,
        pub spender: Address,
        pub id: U256,
        pub old_value: U256,
        pub value: U256,
    }
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
    /// The `Disaster` event.
    pub struct DisasterEvent = "Disaster" {
        pub id: U256,
        pub reason: String,
        pub new_price: U256,
        pub current_sell_price: U256,
        pub current_buy_price: U256,
        pub after_sell_price: U256,
        pub after_buy_price: U256,
        pub disaster_time: U256,
        pub old_base_price: U256,
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
    pub struct PropertyAdd = "PropertyAdd" {
        pub owner: Address,
        pub token_id: U256,
    }
}

abi_event! {
    pub struct PropertyBuySell = "PropertyBuySell" {
        pub user_address: Address,
        pub transaction_type: String,
        pub timestamp: U256,
        pub price: U256,
        pub id: U256,
    }
}

abi_event! {
    pub struct PropertyEdit = "PropertyEdit" {
        pub owner: Address,
        pub token_id: U256,
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
    PropertyContract;
    Approval => approval(owner: Address, spender: Address, id: U256);
    ApprovalForAll => approval_for_all(account: Address, operator: Address);
    AssetBought => asset_bought(asset_id: U256, buyer: Address);
    AssetIssued => asset_issued(asset_id: U256, to: Address);
    AssetSold => asset_sold(asset_id: U256, seller: Address);
    DisasterEvent => disaster(id: U256);
    Initialized => initialized();
    OwnershipTransferred => ownership_transferred(previous_owner: Address, new_owner: Address);
    PropertyAdd => property_add(owner: Address, token_id: U256);
    PropertyBuySell => property_buy_sell(user_address: Address, id: U256);
    PropertyEdit => property_edit(owner: Address, token_id: U256);
    TransferBatch => transfer_batch(operator: Address, from: Address, to: Address);
    TransferSingle => transfer_single(operator: Address, from: Address, to: Address);
    Uri => uri(id: U256);
    Upgraded => upgraded(implementation: Address);
}
