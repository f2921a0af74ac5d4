// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy_primitives::{Address, U256};
use eyre::Result;
use pretty_assertions::assert_eq;
use rwa_abi::{AbiValue, Value};
use rwa_bind::{CallOpts, FilterOpts, TransactOpts};
use rwa_contracts::property::{
    DisasterEvent, Property, PropertyBuySell, PropertyContract, PropertyDetails,
    PropertyDetailsUpdate, SearchParams,
};
use rwa_test::{constants::DEFAULT_CONTRACT_ADDRESS, TestBackend, TestSigner};
use std::sync::Arc;

fn setup() -> Result<(Arc<TestBackend>, PropertyContract)> {
    let backend = Arc::new(TestBackend::new());
    backend.deploy(DEFAULT_CONTRACT_ADDRESS);
    let property = PropertyContract::new(DEFAULT_CONTRACT_ADDRESS, backend.clone())?;
    Ok((backend, property))
}

fn opts() -> TransactOpts {
    TransactOpts::new(Arc::new(TestSigner::default()))
}

fn outputs(record: &impl AbiValue) -> Vec<Value> {
    match record.to_value() {
        Value::Tuple(fields) => fields,
        other => vec![other],
    }
}

fn listing(title: &str, price: u64, lot_size: u64) -> Property {
    Property {
        title: title.into(),
        category: "residential".into(),
        subcategory: "house".into(),
        location: "Sydney".into(),
        document: "ipfs://deed".into(),
        country: "AU".into(),
        condition: "new".into(),
        lot_size: U256::from(lot_size),
        price: U256::from(price),
        number_of_nft: U256::from(100),
    }
}

#[tokio::test]
async fn search_by_bounds() -> Result<()> {
    let (backend, property) = setup()?;
    let abi = PropertyContract::abi()?;
    let params = SearchParams::new("residential", "new", "AU")
        .price_between(U256::from(100_000), U256::from(500_000))
        .area_between(U256::from(50), U256::from(200));

    let matches = vec![U256::from(0), U256::from(2)];
    backend.mock_function(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("searchProperty")?,
        &[params.to_value()],
        &[matches.to_value()],
    )?;
    let listings = [
        listing("Harbour View", 450_000, 120),
        listing("Ridge House", 900_000, 400),
        listing("Garden Flat", 100_000, 50),
    ];
    for (index, record) in listings.iter().enumerate() {
        backend.mock_function(
            DEFAULT_CONTRACT_ADDRESS,
            abi.function("allProperties")?,
            &[Value::uint(index as u64)],
            &outputs(record),
        )?;
    }

    let session = property.caller.session(CallOpts::default());
    let found = session.search_property(params.clone()).await?;
    assert_eq!(found, matches);
    for index in found {
        let record = session.all_properties(index).await?;
        assert_eq!(record.category, params.category);
        assert_eq!(record.condition, params.condition);
        assert_eq!(record.country, params.country);
        assert!(params.price[0] <= record.price && record.price <= params.price[1]);
        assert!(params.area[0] <= record.lot_size && record.lot_size <= params.area[1]);
    }
    Ok(())
}

#[tokio::test]
async fn two_phase_registration() -> Result<()> {
    let (backend, property) = setup()?;
    let details = PropertyDetails {
        image_uri: "ipfs://front".into(),
        neighbourhood: "Surry Hills".into(),
        state: "NSW".into(),
        city: "Sydney".into(),
        description: "Terrace".into(),
        number_of_bhk: U256::from(3),
        interior_size: U256::from(140),
        archived: false,
    };
    let session = property.session(CallOpts::default(), opts());
    let first = session
        .add_property_details("HVW".into(), listing("Harbour View", 450_000, 120))
        .await?;
    let second = session.add_property_other_details(details.clone()).await?;
    assert_eq!((first.tx.nonce, second.tx.nonce), (0, 1));

    let abi = PropertyContract::abi()?;
    assert_eq!(
        abi.function("addPropertyOtherDetails")?.decode_input(&second.tx.data)?,
        vec![details.to_value()]
    );

    let update = PropertyDetailsUpdate {
        index: U256::ZERO,
        interior_size: U256::from(150),
        number_of_bhk: U256::from(4),
        ..Default::default()
    };
    let third = session.update_property_details(update.clone()).await?;
    assert_eq!(
        abi.function("updatePropertyDetails")?.decode_input(&third.tx.data)?,
        vec![update.to_value()]
    );

    backend.mock_function(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("allPropertiesDetails")?,
        &[Value::uint(0)],
        &outputs(&PropertyDetails {
            archived: true,
            ..details
        }),
    )?;
    assert!(session.all_properties_details(U256::ZERO).await?.archived);
    Ok(())
}

#[tokio::test]
async fn disaster_events_report_both_prices() -> Result<()> {
    let (backend, property) = setup()?;
    let tx = property
        .transactor
        .disaster_management(&opts(), U256::from(7), "flood".into(), U256::from(300_000))
        .await?;
    assert_eq!(backend.sent_transactions(), vec![tx]);

    let abi = PropertyContract::abi()?;
    let values: Vec<Value> = std::iter::once(Value::uint(7))
        .chain(std::iter::once("flood".into()))
        .chain([300_000u64, 5, 6, 3, 4, 1_700_000_000, 400_000].map(Value::uint))
        .collect();
    backend.emit_event(DEFAULT_CONTRACT_ADDRESS, abi.event("Disaster")?, &values)?;

    let events: Vec<DisasterEvent> = property
        .filterer
        .filter_disaster(&FilterOpts::default(), &[U256::from(7)])
        .await?
        .collect()
        .await?;
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.reason, "flood");
    assert_eq!(event.new_price, U256::from(300_000));
    assert_eq!((event.current_sell_price, event.after_sell_price), (U256::from(5), U256::from(3)));
    assert_eq!(event.old_base_price, U256::from(400_000));
    Ok(())
}

#[tokio::test]
async fn buy_sell_events_skip_unindexed_fields() -> Result<()> {
    let (backend, property) = setup()?;
    let abi = PropertyContract::abi()?;
    let buyer = Address::repeat_byte(0x0b);
    for (id, kind) in [(1u64, "buy"), (2, "buy"), (1, "sell")] {
        backend.emit_event(
            DEFAULT_CONTRACT_ADDRESS,
            abi.event("PropertyBuySell")?,
            &[buyer.into(), kind.into(), Value::uint(1), Value::uint(10), Value::uint(id)],
        )?;
    }

    let trades: Vec<PropertyBuySell> = property
        .filterer
        .filter_property_buy_sell(&FilterOpts::default(), &[buyer], &[U256::from(1)])
        .await?
        .collect()
        .await?;
    let kinds: Vec<_> = trades.iter().map(|trade| trade.transaction_type.as_str()).collect();
    assert_eq!(kinds, vec!["buy", "sell"]);
    assert!(trades.iter().all(|trade| trade.id == U256::from(1)));

    let parsed = property.filterer.parse_property_buy_sell(trades[0].raw.clone())?;
    assert_eq!(parsed, trades[0]);
    Ok(())
}

#[tokio::test]
async fn approvals_are_exposed_side_by_side() -> Result<()> {
    let (backend, property) = setup()?;
    let abi = PropertyContract::abi()?;
    let owner = TestSigner::default();
    let spender = Address::repeat_byte(0x5e);

    property
        .transactor
        .approve(&opts(), spender, U256::from(1), U256::ZERO, U256::from(10))
        .await?;
    property.transactor.set_approval_for_all(&opts(), spender, true).await?;
    assert_eq!(backend.sent_transactions().len(), 2);

    backend.mock_function(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("allowance")?,
        &[rwa_bind::TxSigner::address(&owner).into(), spender.into(), Value::uint(1)],
        &[Value::uint(10)],
    )?;
    let allowance = property
        .caller
        .allowance(
            &CallOpts::default(),
            rwa_bind::TxSigner::address(&owner),
            spender,
            U256::from(1),
        )
        .await?;
    assert_eq!(allowance, U256::from(10));
    Ok(())
}
