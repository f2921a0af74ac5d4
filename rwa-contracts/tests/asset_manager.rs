// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy_primitives::{address, Address, B256, U256};
use eyre::Result;
use pretty_assertions::assert_eq;
use rwa_abi::{codec, event_topic, revert::ERROR_SELECTOR, AbiValue, ParamType, RevertReason, Value};
use rwa_bind::{CallOpts, Error, FilterOpts, TransactOpts, TxSigner};
use rwa_contracts::asset_manager_rwa::{AssetRegistered, CategoryValue, Portfolio, RwaManager};
use rwa_test::{constants::DEFAULT_CONTRACT_ADDRESS, TestBackend, TestSigner};
use std::sync::Arc;

const DEAD: Address = address!("000000000000000000000000000000000000dEaD");

fn setup() -> Result<(Arc<TestBackend>, RwaManager)> {
    let backend = Arc::new(TestBackend::new());
    backend.deploy(DEFAULT_CONTRACT_ADDRESS);
    let manager = RwaManager::new(DEFAULT_CONTRACT_ADDRESS, backend.clone())?;
    Ok((backend, manager))
}

fn opts() -> TransactOpts {
    TransactOpts::new(Arc::new(TestSigner::default()))
}

/// Splits a record into the output list of a multi-return function.
fn outputs(record: &impl AbiValue) -> Vec<Value> {
    match record.to_value() {
        Value::Tuple(fields) => fields,
        other => vec![other],
    }
}

#[tokio::test]
async fn register_asset() -> Result<()> {
    let (backend, manager) = setup()?;
    let tx = manager
        .transactor
        .register_asset(&opts(), "ACME Tower".into(), DEAD, "real-estate".into())
        .await?;

    let abi = RwaManager::abi()?;
    let register = abi.function("registerAsset")?;
    assert_eq!(tx.tx.to, Some(DEFAULT_CONTRACT_ADDRESS));
    assert_eq!(
        register.decode_input(&tx.tx.data)?,
        vec![Value::from("ACME Tower"), DEAD.into(), "real-estate".into()]
    );
    assert_eq!(backend.sent_transactions(), vec![tx]);

    // inclusion of the transaction
    let registered = abi.event("AssetRegistered")?;
    let log = backend.emit_event(
        DEFAULT_CONTRACT_ADDRESS,
        registered,
        &[Value::uint(1), "ACME Tower".into(), DEAD.into()],
    )?;
    assert_eq!(log.topics[0], event_topic!("AssetRegistered(uint256,string,address)"));
    assert_eq!(log.topics[1], B256::from(U256::from(1).to_be_bytes::<32>()));
    assert_eq!(
        log.data.to_vec(),
        codec::encode(
            &[ParamType::String, ParamType::Address],
            &["ACME Tower".into(), DEAD.into()]
        )?
    );

    let mut events = manager
        .filterer
        .filter_asset_registered(&FilterOpts::default(), &[U256::from(1)])
        .await?;
    let event: AssetRegistered = events.next().await?.expect("one event");
    assert_eq!(event.asset_id, U256::from(1));
    assert_eq!(event.name, "ACME Tower");
    assert_eq!(event.contract_address, DEAD);
    assert_eq!(event.raw, log);
    assert!(events.next().await?.is_none());
    assert!(events.error().is_none());
    Ok(())
}

#[tokio::test]
async fn empty_portfolio() -> Result<()> {
    let (backend, manager) = setup()?;
    let user = address!("0000000000000000000000000000000000000001");
    let abi = RwaManager::abi()?;
    backend.mock_function(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("getPortfolio")?,
        &[user.into()],
        &outputs(&Portfolio::default()),
    )?;

    let portfolio = manager.caller.get_portfolio(&CallOpts::default(), user).await?;
    assert_eq!(
        portfolio,
        Portfolio {
            asset_ids: vec![],
            quantities: vec![],
            user_risk_profile: 0,
            current_value: U256::ZERO,
            last_updated: U256::ZERO,
            risk_analysis: 0,
            category_values: vec![],
        }
    );
    Ok(())
}

#[tokio::test]
async fn refresh_with_misaligned_arrays() -> Result<()> {
    let (backend, manager) = setup()?;
    let user = Address::repeat_byte(0x11);
    let ids = vec![U256::from(1), U256::from(2)];
    let quantities = vec![U256::from(100)];
    let args = [
        user.to_value(),
        ids.to_value(),
        quantities.to_value(),
        Value::uint(1000),
        2u8.to_value(),
        Vec::<CategoryValue>::new().to_value(),
    ];

    let mut revert = ERROR_SELECTOR.to_vec();
    revert.extend(codec::encode(&[ParamType::String], &["length mismatch".into()])?);
    let abi = RwaManager::abi()?;
    backend.mock_revert(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("refreshPortfolio")?,
        &args,
        revert.clone(),
    )?;

    let err = manager
        .transactor
        .refresh_portfolio(&opts(), user, ids, quantities, U256::from(1000), 2, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.revert_data(), Some(&revert[..]));
    assert_eq!(
        manager.raw().revert_reason(&revert),
        RevertReason::Message("length mismatch".into())
    );
    assert!(backend.sent_transactions().is_empty());
    Ok(())
}

#[tokio::test]
async fn portfolio_records_decode() -> Result<()> {
    let (backend, manager) = setup()?;
    let user = Address::repeat_byte(0x22);
    let portfolio = Portfolio {
        asset_ids: vec![U256::from(3), U256::from(9)],
        quantities: vec![U256::from(10), U256::from(20)],
        user_risk_profile: 2,
        current_value: U256::from(5_000),
        last_updated: U256::from(1_700_000_000u64),
        risk_analysis: 1,
        category_values: vec![CategoryValue {
            category: "real-estate".into(),
            total_value: U256::from(5_000),
        }],
    };
    let abi = RwaManager::abi()?;
    backend.mock_function(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("getPortfolio")?,
        &[user.into()],
        &outputs(&portfolio),
    )?;
    backend.mock_function(
        DEFAULT_CONTRACT_ADDRESS,
        abi.function("managerName")?,
        &[],
        &["Acme Holdings".into()],
    )?;

    let session = manager.caller.session(CallOpts::default().with_from(user));
    assert_eq!(session.get_portfolio(user).await?, portfolio);
    assert_eq!(session.manager_name().await?, "Acme Holdings");
    assert!(backend.calls().iter().all(|call| call.from == Some(user)));
    Ok(())
}

#[tokio::test]
async fn unanswered_calls_are_not_found() -> Result<()> {
    let (_backend, manager) = setup()?;
    let err = manager.caller.name(&CallOpts::default()).await.unwrap_err();
    assert_eq!(err, Error::NotFound { method: "name".into() });
    Ok(())
}

#[tokio::test]
async fn transactor_session_presets_options() -> Result<()> {
    let (backend, manager) = setup()?;
    backend.set_nonce(TestSigner::default().address(), 4);
    let session = manager
        .transactor
        .session(opts().with_nonce(4).with_gas_limit(300_000).with_gas_price(7));

    let tx = session.create_portfolio(3).await?;
    assert_eq!(tx.tx.nonce, 4);
    assert_eq!(tx.tx.gas_limit, 300_000);
    assert_eq!(tx.tx.gas_price, 7);
    assert_eq!(
        RwaManager::abi()?.function("createPortfolio")?.decode_input(&tx.tx.data)?,
        vec![3u8.to_value()]
    );
    // nothing left to estimate or look up
    assert!(backend.calls().is_empty());
    Ok(())
}
