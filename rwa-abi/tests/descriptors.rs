// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Cross-checks descriptor parsing and the codec against alloy's implementations,
//! using the descriptors shipped with the contract bindings.

use alloy::{
    dyn_abi::{DynSolType, DynSolValue},
    json_abi::JsonAbi,
};
use pretty_assertions::assert_eq;
use rwa_abi::{codec, Abi, Address, Value, U256};

const DESCRIPTORS: [(&str, &str); 3] = [
    (
        "AssetManagerRWA",
        include_str!("../../rwa-contracts/abi/AssetManagerRWA.json"),
    ),
    ("Bond", include_str!("../../rwa-contracts/abi/Bond.json")),
    (
        "Property",
        include_str!("../../rwa-contracts/abi/Property.json"),
    ),
];

#[test]
fn selectors_and_topics_match_alloy() {
    for (name, json) in DESCRIPTORS {
        let ours = Abi::parse(json).unwrap();
        let theirs: JsonAbi = serde_json::from_str(json).unwrap();

        assert_eq!(ours.functions().count(), theirs.functions().count(), "{name}");
        for function in theirs.functions() {
            let matched = ours
                .function_by_selector(function.selector().0)
                .unwrap_or_else(|| panic!("{name}: no function for {}", function.signature()));
            assert_eq!(matched.signature, function.signature(), "{name}");
            assert_eq!(matched.outputs.len(), function.outputs.len(), "{name}");
        }

        assert_eq!(ours.events().count(), theirs.events().count(), "{name}");
        for event in theirs.events() {
            let matched = ours.event_by_topic(&event.selector()).unwrap();
            assert_eq!(matched.signature, event.signature(), "{name}");
        }

        for error in theirs.errors() {
            let matched = ours.error_by_selector(error.selector().0).unwrap();
            assert_eq!(matched.signature, error.signature(), "{name}");
        }
    }
}

#[test]
fn parsing_is_deterministic() {
    for (_, json) in DESCRIPTORS {
        assert_eq!(Abi::parse(json).unwrap(), Abi::parse(json).unwrap());
    }
}

#[test]
fn parameter_types_match_alloy() {
    for (_, json) in DESCRIPTORS {
        let abi = Abi::parse(json).unwrap();
        for function in abi.functions() {
            for ty in function.input_types().iter().chain(&function.output_types()) {
                let parsed = DynSolType::parse(&ty.canonical()).unwrap();
                assert_eq!(parsed.sol_type_name(), ty.canonical());
                assert_eq!(parsed.is_dynamic(), ty.is_dynamic(), "{ty}");
            }
        }
    }
}

#[test]
fn property_record_encoding_matches_alloy() {
    let abi = Abi::parse(DESCRIPTORS[2].1).unwrap();
    let add = abi.function("addPropertyDetails").unwrap();
    assert_eq!(add.inputs.len(), 2);

    let strings = [
        "Harbour View",
        "residential",
        "apartment",
        "Sydney",
        "ipfs://doc",
        "AU",
        "new",
    ];
    let mut ours: Vec<Value> = strings.iter().map(|s| Value::from(*s)).collect();
    ours.extend([Value::uint(120), Value::uint(450_000), Value::uint(100)]);

    let mut theirs: Vec<DynSolValue> = strings
        .iter()
        .map(|s| DynSolValue::String(s.to_string()))
        .collect();
    theirs.extend(
        [120u64, 450_000, 100].map(|n| DynSolValue::Uint(U256::from(n), 256)),
    );

    let args = vec!["HVW".into(), Value::Tuple(ours)];
    let calldata = add.encode_input(&args).unwrap();
    let expected = DynSolValue::Tuple(vec![
        DynSolValue::String("HVW".into()),
        DynSolValue::Tuple(theirs),
    ])
    .abi_encode_params();
    assert_eq!(calldata[4..], expected[..]);
    assert_eq!(add.decode_input(&calldata).unwrap(), args);
}

#[test]
fn portfolio_outputs_match_alloy() {
    let abi = Abi::parse(DESCRIPTORS[0].1).unwrap();
    let get_portfolio = abi.function("getPortfolio").unwrap();
    let outputs = get_portfolio.output_types();
    let canonical: Vec<String> = outputs.iter().map(|t| t.canonical()).collect();
    assert_eq!(
        canonical,
        [
            "uint256[]",
            "uint256[]",
            "uint8",
            "uint256",
            "uint256",
            "uint8",
            "(string,uint256)[]"
        ]
    );

    let theirs = DynSolValue::Tuple(vec![
        DynSolValue::Array(vec![DynSolValue::Uint(U256::from(1), 256)]),
        DynSolValue::Array(vec![DynSolValue::Uint(U256::from(10), 256)]),
        DynSolValue::Uint(U256::from(2), 8),
        DynSolValue::Uint(U256::from(1000), 256),
        DynSolValue::Uint(U256::from(1_700_000_000u64), 256),
        DynSolValue::Uint(U256::from(1), 8),
        DynSolValue::Array(vec![DynSolValue::Tuple(vec![
            DynSolValue::String("bonds".into()),
            DynSolValue::Uint(U256::from(1000), 256),
        ])]),
    ]);
    let data = theirs.abi_encode_params();
    let values = get_portfolio.decode_output(&data).unwrap();
    assert_eq!(values[2], Value::Uint(U256::from(2), 8));
    assert_eq!(
        values[6],
        Value::Array(vec![Value::Tuple(vec!["bonds".into(), Value::uint(1000)])])
    );
    assert_eq!(get_portfolio.encode_output(&values).unwrap(), data);
}

#[test]
fn event_logs_round_trip_through_topics() {
    let abi = Abi::parse(DESCRIPTORS[1].1).unwrap();
    let bought = abi.event("AssetBought").unwrap();
    let buyer = Address::repeat_byte(0xbe);
    let values = vec![
        Value::uint(3),
        buyer.into(),
        Value::uint(5),
        Value::uint(100),
        "Treasury".into(),
        Value::uint(1_700_000_000),
    ];
    let (topics, data) = bought.encode_log(&values).unwrap();
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[2], buyer.into_word());
    assert_eq!(bought.decode_log(&topics, &data).unwrap(), values);
    assert_eq!(
        codec::decode(&[rwa_abi::ParamType::Uint(256)], &data[..32]).unwrap(),
        vec![Value::uint(5)]
    );
}
