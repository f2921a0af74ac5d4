// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory form of a JSON ABI descriptor.

use crate::{codec, Error, ParamType, Result, Value};
use alloy_primitives::{keccak256, B256};
use serde::Deserialize;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// One named parameter of a function, event or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
    /// Named tuple components, kept for consumers; signatures ignore them.
    pub components: Vec<Param>,
    pub internal_type: Option<String>,
    pub indexed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "pure" => Self::Pure,
            "view" => Self::View,
            "nonpayable" => Self::NonPayable,
            "payable" => Self::Payable,
            _ => return None,
        })
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pure => "pure",
            Self::View => "view",
            Self::NonPayable => "nonpayable",
            Self::Payable => "payable",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub inputs: Vec<Param>,
    pub state_mutability: StateMutability,
}

impl Constructor {
    /// Encodes constructor arguments, to be appended to creation bytecode.
    pub fn encode_input(&self, values: &[Value]) -> Result<Vec<u8>> {
        codec::encode(&types_of(&self.inputs), values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    pub state_mutability: StateMutability,
    pub signature: String,
    pub selector: [u8; 4],
}

impl Function {
    pub fn input_types(&self) -> Vec<ParamType> {
        types_of(&self.inputs)
    }

    pub fn output_types(&self) -> Vec<ParamType> {
        types_of(&self.outputs)
    }

    /// True for `view` and `pure` functions.
    pub fn is_constant(&self) -> bool {
        matches!(
            self.state_mutability,
            StateMutability::View | StateMutability::Pure
        )
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }

    /// Builds calldata: the selector followed by the encoded arguments.
    pub fn encode_input(&self, values: &[Value]) -> Result<Vec<u8>> {
        let mut data = self.selector.to_vec();
        data.extend(codec::encode(&self.input_types(), values)?);
        Ok(data)
    }

    /// Decodes calldata previously built by [`Function::encode_input`].
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Value>> {
        let args = strip_selector(self.selector, data)?;
        codec::decode(&self.input_types(), args)
    }

    pub fn encode_output(&self, values: &[Value]) -> Result<Vec<u8>> {
        codec::encode(&self.output_types(), values)
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Value>> {
        codec::decode(&self.output_types(), data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<Param>,
    pub anonymous: bool,
    pub signature: String,
    pub topic: B256,
}

impl Event {
    pub fn indexed(&self) -> impl Iterator<Item = &Param> {
        self.inputs.iter().filter(|p| p.indexed)
    }

    fn data_types(&self) -> Vec<ParamType> {
        self.inputs
            .iter()
            .filter(|p| !p.indexed)
            .map(|p| p.ty.clone())
            .collect()
    }

    /// Number of topics a matching log carries.
    pub fn topic_count(&self) -> usize {
        self.indexed().count() + usize::from(!self.anonymous)
    }

    /// Decodes a log into values in declaration order.
    ///
    /// Indexed fields of non-value types come back as their 32-byte hash.
    pub fn decode_log(&self, topics: &[B256], data: &[u8]) -> Result<Vec<Value>> {
        if topics.len() != self.topic_count() {
            return Err(Error::TopicCount {
                event: self.name.clone(),
                expected: self.topic_count(),
                got: topics.len(),
            });
        }
        let mut topics = topics.iter();
        if !self.anonymous && topics.next() != Some(&self.topic) {
            return Err(Error::EventSignatureMismatch {
                event: self.name.clone(),
            });
        }

        let mut data = codec::decode(&self.data_types(), data)?.into_iter();
        let mut values = Vec::with_capacity(self.inputs.len());
        for param in &self.inputs {
            let value = if param.indexed {
                let topic = topics.next().ok_or(Error::TopicCount {
                    event: self.name.clone(),
                    expected: self.topic_count(),
                    got: 0,
                })?;
                codec::decode_topic(&param.ty, topic)
            } else {
                data.next().ok_or(Error::ShortRead { offset: 0 })
            };
            values.push(value.map_err(|e| Error::in_field(&param.name, e))?);
        }
        Ok(values)
    }

    /// Synthesizes the topics and data of a log emitting `values`.
    pub fn encode_log(&self, values: &[Value]) -> Result<(Vec<B256>, Vec<u8>)> {
        if values.len() != self.inputs.len() {
            return Err(Error::Arity {
                expected: self.inputs.len(),
                got: values.len(),
            });
        }
        let mut topics = vec![];
        if !self.anonymous {
            topics.push(self.topic);
        }
        let mut data = vec![];
        for (param, value) in self.inputs.iter().zip(values) {
            if param.indexed {
                topics.push(codec::encode_topic(&param.ty, value)?);
            } else {
                data.push(value.clone());
            }
        }
        let data = codec::encode(&self.data_types(), &data)?;
        Ok((topics, data))
    }

    /// Builds topic filter sets: topic0 followed by one set per indexed field.
    ///
    /// An empty set matches anything. Trailing wildcards are dropped.
    pub fn topic_filter(&self, indexed: &[Vec<Value>]) -> Result<Vec<Vec<B256>>> {
        let fields: Vec<&Param> = self.indexed().collect();
        if indexed.len() > fields.len() {
            return Err(Error::Arity {
                expected: fields.len(),
                got: indexed.len(),
            });
        }
        let mut topics = vec![];
        if !self.anonymous {
            topics.push(vec![self.topic]);
        }
        for (param, rule) in fields.iter().zip(indexed) {
            let set = rule
                .iter()
                .map(|value| codec::encode_topic(&param.ty, value))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| Error::in_field(&param.name, e))?;
            topics.push(set);
        }
        while topics.last().is_some_and(Vec::is_empty) {
            topics.pop();
        }
        Ok(topics)
    }
}

/// A custom error declared by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomError {
    pub name: String,
    pub inputs: Vec<Param>,
    pub signature: String,
    pub selector: [u8; 4],
}

impl CustomError {
    pub fn encode(&self, values: &[Value]) -> Result<Vec<u8>> {
        let mut data = self.selector.to_vec();
        data.extend(codec::encode(&types_of(&self.inputs), values)?);
        Ok(data)
    }

    pub fn decode(&self, data: &[u8]) -> Result<Vec<Value>> {
        let args = strip_selector(self.selector, data)?;
        codec::decode(&types_of(&self.inputs), args)
    }
}

/// A parsed ABI. Overloads are kept in declaration order under their shared name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abi {
    pub constructor: Option<Constructor>,
    pub functions: BTreeMap<String, Vec<Function>>,
    pub events: BTreeMap<String, Vec<Event>>,
    pub errors: BTreeMap<String, Vec<CustomError>>,
    pub fallback: Option<StateMutability>,
    pub receive: bool,
}

impl Abi {
    pub fn parse(json: &str) -> Result<Self> {
        let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut abi = Self::default();
        for (i, item) in items.into_iter().enumerate() {
            let path = format!("[{i}]");
            let raw: RawItem = serde_json::from_value(item).map_err(|e| Error::InvalidAbi {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            abi.insert(raw, &path)?;
        }
        Ok(abi)
    }

    /// First declared function with this name.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::UnknownFunction(name.into()))
    }

    pub fn function_by_selector(&self, selector: [u8; 4]) -> Option<&Function> {
        self.functions().find(|f| f.selector == selector)
    }

    pub fn event(&self, name: &str) -> Result<&Event> {
        self.events
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::UnknownEvent(name.into()))
    }

    pub fn event_by_topic(&self, topic: &B256) -> Option<&Event> {
        self.events().find(|e| !e.anonymous && e.topic == *topic)
    }

    pub fn error(&self, name: &str) -> Result<&CustomError> {
        self.errors
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::UnknownError(name.into()))
    }

    pub fn error_by_selector(&self, selector: [u8; 4]) -> Option<&CustomError> {
        self.errors().find(|e| e.selector == selector)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values().flatten()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values().flatten()
    }

    pub fn errors(&self) -> impl Iterator<Item = &CustomError> {
        self.errors.values().flatten()
    }

    fn insert(&mut self, raw: RawItem, path: &str) -> Result<()> {
        let inputs = params(&raw.inputs, &format!("{path}.inputs"))?;
        match raw.kind.as_str() {
            "function" => {
                if raw.name.is_empty() {
                    return Err(Error::InvalidAbi {
                        path: path.into(),
                        reason: "function without a name".into(),
                    });
                }
                let outputs = params(&raw.outputs, &format!("{path}.outputs"))?;
                let signature = signature(&raw.name, &inputs);
                let function = Function {
                    selector: selector(&signature),
                    signature,
                    state_mutability: raw.mutability(path)?,
                    name: raw.name.clone(),
                    inputs,
                    outputs,
                };
                self.functions.entry(raw.name).or_default().push(function);
            }
            "event" => {
                let signature = signature(&raw.name, &inputs);
                let event = Event {
                    topic: keccak256(signature.as_bytes()),
                    signature,
                    anonymous: raw.anonymous,
                    name: raw.name.clone(),
                    inputs,
                };
                self.events.entry(raw.name).or_default().push(event);
            }
            "error" => {
                let signature = signature(&raw.name, &inputs);
                let error = CustomError {
                    selector: selector(&signature),
                    signature,
                    name: raw.name.clone(),
                    inputs,
                };
                self.errors.entry(raw.name).or_default().push(error);
            }
            "constructor" => {
                self.constructor = Some(Constructor {
                    state_mutability: raw.mutability(path)?,
                    inputs,
                });
            }
            "fallback" => self.fallback = Some(raw.mutability(path)?),
            "receive" => self.receive = true,
            other => {
                return Err(Error::InvalidAbi {
                    path: format!("{path}.type"),
                    reason: format!("unknown item type `{other}`"),
                })
            }
        }
        Ok(())
    }
}

impl FromStr for Abi {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self> {
        Self::parse(json)
    }
}

/// Canonical `name(type1,type2,…)` signature.
pub fn signature(name: &str, params: &[Param]) -> String {
    let types: Vec<String> = params.iter().map(|p| p.ty.canonical()).collect();
    format!("{name}({})", types.join(","))
}

/// First four bytes of the Keccak-256 hash of `signature`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

fn strip_selector(expected: [u8; 4], data: &[u8]) -> Result<&[u8]> {
    let (head, rest) = data
        .split_first_chunk::<4>()
        .ok_or(Error::ShortRead { offset: 0 })?;
    if *head != expected {
        return Err(Error::SelectorMismatch {
            expected,
            got: *head,
        });
    }
    Ok(rest)
}

fn types_of(params: &[Param]) -> Vec<ParamType> {
    params.iter().map(|p| p.ty.clone()).collect()
}

fn params(raw: &[RawParam], path: &str) -> Result<Vec<Param>> {
    raw.iter()
        .enumerate()
        .map(|(i, p)| p.build(&format!("{path}[{i}]")))
        .collect()
}

fn default_kind() -> String {
    "function".into()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<RawParam>,
    #[serde(default)]
    outputs: Vec<RawParam>,
    state_mutability: Option<String>,
    #[serde(default)]
    anonymous: bool,
    // Pre-0.5 descriptors
    payable: Option<bool>,
    constant: Option<bool>,
}

impl RawItem {
    fn mutability(&self, path: &str) -> Result<StateMutability> {
        if let Some(s) = &self.state_mutability {
            return StateMutability::parse(s).ok_or_else(|| Error::InvalidAbi {
                path: format!("{path}.stateMutability"),
                reason: format!("unknown state mutability `{s}`"),
            });
        }
        Ok(match (self.constant, self.payable) {
            (Some(true), _) => StateMutability::View,
            (_, Some(true)) => StateMutability::Payable,
            _ => StateMutability::NonPayable,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    components: Vec<RawParam>,
    #[serde(default)]
    indexed: bool,
    internal_type: Option<String>,
}

impl RawParam {
    fn build(&self, path: &str) -> Result<Param> {
        let components = params(&self.components, &format!("{path}.components"))?;
        let parts = components.iter().map(|c| c.ty.clone()).collect();
        let ty = ParamType::from_abi(&self.ty, parts).ok_or_else(|| Error::UnknownType {
            path: path.into(),
            ty: self.ty.clone(),
        })?;
        Ok(Param {
            name: self.name.clone(),
            ty,
            components,
            internal_type: self.internal_type.clone(),
            indexed: self.indexed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"[
        {"type":"constructor","inputs":[{"name":"initialName","type":"string"}],"stateMutability":"nonpayable"},
        {"type":"function","name":"getAsset","inputs":[{"name":"_assetId","type":"uint256"}],
         "outputs":[{"name":"","type":"tuple","components":[
            {"name":"name","type":"string"},{"name":"assetId","type":"uint256"},
            {"name":"contractAddress","type":"address"},{"name":"category","type":"string"}]}],
         "stateMutability":"view"},
        {"type":"function","name":"buy","inputs":[{"name":"id","type":"uint256"},{"name":"amount","type":"uint256"}],"outputs":[],"stateMutability":"payable"},
        {"type":"function","name":"buy","inputs":[{"name":"id","type":"uint256"}],"outputs":[],"stateMutability":"payable"},
        {"type":"event","name":"AssetRegistered","anonymous":false,"inputs":[
            {"name":"assetId","type":"uint256","indexed":true},
            {"name":"name","type":"string","indexed":false},
            {"name":"contractAddress","type":"address","indexed":false}]},
        {"type":"event","name":"Tagged","anonymous":false,"inputs":[
            {"name":"tag","type":"string","indexed":true},
            {"name":"who","type":"address","indexed":true}]},
        {"type":"error","name":"OwnableUnauthorizedAccount","inputs":[{"name":"account","type":"address"}]}
    ]"#;

    #[test]
    fn parses_items() {
        let abi = Abi::parse(SAMPLE).unwrap();
        let get_asset = abi.function("getAsset").unwrap();
        assert_eq!(get_asset.signature, "getAsset(uint256)");
        assert!(get_asset.is_constant());
        assert_eq!(
            get_asset.output_types()[0].canonical(),
            "(string,uint256,address,string)"
        );
        assert_eq!(get_asset.outputs[0].components[2].name, "contractAddress");
        assert_eq!(abi.constructor.as_ref().unwrap().inputs.len(), 1);
        assert_eq!(
            abi.error("OwnableUnauthorizedAccount").unwrap().signature,
            "OwnableUnauthorizedAccount(address)"
        );
        assert_eq!(Abi::parse(SAMPLE).unwrap(), abi);
    }

    #[test]
    fn overloads_stay_ordered() {
        let abi = Abi::parse(SAMPLE).unwrap();
        assert_eq!(abi.function("buy").unwrap().signature, "buy(uint256,uint256)");
        let single = selector("buy(uint256)");
        assert_eq!(abi.function_by_selector(single).unwrap().inputs.len(), 1);
        assert!(abi.function("sell").is_err());
    }

    #[test]
    fn path_tracked_failures() {
        let err = Abi::parse(r#"[{"type":"function","name":"f","inputs":[{"name":"a","type":"uint7"}]}]"#)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownType {
                path: "[0].inputs[0]".into(),
                ty: "uint7".into()
            }
        );
        let err = Abi::parse(r#"[{"type":"event","name":"E","inputs":[{"name":"t","type":"tuple","components":[{"name":"x","type":"fixed"}]}]}]"#)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownType {
                path: "[0].inputs[0].components[0]".into(),
                ty: "fixed".into()
            }
        );
        assert!(matches!(Abi::parse("[{"), Err(Error::Json(_))));
        assert!(matches!(
            Abi::parse(r#"[{"type":"modifier","name":"m"}]"#),
            Err(Error::InvalidAbi { .. })
        ));
        assert!(matches!(
            Abi::parse(r#"[{"type":"function","name":"f","inputs":[{"name":"a"}]}]"#),
            Err(Error::InvalidAbi { path, .. }) if path == "[0]"
        ));
    }

    #[test]
    fn calldata_round_trip() {
        let abi = Abi::parse(SAMPLE).unwrap();
        let buy = abi.function("buy").unwrap();
        let args = vec![Value::uint(3), Value::uint(10)];
        let data = buy.encode_input(&args).unwrap();
        assert_eq!(data[..4], buy.selector);
        assert_eq!(buy.decode_input(&data).unwrap(), args);

        let other = abi.function_by_selector(selector("buy(uint256)")).unwrap();
        assert!(matches!(
            other.decode_input(&data),
            Err(Error::SelectorMismatch { .. })
        ));
        assert_eq!(
            buy.decode_input(&data[..3]).unwrap_err(),
            Error::ShortRead { offset: 0 }
        );
    }

    #[test]
    fn log_round_trip() {
        let abi = Abi::parse(SAMPLE).unwrap();
        let event = abi.event("AssetRegistered").unwrap();
        assert_eq!(
            event.topic,
            keccak256("AssetRegistered(uint256,string,address)")
        );
        let values = vec![
            Value::uint(7),
            "ACME Tower".into(),
            address!("000000000000000000000000000000000000dEaD").into(),
        ];
        let (topics, data) = event.encode_log(&values).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[1], B256::from(U256::from(7).to_be_bytes::<32>()));
        assert_eq!(event.decode_log(&topics, &data).unwrap(), values);

        let err = event.decode_log(&topics[..1], &data).unwrap_err();
        assert_eq!(
            err,
            Error::TopicCount {
                event: "AssetRegistered".into(),
                expected: 2,
                got: 1
            }
        );
        let mut wrong = topics.clone();
        wrong[0] = B256::ZERO;
        assert!(matches!(
            event.decode_log(&wrong, &data),
            Err(Error::EventSignatureMismatch { .. })
        ));
        assert!(matches!(
            event.decode_log(&topics, &data[..64]).unwrap_err().root(),
            Error::ShortRead { .. }
        ));
    }

    #[test]
    fn hashed_indexed_fields() {
        let abi = Abi::parse(SAMPLE).unwrap();
        let event = abi.event("Tagged").unwrap();
        let who = address!("000000000000000000000000000000000000bEEF");
        let (topics, data) = event
            .encode_log(&["real-estate".into(), who.into()])
            .unwrap();
        assert!(data.is_empty());
        assert_eq!(
            event.decode_log(&topics, &data).unwrap(),
            vec![Value::FixedBytes(keccak256("real-estate"), 32), who.into()]
        );
    }

    #[test]
    fn topic_filters() {
        let abi = Abi::parse(SAMPLE).unwrap();
        let event = abi.event("Tagged").unwrap();
        let who = address!("000000000000000000000000000000000000bEEF");
        let filter = event.topic_filter(&[vec![], vec![who.into()]]).unwrap();
        assert_eq!(
            filter,
            vec![vec![event.topic], vec![], vec![who.into_word()]]
        );
        assert_eq!(
            event.topic_filter(&[vec![], vec![]]).unwrap(),
            vec![vec![event.topic]]
        );
        assert!(matches!(
            event.topic_filter(&[vec![], vec![], vec![]]),
            Err(Error::Arity { .. })
        ));
    }
}
