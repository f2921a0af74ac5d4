// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Head/tail encoding of parameter lists and event topics.
//!
//! Encoding follows the canonical layout: static values occupy their slots in the head,
//! dynamic values leave a 32-byte offset in the head and place `length || data` in the tail.
//! Decoding is strict. Truncated input fails with [`Error::ShortRead`] and bytes left over
//! once every head and tail has been consumed fail with [`Error::ExcessData`]. Offsets that
//! make the decoder read more words than the input holds fail with [`Error::InvalidEncoding`],
//! so aliased tails cannot inflate the output.

use crate::{Error, ParamType, Result, Value};
use alloy_primitives::{keccak256, B256, I256, U256};

const WORD: usize = 32;

/// Encodes a parameter list, as found in calldata after the selector or in event data.
pub fn encode(types: &[ParamType], values: &[Value]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::Arity {
            expected: types.len(),
            got: values.len(),
        });
    }
    let types: Vec<&ParamType> = types.iter().collect();
    encode_seq(&types, values)
}

/// Decodes a parameter list produced by [`encode`].
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Value>> {
    let types: Vec<&ParamType> = types.iter().collect();
    let mut decoder = Decoder::new(data);
    let values = decoder.seq(&types, 0)?;
    decoder.finish()?;
    Ok(values)
}

/// Encodes one value as an event topic.
///
/// Value types occupy the topic word directly. Every other type is replaced by the
/// Keccak-256 hash of its in-place encoding, which cannot be reversed.
pub fn encode_topic(ty: &ParamType, value: &Value) -> Result<B256> {
    if ty.is_value_type() {
        return Ok(B256::from(encode_word(ty, value)?));
    }
    let mut packed = vec![];
    encode_in_place(ty, value, true, &mut packed)?;
    Ok(keccak256(packed))
}

/// Decodes an indexed field from its topic.
///
/// Hashed fields come back as the raw 32-byte topic.
pub fn decode_topic(ty: &ParamType, topic: &B256) -> Result<Value> {
    if !ty.is_value_type() {
        return Ok(Value::FixedBytes(*topic, 32));
    }
    let mut decoder = Decoder::new(topic.as_slice());
    decoder.single(ty, 0)
}

fn encode_seq(types: &[&ParamType], values: &[Value]) -> Result<Vec<u8>> {
    let head_len: usize = types.iter().map(|ty| ty.head_words() * WORD).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = vec![];
    for (ty, value) in types.iter().zip(values) {
        let encoded = encode_single(ty, value)?;
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }
    head.extend(tail);
    Ok(head)
}

fn encode_single(ty: &ParamType, value: &Value) -> Result<Vec<u8>> {
    if ty.is_value_type() {
        return Ok(encode_word(ty, value)?.to_vec());
    }
    match (ty, value) {
        (ParamType::Bytes, Value::Bytes(bytes)) => Ok(encode_packed_len(bytes)),
        (ParamType::String, Value::String(s)) => Ok(encode_packed_len(s.as_bytes())),
        (ParamType::Array(inner), Value::Array(items)) => {
            let types = vec![inner.as_ref(); items.len()];
            let mut out = usize_word(items.len()).to_vec();
            out.extend(encode_seq(&types, items)?);
            Ok(out)
        }
        (ParamType::FixedArray(inner, len), Value::FixedArray(items) | Value::Array(items)) => {
            if items.len() != *len {
                return Err(Error::Arity {
                    expected: *len,
                    got: items.len(),
                });
            }
            encode_seq(&vec![inner.as_ref(); *len], items)
        }
        (ParamType::Tuple(types), Value::Tuple(items)) => {
            if items.len() != types.len() {
                return Err(Error::Arity {
                    expected: types.len(),
                    got: items.len(),
                });
            }
            let types: Vec<&ParamType> = types.iter().collect();
            encode_seq(&types, items)
        }
        _ => Err(Error::mismatch(ty, value.kind())),
    }
}

fn encode_word(ty: &ParamType, value: &Value) -> Result<[u8; 32]> {
    let mut word = [0u8; 32];
    match (ty, value) {
        (ParamType::Address, Value::Address(address)) => {
            word[12..].copy_from_slice(address.as_slice());
        }
        (ParamType::Bool, Value::Bool(b)) => word[31] = *b as u8,
        (ParamType::Uint(_), Value::Int(signed, _)) if signed.is_negative() => {
            return Err(Error::NegativeUnsigned { ty: ty.to_string() });
        }
        (ParamType::Uint(bits), Value::Int(signed, _)) => {
            word = checked_uint(signed.into_raw(), *bits, ty)?;
        }
        (ParamType::Uint(bits), Value::Uint(unsigned, _)) => {
            word = checked_uint(*unsigned, *bits, ty)?;
        }
        (ParamType::Int(bits), Value::Int(signed, _)) => {
            word = checked_int(*signed, *bits, ty)?;
        }
        (ParamType::Int(bits), Value::Uint(unsigned, _)) => {
            let signed =
                uint_to_int(*unsigned).ok_or_else(|| Error::Overflow { ty: ty.to_string() })?;
            word = checked_int(signed, *bits, ty)?;
        }
        (ParamType::FixedBytes(size), Value::FixedBytes(bytes, _)) => {
            if bytes[*size..].iter().any(|b| *b != 0) {
                return Err(Error::Overflow { ty: ty.to_string() });
            }
            word = bytes.0;
        }
        _ => return Err(Error::mismatch(ty, value.kind())),
    }
    Ok(word)
}

/// The encoding used to hash complex indexed fields: no offsets, no length prefixes,
/// and dynamic byte strings padded unless they are the topic value itself.
fn encode_in_place(ty: &ParamType, value: &Value, top: bool, out: &mut Vec<u8>) -> Result<()> {
    if ty.is_value_type() {
        out.extend_from_slice(&encode_word(ty, value)?);
        return Ok(());
    }
    match (ty, value) {
        (ParamType::Bytes, Value::Bytes(bytes)) => in_place_bytes(bytes, top, out),
        (ParamType::String, Value::String(s)) => in_place_bytes(s.as_bytes(), top, out),
        (ParamType::Array(inner), Value::Array(items))
        | (ParamType::FixedArray(inner, _), Value::FixedArray(items) | Value::Array(items)) => {
            if let ParamType::FixedArray(_, len) = ty {
                if items.len() != *len {
                    return Err(Error::Arity {
                        expected: *len,
                        got: items.len(),
                    });
                }
            }
            for item in items {
                encode_in_place(inner, item, false, out)?;
            }
        }
        (ParamType::Tuple(types), Value::Tuple(items)) => {
            if types.len() != items.len() {
                return Err(Error::Arity {
                    expected: types.len(),
                    got: items.len(),
                });
            }
            for (ty, item) in types.iter().zip(items) {
                encode_in_place(ty, item, false, out)?;
            }
        }
        _ => return Err(Error::mismatch(ty, value.kind())),
    }
    Ok(())
}

fn in_place_bytes(bytes: &[u8], top: bool, out: &mut Vec<u8>) {
    out.extend_from_slice(bytes);
    if !top {
        out.resize(out.len() + padding(bytes.len()), 0);
    }
}

fn encode_packed_len(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend_from_slice(bytes);
    out.resize(out.len() + padding(bytes.len()), 0);
    out
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

fn usize_word(n: usize) -> [u8; 32] {
    U256::from(n).to_be_bytes()
}

fn checked_uint(value: U256, bits: usize, ty: &ParamType) -> Result<[u8; 32]> {
    if value.bit_len() > bits {
        return Err(Error::Overflow { ty: ty.to_string() });
    }
    Ok(value.to_be_bytes())
}

fn checked_int(value: I256, bits: usize, ty: &ParamType) -> Result<[u8; 32]> {
    if !int_fits(value, bits) {
        return Err(Error::Overflow { ty: ty.to_string() });
    }
    Ok(value.into_raw().to_be_bytes())
}

/// Reinterprets a non-negative magnitude as signed, if it fits.
pub(crate) fn uint_to_int(value: U256) -> Option<I256> {
    (value.bit_len() < 256).then(|| I256::from_raw(value))
}

pub(crate) fn int_fits(value: I256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let max = I256::from_raw((U256::from(1) << (bits - 1)) - U256::from(1));
    let min = -max - I256::ONE;
    value >= min && value <= max
}

struct Decoder<'a> {
    data: &'a [u8],
    furthest: usize,
    /// Words left to read. A canonical encoding reads each of its words exactly once.
    budget: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            furthest: 0,
            budget: data.len().div_ceil(WORD),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.data.len() > self.furthest {
            return Err(Error::ExcessData {
                offset: self.furthest,
                len: self.data.len() - self.furthest,
            });
        }
        Ok(())
    }

    fn take(&mut self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(Error::ShortRead { offset })?;
        self.budget = self
            .budget
            .checked_sub(len.div_ceil(WORD))
            .ok_or_else(|| Error::InvalidEncoding {
                offset,
                reason: "overlapping offsets read past the input size".into(),
            })?;
        self.furthest = self.furthest.max(end);
        Ok(&self.data[offset..end])
    }

    fn word(&mut self, offset: usize) -> Result<&'a [u8]> {
        self.take(offset, WORD)
    }

    fn read_usize(&mut self, offset: usize) -> Result<usize> {
        let word = U256::from_be_slice(self.word(offset)?);
        usize::try_from(word)
            .ok()
            .filter(|n| *n <= self.data.len())
            .ok_or_else(|| Error::InvalidEncoding {
                offset,
                reason: format!("offset or length {word} exceeds the input"),
            })
    }

    fn seq(&mut self, types: &[&ParamType], base: usize) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(types.len());
        let mut head = base;
        for ty in types {
            if ty.is_dynamic() {
                let offset = self.read_usize(head)?;
                let target = base.checked_add(offset).ok_or(Error::ShortRead { offset: head })?;
                values.push(self.single(ty, target)?);
                head += WORD;
            } else {
                values.push(self.single(ty, head)?);
                head += ty.head_words() * WORD;
            }
        }
        Ok(values)
    }

    fn single(&mut self, ty: &ParamType, offset: usize) -> Result<Value> {
        let value = match ty {
            ParamType::Address => {
                let word = self.word(offset)?;
                if word[..12].iter().any(|b| *b != 0) {
                    return Err(Error::InvalidEncoding {
                        offset,
                        reason: "dirty address padding".into(),
                    });
                }
                Value::Address(alloy_primitives::Address::from_slice(&word[12..]))
            }
            ParamType::Bool => {
                let word = U256::from_be_slice(self.word(offset)?);
                if word > U256::from(1) {
                    return Err(Error::InvalidEncoding {
                        offset,
                        reason: format!("{word} is not a bool"),
                    });
                }
                Value::Bool(word == U256::from(1))
            }
            ParamType::Uint(bits) => {
                let word = U256::from_be_slice(self.word(offset)?);
                if word.bit_len() > *bits {
                    return Err(Error::Overflow { ty: ty.to_string() });
                }
                Value::Uint(word, *bits)
            }
            ParamType::Int(bits) => {
                let word = I256::from_raw(U256::from_be_slice(self.word(offset)?));
                if !int_fits(word, *bits) {
                    return Err(Error::Overflow { ty: ty.to_string() });
                }
                Value::Int(word, *bits)
            }
            ParamType::FixedBytes(size) => {
                let word = B256::from_slice(self.word(offset)?);
                if word[*size..].iter().any(|b| *b != 0) {
                    return Err(Error::InvalidEncoding {
                        offset,
                        reason: format!("dirty bytes{size} padding"),
                    });
                }
                Value::FixedBytes(word, *size)
            }
            ParamType::Bytes => Value::Bytes(self.packed(offset)?.to_vec()),
            ParamType::String => {
                let bytes = self.packed(offset)?;
                let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { offset })?;
                Value::String(s.to_owned())
            }
            ParamType::Array(inner) => {
                let len = self.read_usize(offset)?;
                let start = offset + WORD;
                let needed = len.saturating_mul(inner.head_words() * WORD);
                if start.saturating_add(needed) > self.data.len() {
                    return Err(Error::ShortRead { offset: start });
                }
                Value::Array(self.seq(&vec![inner.as_ref(); len], start)?)
            }
            ParamType::FixedArray(inner, len) => {
                Value::FixedArray(self.seq(&vec![inner.as_ref(); *len], offset)?)
            }
            ParamType::Tuple(types) => {
                let types: Vec<&ParamType> = types.iter().collect();
                Value::Tuple(self.seq(&types, offset)?)
            }
        };
        Ok(value)
    }

    fn packed(&mut self, offset: usize) -> Result<&'a [u8]> {
        let len = self.read_usize(offset)?;
        let padded = len + padding(len);
        let bytes = self.take(offset + WORD, padded)?;
        Ok(&bytes[..len])
    }
}
