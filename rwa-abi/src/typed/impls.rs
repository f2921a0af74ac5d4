// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use super::AbiValue;
use crate::{Error, ParamType, Result, Value};
use alloy_primitives::{Address, Bytes, FixedBytes, B256, I256, U256};

/// Generates a test to ensure the Rust to Solidity mapping agrees with alloy's.
macro_rules! test_type {
    ($name:tt, $($ty:tt)*) => {
        #[cfg(test)]
        paste::paste! {
            #[allow(non_snake_case)]
            #[test]
            fn [<test_ $name>]() {
                assert_eq!(
                    <$($ty)* as AbiValue>::param_type().canonical(),
                    <<$($ty)* as alloy_sol_types::SolValue>::SolType as alloy_sol_types::SolType>::SOL_NAME,
                    "{}'s param type didn't match its SolType sol_type_name",
                    stringify!($($ty)*),
                );
            }
        }
    };
}

impl AbiValue for U256 {
    fn param_type() -> ParamType {
        ParamType::Uint(256)
    }

    fn to_value(&self) -> Value {
        Value::Uint(*self, 256)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uint(v, _) => Ok(v),
            Value::Int(v, _) if !v.is_negative() => Ok(v.into_raw()),
            Value::Int(..) => Err(Error::NegativeUnsigned {
                ty: "uint256".into(),
            }),
            other => Err(Error::mismatch("uint256", other.kind())),
        }
    }
}

test_type!(uint256, U256);

impl AbiValue for I256 {
    fn param_type() -> ParamType {
        ParamType::Int(256)
    }

    fn to_value(&self) -> Value {
        Value::Int(*self, 256)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(v, _) => Ok(v),
            Value::Uint(v, _) => crate::codec::uint_to_int(v).ok_or(Error::Overflow {
                ty: "int256".into(),
            }),
            other => Err(Error::mismatch("int256", other.kind())),
        }
    }
}

test_type!(int256, I256);

/// Low 128 bits of a word, for narrowing after a range check.
fn low_u128(word: U256) -> u128 {
    let limbs = word.as_limbs();
    limbs[0] as u128 | (limbs[1] as u128) << 64
}

macro_rules! impl_int {
    ($bits:literal, $unsigned:ty, $signed:ty) => {
        impl AbiValue for $unsigned {
            fn param_type() -> ParamType {
                ParamType::Uint($bits)
            }

            fn to_value(&self) -> Value {
                Value::Uint(U256::from(*self), $bits)
            }

            fn from_value(value: Value) -> Result<Self> {
                let wide = U256::from_value(value).map_err(|e| match e {
                    Error::NegativeUnsigned { .. } => Error::NegativeUnsigned {
                        ty: concat!("uint", $bits).into(),
                    },
                    other => other,
                })?;
                if wide.bit_len() > $bits {
                    return Err(Error::Overflow {
                        ty: concat!("uint", $bits).into(),
                    });
                }
                Ok(low_u128(wide) as $unsigned)
            }
        }

        impl AbiValue for $signed {
            fn param_type() -> ParamType {
                ParamType::Int($bits)
            }

            fn to_value(&self) -> Value {
                let v = *self as i128;
                let mut raw = U256::from(v as u128);
                if v < 0 {
                    raw |= U256::MAX << 128;
                }
                Value::Int(I256::from_raw(raw), $bits)
            }

            fn from_value(value: Value) -> Result<Self> {
                let wide = I256::from_value(value)?;
                if !crate::codec::int_fits(wide, $bits) {
                    return Err(Error::Overflow {
                        ty: concat!("int", $bits).into(),
                    });
                }
                Ok(low_u128(wide.into_raw()) as i128 as $signed)
            }
        }

        test_type!($unsigned, $unsigned);
        test_type!($signed, $signed);
    };
}

impl_int!(8, u8, i8);
impl_int!(16, u16, i16);
impl_int!(32, u32, i32);
impl_int!(64, u64, i64);
impl_int!(128, u128, i128);

impl AbiValue for bool {
    fn param_type() -> ParamType {
        ParamType::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::mismatch("bool", value.kind()))
    }
}

test_type!(bool, bool);

impl AbiValue for Address {
    fn param_type() -> ParamType {
        ParamType::Address
    }

    fn to_value(&self) -> Value {
        Value::Address(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_address()
            .ok_or_else(|| Error::mismatch("address", value.kind()))
    }
}

test_type!(address, Address);

impl AbiValue for String {
    fn param_type() -> ParamType {
        ParamType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::mismatch("string", other.kind())),
        }
    }
}

test_type!(string, String);

impl AbiValue for Bytes {
    fn param_type() -> ParamType {
        ParamType::Bytes
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(bytes) => Ok(bytes.into()),
            other => Err(Error::mismatch("bytes", other.kind())),
        }
    }
}

test_type!(bytes, Bytes);

impl<const N: usize> AbiValue for FixedBytes<N> {
    fn param_type() -> ParamType {
        ParamType::FixedBytes(N)
    }

    fn to_value(&self) -> Value {
        let mut word = B256::ZERO;
        word[..N].copy_from_slice(self.as_slice());
        Value::FixedBytes(word, N)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::FixedBytes(word, len) if len <= N && N <= 32 => {
                Ok(FixedBytes::from_slice(&word[..N]))
            }
            other => Err(Error::mismatch(format!("bytes{N}"), other.kind())),
        }
    }
}

test_type!(bytes4, FixedBytes<4>);
test_type!(bytes32, B256);

impl<T: AbiValue> AbiValue for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::Array(Box::new(T::param_type()))
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) | Value::FixedArray(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            other => Err(Error::mismatch(Self::param_type(), other.kind())),
        }
    }
}

test_type!(vec_of_u8s, Vec<u8>);
test_type!(vec_of_u256s, Vec<U256>);
test_type!(vec_of_bytes, Vec<Bytes>);
test_type!(vec_of_fixed_bytes, Vec<FixedBytes<18>>);

impl<T: AbiValue, const N: usize> AbiValue for [T; N] {
    fn param_type() -> ParamType {
        ParamType::FixedArray(Box::new(T::param_type()), N)
    }

    fn to_value(&self) -> Value {
        Value::FixedArray(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::FixedArray(items) | Value::Array(items) => items,
            other => return Err(Error::mismatch(Self::param_type(), other.kind())),
        };
        let got = items.len();
        items
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<T>>>()?
            .try_into()
            .map_err(|_| Error::Arity { expected: N, got })
    }
}

test_type!(array_of_bools, [bool; 5]);
test_type!(array_of_nested_u32s, [[u32; 2]; 4]);

impl AbiValue for () {
    fn param_type() -> ParamType {
        ParamType::Tuple(vec![])
    }

    fn to_value(&self) -> Value {
        Value::Tuple(vec![])
    }

    fn from_value(value: Value) -> Result<Self> {
        super::into_fields(value, 0).map(|_| ())
    }
}


macro_rules! impl_tuple {
    () => {};
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: AbiValue $(, $rest: AbiValue)*> AbiValue for ( $first $(, $rest)* , ) {
            fn param_type() -> ParamType {
                ParamType::Tuple(vec![$first::param_type() $(, $rest::param_type())*])
            }

            #[allow(non_snake_case)]
            fn to_value(&self) -> Value {
                let ($first, $($rest,)*) = self;
                Value::Tuple(vec![$first.to_value() $(, $rest.to_value())*])
            }

            fn from_value(value: Value) -> Result<Self> {
                const FIELDS: usize = [stringify!($first) $(, stringify!($rest))*].len();
                let mut fields = super::into_fields(value, FIELDS)?;
                Ok((
                    super::next_field::<$first>(&mut fields, stringify!($first))?,
                    $(super::next_field::<$rest>(&mut fields, stringify!($rest))?,)*
                ))
            }
        }

        impl_tuple! { $($rest),* }
    };
}

impl_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

test_type!(tuple_of_single_u8, (u8,));
test_type!(tuple_of_single_u256, (U256,));

test_type!(tuple_of_two_u8s, (u8, u8));
test_type!(tuple_of_u8_and_u256, (u8, U256));

test_type!(
    tuple_of_four_types,
    (u8, Vec<U256>, Bytes, FixedBytes<2>)
);
