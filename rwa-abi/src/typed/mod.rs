// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Mapping between Rust types and dynamically typed [`Value`]s.
//!
//! Generated bindings convert their arguments with [`AbiValue::to_value`] and rebuild
//! results with [`AbiValue::from_value`]. Record types mirroring Solidity structs are
//! declared with [`abi_struct!`](crate::abi_struct).

use crate::{Error, ParamType, Result, Value};

mod impls;

/// A Rust type with a fixed Solidity counterpart.
pub trait AbiValue: Sized {
    /// The Solidity type this Rust type maps to.
    fn param_type() -> ParamType;

    fn to_value(&self) -> Value;

    /// Rebuilds the Rust value, failing on shape mismatch or when a narrowing would truncate.
    fn from_value(value: Value) -> Result<Self>;
}

/// Rebuilds a function result from its decoded outputs.
///
/// A single output maps directly onto `T`. Several outputs are treated as one tuple, which
/// lets a record declared with [`abi_struct!`](crate::abi_struct) receive them in ABI order.
pub fn from_outputs<T: AbiValue>(mut values: Vec<Value>) -> Result<T> {
    if values.len() == 1 {
        return values.pop().map_or(Err(Error::Arity { expected: 1, got: 0 }), T::from_value);
    }
    T::from_value(Value::Tuple(values))
}

/// Unpacks a tuple value into its fields, checking the field count.
#[doc(hidden)]
pub fn into_fields(value: Value, expected: usize) -> Result<std::vec::IntoIter<Value>> {
    match value {
        Value::Tuple(fields) if fields.len() == expected => Ok(fields.into_iter()),
        Value::Tuple(fields) => Err(Error::Arity {
            expected,
            got: fields.len(),
        }),
        other => Err(Error::mismatch(format!("tuple of {expected}"), other.kind())),
    }
}

/// Takes the next field of a record, tagging failures with the field name.
#[doc(hidden)]
pub fn next_field<T: AbiValue>(fields: &mut impl Iterator<Item = Value>, name: &str) -> Result<T> {
    let value = fields.next().ok_or_else(|| Error::in_field(name, Error::Arity {
        expected: 1,
        got: 0,
    }))?;
    T::from_value(value).map_err(|e| Error::in_field(name, e))
}

/// Declares a record mirroring a Solidity struct or an ordered list of outputs.
///
/// Field order is the ABI order; names are only used for error context.
///
/// ```
/// use rwa_abi::{abi_struct, AbiValue, U256};
///
/// abi_struct! {
///     pub struct CategoryValue {
///         pub category: String,
///         pub total_value: U256,
///     }
/// }
///
/// assert_eq!(CategoryValue::param_type().canonical(), "(string,uint256)");
/// ```
#[macro_export]
macro_rules! abi_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::AbiValue for $name {
            fn param_type() -> $crate::ParamType {
                $crate::ParamType::Tuple(vec![
                    $(<$ty as $crate::AbiValue>::param_type()),*
                ])
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Tuple(vec![
                    $($crate::AbiValue::to_value(&self.$field)),*
                ])
            }

            fn from_value(value: $crate::Value) -> $crate::Result<Self> {
                const FIELDS: usize = [$(stringify!($field)),*].len();
                #[allow(unused_mut)]
                let mut fields = $crate::typed::into_fields(value, FIELDS)?;
                Ok(Self {
                    $($field: $crate::typed::next_field(&mut fields, stringify!($field))?,)*
                })
            }
        }
    };
}
