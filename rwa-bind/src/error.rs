// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy_primitives::{Address, Bytes};
use rwa_abi::RevertReason;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection error: {0}")]
    Connection(String),
    /// A JSON-RPC error. Execution reverts carry the revert bytes verbatim.
    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Bytes>,
    },
    #[error("subscription closed")]
    SubscriptionClosed,
}

impl TransportError {
    /// An `execution reverted` error as nodes report it.
    pub fn reverted(data: impl Into<Bytes>) -> Self {
        Self::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some(data.into()),
        }
    }

    pub fn revert_data(&self) -> Option<&[u8]> {
        match self {
            Self::Rpc {
                data: Some(data), ..
            } => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("abi error: {0}")]
    Abi(#[from] rwa_abi::Error),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("no contract code at {0}")]
    NoCode(Address),
    #[error("`{method}` returned no data")]
    NotFound { method: String },
    #[error("binding has no {capability} transport")]
    Unsupported { capability: &'static str },
    #[error("attempting to send value to non-payable method `{method}`")]
    NonPayable { method: String },
    #[error("signer error: {0}")]
    Signer(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("config error: {0}")]
    Config(String),
    #[error("watch worker failed: {0}")]
    Worker(String),
}

impl Error {
    /// Revert bytes carried by an `execution reverted` transport error.
    pub fn revert_data(&self) -> Option<&[u8]> {
        match self {
            Self::Transport(err) => err.revert_data(),
            _ => None,
        }
    }

    /// Interprets the revert bytes, if any, without consulting a contract ABI.
    pub fn revert_reason(&self) -> Option<RevertReason> {
        self.revert_data()
            .map(|data| RevertReason::decode(data, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_data_is_exposed() {
        let err: Error = TransportError::reverted(vec![0xde, 0xad]).into();
        assert_eq!(err.revert_data(), Some(&[0xde, 0xad][..]));
        assert_eq!(
            err.revert_reason(),
            Some(RevertReason::Raw(vec![0xde, 0xad]))
        );
        assert_eq!(
            err.to_string(),
            "transport error: rpc error 3: execution reverted"
        );
        assert_eq!(Error::Cancelled.revert_data(), None);
        assert_eq!(
            TransportError::Connection("refused".into()).revert_data(),
            None
        );
    }
}
