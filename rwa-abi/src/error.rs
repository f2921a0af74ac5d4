// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised while parsing descriptors or moving values through the codec.
///
/// Errors are cheap to clone so that consumers such as event iterators can latch one
/// and hand it out repeatedly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("json error: {0}")]
    Json(String),
    #[error("invalid abi at {path}: {reason}")]
    InvalidAbi { path: String, reason: String },
    #[error("unknown type `{ty}` at {path}")]
    UnknownType { path: String, ty: String },

    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("unknown event `{0}`")]
    UnknownEvent(String),
    #[error("unknown error `{0}`")]
    UnknownError(String),
    #[error("selector mismatch: expected 0x{}, got 0x{}", hex::encode(.expected), hex::encode(.got))]
    SelectorMismatch { expected: [u8; 4], got: [u8; 4] },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("arity mismatch: expected {expected} values, got {got}")]
    Arity { expected: usize, got: usize },
    #[error("short read at offset {offset}")]
    ShortRead { offset: usize },
    #[error("excess data: {len} trailing bytes at offset {offset}")]
    ExcessData { offset: usize, len: usize },
    #[error("value does not fit in {ty}")]
    Overflow { ty: String },
    #[error("negative value supplied for unsigned {ty}")]
    NegativeUnsigned { ty: String },
    #[error("invalid encoding at offset {offset}: {reason}")]
    InvalidEncoding { offset: usize, reason: String },
    #[error("invalid utf-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("topic count mismatch for event `{event}`: expected {expected}, got {got}")]
    TopicCount {
        event: String,
        expected: usize,
        got: usize,
    },
    #[error("log does not carry the signature of event `{event}`")]
    EventSignatureMismatch { event: String },

    #[error("field `{field}`: {source}")]
    InField {
        field: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps the error with the name of the record field being decoded.
    pub fn in_field(field: impl Into<String>, source: Error) -> Self {
        Self::InField {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Strips any field context and returns the underlying failure.
    pub fn root(&self) -> &Error {
        match self {
            Self::InField { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn mismatch(expected: impl ToString, got: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
