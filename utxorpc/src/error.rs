//! Errors surfaced by the SDK.

use std::fmt;

use utxorpc_netutils::GetClientError;

/// The wire predicate shape a [`crate::predicate::Predicate`] is rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// `query.UtxoPredicate`, used by `SearchUtxos`.
    Query,
    /// `submit.TxPredicate`, used by `WatchMempool`.
    Mempool,
    /// `watch.TxPredicate`, used by `WatchTx`.
    Watch,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Query => write!(f, "query"),
            Target::Mempool => write!(f, "mempool"),
            Target::Watch => write!(f, "watch"),
        }
    }
}

#[allow(missing_docs)] // error types document themselves
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    #[error("raw pattern has no {target} configuration")]
    Unsupported { target: Target },
    #[error("{kind} pattern must not be empty")]
    EmptyPattern { kind: &'static str },
}

#[allow(missing_docs)] // error types document themselves
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not connect: {0}")]
    Connect(#[from] GetClientError),
    #[error("rpc failed with status {}: {}", .0.code(), .0.message())]
    Status(Box<tonic::Status>),
    #[error("cannot translate predicate: {0}")]
    Predicate(#[from] PredicateError),
    #[error("invalid hash length: expected {expected} bytes, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("output reference for {0} has no output index")]
    MissingOutputIndex(String),
    #[error("{message} carried no recognized action")]
    MissingAction { message: &'static str },
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Self::Status(Box::new(status))
    }
}

impl Error {
    /// The gRPC status code, when the error came from the server or transport.
    pub fn status_code(&self) -> Option<tonic::Code> {
        match self {
            Error::Status(status) => Some(status.code()),
            _ => None,
        }
    }

    /// The full status, when the error came from the server or transport.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            Error::Status(status) => Some(status),
            _ => None,
        }
    }
}
