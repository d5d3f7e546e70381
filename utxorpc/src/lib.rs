#![warn(missing_docs)]
//! Typed client for UTxO RPC servers.
//!
//! Entrypoint: [`UtxorpcClient::connect`], or one of the per service clients in [`client`].
//!
//! Terminology:
//! Predicate - a filter over addresses and assets, see [`predicate::Predicate`]. The same
//!             predicate can be sent to `SearchUtxos`, `WatchMempool` and `WatchTx`.
//! Field mask - a list of dotted response paths the server should fill in. Fields left out come
//!              back as `None` in the models.
//! Parsed state - the chain specific payload the server decoded; only Cardano payloads are
//!                unwrapped, see [`models::ParsedState`].

pub mod client;
pub mod conversion;
pub mod error;
pub mod models;
pub mod predicate;

pub use client::{
    EventStream, QueryClient, SubmitClient, SyncClient, UtxorpcClient, WatchClient,
};
pub use error::{Error, PredicateError};
pub use predicate::{Predicate, RawPattern};
pub use tokio_util::sync::CancellationToken;
pub use utxorpc_config::ClientConfig;
pub use utxorpc_proto::FieldMask;

/// The wire bindings, for payloads carried in [`models::ParsedState`].
pub use utxorpc_proto as proto;
