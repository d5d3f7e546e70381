use std::fmt;

use utxorpc_proto::{cardano, submit};

use super::{ParsedState, TxHash};

/// How far a submitted transaction has progressed.
///
/// Variants are ordered by lifecycle, so a `WaitForTx` stream for one transaction never reports a
/// stage lower than one it already reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Not reported, or a value this SDK does not know.
    #[default]
    Unspecified,
    /// Received by the server.
    Acknowledged,
    /// In the server's mempool.
    Mempool,
    /// Propagated to peers.
    Network,
    /// Included in a block.
    Confirmed,
}

impl From<submit::Stage> for Stage {
    fn from(stage: submit::Stage) -> Self {
        match stage {
            submit::Stage::Unspecified => Stage::Unspecified,
            submit::Stage::Acknowledged => Stage::Acknowledged,
            submit::Stage::Mempool => Stage::Mempool,
            submit::Stage::Network => Stage::Network,
            submit::Stage::Confirmed => Stage::Confirmed,
        }
    }
}

impl From<i32> for Stage {
    fn from(value: i32) -> Self {
        submit::Stage::try_from(value)
            .map(Stage::from)
            .unwrap_or_default()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Unspecified => "unspecified",
            Stage::Acknowledged => "acknowledged",
            Stage::Mempool => "mempool",
            Stage::Network => "network",
            Stage::Confirmed => "confirmed",
        };
        f.write_str(name)
    }
}

/// Answer to `SubmitTx`: one id per submitted transaction, in submission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitTxResponse {
    /// Transaction ids assigned by the server.
    pub refs: Vec<TxHash>,
}

/// One event of a `WaitForTx` subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct WaitForTxResponse {
    /// The transaction the event is about.
    pub tx_ref: TxHash,
    /// Stage reached.
    pub stage: Stage,
}

/// A transaction seen in the mempool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TxInMempool {
    /// Transaction id, when returned.
    pub tx_ref: Option<TxHash>,
    /// Chain native serialization.
    pub native_bytes: Option<Vec<u8>>,
    /// Stage reached.
    pub stage: Stage,
    /// Server decoded transaction.
    pub parsed_state: ParsedState<cardano::Tx>,
}

/// One event of a `WatchMempool` subscription.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WatchMempoolResponse {
    /// The transaction, absent if the server sent an empty event.
    pub tx: Option<TxInMempool>,
}
