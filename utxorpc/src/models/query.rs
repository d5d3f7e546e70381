use getset::Getters;
use utxorpc_proto::cardano;

use super::{BlockHash, ParsedState, TxHash};

/// Reference to a transaction output.
///
/// `index` is `None` when the reference names the whole transaction, as in a wait for
/// confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TxoRef {
    /// Id of the owning transaction.
    pub hash: TxHash,
    /// Output position within the transaction.
    pub index: Option<u32>,
}

impl TxoRef {
    /// A specific output.
    pub fn new(hash: TxHash, index: u32) -> Self {
        Self {
            hash,
            index: Some(index),
        }
    }

    /// The transaction as a whole.
    pub fn tx(hash: TxHash) -> Self {
        Self { hash, index: None }
    }
}

/// The ledger point a query answer was computed at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainPoint {
    /// Absolute slot.
    pub slot: u64,
    /// Block hash at the slot, when reported.
    pub hash: Option<BlockHash>,
    /// Block number, when reported.
    pub height: Option<u64>,
    /// Unix timestamp, when reported.
    pub timestamp: Option<u64>,
}

/// A UTxO as returned by `ReadUtxos` and `SearchUtxos`.
#[derive(Clone, Debug, Default, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct AnyUtxoData {
    /// Chain native serialization of the output.
    native_bytes: Option<Vec<u8>>,
    /// Where the output lives.
    txo_ref: Option<TxoRef>,
    /// Server decoded output.
    parsed_state: ParsedState<cardano::TxOutput>,
}

impl AnyUtxoData {
    pub(crate) fn from_parts(
        native_bytes: Option<Vec<u8>>,
        txo_ref: Option<TxoRef>,
        parsed_state: ParsedState<cardano::TxOutput>,
    ) -> Self {
        Self {
            native_bytes,
            txo_ref,
            parsed_state,
        }
    }
}

/// Answer to `ReadUtxos`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadUtxosResponse {
    /// One entry per output the server knows, in request order.
    pub items: Vec<AnyUtxoData>,
    /// Ledger point the answer reflects.
    pub ledger_tip: Option<ChainPoint>,
}

/// One page of `SearchUtxos`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchUtxosResponse {
    /// Matching outputs.
    pub items: Vec<AnyUtxoData>,
    /// Ledger point the answer reflects.
    pub ledger_tip: Option<ChainPoint>,
    /// Opaque continuation; pass it back as the start token. `None` on the last page.
    pub next_token: Option<String>,
}

/// Answer to `ReadParams`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadParamsResponse {
    /// Protocol parameters in force.
    pub values: ParsedState<cardano::PParams>,
    /// Ledger point the answer reflects.
    pub ledger_tip: Option<ChainPoint>,
}
