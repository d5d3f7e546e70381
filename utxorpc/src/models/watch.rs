use utxorpc_proto::cardano;

use super::ParsedState;

/// Direction of a `WatchTx` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxAction {
    /// The transaction landed in a block on the followed chain.
    Apply,
    /// The block holding the transaction was rolled back.
    Undo,
}

/// One event of a `WatchTx` subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchTxResponse {
    /// Whether the transaction was applied or undone.
    pub action: TxAction,
    /// Server decoded transaction.
    pub parsed_state: ParsedState<cardano::Tx>,
}
