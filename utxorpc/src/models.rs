//! SDK level value types.
//!
//! Every record here is built from a wire message (see [`crate::conversion`]) or by the caller, and
//! owns no handle back to the client that produced it. Optional wire fields that the server left
//! at their default, typically because a field mask excluded them, are `None` rather than a zero
//! value.

mod chain;
mod hash;
mod query;
mod submit;
mod watch;

pub use chain::{Block, BlockRef, DumpHistoryResponse, NextAction, NextResponse};
pub use hash::{BlockHash, Hash32, TxHash};
pub use query::{
    AnyUtxoData, ChainPoint, ReadParamsResponse, ReadUtxosResponse, SearchUtxosResponse, TxoRef,
};
pub use submit::{Stage, SubmitTxResponse, TxInMempool, WaitForTxResponse, WatchMempoolResponse};
pub use watch::{TxAction, WatchTxResponse};

/// A chain specific payload decoded by the server.
///
/// Only Cardano payloads are unwrapped. Anything else, including a payload the field mask left
/// out, is [`ParsedState::Undecoded`]; the raw bytes stay available on the owning record.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ParsedState<T> {
    /// Decoded Cardano payload.
    Cardano(T),
    /// Unrecognized chain or not requested.
    #[default]
    Undecoded,
}

impl<T> ParsedState<T> {
    /// The Cardano payload, if that is what the server sent.
    pub fn cardano(&self) -> Option<&T> {
        match self {
            ParsedState::Cardano(payload) => Some(payload),
            ParsedState::Undecoded => None,
        }
    }

    /// Consumes self, returning the Cardano payload if present.
    pub fn into_cardano(self) -> Option<T> {
        match self {
            ParsedState::Cardano(payload) => Some(payload),
            ParsedState::Undecoded => None,
        }
    }

    /// True unless the payload is [`ParsedState::Undecoded`].
    pub fn is_decoded(&self) -> bool {
        matches!(self, ParsedState::Cardano(_))
    }
}

/// `None` for an empty byte field.
pub(crate) fn non_empty(bytes: Vec<u8>) -> Option<Vec<u8>> {
    if bytes.is_empty() {
        None
    } else {
        Some(bytes)
    }
}

/// `None` for a zero numeric field.
pub(crate) fn non_zero(value: u64) -> Option<u64> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_state_hands_out_the_payload() {
        let decoded = ParsedState::Cardano(7u32);
        assert!(decoded.is_decoded());
        assert_eq!(decoded.cardano(), Some(&7));
        assert_eq!(decoded.into_cardano(), Some(7));

        let undecoded = ParsedState::<u32>::default();
        assert!(!undecoded.is_decoded());
        assert_eq!(undecoded.into_cardano(), None);
    }

    #[test]
    fn protobuf_defaults_become_none() {
        assert_eq!(non_empty(Vec::new()), None);
        assert_eq!(non_empty(vec![1]), Some(vec![1]));
        assert_eq!(non_zero(0), None);
        assert_eq!(non_zero(5), Some(5));
    }
}
