//! Translation between wire messages and [`crate::models`].
//!
//! Inbound conversions are `TryFrom` impls because hashes are length checked. Scalar fields the
//! server left at their protobuf default become `None` where the model field is optional.
//! Chain specific oneofs are unwrapped for Cardano and become [`ParsedState::Undecoded`]
//! otherwise. Missing required discriminators are [`Error::MissingAction`].

use utxorpc_proto::{query, submit, sync, watch};

use crate::error::Error;
use crate::models::{
    non_empty, non_zero, AnyUtxoData, Block, BlockRef, ChainPoint, DumpHistoryResponse, Hash32,
    NextAction, NextResponse, ParsedState, ReadParamsResponse, ReadUtxosResponse,
    SearchUtxosResponse, Stage, SubmitTxResponse, TxAction, TxInMempool, TxoRef,
    WaitForTxResponse, WatchMempoolResponse, WatchTxResponse,
};

// sync

impl TryFrom<sync::BlockRef> for BlockRef {
    type Error = Error;

    fn try_from(wire: sync::BlockRef) -> Result<Self, Self::Error> {
        // an empty hash is the chain origin
        Ok(BlockRef {
            hash: Hash32::from_optional_bytes(&wire.hash)?,
            slot: wire.slot,
            height: non_zero(wire.height),
            timestamp: non_zero(wire.timestamp),
        })
    }
}

/// A wire ref that is absent, or present with no hash, carries no point.
pub(crate) fn optional_block_ref(wire: Option<sync::BlockRef>) -> Result<Option<BlockRef>, Error> {
    match wire {
        Some(wire) if !wire.hash.is_empty() => BlockRef::try_from(wire).map(Some),
        _ => Ok(None),
    }
}

impl From<&BlockRef> for sync::BlockRef {
    fn from(point: &BlockRef) -> Self {
        sync::BlockRef {
            slot: point.slot,
            hash: point.hash.map(|hash| hash.to_vec()).unwrap_or_default(),
            height: point.height.unwrap_or_default(),
            timestamp: point.timestamp.unwrap_or_default(),
        }
    }
}

impl From<&BlockRef> for watch::BlockRef {
    fn from(point: &BlockRef) -> Self {
        watch::BlockRef {
            slot: point.slot,
            hash: point.hash.map(|hash| hash.to_vec()).unwrap_or_default(),
            height: point.height.unwrap_or_default(),
        }
    }
}

impl TryFrom<sync::AnyChainBlock> for Block {
    type Error = Error;

    fn try_from(wire: sync::AnyChainBlock) -> Result<Self, Self::Error> {
        let native_bytes = non_empty(wire.native_bytes);
        let Some(sync::any_chain_block::Chain::Cardano(block)) = wire.chain else {
            return Ok(Block::from_parts(
                None,
                None,
                None,
                None,
                native_bytes,
                ParsedState::Undecoded,
            ));
        };

        let (hash, slot, height) = match &block.header {
            Some(header) => (
                Hash32::from_optional_bytes(&header.hash)?,
                non_zero(header.slot),
                non_zero(header.height),
            ),
            None => (None, None, None),
        };
        let timestamp = non_zero(block.timestamp);

        Ok(Block::from_parts(
            hash,
            slot,
            height,
            timestamp,
            native_bytes,
            ParsedState::Cardano(block),
        ))
    }
}

impl TryFrom<sync::FollowTipResponse> for NextResponse {
    type Error = Error;

    fn try_from(wire: sync::FollowTipResponse) -> Result<Self, Self::Error> {
        use sync::follow_tip_response::Action;

        let action = match wire.action {
            Some(Action::Apply(block)) => NextAction::Apply(block.try_into()?),
            Some(Action::Undo(block)) => NextAction::Undo(block.try_into()?),
            Some(Action::Reset(point)) => NextAction::Reset(point.try_into()?),
            None => {
                return Err(Error::MissingAction {
                    message: "FollowTip response",
                })
            }
        };

        Ok(NextResponse {
            action,
            tip: optional_block_ref(wire.tip)?,
        })
    }
}

impl TryFrom<sync::DumpHistoryResponse> for DumpHistoryResponse {
    type Error = Error;

    fn try_from(wire: sync::DumpHistoryResponse) -> Result<Self, Self::Error> {
        Ok(DumpHistoryResponse {
            blocks: wire
                .block
                .into_iter()
                .map(Block::try_from)
                .collect::<Result<_, _>>()?,
            next_token: optional_block_ref(wire.next_token)?,
        })
    }
}

// query

impl TryFrom<query::TxoRef> for TxoRef {
    type Error = Error;

    fn try_from(wire: query::TxoRef) -> Result<Self, Self::Error> {
        // index 0 is a real output, so the wire index is always taken as present
        Ok(TxoRef::new(Hash32::try_from(wire.hash.as_slice())?, wire.index))
    }
}

impl TryFrom<&TxoRef> for query::TxoRef {
    type Error = Error;

    fn try_from(txo: &TxoRef) -> Result<Self, Self::Error> {
        let index = txo
            .index
            .ok_or_else(|| Error::MissingOutputIndex(txo.hash.to_string()))?;
        Ok(query::TxoRef {
            hash: txo.hash.to_vec(),
            index,
        })
    }
}

impl TryFrom<query::ChainPoint> for ChainPoint {
    type Error = Error;

    fn try_from(wire: query::ChainPoint) -> Result<Self, Self::Error> {
        Ok(ChainPoint {
            slot: wire.slot,
            hash: Hash32::from_optional_bytes(&wire.hash)?,
            height: non_zero(wire.height),
            timestamp: non_zero(wire.timestamp),
        })
    }
}

fn ledger_tip(wire: Option<query::ChainPoint>) -> Result<Option<ChainPoint>, Error> {
    wire.map(ChainPoint::try_from).transpose()
}

impl TryFrom<query::AnyUtxoData> for AnyUtxoData {
    type Error = Error;

    fn try_from(wire: query::AnyUtxoData) -> Result<Self, Self::Error> {
        let txo_ref = match wire.txo_ref {
            Some(txo) if !txo.hash.is_empty() => Some(TxoRef::try_from(txo)?),
            _ => None,
        };
        let parsed_state = match wire.parsed_state {
            Some(query::any_utxo_data::ParsedState::Cardano(output)) => {
                ParsedState::Cardano(output)
            }
            None => ParsedState::Undecoded,
        };

        Ok(AnyUtxoData::from_parts(
            non_empty(wire.native_bytes),
            txo_ref,
            parsed_state,
        ))
    }
}

fn utxo_items(wire: Vec<query::AnyUtxoData>) -> Result<Vec<AnyUtxoData>, Error> {
    wire.into_iter().map(AnyUtxoData::try_from).collect()
}

impl TryFrom<query::ReadUtxosResponse> for ReadUtxosResponse {
    type Error = Error;

    fn try_from(wire: query::ReadUtxosResponse) -> Result<Self, Self::Error> {
        Ok(ReadUtxosResponse {
            items: utxo_items(wire.items)?,
            ledger_tip: ledger_tip(wire.ledger_tip)?,
        })
    }
}

impl TryFrom<query::SearchUtxosResponse> for SearchUtxosResponse {
    type Error = Error;

    fn try_from(wire: query::SearchUtxosResponse) -> Result<Self, Self::Error> {
        Ok(SearchUtxosResponse {
            items: utxo_items(wire.items)?,
            ledger_tip: ledger_tip(wire.ledger_tip)?,
            next_token: Some(wire.next_token).filter(|token| !token.is_empty()),
        })
    }
}

impl TryFrom<query::ReadParamsResponse> for ReadParamsResponse {
    type Error = Error;

    fn try_from(wire: query::ReadParamsResponse) -> Result<Self, Self::Error> {
        let values = match wire.values.and_then(|values| values.params) {
            Some(query::any_chain_params::Params::Cardano(params)) => ParsedState::Cardano(params),
            None => ParsedState::Undecoded,
        };

        Ok(ReadParamsResponse {
            values,
            ledger_tip: ledger_tip(wire.ledger_tip)?,
        })
    }
}

// submit

impl TryFrom<submit::SubmitTxResponse> for SubmitTxResponse {
    type Error = Error;

    fn try_from(wire: submit::SubmitTxResponse) -> Result<Self, Self::Error> {
        Ok(SubmitTxResponse {
            refs: wire
                .r#ref
                .into_iter()
                .map(Hash32::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<submit::WaitForTxResponse> for WaitForTxResponse {
    type Error = Error;

    fn try_from(wire: submit::WaitForTxResponse) -> Result<Self, Self::Error> {
        Ok(WaitForTxResponse {
            tx_ref: Hash32::try_from(wire.r#ref)?,
            stage: Stage::from(wire.stage),
        })
    }
}

impl TryFrom<submit::TxInMempool> for TxInMempool {
    type Error = Error;

    fn try_from(wire: submit::TxInMempool) -> Result<Self, Self::Error> {
        let parsed_state = match wire.parsed_state {
            Some(submit::tx_in_mempool::ParsedState::Cardano(tx)) => ParsedState::Cardano(tx),
            None => ParsedState::Undecoded,
        };

        Ok(TxInMempool {
            tx_ref: Hash32::from_optional_bytes(&wire.r#ref)?,
            native_bytes: non_empty(wire.native_bytes),
            stage: Stage::from(wire.stage),
            parsed_state,
        })
    }
}

impl TryFrom<submit::WatchMempoolResponse> for WatchMempoolResponse {
    type Error = Error;

    fn try_from(wire: submit::WatchMempoolResponse) -> Result<Self, Self::Error> {
        Ok(WatchMempoolResponse {
            tx: wire.tx.map(TxInMempool::try_from).transpose()?,
        })
    }
}

// watch

impl TryFrom<watch::WatchTxResponse> for WatchTxResponse {
    type Error = Error;

    fn try_from(wire: watch::WatchTxResponse) -> Result<Self, Self::Error> {
        use watch::watch_tx_response::Action;

        let (action, tx) = match wire.action {
            Some(Action::Apply(tx)) => (TxAction::Apply, tx),
            Some(Action::Undo(tx)) => (TxAction::Undo, tx),
            None => {
                return Err(Error::MissingAction {
                    message: "WatchTx response",
                })
            }
        };
        let parsed_state = match tx.chain {
            Some(watch::any_chain_tx::Chain::Cardano(tx)) => ParsedState::Cardano(tx),
            None => ParsedState::Undecoded,
        };

        Ok(WatchTxResponse {
            action,
            parsed_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use utxorpc_proto::cardano;

    const HASH: [u8; 32] = [0x3f; 32];

    fn wire_block(slot: u64, height: u64, timestamp: u64) -> sync::AnyChainBlock {
        sync::AnyChainBlock {
            native_bytes: vec![0x82, 0x00],
            chain: Some(sync::any_chain_block::Chain::Cardano(cardano::Block {
                header: Some(cardano::BlockHeader {
                    slot,
                    hash: HASH.to_vec(),
                    height,
                }),
                body: None,
                timestamp,
            })),
        }
    }

    #[test]
    fn cardano_block_is_unwrapped() {
        let block = Block::try_from(wire_block(39822377, 2_000_000, 1_700_000_000)).unwrap();

        assert_eq!(block.hash(), &Some(Hash32::new(HASH)));
        assert_eq!(block.slot(), &Some(39822377));
        assert_eq!(block.native_bytes().as_deref(), Some(&[0x82, 0x00][..]));
        assert!(block.parsed_state().is_decoded());
        assert_eq!(
            block.block_ref(),
            Some(
                BlockRef::new(Hash32::new(HASH), 39822377)
                    .with_height(2_000_000)
                    .with_timestamp(1_700_000_000)
            )
        );
    }

    #[test]
    fn masked_out_block_fields_are_absent() {
        let block = Block::try_from(wire_block(0, 0, 0)).unwrap();
        assert_eq!(block.slot(), &None);
        assert_eq!(block.height(), &None);
        assert_eq!(block.timestamp(), &None);

        let bytes_only = Block::try_from(sync::AnyChainBlock {
            native_bytes: vec![1, 2, 3],
            chain: None,
        })
        .unwrap();
        assert_eq!(bytes_only.hash(), &None);
        assert_eq!(bytes_only.parsed_state(), &ParsedState::Undecoded);
        assert_eq!(bytes_only.native_bytes().as_deref(), Some(&[1, 2, 3][..]));
        assert_eq!(bytes_only.block_ref(), None);
    }

    #[test]
    fn block_ref_round_trips_to_both_packages() {
        let point = BlockRef::new(Hash32::new(HASH), 42).with_height(7);

        let wire = sync::BlockRef::from(&point);
        assert_eq!((wire.slot, wire.height, wire.timestamp), (42, 7, 0));
        assert_eq!(BlockRef::try_from(wire).unwrap(), point);

        let wire = watch::BlockRef::from(&point);
        assert_eq!(wire.hash, HASH.to_vec());
    }

    #[test]
    fn short_hash_is_an_error() {
        let wire = sync::BlockRef {
            slot: 1,
            hash: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(matches!(
            BlockRef::try_from(wire),
            Err(Error::InvalidHashLength { actual: 3, .. })
        ));
    }

    #[test]
    fn follow_tip_events_carry_the_tip() {
        let tip = sync::BlockRef {
            slot: 100,
            hash: HASH.to_vec(),
            ..Default::default()
        };
        let wire = sync::FollowTipResponse {
            tip: Some(tip),
            action: Some(sync::follow_tip_response::Action::Reset(sync::BlockRef {
                slot: 50,
                hash: HASH.to_vec(),
                ..Default::default()
            })),
        };

        let event = NextResponse::try_from(wire).unwrap();
        assert_eq!(event.reset(), Some(&BlockRef::new(Hash32::new(HASH), 50)));
        assert_eq!(event.tip.map(|tip| tip.slot), Some(100));

        let undo = NextResponse::try_from(sync::FollowTipResponse {
            tip: None,
            action: Some(sync::follow_tip_response::Action::Undo(wire_block(9, 1, 0))),
        })
        .unwrap();
        assert_eq!(undo.undone().and_then(|block| *block.slot()), Some(9));
        assert!(undo.applied().is_none());
    }

    #[test]
    fn reset_to_origin_is_an_event() {
        let wire = sync::FollowTipResponse {
            action: Some(sync::follow_tip_response::Action::Reset(
                sync::BlockRef::default(),
            )),
            tip: None,
        };

        let event = NextResponse::try_from(wire).unwrap();
        let point = event.reset().unwrap();
        assert!(point.is_origin());
        assert_eq!(point, &BlockRef::origin());
    }

    #[test]
    fn origin_is_sent_without_a_hash() {
        let wire = sync::BlockRef::from(&BlockRef::origin());
        assert_eq!(wire, sync::BlockRef::default());
        assert!(watch::BlockRef::from(&BlockRef::origin()).hash.is_empty());
    }

    #[test]
    fn follow_tip_without_action_is_an_error() {
        let result = NextResponse::try_from(sync::FollowTipResponse::default());
        assert!(matches!(result, Err(Error::MissingAction { .. })));
    }

    #[test]
    fn dump_history_keeps_order_and_token() {
        let wire = sync::DumpHistoryResponse {
            block: vec![wire_block(1, 1, 0), wire_block(2, 2, 0)],
            next_token: Some(sync::BlockRef {
                slot: 3,
                hash: HASH.to_vec(),
                ..Default::default()
            }),
        };
        let page = DumpHistoryResponse::try_from(wire).unwrap();
        let slots: Vec<_> = page.blocks.iter().map(|block| *block.slot()).collect();
        assert_eq!(slots, vec![Some(1), Some(2)]);
        assert_eq!(page.next_token.map(|token| token.slot), Some(3));

        let last = DumpHistoryResponse::try_from(sync::DumpHistoryResponse::default()).unwrap();
        assert_eq!(last.next_token, None);
    }

    #[test]
    fn txo_ref_without_index_cannot_be_sent() {
        let whole_tx = TxoRef::tx(Hash32::new(HASH));
        assert!(matches!(
            query::TxoRef::try_from(&whole_tx),
            Err(Error::MissingOutputIndex(_))
        ));

        let wire = query::TxoRef::try_from(&TxoRef::new(Hash32::new(HASH), 0)).unwrap();
        assert_eq!(wire.index, 0);
        assert_eq!(TxoRef::try_from(wire).unwrap().index, Some(0));
    }

    #[test]
    fn utxo_data_passes_other_chains_through() {
        let wire = query::AnyUtxoData {
            native_bytes: vec![0xaa],
            txo_ref: None,
            parsed_state: None,
        };
        let utxo = AnyUtxoData::try_from(wire).unwrap();
        assert_eq!(utxo.native_bytes().as_deref(), Some(&[0xaa][..]));
        assert_eq!(utxo.txo_ref(), &None);
        assert_eq!(utxo.parsed_state().cardano(), None);

        let decoded = AnyUtxoData::try_from(query::AnyUtxoData {
            native_bytes: Vec::new(),
            txo_ref: Some(query::TxoRef {
                hash: HASH.to_vec(),
                index: 3,
            }),
            parsed_state: Some(query::any_utxo_data::ParsedState::Cardano(
                cardano::TxOutput {
                    coin: 100_000_000,
                    ..Default::default()
                },
            )),
        })
        .unwrap();
        assert_eq!(decoded.native_bytes(), &None);
        assert_eq!(decoded.txo_ref(), &Some(TxoRef::new(Hash32::new(HASH), 3)));
        assert_eq!(decoded.parsed_state().cardano().map(|out| out.coin), Some(100_000_000));
    }

    #[test_case("" => None ; "last page")]
    #[test_case("abc" => Some("abc".to_string()) ; "more pages")]
    fn search_next_token(token: &str) -> Option<String> {
        SearchUtxosResponse::try_from(query::SearchUtxosResponse {
            next_token: token.to_string(),
            ..Default::default()
        })
        .unwrap()
        .next_token
    }

    #[test]
    fn ledger_tip_fields_are_normalized() {
        let point = ChainPoint::try_from(query::ChainPoint {
            slot: 5,
            hash: Vec::new(),
            height: 0,
            timestamp: 0,
        })
        .unwrap();
        assert_eq!(
            point,
            ChainPoint {
                slot: 5,
                ..Default::default()
            }
        );
    }

    #[test]
    fn read_params_without_cardano_is_undecoded() {
        let response = ReadParamsResponse::try_from(query::ReadParamsResponse::default()).unwrap();
        assert_eq!(response.values, ParsedState::Undecoded);
        assert_eq!(response.ledger_tip, None);
    }

    #[test]
    fn mempool_event_maps_stage_and_payload() {
        let wire = submit::WatchMempoolResponse {
            tx: Some(submit::TxInMempool {
                r#ref: HASH.to_vec(),
                native_bytes: vec![0x84],
                stage: submit::Stage::Mempool as i32,
                parsed_state: None,
            }),
        };
        let tx = WatchMempoolResponse::try_from(wire).unwrap().tx.unwrap();
        assert_eq!(tx.tx_ref, Some(Hash32::new(HASH)));
        assert_eq!(tx.stage, Stage::Mempool);
        assert_eq!(tx.parsed_state, ParsedState::Undecoded);

        let empty =
            WatchMempoolResponse::try_from(submit::WatchMempoolResponse::default()).unwrap();
        assert_eq!(empty.tx, None);
    }

    #[test]
    fn submit_refs_are_hashes() {
        let response = SubmitTxResponse::try_from(submit::SubmitTxResponse {
            r#ref: vec![HASH.to_vec()],
        })
        .unwrap();
        assert_eq!(response.refs, vec![Hash32::new(HASH)]);

        let wait = WaitForTxResponse::try_from(submit::WaitForTxResponse {
            r#ref: HASH.to_vec(),
            stage: 99,
        })
        .unwrap();
        assert_eq!(wait.stage, Stage::Unspecified);
    }

    #[test_case(true ; "apply")]
    #[test_case(false ; "undo")]
    fn watch_tx_action_is_kept(apply: bool) {
        let tx = watch::AnyChainTx {
            chain: Some(watch::any_chain_tx::Chain::Cardano(cardano::Tx::default())),
        };
        let action = if apply {
            watch::watch_tx_response::Action::Apply(tx)
        } else {
            watch::watch_tx_response::Action::Undo(tx)
        };

        let event = WatchTxResponse::try_from(watch::WatchTxResponse {
            action: Some(action),
        })
        .unwrap();
        let expected = if apply { TxAction::Apply } else { TxAction::Undo };
        assert_eq!(event.action, expected);
        assert!(event.parsed_state.is_decoded());
    }

    #[test]
    fn watch_tx_without_action_is_an_error() {
        assert!(matches!(
            WatchTxResponse::try_from(watch::WatchTxResponse::default()),
            Err(Error::MissingAction {
                message: "WatchTx response"
            })
        ));
    }
}
