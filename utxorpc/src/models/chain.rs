use getset::Getters;
use utxorpc_proto::cardano;

use super::{BlockHash, ParsedState};
use crate::error::Error;

/// Identifies a point on the chain.
///
/// The chain origin precedes every block and has no hash; the server uses it when following
/// starts from, or rolls back to, genesis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockRef {
    /// Header hash of the block at this point, `None` at the origin.
    pub hash: Option<BlockHash>,
    /// Absolute slot.
    pub slot: u64,
    /// Block number, when known.
    pub height: Option<u64>,
    /// Unix timestamp of the slot, when known.
    pub timestamp: Option<u64>,
}

impl BlockRef {
    /// A reference by hash and slot only.
    pub fn new(hash: BlockHash, slot: u64) -> Self {
        Self {
            hash: Some(hash),
            slot,
            height: None,
            timestamp: None,
        }
    }

    /// The point before the first block.
    pub fn origin() -> Self {
        Self {
            hash: None,
            slot: 0,
            height: None,
            timestamp: None,
        }
    }

    /// True for the point before the first block.
    pub fn is_origin(&self) -> bool {
        self.hash.is_none()
    }

    /// Parses a hex encoded hash.
    pub fn from_hex(hash: &str, slot: u64) -> Result<Self, Error> {
        Ok(Self::new(hash.parse()?, slot))
    }

    /// Sets the block number.
    pub fn with_height(mut self, height: u64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A block as returned by the sync service.
///
/// Each field is independently absent when the request's field mask left it out.
#[derive(Clone, Debug, Default, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Block {
    /// Header hash.
    hash: Option<BlockHash>,
    /// Absolute slot.
    slot: Option<u64>,
    /// Block number.
    height: Option<u64>,
    /// Unix timestamp.
    timestamp: Option<u64>,
    /// Chain native serialization.
    native_bytes: Option<Vec<u8>>,
    /// Server decoded block.
    parsed_state: ParsedState<cardano::Block>,
}

impl Block {
    pub(crate) fn from_parts(
        hash: Option<BlockHash>,
        slot: Option<u64>,
        height: Option<u64>,
        timestamp: Option<u64>,
        native_bytes: Option<Vec<u8>>,
        parsed_state: ParsedState<cardano::Block>,
    ) -> Self {
        Self {
            hash,
            slot,
            height,
            timestamp,
            native_bytes,
            parsed_state,
        }
    }

    /// The point this block sits at, when both hash and slot were returned.
    pub fn block_ref(&self) -> Option<BlockRef> {
        let hash = self.hash?;
        let slot = self.slot?;
        Some(BlockRef {
            hash: Some(hash),
            slot,
            height: self.height,
            timestamp: self.timestamp,
        })
    }
}

/// What happened at the tip.
#[derive(Clone, Debug, PartialEq)]
pub enum NextAction {
    /// A block was added on top of the current chain.
    Apply(Block),
    /// A block was rolled back.
    Undo(Block),
    /// The follower was moved to a new point; everything after it is void.
    Reset(BlockRef),
}

/// One event of a `FollowTip` subscription.
#[derive(Clone, Debug, PartialEq)]
pub struct NextResponse {
    /// The action the server reported.
    pub action: NextAction,
    /// The server's tip at the time of the event.
    pub tip: Option<BlockRef>,
}

impl NextResponse {
    /// The applied block, if this is an apply event.
    pub fn applied(&self) -> Option<&Block> {
        match &self.action {
            NextAction::Apply(block) => Some(block),
            _ => None,
        }
    }

    /// The rolled back block, if this is an undo event.
    pub fn undone(&self) -> Option<&Block> {
        match &self.action {
            NextAction::Undo(block) => Some(block),
            _ => None,
        }
    }

    /// The reset point, if this is a reset event.
    pub fn reset(&self) -> Option<&BlockRef> {
        match &self.action {
            NextAction::Reset(point) => Some(point),
            _ => None,
        }
    }
}

/// One page of `DumpHistory`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DumpHistoryResponse {
    /// Blocks in chain order.
    pub blocks: Vec<Block>,
    /// Where the next page starts; `None` once history is exhausted.
    pub next_token: Option<BlockRef>,
}
