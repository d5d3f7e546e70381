//! Chain synchronization: tip, blocks, history and the tip following subscription.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use utxorpc_netutils::UnderlyingService;
use utxorpc_proto::sync::{self as wire, sync_service_client::SyncServiceClient};
use utxorpc_proto::FieldMask;

use super::stream::{open_stream, paginate, translate_stream, EventStream};
use crate::conversion::optional_block_ref;
use crate::error::Error;
use crate::models::{Block, BlockRef, DumpHistoryResponse, NextResponse};
use crate::ClientConfig;

/// Client for `SyncService`.
#[derive(Clone, Debug)]
pub struct SyncClient {
    inner: SyncServiceClient<UnderlyingService>,
}

impl SyncClient {
    /// Connects to the server in `config`.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_service(super::connect(config).await?))
    }

    /// Wraps an already open service.
    pub fn from_service(service: UnderlyingService) -> Self {
        Self {
            inner: SyncServiceClient::new(service),
        }
    }

    /// The server's current tip, `None` if it reported none.
    pub async fn read_tip(&self, field_mask: Option<FieldMask>) -> Result<Option<BlockRef>, Error> {
        tracing::debug!("ReadTip");
        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::ReadTipRequest { field_mask });
        let response = client.read_tip(request).await?.into_inner();

        optional_block_ref(response.tip)
    }

    /// Fetches one block, `None` if the server does not have it.
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// use utxorpc::models::BlockRef;
    /// use utxorpc::{ClientConfig, SyncClient};
    ///
    /// let client = SyncClient::connect(ClientConfig::from_server("localhost:50051")?).await?;
    /// let point = BlockRef::from_hex(
    ///     "6d1b288746ce3be63dcf68af9783282a0795c4d22eda4f5daef195f6034ccfc4",
    ///     84_194_200,
    /// )?;
    /// if let Some(block) = client.fetch_block(&point, None).await? {
    ///     println!("block {:?} at slot {:?}", block.hash(), block.slot());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_block(
        &self,
        point: &BlockRef,
        field_mask: Option<FieldMask>,
    ) -> Result<Option<Block>, Error> {
        let blocks = self.fetch_blocks(std::slice::from_ref(point), field_mask).await?;
        Ok(blocks.into_iter().next())
    }

    /// Fetches several blocks in one round trip, in the order the server returns them.
    pub async fn fetch_blocks(
        &self,
        points: &[BlockRef],
        field_mask: Option<FieldMask>,
    ) -> Result<Vec<Block>, Error> {
        tracing::debug!("FetchBlock for {} refs", points.len());
        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::FetchBlockRequest {
            r#ref: points.iter().map(wire::BlockRef::from).collect(),
            field_mask,
        });
        let response = client.fetch_block(request).await?.into_inner();

        response.block.into_iter().map(Block::try_from).collect()
    }

    /// One page of history starting at `start`, or at the origin when `start` is `None`.
    pub async fn dump_history(
        &self,
        start: Option<&BlockRef>,
        max_items: u32,
        field_mask: Option<FieldMask>,
    ) -> Result<DumpHistoryResponse, Error> {
        dump_history_page(
            self.inner.clone(),
            start.map(wire::BlockRef::from),
            max_items,
            field_mask,
        )
        .await
    }

    /// Every block from `start` onwards, fetched `page_size` blocks at a time.
    ///
    /// Ends once the server stops returning a next token.
    pub fn history(
        &self,
        start: Option<BlockRef>,
        page_size: u32,
        field_mask: Option<FieldMask>,
        cancel: CancellationToken,
    ) -> EventStream<Block> {
        let client = self.inner.clone();
        paginate(start, cancel, "DumpHistory", move |token: Option<BlockRef>| {
            let client = client.clone();
            let field_mask = field_mask.clone();
            async move {
                let page = dump_history_page(
                    client,
                    token.as_ref().map(wire::BlockRef::from),
                    page_size,
                    field_mask,
                )
                .await?;
                Ok((page.blocks, page.next_token))
            }
        })
    }

    /// Follows the tip starting from the first point in `intersect` the server knows.
    ///
    /// With an empty `intersect` the server picks the starting point. The first event is normally
    /// a reset to the intersection.
    pub async fn follow_tip(
        &self,
        intersect: &[BlockRef],
        field_mask: Option<FieldMask>,
        cancel: CancellationToken,
    ) -> Result<EventStream<NextResponse>, Error> {
        tracing::debug!("FollowTip from {} intersect refs", intersect.len());
        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::FollowTipRequest {
            intersect: intersect.iter().map(wire::BlockRef::from).collect(),
            field_mask,
        });

        match open_stream(&cancel, "FollowTip", client.follow_tip(request)).await? {
            Some(source) => Ok(translate_stream(
                source,
                cancel,
                "FollowTip",
                NextResponse::try_from,
            )),
            None => Ok(stream::empty().boxed()),
        }
    }
}

async fn dump_history_page(
    mut client: SyncServiceClient<UnderlyingService>,
    start_token: Option<wire::BlockRef>,
    max_items: u32,
    field_mask: Option<FieldMask>,
) -> Result<DumpHistoryResponse, Error> {
    tracing::debug!(
        "DumpHistory from slot {:?}, max {max_items}",
        start_token.as_ref().map(|token| token.slot)
    );
    let request = tonic::Request::new(wire::DumpHistoryRequest {
        start_token,
        max_items,
        field_mask,
    });
    let response = client.dump_history(request).await?.into_inner();

    DumpHistoryResponse::try_from(response)
}
