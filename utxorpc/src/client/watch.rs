//! Transaction watching along the followed chain.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use utxorpc_netutils::UnderlyingService;
use utxorpc_proto::watch::{self as wire, watch_service_client::WatchServiceClient};
use utxorpc_proto::FieldMask;

use super::stream::{open_stream, translate_stream, EventStream};
use crate::error::Error;
use crate::models::{BlockRef, WatchTxResponse};
use crate::predicate::Predicate;
use crate::ClientConfig;

/// Client for `WatchService`.
#[derive(Clone, Debug)]
pub struct WatchClient {
    inner: WatchServiceClient<UnderlyingService>,
}

impl WatchClient {
    /// Connects to the server in `config`.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_service(super::connect(config).await?))
    }

    /// Wraps an already open service.
    pub fn from_service(service: UnderlyingService) -> Self {
        Self {
            inner: WatchServiceClient::new(service),
        }
    }

    /// Transactions matching `predicate` as blocks are applied and rolled back.
    ///
    /// `intersect` works as in [`super::SyncClient::follow_tip`].
    pub async fn watch_tx(
        &self,
        predicate: Option<&Predicate>,
        intersect: &[BlockRef],
        field_mask: Option<FieldMask>,
        cancel: CancellationToken,
    ) -> Result<EventStream<WatchTxResponse>, Error> {
        let predicate = predicate.map(Predicate::to_watch_predicate).transpose()?;
        tracing::debug!(
            "WatchTx from {} intersect refs (filtered: {})",
            intersect.len(),
            predicate.is_some()
        );

        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::WatchTxRequest {
            predicate,
            field_mask,
            intersect: intersect.iter().map(wire::BlockRef::from).collect(),
        });

        match open_stream(&cancel, "WatchTx", client.watch_tx(request)).await? {
            Some(source) => Ok(translate_stream(
                source,
                cancel,
                "WatchTx",
                WatchTxResponse::try_from,
            )),
            None => Ok(stream::empty().boxed()),
        }
    }
}
