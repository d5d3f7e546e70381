//! Transaction submission and mempool tracking.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use utxorpc_netutils::UnderlyingService;
use utxorpc_proto::submit::{self as wire, submit_service_client::SubmitServiceClient};
use utxorpc_proto::FieldMask;

use super::stream::{open_stream, translate_stream, EventStream};
use crate::error::Error;
use crate::models::{SubmitTxResponse, TxoRef, WaitForTxResponse, WatchMempoolResponse};
use crate::predicate::Predicate;
use crate::ClientConfig;

/// Client for `SubmitService`.
#[derive(Clone, Debug)]
pub struct SubmitClient {
    inner: SubmitServiceClient<UnderlyingService>,
}

impl SubmitClient {
    /// Connects to the server in `config`.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_service(super::connect(config).await?))
    }

    /// Wraps an already open service.
    pub fn from_service(service: UnderlyingService) -> Self {
        Self {
            inner: SubmitServiceClient::new(service),
        }
    }

    /// Submits signed transactions in their chain native serialization.
    pub async fn submit_tx<I, T>(&self, txs: I) -> Result<SubmitTxResponse, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Vec<u8>>,
    {
        let tx = txs
            .into_iter()
            .map(|raw| wire::AnyChainTx {
                r#type: Some(wire::any_chain_tx::Type::Raw(raw.into())),
            })
            .collect::<Vec<_>>();
        tracing::debug!("SubmitTx with {} txs", tx.len());

        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::SubmitTxRequest { tx });
        let response = client.submit_tx(request).await?.into_inner();

        SubmitTxResponse::try_from(response)
    }

    /// Stage updates for the given transactions until the server closes the stream.
    ///
    /// Only the transaction hash of each ref is sent; output indexes are ignored, so
    /// [`TxoRef::tx`] is the usual way to build them.
    pub async fn wait_for_tx(
        &self,
        refs: &[TxoRef],
        cancel: CancellationToken,
    ) -> Result<EventStream<WaitForTxResponse>, Error> {
        tracing::debug!("WaitForTx for {} txs", refs.len());
        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::WaitForTxRequest {
            r#ref: refs.iter().map(|txo| txo.hash.to_vec()).collect(),
        });

        match open_stream(&cancel, "WaitForTx", client.wait_for_tx(request)).await? {
            Some(source) => Ok(translate_stream(
                source,
                cancel,
                "WaitForTx",
                WaitForTxResponse::try_from,
            )),
            None => Ok(stream::empty().boxed()),
        }
    }

    /// Mempool activity, optionally narrowed by `predicate`.
    pub async fn watch_mempool(
        &self,
        predicate: Option<&Predicate>,
        field_mask: Option<FieldMask>,
        cancel: CancellationToken,
    ) -> Result<EventStream<WatchMempoolResponse>, Error> {
        let predicate = predicate
            .map(Predicate::to_mempool_predicate)
            .transpose()?;
        tracing::debug!("WatchMempool (filtered: {})", predicate.is_some());

        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::WatchMempoolRequest {
            predicate,
            field_mask,
        });

        match open_stream(&cancel, "WatchMempool", client.watch_mempool(request)).await? {
            Some(source) => Ok(translate_stream(
                source,
                cancel,
                "WatchMempool",
                WatchMempoolResponse::try_from,
            )),
            None => Ok(stream::empty().boxed()),
        }
    }
}
