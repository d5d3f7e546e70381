//! Ledger state queries.

use tokio_util::sync::CancellationToken;
use utxorpc_netutils::UnderlyingService;
use utxorpc_proto::query::{self as wire, query_service_client::QueryServiceClient};
use utxorpc_proto::FieldMask;

use super::stream::{paginate, EventStream};
use crate::error::Error;
use crate::models::{
    AnyUtxoData, ReadParamsResponse, ReadUtxosResponse, SearchUtxosResponse, TxoRef,
};
use crate::predicate::Predicate;
use crate::ClientConfig;

/// Client for `QueryService`.
#[derive(Clone, Debug)]
pub struct QueryClient {
    inner: QueryServiceClient<UnderlyingService>,
}

impl QueryClient {
    /// Connects to the server in `config`.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_service(super::connect(config).await?))
    }

    /// Wraps an already open service.
    pub fn from_service(service: UnderlyingService) -> Self {
        Self {
            inner: QueryServiceClient::new(service),
        }
    }

    /// Protocol parameters at the server's ledger tip.
    pub async fn read_params(
        &self,
        field_mask: Option<FieldMask>,
    ) -> Result<ReadParamsResponse, Error> {
        tracing::debug!("ReadParams");
        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::ReadParamsRequest { field_mask });
        let response = client.read_params(request).await?.into_inner();

        ReadParamsResponse::try_from(response)
    }

    /// Looks up specific outputs. Unknown outputs are simply missing from the answer.
    ///
    /// Every key needs an output index; a transaction level [`TxoRef`] is rejected before anything
    /// is sent.
    pub async fn read_utxos(
        &self,
        keys: &[TxoRef],
        field_mask: Option<FieldMask>,
    ) -> Result<ReadUtxosResponse, Error> {
        let keys = keys
            .iter()
            .map(wire::TxoRef::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("ReadUtxos for {} keys", keys.len());

        let mut client = self.inner.clone();
        let request = tonic::Request::new(wire::ReadUtxosRequest { keys, field_mask });
        let response = client.read_utxos(request).await?.into_inner();

        ReadUtxosResponse::try_from(response)
    }

    /// One page of outputs matching `predicate`.
    ///
    /// `max_items` of zero leaves the page size to the server. Pass the previous page's
    /// `next_token` as `start_token` to continue.
    pub async fn search_utxos(
        &self,
        predicate: &Predicate,
        start_token: Option<String>,
        max_items: u32,
        field_mask: Option<FieldMask>,
    ) -> Result<SearchUtxosResponse, Error> {
        let predicate = predicate.to_utxo_predicate()?;
        search_page(
            self.inner.clone(),
            predicate,
            start_token,
            max_items,
            field_mask,
        )
        .await
    }

    /// Every output matching `predicate`, walking pages of `page_size`.
    ///
    /// The predicate is translated up front, so an untranslatable one fails here rather than on
    /// the first item.
    pub fn search_utxos_pages(
        &self,
        predicate: &Predicate,
        page_size: u32,
        field_mask: Option<FieldMask>,
        cancel: CancellationToken,
    ) -> Result<EventStream<AnyUtxoData>, Error> {
        let predicate = predicate.to_utxo_predicate()?;
        let client = self.inner.clone();

        Ok(paginate(None, cancel, "SearchUtxos", move |token: Option<String>| {
            let client = client.clone();
            let predicate = predicate.clone();
            let field_mask = field_mask.clone();
            async move {
                let page = search_page(client, predicate, token, page_size, field_mask).await?;
                Ok((page.items, page.next_token))
            }
        }))
    }
}

async fn search_page(
    mut client: QueryServiceClient<UnderlyingService>,
    predicate: wire::UtxoPredicate,
    start_token: Option<String>,
    max_items: u32,
    field_mask: Option<FieldMask>,
) -> Result<SearchUtxosResponse, Error> {
    tracing::debug!(
        "SearchUtxos from token {:?}, max {max_items}",
        start_token.as_deref()
    );
    let request = tonic::Request::new(wire::SearchUtxosRequest {
        predicate: Some(predicate),
        field_mask,
        max_items: i32::try_from(max_items).unwrap_or(i32::MAX),
        start_token: start_token.unwrap_or_default(),
    });
    let response = client.search_utxos(request).await?.into_inner();

    SearchUtxosResponse::try_from(response)
}
