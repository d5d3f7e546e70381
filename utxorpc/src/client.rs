//! Service clients.
//!
//! Each client owns one channel, opened when it is connected. Calls take `&self` and work on a
//! clone of the underlying tonic client, so a client can be shared between tasks and a stream can
//! outlive the call that opened it.

use utxorpc_netutils::{GrpcConnector, UnderlyingService};

use crate::error::Error;
use crate::ClientConfig;

pub mod query;
pub mod stream;
pub mod submit;
pub mod sync;
pub mod watch;

pub use query::QueryClient;
pub use stream::EventStream;
pub use submit::SubmitClient;
pub use sync::SyncClient;
pub use watch::WatchClient;

pub(crate) async fn connect(config: ClientConfig) -> Result<UnderlyingService, Error> {
    Ok(GrpcConnector::new(config).connect().await?)
}

/// All four service clients against one server.
#[derive(Clone, Debug)]
pub struct UtxorpcClient {
    /// Chain synchronization.
    pub sync: SyncClient,
    /// Ledger queries.
    pub query: QueryClient,
    /// Submission and mempool tracking.
    pub submit: SubmitClient,
    /// Transaction watching.
    pub watch: WatchClient,
}

impl UtxorpcClient {
    /// Opens a single channel from `config` and shares it between the four clients.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        let service = connect(config).await?;
        Ok(Self::from_service(service))
    }

    /// Builds the clients on an already open service.
    pub fn from_service(service: UnderlyingService) -> Self {
        Self {
            sync: SyncClient::from_service(service.clone()),
            query: QueryClient::from_service(service.clone()),
            submit: SubmitClient::from_service(service.clone()),
            watch: WatchClient::from_service(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use tonic::service::interceptor::InterceptedService;
    use tonic::transport::Endpoint;
    use utxorpc_netutils::HeaderInterceptor;

    use super::*;
    use crate::models::{Hash32, TxoRef};
    use crate::predicate::{Predicate, RawPattern};
    use crate::{CancellationToken, PredicateError};

    // nothing listens on the discard port, so any request that reaches the wire fails with a status
    fn offline() -> UtxorpcClient {
        let channel = Endpoint::from_static("http://127.0.0.1:9").connect_lazy();
        UtxorpcClient::from_service(InterceptedService::new(
            channel,
            HeaderInterceptor::default(),
        ))
    }

    #[tokio::test]
    async fn connect_failure_is_reported() {
        let config = ClientConfig::from_server("127.0.0.1:9").unwrap();
        assert!(matches!(
            UtxorpcClient::connect(config).await,
            Err(Error::Connect(_))
        ));
    }

    #[tokio::test]
    async fn transaction_level_key_fails_before_sending() {
        let key = TxoRef::tx(Hash32::new([1; 32]));
        let result = offline().query.read_utxos(&[key], None).await;
        assert!(matches!(result, Err(Error::MissingOutputIndex(_))));
    }

    #[tokio::test]
    async fn transaction_level_key_is_sent_when_waiting() {
        let key = TxoRef::tx(Hash32::new([1; 32]));
        let result = offline()
            .submit
            .wait_for_tx(&[key], CancellationToken::new())
            .await;
        // the request reached the transport, so the failure is a status
        assert!(result.err().and_then(|error| error.status_code()).is_some());
    }

    #[tokio::test]
    async fn untranslatable_predicate_fails_before_sending() {
        let predicate = Predicate::Pattern(RawPattern::new());
        let client = offline();

        let search = client.query.search_utxos(&predicate, None, 10, None).await;
        assert!(matches!(search, Err(Error::Predicate(PredicateError::Unsupported { .. }))));

        let mempool = client
            .submit
            .watch_mempool(Some(&predicate), None, CancellationToken::new())
            .await;
        assert!(matches!(mempool, Err(Error::Predicate(_))));

        let pages = client
            .query
            .search_utxos_pages(&predicate, 10, None, CancellationToken::new());
        assert!(matches!(pages, Err(Error::Predicate(_))));
    }

    #[tokio::test]
    async fn unreachable_server_surfaces_a_status() {
        let result = offline().sync.read_tip(None).await;
        assert!(result.unwrap_err().status_code().is_some());
    }
}
