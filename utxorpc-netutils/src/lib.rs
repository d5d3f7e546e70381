//! Channel construction for UTxO RPC clients.
//!
//! Every service client runs over an [`UnderlyingService`]: a tonic [`Channel`] wrapped with a
//! [`HeaderInterceptor`] that stamps the configured static headers onto each call.

#![warn(missing_docs)]

use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

pub use utxorpc_config::ClientConfig;

/// The service every generated client is instantiated with.
pub type UnderlyingService = InterceptedService<Channel, HeaderInterceptor>;

#[allow(missing_docs)] // error types document themselves
#[derive(Debug, thiserror::Error)]
pub enum GetClientError {
    #[error("bad config: {0}")]
    Config(#[from] utxorpc_config::ConfigError),
    #[error("invalid metadata key {0:?}")]
    InvalidMetadataKey(String),
    #[error("invalid metadata value for {0:?}")]
    InvalidMetadataValue(String),
    #[error("transport: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Attaches a fixed set of metadata entries to every outgoing request.
#[derive(Clone, Debug, Default)]
pub struct HeaderInterceptor {
    headers: Vec<(MetadataKey<Ascii>, MetadataValue<Ascii>)>,
}

impl HeaderInterceptor {
    /// Parses `headers` into gRPC metadata.
    pub fn new(headers: &[(String, String)]) -> Result<Self, GetClientError> {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                let key = MetadataKey::<Ascii>::from_bytes(name.as_bytes())
                    .map_err(|_| GetClientError::InvalidMetadataKey(name.clone()))?;
                let value = value
                    .parse::<MetadataValue<Ascii>>()
                    .map_err(|_| GetClientError::InvalidMetadataValue(name.clone()))?;
                Ok((key, value))
            })
            .collect::<Result<Vec<_>, GetClientError>>()?;

        Ok(Self { headers })
    }

    /// Number of headers attached per call.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// True when no headers are attached.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl tonic::service::Interceptor for HeaderInterceptor {
    fn call(
        &mut self,
        mut request: tonic::Request<()>,
    ) -> Result<tonic::Request<()>, tonic::Status> {
        let metadata = request.metadata_mut();
        for (key, value) in &self.headers {
            metadata.insert(key.clone(), value.clone());
        }

        Ok(request)
    }
}

/// Opens channels to the server named in a [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct GrpcConnector {
    config: ClientConfig,
}

impl GrpcConnector {
    /// Connector for `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// The config this connector was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self) -> Result<Endpoint, GetClientError> {
        self.config.validate()?;
        let endpoint = Endpoint::from(self.config.server_uri.clone());
        if self.config.use_tls() {
            let tls = ClientTlsConfig::new().with_webpki_roots();
            Ok(endpoint.tls_config(tls)?)
        } else {
            Ok(endpoint)
        }
    }

    /// Connects eagerly and returns the intercepted channel.
    pub async fn connect(&self) -> Result<UnderlyingService, GetClientError> {
        let interceptor = HeaderInterceptor::new(&self.config.headers)?;
        let endpoint = self.endpoint()?;
        tracing::debug!(
            "connecting to {} (tls: {})",
            self.config.server_uri,
            self.config.use_tls()
        );
        let channel = endpoint.connect().await?;

        Ok(InterceptedService::new(channel, interceptor))
    }
}
