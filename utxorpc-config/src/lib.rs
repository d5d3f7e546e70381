#![warn(missing_docs)]
//! Client configuration: which server to talk to and which static headers every call carries.

use http::header::{HeaderName, HeaderValue};
use http::Uri;

/// Server used when no address is supplied.
pub const DEFAULT_SERVER: &str = "http://localhost:50051";

/// Header carrying the API key expected by hosted providers.
pub const API_KEY_HEADER: &str = "dmtr-api-key";

/// Environment variable read by [`ClientConfig::from_env`] for the server address.
pub const SERVER_URL_ENV: &str = "UTXORPC_URL";

/// Environment variable read by [`ClientConfig::from_env`] for the API key.
pub const API_KEY_ENV: &str = "UTXORPC_API_KEY";

#[allow(missing_docs)] // error types document themselves
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid server uri {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        source: http::uri::InvalidUri,
    },
    #[error("unsupported uri scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("server uri {0} has no host")]
    MissingHost(String),
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),
    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),
}

/// Builds the server uri from user input, falling back to [`DEFAULT_SERVER`].
///
/// A bare `host:port` gets an `http://` scheme so plaintext local servers work without ceremony.
pub fn construct_server_uri(server: Option<String>) -> Result<Uri, ConfigError> {
    let server = match server {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => DEFAULT_SERVER.to_string(),
    };
    let server = if server.contains("://") {
        server
    } else {
        format!("http://{server}")
    };

    server.parse::<Uri>().map_err(|source| ConfigError::InvalidUri {
        uri: server.clone(),
        source,
    })
}

/// Connection settings shared by every service client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Address of the UTxO RPC server.
    pub server_uri: Uri,
    /// Static headers attached to every call, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_uri: Uri::from_static(DEFAULT_SERVER),
            headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Config for `server_uri` with no headers.
    pub fn new(server_uri: Uri) -> Self {
        Self {
            server_uri,
            headers: Vec::new(),
        }
    }

    /// Parses `server` with [`construct_server_uri`].
    pub fn from_server(server: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::new(construct_server_uri(Some(server.into()))?))
    }

    /// Reads [`SERVER_URL_ENV`] and [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(construct_server_uri(lookup(SERVER_URL_ENV))?);
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|key| !key.is_empty()) {
            config = config.with_api_key(api_key);
        }
        config.validate()?;
        log::info!(
            "loaded client config for {} with {} header(s)",
            config.server_uri,
            config.headers.len()
        );

        Ok(config)
    }

    /// Appends a static header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends the [`API_KEY_HEADER`] header.
    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        self.with_header(API_KEY_HEADER, api_key)
    }

    /// True when the server must be reached over TLS.
    pub fn use_tls(&self) -> bool {
        self.server_uri.scheme_str() == Some("https")
    }

    /// Checks the uri scheme and that every header is representable as gRPC metadata.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.server_uri.scheme_str() {
            Some("http") | Some("https") => {}
            Some(other) => return Err(ConfigError::UnsupportedScheme(other.to_string())),
            None => return Err(ConfigError::UnsupportedScheme(String::new())),
        }
        if self.server_uri.host().is_none() {
            return Err(ConfigError::MissingHost(self.server_uri.to_string()));
        }
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeaderName(name.clone()))?;
            HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeaderValue(name.clone()))?;
        }

        Ok(())
    }
}
