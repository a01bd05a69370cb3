//! Channel construction.
//!
//! Builds the tonic [`Endpoint`] with timeouts, keepalive and (for `https`
//! targets) TLS, optionally presenting a client certificate. Channels are
//! created lazily: the first call establishes the connection, so building a
//! client never touches the network.

use std::time::Duration;

use clustermgr_core::error::ClientError;
use clustermgr_core::mtls::SslMaterial;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint, Identity};

use crate::transport::{TransportParams, host_with_default_port};

fn duration_to_i64_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Channel-level settings derived from [`TransportParams`].
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Full URI, scheme included.
    pub uri: String,

    /// Timeout for establishing the connection.
    pub connect_timeout: Duration,

    /// `user-agent` sent on the HTTP/2 connection.
    pub user_agent: String,

    /// Client certificate for mutual TLS.
    pub ssl: Option<SslMaterial>,
}

impl ChannelConfig {
    #[must_use]
    pub fn from_params(params: &TransportParams) -> Self {
        Self {
            uri: channel_uri(&params.host),
            connect_timeout: Duration::from_secs(10),
            user_agent: params.client_info.user_agent_string(),
            ssl: params.ssl.clone(),
        }
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// URI for a host: explicit `http://`/`https://` targets are kept as given,
/// bare hosts get `https://` and the default port.
#[must_use]
pub fn channel_uri(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_owned()
    } else {
        format!("https://{}", host_with_default_port(host))
    }
}

fn tls_config(ssl: Option<&SslMaterial>) -> ClientTlsConfig {
    let config = ClientTlsConfig::new().with_native_roots();
    match ssl {
        Some(ssl) => config.identity(Identity::from_pem(ssl.cert_chain_pem(), ssl.private_key_pem())),
        None => config,
    }
}

/// Build a tonic `Endpoint` with timeouts and keepalive settings.
///
/// Configures:
/// - Connect timeout
/// - TCP keepalive (30 seconds)
/// - HTTP/2 keepalive interval (30 seconds)
/// - Keepalive timeout (10 seconds)
/// - Keep alive while idle
/// - TLS with the platform roots for `https` URIs
///
/// Per-call deadlines are not set here; each call carries its own.
pub(crate) fn build_endpoint(cfg: &ChannelConfig) -> Result<Endpoint, ClientError> {
    let endpoint = Endpoint::from_shared(cfg.uri.clone())
        .map_err(|e| ClientError::configuration(format!("invalid endpoint '{}': {e}", cfg.uri)))?
        .connect_timeout(cfg.connect_timeout)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true)
        .user_agent(cfg.user_agent.clone())
        .map_err(|e| ClientError::configuration(format!("invalid user agent: {e}")))?;

    if endpoint.uri().scheme_str() != Some("https") {
        return Ok(endpoint);
    }

    endpoint
        .tls_config(tls_config(cfg.ssl.as_ref()))
        .map_err(|e| ClientError::MutualTls(format!("failed to configure TLS for '{}': {e}", cfg.uri)))
}

/// Create a lazily connecting channel.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// [`ClientError::Configuration`] for an invalid URI and
/// [`ClientError::MutualTls`] when TLS cannot be configured.
pub fn connect_lazy(cfg: &ChannelConfig) -> Result<Channel, ClientError> {
    let span = tracing::debug_span!("grpc_connect", uri = %cfg.uri);
    let _entered = span.enter();

    let endpoint = build_endpoint(cfg)?;
    let channel = endpoint.connect_lazy();

    tracing::info!(
        uri = %cfg.uri,
        mtls = cfg.ssl.is_some(),
        connect_timeout_ms = duration_to_i64_ms(cfg.connect_timeout),
        "gRPC channel configured"
    );
    Ok(channel)
}
