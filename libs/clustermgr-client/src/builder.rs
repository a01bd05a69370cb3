//! Client construction.
//!
//! Resolution happens once, in this order: transport/credential conflicts,
//! environment directives, client certificate, endpoint, transport.

use std::fmt;
use std::sync::Arc;

use clustermgr_core::endpoint::{EndpointDecision, resolve_endpoint};
use clustermgr_core::env::MtlsEnvironment;
use clustermgr_core::error::ClientError;
use clustermgr_core::mtls::{AmbientCertProbe, ContextAwareMetadataProbe, materialize};
use clustermgr_core::options::ClientOptions;
use clustermgr_transport_grpc::registry::{TransportRegistry, TransportSelector};
use clustermgr_transport_grpc::transport::TransportParams;

/// Regular service hostname.
pub const DEFAULT_ENDPOINT: &str = "container.googleapis.com";

/// Mutual-TLS service hostname.
pub const DEFAULT_MTLS_ENDPOINT: &str = "container.mtls.googleapis.com";

/// Builder shared by the async and blocking clients.
///
/// `T` is the transport capability of the client being built.
pub struct ClientBuilder<T: ?Sized> {
    options: ClientOptions,
    transport: TransportSelector<T>,
    registry: Arc<TransportRegistry<T>>,
    environment: Option<MtlsEnvironment>,
    ambient: Arc<dyn AmbientCertProbe>,
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ClientBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("transport", &self.transport)
            .field("registry", &self.registry)
            .field("environment", &self.environment)
            .field("ambient", &self.ambient)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`ClientBuilder::resolve`].
pub(crate) struct Resolved<T: ?Sized> {
    pub(crate) transport: Arc<T>,
    pub(crate) endpoint: EndpointDecision,
}

impl<T: ?Sized> ClientBuilder<T> {
    /// Builder resolving labels against `registry`.
    #[must_use]
    pub fn new(registry: Arc<TransportRegistry<T>>) -> Self {
        Self {
            options: ClientOptions::default(),
            transport: TransportSelector::Default,
            registry,
            environment: None,
            ambient: Arc::new(ContextAwareMetadataProbe::default()),
        }
    }

    #[must_use]
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Transport label or prebuilt transport.
    #[must_use]
    pub fn transport(mut self, selector: impl Into<TransportSelector<T>>) -> Self {
        self.transport = selector.into();
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<TransportRegistry<T>>) -> Self {
        self.registry = registry;
        self
    }

    /// Use these directives instead of reading the process environment.
    #[must_use]
    pub fn environment(mut self, environment: MtlsEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    #[must_use]
    pub fn ambient_cert_probe(mut self, probe: Arc<dyn AmbientCertProbe>) -> Self {
        self.ambient = probe;
        self
    }

    pub(crate) fn resolve(self) -> Result<Resolved<T>, ClientError> {
        let Self {
            options,
            transport,
            registry,
            environment,
            ambient,
        } = self;

        if transport.is_prebuilt() && options.has_credential_options() {
            return Err(ClientError::usage(
                "When providing a transport instance, provide its credentials directly.",
            ));
        }

        let environment = environment.unwrap_or_else(MtlsEnvironment::from_process_env);
        let use_client_cert = environment.use_client_certificate()?;
        let mtls = materialize(use_client_cert, options.client_cert_source.as_ref(), ambient.as_ref())?;

        let endpoint = resolve_endpoint(
            DEFAULT_ENDPOINT,
            options.api_endpoint.as_deref(),
            environment.use_mtls_endpoint.as_deref(),
            mtls.is_mtls,
        )?;

        let ssl = mtls.ssl;
        let host = endpoint.endpoint.clone();
        let transport = registry.resolve(transport, || Ok(TransportParams::from_options(host, &options, ssl)))?;

        tracing::debug!(endpoint = %endpoint.endpoint, is_mtls = endpoint.is_mtls, "client resolved");
        Ok(Resolved { transport, endpoint })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use clustermgr_core::endpoint::default_mtls_endpoint;

    #[test]
    fn mtls_constant_matches_conversion() {
        assert_eq!(default_mtls_endpoint(DEFAULT_ENDPOINT), DEFAULT_MTLS_ENDPOINT);
    }
}
