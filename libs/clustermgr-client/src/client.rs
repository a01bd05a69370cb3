//! Async cluster manager client.

use std::sync::Arc;

use clustermgr_core::coerce::coerce_request;
use clustermgr_core::endpoint::EndpointDecision;
use clustermgr_core::error::ClientError;
use clustermgr_core::options::ClientOptions;
use clustermgr_core::pager::{PageFetcher, PageFuture, Pager};
use clustermgr_core::retry::CallOptions;
use clustermgr_core::routing::append_routing_header;
use clustermgr_transport_grpc::registry::TransportRegistry;
use clustermgr_transport_grpc::transport::ClusterManagerTransport;
use clustermgr_transport_grpc::types::{ListUsableSubnetworksRequest, ListUsableSubnetworksResponse};

use crate::builder::ClientBuilder;

/// Pager returned by [`ClusterManagerClient::list_usable_subnetworks`].
pub type ListUsableSubnetworksPager = Pager<ListUsableSubnetworksRequest, ListUsableSubnetworksResponse>;

/// Async client for the cluster manager service.
///
/// Cheap to clone; clones share the transport.
#[derive(Debug, Clone)]
pub struct ClusterManagerClient {
    transport: Arc<dyn ClusterManagerTransport>,
    endpoint: EndpointDecision,
}

impl ClusterManagerClient {
    /// Build a client over the default `grpc_asyncio` transport.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`](crate::builder::ClientBuilder).
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        Self::builder().options(options).build()
    }

    #[must_use]
    pub fn builder() -> ClientBuilder<dyn ClusterManagerTransport> {
        ClientBuilder::new(TransportRegistry::shared_async())
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn ClusterManagerTransport> {
        &self.transport
    }

    /// Endpoint chosen at construction.
    #[must_use]
    pub fn endpoint(&self) -> &EndpointDecision {
        &self.endpoint
    }

    /// Hostname the transport talks to.
    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        self.transport.host()
    }
}

impl ClientBuilder<dyn ClusterManagerTransport> {
    /// Resolve the endpoint and transport, then build the client.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Usage`] for a prebuilt transport combined with
    ///   credential options, or an invalid environment directive
    /// - [`ClientError::MutualTls`] when an explicit client certificate
    ///   source fails
    /// - [`ClientError::UnknownTransport`] for an unregistered label
    /// - any error of the transport factory
    pub fn build(self) -> Result<ClusterManagerClient, ClientError> {
        let resolved = self.resolve()?;
        Ok(ClusterManagerClient {
            transport: resolved.transport,
            endpoint: resolved.endpoint,
        })
    }
}

macro_rules! async_method {
    (Unary, $op:ident, $rpc:literal, $req:ty => $resp:ty, $fields:ident) => {
        #[doc = concat!("Calls `", $rpc, "`.")]
        ///
        /// Pass either `request` or flattened `fields`, not both.
        ///
        /// # Errors
        ///
        /// [`ClientError::Usage`] when `request` is combined with fields;
        /// otherwise the failure of the remote call after retries.
        pub async fn $op(
            &self,
            request: Option<$req>,
            fields: crate::fields::$fields,
            options: CallOptions,
        ) -> Result<$resp, ClientError> {
            let request = coerce_request(request, fields)?;
            let method = self.transport.wrapped_methods().get(stringify!($op))?;
            let transport: &dyn ClusterManagerTransport = self.transport.as_ref();
            method
                .call(request, options, move |req, ctx| transport.$op(req, ctx))
                .await
        }
    };
    (Empty, $op:ident, $rpc:literal, $req:ty => $resp:ty, $fields:ident) => {
        async_method!(Unary, $op, $rpc, $req => $resp, $fields);
    };
    (Paged, $op:ident, $rpc:literal, $req:ty => $resp:ty, $fields:ident) => {
        #[doc = concat!("Calls `", $rpc, "` and returns a pager over the results.")]
        ///
        /// The first page is fetched before returning. Later pages are
        /// requested with the same options as the first.
        ///
        /// # Errors
        ///
        /// [`ClientError::Usage`] when `request` is combined with fields;
        /// otherwise the failure of the first page call.
        pub async fn $op(
            &self,
            request: Option<$req>,
            fields: crate::fields::$fields,
            options: CallOptions,
        ) -> Result<Pager<$req, $resp>, ClientError> {
            let request = coerce_request(request, fields)?;
            let method = self.transport.wrapped_methods().get(stringify!($op))?.clone();
            let mut metadata = options.metadata.clone();
            append_routing_header(&request, &mut metadata);

            let transport: &dyn ClusterManagerTransport = self.transport.as_ref();
            let first = method
                .call(request.clone(), options.clone(), move |req, ctx| transport.$op(req, ctx))
                .await?;

            let transport = Arc::clone(&self.transport);
            let fetcher: PageFetcher<$req, $resp> = Arc::new(move |req: $req| -> PageFuture<$resp> {
                let transport = Arc::clone(&transport);
                let method = method.clone();
                let options = options.clone();
                Box::pin(async move {
                    method
                        .call(req, options, |req, ctx| transport.$op(req, ctx))
                        .await
                })
            });

            Ok(Pager::new(fetcher, request, first, metadata))
        }
    };
}

macro_rules! client_methods {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        impl ClusterManagerClient {
            $( async_method!($shape, $op, $rpc, $req => $resp, $fields); )*
        }
    };
}

clustermgr_transport_grpc::for_each_operation!(client_methods);
