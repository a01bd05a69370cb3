//! Blocking cluster manager client.
//!
//! Same surface as the async client, over the `grpc` transport. Calls block
//! the current thread, so the client refuses to be built from inside an
//! async runtime.

use std::sync::Arc;

use clustermgr_core::coerce::coerce_request;
use clustermgr_core::endpoint::EndpointDecision;
use clustermgr_core::error::ClientError;
use clustermgr_core::options::ClientOptions;
use clustermgr_core::pager::{BlockingPageFetcher, BlockingPager};
use clustermgr_core::retry::CallOptions;
use clustermgr_core::routing::append_routing_header;
use clustermgr_transport_grpc::registry::TransportRegistry;
use clustermgr_transport_grpc::transport::BlockingClusterManagerTransport;
use clustermgr_transport_grpc::types::{ListUsableSubnetworksRequest, ListUsableSubnetworksResponse};
use tokio::runtime::Handle;

use crate::builder::ClientBuilder;

/// Pager returned by [`ClusterManagerClient::list_usable_subnetworks`].
pub type ListUsableSubnetworksPager =
    BlockingPager<ListUsableSubnetworksRequest, ListUsableSubnetworksResponse>;

/// Blocking client for the cluster manager service.
#[derive(Debug, Clone)]
pub struct ClusterManagerClient {
    transport: Arc<dyn BlockingClusterManagerTransport>,
    endpoint: EndpointDecision,
}

impl ClusterManagerClient {
    /// Build a client over the default `grpc` transport.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`](crate::builder::ClientBuilder).
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        Self::builder().options(options).build()
    }

    #[must_use]
    pub fn builder() -> ClientBuilder<dyn BlockingClusterManagerTransport> {
        ClientBuilder::new(TransportRegistry::shared_blocking())
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<dyn BlockingClusterManagerTransport> {
        &self.transport
    }

    #[must_use]
    pub fn endpoint(&self) -> &EndpointDecision {
        &self.endpoint
    }

    #[must_use]
    pub fn api_endpoint(&self) -> &str {
        self.transport.host()
    }
}

impl ClientBuilder<dyn BlockingClusterManagerTransport> {
    /// Resolve the endpoint and transport, then build the blocking client.
    ///
    /// # Errors
    ///
    /// [`ClientError::Usage`] when called from inside an async runtime;
    /// otherwise the same errors as the async builder.
    pub fn build(self) -> Result<ClusterManagerClient, ClientError> {
        if Handle::try_current().is_ok() {
            return Err(ClientError::usage(
                "the blocking client cannot be built inside an async runtime; use the async client",
            ));
        }

        let resolved = self.resolve()?;
        Ok(ClusterManagerClient {
            transport: resolved.transport,
            endpoint: resolved.endpoint,
        })
    }
}

macro_rules! blocking_method {
    (Unary, $op:ident, $rpc:literal, $req:ty => $resp:ty, $fields:ident) => {
        #[doc = concat!("Calls `", $rpc, "`, blocking until it completes.")]
        ///
        /// # Errors
        ///
        /// [`ClientError::Usage`] when `request` is combined with fields;
        /// otherwise the failure of the remote call after retries.
        pub fn $op(
            &self,
            request: Option<$req>,
            fields: crate::fields::$fields,
            options: CallOptions,
        ) -> Result<$resp, ClientError> {
            let request = coerce_request(request, fields)?;
            let method = self.transport.wrapped_methods().get(stringify!($op))?;
            let transport: &dyn BlockingClusterManagerTransport = self.transport.as_ref();
            method.call_blocking(request, options, |req, ctx| transport.$op(req, ctx))
        }
    };
    (Empty, $op:ident, $rpc:literal, $req:ty => $resp:ty, $fields:ident) => {
        blocking_method!(Unary, $op, $rpc, $req => $resp, $fields);
    };
    (Paged, $op:ident, $rpc:literal, $req:ty => $resp:ty, $fields:ident) => {
        #[doc = concat!("Calls `", $rpc, "` and returns a blocking pager over the results.")]
        ///
        /// # Errors
        ///
        /// [`ClientError::Usage`] when `request` is combined with fields;
        /// otherwise the failure of the first page call.
        pub fn $op(
            &self,
            request: Option<$req>,
            fields: crate::fields::$fields,
            options: CallOptions,
        ) -> Result<BlockingPager<$req, $resp>, ClientError> {
            let request = coerce_request(request, fields)?;
            let method = self.transport.wrapped_methods().get(stringify!($op))?.clone();
            let mut metadata = options.metadata.clone();
            append_routing_header(&request, &mut metadata);

            let transport: &dyn BlockingClusterManagerTransport = self.transport.as_ref();
            let first =
                method.call_blocking(request.clone(), options.clone(), |req, ctx| transport.$op(req, ctx))?;

            let transport = Arc::clone(&self.transport);
            let fetcher: BlockingPageFetcher<$req, $resp> = Arc::new(move |req: $req| {
                method.call_blocking(req, options.clone(), |req, ctx| transport.$op(req, ctx))
            });

            Ok(BlockingPager::new(fetcher, request, first, metadata))
        }
    };
}

macro_rules! client_methods {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        impl ClusterManagerClient {
            $( blocking_method!($shape, $op, $rpc, $req => $resp, $fields); )*
        }
    };
}

clustermgr_transport_grpc::for_each_operation!(client_methods);
