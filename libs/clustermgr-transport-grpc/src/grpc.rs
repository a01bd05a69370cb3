//! Non-blocking tonic transport (`grpc_asyncio`).

use std::sync::Arc;

use async_trait::async_trait;
use clustermgr_core::auth::CredentialsProvider;
use clustermgr_core::error::ClientError;
use clustermgr_core::invoker::CallContext;
use http::uri::PathAndQuery;
use tonic::Status;
use tonic::metadata::{AsciiMetadataKey, AsciiMetadataValue, MetadataMap};
use tonic::transport::Channel;

use crate::channel::{ChannelConfig, connect_lazy};
use crate::operations::WrappedMethods;
use crate::transport::{ClusterManagerTransport, TransportParams};

/// Library identification metadata key.
pub const API_CLIENT_HEADER: &str = "x-goog-api-client";

/// Quota project metadata key.
pub const QUOTA_PROJECT_HEADER: &str = "x-goog-user-project";

/// Metadata attached to every outgoing call.
#[derive(Debug, Clone)]
pub(crate) struct CallMetadata {
    credentials: Option<Arc<dyn CredentialsProvider>>,
    scopes: Vec<String>,
    quota_project_id: Option<String>,
    api_client: String,
}

impl CallMetadata {
    pub(crate) fn from_params(params: &TransportParams) -> Result<Self, ClientError> {
        Ok(Self {
            credentials: params.resolve_credentials()?,
            scopes: params.effective_scopes(),
            quota_project_id: params.quota_project_id.clone(),
            api_client: params.client_info.api_client_header(),
        })
    }

    /// Decorate `request` with caller, library, quota and credential
    /// metadata, and set its deadline.
    pub(crate) async fn apply<T>(&self, request: &mut tonic::Request<T>, ctx: &CallContext) -> Result<(), Status> {
        let credential_headers = match &self.credentials {
            Some(credentials) => credentials
                .call_headers(&self.scopes)
                .await
                .map_err(|e| Status::unauthenticated(e.to_string()))?,
            None => Vec::new(),
        };

        let metadata = request.metadata_mut();
        for (key, value) in &ctx.metadata {
            append(metadata, key, value)?;
        }
        append(metadata, API_CLIENT_HEADER, &self.api_client)?;
        if let Some(project) = &self.quota_project_id {
            append(metadata, QUOTA_PROJECT_HEADER, project)?;
        }
        for header in &credential_headers {
            append(metadata, header.key, header.expose())?;
        }

        if let Some(timeout) = ctx.timeout {
            request.set_timeout(timeout);
        }
        Ok(())
    }
}

fn append(metadata: &mut MetadataMap, key: &str, value: &str) -> Result<(), Status> {
    let name = AsciiMetadataKey::from_bytes(key.as_bytes())
        .map_err(|e| Status::invalid_argument(format!("invalid metadata key '{key}': {e}")))?;
    let value = AsciiMetadataValue::try_from(value)
        .map_err(|e| Status::invalid_argument(format!("invalid metadata value for '{key}': {e}")))?;
    metadata.append(name, value);
    Ok(())
}

/// Transport over an asynchronous tonic channel.
///
/// Cloning is cheap and clones share the channel.
#[derive(Debug, Clone)]
pub struct GrpcAsyncioTransport {
    host: String,
    channel: Channel,
    metadata: CallMetadata,
    methods: WrappedMethods,
}

impl GrpcAsyncioTransport {
    /// Registry label.
    pub const LABEL: &'static str = "grpc_asyncio";

    /// Build the transport with a lazily connecting channel.
    ///
    /// # Errors
    ///
    /// [`ClientError::Usage`] for conflicting credential options,
    /// [`ClientError::Configuration`] outside a tokio runtime or for an
    /// invalid host, [`ClientError::MutualTls`] when TLS setup fails.
    pub fn new(params: &TransportParams) -> Result<Self, ClientError> {
        let metadata = CallMetadata::from_params(params)?;
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(ClientError::configuration(
                "the grpc_asyncio transport must be created inside a tokio runtime",
            ));
        }
        let channel = connect_lazy(&ChannelConfig::from_params(params))?;
        Ok(Self::assemble(params, channel, metadata))
    }

    /// Build the transport over an existing channel.
    ///
    /// # Errors
    ///
    /// [`ClientError::Usage`] for conflicting credential options.
    pub fn with_channel(params: &TransportParams, channel: Channel) -> Result<Self, ClientError> {
        let metadata = CallMetadata::from_params(params)?;
        Ok(Self::assemble(params, channel, metadata))
    }

    fn assemble(params: &TransportParams, channel: Channel, metadata: CallMetadata) -> Self {
        Self {
            host: params.target(),
            channel,
            metadata,
            methods: WrappedMethods::defaults(),
        }
    }

    /// Replace the wrapped-method defaults.
    #[must_use]
    pub fn with_wrapped_methods(mut self, methods: WrappedMethods) -> Self {
        self.methods = methods;
        self
    }

    #[must_use]
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    async fn unary<Req, Resp>(&self, path: &'static str, request: Req, ctx: CallContext) -> Result<Resp, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + 'static,
    {
        let mut request = tonic::Request::new(request);
        self.metadata.apply(&mut request, &ctx).await?;

        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("service was not ready: {e}")))?;

        let codec = tonic_prost::ProstCodec::<Req, Resp>::default();
        grpc.unary(request, PathAndQuery::from_static(path), codec)
            .await
            .map(tonic::Response::into_inner)
    }
}

macro_rules! impl_grpc_asyncio_transport {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        #[async_trait]
        impl ClusterManagerTransport for GrpcAsyncioTransport {
            fn host(&self) -> &str {
                &self.host
            }

            fn wrapped_methods(&self) -> &WrappedMethods {
                &self.methods
            }

            $(
                async fn $op(&self, request: $req, ctx: CallContext) -> Result<$resp, Status> {
                    self.unary(
                        concat!("/google.container.v1beta1.ClusterManager/", $rpc),
                        request,
                        ctx,
                    )
                    .await
                }
            )*
        }
    };
}

crate::for_each_operation!(impl_grpc_asyncio_transport);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use clustermgr_core::auth::AccessTokenCredentials;
    use std::time::Duration;

    fn params() -> TransportParams {
        TransportParams::new("http://127.0.0.1:1")
            .with_credentials(Arc::new(AccessTokenCredentials::new("ya29.secret")))
            .with_quota_project_id("billing-project")
    }

    #[tokio::test]
    async fn metadata_carries_caller_library_quota_and_auth() {
        let metadata = CallMetadata::from_params(&params()).unwrap();
        let ctx = CallContext {
            metadata: vec![
                ("x-trace".to_owned(), "abc".to_owned()),
                ("x-goog-request-params".to_owned(), "name=n".to_owned()),
            ],
            timeout: Some(Duration::from_secs(20)),
        };

        let mut request = tonic::Request::new(());
        metadata.apply(&mut request, &ctx).await.unwrap();

        let md = request.metadata();
        assert_eq!(md.get("x-trace").unwrap(), "abc");
        assert_eq!(md.get("x-goog-request-params").unwrap(), "name=n");
        assert_eq!(md.get(QUOTA_PROJECT_HEADER).unwrap(), "billing-project");
        assert_eq!(md.get("authorization").unwrap(), "Bearer ya29.secret");
        assert!(
            md.get(API_CLIENT_HEADER)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("gapic/")
        );
        assert!(md.get("grpc-timeout").is_some());
    }

    #[tokio::test]
    async fn invalid_caller_metadata_is_invalid_argument() {
        let metadata = CallMetadata::from_params(&TransportParams::new("h")).unwrap();
        let ctx = CallContext {
            metadata: vec![("Bad Key".to_owned(), "v".to_owned())],
            timeout: None,
        };
        let status = metadata
            .apply(&mut tonic::Request::new(()), &ctx)
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn construction_outside_runtime_is_configuration_error() {
        let err = GrpcAsyncioTransport::new(&TransportParams::new("http://127.0.0.1:1")).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[tokio::test]
    async fn exposes_host_and_defaults() {
        let transport = GrpcAsyncioTransport::new(&TransportParams::new("http://localhost:8080")).unwrap();
        assert_eq!(ClusterManagerTransport::host(&transport), "http://localhost:8080");
        assert_eq!(ClusterManagerTransport::wrapped_methods(&transport).len(), 32);
    }
}
