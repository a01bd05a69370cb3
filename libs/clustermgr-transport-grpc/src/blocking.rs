//! Blocking tonic transport (`grpc`).
//!
//! Wraps [`GrpcAsyncioTransport`] with a private current-thread runtime that
//! each call drives to completion on the calling thread.

use std::future::Future;
use std::time::Duration;

use clustermgr_core::error::ClientError;
use clustermgr_core::invoker::CallContext;
use tokio::runtime::{Builder, Handle, Runtime};
use tonic::Status;

use crate::grpc::GrpcAsyncioTransport;
use crate::operations::WrappedMethods;
use crate::transport::{BlockingClusterManagerTransport, ClusterManagerTransport, TransportParams};

/// Transport whose calls block the calling thread.
#[derive(Debug)]
pub struct GrpcTransport {
    inner: GrpcAsyncioTransport,
    runtime: Runtime,
}

impl GrpcTransport {
    /// Registry label.
    pub const LABEL: &'static str = "grpc";

    /// Build the transport and its private runtime.
    ///
    /// # Errors
    ///
    /// [`ClientError::Usage`] when called from inside an async runtime or
    /// for conflicting credential options; otherwise the errors of
    /// [`GrpcAsyncioTransport::new`].
    pub fn new(params: &TransportParams) -> Result<Self, ClientError> {
        if Handle::try_current().is_ok() {
            return Err(ClientError::usage(
                "the blocking grpc transport cannot be created inside an async runtime",
            ));
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .thread_name("clustermgr-grpc")
            .build()
            .map_err(|e| ClientError::configuration(format!("failed to start transport runtime: {e}")))?;

        let inner = {
            let _guard = runtime.enter();
            GrpcAsyncioTransport::new(params)?
        };

        Ok(Self { inner, runtime })
    }

    /// Replace the wrapped-method defaults.
    #[must_use]
    pub fn with_wrapped_methods(mut self, methods: WrappedMethods) -> Self {
        self.inner = self.inner.with_wrapped_methods(methods);
        self
    }

    /// Drive `call` to completion, enforcing the attempt timeout.
    fn block_on<T, F>(&self, timeout: Option<Duration>, call: F) -> Result<T, Status>
    where
        F: Future<Output = Result<T, Status>>,
    {
        if Handle::try_current().is_ok() {
            return Err(Status::failed_precondition(
                "blocking transport called from inside an async runtime",
            ));
        }

        self.runtime.block_on(async move {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                    Err(Status::deadline_exceeded(format!(
                        "call timed out after {}",
                        humantime::format_duration(limit)
                    )))
                }),
                None => call.await,
            }
        })
    }
}

macro_rules! impl_grpc_blocking_transport {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        impl BlockingClusterManagerTransport for GrpcTransport {
            fn host(&self) -> &str {
                ClusterManagerTransport::host(&self.inner)
            }

            fn wrapped_methods(&self) -> &WrappedMethods {
                ClusterManagerTransport::wrapped_methods(&self.inner)
            }

            $(
                fn $op(&self, request: $req, ctx: CallContext) -> Result<$resp, Status> {
                    let timeout = ctx.timeout;
                    self.block_on(timeout, ClusterManagerTransport::$op(&self.inner, request, ctx))
                }
            )*
        }
    };
}

crate::for_each_operation!(impl_grpc_blocking_transport);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::types::GetServerConfigRequest;
    use tonic::Code;

    #[test]
    fn refused_connection_is_unavailable() {
        let transport = GrpcTransport::new(&TransportParams::new("http://127.0.0.1:1")).unwrap();
        let status = BlockingClusterManagerTransport::get_server_config(
            &transport,
            GetServerConfigRequest::default(),
            CallContext {
                metadata: Vec::new(),
                timeout: Some(Duration::from_secs(5)),
            },
        )
        .unwrap_err();
        assert!(
            matches!(
                status.code(),
                Code::Unavailable | Code::DeadlineExceeded | Code::Unknown
            ),
            "unexpected status: {status:?}"
        );
    }

    #[tokio::test]
    async fn refuses_construction_inside_runtime() {
        let err = GrpcTransport::new(&TransportParams::new("http://127.0.0.1:1")).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn exposes_the_inner_host() {
        let transport = GrpcTransport::new(&TransportParams::new("http://localhost:8080")).unwrap();
        assert_eq!(BlockingClusterManagerTransport::host(&transport), "http://localhost:8080");
        assert!(
            BlockingClusterManagerTransport::wrapped_methods(&transport)
                .get("set_labels")
                .is_ok()
        );
    }
}
