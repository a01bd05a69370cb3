//! Transport capabilities.
//!
//! A transport owns the channel and exposes one raw call per operation plus
//! the [`WrappedMethods`] the client dispatches through. The blocking and
//! non-blocking traits expose the same operation surface, so the client's
//! dispatch logic does not depend on the variant.
//!
//! Every raw call has a default body answering `UNIMPLEMENTED`, which lets
//! test doubles implement only the operations they exercise.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use clustermgr_core::auth::{CredentialsProvider, DEFAULT_SCOPES, TokenFileCredentials};
use clustermgr_core::error::ClientError;
use clustermgr_core::invoker::CallContext;
use clustermgr_core::mtls::SslMaterial;
use clustermgr_core::options::{ClientInfo, ClientOptions};
use tonic::Status;

use crate::operations::WrappedMethods;

/// Port appended to hosts given without one.
pub const DEFAULT_PORT: u16 = 443;

macro_rules! declare_transport_traits {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        /// Non-blocking transport: every call returns a future that suspends
        /// only the awaiting task.
        #[async_trait]
        pub trait ClusterManagerTransport: Send + Sync + fmt::Debug {
            /// `host:port` the channel targets.
            fn host(&self) -> &str;

            /// Retry-wrapped methods built at construction.
            fn wrapped_methods(&self) -> &WrappedMethods;

            $(
                #[doc = concat!("Raw `", $rpc, "` call.")]
                async fn $op(&self, _request: $req, _ctx: CallContext) -> Result<$resp, Status> {
                    Err(unimplemented_call($rpc))
                }
            )*
        }

        /// Blocking transport: every call parks the calling thread until the
        /// response or failure is available.
        pub trait BlockingClusterManagerTransport: Send + Sync + fmt::Debug {
            /// `host:port` the channel targets.
            fn host(&self) -> &str;

            /// Retry-wrapped methods built at construction.
            fn wrapped_methods(&self) -> &WrappedMethods;

            $(
                #[doc = concat!("Raw `", $rpc, "` call.")]
                fn $op(&self, _request: $req, _ctx: CallContext) -> Result<$resp, Status> {
                    Err(unimplemented_call($rpc))
                }
            )*
        }
    };
}

crate::for_each_operation!(declare_transport_traits);

fn unimplemented_call(rpc: &str) -> Status {
    Status::unimplemented(format!("{rpc} is not supported by this transport"))
}

/// Append [`DEFAULT_PORT`] to a host given without a port.
///
/// For a bracketed IPv6 literal only a `:` after the closing `]` is a port.
#[must_use]
pub fn host_with_default_port(host: &str) -> String {
    let has_port = match host.rfind(']') {
        Some(close) => host[close + 1..].starts_with(':'),
        None => host.contains(':'),
    };
    if has_port {
        host.to_owned()
    } else {
        format!("{host}:{DEFAULT_PORT}")
    }
}

/// Everything a transport factory needs, resolved by the client.
#[derive(Clone, Debug, Default)]
pub struct TransportParams {
    /// Target host, with or without a port.
    pub host: String,
    pub credentials: Option<Arc<dyn CredentialsProvider>>,
    pub credentials_file: Option<PathBuf>,
    pub scopes: Option<Vec<String>>,
    /// Client certificate material when mutual TLS is active.
    pub ssl: Option<SslMaterial>,
    pub quota_project_id: Option<String>,
    pub client_info: ClientInfo,
}

impl TransportParams {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Carry the credential-related options over from client options.
    #[must_use]
    pub fn from_options(host: impl Into<String>, options: &ClientOptions, ssl: Option<SslMaterial>) -> Self {
        Self {
            host: host.into(),
            credentials: options.credentials.clone(),
            credentials_file: options.credentials_file.clone(),
            scopes: options.scopes.clone(),
            ssl,
            quota_project_id: options.quota_project_id.clone(),
            client_info: options.client_info.clone(),
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_quota_project_id(mut self, project: impl Into<String>) -> Self {
        self.quota_project_id = Some(project.into());
        self
    }

    /// Host with the default port applied.
    #[must_use]
    pub fn target(&self) -> String {
        host_with_default_port(&self.host)
    }

    /// Scopes requested from the credentials provider.
    #[must_use]
    pub fn effective_scopes(&self) -> Vec<String> {
        match &self.scopes {
            Some(scopes) if !scopes.is_empty() => scopes.clone(),
            _ => DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// The call credentials to attach, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Usage`] when both explicit credentials and a
    /// credentials file are given.
    pub fn resolve_credentials(&self) -> Result<Option<Arc<dyn CredentialsProvider>>, ClientError> {
        match (&self.credentials, &self.credentials_file) {
            (Some(_), Some(_)) => Err(ClientError::usage(
                "'credentials_file' and 'credentials' are mutually exclusive",
            )),
            (Some(credentials), None) => Ok(Some(Arc::clone(credentials))),
            (None, Some(path)) => Ok(Some(Arc::new(TokenFileCredentials::new(path.clone())))),
            (None, None) => Ok(None),
        }
    }
}
