#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]

//! Client runtime for the cluster manager API.
//!
//! Transport-agnostic pieces shared by the gRPC transports and the generated
//! client surface:
//!
//! - endpoint selection and mutual-TLS certificate materialization
//! - construction options and call credentials
//! - retry policies and the retrying invoker
//! - request coercion for flattened arguments
//! - token-based pagination
//! - resource name helpers

pub mod auth;
pub mod coerce;
pub mod endpoint;
pub mod env;
pub mod error;
pub mod invoker;
pub mod mtls;
pub mod options;
pub mod pager;
pub mod path;
pub mod retry;
pub mod routing;

pub use auth::{AccessTokenCredentials, CredentialsProvider, DEFAULT_SCOPES, TokenFileCredentials};
pub use coerce::{FieldPresence, FlattenedFields, coerce_request};
pub use endpoint::{EndpointDecision, MtlsEndpointMode, default_mtls_endpoint, resolve_endpoint};
pub use env::MtlsEnvironment;
pub use error::{BoxError, ClientError};
pub use invoker::{CallContext, WrappedMethod};
pub use mtls::{
    AmbientCertProbe, CertificatePair, ClientCertSource, ContextAwareMetadataProbe, MtlsDecision,
    NoAmbientCert, SslMaterial, materialize,
};
pub use options::{ClientInfo, ClientOptions};
pub use pager::{BlockingPager, PageRequest, PageResponse, Pager};
pub use retry::{CallOptions, ExponentialBackoff, RetryPolicy, RetrySetting};
pub use routing::RoutingParams;
