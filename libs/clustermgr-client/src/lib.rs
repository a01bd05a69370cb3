#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]

//! Clients for the cluster manager (`google.container.v1beta1`) API.
//!
//! [`ClusterManagerClient`] is the async client; [`blocking::ClusterManagerClient`]
//! offers the same operations for synchronous callers. Both are built with a
//! [`ClientBuilder`], which settles the endpoint, client certificate and
//! transport once, at construction time.

pub mod blocking;
pub mod builder;
pub mod client;
pub mod fields;

pub use builder::{ClientBuilder, DEFAULT_ENDPOINT, DEFAULT_MTLS_ENDPOINT};
pub use client::{ClusterManagerClient, ListUsableSubnetworksPager};

pub use clustermgr_core::path;
pub use clustermgr_core::{
    CallOptions, ClientCertSource, ClientError, ClientInfo, ClientOptions, ExponentialBackoff,
    MtlsEnvironment, RetryPolicy,
};
pub use clustermgr_transport_grpc::types;
pub use clustermgr_transport_grpc::{
    BlockingClusterManagerTransport, ClusterManagerTransport, TransportParams, TransportRegistry,
    TransportSelector,
};
