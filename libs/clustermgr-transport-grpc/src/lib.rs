#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![forbid(unsafe_code)]

//! gRPC transports for the cluster manager API.
//!
//! - [`types`]: the service's message records
//! - [`operations`]: the operation table and per-method retry defaults
//! - [`transport`]: blocking and non-blocking transport capabilities
//! - [`registry`]: label-to-factory registry and transport selection
//! - [`GrpcAsyncioTransport`] / [`GrpcTransport`]: tonic-backed transports

pub mod blocking;
pub mod channel;
pub mod grpc;
pub mod operations;
pub mod registry;
pub mod transport;
pub mod types;

pub use blocking::GrpcTransport;
pub use channel::{ChannelConfig, channel_uri, connect_lazy};
pub use grpc::GrpcAsyncioTransport;
pub use operations::{OPERATIONS, RetryClass, SERVICE_NAME, WrappedMethods};
pub use registry::{TransportFactory, TransportRegistry, TransportSelector};
pub use transport::{BlockingClusterManagerTransport, ClusterManagerTransport, TransportParams};
