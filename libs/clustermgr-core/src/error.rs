use std::time::Duration;

use thiserror::Error;
use tonic::{Code, Status};

/// Boxed error used at the boundaries with external collaborators
/// (certificate sources, ambient probes, identity providers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the cluster manager client runtime.
///
/// Usage and configuration errors are raised synchronously at the call or
/// construction site and are never retried. RPC failures carry the original
/// [`Status`] so callers can match on the failure kind.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientError {
    /// Conflicting or malformed arguments, detected before any network I/O.
    #[error("invalid usage: {0}")]
    Usage(String),

    /// Failure while building mutual-TLS material from explicit input.
    #[error("mutual TLS channel error: {0}")]
    MutualTls(String),

    /// The requested transport label is not registered.
    #[error("unknown transport '{label}'; registered transports: {registered}")]
    UnknownTransport { label: String, registered: String },

    /// Invalid client or transport configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Identity provider failed to produce call credentials.
    #[error("credentials error: {0}")]
    Credentials(#[source] BoxError),

    /// The remote call failed and was not retried (or was not retryable).
    #[error("{operation} failed: {status}")]
    Rpc {
        operation: &'static str,
        #[source]
        status: Status,
    },

    /// Retryable failures kept occurring until the retry deadline ran out.
    #[error(
        "deadline of {} exceeded while calling {operation} after {attempts} attempts",
        humantime::format_duration(*.deadline)
    )]
    RetryDeadlineExceeded {
        operation: &'static str,
        deadline: Duration,
        attempts: u32,
        #[source]
        last: Status,
    },
}

impl ClientError {
    /// Build a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// gRPC code of the failure, if this error came from a remote call.
    ///
    /// Retry exhaustion reports [`Code::DeadlineExceeded`]; the last attempt's
    /// status stays reachable through [`std::error::Error::source`].
    #[must_use]
    pub fn code(&self) -> Option<Code> {
        match self {
            Self::Rpc { status, .. } => Some(status.code()),
            Self::RetryDeadlineExceeded { .. } => Some(Code::DeadlineExceeded),
            _ => None,
        }
    }

    /// The status returned by the server, untouched.
    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        match self {
            Self::Rpc { status, .. } => Some(status),
            Self::RetryDeadlineExceeded { last, .. } => Some(last),
            _ => None,
        }
    }

    /// Whether this is a usage error raised before any network activity.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
