//! API endpoint selection.
//!
//! Picks between the regular and the mutual-TLS variant of a service
//! hostname. An explicit endpoint override always wins; otherwise the
//! `GOOGLE_API_USE_MTLS_ENDPOINT` directive decides, and under `auto` the
//! presence of a usable client certificate tips the balance.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ClientError;

/// Name of the environment directive controlling endpoint selection.
pub const USE_MTLS_ENDPOINT_ENV: &str = "GOOGLE_API_USE_MTLS_ENDPOINT";

static MTLS_ENDPOINT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[^.]+)(?P<mtls>\.mtls)?(?P<sandbox>\.sandbox)?(?P<googledomain>\.googleapis\.com)?",
    )
    .ok()
});

/// Value of the mTLS endpoint directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MtlsEndpointMode {
    /// Always use the regular endpoint.
    Never,
    /// Always use the mTLS endpoint.
    Always,
    /// Use the mTLS endpoint iff a client certificate is in use.
    #[default]
    Auto,
}

impl FromStr for MtlsEndpointMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(Self::Never),
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            other => Err(ClientError::usage(format!(
                "unsupported {USE_MTLS_ENDPOINT_ENV} value '{other}'. Accepted values: never, auto, always"
            ))),
        }
    }
}

impl fmt::Display for MtlsEndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Never => "never",
            Self::Always => "always",
            Self::Auto => "auto",
        })
    }
}

/// The endpoint chosen for a client, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDecision {
    pub endpoint: String,
    pub is_mtls: bool,
}

/// Convert an API hostname into its mutual-TLS variant.
///
/// `*.googleapis.com` becomes `*.mtls.googleapis.com` and
/// `*.sandbox.googleapis.com` becomes `*.mtls.sandbox.googleapis.com`.
/// Hostnames outside that domain, or already on an mTLS host, come back
/// unchanged.
#[must_use]
pub fn default_mtls_endpoint(api_endpoint: &str) -> String {
    if api_endpoint.is_empty() {
        return String::new();
    }

    let Some(caps) = MTLS_ENDPOINT_RE
        .as_ref()
        .and_then(|re| re.captures(api_endpoint))
    else {
        return api_endpoint.to_owned();
    };

    if caps.name("mtls").is_some() || caps.name("googledomain").is_none() {
        return api_endpoint.to_owned();
    }

    if caps.name("sandbox").is_some() {
        return api_endpoint.replacen("sandbox.googleapis.com", "mtls.sandbox.googleapis.com", 1);
    }

    api_endpoint.replacen(".googleapis.com", ".mtls.googleapis.com", 1)
}

/// Resolve the endpoint for a client.
///
/// * `base_endpoint` - the service's regular hostname
/// * `explicit_endpoint` - caller override, returned verbatim when set
/// * `directive` - raw `GOOGLE_API_USE_MTLS_ENDPOINT` value (`None` means `auto`)
/// * `is_mtls` - whether a client certificate was materialized
///
/// The directive is only consulted (and validated) without an override.
///
/// # Errors
///
/// Returns [`ClientError::Usage`] if the directive is not one of
/// `never`, `always` or `auto`.
pub fn resolve_endpoint(
    base_endpoint: &str,
    explicit_endpoint: Option<&str>,
    directive: Option<&str>,
    is_mtls: bool,
) -> Result<EndpointDecision, ClientError> {
    if let Some(endpoint) = explicit_endpoint {
        return Ok(EndpointDecision {
            endpoint: endpoint.to_owned(),
            is_mtls,
        });
    }

    let mode = directive.map_or(Ok(MtlsEndpointMode::Auto), str::parse)?;

    let use_mtls_endpoint = match mode {
        MtlsEndpointMode::Never => false,
        MtlsEndpointMode::Always => true,
        MtlsEndpointMode::Auto => is_mtls,
    };

    let endpoint = if use_mtls_endpoint {
        default_mtls_endpoint(base_endpoint)
    } else {
        base_endpoint.to_owned()
    };

    tracing::debug!(%mode, %endpoint, is_mtls, "resolved API endpoint");

    Ok(EndpointDecision {
        endpoint,
        is_mtls: is_mtls || mode == MtlsEndpointMode::Always,
    })
}
