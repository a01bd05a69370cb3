//! Environment directives that steer mutual-TLS behaviour.

use std::env::VarError;

use crate::endpoint::{MtlsEndpointMode, USE_MTLS_ENDPOINT_ENV};
use crate::error::ClientError;

/// Name of the flag controlling whether client certificates are consulted.
pub const USE_CLIENT_CERTIFICATE_ENV: &str = "GOOGLE_API_USE_CLIENT_CERTIFICATE";

/// Snapshot of the mTLS-related environment directives.
///
/// Read once per client construction. Tests build it explicitly instead of
/// touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MtlsEnvironment {
    /// Raw `GOOGLE_API_USE_MTLS_ENDPOINT` value.
    pub use_mtls_endpoint: Option<String>,
    /// Raw `GOOGLE_API_USE_CLIENT_CERTIFICATE` value.
    pub use_client_certificate: Option<String>,
}

impl MtlsEnvironment {
    /// Capture the directives from the process environment.
    #[must_use]
    pub fn from_process_env() -> Self {
        Self {
            use_mtls_endpoint: read_directive(USE_MTLS_ENDPOINT_ENV),
            use_client_certificate: read_directive(USE_CLIENT_CERTIFICATE_ENV),
        }
    }

    #[must_use]
    pub fn with_mtls_endpoint(mut self, value: impl Into<String>) -> Self {
        self.use_mtls_endpoint = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_client_certificate(mut self, value: impl Into<String>) -> Self {
        self.use_client_certificate = Some(value.into());
        self
    }

    /// Parsed endpoint directive (`auto` when unset).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Usage`] for values other than `never`, `always`, `auto`.
    pub fn mtls_endpoint_mode(&self) -> Result<MtlsEndpointMode, ClientError> {
        self.use_mtls_endpoint
            .as_deref()
            .map_or(Ok(MtlsEndpointMode::Auto), str::parse)
    }

    /// Whether client certificates should be consulted (`false` when unset).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Usage`] when the flag is not a recognised boolean.
    pub fn use_client_certificate(&self) -> Result<bool, ClientError> {
        match self.use_client_certificate.as_deref() {
            None => Ok(false),
            Some(raw) => parse_bool_flag(raw).ok_or_else(|| {
                ClientError::usage(format!(
                    "unsupported {USE_CLIENT_CERTIFICATE_ENV} value '{raw}'. Accepted values: true, false"
                ))
            }),
        }
    }
}

/// Raw directive value; a non-UTF-8 value is kept (lossily) so parsing rejects it.
fn read_directive(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

/// Boolean-ish flag parsing: y/yes/t/true/on/1 and n/no/f/false/off/0.
fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let env = MtlsEnvironment::default();
        assert_eq!(env.mtls_endpoint_mode().unwrap(), MtlsEndpointMode::Auto);
        assert!(!env.use_client_certificate().unwrap());
    }

    #[test]
    fn client_certificate_flag_accepts_boolish_values() {
        for raw in ["true", "True", "1", "yes", "on", "t", "Y"] {
            let env = MtlsEnvironment::default().with_client_certificate(raw);
            assert!(env.use_client_certificate().unwrap(), "{raw}");
        }
        for raw in ["false", "0", "no", "off", "F"] {
            let env = MtlsEnvironment::default().with_client_certificate(raw);
            assert!(!env.use_client_certificate().unwrap(), "{raw}");
        }
    }

    #[test]
    fn client_certificate_flag_rejects_garbage() {
        let env = MtlsEnvironment::default().with_client_certificate("maybe");
        assert!(env.use_client_certificate().unwrap_err().is_usage());
    }

    #[test]
    fn endpoint_mode_rejects_garbage() {
        let env = MtlsEnvironment::default().with_mtls_endpoint("sometimes");
        assert!(env.mtls_endpoint_mode().unwrap_err().is_usage());
    }

    #[test]
    fn reads_process_environment() {
        temp_env::with_vars(
            [
                (USE_MTLS_ENDPOINT_ENV, Some("never")),
                (USE_CLIENT_CERTIFICATE_ENV, Some("true")),
            ],
            || {
                let env = MtlsEnvironment::from_process_env();
                assert_eq!(env.mtls_endpoint_mode().unwrap(), MtlsEndpointMode::Never);
                assert!(env.use_client_certificate().unwrap());
            },
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_values_are_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let garbage = OsStr::from_bytes(b"tr\xffue");
        temp_env::with_vars(
            [(USE_MTLS_ENDPOINT_ENV, Some(garbage)), (USE_CLIENT_CERTIFICATE_ENV, Some(garbage))],
            || {
                let env = MtlsEnvironment::from_process_env();
                assert!(env.mtls_endpoint_mode().unwrap_err().is_usage());
                assert!(env.use_client_certificate().unwrap_err().is_usage());
            },
        );
    }

    #[test]
    fn unset_process_environment_reads_as_none() {
        temp_env::with_vars_unset([USE_MTLS_ENDPOINT_ENV, USE_CLIENT_CERTIFICATE_ENV], || {
            assert_eq!(MtlsEnvironment::from_process_env(), MtlsEnvironment::default());
        });
    }
}
