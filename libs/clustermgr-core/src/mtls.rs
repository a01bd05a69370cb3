//! Client certificate materialization for mutual TLS.
//!
//! Decides whether the channel presents a client certificate and, if so,
//! produces validated PEM material for it. Certificates come either from an
//! explicit [`ClientCertSource`] or from the ambient environment through an
//! [`AmbientCertProbe`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rustls_pki_types::pem::{self, PemObject};
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::error::{BoxError, ClientError};

/// A client certificate chain and its private key, both PEM encoded.
#[derive(Clone)]
pub struct CertificatePair {
    pub cert_chain: Vec<u8>,
    pub private_key: Zeroizing<Vec<u8>>,
}

impl CertificatePair {
    pub fn new(cert_chain: impl Into<Vec<u8>>, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            cert_chain: cert_chain.into(),
            private_key: Zeroizing::new(private_key.into()),
        }
    }
}

impl fmt::Debug for CertificatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificatePair")
            .field("cert_chain_len", &self.cert_chain.len())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

type CertSourceFn = dyn Fn() -> Result<CertificatePair, BoxError> + Send + Sync;

/// Caller-provided callback yielding the client certificate on demand.
#[derive(Clone)]
pub struct ClientCertSource(Arc<CertSourceFn>);

impl ClientCertSource {
    pub fn new<F>(source: F) -> Self
    where
        F: Fn() -> Result<CertificatePair, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(source))
    }

    /// Source that always returns the given PEM material.
    pub fn from_pem(cert_chain: impl Into<Vec<u8>>, private_key: impl Into<Vec<u8>>) -> Self {
        let pair = CertificatePair::new(cert_chain, private_key);
        Self::new(move || Ok(pair.clone()))
    }

    fn load(&self) -> Result<CertificatePair, BoxError> {
        (self.0)()
    }
}

impl fmt::Debug for ClientCertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientCertSource(..)")
    }
}

/// Looks for a client certificate provisioned in the environment.
pub trait AmbientCertProbe: Send + Sync + fmt::Debug {
    /// `Ok(None)` means no ambient certificate is configured.
    ///
    /// # Errors
    ///
    /// Any failure inspecting the environment; callers fall back to plain TLS.
    fn probe(&self) -> Result<Option<CertificatePair>, BoxError>;
}

/// Probe that never finds a certificate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAmbientCert;

impl AmbientCertProbe for NoAmbientCert {
    fn probe(&self) -> Result<Option<CertificatePair>, BoxError> {
        Ok(None)
    }
}

/// Channel-level TLS material validated from PEM input.
#[derive(Clone)]
pub struct SslMaterial {
    cert_chain_pem: Vec<u8>,
    private_key_pem: Zeroizing<Vec<u8>>,
    certificate_count: usize,
}

impl SslMaterial {
    /// Validate a certificate pair and turn it into channel material.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MutualTls`] if the chain holds no parsable
    /// certificate or the key is not a PEM private key.
    pub fn from_pair(pair: CertificatePair) -> Result<Self, ClientError> {
        let certificate_count = CertificateDer::pem_slice_iter(&pair.cert_chain)
            .try_fold(0usize, |n, cert| cert.map(|_| n + 1))
            .map_err(|e| ClientError::MutualTls(format!("invalid client certificate chain: {e}")))?;

        if certificate_count == 0 {
            return Err(ClientError::MutualTls(
                "client certificate chain contains no certificates".to_owned(),
            ));
        }

        PrivateKeyDer::from_pem_slice(&pair.private_key)
            .map_err(|e| ClientError::MutualTls(format!("invalid client private key: {e}")))?;

        Ok(Self {
            cert_chain_pem: pair.cert_chain,
            private_key_pem: pair.private_key,
            certificate_count,
        })
    }

    #[must_use]
    pub fn cert_chain_pem(&self) -> &[u8] {
        &self.cert_chain_pem
    }

    #[must_use]
    pub fn private_key_pem(&self) -> &[u8] {
        &self.private_key_pem
    }

    #[must_use]
    pub fn certificate_count(&self) -> usize {
        self.certificate_count
    }
}

impl fmt::Debug for SslMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SslMaterial")
            .field("certificate_count", &self.certificate_count)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Outcome of certificate materialization.
#[derive(Debug, Clone, Default)]
pub struct MtlsDecision {
    pub ssl: Option<SslMaterial>,
    pub is_mtls: bool,
}

/// Decide whether mutual TLS is active and build its material.
///
/// With `use_client_cert == false` no certificate is used at all. Otherwise
/// an explicit source takes precedence over the ambient probe. Failures of
/// the ambient probe are logged and treated as "no certificate".
///
/// # Errors
///
/// Returns [`ClientError::MutualTls`] when the explicit source fails or
/// yields unusable material.
pub fn materialize(
    use_client_cert: bool,
    explicit_source: Option<&ClientCertSource>,
    ambient: &dyn AmbientCertProbe,
) -> Result<MtlsDecision, ClientError> {
    if !use_client_cert {
        return Ok(MtlsDecision::default());
    }

    if let Some(source) = explicit_source {
        let pair = source
            .load()
            .map_err(|e| ClientError::MutualTls(format!("client certificate source failed: {e}")))?;
        let ssl = SslMaterial::from_pair(pair)?;
        return Ok(MtlsDecision {
            ssl: Some(ssl),
            is_mtls: true,
        });
    }

    let pair = match ambient.probe() {
        Ok(Some(pair)) => pair,
        Ok(None) => return Ok(MtlsDecision::default()),
        Err(e) => {
            tracing::warn!(error = %e, "ambient client certificate probe failed; using plain TLS");
            return Ok(MtlsDecision::default());
        }
    };

    match SslMaterial::from_pair(pair) {
        Ok(ssl) => Ok(MtlsDecision {
            ssl: Some(ssl),
            is_mtls: true,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "ambient client certificate unusable; using plain TLS");
            Ok(MtlsDecision::default())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContextAwareMetadata {
    #[serde(default)]
    cert_provider_command: Vec<String>,
}

/// Ambient probe backed by the endpoint-verification metadata file.
///
/// The file (`~/.secureConnect/context_aware_metadata.json` by default)
/// names a command whose stdout carries the certificate chain and private
/// key as PEM blocks.
#[derive(Debug, Clone)]
pub struct ContextAwareMetadataProbe {
    metadata_path: Option<PathBuf>,
}

impl Default for ContextAwareMetadataProbe {
    fn default() -> Self {
        Self {
            metadata_path: dirs::home_dir()
                .map(|home| home.join(".secureConnect").join("context_aware_metadata.json")),
        }
    }
}

impl ContextAwareMetadataProbe {
    pub fn new(metadata_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata_path: Some(metadata_path.into()),
        }
    }

    #[must_use]
    pub fn metadata_path(&self) -> Option<&Path> {
        self.metadata_path.as_deref()
    }
}

impl AmbientCertProbe for ContextAwareMetadataProbe {
    fn probe(&self) -> Result<Option<CertificatePair>, BoxError> {
        let Some(path) = self.metadata_path.as_deref() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read(path)?;
        let metadata: ContextAwareMetadata = serde_json::from_slice(&raw)?;
        let Some((program, args)) = metadata.cert_provider_command.split_first() else {
            return Err(format!("{} has no cert_provider_command", path.display()).into());
        };

        tracing::debug!(program = %program, "running client certificate provider");
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(format!("certificate provider exited with {}", output.status).into());
        }

        let stdout = Zeroizing::new(output.stdout);
        split_cert_and_key(&stdout).map(Some)
    }
}

/// Split combined PEM output into the certificate chain and the private key.
///
/// Sections other than certificates and the first private key are ignored.
fn split_cert_and_key(output: &[u8]) -> Result<CertificatePair, BoxError> {
    let certs = CertificateDer::pem_slice_iter(output).collect::<Result<Vec<_>, _>>()?;
    if certs.is_empty() {
        return Err("certificate provider output has no certificate".into());
    }

    let key = match PrivateKeyDer::from_pem_slice(output) {
        Ok(key) => key,
        Err(pem::Error::NoItemsFound) => return Err("certificate provider output has no private key".into()),
        Err(e) => return Err(e.into()),
    };

    let chain: String = certs.iter().map(|cert| encode_pem("CERTIFICATE", cert.as_ref())).collect();
    let key_pem = Zeroizing::new(encode_pem(private_key_label(&key), key.secret_der()));

    Ok(CertificatePair::new(chain, key_pem.as_bytes()))
}

fn private_key_label(key: &PrivateKeyDer<'_>) -> &'static str {
    match key {
        PrivateKeyDer::Pkcs1(_) => "RSA PRIVATE KEY",
        PrivateKeyDer::Sec1(_) => "EC PRIVATE KEY",
        _ => "PRIVATE KEY",
    }
}

/// Re-armor DER bytes as a PEM section with 64-column lines.
fn encode_pem(label: &str, der: &[u8]) -> String {
    let body = STANDARD.encode(der);
    let mut out = String::new();
    out.push_str("-----BEGIN ");
    out.push_str(label);
    out.push_str("-----\n");
    for line in body.as_bytes().chunks(64) {
        out.push_str(&String::from_utf8_lossy(line));
        out.push('\n');
    }
    out.push_str("-----END ");
    out.push_str(label);
    out.push_str("-----\n");
    out
}
