//! Call credentials.
//!
//! Credential acquisition belongs to an external identity provider; this
//! module only defines the boundary ([`CredentialsProvider`]) and two simple
//! providers for bearer tokens.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ClientError;

/// OAuth scope requested when the caller does not pick any.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform"];

/// One metadata entry to attach to an outgoing call.
#[derive(Clone)]
pub struct CredentialHeader {
    pub key: &'static str,
    pub value: SecretString,
}

impl fmt::Debug for CredentialHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHeader")
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl CredentialHeader {
    fn bearer(token: &str) -> Self {
        Self {
            key: "authorization",
            value: SecretString::from(format!("Bearer {token}")),
        }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

/// Source of per-call authentication metadata.
#[async_trait]
pub trait CredentialsProvider: Send + Sync + fmt::Debug {
    /// Metadata entries for a call made with the given scopes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Credentials`] when the identity provider fails.
    async fn call_headers(&self, scopes: &[String]) -> Result<Vec<CredentialHeader>, ClientError>;
}

/// A static OAuth2 access token.
#[derive(Clone)]
pub struct AccessTokenCredentials {
    token: SecretString,
}

impl AccessTokenCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl fmt::Debug for AccessTokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessTokenCredentials([REDACTED])")
    }
}

#[async_trait]
impl CredentialsProvider for AccessTokenCredentials {
    async fn call_headers(&self, _scopes: &[String]) -> Result<Vec<CredentialHeader>, ClientError> {
        Ok(vec![CredentialHeader::bearer(self.token.expose_secret())])
    }
}

/// Bearer token read from a file on every call, so rotated tokens are
/// picked up without rebuilding the client.
#[derive(Debug, Clone)]
pub struct TokenFileCredentials {
    path: PathBuf,
}

impl TokenFileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialsProvider for TokenFileCredentials {
    async fn call_headers(&self, _scopes: &[String]) -> Result<Vec<CredentialHeader>, ClientError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ClientError::Credentials(Box::new(e)))?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(ClientError::Credentials(
                format!("token file {} is empty", self.path.display()).into(),
            ));
        }
        Ok(vec![CredentialHeader::bearer(token)])
    }
}
