//! Client construction options.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

use crate::auth::CredentialsProvider;
use crate::error::ClientError;
use crate::mtls::ClientCertSource;

/// Version of this crate, reported in the `x-goog-api-client` header.
pub const GAX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of environment variables read by [`ClientOptions::from_env`].
pub const ENV_PREFIX: &str = "CLUSTERMGR_";

/// Option keys read from the environment; other `CLUSTERMGR_*` variables are ignored.
const ENV_KEYS: &[&str] = &["api_endpoint", "scopes", "quota_project_id", "credentials_file"];

/// Library identification sent with every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// Version of the generated client surface.
    pub gapic_version: String,
    /// Optional caller-supplied user agent, sent first.
    pub user_agent: Option<String>,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            gapic_version: GAX_VERSION.to_owned(),
            user_agent: None,
        }
    }
}

impl ClientInfo {
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Value of the `x-goog-api-client` metadata entry.
    #[must_use]
    pub fn api_client_header(&self) -> String {
        format!("gapic/{} gax/{GAX_VERSION} gl-rust", self.gapic_version)
    }

    /// Channel-level user agent string.
    #[must_use]
    pub fn user_agent_string(&self) -> String {
        let base = format!("clustermgr/{} gax/{GAX_VERSION}", self.gapic_version);
        match &self.user_agent {
            Some(ua) => format!("{ua} {base}"),
            None => base,
        }
    }
}

/// Options recognised at client construction.
///
/// The data fields can be loaded from configuration (see
/// [`ClientOptions::from_figment`]); credentials and the certificate source
/// are programmatic only.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    /// Endpoint override; takes precedence over the mTLS directive.
    pub api_endpoint: Option<String>,

    /// OAuth scopes for the credentials.
    pub scopes: Option<Vec<String>>,

    /// Project billed for quota.
    pub quota_project_id: Option<String>,

    /// File holding a bearer token for the call credentials.
    pub credentials_file: Option<PathBuf>,

    /// Explicit call credentials.
    #[serde(skip)]
    pub credentials: Option<Arc<dyn CredentialsProvider>>,

    /// Explicit client certificate for mutual TLS.
    #[serde(skip)]
    pub client_cert_source: Option<ClientCertSource>,

    /// Library identification.
    #[serde(skip)]
    pub client_info: ClientInfo,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_endpoint", &self.api_endpoint)
            .field("scopes", &self.scopes)
            .field("quota_project_id", &self.quota_project_id)
            .field("credentials_file", &self.credentials_file)
            .field("credentials", &self.credentials)
            .field("client_cert_source", &self.client_cert_source)
            .field("client_info", &self.client_info)
            .finish()
    }
}

impl ClientOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract options from a figment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the figment does not
    /// deserialize into options.
    pub fn from_figment(figment: &Figment) -> Result<Self, ClientError> {
        figment
            .extract()
            .map_err(|e| ClientError::configuration(format!("invalid client options: {e}")))
    }

    /// Load options from `CLUSTERMGR_*` environment variables,
    /// e.g. `CLUSTERMGR_API_ENDPOINT` or `CLUSTERMGR_QUOTA_PROJECT_ID`.
    ///
    /// # Errors
    ///
    /// See [`ClientOptions::from_figment`].
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_figment(&Figment::from(Env::prefixed(ENV_PREFIX).only(ENV_KEYS)))
    }

    #[must_use]
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_quota_project_id(mut self, project: impl Into<String>) -> Self {
        self.quota_project_id = Some(project.into());
        self
    }

    #[must_use]
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_client_cert_source(mut self, source: ClientCertSource) -> Self {
        self.client_cert_source = Some(source);
        self
    }

    #[must_use]
    pub fn with_client_info(mut self, info: ClientInfo) -> Self {
        self.client_info = info;
        self
    }

    /// Whether any option that configures transport credentials is set.
    #[must_use]
    pub fn has_credential_options(&self) -> bool {
        self.credentials.is_some()
            || self.credentials_file.is_some()
            || self.scopes.as_ref().is_some_and(|s| !s.is_empty())
    }
}
