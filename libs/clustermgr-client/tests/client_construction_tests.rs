//! Endpoint, certificate and transport resolution at construction.

mod common;

use std::sync::{Arc, Mutex};

use clustermgr_client::{
    ClientCertSource, ClientError, ClientOptions, ClusterManagerClient, ClusterManagerTransport,
    DEFAULT_ENDPOINT, DEFAULT_MTLS_ENDPOINT, MtlsEnvironment, TransportParams, TransportRegistry,
};
use clustermgr_core::auth::AccessTokenCredentials;
use clustermgr_core::mtls::NoAmbientCert;
use common::{CERT, FakeTransport, KEY};

/// What the registry factory was asked to build.
#[derive(Debug, Clone)]
struct Seen {
    host: String,
    has_ssl: bool,
    scopes: Option<Vec<String>>,
}

fn recording_registry(seen: Arc<Mutex<Vec<Seen>>>) -> Arc<TransportRegistry<dyn ClusterManagerTransport>> {
    Arc::new(TransportRegistry::new().with("fake", move |params: &TransportParams| {
        seen.lock().unwrap().push(Seen {
            host: params.host.clone(),
            has_ssl: params.ssl.is_some(),
            scopes: params.scopes.clone(),
        });
        let transport: Arc<dyn ClusterManagerTransport> = Arc::new(FakeTransport::default());
        Ok(transport)
    }))
}

fn build(
    options: ClientOptions,
    environment: MtlsEnvironment,
) -> (Result<ClusterManagerClient, ClientError>, Vec<Seen>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let result = ClusterManagerClient::builder()
        .registry(recording_registry(seen.clone()))
        .options(options)
        .environment(environment)
        .ambient_cert_probe(Arc::new(NoAmbientCert))
        .build();
    let seen = seen.lock().unwrap().clone();
    (result, seen)
}

#[test]
fn defaults_to_the_regular_endpoint() {
    let (client, seen) = build(ClientOptions::default(), MtlsEnvironment::default());
    let client = client.unwrap();

    assert_eq!(client.endpoint().endpoint, DEFAULT_ENDPOINT);
    assert!(!client.endpoint().is_mtls);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].host, DEFAULT_ENDPOINT);
    assert!(!seen[0].has_ssl);
}

#[test]
fn client_certificate_switches_to_the_mtls_endpoint() {
    let options = ClientOptions::default().with_client_cert_source(ClientCertSource::from_pem(CERT, KEY));
    let env = MtlsEnvironment::default().with_client_certificate("true");

    let (client, seen) = build(options, env);
    let client = client.unwrap();

    assert_eq!(client.endpoint().endpoint, DEFAULT_MTLS_ENDPOINT);
    assert!(client.endpoint().is_mtls);
    assert_eq!(seen[0].host, DEFAULT_MTLS_ENDPOINT);
    assert!(seen[0].has_ssl);
}

#[test]
fn certificate_source_is_ignored_unless_enabled() {
    let options = ClientOptions::default().with_client_cert_source(ClientCertSource::from_pem(CERT, KEY));

    let (client, seen) = build(options, MtlsEnvironment::default());
    assert_eq!(client.unwrap().endpoint().endpoint, DEFAULT_ENDPOINT);
    assert!(!seen[0].has_ssl);
}

#[test]
fn never_directive_keeps_the_regular_endpoint_with_a_certificate() {
    let options = ClientOptions::default().with_client_cert_source(ClientCertSource::from_pem(CERT, KEY));
    let env = MtlsEnvironment::default()
        .with_client_certificate("true")
        .with_mtls_endpoint("never");

    let (client, seen) = build(options, env);
    assert_eq!(client.unwrap().endpoint().endpoint, DEFAULT_ENDPOINT);
    assert!(seen[0].has_ssl);
}

#[test]
fn always_directive_forces_the_mtls_endpoint() {
    let env = MtlsEnvironment::default().with_mtls_endpoint("always");
    let (client, seen) = build(ClientOptions::default(), env);
    assert_eq!(client.unwrap().endpoint().endpoint, DEFAULT_MTLS_ENDPOINT);
    assert!(!seen[0].has_ssl);
}

#[test]
fn explicit_endpoint_wins() {
    let options = ClientOptions::default().with_api_endpoint("localhost:7469");
    let env = MtlsEnvironment::default().with_mtls_endpoint("always");

    let (client, seen) = build(options, env);
    assert_eq!(client.unwrap().endpoint().endpoint, "localhost:7469");
    assert_eq!(seen[0].host, "localhost:7469");
}

#[test]
fn invalid_directives_are_usage_errors() {
    let (result, seen) = build(
        ClientOptions::default(),
        MtlsEnvironment::default().with_mtls_endpoint("sometimes"),
    );
    assert!(result.unwrap_err().is_usage());
    assert!(seen.is_empty());

    let (result, seen) = build(
        ClientOptions::default(),
        MtlsEnvironment::default().with_client_certificate("maybe"),
    );
    assert!(result.unwrap_err().is_usage());
    assert!(seen.is_empty());
}

#[test]
fn broken_certificate_source_fails_construction() {
    let options = ClientOptions::default().with_client_cert_source(ClientCertSource::from_pem("garbage", KEY));
    let env = MtlsEnvironment::default().with_client_certificate("true");

    let (result, seen) = build(options, env);
    assert!(matches!(result.unwrap_err(), ClientError::MutualTls(_)));
    assert!(seen.is_empty());
}

#[test]
fn scopes_reach_the_transport_factory() {
    let options = ClientOptions::default().with_scopes(["https://www.googleapis.com/auth/cloud-platform.read-only"]);
    let (client, seen) = build(options, MtlsEnvironment::default());
    client.unwrap();
    assert_eq!(
        seen[0].scopes.as_deref(),
        Some(&["https://www.googleapis.com/auth/cloud-platform.read-only".to_owned()][..])
    );
}

#[test]
fn unknown_transport_label_lists_the_registered_ones() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let err = ClusterManagerClient::builder()
        .registry(recording_registry(seen.clone()))
        .transport("rest")
        .environment(MtlsEnvironment::default())
        .build()
        .unwrap_err();

    match err {
        ClientError::UnknownTransport { label, registered } => {
            assert_eq!(label, "rest");
            assert_eq!(registered, "fake");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn prebuilt_transport_with_credentials_is_rejected() {
    let fake: Arc<dyn ClusterManagerTransport> = Arc::new(FakeTransport::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    for options in [
        ClientOptions::default().with_credentials(Arc::new(AccessTokenCredentials::new("token"))),
        ClientOptions::default().with_credentials_file("/nonexistent/token"),
        ClientOptions::default().with_scopes(["scope"]),
    ] {
        let err = ClusterManagerClient::builder()
            .registry(recording_registry(seen.clone()))
            .transport(fake.clone())
            .options(options)
            .environment(MtlsEnvironment::default())
            .build()
            .unwrap_err();
        assert!(err.is_usage(), "{err}");
    }
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn prebuilt_transport_is_used_as_is() {
    let fake: Arc<dyn ClusterManagerTransport> = Arc::new(FakeTransport::default());
    let client = ClusterManagerClient::builder()
        .transport(fake.clone())
        .environment(MtlsEnvironment::default())
        .ambient_cert_probe(Arc::new(NoAmbientCert))
        .build()
        .unwrap();

    assert!(Arc::ptr_eq(client.transport(), &fake));
    assert_eq!(client.api_endpoint(), "fake.invalid");
}

#[test]
fn process_environment_is_read_when_not_supplied() {
    temp_env::with_vars(
        [
            ("GOOGLE_API_USE_MTLS_ENDPOINT", Some("always")),
            ("GOOGLE_API_USE_CLIENT_CERTIFICATE", None),
        ],
        || {
            let fake: Arc<dyn ClusterManagerTransport> = Arc::new(FakeTransport::default());
            let client = ClusterManagerClient::builder()
                .transport(fake)
                .ambient_cert_probe(Arc::new(NoAmbientCert))
                .build()
                .unwrap();
            assert_eq!(client.endpoint().endpoint, DEFAULT_MTLS_ENDPOINT);
        },
    );
}

#[tokio::test]
async fn credentials_and_credentials_file_conflict() {
    let options = ClientOptions::default()
        .with_api_endpoint("http://localhost:8080")
        .with_credentials(Arc::new(AccessTokenCredentials::new("token")))
        .with_credentials_file("/nonexistent/token");

    let err = ClusterManagerClient::builder()
        .options(options)
        .environment(MtlsEnvironment::default())
        .ambient_cert_probe(Arc::new(NoAmbientCert))
        .build()
        .unwrap_err();
    assert!(err.is_usage(), "{err}");
}

#[tokio::test]
async fn default_registry_builds_the_grpc_asyncio_transport() {
    let client = ClusterManagerClient::builder()
        .options(ClientOptions::default().with_api_endpoint("http://localhost:8080"))
        .environment(MtlsEnvironment::default())
        .ambient_cert_probe(Arc::new(NoAmbientCert))
        .build()
        .unwrap();
    assert_eq!(client.api_endpoint(), "http://localhost:8080");
}
