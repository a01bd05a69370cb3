//! Blocking client against an in-memory transport.

mod common;

use std::sync::Arc;

use clustermgr_client::blocking::ClusterManagerClient;
use clustermgr_client::fields::{GetClusterFields, ListUsableSubnetworksFields};
use clustermgr_client::types::GetClusterRequest;
use clustermgr_client::{BlockingClusterManagerTransport, CallOptions, ClientOptions, MtlsEnvironment, path};
use clustermgr_core::mtls::NoAmbientCert;
use common::{FakeTransport, PARENT};
use tonic::Code;

fn client_over(transport: &Arc<FakeTransport>) -> ClusterManagerClient {
    let transport: Arc<dyn BlockingClusterManagerTransport> = transport.clone();
    ClusterManagerClient::builder()
        .transport(transport)
        .environment(MtlsEnvironment::default())
        .ambient_cert_probe(Arc::new(NoAmbientCert))
        .build()
        .unwrap()
}

#[test]
fn unary_call_blocks_until_done() {
    let fake = Arc::new(FakeTransport::default());
    let client = client_over(&fake);

    let cluster = client
        .get_cluster(
            None,
            GetClusterFields::default().project_id("p").zone("z").cluster_id("c"),
            CallOptions::new(),
        )
        .unwrap();
    assert_eq!(cluster.name, "projects/p/locations/z/clusters/c");
}

#[test]
fn conflicting_arguments_fail_before_any_call() {
    let fake = Arc::new(FakeTransport::default());
    let client = client_over(&fake);

    let err = client
        .get_cluster(
            Some(GetClusterRequest::default()),
            GetClusterFields::default().cluster_id("c"),
            CallOptions::new(),
        )
        .unwrap_err();
    assert!(err.is_usage());
    assert_eq!(fake.call_count(), 0);
}

#[test]
fn blocking_retry_recovers() {
    let fake = Arc::new(FakeTransport::failing(1));
    let client = client_over(&fake);

    client
        .get_cluster(
            None,
            GetClusterFields::default().project_id("p").zone("z").cluster_id("c"),
            CallOptions::new(),
        )
        .unwrap();
    assert_eq!(fake.call_count(), 2);
}

#[test]
fn blocking_pager_iterates_all_items() {
    let fake = Arc::new(FakeTransport::default());
    let client = client_over(&fake);

    let mut pager = client
        .list_usable_subnetworks(
            None,
            ListUsableSubnetworksFields::default().parent(PARENT),
            CallOptions::new(),
        )
        .unwrap();

    let names: Vec<String> = pager
        .items()
        .map(|item| item.map(|s| s.subnetwork))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names.len(), 4);
    assert_eq!(names[3], "projects/p/regions/r/subnetworks/s4");
    assert_eq!(fake.call_count(), 4);
}

#[test]
fn unsupported_operation_is_unimplemented() {
    let fake = Arc::new(FakeTransport::default());
    let client = client_over(&fake);

    let err = client
        .list_clusters(
            None,
            clustermgr_client::fields::ListClustersFields::default().project_id("p").zone("-"),
            CallOptions::new().without_retry(),
        )
        .unwrap_err();
    assert_eq!(err.code(), Some(Code::Unimplemented));
}

#[tokio::test]
async fn building_inside_a_runtime_is_a_usage_error() {
    let fake: Arc<dyn BlockingClusterManagerTransport> = Arc::new(FakeTransport::default());
    let err = ClusterManagerClient::builder()
        .transport(fake)
        .options(ClientOptions::default())
        .environment(MtlsEnvironment::default())
        .build()
        .unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn resource_paths_round_trip() {
    let project = path::common_project_path("my-project");
    assert_eq!(project, "projects/my-project");
    assert_eq!(path::parse_common_project_path(&project)["project"], "my-project");

    let location = path::common_location_path("p", "us-central1");
    assert_eq!(location, "projects/p/locations/us-central1");
    assert!(path::parse_common_location_path("folders/f").is_empty());
}
