//! The cluster manager operation table.
//!
//! [`for_each_operation!`] is the single list of remote operations. Every
//! per-operation item (routing keys, transport trait methods, gRPC stubs,
//! method defaults, client methods) is generated by feeding a callback macro
//! through it, so adding an operation means adding one row.
//!
//! Row grammar:
//!
//! ```text
//! { op_name, "RpcName", Request => Response,
//!   route: <request field routed on>,
//!   retry: Idempotent | NonIdempotent,
//!   shape: Unary | Paged | Empty,
//!   fields: FieldsStruct { flattened_arg: Type, ... } }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use clustermgr_core::error::ClientError;
use clustermgr_core::invoker::WrappedMethod;
use clustermgr_core::retry::RetryPolicy;

/// Fully-qualified gRPC service name.
pub const SERVICE_NAME: &str = "google.container.v1beta1.ClusterManager";

/// Invoke `$callback!` with one row per cluster manager operation.
#[macro_export]
macro_rules! for_each_operation {
    ($callback:ident) => {
        $callback! {
            { list_clusters, "ListClusters",
              $crate::types::ListClustersRequest => $crate::types::ListClustersResponse,
              route: parent, retry: Idempotent, shape: Unary,
              fields: ListClustersFields { project_id: String, zone: String } }
            { get_cluster, "GetCluster",
              $crate::types::GetClusterRequest => $crate::types::Cluster,
              route: name, retry: Idempotent, shape: Unary,
              fields: GetClusterFields { project_id: String, zone: String, cluster_id: String } }
            { create_cluster, "CreateCluster",
              $crate::types::CreateClusterRequest => $crate::types::Operation,
              route: parent, retry: NonIdempotent, shape: Unary,
              fields: CreateClusterFields {
                  project_id: String, zone: String, cluster: $crate::types::Cluster } }
            { update_cluster, "UpdateCluster",
              $crate::types::UpdateClusterRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: UpdateClusterFields {
                  project_id: String, zone: String, cluster_id: String,
                  update: $crate::types::ClusterUpdate } }
            { update_node_pool, "UpdateNodePool",
              $crate::types::UpdateNodePoolRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: UpdateNodePoolFields {} }
            { set_node_pool_autoscaling, "SetNodePoolAutoscaling",
              $crate::types::SetNodePoolAutoscalingRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetNodePoolAutoscalingFields {} }
            { set_logging_service, "SetLoggingService",
              $crate::types::SetLoggingServiceRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetLoggingServiceFields {
                  project_id: String, zone: String, cluster_id: String, logging_service: String } }
            { set_monitoring_service, "SetMonitoringService",
              $crate::types::SetMonitoringServiceRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetMonitoringServiceFields {
                  project_id: String, zone: String, cluster_id: String, monitoring_service: String } }
            { set_addons_config, "SetAddonsConfig",
              $crate::types::SetAddonsConfigRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetAddonsConfigFields {
                  project_id: String, zone: String, cluster_id: String,
                  addons_config: $crate::types::AddonsConfig } }
            { set_locations, "SetLocations",
              $crate::types::SetLocationsRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetLocationsFields {
                  project_id: String, zone: String, cluster_id: String, locations: Vec<String> } }
            { update_master, "UpdateMaster",
              $crate::types::UpdateMasterRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: UpdateMasterFields {
                  project_id: String, zone: String, cluster_id: String, master_version: String } }
            { set_master_auth, "SetMasterAuth",
              $crate::types::SetMasterAuthRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetMasterAuthFields {} }
            { delete_cluster, "DeleteCluster",
              $crate::types::DeleteClusterRequest => $crate::types::Operation,
              route: name, retry: Idempotent, shape: Unary,
              fields: DeleteClusterFields { project_id: String, zone: String, cluster_id: String } }
            { list_operations, "ListOperations",
              $crate::types::ListOperationsRequest => $crate::types::ListOperationsResponse,
              route: parent, retry: Idempotent, shape: Unary,
              fields: ListOperationsFields { project_id: String, zone: String } }
            { get_operation, "GetOperation",
              $crate::types::GetOperationRequest => $crate::types::Operation,
              route: name, retry: Idempotent, shape: Unary,
              fields: GetOperationFields { project_id: String, zone: String, operation_id: String } }
            { cancel_operation, "CancelOperation",
              $crate::types::CancelOperationRequest => (),
              route: name, retry: NonIdempotent, shape: Empty,
              fields: CancelOperationFields { project_id: String, zone: String, operation_id: String } }
            { get_server_config, "GetServerConfig",
              $crate::types::GetServerConfigRequest => $crate::types::ServerConfig,
              route: name, retry: Idempotent, shape: Unary,
              fields: GetServerConfigFields { project_id: String, zone: String } }
            { list_node_pools, "ListNodePools",
              $crate::types::ListNodePoolsRequest => $crate::types::ListNodePoolsResponse,
              route: parent, retry: Idempotent, shape: Unary,
              fields: ListNodePoolsFields { project_id: String, zone: String, cluster_id: String } }
            { get_node_pool, "GetNodePool",
              $crate::types::GetNodePoolRequest => $crate::types::NodePool,
              route: name, retry: Idempotent, shape: Unary,
              fields: GetNodePoolFields {
                  project_id: String, zone: String, cluster_id: String, node_pool_id: String } }
            { create_node_pool, "CreateNodePool",
              $crate::types::CreateNodePoolRequest => $crate::types::Operation,
              route: parent, retry: NonIdempotent, shape: Unary,
              fields: CreateNodePoolFields {
                  project_id: String, zone: String, cluster_id: String,
                  node_pool: $crate::types::NodePool } }
            { delete_node_pool, "DeleteNodePool",
              $crate::types::DeleteNodePoolRequest => $crate::types::Operation,
              route: name, retry: Idempotent, shape: Unary,
              fields: DeleteNodePoolFields {
                  project_id: String, zone: String, cluster_id: String, node_pool_id: String } }
            { rollback_node_pool_upgrade, "RollbackNodePoolUpgrade",
              $crate::types::RollbackNodePoolUpgradeRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: RollbackNodePoolUpgradeFields {
                  project_id: String, zone: String, cluster_id: String, node_pool_id: String } }
            { set_node_pool_management, "SetNodePoolManagement",
              $crate::types::SetNodePoolManagementRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetNodePoolManagementFields {
                  project_id: String, zone: String, cluster_id: String, node_pool_id: String,
                  management: $crate::types::NodeManagement } }
            { set_labels, "SetLabels",
              $crate::types::SetLabelsRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetLabelsFields {
                  project_id: String, zone: String, cluster_id: String,
                  resource_labels: ::std::collections::HashMap<String, String>,
                  label_fingerprint: String } }
            { set_legacy_abac, "SetLegacyAbac",
              $crate::types::SetLegacyAbacRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetLegacyAbacFields {
                  project_id: String, zone: String, cluster_id: String, enabled: bool } }
            { start_ip_rotation, "StartIPRotation",
              $crate::types::StartIpRotationRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: StartIpRotationFields { project_id: String, zone: String, cluster_id: String } }
            { complete_ip_rotation, "CompleteIPRotation",
              $crate::types::CompleteIpRotationRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: CompleteIpRotationFields { project_id: String, zone: String, cluster_id: String } }
            { set_node_pool_size, "SetNodePoolSize",
              $crate::types::SetNodePoolSizeRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetNodePoolSizeFields {} }
            { set_network_policy, "SetNetworkPolicy",
              $crate::types::SetNetworkPolicyRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetNetworkPolicyFields {
                  project_id: String, zone: String, cluster_id: String,
                  network_policy: $crate::types::NetworkPolicy } }
            { set_maintenance_policy, "SetMaintenancePolicy",
              $crate::types::SetMaintenancePolicyRequest => $crate::types::Operation,
              route: name, retry: NonIdempotent, shape: Unary,
              fields: SetMaintenancePolicyFields {
                  project_id: String, zone: String, cluster_id: String,
                  maintenance_policy: $crate::types::MaintenancePolicy } }
            { list_usable_subnetworks, "ListUsableSubnetworks",
              $crate::types::ListUsableSubnetworksRequest => $crate::types::ListUsableSubnetworksResponse,
              route: parent, retry: NonIdempotent, shape: Paged,
              fields: ListUsableSubnetworksFields { parent: String } }
            { list_locations, "ListLocations",
              $crate::types::ListLocationsRequest => $crate::types::ListLocationsResponse,
              route: parent, retry: Idempotent, shape: Unary,
              fields: ListLocationsFields { parent: String } }
        }
    };
}

/// Default retry behaviour of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Reads and deletes: retried on `DEADLINE_EXCEEDED`/`UNAVAILABLE`
    /// within 20 s, 20 s per attempt.
    Idempotent,
    /// Single attempt, 45 s timeout.
    NonIdempotent,
}

impl RetryClass {
    #[must_use]
    pub fn default_retry(self) -> Option<RetryPolicy> {
        match self {
            Self::Idempotent => Some(RetryPolicy::default()),
            Self::NonIdempotent => None,
        }
    }

    #[must_use]
    pub fn default_timeout(self) -> Duration {
        match self {
            Self::Idempotent => Duration::from_secs(20),
            Self::NonIdempotent => Duration::from_secs(45),
        }
    }

    fn wrap(self, name: &'static str) -> WrappedMethod {
        WrappedMethod::new(name, self.default_retry(), Some(self.default_timeout()))
    }
}

macro_rules! impl_routing_params {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        $(
            impl ::clustermgr_core::routing::RoutingParams for $req {
                fn routing_params(&self) -> Vec<(&'static str, String)> {
                    vec![(stringify!($route), self.$route.clone())]
                }
            }
        )*
    };
}

for_each_operation!(impl_routing_params);

macro_rules! operation_table {
    ($( { $op:ident, $rpc:literal, $req:ty => $resp:ty,
          route: $route:ident, retry: $retry:ident, shape: $shape:ident,
          fields: $fields:ident { $($f:ident : $fty:ty),* $(,)? } } )*) => {
        /// `(operation, rpc name, retry class)` for every operation.
        pub const OPERATIONS: &[(&str, &str, RetryClass)] = &[
            $((stringify!($op), $rpc, RetryClass::$retry),)*
        ];
    };
}

for_each_operation!(operation_table);

/// Wrapped methods of a transport, keyed by operation name.
///
/// Built once at transport construction; the client looks methods up here
/// instead of re-deriving retry defaults per call.
#[derive(Debug, Clone)]
pub struct WrappedMethods {
    methods: HashMap<&'static str, WrappedMethod>,
}

impl Default for WrappedMethods {
    fn default() -> Self {
        Self::defaults()
    }
}

impl WrappedMethods {
    /// Every operation wrapped with its retry class defaults.
    #[must_use]
    pub fn defaults() -> Self {
        let methods = OPERATIONS
            .iter()
            .map(|&(name, _, class)| (name, class.wrap(name)))
            .collect();
        Self { methods }
    }

    /// Replace one method's defaults.
    #[must_use]
    pub fn with_method(mut self, method: WrappedMethod) -> Self {
        self.methods.insert(method.name(), method);
        self
    }

    /// Look up the wrapped method for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the transport has no
    /// method by that name.
    pub fn get(&self, name: &str) -> Result<&WrappedMethod, ClientError> {
        self.methods.get(name).ok_or_else(|| {
            ClientError::configuration(format!("transport has no wrapped method '{name}'"))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// `/package.Service/Method` path of an RPC.
#[must_use]
pub fn rpc_path(rpc: &str) -> String {
    format!("/{SERVICE_NAME}/{rpc}")
}
