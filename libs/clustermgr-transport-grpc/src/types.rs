//! Cluster service messages (`google.container.v1beta1`).
//!
//! A reduced subset of the published schema: every field kept here uses the
//! published tag, so the records stay wire compatible with the full service.
//! Unknown fields sent by the server are skipped on decode.

use std::collections::HashMap;

use clustermgr_core::pager::{PageRequest, PageResponse};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cluster {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(int32, tag = "3")]
    pub initial_node_count: i32,
    #[prost(message, optional, tag = "5")]
    pub master_auth: Option<MasterAuth>,
    #[prost(string, tag = "6")]
    pub logging_service: String,
    #[prost(string, tag = "7")]
    pub monitoring_service: String,
    #[prost(string, tag = "8")]
    pub network: String,
    #[prost(string, tag = "9")]
    pub cluster_ipv4_cidr: String,
    #[prost(message, optional, tag = "10")]
    pub addons_config: Option<AddonsConfig>,
    #[prost(string, tag = "11")]
    pub subnetwork: String,
    #[prost(message, repeated, tag = "12")]
    pub node_pools: Vec<NodePool>,
    #[prost(string, repeated, tag = "13")]
    pub locations: Vec<String>,
    #[prost(bool, tag = "14")]
    pub enable_kubernetes_alpha: bool,
    #[prost(map = "string, string", tag = "15")]
    pub resource_labels: HashMap<String, String>,
    #[prost(string, tag = "16")]
    pub label_fingerprint: String,
    #[prost(message, optional, tag = "18")]
    pub legacy_abac: Option<LegacyAbac>,
    #[prost(message, optional, tag = "19")]
    pub network_policy: Option<NetworkPolicy>,
    #[prost(message, optional, tag = "23")]
    pub maintenance_policy: Option<MaintenancePolicy>,
    #[prost(string, tag = "100")]
    pub self_link: String,
    #[prost(string, tag = "101")]
    pub zone: String,
    #[prost(string, tag = "102")]
    pub endpoint: String,
    #[prost(string, tag = "103")]
    pub initial_cluster_version: String,
    #[prost(string, tag = "104")]
    pub current_master_version: String,
    #[prost(string, tag = "105")]
    pub current_node_version: String,
    #[prost(string, tag = "106")]
    pub create_time: String,
    #[prost(enumeration = "cluster::Status", tag = "107")]
    pub status: i32,
    #[prost(string, tag = "108")]
    pub status_message: String,
    #[prost(string, tag = "114")]
    pub location: String,
}

pub mod cluster {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Status {
        Unspecified = 0,
        Provisioning = 1,
        Running = 2,
        Reconciling = 3,
        Stopping = 4,
        Error = 5,
        Degraded = 6,
    }
}

/// Desired changes applied by `update_cluster`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClusterUpdate {
    #[prost(string, tag = "4")]
    pub desired_node_version: String,
    #[prost(string, tag = "5")]
    pub desired_monitoring_service: String,
    #[prost(message, optional, tag = "6")]
    pub desired_addons_config: Option<AddonsConfig>,
    #[prost(string, tag = "7")]
    pub desired_node_pool_id: String,
    #[prost(string, tag = "8")]
    pub desired_image_type: String,
    #[prost(string, repeated, tag = "10")]
    pub desired_locations: Vec<String>,
    #[prost(string, tag = "100")]
    pub desired_master_version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodePool {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(int32, tag = "3")]
    pub initial_node_count: i32,
    #[prost(message, optional, tag = "4")]
    pub autoscaling: Option<NodePoolAutoscaling>,
    #[prost(message, optional, tag = "5")]
    pub management: Option<NodeManagement>,
    #[prost(string, repeated, tag = "13")]
    pub locations: Vec<String>,
    #[prost(string, tag = "100")]
    pub self_link: String,
    #[prost(string, tag = "101")]
    pub version: String,
    #[prost(string, repeated, tag = "102")]
    pub instance_group_urls: Vec<String>,
    #[prost(enumeration = "node_pool::Status", tag = "103")]
    pub status: i32,
    #[prost(string, tag = "104")]
    pub status_message: String,
}

pub mod node_pool {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Status {
        Unspecified = 0,
        Provisioning = 1,
        Running = 2,
        RunningWithError = 3,
        Reconciling = 4,
        Stopping = 5,
        Error = 6,
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct NodePoolAutoscaling {
    #[prost(bool, tag = "1")]
    pub enabled: bool,
    #[prost(int32, tag = "2")]
    pub min_node_count: i32,
    #[prost(int32, tag = "3")]
    pub max_node_count: i32,
    #[prost(bool, tag = "4")]
    pub autoprovisioned: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct NodeManagement {
    #[prost(bool, tag = "1")]
    pub auto_upgrade: bool,
    #[prost(bool, tag = "2")]
    pub auto_repair: bool,
}

/// Master authentication material. The password and client key are secrets.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MasterAuth {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, tag = "2")]
    pub password: String,
    #[prost(string, tag = "100")]
    pub cluster_ca_certificate: String,
    #[prost(string, tag = "101")]
    pub client_certificate: String,
    #[prost(string, tag = "102")]
    pub client_key: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AddonsConfig {
    #[prost(message, optional, tag = "1")]
    pub http_load_balancing: Option<AddonToggle>,
    #[prost(message, optional, tag = "2")]
    pub horizontal_pod_autoscaling: Option<AddonToggle>,
    #[prost(message, optional, tag = "3")]
    pub kubernetes_dashboard: Option<AddonToggle>,
    #[prost(message, optional, tag = "4")]
    pub network_policy_config: Option<AddonToggle>,
}

/// Shared shape of the per-addon messages (`{ bool disabled = 1; }`).
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AddonToggle {
    #[prost(bool, tag = "1")]
    pub disabled: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct LegacyAbac {
    #[prost(bool, tag = "1")]
    pub enabled: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct NetworkPolicy {
    #[prost(enumeration = "network_policy::Provider", tag = "1")]
    pub provider: i32,
    #[prost(bool, tag = "2")]
    pub enabled: bool,
}

pub mod network_policy {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Provider {
        Unspecified = 0,
        Calico = 1,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MaintenancePolicy {
    #[prost(message, optional, tag = "1")]
    pub window: Option<MaintenanceWindow>,
    #[prost(string, tag = "3")]
    pub resource_version: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MaintenanceWindow {
    #[prost(message, optional, tag = "2")]
    pub daily_maintenance_window: Option<DailyMaintenanceWindow>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DailyMaintenanceWindow {
    /// `HH:MM` in GMT.
    #[prost(string, tag = "2")]
    pub start_time: String,
    #[prost(string, tag = "3")]
    pub duration: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(enumeration = "operation::Type", tag = "3")]
    pub operation_type: i32,
    #[prost(enumeration = "operation::Status", tag = "4")]
    pub status: i32,
    #[prost(string, tag = "5")]
    pub status_message: String,
    #[prost(string, tag = "6")]
    pub self_link: String,
    #[prost(string, tag = "7")]
    pub target_link: String,
    #[prost(string, tag = "8")]
    pub detail: String,
    #[prost(string, tag = "9")]
    pub location: String,
    #[prost(string, tag = "10")]
    pub start_time: String,
    #[prost(string, tag = "11")]
    pub end_time: String,
}

pub mod operation {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Status {
        Unspecified = 0,
        Pending = 1,
        Running = 2,
        Done = 3,
        Aborting = 4,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Unspecified = 0,
        CreateCluster = 1,
        DeleteCluster = 2,
        UpgradeMaster = 3,
        UpgradeNodes = 4,
        RepairCluster = 5,
        UpdateCluster = 6,
        CreateNodePool = 7,
        DeleteNodePool = 8,
        SetNodePoolManagement = 9,
        AutoRepairNodes = 10,
        AutoUpgradeNodes = 11,
        SetLabels = 12,
        SetMasterAuth = 13,
        SetNodePoolSize = 14,
        SetNetworkPolicy = 15,
        SetMaintenancePolicy = 16,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerConfig {
    #[prost(string, tag = "1")]
    pub default_cluster_version: String,
    #[prost(string, repeated, tag = "3")]
    pub valid_node_versions: Vec<String>,
    #[prost(string, tag = "4")]
    pub default_image_type: String,
    #[prost(string, repeated, tag = "5")]
    pub valid_image_types: Vec<String>,
    #[prost(string, repeated, tag = "6")]
    pub valid_master_versions: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UsableSubnetwork {
    #[prost(string, tag = "1")]
    pub subnetwork: String,
    #[prost(string, tag = "2")]
    pub network: String,
    #[prost(string, tag = "3")]
    pub ip_cidr_range: String,
    #[prost(string, tag = "5")]
    pub status_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Location {
    #[prost(enumeration = "location::LocationType", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(bool, tag = "3")]
    pub recommended: bool,
}

pub mod location {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum LocationType {
        Unspecified = 0,
        Zone = 1,
        Region = 2,
    }
}

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListClustersRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "4")]
    pub parent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListClustersResponse {
    #[prost(message, repeated, tag = "1")]
    pub clusters: Vec<Cluster>,
    #[prost(string, repeated, tag = "2")]
    pub missing_zones: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetClusterRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "5")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateClusterRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(message, optional, tag = "3")]
    pub cluster: Option<Cluster>,
    #[prost(string, tag = "5")]
    pub parent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateClusterRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub update: Option<ClusterUpdate>,
    #[prost(string, tag = "5")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateNodePoolRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(string, tag = "5")]
    pub node_version: String,
    #[prost(string, tag = "6")]
    pub image_type: String,
    #[prost(string, tag = "8")]
    pub name: String,
    #[prost(string, repeated, tag = "13")]
    pub locations: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetNodePoolAutoscalingRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(message, optional, tag = "5")]
    pub autoscaling: Option<NodePoolAutoscaling>,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetLoggingServiceRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub logging_service: String,
    #[prost(string, tag = "5")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetMonitoringServiceRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub monitoring_service: String,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetAddonsConfigRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub addons_config: Option<AddonsConfig>,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetLocationsRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, repeated, tag = "4")]
    pub locations: Vec<String>,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateMasterRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub master_version: String,
    #[prost(string, tag = "7")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetMasterAuthRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(enumeration = "set_master_auth_request::Action", tag = "4")]
    pub action: i32,
    #[prost(message, optional, tag = "5")]
    pub update: Option<MasterAuth>,
    #[prost(string, tag = "7")]
    pub name: String,
}

pub mod set_master_auth_request {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Action {
        Unknown = 0,
        SetPassword = 1,
        GeneratePassword = 2,
        SetUsername = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteClusterRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOperationsRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "4")]
    pub parent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOperationsResponse {
    #[prost(message, repeated, tag = "1")]
    pub operations: Vec<Operation>,
    #[prost(string, repeated, tag = "2")]
    pub missing_zones: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub operation_id: String,
    #[prost(string, tag = "5")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CancelOperationRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub operation_id: String,
    #[prost(string, tag = "4")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetServerConfigRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "4")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListNodePoolsRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "5")]
    pub parent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListNodePoolsResponse {
    #[prost(message, repeated, tag = "1")]
    pub node_pools: Vec<NodePool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetNodePoolRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateNodePoolRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub node_pool: Option<NodePool>,
    #[prost(string, tag = "6")]
    pub parent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteNodePoolRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RollbackNodePoolUpgradeRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetNodePoolManagementRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(message, optional, tag = "5")]
    pub management: Option<NodeManagement>,
    #[prost(string, tag = "7")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetLabelsRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(map = "string, string", tag = "4")]
    pub resource_labels: HashMap<String, String>,
    #[prost(string, tag = "5")]
    pub label_fingerprint: String,
    #[prost(string, tag = "7")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetLegacyAbacRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(bool, tag = "4")]
    pub enabled: bool,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StartIpRotationRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "6")]
    pub name: String,
    #[prost(bool, tag = "7")]
    pub rotate_credentials: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompleteIpRotationRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "7")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetNodePoolSizeRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(string, tag = "4")]
    pub node_pool_id: String,
    #[prost(int32, tag = "5")]
    pub node_count: i32,
    #[prost(string, tag = "7")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetNetworkPolicyRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub network_policy: Option<NetworkPolicy>,
    #[prost(string, tag = "6")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetMaintenancePolicyRequest {
    #[prost(string, tag = "1")]
    pub project_id: String,
    #[prost(string, tag = "2")]
    pub zone: String,
    #[prost(string, tag = "3")]
    pub cluster_id: String,
    #[prost(message, optional, tag = "4")]
    pub maintenance_policy: Option<MaintenancePolicy>,
    #[prost(string, tag = "5")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListUsableSubnetworksRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
    #[prost(string, tag = "2")]
    pub filter: String,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    #[prost(string, tag = "4")]
    pub page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListUsableSubnetworksResponse {
    #[prost(message, repeated, tag = "1")]
    pub subnetworks: Vec<UsableSubnetwork>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListLocationsRequest {
    #[prost(string, tag = "1")]
    pub parent: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListLocationsResponse {
    #[prost(message, repeated, tag = "1")]
    pub locations: Vec<Location>,
    #[prost(string, tag = "2")]
    pub next_page_token: String,
}

// ---------------------------------------------------------------------------
// Pagination and flattened-argument presence
// ---------------------------------------------------------------------------

impl PageRequest for ListUsableSubnetworksRequest {
    fn set_page_token(&mut self, token: String) {
        self.page_token = token;
    }
}

impl PageResponse for ListUsableSubnetworksResponse {
    type Item = UsableSubnetwork;

    fn next_page_token(&self) -> &str {
        &self.next_page_token
    }

    fn into_items(self) -> Vec<UsableSubnetwork> {
        self.subnetworks
    }
}

clustermgr_core::impl_field_presence_by_default!(
    Cluster,
    ClusterUpdate,
    NodePool,
    NodeManagement,
    AddonsConfig,
    NetworkPolicy,
    MaintenancePolicy,
);
