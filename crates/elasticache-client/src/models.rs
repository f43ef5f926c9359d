//! ElastiCache data models
//!
//! Provider-neutral views of the cache cluster shapes exchanged with AWS. The
//! SDK types are converted at the edge in `client.rs` so callers never depend on
//! `aws-sdk-elasticache` directly.

use serde::{Deserialize, Serialize};

/// A cache cluster as reported by ElastiCache
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheCluster {
    pub cache_cluster_id: String,
    /// Lifecycle status: "creating", "available", "modifying", "deleting", ...
    pub cache_cluster_status: Option<String>,
    pub arn: Option<String>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub cache_node_type: Option<String>,
    pub num_cache_nodes: Option<i32>,
    pub preferred_availability_zone: Option<String>,
    pub preferred_maintenance_window: Option<String>,
    pub snapshot_retention_limit: Option<i32>,
    pub snapshot_window: Option<String>,
}

/// Key/value tag; the value may be null
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: Option<String>,
}

/// Parameters for CreateCacheCluster
///
/// Every field is passed to AWS verbatim; `None` means "let AWS decide".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCacheClusterRequest {
    pub cache_cluster_id: String,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub cache_node_type: Option<String>,
    pub num_cache_nodes: Option<i32>,
    pub az_mode: Option<String>,
    pub auth_token: Option<String>,
    pub cache_parameter_group_name: Option<String>,
    pub cache_security_group_names: Option<Vec<String>>,
    pub cache_subnet_group_name: Option<String>,
    pub notification_topic_arn: Option<String>,
    pub outpost_mode: Option<String>,
    pub port: Option<i32>,
    pub preferred_availability_zone: Option<String>,
    pub preferred_availability_zones: Option<Vec<String>>,
    pub preferred_maintenance_window: Option<String>,
    pub preferred_outpost_arn: Option<String>,
    pub preferred_outpost_arns: Option<Vec<String>>,
    pub replication_group_id: Option<String>,
    pub security_group_ids: Option<Vec<String>>,
    pub snapshot_arns: Option<Vec<String>>,
    pub snapshot_name: Option<String>,
    pub snapshot_retention_limit: Option<i32>,
    pub snapshot_window: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

/// Parameters for ModifyCacheCluster
///
/// Only fields AWS allows to change after creation. Modifications are always
/// submitted with `ApplyImmediately`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCacheClusterRequest {
    pub cache_cluster_id: String,
    pub az_mode: Option<String>,
    pub auth_token: Option<String>,
    pub auth_token_update_strategy: Option<String>,
    pub cache_node_type: Option<String>,
    pub cache_parameter_group_name: Option<String>,
    pub cache_security_group_names: Option<Vec<String>>,
    pub engine_version: Option<String>,
    pub notification_topic_arn: Option<String>,
    pub num_cache_nodes: Option<i32>,
    pub preferred_maintenance_window: Option<String>,
    pub security_group_ids: Option<Vec<String>>,
    pub snapshot_retention_limit: Option<i32>,
    pub snapshot_window: Option<String>,
}
