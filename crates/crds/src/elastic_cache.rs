//! ElastiCache Custom Resource Definition
//!
//! Defines a Kubernetes CRD describing a single AWS ElastiCache cache cluster.
//! The object's name is used verbatim as the `CacheClusterId` in AWS.

use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{FINALIZER, LAST_APPLIED_ANNOTATION};

/// ElastiCacheSpec defines the desired state of an ElastiCache cache cluster
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "aws.microscaler.io",
    version = "v1alpha1",
    kind = "ElastiCache",
    namespaced,
    status = "ElastiCacheStatus",
    shortname = "ec",
    printcolumn = r#"{"name":"Engine","type":"string","jsonPath":".spec.engine"}"#,
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".spec.engineVersion"}"#,
    printcolumn = r#"{"name":"Node Type","type":"string","jsonPath":".spec.cacheNodeType"}"#,
    printcolumn = r#"{"name":"Status","type":"string","jsonPath":".status.cacheClusterStatus"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ElastiCacheSpec {
    /// Cache engine: `memcached` or `redis`
    pub engine: String,

    /// Engine version (e.g., "6.2"). Upgrades are possible, downgrades require recreation.
    pub engine_version: String,

    /// Node capacity class (e.g., "cache.t3.micro")
    pub cache_node_type: String,

    /// Number of cache nodes. Redis clusters must use 1, Memcached allows 1-40.
    pub num_cache_nodes: i32,

    /// Whether Memcached nodes live in a single AZ or are spread across AZs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az_mode: Option<AzMode>,

    /// Password for password protected servers (Redis AUTH)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// How `authToken` is applied on modification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token_update_strategy: Option<AuthTokenUpdateStrategy>,

    /// Parameter group to associate with the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_parameter_group_name: Option<String>,

    /// Cache security group names (clusters outside a VPC only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_security_group_names: Option<Vec<String>>,

    /// Subnet group used when launching into a VPC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_subnet_group_name: Option<String>,

    /// SNS topic ARN receiving cluster notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_topic_arn: Option<String>,

    /// Whether nodes are created in a single outpost or across outposts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outpost_mode: Option<OutpostMode>,

    /// Port on which each node accepts connections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,

    /// Availability Zone for all nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_availability_zone: Option<String>,

    /// Availability Zones for the nodes (Memcached only, order is not significant)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_availability_zones: Option<Vec<String>>,

    /// Weekly maintenance window, `ddd:hh24:mi-ddd:hh24:mi` (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_maintenance_window: Option<String>,

    /// Outpost ARN in which the cluster is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_outpost_arn: Option<String>,

    /// Outpost ARNs in which the cluster is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_outpost_arns: Option<Vec<String>>,

    /// Replication group to join as a read replica (Redis only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_group_id: Option<String>,

    /// VPC security group ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,

    /// S3 ARN of a Redis RDB snapshot used to seed the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_arns: Option<Vec<String>>,

    /// Name of a Redis snapshot to restore from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_name: Option<String>,

    /// Days automatic snapshots are retained (Redis only, 0 disables backups)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_retention_limit: Option<i32>,

    /// Daily snapshot window, e.g. "05:00-09:00" (Redis only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_window: Option<String>,

    /// Tags applied to the cluster at creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// A key/value tag. The value may be null.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag key (required)
    pub key: String,

    /// Tag value
    #[serde(default)]
    pub value: Option<String>,
}

/// Node placement mode across Availability Zones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum AzMode {
    #[serde(rename = "single-az")]
    SingleAz,
    #[serde(rename = "cross-az")]
    CrossAz,
}

impl AzMode {
    /// Wire value expected by the ElastiCache API
    pub fn as_str(self) -> &'static str {
        match self {
            AzMode::SingleAz => "single-az",
            AzMode::CrossAz => "cross-az",
        }
    }
}

/// Strategy used when changing the AUTH token of an existing cluster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthTokenUpdateStrategy {
    Set,
    Rotate,
    Delete,
}

impl AuthTokenUpdateStrategy {
    /// Wire value expected by the ElastiCache API
    pub fn as_str(self) -> &'static str {
        match self {
            AuthTokenUpdateStrategy::Set => "SET",
            AuthTokenUpdateStrategy::Rotate => "ROTATE",
            AuthTokenUpdateStrategy::Delete => "DELETE",
        }
    }
}

/// Node placement mode across Outposts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum OutpostMode {
    #[serde(rename = "single-outpost")]
    SingleOutpost,
    #[serde(rename = "cross-outpost")]
    CrossOutpost,
}

impl OutpostMode {
    /// Wire value expected by the ElastiCache API
    pub fn as_str(self) -> &'static str {
        match self {
            OutpostMode::SingleOutpost => "single-outpost",
            OutpostMode::CrossOutpost => "cross-outpost",
        }
    }
}

/// ElastiCacheStatus defines the observed state of an ElastiCache cache cluster
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElastiCacheStatus {
    /// Lifecycle status reported by AWS (e.g., "creating", "available", "deleting")
    #[serde(default)]
    pub cache_cluster_status: Option<String>,
}

impl ElastiCache {
    /// True once the owner has requested deletion of the object
    pub fn is_marked_for_deletion(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    /// True if the lifecycle finalizer is attached
    pub fn has_finalizer(&self) -> bool {
        self.finalizers().iter().any(|f| f == FINALIZER)
    }

    /// Fingerprint of the last applied spec, if one was recorded
    pub fn last_applied(&self) -> Option<&str> {
        self.annotations().get(LAST_APPLIED_ANNOTATION).map(String::as_str)
    }

    /// Currently stored lifecycle status
    pub fn cache_cluster_status(&self) -> Option<&str> {
        self.status.as_ref()?.cache_cluster_status.as_deref()
    }
}
