//! Translation of an `ElastiCacheSpec` into ElastiCache API requests.
//!
//! Values are passed through verbatim. Nothing is defaulted here; unset fields
//! stay unset and AWS applies its own defaults.

use crds::ElastiCacheSpec;
use elasticache_client::{CreateCacheClusterRequest, ModifyCacheClusterRequest, Tag};

/// CreateCacheCluster parameters for every settable spec field
pub fn create_request(cache_cluster_id: &str, spec: &ElastiCacheSpec) -> CreateCacheClusterRequest {
    CreateCacheClusterRequest {
        cache_cluster_id: cache_cluster_id.to_string(),
        engine: Some(spec.engine.clone()),
        engine_version: Some(spec.engine_version.clone()),
        cache_node_type: Some(spec.cache_node_type.clone()),
        num_cache_nodes: Some(spec.num_cache_nodes),
        az_mode: spec.az_mode.map(|m| m.as_str().to_string()),
        auth_token: spec.auth_token.clone(),
        cache_parameter_group_name: spec.cache_parameter_group_name.clone(),
        cache_security_group_names: spec.cache_security_group_names.clone(),
        cache_subnet_group_name: spec.cache_subnet_group_name.clone(),
        notification_topic_arn: spec.notification_topic_arn.clone(),
        outpost_mode: spec.outpost_mode.map(|m| m.as_str().to_string()),
        port: spec.port,
        preferred_availability_zone: spec.preferred_availability_zone.clone(),
        preferred_availability_zones: spec.preferred_availability_zones.clone(),
        preferred_maintenance_window: spec.preferred_maintenance_window.clone(),
        preferred_outpost_arn: spec.preferred_outpost_arn.clone(),
        preferred_outpost_arns: spec.preferred_outpost_arns.clone(),
        replication_group_id: spec.replication_group_id.clone(),
        security_group_ids: spec.security_group_ids.clone(),
        snapshot_arns: spec.snapshot_arns.clone(),
        snapshot_name: spec.snapshot_name.clone(),
        snapshot_retention_limit: spec.snapshot_retention_limit,
        snapshot_window: spec.snapshot_window.clone(),
        tags: spec.tags.as_ref().map(|tags| {
            tags.iter()
                .map(|t| Tag {
                    key: t.key.clone(),
                    value: t.value.clone(),
                })
                .collect()
        }),
    }
}

/// ModifyCacheCluster parameters: the mutable subset of the spec.
///
/// Creation-only fields (engine, subnet group, port, placement, outposts,
/// replication group, snapshots to restore, tags) are never sent.
pub fn modify_request(cache_cluster_id: &str, spec: &ElastiCacheSpec) -> ModifyCacheClusterRequest {
    ModifyCacheClusterRequest {
        cache_cluster_id: cache_cluster_id.to_string(),
        az_mode: spec.az_mode.map(|m| m.as_str().to_string()),
        auth_token: spec.auth_token.clone(),
        auth_token_update_strategy: spec.auth_token_update_strategy.map(|s| s.as_str().to_string()),
        cache_node_type: Some(spec.cache_node_type.clone()),
        cache_parameter_group_name: spec.cache_parameter_group_name.clone(),
        cache_security_group_names: spec.cache_security_group_names.clone(),
        engine_version: Some(spec.engine_version.clone()),
        notification_topic_arn: spec.notification_topic_arn.clone(),
        num_cache_nodes: Some(spec.num_cache_nodes),
        preferred_maintenance_window: spec.preferred_maintenance_window.clone(),
        security_group_ids: spec.security_group_ids.clone(),
        snapshot_retention_limit: spec.snapshot_retention_limit,
        snapshot_window: spec.snapshot_window.clone(),
    }
}
