//! Mock ElastiCacheClient for unit testing
//!
//! This module provides an in-memory implementation of `ElastiCacheClientTrait`
//! that records every call so tests can assert on exactly which provider
//! operations a reconcile cycle issued.

use crate::elasticache_trait::ElastiCacheClientTrait;
use crate::error::ElastiCacheError;
use crate::models::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A provider call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Describe(String),
    Create(CreateCacheClusterRequest),
    Modify(ModifyCacheClusterRequest),
    Delete(String),
}

impl RecordedCall {
    /// True for create, modify and delete
    pub fn is_mutation(&self) -> bool {
        !matches!(self, RecordedCall::Describe(_))
    }
}

/// Mock ElastiCacheClient for testing
///
/// Clones share state, so a test can hand one clone to the code under test and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockElastiCacheClient {
    clusters: Arc<Mutex<HashMap<String, CacheCluster>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failures: Arc<Mutex<HashMap<&'static str, ElastiCacheError>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockElastiCacheClient {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster to the mock store (for test setup)
    pub fn add_cluster(&self, cluster: CacheCluster) {
        lock(&self.clusters).insert(cluster.cache_cluster_id.clone(), cluster);
    }

    /// Remove a cluster, simulating AWS finishing a deletion or an out-of-band delete
    pub fn remove_cluster(&self, cache_cluster_id: &str) {
        lock(&self.clusters).remove(cache_cluster_id);
    }

    /// Overwrite the lifecycle status of a stored cluster
    pub fn set_status(&self, cache_cluster_id: &str, status: &str) {
        if let Some(cluster) = lock(&self.clusters).get_mut(cache_cluster_id) {
            cluster.cache_cluster_status = Some(status.to_string());
        }
    }

    /// Current state of a stored cluster
    pub fn cluster(&self, cache_cluster_id: &str) -> Option<CacheCluster> {
        lock(&self.clusters).get(cache_cluster_id).cloned()
    }

    /// Make the next call of `operation` ("describe", "create", "modify", "delete") fail once
    pub fn fail_next(&self, operation: &'static str, error: ElastiCacheError) {
        lock(&self.failures).insert(operation, error);
    }

    /// Every call observed so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Only the create/modify/delete calls observed so far
    pub fn mutations(&self) -> Vec<RecordedCall> {
        lock(&self.calls).iter().filter(|c| c.is_mutation()).cloned().collect()
    }

    /// Forget recorded calls, keeping stored clusters
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn record(&self, operation: &'static str, call: RecordedCall) -> Result<(), ElastiCacheError> {
        lock(&self.calls).push(call);
        match lock(&self.failures).remove(operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ElastiCacheClientTrait for MockElastiCacheClient {
    async fn describe_cache_cluster(
        &self,
        cache_cluster_id: &str,
    ) -> Result<Option<CacheCluster>, ElastiCacheError> {
        self.record("describe", RecordedCall::Describe(cache_cluster_id.to_string()))?;
        Ok(self.cluster(cache_cluster_id))
    }

    async fn create_cache_cluster(
        &self,
        request: CreateCacheClusterRequest,
    ) -> Result<CacheCluster, ElastiCacheError> {
        self.record("create", RecordedCall::Create(request.clone()))?;

        let mut clusters = lock(&self.clusters);
        if clusters.contains_key(&request.cache_cluster_id) {
            return Err(ElastiCacheError::Api {
                operation: "CreateCacheCluster",
                code: "CacheClusterAlreadyExists".to_string(),
                message: format!("Cache cluster {} already exists.", request.cache_cluster_id),
            });
        }

        let cluster = CacheCluster {
            cache_cluster_id: request.cache_cluster_id.clone(),
            cache_cluster_status: Some("creating".to_string()),
            arn: Some(format!(
                "arn:aws:elasticache:us-east-1:000000000000:cluster:{}",
                request.cache_cluster_id
            )),
            engine: request.engine,
            engine_version: request.engine_version,
            cache_node_type: request.cache_node_type,
            num_cache_nodes: request.num_cache_nodes,
            preferred_availability_zone: request.preferred_availability_zone,
            preferred_maintenance_window: request.preferred_maintenance_window,
            snapshot_retention_limit: request.snapshot_retention_limit,
            snapshot_window: request.snapshot_window,
        };
        clusters.insert(cluster.cache_cluster_id.clone(), cluster.clone());
        Ok(cluster)
    }

    async fn modify_cache_cluster(
        &self,
        request: ModifyCacheClusterRequest,
    ) -> Result<CacheCluster, ElastiCacheError> {
        self.record("modify", RecordedCall::Modify(request.clone()))?;

        let mut clusters = lock(&self.clusters);
        let cluster = clusters
            .get_mut(&request.cache_cluster_id)
            .ok_or_else(|| ElastiCacheError::Api {
                operation: "ModifyCacheCluster",
                code: "CacheClusterNotFound".to_string(),
                message: format!("Cache cluster {} not found.", request.cache_cluster_id),
            })?;

        cluster.cache_cluster_status = Some("modifying".to_string());
        if request.engine_version.is_some() {
            cluster.engine_version = request.engine_version;
        }
        if request.cache_node_type.is_some() {
            cluster.cache_node_type = request.cache_node_type;
        }
        if request.num_cache_nodes.is_some() {
            cluster.num_cache_nodes = request.num_cache_nodes;
        }
        if request.preferred_maintenance_window.is_some() {
            cluster.preferred_maintenance_window = request.preferred_maintenance_window;
        }
        if request.snapshot_retention_limit.is_some() {
            cluster.snapshot_retention_limit = request.snapshot_retention_limit;
        }
        if request.snapshot_window.is_some() {
            cluster.snapshot_window = request.snapshot_window;
        }
        Ok(cluster.clone())
    }

    async fn delete_cache_cluster(&self, cache_cluster_id: &str) -> Result<(), ElastiCacheError> {
        self.record("delete", RecordedCall::Delete(cache_cluster_id.to_string()))?;

        // AWS keeps reporting the cluster as "deleting" for a while
        if let Some(cluster) = lock(&self.clusters).get_mut(cache_cluster_id) {
            cluster.cache_cluster_status = Some("deleting".to_string());
        }
        Ok(())
    }
}
