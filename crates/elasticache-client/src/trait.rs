//! ElastiCacheClient trait for mocking
//!
//! This trait abstracts the ElastiCache client so the controller's state machine
//! can run against an in-memory double in unit tests.

use crate::error::ElastiCacheError;
use crate::models::*;

/// Trait for ElastiCache cache cluster operations
///
/// All calls are side-effecting at the provider and none of them are idempotent
/// there: callers are responsible for sequencing them. All async methods must be
/// `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ElastiCacheClientTrait: Send + Sync {
    /// Looks up exactly one cache cluster by id.
    ///
    /// Returns `Ok(None)` when the cluster does not exist or when the provider
    /// reports anything other than a single match.
    async fn describe_cache_cluster(
        &self,
        cache_cluster_id: &str,
    ) -> Result<Option<CacheCluster>, ElastiCacheError>;

    /// Submits a creation request. Creation is asynchronous on the provider side.
    async fn create_cache_cluster(
        &self,
        request: CreateCacheClusterRequest,
    ) -> Result<CacheCluster, ElastiCacheError>;

    /// Submits a modification request that is applied immediately.
    async fn modify_cache_cluster(
        &self,
        request: ModifyCacheClusterRequest,
    ) -> Result<CacheCluster, ElastiCacheError>;

    /// Submits a deletion request and returns once it has been accepted.
    async fn delete_cache_cluster(&self, cache_cluster_id: &str) -> Result<(), ElastiCacheError>;
}
