//! Status projection.
//!
//! The only place that decides what goes into `ElastiCache.status`.

use crds::ElastiCacheStatus;
use elasticache_client::CacheCluster;

/// Project the remote cluster onto the local status.
///
/// Returns `Some(status)` when the remote lifecycle status differs from the
/// stored one and `None` when nothing needs writing.
pub fn project(
    remote: &CacheCluster,
    observed: Option<&ElastiCacheStatus>,
) -> Option<ElastiCacheStatus> {
    let current = observed.and_then(|s| s.cache_cluster_status.as_deref());
    let remote_status = remote.cache_cluster_status.as_deref();

    if current == remote_status {
        return None;
    }

    Some(ElastiCacheStatus {
        cache_cluster_status: remote_status.map(str::to_string),
    })
}
