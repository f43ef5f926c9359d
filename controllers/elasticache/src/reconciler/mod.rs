//! Reconciliation logic for ElastiCache CRDs.
//!
//! One cycle per invocation:
//! 1. load the object (gone: nothing to do)
//! 2. describe the cluster; create it when absent, modify it when the spec
//!    drifted from the last applied fingerprint
//! 3. project the remote status
//! 4. on deletion, delete the cluster and then release the finalizer
//! 5. otherwise make sure the finalizer is attached and requeue
//!
//! A cycle that creates the cluster returns before step 5, so the finalizer is
//! attached by the next cycle. The status and annotation writes of the create
//! re-trigger the watch, which keeps the window short; an object deleted inside
//! it leaves the new cluster behind in AWS.
//!
//! Provider and store errors abort the cycle unchanged; the watcher's error
//! policy decides when to try again.

pub mod requests;


use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::fingerprint;
use crate::status;
use crate::store::CacheStore;
use crds::{ElastiCache, FINALIZER, LAST_APPLIED_ANNOTATION};
use elasticache_client::{CacheCluster, ElastiCacheClientTrait};
use kube::ResourceExt;
use requests::{create_request, modify_request};
use std::time::Duration;
use tracing::{debug, info};

/// What the caller should do once a cycle finished successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Wait for the next change to the object
    Done,
    /// Run again after the given delay
    RequeueAfter(Duration),
}

/// Reconciles ElastiCache resources against AWS.
pub struct Reconciler {
    pub(crate) elasticache_client: Box<dyn ElastiCacheClientTrait>,
    pub(crate) store: Box<dyn CacheStore>,
    create_requeue: Duration,
    resync_requeue: Duration,
}

impl Reconciler {
    /// Creates a new reconciler.
    pub fn new(
        elasticache_client: Box<dyn ElastiCacheClientTrait>,
        store: Box<dyn CacheStore>,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            elasticache_client,
            store,
            create_requeue: config.create_requeue,
            resync_requeue: config.resync_requeue,
        }
    }

    /// Run one reconcile cycle for `namespace/name`.
    pub async fn reconcile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReconcileOutcome, ControllerError> {
        let Some(mut obj) = self.store.get(namespace, name).await? else {
            debug!("ElastiCache {}/{} no longer exists, nothing to reconcile", namespace, name);
            return Ok(ReconcileOutcome::Done);
        };

        let deleting = obj.is_marked_for_deletion();
        let remote = self.elasticache_client.describe_cache_cluster(name).await?;

        let remote = match remote {
            None if deleting => {
                debug!(
                    "Cache cluster {} is already absent for deleted ElastiCache {}/{}",
                    name, namespace, name
                );
                None
            }
            None => {
                let applied = fingerprint::fingerprint(&obj.spec)?;
                info!(
                    "Creating cache cluster {} for ElastiCache {}/{} ({} {}, {} x {})",
                    name,
                    namespace,
                    name,
                    obj.spec.engine,
                    obj.spec.engine_version,
                    obj.spec.num_cache_nodes,
                    obj.spec.cache_node_type
                );
                let created = self
                    .elasticache_client
                    .create_cache_cluster(create_request(name, &obj.spec))
                    .await?;
                info!(
                    "Cache cluster {} created with status {}",
                    name,
                    created.cache_cluster_status.as_deref().unwrap_or("unknown")
                );

                obj = self.sync_status(obj, &created).await?;
                self.store
                    .set_annotation(&obj, LAST_APPLIED_ANNOTATION, &applied)
                    .await?;
                return Ok(ReconcileOutcome::RequeueAfter(self.create_requeue));
            }
            // Never reshape a cluster that is about to be destroyed
            Some(cluster) if deleting => Some(cluster),
            Some(cluster) => {
                if !fingerprint::needs_apply(&obj.spec, obj.last_applied())? {
                    debug!(
                        "ElastiCache {}/{} matches last applied spec, no modification needed",
                        namespace, name
                    );
                    Some(cluster)
                } else {
                    let applied = fingerprint::fingerprint(&obj.spec)?;
                    info!(
                        "ElastiCache {}/{} drifted from last apply, modifying cache cluster {}",
                        namespace, name, name
                    );
                    let modified = self
                        .elasticache_client
                        .modify_cache_cluster(modify_request(name, &obj.spec))
                        .await?;
                    obj = self.sync_status(obj, &modified).await?;
                    obj = self
                        .store
                        .set_annotation(&obj, LAST_APPLIED_ANNOTATION, &applied)
                        .await?;
                    Some(modified)
                }
            }
        };

        if let Some(cluster) = &remote {
            obj = self.sync_status(obj, cluster).await?;
        }

        if deleting {
            if !obj.has_finalizer() {
                debug!(
                    "ElastiCache {}/{} deleted without our finalizer, leaving AWS untouched",
                    namespace, name
                );
                return Ok(ReconcileOutcome::Done);
            }

            info!("Deleting cache cluster {} for ElastiCache {}/{}", name, namespace, name);
            self.elasticache_client.delete_cache_cluster(name).await?;

            let remaining: Vec<String> = obj
                .finalizers()
                .iter()
                .filter(|f| f.as_str() != FINALIZER)
                .cloned()
                .collect();
            self.store.set_finalizers(&obj, remaining).await?;
            info!("Removed finalizer from ElastiCache {}/{}", namespace, name);
            return Ok(ReconcileOutcome::Done);
        }

        if !obj.has_finalizer() {
            let mut finalizers = obj.finalizers().to_vec();
            finalizers.push(FINALIZER.to_string());
            self.store.set_finalizers(&obj, finalizers).await?;
            info!("Added finalizer to ElastiCache {}/{}", namespace, name);
        }

        Ok(ReconcileOutcome::RequeueAfter(self.resync_requeue))
    }

    /// Persist the projected status if it changed, returning the latest copy of the object
    async fn sync_status(
        &self,
        obj: ElastiCache,
        remote: &CacheCluster,
    ) -> Result<ElastiCache, ControllerError> {
        match status::project(remote, obj.status.as_ref()) {
            Some(new_status) => {
                debug!(
                    "Updating status of ElastiCache {}/{} to {:?}",
                    obj.namespace().unwrap_or_default(),
                    obj.name_any(),
                    new_status.cache_cluster_status
                );
                self.store.patch_status(&obj, &new_status).await
            }
            None => Ok(obj),
        }
    }
}
