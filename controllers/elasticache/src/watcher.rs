//! Kubernetes resource watcher.
//!
//! Drives the reconciler from a `kube_runtime::Controller`, which handles
//! reconnection, per-object serialization and requeue scheduling.

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::reconciler::{ReconcileOutcome, Reconciler};
use crds::ElastiCache;
use futures::StreamExt;
use kube::{Api, ResourceExt};
use kube_runtime::controller::{Action, Config as RuntimeConfig};
use kube_runtime::{Controller, watcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Translate a finished cycle into a controller action
pub fn to_action(outcome: ReconcileOutcome) -> Action {
    match outcome {
        ReconcileOutcome::Done => Action::await_change(),
        ReconcileOutcome::RequeueAfter(delay) => Action::requeue(delay),
    }
}

/// Watches ElastiCache resources for changes.
pub struct Watcher {
    reconciler: Arc<Reconciler>,
    elasticache_api: Api<ElastiCache>,
    config: ControllerConfig,
}

impl Watcher {
    /// Creates a new watcher instance.
    pub fn new(
        reconciler: Arc<Reconciler>,
        elasticache_api: Api<ElastiCache>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            reconciler,
            elasticache_api,
            config,
        }
    }

    /// Watch ElastiCache objects until the controller stream ends
    pub async fn watch_elasticaches(&self) -> Result<(), ControllerError> {
        info!("Starting ElastiCache watcher");

        // Fixed retry interval, no backoff
        let error_requeue = self.config.error_requeue;
        let error_policy =
            move |obj: Arc<ElastiCache>, error: &ControllerError, _ctx: Arc<Reconciler>| {
                let namespace = obj.namespace().unwrap_or_default();
                let name = obj.name_any();
                if error.is_conflict() {
                    warn!(
                        "ElastiCache {}/{} changed during reconciliation, retrying in {:?}",
                        namespace, name, error_requeue
                    );
                } else {
                    error!(
                        "Reconciliation error for ElastiCache {}/{}: {} (retrying in {:?})",
                        namespace, name, error, error_requeue
                    );
                }
                Action::requeue(error_requeue)
            };

        let reconcile = |obj: Arc<ElastiCache>, ctx: Arc<Reconciler>| async move {
            let namespace = obj.namespace().unwrap_or_default();
            let name = obj.name_any();
            debug!("Reconciling ElastiCache {}/{}", namespace, name);
            ctx.reconcile(&namespace, &name).await.map(to_action)
        };

        // Debounce batches bursts of events (our own status and annotation
        // writes included) into a single cycle
        let controller_config = RuntimeConfig::default()
            .debounce(Duration::from_secs(1))
            .concurrency(self.config.concurrency);

        Controller::new(self.elasticache_api.clone(), watcher::Config::default())
            .with_config(controller_config)
            .run(reconcile, error_policy, self.reconciler.clone())
            .for_each(|res| async move {
                match res {
                    Ok((obj_ref, action)) => debug!("Reconciled {}: {:?}", obj_ref, action),
                    Err(e) => error!("Controller error for ElastiCache: {}", e),
                }
            })
            .await;

        Ok(())
    }
}
