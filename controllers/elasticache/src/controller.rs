//! Main controller implementation.
//!
//! Builds the Kubernetes and AWS clients, wires them into the reconciler and
//! runs the ElastiCache watcher in a background task.

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::store::KubeStore;
use crate::watcher::Watcher;
use crds::ElastiCache;
use elasticache_client::ElastiCacheClient;
use kube::{Api, Client};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Main controller for ElastiCache resource management.
pub struct Controller {
    elasticache_watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance and starts watching.
    pub async fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        info!("Initializing ElastiCache Controller");

        // Create Kubernetes client
        let kube_client = Client::try_default().await?;

        // Create ElastiCache client from the AWS provider chain
        let elasticache_client = ElastiCacheClient::from_env().await;
        match elasticache_client.region() {
            Some(region) => info!("  AWS region: {}", region),
            None => warn!("No AWS region resolved; set AWS_REGION or configure a profile"),
        }

        let elasticache_api: Api<ElastiCache> = match config.namespace.as_deref() {
            Some(ns) => Api::namespaced(kube_client.clone(), ns),
            None => Api::all(kube_client.clone()),
        };

        let reconciler = Arc::new(Reconciler::new(
            Box::new(elasticache_client),
            Box::new(KubeStore::new(kube_client)),
            &config,
        ));

        let watcher_instance = Arc::new(Watcher::new(reconciler, elasticache_api, config));

        let elasticache_watcher = {
            let watcher = watcher_instance.clone();
            tokio::spawn(async move { watcher.watch_elasticaches().await })
        };

        Ok(Self { elasticache_watcher })
    }

    /// Runs the controller until the watcher exits or a shutdown signal arrives.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("ElastiCache Controller running");

        tokio::select! {
            result = &mut self.elasticache_watcher => {
                result
                    .map_err(|e| {
                        ControllerError::Watch(format!("ElastiCache watcher panicked: {}", e))
                    })?
                    .map_err(|e| {
                        ControllerError::Watch(format!("ElastiCache watcher error: {}", e))
                    })?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping ElastiCache Controller");
                self.elasticache_watcher.abort();
            }
        }
        Ok(())
    }
}
