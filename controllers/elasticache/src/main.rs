//! ElastiCache Controller
//!
//! Reconciles `ElastiCache` custom resources against AWS ElastiCache cache
//! clusters: creates missing clusters, pushes spec changes, mirrors the
//! cluster status and deletes the cluster before the object is released.

mod config;
mod controller;
mod error;
mod fingerprint;
mod reconciler;
mod status;
mod store;
mod watcher;

#[cfg(test)]
mod test_utils;

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use controller::Controller;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // kube and the AWS SDK both use rustls; pin the process-wide provider
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        warn!("A rustls crypto provider was already installed, keeping it");
    }

    info!("Starting ElastiCache Controller");

    let config = ControllerConfig::from_env()?;

    info!("Configuration:");
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("all namespaces"));
    info!("  Create requeue: {:?}", config.create_requeue);
    info!("  Resync requeue: {:?}", config.resync_requeue);
    info!("  Error requeue: {:?}", config.error_requeue);
    info!("  Concurrency: {}", config.concurrency);

    // Initialize and run controller
    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
