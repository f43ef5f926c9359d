//! Controller-specific error types.
//!
//! Everything a reconcile cycle can fail with. Not-found is never an error
//! here: a missing object ends the cycle and a missing cluster drives create.

use elasticache_client::ElastiCacheError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the ElastiCache Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// AWS ElastiCache API error
    #[error("ElastiCache error: {0}")]
    ElastiCache(#[from] ElastiCacheError),

    /// Optimistic-concurrency conflict: the object changed since it was read
    #[error("Conflict writing {0}: object was modified concurrently")]
    Conflict(String),

    /// The object disappeared before a write reached it
    #[error("ElastiCache {0} not found")]
    NotFound(String),

    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Fingerprint encoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}

impl ControllerError {
    /// Map a failed write against `namespace/name`: HTTP 409 becomes `Conflict`,
    /// HTTP 404 becomes `NotFound`
    pub fn from_write(err: KubeError, namespace: &str, name: &str) -> Self {
        match err {
            KubeError::Api(ae) if ae.code == 409 => {
                ControllerError::Conflict(format!("{}/{}", namespace, name))
            }
            KubeError::Api(ae) if ae.code == 404 => {
                ControllerError::NotFound(format!("{}/{}", namespace, name))
            }
            other => ControllerError::Kube(other),
        }
    }

    /// True when the cycle lost an optimistic-concurrency race
    pub fn is_conflict(&self) -> bool {
        matches!(self, ControllerError::Conflict(_))
    }
}
