//! Access to `ElastiCache` objects in the Kubernetes API.
//!
//! The reconciler talks to the cluster only through `CacheStore`, so its state
//! machine can be driven by an in-memory store in tests.
//!
//! Every write is a JSON merge patch that carries the `resourceVersion` of the
//! copy the caller last saw. If someone else updated the object in between the
//! API server answers 409, surfaced as `ControllerError::Conflict`. Each write
//! returns the object as stored by the server; callers continue from that copy.

use crate::error::ControllerError;
use crds::{ElastiCache, ElastiCacheStatus};
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::{Value, json};
use tracing::debug;

/// Read/write access to `ElastiCache` objects
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch an object; `None` when it no longer exists
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ElastiCache>, ControllerError>;

    /// Replace the status subresource
    async fn patch_status(
        &self,
        obj: &ElastiCache,
        status: &ElastiCacheStatus,
    ) -> Result<ElastiCache, ControllerError>;

    /// Set a single annotation, leaving the others untouched
    async fn set_annotation(
        &self,
        obj: &ElastiCache,
        key: &str,
        value: &str,
    ) -> Result<ElastiCache, ControllerError>;

    /// Replace the finalizer list
    async fn set_finalizers(
        &self,
        obj: &ElastiCache,
        finalizers: Vec<String>,
    ) -> Result<ElastiCache, ControllerError>;
}

/// `CacheStore` backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<ElastiCache> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Merge patch body guarded by the object's resourceVersion
pub(crate) fn guarded_patch(obj: &ElastiCache, mut body: Value) -> Value {
    if let Some(rv) = obj.resource_version() {
        body["metadata"]["resourceVersion"] = json!(rv);
    }
    body
}

#[async_trait::async_trait]
impl CacheStore for KubeStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ElastiCache>, ControllerError> {
        Ok(self.api(namespace).get_opt(name).await?)
    }

    async fn patch_status(
        &self,
        obj: &ElastiCache,
        status: &ElastiCacheStatus,
    ) -> Result<ElastiCache, ControllerError> {
        let namespace = obj.namespace().unwrap_or_default();
        let name = obj.name_any();
        debug!("Patching status of ElastiCache {}/{}: {:?}", namespace, name, status);

        let patch = guarded_patch(obj, json!({ "status": status }));
        self.api(&namespace)
            .patch_status(&name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| ControllerError::from_write(e, &namespace, &name))
    }

    async fn set_annotation(
        &self,
        obj: &ElastiCache,
        key: &str,
        value: &str,
    ) -> Result<ElastiCache, ControllerError> {
        let namespace = obj.namespace().unwrap_or_default();
        let name = obj.name_any();
        debug!("Setting annotation {} on ElastiCache {}/{}", key, namespace, name);

        let patch = guarded_patch(
            obj,
            json!({ "metadata": { "annotations": { key: value } } }),
        );
        self.api(&namespace)
            .patch(&name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| ControllerError::from_write(e, &namespace, &name))
    }

    async fn set_finalizers(
        &self,
        obj: &ElastiCache,
        finalizers: Vec<String>,
    ) -> Result<ElastiCache, ControllerError> {
        let namespace = obj.namespace().unwrap_or_default();
        let name = obj.name_any();
        debug!(
            "Setting finalizers on ElastiCache {}/{}: {:?}",
            namespace, name, finalizers
        );

        // Merge patch replaces lists wholesale
        let patch = guarded_patch(obj, json!({ "metadata": { "finalizers": finalizers } }));
        self.api(&namespace)
            .patch(&name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| ControllerError::from_write(e, &namespace, &name))
    }
}
