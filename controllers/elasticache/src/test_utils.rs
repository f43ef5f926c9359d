//! Test utilities for unit testing the reconciler
//!
//! `MockCacheStore` stands in for the Kubernetes API: it keeps objects in
//! memory, enforces resourceVersion preconditions like the API server does,
//! and drops an object once it is marked for deletion and its last finalizer
//! is removed.

use crate::error::ControllerError;
use crate::store::CacheStore;
use crds::{ElastiCache, ElastiCacheSpec, ElastiCacheStatus, FINALIZER, LAST_APPLIED_ANNOTATION};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::ResourceExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Spec used by most tests: a single-node Redis 6.2 cluster
pub fn redis_spec() -> ElastiCacheSpec {
    ElastiCacheSpec {
        engine: "redis".to_string(),
        engine_version: "6.2".to_string(),
        cache_node_type: "cache.t3.micro".to_string(),
        num_cache_nodes: 1,
        ..Default::default()
    }
}

/// Helper to create a test ElastiCache CRD
pub fn create_test_elasticache(name: &str, namespace: &str) -> ElastiCache {
    let mut obj = ElastiCache::new(name, redis_spec());
    obj.metadata = ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    };
    obj
}

/// Attach the lifecycle finalizer
pub fn with_finalizer(mut obj: ElastiCache) -> ElastiCache {
    obj.finalizers_mut().push(FINALIZER.to_string());
    obj
}

/// Record `fingerprint` as the last applied spec
pub fn with_last_applied(mut obj: ElastiCache, fingerprint: &str) -> ElastiCache {
    obj.annotations_mut()
        .insert(LAST_APPLIED_ANNOTATION.to_string(), fingerprint.to_string());
    obj
}

/// Set the stored lifecycle status
pub fn with_status(mut obj: ElastiCache, status: &str) -> ElastiCache {
    obj.status = Some(ElastiCacheStatus {
        cache_cluster_status: Some(status.to_string()),
    });
    obj
}

/// Mark the object for deletion
pub fn marked_for_deletion(mut obj: ElastiCache) -> ElastiCache {
    obj.metadata.deletion_timestamp = Some(Time(Default::default()));
    obj
}

/// A write observed by the mock store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Status(ElastiCacheStatus),
    Annotation { key: String, value: String },
    Finalizers(Vec<String>),
}

#[derive(Default)]
struct StoreState {
    objects: HashMap<(String, String), ElastiCache>,
    writes: Vec<StoreWrite>,
    conflict_next_write: bool,
    update_after_next_get: bool,
}

/// In-memory `CacheStore`
#[derive(Clone, Default)]
pub struct MockCacheStore {
    state: Arc<Mutex<StoreState>>,
}

fn key(obj: &ElastiCache) -> (String, String) {
    (obj.namespace().unwrap_or_default(), obj.name_any())
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an object, assigning it a fresh resourceVersion
    pub fn insert(&self, mut obj: ElastiCache) {
        obj.metadata.resource_version = Some("1".to_string());
        self.lock().objects.insert(key(&obj), obj);
    }

    /// Current stored copy
    pub fn object(&self, namespace: &str, name: &str) -> Option<ElastiCache> {
        self.lock()
            .objects
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Every write observed so far, in order
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.lock().writes.clone()
    }

    /// Status writes only
    pub fn status_writes(&self) -> Vec<ElastiCacheStatus> {
        self.lock()
            .writes
            .iter()
            .filter_map(|w| match w {
                StoreWrite::Status(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded writes, keeping stored objects
    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }

    /// Make the next write fail as if another writer got there first
    pub fn conflict_next_write(&self) {
        self.lock().conflict_next_write = true;
    }

    /// Let another writer update the object right after the next `get`
    /// returns, so the caller holds a stale copy
    pub fn update_after_next_get(&self) {
        self.lock().update_after_next_get = true;
    }

    /// Simulate a concurrent update by another writer
    pub fn bump_resource_version(&self, namespace: &str, name: &str) {
        if let Some(obj) = self
            .lock()
            .objects
            .get_mut(&(namespace.to_string(), name.to_string()))
        {
            obj.metadata.resource_version = Some(next_version(obj));
        }
    }

    fn write<F>(
        &self,
        obj: &ElastiCache,
        record: StoreWrite,
        apply: F,
    ) -> Result<ElastiCache, ControllerError>
    where
        F: FnOnce(&mut ElastiCache),
    {
        let mut state = self.lock();
        let id = key(obj);
        let conflict = ControllerError::Conflict(format!("{}/{}", id.0, id.1));

        if std::mem::take(&mut state.conflict_next_write) {
            return Err(conflict);
        }

        let stored = state
            .objects
            .get_mut(&id)
            .ok_or_else(|| ControllerError::NotFound(format!("{}/{}", id.0, id.1)))?;
        if stored.metadata.resource_version != obj.metadata.resource_version {
            return Err(conflict);
        }

        apply(stored);
        stored.metadata.resource_version = Some(next_version(stored));
        let updated = stored.clone();

        if updated.is_marked_for_deletion() && updated.finalizers().is_empty() {
            state.objects.remove(&id);
        }
        state.writes.push(record);
        Ok(updated)
    }
}

fn next_version(obj: &ElastiCache) -> String {
    let current: u64 = obj
        .metadata
        .resource_version
        .as_deref()
        .and_then(|rv| rv.parse().ok())
        .unwrap_or(0);
    (current + 1).to_string()
}

#[async_trait::async_trait]
impl CacheStore for MockCacheStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ElastiCache>, ControllerError> {
        let found = self.object(namespace, name);
        if std::mem::take(&mut self.lock().update_after_next_get) {
            self.bump_resource_version(namespace, name);
        }
        Ok(found)
    }

    async fn patch_status(
        &self,
        obj: &ElastiCache,
        status: &ElastiCacheStatus,
    ) -> Result<ElastiCache, ControllerError> {
        let status = status.clone();
        self.write(obj, StoreWrite::Status(status.clone()), move |stored| {
            stored.status = Some(status);
        })
    }

    async fn set_annotation(
        &self,
        obj: &ElastiCache,
        key: &str,
        value: &str,
    ) -> Result<ElastiCache, ControllerError> {
        let record = StoreWrite::Annotation {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.write(obj, record, |stored| {
            stored.annotations_mut().insert(key.to_string(), value.to_string());
        })
    }

    async fn set_finalizers(
        &self,
        obj: &ElastiCache,
        finalizers: Vec<String>,
    ) -> Result<ElastiCache, ControllerError> {
        self.write(obj, StoreWrite::Finalizers(finalizers.clone()), move |stored| {
            stored.metadata.finalizers = Some(finalizers);
        })
    }
}
