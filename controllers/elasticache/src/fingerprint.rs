//! Applied-state fingerprint.
//!
//! The `aws.microscaler.io/last-applied` annotation stores a fingerprint of the
//! spec that was last pushed to AWS. A cycle re-applies whenever the current
//! spec fingerprints differently.
//!
//! The fingerprint is the base64 (standard, padded) encoding of the JSON record
//! `{"version":1,"spec":{...}}` where the spec is put into canonical form first:
//! unset fields and empty lists are dropped, and lists whose order carries no
//! meaning are sorted. Two specs that differ only in such ordering therefore
//! share a fingerprint.

use crate::error::ControllerError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crds::ElastiCacheSpec;
use serde::Serialize;

/// Version tag of the canonical record layout
pub const FINGERPRINT_VERSION: u32 = 1;

#[derive(Serialize)]
struct FingerprintRecord<'a> {
    version: u32,
    spec: &'a ElastiCacheSpec,
}

/// Put a spec into canonical form
pub fn canonicalize(spec: &ElastiCacheSpec) -> ElastiCacheSpec {
    let mut canonical = spec.clone();

    sort_set(&mut canonical.cache_security_group_names);
    sort_set(&mut canonical.security_group_ids);
    sort_set(&mut canonical.preferred_availability_zones);
    sort_set(&mut canonical.preferred_outpost_arns);
    sort_set(&mut canonical.snapshot_arns);
    // Tag orders by key, then value with a null value first
    sort_set(&mut canonical.tags);

    canonical
}

fn sort_set<T: Ord>(list: &mut Option<Vec<T>>) {
    match list {
        Some(items) if items.is_empty() => *list = None,
        Some(items) => items.sort(),
        None => {}
    }
}

/// Compute the fingerprint of a spec
pub fn fingerprint(spec: &ElastiCacheSpec) -> Result<String, ControllerError> {
    let canonical = canonicalize(spec);
    let record = FingerprintRecord {
        version: FINGERPRINT_VERSION,
        spec: &canonical,
    };
    let bytes = serde_json::to_vec(&record).map_err(|e| {
        ControllerError::Serialization(format!("failed to encode spec fingerprint: {}", e))
    })?;
    Ok(STANDARD.encode(bytes))
}

/// Whether the spec must be (re)applied given the stored fingerprint
pub fn needs_apply(spec: &ElastiCacheSpec, stored: Option<&str>) -> Result<bool, ControllerError> {
    let current = fingerprint(spec)?;
    Ok(stored != Some(current.as_str()))
}
