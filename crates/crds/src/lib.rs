//! ElastiCache Controller CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the ElastiCache controller.

pub mod elastic_cache;

pub use elastic_cache::*;

/// API group shared by every CRD in this crate
pub const API_GROUP: &str = "aws.microscaler.io";

/// Annotation holding the fingerprint of the last spec applied to AWS
pub const LAST_APPLIED_ANNOTATION: &str = "aws.microscaler.io/last-applied";

/// Finalizer guarding remote deletion before the object is released
pub const FINALIZER: &str = "aws.microscaler.io/finalizer";
