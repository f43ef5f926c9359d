//! ElastiCache API Client
//!
//! A thin client over the AWS ElastiCache API exposing exactly the four cache
//! cluster operations the controller needs: describe, create, modify and delete.
//!
//! # Example
//!
//! ```no_run
//! use elasticache_client::{ElastiCacheClient, ElastiCacheClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Credentials and region come from the default AWS provider chain
//! let client = ElastiCacheClient::from_env().await;
//!
//! match client.describe_cache_cluster("sessions").await? {
//!     Some(cluster) => println!("status: {:?}", cluster.cache_cluster_status),
//!     None => println!("cluster does not exist"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Not-found normalization**: a missing cluster is `Ok(None)`, never an error
//! - **Single-match rule**: describe only returns a cluster when exactly one matches
//! - **Mocking**: `MockElastiCacheClient` behind the `test-util` feature

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod elasticache_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::ElastiCacheClient;
pub use elasticache_trait::ElastiCacheClientTrait;
pub use error::ElastiCacheError;
pub use models::*;
#[cfg(feature = "test-util")]
pub use mock::{MockElastiCacheClient, RecordedCall};
