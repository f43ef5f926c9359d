//! ElastiCache API client
//!
//! Implements `ElastiCacheClientTrait` on top of `aws-sdk-elasticache`.
//! Every request is keyed by the cache cluster id; SDK shapes are converted to
//! the models in `models.rs` before they leave this module.

use crate::elasticache_trait::ElastiCacheClientTrait;
use crate::error::ElastiCacheError;
use crate::models::*;
use aws_config::BehaviorVersion;
use aws_sdk_elasticache::Client;
use aws_sdk_elasticache::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_elasticache::operation::delete_cache_cluster::DeleteCacheClusterError;
use aws_sdk_elasticache::operation::describe_cache_clusters::DescribeCacheClustersError;
use aws_sdk_elasticache::types::{self as sdk, AuthTokenUpdateStrategyType, AzMode, OutpostMode};
use tracing::{debug, warn};

/// ElastiCache API client
#[derive(Debug, Clone)]
pub struct ElastiCacheClient {
    client: Client,
    region: Option<String>,
}

impl ElastiCacheClient {
    /// Create a client from an already loaded AWS configuration
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
            region: config.region().map(|r| r.to_string()),
        }
    }

    /// Create a client using the default AWS provider chain
    /// (environment, shared profile, web identity, instance metadata)
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(&config)
    }

    /// Region the client talks to, if one was resolved
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[async_trait::async_trait]
impl ElastiCacheClientTrait for ElastiCacheClient {
    async fn describe_cache_cluster(
        &self,
        cache_cluster_id: &str,
    ) -> Result<Option<CacheCluster>, ElastiCacheError> {
        debug!("Describing cache cluster {}", cache_cluster_id);

        let output = match self.client
            .describe_cache_clusters()
            .cache_cluster_id(cache_cluster_id)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) if matches!(
                err.as_service_error(),
                Some(DescribeCacheClustersError::CacheClusterNotFoundFault(_))
            ) => {
                debug!("Cache cluster {} not found", cache_cluster_id);
                return Ok(None);
            }
            Err(err) => return Err(map_sdk_error("DescribeCacheClusters", err)),
        };

        let clusters = output.cache_clusters().iter().map(to_model).collect();
        Ok(select_single_cluster(cache_cluster_id, clusters))
    }

    async fn create_cache_cluster(
        &self,
        request: CreateCacheClusterRequest,
    ) -> Result<CacheCluster, ElastiCacheError> {
        debug!("Creating cache cluster {}", request.cache_cluster_id);

        let output = self.client
            .create_cache_cluster()
            .cache_cluster_id(request.cache_cluster_id)
            .set_engine(request.engine)
            .set_engine_version(request.engine_version)
            .set_cache_node_type(request.cache_node_type)
            .set_num_cache_nodes(request.num_cache_nodes)
            .set_az_mode(request.az_mode.as_deref().map(AzMode::from))
            .set_auth_token(request.auth_token)
            .set_cache_parameter_group_name(request.cache_parameter_group_name)
            .set_cache_security_group_names(request.cache_security_group_names)
            .set_cache_subnet_group_name(request.cache_subnet_group_name)
            .set_notification_topic_arn(request.notification_topic_arn)
            .set_outpost_mode(request.outpost_mode.as_deref().map(OutpostMode::from))
            .set_port(request.port)
            .set_preferred_availability_zone(request.preferred_availability_zone)
            .set_preferred_availability_zones(request.preferred_availability_zones)
            .set_preferred_maintenance_window(request.preferred_maintenance_window)
            .set_preferred_outpost_arn(request.preferred_outpost_arn)
            .set_preferred_outpost_arns(request.preferred_outpost_arns)
            .set_replication_group_id(request.replication_group_id)
            .set_security_group_ids(request.security_group_ids)
            .set_snapshot_arns(request.snapshot_arns)
            .set_snapshot_name(request.snapshot_name)
            .set_snapshot_retention_limit(request.snapshot_retention_limit)
            .set_snapshot_window(request.snapshot_window)
            .set_tags(request.tags.map(|tags| tags.iter().map(to_sdk_tag).collect()))
            .send()
            .await
            .map_err(|e| map_sdk_error("CreateCacheCluster", e))?;

        output
            .cache_cluster()
            .map(to_model)
            .ok_or(ElastiCacheError::MissingCluster { operation: "CreateCacheCluster" })
    }

    async fn modify_cache_cluster(
        &self,
        request: ModifyCacheClusterRequest,
    ) -> Result<CacheCluster, ElastiCacheError> {
        debug!("Modifying cache cluster {} (apply immediately)", request.cache_cluster_id);

        let output = self.client
            .modify_cache_cluster()
            .cache_cluster_id(request.cache_cluster_id)
            .apply_immediately(true)
            .set_az_mode(request.az_mode.as_deref().map(AzMode::from))
            .set_auth_token(request.auth_token)
            .set_auth_token_update_strategy(
                request
                    .auth_token_update_strategy
                    .as_deref()
                    .map(AuthTokenUpdateStrategyType::from),
            )
            .set_cache_node_type(request.cache_node_type)
            .set_cache_parameter_group_name(request.cache_parameter_group_name)
            .set_cache_security_group_names(request.cache_security_group_names)
            .set_engine_version(request.engine_version)
            .set_notification_topic_arn(request.notification_topic_arn)
            .set_num_cache_nodes(request.num_cache_nodes)
            .set_preferred_maintenance_window(request.preferred_maintenance_window)
            .set_security_group_ids(request.security_group_ids)
            .set_snapshot_retention_limit(request.snapshot_retention_limit)
            .set_snapshot_window(request.snapshot_window)
            .send()
            .await
            .map_err(|e| map_sdk_error("ModifyCacheCluster", e))?;

        output
            .cache_cluster()
            .map(to_model)
            .ok_or(ElastiCacheError::MissingCluster { operation: "ModifyCacheCluster" })
    }

    async fn delete_cache_cluster(&self, cache_cluster_id: &str) -> Result<(), ElastiCacheError> {
        debug!("Deleting cache cluster {}", cache_cluster_id);

        match self.client
            .delete_cache_cluster()
            .cache_cluster_id(cache_cluster_id)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            // Already gone counts as an accepted deletion
            Err(err) if matches!(
                err.as_service_error(),
                Some(DeleteCacheClusterError::CacheClusterNotFoundFault(_))
            ) => {
                debug!(
                    "Cache cluster {} already absent, treating delete as accepted",
                    cache_cluster_id
                );
                Ok(())
            }
            Err(err) => Err(map_sdk_error("DeleteCacheCluster", err)),
        }
    }
}

/// Enforce the single-match rule client-side: zero or several clusters both
/// mean "not found".
pub(crate) fn select_single_cluster(
    cache_cluster_id: &str,
    mut clusters: Vec<CacheCluster>,
) -> Option<CacheCluster> {
    if clusters.len() > 1 {
        warn!(
            "DescribeCacheClusters returned {} clusters for id {}, treating as not found",
            clusters.len(),
            cache_cluster_id
        );
        return None;
    }
    clusters.pop()
}

/// Split SDK failures into service rejections and transport failures
fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ElastiCacheError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match err.as_service_error() {
        Some(service) => ElastiCacheError::Api {
            operation,
            code: service.code().unwrap_or("Unknown").to_string(),
            message: service.message().unwrap_or_default().to_string(),
        },
        None => ElastiCacheError::Transport {
            operation,
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

fn to_model(cluster: &sdk::CacheCluster) -> CacheCluster {
    CacheCluster {
        cache_cluster_id: cluster.cache_cluster_id().unwrap_or_default().to_string(),
        cache_cluster_status: cluster.cache_cluster_status().map(str::to_string),
        arn: cluster.arn().map(str::to_string),
        engine: cluster.engine().map(str::to_string),
        engine_version: cluster.engine_version().map(str::to_string),
        cache_node_type: cluster.cache_node_type().map(str::to_string),
        num_cache_nodes: cluster.num_cache_nodes(),
        preferred_availability_zone: cluster.preferred_availability_zone().map(str::to_string),
        preferred_maintenance_window: cluster.preferred_maintenance_window().map(str::to_string),
        snapshot_retention_limit: cluster.snapshot_retention_limit(),
        snapshot_window: cluster.snapshot_window().map(str::to_string),
    }
}

fn to_sdk_tag(tag: &Tag) -> sdk::Tag {
    sdk::Tag::builder()
        .key(tag.key.clone())
        .set_value(tag.value.clone())
        .build()
}
