//! Controller configuration.
//!
//! Read once at startup from environment variables. AWS region and
//! credentials are not part of this: they come from the AWS provider chain.

use crate::error::ControllerError;
use std::time::Duration;

/// Requeue after a cluster was just created
pub const DEFAULT_CREATE_REQUEUE_SECS: u64 = 120;
/// Periodic resync once the cluster exists
pub const DEFAULT_RESYNC_REQUEUE_SECS: u64 = 60;
/// Retry interval after a failed cycle
pub const DEFAULT_ERROR_REQUEUE_SECS: u64 = 60;
/// Maximum objects reconciled at the same time
pub const DEFAULT_CONCURRENCY: u16 = 3;

/// Runtime settings for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Namespace to watch; `None` watches all namespaces
    pub namespace: Option<String>,
    pub create_requeue: Duration,
    pub resync_requeue: Duration,
    pub error_requeue: Duration,
    pub concurrency: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            create_requeue: Duration::from_secs(DEFAULT_CREATE_REQUEUE_SECS),
            resync_requeue: Duration::from_secs(DEFAULT_RESYNC_REQUEUE_SECS),
            error_requeue: Duration::from_secs(DEFAULT_ERROR_REQUEUE_SECS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let namespace = lookup("WATCH_NAMESPACE")
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty());

        let concurrency = match lookup("CONTROLLER_CONCURRENCY") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(0) | Err(_) => {
                    return Err(ControllerError::InvalidConfig(format!(
                        "CONTROLLER_CONCURRENCY must be a positive integer, got '{}'",
                        raw
                    )));
                }
                Ok(n) => n,
            },
            None => defaults.concurrency,
        };

        Ok(Self {
            namespace,
            create_requeue: duration_secs(&lookup, "CREATE_REQUEUE_SECS", defaults.create_requeue)?,
            resync_requeue: duration_secs(&lookup, "RESYNC_REQUEUE_SECS", defaults.resync_requeue)?,
            error_requeue: duration_secs(&lookup, "ERROR_REQUEUE_SECS", defaults.error_requeue)?,
            concurrency,
        })
    }
}

fn duration_secs<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ControllerError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ControllerError::InvalidConfig(format!(
                "{} must be a positive number of seconds, got '{}'",
                key, raw
            ))),
        },
    }
}
