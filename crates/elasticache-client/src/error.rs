//! ElastiCache client errors

use thiserror::Error;

/// Errors that can occur when interacting with the ElastiCache API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ElastiCacheError {
    /// The service rejected the request (throttling, invalid state, already exists, ...)
    #[error("ElastiCache {operation} failed: {code}: {message}")]
    Api {
        operation: &'static str,
        code: String,
        message: String,
    },

    /// The request never produced a service response (network, timeout, credentials)
    #[error("ElastiCache {operation} transport error: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The service answered successfully but without the expected payload
    #[error("ElastiCache {operation} returned no cache cluster")]
    MissingCluster { operation: &'static str },
}

impl ElastiCacheError {
    /// Provider error code, if the service returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            ElastiCacheError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
