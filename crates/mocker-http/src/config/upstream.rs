//! Outbound HTTP client configuration for forwarded and recording routes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the shared upstream client.
///
/// Every field is optional. Leaving a timeout unset keeps the client default,
/// which means a hung upstream holds the calling request until it answers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamClientConfig {
    /// Overall request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// TCP connect timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
    /// Maximum idle pooled connections per upstream host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_max_idle_per_host: Option<usize>,
}

impl UpstreamClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == Some(0) {
            return Err("upstream.timeout_ms must be greater than 0".to_string());
        }
        if self.connect_timeout_ms == Some(0) {
            return Err("upstream.connect_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}
