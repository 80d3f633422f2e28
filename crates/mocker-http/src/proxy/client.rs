//! HTTP client creation and configuration.
//!
//! One client is built at startup and shared by every FORWARDED and
//! RECORDING route so connections to the same upstream are pooled.

use crate::config::UpstreamClientConfig;
use tracing::info;

/// Create the shared upstream client.
pub fn create_http_client(config: &UpstreamClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout() {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(max_idle) = config.pool_max_idle_per_host {
        builder = builder.pool_max_idle_per_host(max_idle);
    }

    let client = builder.build()?;

    info!(
        "Upstream client configured: timeout={:?}, connect_timeout={:?}, max_idle_per_host={:?}",
        config.timeout(),
        config.connect_timeout(),
        config.pool_max_idle_per_host
    );

    Ok(client)
}
