//! Configuration types for the mock server.

mod listen;
mod route;
mod upstream;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use listen::ListenConfig;
pub use route::{Method, ResponseStrategy, RouteDefinition, RouteStatus};
pub use upstream::UpstreamClientConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    /// Outbound client used by FORWARDED and RECORDING routes
    #[serde(default)]
    pub upstream: UpstreamClientConfig,
    /// Route definitions, in file order. Later duplicates replace earlier ones.
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

impl Config {
    /// Load a YAML config, or JSON when the file has a `.json` extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: Config = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.listen.host.is_empty() {
            anyhow::bail!("listen.host must not be empty");
        }

        self.upstream.validate().map_err(|e| anyhow::anyhow!(e))?;

        for definition in self.enabled_routes() {
            definition
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid route '{}': {}", definition.label(), e))?;
        }

        Ok(())
    }

    /// Definitions that will become live routes
    pub fn enabled_routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter().filter(|d| d.is_enabled())
    }
}
