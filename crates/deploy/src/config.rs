//! Pipeline configuration.
//!
//! Configuration is layered with figment: built-in defaults, then an optional
//! TOML file, then `LOOPER_`-prefixed environment variables (nested keys are
//! separated by `__`, e.g. `LOOPER_RELAY__API_KEY`).

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use backon::{BackoffBuilder, ConstantBuilder};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "LOOPER_";

/// Default network name reported in deployment results.
pub const DEFAULT_NETWORK_NAME: &str = "neon-devnet";

/// Default JSON-RPC endpoint (Neon EVM devnet).
pub const DEFAULT_RPC_URL: &str = "https://devnet.neonevm.org";

/// Target network of the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Name reported in deployment results.
    pub name: String,
    /// JSON-RPC endpoint.
    pub rpc_url: Url,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NETWORK_NAME.to_string(),
            rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC URL is valid"),
        }
    }
}

/// Gasless relay settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Relay API credential. The relay phase is skipped when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Retry behaviour of the direct deployment phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay between direct attempts, in milliseconds.
    pub delay_ms: u64,
    /// Skip the remaining direct attempts after a permanent chain error
    /// (insufficient funds, invalid chain id, ...) and go to the relay.
    pub skip_on_permanent: bool,
}

impl RetryConfig {
    /// Delays to wait between consecutive direct attempts.
    pub fn backoff(&self, max_retries: usize) -> impl Iterator<Item = Duration> {
        ConstantBuilder::default()
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_max_times(max_retries)
            .build()
    }
}

/// Configuration of a [`crate::DeploymentPipeline`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub network: NetworkConfig,
    pub relay: RelayConfig,
    pub retry: RetryConfig,
    /// Timeout of a single RPC request, in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            relay: RelayConfig::default(),
            retry: RetryConfig::default(),
            rpc_timeout_secs: crate::rpc::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl PipelineConfig {
    /// Load the configuration from defaults, an optional TOML file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to load pipeline configuration")?;

        tracing::debug!(
            network = %config.network.name,
            rpc_url = %config.network.rpc_url,
            relay_configured = config.relay.api_key.is_some(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }
}
