use std::path::PathBuf;

use alloy_core::primitives::Bytes;
use clap::Parser;
use looper_deploy::{DEFAULT_NETWORK_NAME, DEFAULT_RPC_URL};
use tracing::level_filters::LevelFilter;
use url::Url;

/// Target network of the deployment, by preset name or RPC URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    NeonDevnet,
    Sepolia,
    BaseSepolia,
    #[strum(default)]
    Custom(String),
}

impl Network {
    /// Chain id of a preset network. Custom endpoints have none.
    pub fn to_chain_id(&self) -> Option<u64> {
        match self {
            Network::NeonDevnet => Some(245_022_926),
            Network::Sepolia => Some(11_155_111),
            Network::BaseSepolia => Some(84_532),
            Network::Custom(_) => None,
        }
    }

    pub fn to_rpc_url(&self) -> anyhow::Result<Url> {
        let url = match self {
            Network::NeonDevnet => DEFAULT_RPC_URL,
            Network::Sepolia => "https://rpc.sepolia.org",
            Network::BaseSepolia => "https://sepolia.base.org",
            Network::Custom(url) => url.as_str(),
        };
        Url::parse(url).map_err(|e| anyhow::anyhow!("Invalid RPC URL '{}': {}", url, e))
    }

    /// Name reported in deployment results.
    pub fn name(&self) -> String {
        match self {
            Network::NeonDevnet => DEFAULT_NETWORK_NAME.to_string(),
            Network::Custom(url) => Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(String::from))
                .unwrap_or_else(|| url.clone()),
            other => other.to_string(),
        }
    }
}

/// How the outcome is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser)]
#[command(name = "looper")]
#[command(
    author,
    version,
    about = "Land a contract deployment on an EVM chain, escalating gas and falling back to a gasless relay"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "LOOPER_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to a looper.toml configuration file.
    ///
    /// Values from the file are overridden by `LOOPER_`-prefixed environment
    /// variables and then by the flags below.
    #[arg(long, alias = "conf", env = "LOOPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration (without the private key) to this
    /// path before deploying.
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Target network: neon-devnet, sepolia, base-sepolia or a custom RPC URL.
    ///
    /// Presets also set the request chain id unless `--chain-id` is given.
    #[arg(short, long, env = "LOOPER_CHAIN")]
    pub network: Option<Network>,

    /// JSON-RPC endpoint, overriding the one of `--network`.
    #[arg(long, alias = "rpc", env = "LOOPER_RPC_URL")]
    pub rpc_url: Option<Url>,

    /// Hex-encoded private key of the deploying account.
    #[arg(long, env = "LOOPER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// API key of the gasless relay. The relay is skipped when unset.
    #[arg(long, env = "LOOPER_RELAY_API_KEY", hide_env_values = true)]
    pub relay_api_key: Option<String>,

    /// Contract name.
    #[arg(long)]
    pub name: Option<String>,

    /// Hex-encoded contract creation code. Defaults to a minimal stub.
    #[arg(long)]
    pub bytecode: Option<Bytes>,

    /// Gas limit hint for the first direct attempt.
    #[arg(long)]
    pub gas: Option<u64>,

    /// Chain id the transaction is signed for.
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Path to a JSON command file: `{"action": "deploy_evm", "contract": {...}}`.
    ///
    /// Contract flags given on the command line override the file.
    #[arg(long, alias = "cmd")]
    pub command: Option<PathBuf>,

    /// Output format of the outcome.
    #[arg(short, long, env = "LOOPER_OUTPUT", default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Pretty-print the JSON outcome.
    #[arg(long)]
    pub pretty: bool,
}
