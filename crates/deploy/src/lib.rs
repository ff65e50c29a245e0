//! looper-deploy - Escalating contract deployment for EVM chains.
//!
//! This crate lands a contract-creation transaction through a fixed sequence
//! of strategies: direct deployment with escalating gas, then a relayed
//! gasless deployment, then a diagnostic fallback. Every attempt is recorded
//! and returned with the outcome.

mod capabilities;
pub use capabilities::{ChainClient, RelayService, Signer, UnsignedDeployment};

mod config;
pub use config::{
    DEFAULT_NETWORK_NAME, DEFAULT_RPC_URL, ENV_PREFIX, NetworkConfig, PipelineConfig,
    RelayConfig, RetryConfig,
};

mod error;
pub use error::{DeployError, ErrorKind};

mod gas;
pub use gas::compute_gas;

mod outcome;
pub use outcome::{AttemptOutcome, AttemptRecord, DeployMethod, PipelineOutcome, TxResult};

mod pipeline;
pub use pipeline::{DeploymentPipeline, FALLBACK_SUGGESTION, MAX_DIRECT_ATTEMPTS};

mod relay;
pub use relay::SimulatedRelay;

mod request;
pub use request::{
    DEFAULT_CHAIN_ID, DEFAULT_CONTRACT_NAME, DEFAULT_GAS_HINT, DeploymentRequest,
    default_bytecode,
};

pub mod rpc;
pub use rpc::RpcChainClient;

mod signer;
pub use signer::LocalSigner;

/// Pipeline wired to the default backends.
pub type DefaultPipeline = DeploymentPipeline<RpcChainClient, LocalSigner, SimulatedRelay>;

impl DefaultPipeline {
    /// Build a pipeline talking JSON-RPC to the configured network, signing
    /// with `private_key` and relaying through the simulated relay.
    pub fn from_config(config: PipelineConfig, private_key: &str) -> anyhow::Result<Self> {
        let chain = RpcChainClient::new(config.network.rpc_url.clone(), config.rpc_timeout())?;
        let signer = LocalSigner::from_private_key(private_key)?;
        let relay = SimulatedRelay::new(config.relay.api_key.clone());

        Ok(Self::new(chain, signer, relay, config))
    }
}
