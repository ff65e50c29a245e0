//! Deployment request handed to the pipeline.

use alloy_core::primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Default contract name when none is given.
pub const DEFAULT_CONTRACT_NAME: &str = "Cryptogene";

/// Default gas limit hint for a deployment.
pub const DEFAULT_GAS_HINT: u64 = 200_000;

/// Default chain id (Neon EVM devnet).
pub const DEFAULT_CHAIN_ID: u64 = 245_022_926;

/// Minimal contract creation code used when the request carries no bytecode.
pub fn default_bytecode() -> Bytes {
    alloy_core::primitives::bytes!(
        "6080604052348015600f57600080fd5b50603f80601d6000396000f3fe6080604052600080fdfea2646970667358221220000000000000000000000000000000000000000000000000000000000000000064736f6c63430008140033"
    )
}

fn default_name() -> String {
    DEFAULT_CONTRACT_NAME.to_string()
}

fn default_gas_hint() -> u64 {
    DEFAULT_GAS_HINT
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

/// Deserialize bytecode, treating an empty string or `null` as "use the stub".
fn deserialize_bytecode<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Bytes> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|b| !b.is_empty()).unwrap_or_else(default_bytecode))
}

/// A contract deployment to land on chain.
///
/// Fields are read-only once the request is built. The serialized form uses
/// the `name`, `bytecode`, `gas` and `chainId` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_bytecode", deserialize_with = "deserialize_bytecode")]
    bytecode: Bytes,
    #[serde(rename = "gas", default = "default_gas_hint")]
    gas_hint: u64,
    #[serde(default = "default_chain_id")]
    chain_id: u64,
}

impl Default for DeploymentRequest {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRACT_NAME)
    }
}

impl DeploymentRequest {
    /// Create a request for `name` with the default bytecode, gas hint and chain id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytecode: default_bytecode(),
            gas_hint: DEFAULT_GAS_HINT,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the contract creation code. Empty bytecode keeps the stub.
    pub fn with_bytecode(mut self, bytecode: impl Into<Bytes>) -> Self {
        let bytecode = bytecode.into();
        if !bytecode.is_empty() {
            self.bytecode = bytecode;
        }
        self
    }

    pub fn with_gas_hint(mut self, gas_hint: u64) -> Self {
        self.gas_hint = gas_hint;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    pub fn gas_hint(&self) -> u64 {
        self.gas_hint
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Stable JSON form of the request, used as relay payload.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("request serializes")
    }
}
