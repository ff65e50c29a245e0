//! JSON command files.

use std::path::Path;

use anyhow::{Context, Result};
use looper_deploy::DeploymentRequest;
use serde::Deserialize;
use serde_json::{Map, Value};

/// The only action a command file may carry.
pub const DEPLOY_EVM_ACTION: &str = "deploy_evm";

/// A command file: `{"action": "deploy_evm", "contract": {...}}`.
#[derive(Debug, Deserialize)]
struct CommandFile {
    action: String,
    #[serde(default)]
    contract: Map<String, Value>,
}

/// The contract of a command file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContract {
    pub request: DeploymentRequest,
    /// Whether the file set `chainId` itself.
    pub has_chain_id: bool,
}

/// Parse a command file's content into a deployment request.
pub fn parse(content: &str) -> Result<CommandContract> {
    let command: CommandFile =
        serde_json::from_str(content).context("Failed to parse command file")?;

    if command.action != DEPLOY_EVM_ACTION {
        anyhow::bail!(
            "Unsupported action '{}', expected '{}'",
            command.action,
            DEPLOY_EVM_ACTION
        );
    }

    let has_chain_id = command.contract.contains_key("chainId");
    let request = serde_json::from_value(Value::Object(command.contract))
        .context("Invalid contract in command file")?;

    Ok(CommandContract {
        request,
        has_chain_id,
    })
}

/// Read and parse a command file.
pub fn load(path: &Path) -> Result<CommandContract> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read command file {}", path.display()))?;
    parse(&content)
}
