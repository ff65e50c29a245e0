//! Attempt trace and terminal outcome of a pipeline run.

use serde::{Deserialize, Serialize};

/// Strategy used for an attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeployMethod {
    /// Signed with the caller's key and broadcast directly.
    Direct,
    /// Relayed as a meta-transaction, no gas paid by the caller.
    RelayedGasless,
}

/// A landed (or relayed) deployment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub network: String,
    pub contract_name: String,
    /// 0x-prefixed transaction hash.
    pub tx_hash: String,
    /// Gas limit of the landed transaction; zero when relayed.
    pub gas_used: u64,
    pub gasless: bool,
    /// Checksummed address of the key that signed the relayed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relay_signer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success(TxResult),
    Failure(String),
}

/// One entry of the attempt trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt_number: u32,
    pub method: DeployMethod,
    pub outcome: AttemptOutcome,
}

impl AttemptRecord {
    pub fn success(attempt_number: u32, method: DeployMethod, tx: TxResult) -> Self {
        Self {
            attempt_number,
            method,
            outcome: AttemptOutcome::Success(tx),
        }
    }

    pub fn failure(attempt_number: u32, method: DeployMethod, message: impl Into<String>) -> Self {
        Self {
            attempt_number,
            method,
            outcome: AttemptOutcome::Failure(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Success(_))
    }

    /// Failure message, if this attempt failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            AttemptOutcome::Failure(msg) => Some(msg),
            AttemptOutcome::Success(_) => None,
        }
    }
}

/// Terminal result of [`crate::DeploymentPipeline::deploy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// A strategy landed the deployment.
    Deployed {
        tx: TxResult,
        attempts: Vec<AttemptRecord>,
    },
    /// Every strategy failed.
    Fallback {
        last_error: String,
        attempts: Vec<AttemptRecord>,
        suggestion: String,
    },
}

impl PipelineOutcome {
    pub fn attempts(&self) -> &[AttemptRecord] {
        match self {
            Self::Deployed { attempts, .. } | Self::Fallback { attempts, .. } => attempts,
        }
    }

    pub fn tx(&self) -> Option<&TxResult> {
        match self {
            Self::Deployed { tx, .. } => Some(tx),
            Self::Fallback { .. } => None,
        }
    }

    pub fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx() -> TxResult {
        TxResult {
            network: "neon-devnet".to_string(),
            contract_name: "Cryptogene".to_string(),
            tx_hash: "0xabc".to_string(),
            gas_used: 200_000,
            gasless: false,
            relay_signer: None,
        }
    }

    #[test]
    fn test_deployed_json_shape() {
        let outcome = PipelineOutcome::Deployed {
            tx: tx(),
            attempts: vec![AttemptRecord::success(1, DeployMethod::Direct, tx())],
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "deployed");
        assert_eq!(json["tx"]["tx_hash"], "0xabc");
        assert!(json["tx"].get("relay_signer").is_none());
        assert_eq!(json["attempts"][0]["method"], "direct");
        assert_eq!(json["attempts"][0]["outcome"]["success"]["gas_used"], 200_000);
    }

    #[test]
    fn test_fallback_json_shape() {
        let outcome = PipelineOutcome::Fallback {
            last_error: "credential not configured".to_string(),
            attempts: vec![AttemptRecord::failure(
                1,
                DeployMethod::RelayedGasless,
                "credential not configured",
            )],
            suggestion: "fund it".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "fallback");
        assert_eq!(json["attempts"][0]["method"], "relayed_gasless");
        assert_eq!(
            json["attempts"][0]["outcome"]["failure"],
            "credential not configured"
        );
        assert!(outcome.tx().is_none());
        assert!(!outcome.is_deployed());
    }

    #[test]
    fn test_attempt_record_accessors() {
        let ok = AttemptRecord::success(2, DeployMethod::Direct, tx());
        assert!(ok.is_success());
        assert_eq!(ok.error(), None);

        let failed = AttemptRecord::failure(1, DeployMethod::Direct, "insufficient funds");
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("insufficient funds"));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(DeployMethod::RelayedGasless.to_string(), "relayed_gasless");
    }
}
