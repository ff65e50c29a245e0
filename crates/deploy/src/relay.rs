//! Simulated gasless relay.

use alloy_core::primitives::{Address, keccak256};

use crate::{DeployError, DeploymentRequest, RelayService};

/// [`RelayService`] that simulates a relayer response.
///
/// No request leaves the process: the transaction hash is the keccak256 of
/// the checksummed signer address followed by the request's canonical JSON,
/// so the same signer and request always yield the same hash.
#[derive(Clone, Default)]
pub struct SimulatedRelay {
    api_key: Option<String>,
}

impl std::fmt::Debug for SimulatedRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedRelay")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl SimulatedRelay {
    /// Create a relay; blank credentials count as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Deterministic placeholder hash for a relayed deployment.
    pub fn placeholder_hash(signer: Address, request: &DeploymentRequest) -> String {
        let preimage = format!("{}{}", signer.to_checksum(None), request.canonical_json());
        format!("0x{}", hex::encode(keccak256(preimage.as_bytes())))
    }
}

impl RelayService for SimulatedRelay {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn relay(
        &self,
        signer: Address,
        request: &DeploymentRequest,
    ) -> Result<String, DeployError> {
        if !self.is_configured() {
            return Err(DeployError::CredentialMissing);
        }

        let tx_hash = Self::placeholder_hash(signer, request);

        tracing::debug!(
            signer = %signer,
            contract = request.name(),
            tx_hash = %tx_hash,
            "Simulated gasless relay"
        );

        Ok(tx_hash)
    }
}
