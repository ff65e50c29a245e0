//! Gasless relay capability.

use std::future::Future;

use alloy_core::primitives::Address;

use crate::{DeployError, DeploymentRequest};

/// Relays a deployment as a meta-transaction so the signer pays no gas.
pub trait RelayService: Send + Sync {
    /// Whether a relay credential is available.
    fn is_configured(&self) -> bool;

    /// Relay `request` on behalf of `signer`, returning the transaction hash.
    fn relay(
        &self,
        signer: Address,
        request: &DeploymentRequest,
    ) -> impl Future<Output = Result<String, DeployError>> + Send;
}
