//! Chain access capability.

use std::future::Future;

use alloy_core::primitives::{Address, Bytes};

use crate::DeployError;

/// Read and write access to an EVM chain.
pub trait ChainClient: Send + Sync {
    /// Next nonce to use for `address`.
    fn nonce(&self, address: Address) -> impl Future<Output = Result<u64, DeployError>> + Send;

    /// Current network gas price in wei.
    fn gas_price(&self) -> impl Future<Output = Result<u128, DeployError>> + Send;

    /// Broadcast a signed, EIP-2718 encoded transaction and return its hash.
    fn broadcast(
        &self,
        signed_tx: Bytes,
    ) -> impl Future<Output = Result<String, DeployError>> + Send;
}
