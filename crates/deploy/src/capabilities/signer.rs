//! Transaction signing capability.

use alloy_core::primitives::{Address, Bytes};

use crate::DeployError;

/// A contract-creation transaction ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedDeployment {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
    /// Contract creation code.
    pub input: Bytes,
}

/// Holds a private key and signs deployments with it.
///
/// Implementations must never hand out the key material.
pub trait Signer: Send + Sync {
    fn address(&self) -> Address;

    /// Sign `tx`, returning the EIP-2718 encoded signed transaction.
    fn sign(&self, tx: &UnsignedDeployment) -> Result<Bytes, DeployError>;
}
