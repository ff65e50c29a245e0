//! Local private key signer.

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_core::primitives::{Address, Bytes, TxKind, U256};
use alloy_eips::eip2718::Encodable2718;
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use anyhow::Context;

use crate::{DeployError, Signer, UnsignedDeployment};

/// [`Signer`] holding a secp256k1 key in memory.
///
/// Deployments are signed as EIP-155 legacy transactions.
pub struct LocalSigner {
    inner: PrivateKeySigner,
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.inner.address())
            .finish_non_exhaustive()
    }
}

impl LocalSigner {
    /// Parse a hex private key, with or without `0x` prefix.
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, anyhow::Error> {
        let inner = private_key_hex
            .trim()
            .parse::<PrivateKeySigner>()
            .context("Invalid secp256k1 private key")?;

        Ok(Self { inner })
    }
}

impl Signer for LocalSigner {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn sign(&self, tx: &UnsignedDeployment) -> Result<Bytes, DeployError> {
        let legacy = TxLegacy {
            chain_id: Some(tx.chain_id),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Create,
            value: U256::ZERO,
            input: tx.input.clone(),
        };

        let signature = self
            .inner
            .sign_hash_sync(&legacy.signature_hash())
            .map_err(|e| DeployError::unknown(format!("Failed to sign transaction: {}", e)))?;

        let envelope = TxEnvelope::from(legacy.into_signed(signature));

        Ok(envelope.encoded_2718().into())
    }
}
