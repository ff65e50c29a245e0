//! Errors surfaced by the deployment collaborators.

use thiserror::Error;

/// Failure class of a [`DeployError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Transient,
    Permanent,
    CredentialMissing,
    Unknown,
}

/// Error raised by a chain client, signer or relay service.
///
/// The display form is the bare message so it can be recorded as-is in the
/// attempt trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    /// Transport-level failure (connection refused, timeout, bad gateway).
    #[error("{0}")]
    Transient(String),
    /// The chain rejected the transaction and retrying will not help.
    #[error("{0}")]
    Permanent(String),
    /// The relay service has no credential configured.
    #[error("credential not configured")]
    CredentialMissing,
    #[error("{0}")]
    Unknown(String),
}

/// RPC error fragments that no amount of gas escalation fixes.
const PERMANENT_PATTERNS: &[&str] = &[
    "insufficient funds",
    "invalid chain id",
    "chain id mismatch",
    "invalid sender",
    "nonce too low",
    "exceeds block gas limit",
    "execution reverted",
];

impl DeployError {
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient(msg.into())
    }

    pub fn permanent(msg: impl Into<String>) -> Self {
        Self::Permanent(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Classify an error message returned by a node.
    pub fn from_rpc_message(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let lower = msg.to_lowercase();
        if PERMANENT_PATTERNS.iter().any(|p| lower.contains(p)) {
            Self::Permanent(msg)
        } else {
            Self::Transient(msg)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transient(_) => ErrorKind::Transient,
            Self::Permanent(_) => ErrorKind::Permanent,
            Self::CredentialMissing => ErrorKind::CredentialMissing,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.kind() == ErrorKind::Permanent
    }
}

impl From<reqwest::Error> for DeployError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Unknown(err.to_string())
        } else {
            Self::Transient(err.to_string())
        }
    }
}
