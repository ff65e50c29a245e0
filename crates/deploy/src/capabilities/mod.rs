//! Capabilities the deployment pipeline consumes.
//!
//! The pipeline never talks to a node, a key or a relayer directly: it is
//! generic over these three traits, so any backend (or a test double) can be
//! plugged in.
//!
//! - [`ChainClient`]: nonce and gas price lookups, raw transaction broadcast.
//! - [`Signer`]: signs contract-creation transactions, exposes only its address.
//! - [`RelayService`]: relays a signed request gas-free.

mod chain;
mod relay;
mod signer;

pub use chain::ChainClient;
pub use relay::RelayService;
pub use signer::{Signer, UnsignedDeployment};
