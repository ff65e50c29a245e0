//! End-to-end tests of the deployment pipeline with the bundled local signer
//! and simulated relay.
//!
//! The chain is scripted in-process, no network access is needed.
//! Run with: cargo test --test pipeline_test

use std::sync::Mutex;

use alloy_core::primitives::{Address, Bytes};
use looper_deploy::{
    ChainClient, DeployError, DeployMethod, DeploymentPipeline, DeploymentRequest, LocalSigner,
    MAX_DIRECT_ATTEMPTS, PipelineConfig, PipelineOutcome, RelayConfig, SimulatedRelay,
    compute_gas,
};

/// First default anvil account.
const DEPLOYER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEPLOYER_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Chain that fails every broadcast until `succeed_on`, recording what it received.
struct TestChain {
    succeed_on: Option<u32>,
    failure: DeployError,
    received: Mutex<Vec<Bytes>>,
}

impl TestChain {
    fn always_failing(message: &str) -> Self {
        Self {
            succeed_on: None,
            failure: DeployError::from_rpc_message(message),
            received: Mutex::new(Vec::new()),
        }
    }

    fn succeeding_on(attempt: u32) -> Self {
        Self {
            succeed_on: Some(attempt),
            failure: DeployError::transient("transaction underpriced"),
            received: Mutex::new(Vec::new()),
        }
    }

    fn received(&self) -> Vec<Bytes> {
        self.received.lock().unwrap().clone()
    }
}

impl ChainClient for TestChain {
    async fn nonce(&self, _address: Address) -> Result<u64, DeployError> {
        Ok(0)
    }

    async fn gas_price(&self) -> Result<u128, DeployError> {
        Ok(2_000_000_000)
    }

    async fn broadcast(&self, signed_tx: Bytes) -> Result<String, DeployError> {
        let mut received = self.received.lock().unwrap();
        received.push(signed_tx);

        match self.succeed_on {
            Some(attempt) if received.len() as u32 == attempt => {
                Ok(format!("0x{:064x}", attempt))
            }
            _ => Err(self.failure.clone()),
        }
    }
}

/// Initialize tracing for tests (idempotent).
fn init_test_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

fn cryptogene() -> DeploymentRequest {
    DeploymentRequest::new("Cryptogene")
        .with_gas_hint(200_000)
        .with_chain_id(245_022_926)
}

fn config(relay_api_key: Option<&str>) -> PipelineConfig {
    PipelineConfig {
        relay: RelayConfig {
            api_key: relay_api_key.map(String::from),
        },
        ..Default::default()
    }
}

fn pipeline(
    chain: TestChain,
    config: PipelineConfig,
) -> DeploymentPipeline<TestChain, LocalSigner, SimulatedRelay> {
    init_test_tracing();
    let signer = LocalSigner::from_private_key(DEPLOYER_KEY).unwrap();
    let relay = SimulatedRelay::new(config.relay.api_key.clone());
    DeploymentPipeline::new(chain, signer, relay, config)
}

#[tokio::test]
async fn test_insufficient_funds_without_relay_credential() {
    let pipeline = pipeline(TestChain::always_failing("insufficient funds"), config(None));

    let outcome = pipeline.deploy(&cryptogene()).await;

    match &outcome {
        PipelineOutcome::Fallback {
            last_error,
            attempts,
            suggestion,
        } => {
            assert_eq!(attempts.len(), 4);
            assert_eq!(last_error, "credential not configured");
            assert!(suggestion.contains("fund the deploy address"));
            for (i, attempt) in attempts.iter().take(3).enumerate() {
                assert_eq!(attempt.attempt_number, i as u32 + 1);
                assert_eq!(attempt.method, DeployMethod::Direct);
                assert_eq!(attempt.error(), Some("insufficient funds"));
            }
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_direct_attempt_succeeds() {
    let pipeline = pipeline(TestChain::succeeding_on(2), config(Some("relay-key")));

    let outcome = pipeline.deploy(&cryptogene()).await;

    let PipelineOutcome::Deployed { tx, attempts } = &outcome else {
        panic!("expected deployed, got {:?}", outcome);
    };
    assert_eq!(attempts.len(), 2);
    assert!(!tx.gasless);
    assert_eq!(tx.gas_used, compute_gas(200_000, 2_000_000_000, 2).0);
    assert_eq!(tx.tx_hash, format!("0x{:064x}", 2));
}

#[tokio::test]
async fn test_relay_lands_after_direct_budget_is_exhausted() {
    let pipeline = pipeline(
        TestChain::always_failing("insufficient funds"),
        config(Some("relay-key")),
    );
    let request = cryptogene();

    let outcome = pipeline.deploy(&request).await;

    let PipelineOutcome::Deployed { tx, attempts } = &outcome else {
        panic!("expected deployed, got {:?}", outcome);
    };
    assert_eq!(attempts.len(), MAX_DIRECT_ATTEMPTS as usize + 1);
    assert!(tx.gasless);
    assert_eq!(tx.relay_signer.as_deref(), Some(DEPLOYER_ADDRESS));

    let signer: Address = DEPLOYER_ADDRESS.parse().unwrap();
    assert_eq!(tx.tx_hash, SimulatedRelay::placeholder_hash(signer, &request));
}

#[tokio::test]
async fn test_each_direct_attempt_broadcasts_a_distinct_transaction() {
    let chain = TestChain::always_failing("nonce too low");
    let pipeline = pipeline(chain, config(None));

    pipeline.deploy(&cryptogene()).await;

    // Escalated gas changes the signed payload on every attempt.
    let received = pipeline.chain().received();
    assert_eq!(received.len(), 3);
    assert_ne!(received[0], received[1]);
    assert_ne!(received[1], received[2]);
}

#[tokio::test]
async fn test_outcome_serializes_with_full_trace() {
    let pipeline = pipeline(TestChain::always_failing("insufficient funds"), config(None));

    let outcome = pipeline.deploy(&cryptogene()).await;
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "fallback");
    assert_eq!(json["last_error"], "credential not configured");
    assert_eq!(json["attempts"].as_array().unwrap().len(), 4);
    assert_eq!(json["attempts"][3]["method"], "relayed_gasless");
}
