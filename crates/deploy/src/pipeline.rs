//! Escalating multi-strategy deployment pipeline.
//!
//! A run walks a fixed, forward-only sequence of phases:
//!
//! 1. Up to [`MAX_DIRECT_ATTEMPTS`] direct attempts, each signed with the
//!    caller's key and broadcast with escalating gas (see [`compute_gas`]).
//!    The first success ends the run.
//! 2. A single relayed gasless attempt, if a relay credential is configured.
//! 3. A terminal fallback carrying the last error and a suggested fix.
//!
//! Every attempt, successful or not, lands in the returned trace.

use crate::{
    AttemptRecord, ChainClient, DeployError, DeployMethod, DeploymentRequest, PipelineConfig,
    PipelineOutcome, RelayService, Signer, TxResult, UnsignedDeployment, compute_gas,
};

/// Number of direct attempts before switching to the relay.
pub const MAX_DIRECT_ATTEMPTS: u32 = 3;

/// Suggested fix returned when every strategy failed.
pub const FALLBACK_SUGGESTION: &str = "fund the deploy address or enable a simulated provider; \
     direct deploy and relayed gasless deploy were both tried";

/// Orchestrates direct, relayed and fallback deployment strategies.
///
/// The pipeline holds no per-run state: each [`deploy`](Self::deploy) call
/// builds its own trace, so one pipeline can serve any number of runs.
#[derive(Debug)]
pub struct DeploymentPipeline<C, S, R> {
    chain: C,
    signer: S,
    relay: R,
    config: PipelineConfig,
}

impl<C, S, R> DeploymentPipeline<C, S, R>
where
    C: ChainClient,
    S: Signer,
    R: RelayService,
{
    pub fn new(chain: C, signer: S, relay: R, config: PipelineConfig) -> Self {
        Self {
            chain,
            signer,
            relay,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Deploy `request`, always returning a terminal outcome.
    pub async fn deploy(&self, request: &DeploymentRequest) -> PipelineOutcome {
        tracing::info!(
            contract = request.name(),
            chain_id = request.chain_id(),
            gas_hint = request.gas_hint(),
            network = %self.config.network.name,
            "Starting deployment pipeline"
        );

        let mut attempts = Vec::new();
        let mut delays = self
            .config
            .retry
            .backoff(MAX_DIRECT_ATTEMPTS.saturating_sub(1) as usize);

        for attempt in 1..=MAX_DIRECT_ATTEMPTS {
            match self.direct_attempt(request, attempt).await {
                Ok(tx) => {
                    tracing::info!(attempt, tx_hash = %tx.tx_hash, "Direct deployment succeeded");
                    attempts.push(AttemptRecord::success(attempt, DeployMethod::Direct, tx.clone()));
                    return PipelineOutcome::Deployed { tx, attempts };
                }
                Err(err) => {
                    tracing::warn!(
                        attempt,
                        kind = %err.kind(),
                        error = %err,
                        "Direct deployment attempt failed"
                    );
                    attempts.push(AttemptRecord::failure(
                        attempt,
                        DeployMethod::Direct,
                        err.to_string(),
                    ));

                    if err.is_permanent() && self.config.retry.skip_on_permanent {
                        tracing::info!(attempt, "Permanent chain error, skipping to relay");
                        break;
                    }

                    if attempt < MAX_DIRECT_ATTEMPTS {
                        if let Some(delay) = delays.next().filter(|d| !d.is_zero()) {
                            tracing::debug!(?delay, "Waiting before next direct attempt");
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }

        let relay_attempt = attempts.len() as u32 + 1;

        match self.relayed_attempt(request).await {
            Ok(tx) => {
                tracing::info!(tx_hash = %tx.tx_hash, "Relayed gasless deployment succeeded");
                attempts.push(AttemptRecord::success(
                    relay_attempt,
                    DeployMethod::RelayedGasless,
                    tx.clone(),
                ));
                PipelineOutcome::Deployed { tx, attempts }
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind(), error = %err, "Relayed deployment failed");
                let last_error = err.to_string();
                attempts.push(AttemptRecord::failure(
                    relay_attempt,
                    DeployMethod::RelayedGasless,
                    last_error.clone(),
                ));

                tracing::error!(
                    attempts = attempts.len(),
                    last_error = %last_error,
                    "All deployment strategies failed"
                );

                PipelineOutcome::Fallback {
                    last_error,
                    attempts,
                    suggestion: FALLBACK_SUGGESTION.to_string(),
                }
            }
        }
    }

    /// Sign and broadcast the deployment with gas escalated for `attempt`.
    async fn direct_attempt(
        &self,
        request: &DeploymentRequest,
        attempt: u32,
    ) -> Result<TxResult, DeployError> {
        let from = self.signer.address();
        let nonce = self.chain.nonce(from).await?;
        let network_gas_price = self.chain.gas_price().await?;
        let (gas_limit, gas_price) = compute_gas(request.gas_hint(), network_gas_price, attempt);

        tracing::debug!(
            attempt,
            %from,
            nonce,
            gas_limit,
            gas_price,
            "Submitting direct deployment"
        );

        let tx = UnsignedDeployment {
            chain_id: request.chain_id(),
            nonce,
            gas_limit,
            gas_price,
            input: request.bytecode().clone(),
        };

        let signed = self.signer.sign(&tx)?;
        let tx_hash = self.chain.broadcast(signed).await?;

        Ok(TxResult {
            network: self.config.network.name.clone(),
            contract_name: request.name().to_string(),
            tx_hash,
            gas_used: gas_limit,
            gasless: false,
            relay_signer: None,
        })
    }

    /// Hand the deployment to the relay service, once.
    async fn relayed_attempt(&self, request: &DeploymentRequest) -> Result<TxResult, DeployError> {
        if !self.relay.is_configured() {
            return Err(DeployError::CredentialMissing);
        }

        let signer = self.signer.address();
        let tx_hash = self.relay.relay(signer, request).await?;

        Ok(TxResult {
            network: self.config.network.name.clone(),
            contract_name: request.name().to_string(),
            tx_hash,
            gas_used: 0,
            gasless: true,
            relay_signer: Some(signer.to_checksum(None)),
        })
    }
}
