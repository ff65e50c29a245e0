//! looper lands a contract deployment on an EVM chain, escalating gas across
//! direct attempts and falling back to a gasless relay.

mod cli;
mod command;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Network};
use looper_deploy::{DefaultPipeline, DeploymentRequest, PipelineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger. Stdout is reserved for the outcome.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;

    if let Some(path) = &cli.save_config {
        config.save_to_file(path)?;
    }

    let request = build_request(&cli)?;
    let pipeline = DefaultPipeline::from_config(config, &cli.private_key)?;

    tracing::info!(
        network = %pipeline.config().network.name,
        rpc_url = %pipeline.chain().url(),
        contract = request.name(),
        chain_id = request.chain_id(),
        gas_hint = request.gas_hint(),
        "Starting deployment..."
    );

    let outcome = pipeline.deploy(&request).await;

    println!("{}", output::render(&outcome, cli.output, cli.pretty)?);

    Ok(())
}

/// Apply the network and relay flags on top of the loaded configuration.
fn apply_overrides(config: &mut PipelineConfig, cli: &Cli) -> Result<()> {
    if let Some(network) = &cli.network {
        config.network.name = network.name();
        config.network.rpc_url = network.to_rpc_url()?;
    }

    if let Some(rpc_url) = &cli.rpc_url {
        // A preset keeps its name only when the endpoint is its own.
        if *rpc_url != config.network.rpc_url {
            config.network.name = Network::Custom(rpc_url.to_string()).name();
        }
        config.network.rpc_url = rpc_url.clone();
    }

    if let Some(api_key) = &cli.relay_api_key {
        config.relay.api_key = Some(api_key.clone());
    }

    Ok(())
}

/// Build the deployment request from the command file (if any) and the contract flags.
fn build_request(cli: &Cli) -> Result<DeploymentRequest> {
    let (mut request, has_chain_id) = match &cli.command {
        Some(path) => {
            let contract = command::load(path)?;
            (contract.request, contract.has_chain_id)
        }
        None => (DeploymentRequest::default(), false),
    };

    // A preset network picks the chain id unless the command file set one.
    if !has_chain_id {
        if let Some(chain_id) = cli.network.as_ref().and_then(|n| n.to_chain_id()) {
            request = request.with_chain_id(chain_id);
        }
    }

    if let Some(name) = &cli.name {
        request = request.with_name(name.clone());
    }
    if let Some(bytecode) = &cli.bytecode {
        request = request.with_bytecode(bytecode.clone());
    }
    if let Some(gas) = cli.gas {
        request = request.with_gas_hint(gas);
    }
    if let Some(chain_id) = cli.chain_id {
        request = request.with_chain_id(chain_id);
    }

    Ok(request)
}
