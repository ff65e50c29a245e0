//! Rendering of pipeline outcomes.

use anyhow::{Context, Result};
use comfy_table::Table;
use looper_deploy::{AttemptOutcome, PipelineOutcome};

use crate::cli::OutputFormat;

/// Render `outcome` in the requested format.
pub fn render(outcome: &PipelineOutcome, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(outcome).context("Failed to serialize outcome")
        }
        OutputFormat::Json => serde_json::to_string(outcome).context("Failed to serialize outcome"),
        OutputFormat::Table => Ok(render_table(outcome)),
    }
}

fn render_table(outcome: &PipelineOutcome) -> String {
    let mut attempts = Table::new();
    attempts.set_header(vec!["#", "method", "result"]);
    for record in outcome.attempts() {
        let result = match &record.outcome {
            AttemptOutcome::Success(tx) => format!("ok {}", tx.tx_hash),
            AttemptOutcome::Failure(error) => format!("failed: {}", error),
        };
        attempts.add_row(vec![
            record.attempt_number.to_string(),
            record.method.to_string(),
            result,
        ]);
    }

    let summary = match outcome {
        PipelineOutcome::Deployed { tx, .. } => format!(
            "Deployed {} on {}\ntx: {}\ngas: {}{}",
            tx.contract_name,
            tx.network,
            tx.tx_hash,
            tx.gas_used,
            if tx.gasless { " (gasless)" } else { "" }
        ),
        PipelineOutcome::Fallback {
            last_error,
            suggestion,
            ..
        } => format!("Fallback: {}\n{}", last_error, suggestion),
    };

    format!("{}\n{}", attempts, summary)
}
