use std::process::ExitCode;

use lmbridge_core::integration::LaunchConfig;
use lmbridge_core::selection::{FixedModelSelector, ModelSelector};
use lmbridge_core::{BridgeSettings, InferenceServerProbe};
use tracing::info;

use super::{SETUP_MAX_TOKENS, SETUP_PROMPT, VERIFY_TEMPERATURE};
use crate::CliError;
use crate::report;
use crate::selector::TerminalSelector;

pub async fn run(settings: &BridgeSettings) -> Result<ExitCode, CliError> {
    let probe = InferenceServerProbe::from_settings(settings);
    let endpoint = settings.endpoint();
    report::banner("LM Studio MCP Setup");

    report::section("Server");
    let listing = probe.check_reachable(&endpoint).await;
    if let Some(error) = listing.error() {
        report::probe_failure(&format!("LM Studio is not accessible at {endpoint}"), error);
        return Ok(ExitCode::FAILURE);
    }
    if !listing.has_models() {
        println!("  ✗ No models found. Please load a model in LM Studio first.");
        return Ok(ExitCode::FAILURE);
    }
    println!("  ✓ {endpoint} has {} model(s) loaded", listing.models().len());

    let selected = match settings.model() {
        Some(model) => {
            let picked = FixedModelSelector::new(model).select(listing.models());
            if picked.is_none() {
                println!("  ✗ Model '{model}' is not loaded on {endpoint}");
                return Ok(ExitCode::FAILURE);
            }
            picked
        }
        None => TerminalSelector::stdio().select(listing.models()),
    };
    let Some(model_id) = selected else {
        println!("No model selected. Exiting.");
        return Ok(ExitCode::FAILURE);
    };

    report::section("Model check");
    let check = probe
        .verify_model(
            &endpoint,
            &model_id,
            SETUP_PROMPT,
            SETUP_MAX_TOKENS,
            VERIFY_TEMPERATURE,
        )
        .await;
    match &check.outcome {
        Ok(text) => println!("  ✓ {model_id} replied: {text}"),
        Err(error) => {
            report::probe_failure(&model_id, error);
            return Ok(ExitCode::FAILURE);
        }
    }

    let config = LaunchConfig::from_settings(settings, &model_id)?;
    config.write_to(&settings.launch_config_path)?;
    info!(
        path = %settings.launch_config_path.display(),
        model = model_id.as_str(),
        "Launch config written"
    );

    report::section("Done");
    println!(
        "  ✓ Launch config saved to {}",
        settings.launch_config_path.display()
    );
    println!("  Restart your agent to pick up the 'lmstudio' tools.");
    Ok(ExitCode::SUCCESS)
}
