use std::process::ExitCode;

use lmbridge_core::constants::{ENV_BASE_URL, ENV_MODEL};
use lmbridge_core::discovery::{
    DEFAULT_CONNECT_TIMEOUT, SystemInfo, find_server_processes, open_ports, scan_ports,
};
use lmbridge_core::selection::generative_models;
use lmbridge_core::{BridgeSettings, InferenceServerProbe, ProbeResult, ServerEndpoint};
use tracing::{debug, info};

use super::{DIAGNOSE_MAX_TOKENS, DIAGNOSE_PROMPT, VERIFY_TEMPERATURE};
use crate::cli::DiagnoseArgs;
use crate::report;

pub async fn run(settings: &BridgeSettings, args: &DiagnoseArgs) -> ExitCode {
    let probe = InferenceServerProbe::from_settings(settings);
    report::banner("LM Studio Diagnostics");

    let system = SystemInfo::collect();
    report::section("System information");
    for (label, value) in system.entries() {
        println!("  {label}: {value}");
    }

    report::section("Process check");
    let processes = find_server_processes();
    if processes.is_empty() {
        println!("  ✗ No LM Studio process found");
    }
    for process in &processes {
        println!("  ✓ {} (pid {})", process.name, process.pid);
    }

    report::section(&format!("Port scan on {}", args.host));
    let results = scan_ports(&args.host, &args.ports, DEFAULT_CONNECT_TIMEOUT).await;
    for status in &results {
        println!("  port {}: {}", status.port, report::open_label(status.open));
    }

    report::section("API probe");
    let Some((endpoint, listing)) = first_working_server(&probe, &args.host, &open_ports(&results)).await
    else {
        print_troubleshooting(system.wsl);
        return ExitCode::FAILURE;
    };

    let Some(model) = generative_models(listing.models()).next() else {
        println!();
        println!("✗ {endpoint} is up but no chat model is loaded.");
        println!("  Load a model in LM Studio and run diagnose again.");
        return ExitCode::FAILURE;
    };

    report::section("Model check");
    let check = probe
        .verify_model(
            &endpoint,
            &model.id,
            DIAGNOSE_PROMPT,
            DIAGNOSE_MAX_TOKENS,
            VERIFY_TEMPERATURE,
        )
        .await;
    match &check.outcome {
        Ok(text) => println!("  ✓ {} replied: {text}", model.id),
        Err(error) => {
            report::probe_failure(&model.id, error);
            return ExitCode::FAILURE;
        }
    }

    report::section("Working configuration");
    println!("  {ENV_BASE_URL}={endpoint}");
    println!("  {ENV_MODEL}={}", model.id);
    info!(endpoint = %endpoint, model = model.id.as_str(), "Diagnostics found a working server");
    ExitCode::SUCCESS
}

/// Probe open ports in order and stop at the first OpenAI-compatible one
async fn first_working_server(
    probe: &InferenceServerProbe,
    host: &str,
    ports: &[u16],
) -> Option<(ServerEndpoint, ProbeResult)> {
    if ports.is_empty() {
        println!("  No open ports to probe");
        return None;
    }
    for &port in ports {
        let endpoint = ServerEndpoint::new(format!("http://{host}:{port}"));
        let listing = probe.check_reachable(&endpoint).await;
        if let Some(error) = listing.error() {
            debug!(port, %error, "Port is not an OpenAI-compatible API");
            println!("  ✗ {endpoint}: {error} ({})", error.kind());
            continue;
        }
        println!(
            "  ✓ {endpoint}: OpenAI-compatible API with {} model(s)",
            listing.models().len()
        );
        for id in listing.model_ids() {
            println!("      • {id}");
        }
        return Some((endpoint, listing));
    }
    None
}

fn print_troubleshooting(wsl: bool) {
    println!();
    println!("✗ No working LM Studio server found");
    report::section("Troubleshooting");
    for (index, step) in troubleshooting_steps(wsl).iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
}

/// Operator checklist when no server answered
pub fn troubleshooting_steps(wsl: bool) -> Vec<&'static str> {
    let mut steps = vec![
        "Open LM Studio and load a model",
        "Start the local server from the Developer tab",
        "Confirm the server port (1234 by default)",
        "Run diagnose again, or pass --ports with the port LM Studio shows",
    ];
    if wsl {
        steps.extend([
            "WSL: enable 'Serve on Local Network' in LM Studio so Linux can reach it",
            "WSL: use the Windows host IP from /etc/resolv.conf with --host",
            "WSL: allow the port through the Windows firewall",
        ]);
    }
    steps
}
