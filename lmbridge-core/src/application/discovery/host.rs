//! Host diagnostics: OS details, WSL detection and server process lookup

use std::fs;
use tracing::debug;

const OS_RELEASE_PATH: &str = "/etc/os-release";
const PROC_VERSION_PATH: &str = "/proc/version";

/// Process name fragments that identify a running LM Studio
pub const SERVER_PROCESS_PATTERNS: &[&str] = &["lmstudio", "lm-studio"];

/// Facts about the machine the diagnostics run on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub version: String,
    pub wsl: bool,
}

impl SystemInfo {
    pub fn collect() -> Self {
        let os = fs::read_to_string(OS_RELEASE_PATH)
            .ok()
            .and_then(|content| parse_pretty_name(&content))
            .unwrap_or_else(|| "Unknown".to_string());
        let wsl = fs::read_to_string(PROC_VERSION_PATH)
            .map(|content| is_wsl_kernel(&content))
            .unwrap_or(false);
        debug!(os = os.as_str(), wsl, "Collected system information");

        Self {
            os,
            version: env!("CARGO_PKG_VERSION").to_string(),
            wsl,
        }
    }

    /// `(label, value)` pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("os", self.os.clone()),
            ("lmbridge_version", self.version.clone()),
            ("wsl", self.wsl.to_string()),
        ]
    }
}

/// `PRETTY_NAME` from an os-release file, quotes removed
pub fn parse_pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// WSL kernels report a Microsoft build string in /proc/version
pub fn is_wsl_kernel(proc_version: &str) -> bool {
    proc_version.to_lowercase().contains("microsoft")
}

/// A process that looks like an inference server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMatch {
    pub pid: u32,
    pub name: String,
}

/// Whether a process name or command line matches one of the patterns
pub fn matches_server_process(text: &str, patterns: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    patterns.iter().any(|pattern| lowered.contains(pattern))
}

/// Running processes whose name or command line mentions LM Studio
#[cfg(feature = "process-inspection")]
pub fn find_server_processes() -> Vec<ProcessMatch> {
    use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing().with_cmd(UpdateKind::OnlyIfNotSet),
    );

    let mut matches: Vec<ProcessMatch> = system
        .processes()
        .iter()
        .filter_map(|(pid, process)| {
            let name = process.name().to_string_lossy().into_owned();
            let cmdline = process
                .cmd()
                .iter()
                .map(|part| part.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ");
            let haystack = format!("{name} {cmdline}");
            matches_server_process(&haystack, SERVER_PROCESS_PATTERNS).then(|| ProcessMatch {
                pid: pid.as_u32(),
                name,
            })
        })
        .collect();
    matches.sort_by_key(|m| m.pid);

    debug!(count = matches.len(), "Server process lookup complete");
    matches
}

#[cfg(not(feature = "process-inspection"))]
pub fn find_server_processes() -> Vec<ProcessMatch> {
    debug!("Process inspection disabled at build time");
    Vec::new()
}
