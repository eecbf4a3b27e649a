//! Port Scanner
//!
//! TCP connect checks over a list of candidate ports, used to find where a
//! local inference server is listening before probing its HTTP API.
//!
//! Every port gets its own bounded connect attempt. Attempts run
//! concurrently and results come back in the order the ports were given.

use futures::future::join_all;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

/// Ports tried when none are given: LM Studio, common dev servers, Ollama.
pub const DEFAULT_PORTS: &[u16] = &[1234, 1235, 8080, 8000, 3000, 5000, 11434];

/// Connect timeout per port.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Result of one connect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStatus {
    pub port: u16,
    pub open: bool,
}

/// Check which of `ports` accept a TCP connection on `host`.
///
/// # Arguments
///
/// * `host` - Host name or address, e.g. `localhost`
/// * `ports` - Ports to try, in report order
/// * `connect_timeout` - Bound for each individual attempt
pub async fn scan_ports(host: &str, ports: &[u16], connect_timeout: Duration) -> Vec<PortStatus> {
    info!(host, ports = ports.len(), "Scanning ports");

    let attempts = ports
        .iter()
        .map(|&port| async move {
            let open = is_port_open(host, port, connect_timeout).await;
            debug!(host, port, open, "Port checked");
            PortStatus { port, open }
        });
    let results = join_all(attempts).await;

    info!(
        host,
        open = results.iter().filter(|s| s.open).count(),
        "Port scan complete"
    );
    results
}

/// Open ports out of a scan, in scan order.
pub fn open_ports(results: &[PortStatus]) -> Vec<u16> {
    results.iter().filter(|s| s.open).map(|s| s.port).collect()
}

async fn is_port_open(host: &str, port: u16, connect_timeout: Duration) -> bool {
    matches!(
        timeout(connect_timeout, TcpStream::connect((host, port))).await,
        Ok(Ok(_))
    )
}
