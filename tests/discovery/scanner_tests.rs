// Port scanner tests - real loopback listeners, no HTTP involved

use lmbridge_core::discovery::{DEFAULT_PORTS, open_ports, scan_ports};
use lmbridge_tests::closed_port;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

#[tokio::test]
async fn listening_port_is_open() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();

    let results = scan_ports("127.0.0.1", &[port], CONNECT_TIMEOUT).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].open);
    assert_eq!(open_ports(&results), vec![port]);
}

#[tokio::test]
async fn released_port_is_closed() {
    let port = closed_port();

    let results = scan_ports("127.0.0.1", &[port], CONNECT_TIMEOUT).await;

    assert!(!results[0].open);
    assert!(open_ports(&results).is_empty());
}

#[tokio::test]
async fn results_follow_input_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let open = listener.local_addr().expect("addr").port();
    let closed = closed_port();

    let results = scan_ports("127.0.0.1", &[closed, open], CONNECT_TIMEOUT).await;

    let ports: Vec<_> = results.iter().map(|s| s.port).collect();
    assert_eq!(ports, vec![closed, open]);
    assert_eq!(open_ports(&results), vec![open]);
}

#[tokio::test]
async fn unresolvable_host_reports_closed_quickly() {
    let started = Instant::now();

    let results = scan_ports("host.invalid", &[1234], CONNECT_TIMEOUT).await;

    assert!(!results[0].open);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn default_ports_start_with_lm_studio() {
    assert_eq!(DEFAULT_PORTS.first(), Some(&1234));
    assert!(DEFAULT_PORTS.contains(&11434));
}
