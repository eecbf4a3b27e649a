//! Inference Server Discovery
//!
//! Locating a local inference server happens in two stages before the
//! HTTP probe takes over:
//!
//! - **Scanner** (`scanner.rs`): TCP connect checks over candidate ports
//! - **Host** (`host.rs`): OS details, WSL detection and process lookup
//!
//! # Usage
//!
//! ```ignore
//! use lmbridge_core::discovery::{scanner, DEFAULT_PORTS};
//!
//! let results = scanner::scan_ports("localhost", DEFAULT_PORTS, scanner::DEFAULT_CONNECT_TIMEOUT).await;
//! for port in scanner::open_ports(&results) {
//!     println!("open: {port}");
//! }
//! ```

pub mod host;
pub mod scanner;

pub use host::{ProcessMatch, SystemInfo, find_server_processes};
pub use scanner::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORTS, PortStatus, open_ports, scan_ports};

/// Host used for port scans when none is given.
pub const DEFAULT_SCAN_HOST: &str = "localhost";
