use crate::constants::DEFAULT_BASE_URL;
use std::fmt;

/// Base URL (scheme, host, port) of an inference server.
///
/// The string is taken as given. Malformed input is left for the HTTP
/// transport to reject when a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerEndpoint {
    base_url: String,
}

impl ServerEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `http://localhost:{port}`
    pub fn localhost(port: u16) -> Self {
        Self::new(format!("http://localhost:{port}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build URL from base and path
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl Default for ServerEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

impl From<&str> for ServerEndpoint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ServerEndpoint {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
