//! Inference server probe
//!
//! Reachability checks against `/v1/models` and single-shot completion
//! checks against `/v1/chat/completions`. Nothing here raises: every
//! transport, status and decode failure comes back as a [`ProbeError`]
//! inside the result.

pub mod backend;
pub mod client;
pub mod error;
pub mod types;
mod wire;

pub use backend::InferenceBackend;
pub use client::InferenceServerProbe;
pub use error::{FailureKind, ProbeError};
pub use types::{CompletionCheck, CompletionRequest, ProbeResult};
