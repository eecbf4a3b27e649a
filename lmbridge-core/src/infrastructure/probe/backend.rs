//! Backend seam between tool handlers and the HTTP probe

use super::client::InferenceServerProbe;
use super::error::ProbeError;
use super::types::CompletionRequest;
use crate::domain::{ModelDescriptor, ServerEndpoint};
use async_trait::async_trait;

/// Operations the MCP tools forward to an inference server
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// List the models currently loaded on the server
    async fn list_models(
        &self,
        endpoint: &ServerEndpoint,
    ) -> Result<Vec<ModelDescriptor>, ProbeError>;

    /// Send a chat completion and return the first choice's content
    async fn complete(
        &self,
        endpoint: &ServerEndpoint,
        request: &CompletionRequest,
    ) -> Result<String, ProbeError>;
}

#[async_trait]
impl InferenceBackend for InferenceServerProbe {
    async fn list_models(
        &self,
        endpoint: &ServerEndpoint,
    ) -> Result<Vec<ModelDescriptor>, ProbeError> {
        InferenceServerProbe::list_models(self, endpoint).await
    }

    async fn complete(
        &self,
        endpoint: &ServerEndpoint,
        request: &CompletionRequest,
    ) -> Result<String, ProbeError> {
        InferenceServerProbe::complete(self, endpoint, request).await
    }
}
