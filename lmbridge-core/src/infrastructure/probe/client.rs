//! HTTP probe against one OpenAI-compatible server

use super::error::ProbeError;
use super::types::{CompletionCheck, CompletionRequest, ProbeResult};
use super::wire::{ChatCompletionRequest, ChatCompletionResponse, ModelListResponse};
use crate::config::BridgeSettings;
use crate::constants::{
    CHAT_COMPLETIONS_PATH, DEFAULT_COMPLETION_TIMEOUT, DEFAULT_REACHABILITY_TIMEOUT,
    MODELS_PATH, PLACEHOLDER_API_KEY,
};
use crate::domain::{ModelDescriptor, ServerEndpoint};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Read-only discovery and single-shot completion checks.
///
/// Holds only immutable settings. The HTTP client keeps no idle
/// connections, so every call opens and releases its own.
#[derive(Clone)]
pub struct InferenceServerProbe {
    http: Client,
    api_key: String,
    reachability_timeout: Duration,
    completion_timeout: Duration,
}

impl Default for InferenceServerProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceServerProbe {
    pub fn new() -> Self {
        Self {
            http: build_http_client(),
            api_key: PLACEHOLDER_API_KEY.to_string(),
            reachability_timeout: DEFAULT_REACHABILITY_TIMEOUT,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
        }
    }

    pub fn from_settings(settings: &BridgeSettings) -> Self {
        Self::new()
            .with_api_key(settings.api_key.clone())
            .with_reachability_timeout(settings.reachability_timeout)
            .with_completion_timeout(settings.completion_timeout)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_reachability_timeout(mut self, timeout: Duration) -> Self {
        self.reachability_timeout = timeout;
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    pub fn reachability_timeout(&self) -> Duration {
        self.reachability_timeout
    }

    pub fn completion_timeout(&self) -> Duration {
        self.completion_timeout
    }

    /// Query the model listing and report reachability.
    ///
    /// Every failure is captured in the returned [`ProbeResult`].
    pub async fn check_reachable(&self, endpoint: &ServerEndpoint) -> ProbeResult {
        match self.list_models(endpoint).await {
            Ok(models) => {
                info!(
                    endpoint = %endpoint,
                    models = models.len(),
                    "Inference server is reachable"
                );
                ProbeResult::reachable(models)
            }
            Err(error) => {
                warn!(
                    endpoint = %endpoint,
                    kind = %error.kind(),
                    %error,
                    "Inference server is not reachable"
                );
                ProbeResult::unreachable(error)
            }
        }
    }

    /// Ask `model_id` for one completion and report the trimmed text.
    ///
    /// Blank ids and a zero token ceiling are rejected without touching the
    /// network. No retry is attempted.
    pub async fn verify_model(
        &self,
        endpoint: &ServerEndpoint,
        model_id: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> CompletionCheck {
        let request = CompletionRequest::new(model_id, prompt)
            .with_max_tokens(max_tokens)
            .with_temperature(temperature);
        let outcome = self
            .complete(endpoint, &request)
            .await
            .map(|content| content.trim().to_string());
        match &outcome {
            Ok(text) => info!(
                endpoint = %endpoint,
                model = model_id,
                reply = text.as_str(),
                "Model verification succeeded"
            ),
            Err(error) => warn!(
                endpoint = %endpoint,
                model = model_id,
                kind = %error.kind(),
                %error,
                "Model verification failed"
            ),
        }
        CompletionCheck::from_request(request, outcome)
    }

    /// Fetch the loaded models in server order.
    pub async fn list_models(
        &self,
        endpoint: &ServerEndpoint,
    ) -> Result<Vec<ModelDescriptor>, ProbeError> {
        let url = endpoint.url(MODELS_PATH);
        debug!(url = url.as_str(), "Listing models");
        let request = self.http.get(&url);
        let body: ModelListResponse = self.send(request, self.reachability_timeout).await?;
        Ok(body.data)
    }

    /// Send one chat completion and return the first choice verbatim.
    pub async fn complete(
        &self,
        endpoint: &ServerEndpoint,
        request: &CompletionRequest,
    ) -> Result<String, ProbeError> {
        request.validate()?;

        let url = endpoint.url(CHAT_COMPLETIONS_PATH);
        let payload = ChatCompletionRequest::single_user_message(
            &request.model,
            &request.prompt,
            request.max_tokens,
            request.temperature,
        );
        debug!(
            url = url.as_str(),
            model = request.model.as_str(),
            max_tokens = request.max_tokens,
            "Sending chat completion"
        );

        let builder = self.http.post(&url).json(&payload);
        let body: ChatCompletionResponse = self.send(builder, self.completion_timeout).await?;
        body.first_content()
            .ok_or_else(|| ProbeError::malformed("response has no choices[0].message.content"))
    }

    async fn send<Res>(&self, request: RequestBuilder, timeout: Duration) -> Result<Res, ProbeError>
    where
        Res: DeserializeOwned,
    {
        let response = request
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::bad_status(status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProbeError::from_transport(&e, timeout))?;
        serde_json::from_slice(&bytes).map_err(|e| ProbeError::malformed(e.to_string()))
    }
}

fn build_http_client() -> Client {
    Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap_or_else(|err| {
            warn!(%err, "Falling back to default HTTP client");
            Client::new()
        })
}
