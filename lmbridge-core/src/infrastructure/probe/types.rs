//! Probe types - results of discovery and completion checks

use super::error::ProbeError;
use crate::domain::ModelDescriptor;

/// Outcome of one reachability probe.
///
/// Built only through [`ProbeResult::reachable`] and
/// [`ProbeResult::unreachable`]: an unreachable result always carries an
/// error and never carries models.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    reachable: bool,
    models: Vec<ModelDescriptor>,
    error: Option<ProbeError>,
}

impl ProbeResult {
    pub fn reachable(models: Vec<ModelDescriptor>) -> Self {
        Self {
            reachable: true,
            models,
            error: None,
        }
    }

    pub fn unreachable(error: ProbeError) -> Self {
        Self {
            reachable: false,
            models: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Models in server-supplied order, duplicates included
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.error.as_ref()
    }

    /// `false` both when unreachable and when reachable with nothing loaded;
    /// pair with [`is_reachable`](Self::is_reachable) to tell them apart.
    pub fn has_models(&self) -> bool {
        !self.models.is_empty()
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.id.as_str())
    }

    pub fn contains_model(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m.id == model_id)
    }

    pub fn into_models(self) -> Vec<ModelDescriptor> {
        self.models
    }
}

/// Parameters of a single chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Local checks done before any network call
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.model.trim().is_empty() {
            return Err(ProbeError::invalid_request("model id must not be empty"));
        }
        if self.max_tokens == 0 {
            return Err(ProbeError::invalid_request(
                "max_tokens must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Outcome of verifying that a model can produce a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCheck {
    pub model_id: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Trimmed completion text or the captured failure
    pub outcome: Result<String, ProbeError>,
}

impl CompletionCheck {
    pub(crate) fn from_request(request: CompletionRequest, outcome: Result<String, ProbeError>) -> Self {
        Self {
            model_id: request.model,
            prompt: request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn text(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }
}
