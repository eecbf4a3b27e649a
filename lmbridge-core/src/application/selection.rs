//! Model selection
//!
//! Choosing which loaded model to use is a caller decision. The probe only
//! reports what the server has loaded; a [`ModelSelector`] turns that list
//! into one id, either deterministically or by asking an operator.

use crate::domain::ModelDescriptor;
use tracing::debug;

/// Picks one model id out of a server's listing
pub trait ModelSelector {
    /// `None` means nothing was selected (empty list, cancelled, not found)
    fn select(&mut self, models: &[ModelDescriptor]) -> Option<String>;
}

/// Takes the first model in server order
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstModelSelector;

impl ModelSelector for FirstModelSelector {
    fn select(&mut self, models: &[ModelDescriptor]) -> Option<String> {
        models.first().map(|m| m.id.clone())
    }
}

/// Takes a configured id, but only when the server actually has it loaded
#[derive(Debug, Clone)]
pub struct FixedModelSelector {
    model_id: String,
}

impl FixedModelSelector {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl ModelSelector for FixedModelSelector {
    fn select(&mut self, models: &[ModelDescriptor]) -> Option<String> {
        let found = models.iter().any(|m| m.id == self.model_id);
        if !found {
            debug!(
                model = self.model_id.as_str(),
                "Configured model is not loaded on the server"
            );
        }
        found.then(|| self.model_id.clone())
    }
}

/// Fragments marking embedding-only models, which cannot chat
const NON_GENERATIVE_MARKERS: &[&str] = &["embed"];

/// Whether a model is expected to answer chat completions.
///
/// Heuristic on the id only; servers do not report model capabilities.
pub fn is_generative(model: &ModelDescriptor) -> bool {
    let id = model.id.to_lowercase();
    !NON_GENERATIVE_MARKERS
        .iter()
        .any(|marker| id.contains(marker))
}

/// Generative models in server order
pub fn generative_models(models: &[ModelDescriptor]) -> impl Iterator<Item = &ModelDescriptor> {
    models.iter().filter(|m| is_generative(m))
}
