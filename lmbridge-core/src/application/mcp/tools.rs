use crate::domain::ServerEndpoint;
use crate::infrastructure::probe::{CompletionRequest, InferenceBackend};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const HEALTH_CHECK: &str = "health_check";
pub const LIST_MODELS: &str = "list_models";
pub const GET_CURRENT_MODEL: &str = "get_current_model";
pub const CHAT_COMPLETION: &str = "chat_completion";

const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolCallError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
    #[error("Invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: &'static str, reason: String },
}

/// Text returned by a tool; `is_error` marks a failed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// `tools/call` result body
    pub fn to_result(&self) -> Value {
        let mut result = json!({
            "content": [{ "type": "text", "text": self.text }]
        });
        if self.is_error {
            result["isError"] = Value::Bool(true);
        }
        result
    }
}

/// The four LM Studio tools, bound to one server and an optional model
pub struct LmStudioTools<B> {
    backend: B,
    endpoint: ServerEndpoint,
    model: Option<String>,
}

impl<B: InferenceBackend> LmStudioTools<B> {
    pub fn new(backend: B, endpoint: ServerEndpoint, model: Option<String>) -> Self {
        Self {
            backend,
            endpoint,
            model: model.filter(|m| !m.trim().is_empty()),
        }
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// `tools/list` entries
    pub fn definitions() -> Vec<Value> {
        let no_arguments = json!({ "type": "object", "properties": {}, "required": [] });
        vec![
            json!({
                "name": HEALTH_CHECK,
                "description": "Check if LM Studio server is running and healthy",
                "inputSchema": no_arguments,
            }),
            json!({
                "name": LIST_MODELS,
                "description": "List all available models in LM Studio",
                "inputSchema": no_arguments,
            }),
            json!({
                "name": GET_CURRENT_MODEL,
                "description": "Get the currently configured model",
                "inputSchema": no_arguments,
            }),
            json!({
                "name": CHAT_COMPLETION,
                "description": "Send a message to the LM Studio model",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "The message to send to the model"
                        },
                        "max_tokens": {
                            "type": "integer",
                            "description": "Maximum number of tokens to generate",
                            "default": DEFAULT_MAX_TOKENS
                        },
                        "temperature": {
                            "type": "number",
                            "description": "Temperature for response generation",
                            "default": 0.7
                        }
                    },
                    "required": ["message"]
                },
            }),
        ]
    }

    pub async fn call(&self, name: &str, arguments: &Value) -> Result<ToolOutput, ToolCallError> {
        debug!(tool = name, "Dispatching tool call");
        match name {
            HEALTH_CHECK => Ok(self.health_check().await),
            LIST_MODELS => Ok(self.list_models().await),
            GET_CURRENT_MODEL => Ok(self.get_current_model()),
            CHAT_COMPLETION => {
                let request = self.chat_arguments(arguments)?;
                Ok(self.chat_completion(request).await)
            }
            other => {
                warn!(tool = other, "Unknown tool requested");
                Err(ToolCallError::UnknownTool {
                    name: other.to_string(),
                })
            }
        }
    }

    async fn health_check(&self) -> ToolOutput {
        match self.backend.list_models(&self.endpoint).await {
            Ok(models) if models.is_empty() => {
                ToolOutput::ok("LM Studio server is running but no models are loaded")
            }
            Ok(models) => ToolOutput::ok(format!(
                "LM Studio server is healthy with {} model(s) loaded",
                models.len()
            )),
            Err(error) => {
                ToolOutput::failed(format!("LM Studio server is not accessible: {error}"))
            }
        }
    }

    async fn list_models(&self) -> ToolOutput {
        match self.backend.list_models(&self.endpoint).await {
            Ok(models) if models.is_empty() => {
                ToolOutput::ok("No models are currently loaded in LM Studio")
            }
            Ok(models) => {
                let lines: Vec<String> = models.iter().map(|m| format!("• {}", m.id)).collect();
                ToolOutput::ok(format!("Available models:\n{}", lines.join("\n")))
            }
            Err(error) => ToolOutput::failed(format!("Error fetching models: {error}")),
        }
    }

    fn get_current_model(&self) -> ToolOutput {
        match &self.model {
            Some(model) => ToolOutput::ok(format!("Current model: {model}")),
            None => ToolOutput::ok("No model is currently configured"),
        }
    }

    async fn chat_completion(&self, request: ChatArguments) -> ToolOutput {
        let Some(model) = &self.model else {
            return ToolOutput::failed(
                "No model is configured. Please set LM_STUDIO_MODEL environment variable.",
            );
        };

        let request = CompletionRequest::new(model.clone(), request.message)
            .with_max_tokens(request.max_tokens)
            .with_temperature(request.temperature);
        info!(
            model = model.as_str(),
            max_tokens = request.max_tokens,
            "Forwarding chat completion"
        );

        match self.backend.complete(&self.endpoint, &request).await {
            Ok(content) => ToolOutput::ok(content),
            Err(error) => ToolOutput::failed(format!("Error: {error}")),
        }
    }

    fn chat_arguments(&self, arguments: &Value) -> Result<ChatArguments, ToolCallError> {
        let invalid = |reason: &str| ToolCallError::InvalidArguments {
            tool: CHAT_COMPLETION,
            reason: reason.to_string(),
        };

        let message = arguments
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("'message' must be a string"))?
            .to_string();

        let max_tokens = match arguments.get("max_tokens") {
            None | Some(Value::Null) => DEFAULT_MAX_TOKENS,
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0)
                .ok_or_else(|| invalid("'max_tokens' must be a positive integer"))?,
        };

        let temperature = match arguments.get("temperature") {
            None | Some(Value::Null) => DEFAULT_TEMPERATURE,
            Some(value) => value
                .as_f64()
                .ok_or_else(|| invalid("'temperature' must be a number"))?
                as f32,
        };

        Ok(ChatArguments {
            message,
            max_tokens,
            temperature,
        })
    }
}

struct ChatArguments {
    message: String,
    max_tokens: u32,
    temperature: f32,
}
