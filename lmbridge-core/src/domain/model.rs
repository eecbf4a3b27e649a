use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// One entry of a server's `/v1/models` listing.
///
/// A snapshot valid at fetch time only. Everything besides `id` is kept
/// as opaque metadata in the order the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    #[serde(flatten)]
    pub metadata: JsonMap<String, Value>,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: JsonMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// `owned_by` as reported by OpenAI-compatible servers
    pub fn owner(&self) -> Option<&str> {
        self.metadata.get("owned_by").and_then(Value::as_str)
    }
}
