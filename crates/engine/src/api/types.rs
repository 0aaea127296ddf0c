use serde::Deserialize;
use serde_json::{Map, Value};

// Resolution endpoints
#[derive(Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

// Execution endpoint
#[derive(Deserialize)]
pub struct ExecuteRequest {
    pub tool_call: Map<String, Value>,
}
