pub mod api;
pub mod config;
pub mod llm;
pub mod orchestrator;
pub mod resolver;
pub mod state;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Message {
    pub role: String,
    pub content: String,
}
