use crate::config::Config;
use crate::llm::LlmClient;

/// Per-process context shared by all request handlers. The tool registry
/// itself is static and read-only, so this only carries the connections.
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let llm = LlmClient::new(config.ollama_url.clone(), config.model.clone());
        Self { config, llm }
    }
}
