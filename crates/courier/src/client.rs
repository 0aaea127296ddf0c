use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use switchboard_shared::Tool;

#[derive(Deserialize, Debug)]
pub struct ToolsResponse {
    pub tools: Vec<Tool>,
}

#[derive(Deserialize, Debug)]
pub struct ToolCallResponse {
    pub tool_call: Value,
}

#[derive(Deserialize, Debug)]
pub struct ToolsResultResponse {
    pub tools_result: Map<String, Value>,
}

#[derive(Deserialize, Debug)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn list_tools(&self) -> Result<Vec<Tool>> {
        let url = format!("{}/tools", self.base_url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Request failed: {}", response.status()));
        }

        let response = response.json::<ToolsResponse>().await?;
        Ok(response.tools)
    }

    /// Resolve a prompt into a tool-call object. The returned value is the
    /// call map, or a plain string when the server fell back to free text.
    pub async fn get_toolcall(&self, prompt: &str) -> Result<Value> {
        let url = format!("{}/get_toolcall", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Request failed: {}", response.status()));
        }

        let response = response.json::<ToolCallResponse>().await?;
        Ok(response.tool_call)
    }

    pub async fn execute_toolcall(&self, tool_call: &Map<String, Value>) -> Result<Map<String, Value>> {
        let url = format!("{}/execute_toolcall", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "tool_call": tool_call }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Request failed: {}", response.status()));
        }

        let response = response.json::<ToolsResultResponse>().await?;
        Ok(response.tools_result)
    }

    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/answer", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Request failed: {}", response.status()));
        }

        let response = response.json::<AnswerResponse>().await?;
        Ok(response.answer)
    }
}
