use anyhow::Result;
use serde_json::{Map, Value};
use switchboard_shared::{executor, registry};

use crate::llm::LlmClient;
use crate::resolver::{self, ResolvedIntent};
use crate::Message;

/// Full query round-trip: resolve tool calls, execute them in order, then
/// let the model phrase an answer from the results.
///
/// A free-text resolution is returned directly (single model round-trip).
/// Failed tool calls are not retried; their error text rides along in the
/// result set for the model to explain.
pub async fn answer(llm: &LlmClient, query: &str) -> Result<String> {
    let tools = registry::get_tools();
    let intent = resolver::resolve(llm, query, &tools, true).await?;

    let calls = match intent {
        ResolvedIntent::FreeText(text) => return Ok(text),
        ResolvedIntent::ToolCalls(calls) => calls,
    };

    tracing::info!("executing {} resolved tool call(s)", calls.len());
    let results = executor::execute_all(&calls);

    let messages = vec![
        Message {
            role: "system".to_string(),
            content: build_answer_prompt(&results),
        },
        Message {
            role: "user".to_string(),
            content: query.to_string(),
        },
    ];

    let reply = llm.chat(&messages).await?;
    Ok(resolver::strip_reasoning(&reply))
}

/// Second-round system instruction embedding the computed results verbatim.
pub fn build_answer_prompt(results: &Map<String, Value>) -> String {
    format!(
        "You are a helpful assistant. Use only the previously computed tool results \
         to answer the question. Don't make up any new information and don't mention \
         the tools in your response: {}",
        Value::Object(results.clone())
    )
}
