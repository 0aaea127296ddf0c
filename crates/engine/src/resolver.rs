use anyhow::Result;
use serde_json::{Map, Value};
use switchboard_shared::Tool;

use crate::llm::LlmClient;
use crate::Message;

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Outcome of one resolution round-trip: either a structured call map or the
/// model's answer text as-is. Exactly one of the two.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedIntent {
    ToolCalls(Map<String, Value>),
    FreeText(String),
}

/// Ask the model which tools to call for `query`.
///
/// Malformed model output never fails resolution: it degrades to the
/// free-text variant. Only a failed round-trip to the model is an error.
pub async fn resolve(
    llm: &LlmClient,
    query: &str,
    tools: &[Tool],
    lenient: bool,
) -> Result<ResolvedIntent> {
    let messages = vec![
        Message {
            role: "system".to_string(),
            content: build_toolcall_prompt(tools),
        },
        Message {
            role: "user".to_string(),
            content: query.to_string(),
        },
    ];

    let reply = llm.chat(&messages).await?;
    tracing::debug!(model = llm.model(), "raw model reply: {}", reply);

    let cleaned = strip_reasoning(&reply);
    Ok(parse_intent(&cleaned, lenient))
}

/// System instruction embedding the tool catalogue. Deterministic for a
/// fixed catalogue so prompts are reproducible.
pub fn build_toolcall_prompt(tools: &[Tool]) -> String {
    let mut prompt = String::from(
        "You are a helpful assistant. If you need to use a tool, reply ONLY with a \
         JSON object mapping each tool name to its argument object, like \
         {\"<tool_name>\": {\"<argument>\": <value>, ...}, ...}. \
         Otherwise, answer normally.\nAvailable tools:\n",
    );
    for tool in tools {
        prompt.push_str(&format!(
            "- {}: {}\n",
            tool.function.name, tool.function.description
        ));
    }
    prompt
}

/// Remove `<think>...</think>` scratch spans and the whitespace that trails
/// them. Spans are matched scanning forward, never nested; an unterminated
/// open marker is left in place.
pub fn strip_reasoning(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(THINK_OPEN) {
        match rest[start..].find(THINK_CLOSE) {
            Some(rel_end) => {
                out.push_str(&rest[..start]);
                rest = rest[start + rel_end + THINK_CLOSE.len()..].trim_start();
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Interpret cleaned model output as a tool-call map.
///
/// Strict JSON first; with `lenient` set, retry on the span from the first
/// `{` to the last `}`. Anything else is the free-text fallback, carrying
/// the cleaned text verbatim.
pub fn parse_intent(text: &str, lenient: bool) -> ResolvedIntent {
    if let Some(calls) = parse_call_object(text) {
        return ResolvedIntent::ToolCalls(calls);
    }

    if lenient {
        if let Some(span) = embedded_object_span(text) {
            if let Some(calls) = parse_call_object(span) {
                return ResolvedIntent::ToolCalls(calls);
            }
        }
    }

    ResolvedIntent::FreeText(text.to_string())
}

fn parse_call_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn embedded_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_call_object_parses() {
        let input = r#"{"convert_length": {"value": 3, "from_unit": "meters", "to_unit": "feet"}}"#;
        let intent = parse_intent(input, false);

        match intent {
            ResolvedIntent::ToolCalls(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(
                    calls["convert_length"],
                    json!({"value": 3, "from_unit": "meters", "to_unit": "feet"})
                );
            }
            other => panic!("expected tool calls, got {:?}", other),
        }
    }

    #[test]
    fn lenient_recovery_extracts_embedded_object() {
        let input = r#"Some reasoning. {"convert_length": {"value": 3}} trailing notes"#;

        assert!(matches!(
            parse_intent(input, true),
            ResolvedIntent::ToolCalls(_)
        ));
        // Without lenient recovery the same input is a plain answer.
        assert!(matches!(
            parse_intent(input, false),
            ResolvedIntent::FreeText(_)
        ));
    }

    #[test]
    fn prose_falls_back_verbatim() {
        let input = "The current pope is Leo XIV.";
        assert_eq!(
            parse_intent(input, true),
            ResolvedIntent::FreeText(input.to_string())
        );
    }

    #[test]
    fn non_object_json_is_free_text() {
        assert!(matches!(parse_intent("42", true), ResolvedIntent::FreeText(_)));
        assert!(matches!(
            parse_intent("[1, 2, 3]", true),
            ResolvedIntent::FreeText(_)
        ));
    }

    #[test]
    fn multiple_calls_keep_model_order() {
        let input = r#"{"calculate_age": {"birth_date": "1998-04-27"}, "convert_length": {"value": 1.85, "from_unit": "meters", "to_unit": "feet"}}"#;
        match parse_intent(input, false) {
            ResolvedIntent::ToolCalls(calls) => {
                let names: Vec<&String> = calls.keys().collect();
                assert_eq!(names, ["calculate_age", "convert_length"]);
            }
            other => panic!("expected tool calls, got {:?}", other),
        }
    }

    #[test]
    fn reasoning_spans_are_stripped() {
        assert_eq!(
            strip_reasoning("<think>hmm</think>\n  {\"a\": {}}"),
            "{\"a\": {}}"
        );
        assert_eq!(
            strip_reasoning("<think>one</think>x<think>two</think>y"),
            "xy"
        );
        assert_eq!(strip_reasoning("no markers here"), "no markers here");
    }

    #[test]
    fn unterminated_reasoning_span_is_preserved() {
        assert_eq!(strip_reasoning("<think>never closed"), "<think>never closed");
    }

    #[test]
    fn toolcall_prompt_lists_catalogue() {
        let tools = switchboard_shared::get_tools();
        let prompt = build_toolcall_prompt(&tools);

        assert!(prompt.contains("reply ONLY with a JSON object"));
        for tool in &tools {
            assert!(prompt.contains(&format!("- {}:", tool.function.name)));
        }
    }
}
