use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::registry;

/// Execute a single named tool against its argument object.
pub fn execute(name: &str, args: &Value) -> Result<String, ToolError> {
    let handler = registry::get_handler(name).ok_or_else(|| ToolError::NotFound(name.to_string()))?;

    handler(args).map_err(|e| ToolError::Execution {
        tool: name.to_string(),
        message: e.to_string(),
    })
}

/// Execute every call in the map sequentially, in map order.
///
/// Always produces exactly one entry per requested tool: failures are
/// recorded as that tool's result text instead of aborting the batch.
pub fn execute_all(calls: &Map<String, Value>) -> Map<String, Value> {
    let mut results = Map::new();

    for (name, args) in calls {
        let text = match execute(name, args) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{}", e);
                format!("Error: {}", e)
            }
        };
        results.insert(name.clone(), Value::String(text));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_tool_is_not_found() {
        let err = execute("nonexistent_tool", &json!({})).unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn handler_failure_is_execution_error() {
        let args = json!({"value": -1.0, "from_unit": "meters", "to_unit": "feet"});
        let err = execute("convert_length", &args).unwrap_err();
        match err {
            ToolError::Execution { tool, message } => {
                assert_eq!(tool, "convert_length");
                assert!(message.contains("negative"));
            }
            other => panic!("expected execution error, got {:?}", other),
        }
    }

    #[test]
    fn batch_continues_past_failures() {
        let mut calls = Map::new();
        calls.insert(
            "count_words".to_string(),
            json!({"text": "one two three"}),
        );
        calls.insert("bad_tool".to_string(), json!({}));

        let results = execute_all(&calls);

        assert_eq!(results.len(), 2);
        assert!(results["count_words"].as_str().unwrap().contains("\"words\":3"));
        assert!(results["bad_tool"].as_str().unwrap().starts_with("Error:"));
    }

    #[test]
    fn batch_preserves_call_order() {
        let mut calls = Map::new();
        calls.insert("calculate_age".to_string(), json!({"birth_date": "1998-04-27"}));
        calls.insert(
            "convert_length".to_string(),
            json!({"value": 1.85, "from_unit": "meters", "to_unit": "feet"}),
        );

        let results = execute_all(&calls);
        let keys: Vec<&String> = results.keys().collect();
        assert_eq!(keys, ["calculate_age", "convert_length"]);
    }
}
