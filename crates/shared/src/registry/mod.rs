use once_cell::sync::Lazy;
use std::collections::HashMap;
use anyhow::Result;
use serde_json::Value;

use crate::schemas::{Tool, ToolHandler, ToolSchema};
use crate::toolbelts::{clock, conversion, search, text, tracker};

static TOOL_REGISTRY: Lazy<HashMap<&'static str, ToolHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for (name, handler) in conversion::TOOL_ENTRIES {
        map.insert(*name, *handler);
    }
    for (name, handler) in text::TOOL_ENTRIES {
        map.insert(*name, *handler);
    }
    for (name, handler) in clock::TOOL_ENTRIES {
        map.insert(*name, *handler);
    }
    for (name, handler) in tracker::TOOL_ENTRIES {
        map.insert(*name, *handler);
    }
    for (name, handler) in search::TOOL_ENTRIES {
        map.insert(*name, *handler);
    }

    map
});

static TOOL_SCHEMAS: Lazy<Vec<ToolSchema>> = Lazy::new(|| {
    let mut schemas = Vec::new();
    schemas.extend(conversion::TOOL_SCHEMAS.iter().cloned());
    schemas.extend(text::TOOL_SCHEMAS.iter().cloned());
    schemas.extend(clock::TOOL_SCHEMAS.iter().cloned());
    schemas.extend(tracker::TOOL_SCHEMAS.iter().cloned());
    schemas.extend(search::TOOL_SCHEMAS.iter().cloned());
    schemas
});

pub fn get_handler(name: &str) -> Option<ToolHandler> {
    TOOL_REGISTRY.get(name).copied()
}

pub fn use_tool(name: &str, args: &Value) -> Result<String> {
    TOOL_REGISTRY
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Tool '{}' not found", name))
        .and_then(|handler| handler(args))
}

/// Catalogue export: one entry per registered tool, in declaration order.
pub fn get_tools() -> Vec<Tool> {
    TOOL_SCHEMAS.iter().map(|s| s.to_tool()).collect()
}

pub fn get_tool_schema(name: &str) -> Result<&'static ToolSchema> {
    TOOL_SCHEMAS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| anyhow::anyhow!("Tool schema '{}' not found", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn one_catalogue_entry_per_registered_tool() {
        let tools = get_tools();
        assert_eq!(tools.len(), TOOL_REGISTRY.len());

        for tool in &tools {
            assert!(
                TOOL_REGISTRY.contains_key(tool.function.name.as_str()),
                "catalogue entry '{}' has no handler",
                tool.function.name
            );
        }
    }

    #[test]
    fn tool_names_are_unique() {
        let names: Vec<&str> = TOOL_SCHEMAS.iter().map(|s| s.name).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn catalogue_order_is_stable() {
        let first: Vec<String> = get_tools().into_iter().map(|t| t.function.name).collect();
        let second: Vec<String> = get_tools().into_iter().map(|t| t.function.name).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_tool_lookup_fails() {
        assert!(get_handler("nonexistent_tool").is_none());
        assert!(use_tool("nonexistent_tool", &serde_json::json!({})).is_err());
    }

    #[test]
    fn exported_parameter_schema_lists_required_fields() {
        let tool = get_tools()
            .into_iter()
            .find(|t| t.function.name == "convert_length")
            .unwrap();

        let params = &tool.function.parameters;
        assert_eq!(params["type"], "object");
        assert!(params["properties"]["value"].is_object());

        let required: Vec<&str> = params["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, ["value", "from_unit", "to_unit"]);
    }
}
