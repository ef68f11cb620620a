//! Tool definitions advertised by the server and call results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool advertised by the MCP server
///
/// Created fresh on every successful connect; a reconnect replaces the
/// whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name, unique within a connection
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool parameters
    #[serde(default)]
    pub input_schema: Map<String, Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        if let Value::Object(map) = schema {
            self.input_schema = map;
        }
        self
    }
}

/// Result of forwarding a tool call to the server
///
/// `content` items are passed through as the server sent them
/// (`{"type": "text", "text": ...}`, `{"type": "image", ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallOutput {
    pub content: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolCallOutput {
    pub fn new(content: Vec<Value>) -> Self {
        Self {
            content,
            is_error: None,
        }
    }

    /// Single text item result
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![serde_json::json!({ "type": "text", "text": text.into() })])
    }

    pub fn with_error_flag(mut self, is_error: bool) -> Self {
        self.is_error = Some(is_error);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("batch_design")
            .with_description("Insert, update, delete design elements")
            .with_schema(json!({
                "type": "object",
                "properties": { "operations": { "type": "array" } },
                "required": ["operations"]
            }));

        assert_eq!(tool.name, "batch_design");
        assert_eq!(tool.input_schema.get("type"), Some(&json!("object")));
    }

    #[test]
    fn test_non_object_schema_is_ignored() {
        let tool = ToolDefinition::new("x").with_schema(json!("not a schema"));
        assert!(tool.input_schema.is_empty());
    }

    #[test]
    fn test_text_output() {
        let output = ToolCallOutput::text("done").with_error_flag(true);
        assert_eq!(output.content, vec![json!({ "type": "text", "text": "done" })]);
        assert_eq!(output.is_error, Some(true));
    }
}
