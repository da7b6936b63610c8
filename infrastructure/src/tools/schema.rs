//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the
//! `{"name", "description", "parameters"}` objects that function-calling
//! APIs expect.

use monitor_application::ToolSchemaPort;
use monitor_domain::ToolDefinition;
use serde_json::{Map, Value, json};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
///
/// Parameters with allowed values become `enum` schemas.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type));
            prop.insert("description".to_string(), json!(param.description));
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), json!(param.allowed_values));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, tools: &[ToolDefinition]) -> Vec<Value> {
        let mut tools: Vec<&ToolDefinition> = tools.iter().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_domain::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("get_user_prs", "List pull requests")
            .with_parameter(ToolParameter::new("username", "Team member name", false))
            .with_parameter(
                ToolParameter::new("filter", "PR state", false)
                    .with_allowed_values(["open", "closed", "merged", "all"]),
            )
            .with_parameter(ToolParameter::new("limit", "Max entries", true).with_type("integer"));

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "get_user_prs");
        assert_eq!(schema["description"], "List pull requests");
        assert_eq!(schema["parameters"]["type"], "object");

        let filter = &schema["parameters"]["properties"]["filter"];
        assert_eq!(filter["type"], "string");
        assert_eq!(filter["enum"], json!(["open", "closed", "merged", "all"]));

        let username = &schema["parameters"]["properties"]["username"];
        assert!(username.get("enum").is_none());

        assert_eq!(schema["parameters"]["properties"]["limit"]["type"], "integer");

        // Check required
        let required = schema["parameters"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("limit")]);
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let converter = JsonSchemaToolConverter;
        let tools = [
            ToolDefinition::new("get_user_issues", "Issues"),
            ToolDefinition::new("get_issue_status", "Status")
                .with_parameter(ToolParameter::new("issueKey", "Issue key", true)),
        ];

        let schemas = converter.all_tools_schema(&tools);
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[0]["name"], "get_issue_status");
        assert_eq!(schemas[1]["name"], "get_user_issues");

        // A tool without parameters still has an object schema
        assert_eq!(schemas[1]["parameters"]["type"], "object");
        assert!(schemas[1]["parameters"]["required"].as_array().unwrap().is_empty());
    }
}
