//! Tool schema conversion port.
//!
//! Separates "which tools exist" (application) from "how to serialize them
//! for the provider API" (infrastructure).

use monitor_domain::ToolDefinition;

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a provider-neutral schema object
    /// (`{"name", "description", "parameters"}`).
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools (sorted by name).
    fn all_tools_schema(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value>;
}
