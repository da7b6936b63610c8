//! Argument decoding shared by all tools.

use monitor_domain::ToolError;
use serde::de::DeserializeOwned;

/// Decode a raw argument payload. A blank payload decodes as `{}`.
pub fn decode_arguments<T: DeserializeOwned>(tool: &str, raw: &str) -> Result<T, ToolError> {
    let raw = raw.trim();
    let raw = if raw.is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| ToolError::invalid_arguments(tool, e.to_string()))
}

/// Treat an empty or whitespace-only string the same as a missing value.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
