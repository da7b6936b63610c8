//! Tool Registry
//!
//! The [`ToolRegistry`] is the catalog of tools offered to the model on every
//! turn. It is assembled once at startup with a [`ToolRegistryBuilder`] and
//! is immutable afterwards: `build()` consumes the builder, so every
//! registration happens before the first lookup.
//!
//! # Usage
//!
//! ```ignore
//! let registry = ToolRegistry::builder()
//!     .register(GetUserCommitsTool::new(source_control, identity.clone()))
//!     .register(GetUserIssuesTool::new(issue_tracker, identity))
//!     .build();
//!
//! assert!(registry.has_tool("get_user_commits"));
//! let definitions = registry.definitions();
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use monitor_domain::ToolDefinition;

use crate::ports::tool::Tool;

/// Mutable registration phase of a [`ToolRegistry`]
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name replaces the earlier one.
    pub fn register<T: Tool + 'static>(self, tool: T) -> Self {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool (Arc version)
    pub fn register_arc(mut self, tool: Arc<dyn Tool>) -> Self {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Tool registered twice, keeping the latest");
        } else {
            tracing::debug!(tool = %name, "Registered tool");
        }
        self
    }

    /// Finish registration.
    pub fn build(self) -> ToolRegistry {
        tracing::info!(tools = self.tools.len(), "Tool registry ready");
        ToolRegistry {
            tools: Arc::new(self.tools),
        }
    }
}

/// Immutable name-to-tool catalog. Cheap to clone.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Arc<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// Start a new registration phase seeded with this registry's tools.
    pub fn to_builder(&self) -> ToolRegistryBuilder {
        ToolRegistryBuilder {
            tools: self.tools.as_ref().clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// One definition per registered tool, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
