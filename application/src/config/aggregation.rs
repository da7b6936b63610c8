//! Aggregation mode.

use serde::{Deserialize, Serialize};

/// How the member activity tool runs its sub-tools.
///
/// `Sequential` runs the same steps one at a time on the caller's task and
/// merges results the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Concurrent,
    Sequential,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Concurrent => "concurrent",
            AggregationMode::Sequential => "sequential",
        }
    }
}

impl std::fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
