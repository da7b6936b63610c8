//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every chat turn.
    pub conversation_log: Option<PathBuf>,
    /// File receiving tracing output in addition to stderr.
    pub file: Option<PathBuf>,
}
