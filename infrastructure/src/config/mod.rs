//! Configuration file loading for team-monitor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TEAM_MONITOR_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./team-monitor.toml`
//! 4. Global: `~/.config/team-monitor/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    CacheBackend, ConfigValidationError, FileAggregationConfig, FileCacheConfig, FileChatConfig,
    FileConfig, FileGitHubConfig, FileIdentityConfig, FileIdentityEntry, FileJiraConfig,
    FileLoggingConfig, FileOpenAiConfig,
};
pub use loader::ConfigLoader;
