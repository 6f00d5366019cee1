// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Buzzlens.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Buzzlens configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuzzlensConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Usage ledger settings.
    #[serde(default)]
    pub cost: CostConfig,

    /// Per-client rate limit settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "buzzlens".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Model identifier used for article analysis.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

/// Usage ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Directory holding ledger state.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Usage file name within `data_dir`.
    #[serde(default = "default_usage_file")]
    pub usage_file: String,
}

impl CostConfig {
    /// Full path of the persisted usage file.
    pub fn usage_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.usage_file)
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            usage_file: default_usage_file(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_usage_file() -> String {
    "usage.json".to_string()
}

/// Per-client rate limit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Window duration in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Maximum admitted requests per window per identifier.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Interval between background sweeps of expired entries, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_window_secs() -> u64 {
    3600
}

fn default_max_requests() -> u32 {
    10
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BuzzlensConfig::default();
        assert_eq!(config.agent.name, "buzzlens");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.anthropic.model, "claude-sonnet-4-5-20250929");
        assert_eq!(config.anthropic.max_tokens, 4096);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.cost.data_dir, "data");
    }

    #[test]
    fn usage_path_joins_dir_and_file() {
        let cost = CostConfig::default();
        assert_eq!(cost.usage_path(), PathBuf::from("data/usage.json"));
    }
}
