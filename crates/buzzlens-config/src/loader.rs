// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./buzzlens.toml` > `~/.config/buzzlens/buzzlens.toml`
//! > `/etc/buzzlens/buzzlens.toml` with environment variable overrides via
//! `BUZZLENS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BuzzlensConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/buzzlens/buzzlens.toml` (system-wide)
/// 3. `~/.config/buzzlens/buzzlens.toml` (user XDG config)
/// 4. `./buzzlens.toml` (local directory)
/// 5. `BUZZLENS_*` environment variables
pub fn load_config() -> Result<BuzzlensConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BuzzlensConfig::default()))
        .merge(Toml::file("/etc/buzzlens/buzzlens.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("buzzlens/buzzlens.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("buzzlens.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BuzzlensConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BuzzlensConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BuzzlensConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BuzzlensConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `BUZZLENS_RATE_LIMIT_MAX_REQUESTS` must
/// map to `rate_limit.max_requests`, not `rate.limit.max.requests`.
fn env_provider() -> Env {
    Env::prefixed("BUZZLENS_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("cost_", "cost.", 1)
            .replacen("rate_limit_", "rate_limit.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.agent.name, "buzzlens");
        assert_eq!(config.rate_limit.max_requests, 10);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [rate_limit]
            window_secs = 60
            max_requests = 3

            [cost]
            data_dir = "/var/lib/buzzlens"
            "#,
        )
        .unwrap();
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.cost.data_dir, "/var/lib/buzzlens");
        // Unset keys keep their defaults.
        assert_eq!(config.rate_limit.sweep_interval_secs, 3600);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
            [rate_limit]
            window_seconds = 60
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = load_config_from_str(
            r#"
            [ratelimit]
            window_secs = 60
            "#,
        );
        assert!(result.is_err());
    }
}
