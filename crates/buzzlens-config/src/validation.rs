// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive windows and sane sampling parameters.

use crate::diagnostic::ConfigError;
use crate::model::BuzzlensConfig;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BuzzlensConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.anthropic.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "anthropic.model must not be empty".to_string(),
        });
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.max_tokens must be at least 1".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.anthropic.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "anthropic.temperature must be between 0.0 and 2.0, got {}",
                config.anthropic.temperature
            ),
        });
    }

    if config.cost.data_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "cost.data_dir must not be empty".to_string(),
        });
    }

    if config.cost.usage_file.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "cost.usage_file must not be empty".to_string(),
        });
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.window_secs must be at least 1".to_string(),
        });
    }

    if config.rate_limit.max_requests == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.max_requests must be at least 1".to_string(),
        });
    }

    if config.rate_limit.sweep_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.sweep_interval_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&BuzzlensConfig::default()).is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = BuzzlensConfig::default();
        config.rate_limit.window_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("window_secs")));
    }

    #[test]
    fn zero_max_requests_is_rejected() {
        let mut config = BuzzlensConfig::default();
        config.rate_limit.max_requests = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = BuzzlensConfig::default();
        config.agent.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("log_level")));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut config = BuzzlensConfig::default();
        config.anthropic.temperature = 3.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_data_dir_is_rejected() {
        let mut config = BuzzlensConfig::default();
        config.cost.data_dir = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = BuzzlensConfig::default();
        config.rate_limit.window_secs = 0;
        config.rate_limit.max_requests = 0;
        config.agent.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
