// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Buzzlens workspace.

use serde::{Deserialize, Serialize};

use crate::error::BuzzlensError;

/// Token counts reported by an LLM provider for a single API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens charged at the full input rate.
    pub input_tokens: u32,
    /// Number of output tokens.
    pub output_tokens: u32,
    /// Number of tokens written to the prompt cache.
    pub cache_creation_tokens: u32,
    /// Number of tokens served from the prompt cache.
    pub cache_read_tokens: u32,
}

impl TokenUsage {
    /// Build a `TokenUsage` from untrusted signed counts.
    ///
    /// Counts arrive as plain JSON numbers at the API boundary; negative
    /// values are rejected here, before any ledger state is touched.
    pub fn from_counts(
        input_tokens: i64,
        output_tokens: i64,
        cache_creation_tokens: i64,
        cache_read_tokens: i64,
    ) -> Result<Self, BuzzlensError> {
        let check = |name: &str, value: i64| -> Result<u32, BuzzlensError> {
            u32::try_from(value)
                .map_err(|_| BuzzlensError::InvalidInput(format!("{name} must be a non-negative integer, got {value}")))
        };
        Ok(Self {
            input_tokens: check("input_tokens", input_tokens)?,
            output_tokens: check("output_tokens", output_tokens)?,
            cache_creation_tokens: check("cache_creation_tokens", cache_creation_tokens)?,
            cache_read_tokens: check("cache_read_tokens", cache_read_tokens)?,
        })
    }
}

/// A completion request for an LLM provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (cacheable by providers that support prompt caching).
    pub system: String,
    /// User prompt.
    pub user: String,
    /// Model identifier (e.g., "claude-sonnet-4-5-20250929").
    pub model: String,
    /// Maximum output tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// A completion response from an LLM provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text.
    pub text: String,
    /// Token counts for cost accounting.
    pub usage: TokenUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_counts_accepts_non_negative() {
        let usage = TokenUsage::from_counts(100, 50, 10, 5).unwrap();
        assert_eq!(usage.input_tokens, 100);
        assert_eq!(usage.output_tokens, 50);
        assert_eq!(usage.cache_creation_tokens, 10);
        assert_eq!(usage.cache_read_tokens, 5);
    }

    #[test]
    fn from_counts_accepts_zero() {
        let usage = TokenUsage::from_counts(0, 0, 0, 0).unwrap();
        assert_eq!(usage, TokenUsage::default());
    }

    #[test]
    fn from_counts_rejects_negative_input() {
        let err = TokenUsage::from_counts(-1, 50, 0, 0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("input_tokens"), "unexpected message: {msg}");
    }

    #[test]
    fn from_counts_rejects_negative_cache_read() {
        let err = TokenUsage::from_counts(10, 10, 0, -7).unwrap_err();
        assert!(matches!(err, BuzzlensError::InvalidInput(_)));
    }
}
