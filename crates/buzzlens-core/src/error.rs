// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Buzzlens article analyzer.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The primary error type used across all Buzzlens crates.
#[derive(Debug, Error)]
pub enum BuzzlensError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Rejected caller input (negative token counts, malformed requests).
    /// Raised before any state mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Ledger persistence errors (usage file read or write failure).
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM provider errors (API failure, unparseable response, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Request rejected by the rate limiter. Carries the window reset instant
    /// so callers can communicate retry timing.
    #[error("rate limit exceeded, retry after {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
