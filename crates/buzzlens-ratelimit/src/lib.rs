// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window per-client rate limiting.
//!
//! Tracks request counts per identifier (usually a client IP) within a fixed
//! window and admits or rejects requests. A background sweep evicts expired
//! entries to bound memory.

pub mod identity;
pub mod limiter;

pub use identity::client_identifier;
pub use limiter::{Decision, RateLimiter};
