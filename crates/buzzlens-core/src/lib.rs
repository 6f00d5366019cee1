// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Buzzlens article analyzer.
//!
//! This crate provides the error type, token accounting types, and the
//! completion-provider trait shared across the Buzzlens workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BuzzlensError;
pub use traits::CompletionProvider;
pub use types::{CompletionRequest, CompletionResponse, TokenUsage};
