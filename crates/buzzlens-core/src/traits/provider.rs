// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion-provider trait for LLM integrations.

use async_trait::async_trait;

use crate::error::BuzzlensError;
use crate::types::{CompletionRequest, CompletionResponse};

/// The LLM capability Buzzlens consumes: submit a prompt, receive generated
/// text plus token counts.
///
/// The analysis service is generic over this trait so the real API client
/// lives outside the core crates and tests can substitute a stub.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Sends a completion request and returns the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BuzzlensError>;
}
