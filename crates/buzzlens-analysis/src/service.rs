// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The analysis request flow: admit, complete, record.
//!
//! One `AnalysisService` per process wires the rate limiter, the completion
//! provider, and the usage ledger together. Usage recording is a direct
//! in-process call on the ledger, made as soon as the provider responds and
//! before the response text is parsed, so a malformed model reply still shows
//! up in the cost accounting.

use std::sync::Arc;

use buzzlens_config::model::AnthropicConfig;
use buzzlens_core::{BuzzlensError, CompletionProvider, CompletionRequest};
use buzzlens_cost::UsageLedger;
use buzzlens_ratelimit::RateLimiter;
use chrono::Utc;
use tracing::{info, warn};

use crate::prompt::{build_user_prompt, ArticleInput, SYSTEM_PROMPT};
use crate::scoring::{parse_assessment, AnalysisReport};

/// Coordinates one article analysis from admission to report.
pub struct AnalysisService {
    provider: Arc<dyn CompletionProvider>,
    ledger: Arc<UsageLedger>,
    limiter: Arc<RateLimiter>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnalysisService {
    /// Create a service over the given provider, ledger, and limiter.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        ledger: Arc<UsageLedger>,
        limiter: Arc<RateLimiter>,
        anthropic: &AnthropicConfig,
    ) -> Self {
        Self {
            provider,
            ledger,
            limiter,
            model: anthropic.model.clone(),
            max_tokens: anthropic.max_tokens,
            temperature: anthropic.temperature,
        }
    }

    /// Analyze an article on behalf of `identifier` (usually a client IP).
    ///
    /// Consults the rate limiter first; a rejected request returns
    /// `RateLimited` with the window's reset instant and triggers no provider
    /// call. On success the provider's token usage is recorded in the ledger;
    /// a recording failure is logged but does not discard the analysis.
    pub async fn analyze(
        &self,
        identifier: &str,
        article: &ArticleInput,
    ) -> Result<AnalysisReport, BuzzlensError> {
        let decision = self.limiter.check(identifier, Utc::now());
        if !decision.allowed {
            warn!(identifier, reset_at = %decision.reset_at, "analysis request rejected");
            return Err(BuzzlensError::RateLimited {
                reset_at: decision.reset_at,
            });
        }

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(article),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let response = self.provider.complete(request).await?;

        if let Err(e) = self
            .ledger
            .record_usage(&response.usage, &self.model)
            .await
        {
            warn!(error = %e, "failed to record usage for completed analysis");
        }

        let assessment = parse_assessment(&response.text)?;
        let report = AnalysisReport::from_assessment(assessment, Utc::now());

        info!(
            identifier,
            viral_score = report.viral_score,
            rating = %report.rating,
            remaining = decision.remaining,
            "article analyzed"
        );

        Ok(report)
    }
}
