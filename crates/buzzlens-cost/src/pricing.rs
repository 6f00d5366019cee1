// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing tables and cost calculation.
//!
//! Pricing verified from <https://docs.anthropic.com/en/docs/about-claude/pricing>
//! on 2026-03-01.
//!
//! Claude Haiku 3.5:  input=$0.80/MTok, output=$4.00/MTok
//! Claude Sonnet 4.5: input=$3.00/MTok, output=$15.00/MTok
//! Claude Opus 4:     input=$15.00/MTok, output=$75.00/MTok
//! Cache read = 10% of input price, cache write = 25% premium over input price.

use buzzlens_core::TokenUsage;

/// Number of fractional digits kept on every USD amount.
const USD_PRECISION: f64 = 1_000_000.0;

/// Per-model pricing in USD per million tokens.
#[derive(Debug, Clone)]
pub struct ModelPricing {
    /// Cost per million input tokens.
    pub input_per_mtok: f64,
    /// Cost per million output tokens.
    pub output_per_mtok: f64,
    /// Cost per million cache-read tokens.
    pub cache_read_per_mtok: f64,
    /// Cost per million cache-write (creation) tokens.
    pub cache_write_per_mtok: f64,
}

/// Per-category cost breakdown for a single API call, in USD.
///
/// Each field is rounded to six fractional digits independently; aggregates
/// elsewhere always sum these already-rounded values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub cache_creation_cost: f64,
    pub cache_read_cost: f64,
    /// Sum of the four cost categories.
    pub total_cost: f64,
    /// What the cache-read tokens would have cost at the model's full input
    /// rate, minus what was actually charged for them.
    pub savings: f64,
}

/// Look up pricing for a given model identifier.
///
/// Matches on substrings: "opus", "haiku", "sonnet". Falls back to Sonnet
/// pricing for unknown models so cost tracking never silently drops records.
pub fn get_pricing(model: &str) -> ModelPricing {
    let lower = model.to_lowercase();

    if lower.contains("opus") {
        ModelPricing {
            input_per_mtok: 15.0,
            output_per_mtok: 75.0,
            cache_read_per_mtok: 1.50,
            cache_write_per_mtok: 18.75,
        }
    } else if lower.contains("haiku") {
        ModelPricing {
            input_per_mtok: 0.80,
            output_per_mtok: 4.0,
            cache_read_per_mtok: 0.08,
            cache_write_per_mtok: 1.0,
        }
    } else {
        // Default to Sonnet pricing (including unknown models).
        ModelPricing {
            input_per_mtok: 3.0,
            output_per_mtok: 15.0,
            cache_read_per_mtok: 0.30,
            cache_write_per_mtok: 3.75,
        }
    }
}

/// Round a USD amount to six fractional digits.
pub(crate) fn round_usd(amount: f64) -> f64 {
    (amount * USD_PRECISION).round() / USD_PRECISION
}

/// Calculate the per-category cost breakdown for a token usage.
///
/// Formula per category: `(tokens / 1_000_000) * price_per_million`, rounded
/// to six fractional digits. The savings field compares the cache-read charge
/// against the same tokens at this model's full input rate.
pub fn calculate_cost(usage: &TokenUsage, pricing: &ModelPricing) -> CostBreakdown {
    let input = (usage.input_tokens as f64 / 1_000_000.0) * pricing.input_per_mtok;
    let output = (usage.output_tokens as f64 / 1_000_000.0) * pricing.output_per_mtok;
    let cache_creation =
        (usage.cache_creation_tokens as f64 / 1_000_000.0) * pricing.cache_write_per_mtok;
    let cache_read = (usage.cache_read_tokens as f64 / 1_000_000.0) * pricing.cache_read_per_mtok;

    let full_price_reads = (usage.cache_read_tokens as f64 / 1_000_000.0) * pricing.input_per_mtok;

    CostBreakdown {
        input_cost: round_usd(input),
        output_cost: round_usd(output),
        cache_creation_cost: round_usd(cache_creation),
        cache_read_cost: round_usd(cache_read),
        total_cost: round_usd(input + output + cache_creation + cache_read),
        savings: round_usd(full_price_reads - cache_read),
    }
}
