// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage ledger, pricing, and cost accounting for Buzzlens.
//!
//! This crate provides:
//! - **Usage ledger**: Persistent recording of every LLM API call with full
//!   token breakdown, running totals, and period-filtered stats queries
//! - **Pricing**: Model-specific cost calculation using official Anthropic
//!   pricing, including prompt-cache discounts and savings

pub mod ledger;
pub mod pricing;

pub use ledger::{LedgerState, Period, UsageLedger, UsageRecord, UsageStats};
pub use pricing::{calculate_cost, get_pricing, CostBreakdown, ModelPricing};
