// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Viral-potential analysis for Buzzlens.
//!
//! This crate provides:
//! - **Scoring**: the eight-dimension rubric, weighted overall score, rating
//!   bands, and view estimates
//! - **Prompts**: the system prompt instructing JSON-only model output and the
//!   per-article user prompt
//! - **Service**: the request flow (rate-limit admission, model completion,
//!   usage recording) behind the `CompletionProvider` seam

pub mod prompt;
pub mod scoring;
pub mod service;

pub use prompt::{build_user_prompt, ArticleInput, SYSTEM_PROMPT};
pub use scoring::{
    parse_assessment, AnalysisReport, DimensionScores, Improvement, ModelAssessment, Priority,
    Rating, ViewRange,
};
pub use service::AnalysisService;
