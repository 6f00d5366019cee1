// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for external capabilities consumed by Buzzlens.

pub mod provider;

pub use provider::CompletionProvider;
