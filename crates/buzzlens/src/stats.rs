// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `buzzlens stats` command implementation.
//!
//! Reads the usage ledger and prints aggregate token/cost statistics for the
//! requested period, either as a human-readable summary or as JSON for
//! scripting.

use std::io::IsTerminal;

use buzzlens_config::model::BuzzlensConfig;
use buzzlens_core::BuzzlensError;
use buzzlens_cost::{Period, UsageLedger, UsageStats};

/// How many recent records the human-readable summary lists.
const RECENT_RECORDS: usize = 5;

/// Run the `buzzlens stats` command.
///
/// If `--json` is passed, outputs the full stats object for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_stats(
    config: &BuzzlensConfig,
    period: Period,
    json: bool,
    plain: bool,
) -> Result<(), BuzzlensError> {
    let ledger = UsageLedger::new(config.cost.usage_path());
    let stats = ledger.stats(period).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_summary(&stats, use_color);
    Ok(())
}

/// Print the human-readable stats summary.
fn print_summary(stats: &UsageStats, use_color: bool) {
    println!();
    println!("  buzzlens usage ({})", stats.period);
    println!("  {}", "-".repeat(42));
    println!("    Requests:       {}", stats.total_requests);
    println!(
        "    Tokens:         {} in / {} out ({} total)",
        stats.total_input_tokens, stats.total_output_tokens, stats.total_tokens
    );
    println!(
        "    Cache:          {} written / {} read ({:.2}% hit rate)",
        stats.total_cache_creation_tokens, stats.total_cache_read_tokens, stats.cache_hit_rate
    );

    if use_color {
        use colored::Colorize;
        println!("    Cost:           {}", format_usd(stats.total_cost).yellow());
        println!("    Cache savings:  {}", format_usd(stats.total_savings).green());
    } else {
        println!("    Cost:           {}", format_usd(stats.total_cost));
        println!("    Cache savings:  {}", format_usd(stats.total_savings));
    }

    if !stats.records.is_empty() {
        println!();
        println!("  recent calls");
        println!("  {}", "-".repeat(42));
        for record in stats.records.iter().rev().take(RECENT_RECORDS) {
            println!(
                "    {}  {:<28} {:>8} tok  {}",
                record.created_at.format("%Y-%m-%d %H:%M"),
                record.model,
                u64::from(record.input_tokens) + u64::from(record.output_tokens),
                format_usd(record.total_cost)
            );
        }
    }
    println!();
}

/// Format a USD amount with four fractional digits.
fn format_usd(amount: f64) -> String {
    format!("${amount:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use buzzlens_core::TokenUsage;
    use tempfile::tempdir;

    #[test]
    fn format_usd_rounds_to_four_digits() {
        assert_eq!(format_usd(0.010935), "$0.0109");
        assert_eq!(format_usd(3.0), "$3.0000");
        assert_eq!(format_usd(0.0), "$0.0000");
    }

    #[tokio::test]
    async fn run_stats_works_on_missing_ledger() {
        let dir = tempdir().unwrap();
        let mut config = BuzzlensConfig::default();
        config.cost.data_dir = dir.path().display().to_string();

        run_stats(&config, Period::All, true, true).await.unwrap();
    }

    #[tokio::test]
    async fn run_stats_reads_recorded_usage() {
        let dir = tempdir().unwrap();
        let mut config = BuzzlensConfig::default();
        config.cost.data_dir = dir.path().display().to_string();

        let ledger = UsageLedger::new(config.cost.usage_path());
        ledger
            .record_usage(
                &TokenUsage {
                    input_tokens: 1000,
                    output_tokens: 500,
                    cache_creation_tokens: 0,
                    cache_read_tokens: 0,
                },
                "claude-sonnet-4-5-20250929",
            )
            .await
            .unwrap();

        run_stats(&config, Period::All, false, true).await.unwrap();
        run_stats(&config, Period::Today, true, true).await.unwrap();
    }
}
