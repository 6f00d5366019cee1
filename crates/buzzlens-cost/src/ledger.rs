// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent usage ledger for LLM API call accounting.
//!
//! Every completed call is recorded with a full token breakdown and per-category
//! USD cost. The ledger keeps running totals alongside the record sequence and
//! answers period-filtered aggregate queries (`all`, `today`, `week`, `month`).
//!
//! The persisted representation is a single JSON document, read wholesale on
//! first access and rewritten wholesale after every append. Append and query
//! both run inside one mutex so a load-mutate-persist cycle is never interleaved
//! with another writer. A missing or unreadable file yields an empty ledger,
//! never an error.

use std::path::{Path, PathBuf};

use buzzlens_core::{BuzzlensError, TokenUsage};
use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::pricing::{calculate_cost, get_pricing, round_usd};

/// Time window selector for stats queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// No time filter.
    All,
    /// Records since local midnight of the current day.
    Today,
    /// Records within the last 7 days.
    Week,
    /// Records within the last 30 days.
    Month,
}

impl Period {
    /// Earliest timestamp included by this period, or `None` for no filter.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::All => None,
            Period::Today => {
                let midnight = now
                    .with_timezone(&Local)
                    .date_naive()
                    .and_hms_opt(0, 0, 0)
                    .and_then(|t| t.and_local_timezone(Local).earliest())
                    .map(|dt| dt.with_timezone(&Utc))
                    // Local midnight skipped by a DST transition: use a 24h window.
                    .unwrap_or_else(|| now - Duration::hours(24));
                Some(midnight)
            }
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => Some(now - Duration::days(30)),
        }
    }
}

/// A single usage record representing one LLM API call.
///
/// Immutable once created; cost fields are rounded to six fractional digits
/// at creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Unique record identifier (UUID v4).
    pub id: String,
    /// Record creation instant.
    pub created_at: DateTime<Utc>,
    /// Model identifier used (e.g., "claude-sonnet-4-5-20250929").
    pub model: String,
    /// Number of input tokens.
    pub input_tokens: u32,
    /// Number of output tokens.
    pub output_tokens: u32,
    /// Number of cache-creation tokens.
    #[serde(default)]
    pub cache_creation_tokens: u32,
    /// Number of cache-read tokens.
    #[serde(default)]
    pub cache_read_tokens: u32,
    /// Cost of the input tokens in USD.
    pub input_cost: f64,
    /// Cost of the output tokens in USD.
    pub output_cost: f64,
    /// Cost of the cache-creation tokens in USD.
    #[serde(default)]
    pub cache_creation_cost: f64,
    /// Cost of the cache-read tokens in USD.
    #[serde(default)]
    pub cache_read_cost: f64,
    /// Sum of the four cost categories in USD.
    pub total_cost: f64,
    /// Cache savings versus full input price, at this record's model rate.
    #[serde(default)]
    pub savings: f64,
}

/// The full persisted ledger: record sequence plus running totals.
///
/// Invariant: the totals always equal the componentwise fold of `records`.
/// Every field defaults so older or partially written files still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub total_input_tokens: u64,
    #[serde(default)]
    pub total_output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_cache_creation_tokens: u64,
    #[serde(default)]
    pub total_cache_read_tokens: u64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_savings: f64,
    /// Percentage of cache tokens served from cache, 0 when no cache traffic.
    #[serde(default)]
    pub cache_hit_rate: f64,
    #[serde(default)]
    pub records: Vec<UsageRecord>,
}

impl LedgerState {
    /// Append a record and increment every running total in one step.
    fn apply(&mut self, record: UsageRecord) {
        self.total_requests += 1;
        self.total_input_tokens += u64::from(record.input_tokens);
        self.total_output_tokens += u64::from(record.output_tokens);
        self.total_tokens +=
            u64::from(record.input_tokens) + u64::from(record.output_tokens);
        self.total_cache_creation_tokens += u64::from(record.cache_creation_tokens);
        self.total_cache_read_tokens += u64::from(record.cache_read_tokens);
        self.total_cost = round_usd(self.total_cost + record.total_cost);
        self.total_savings = round_usd(self.total_savings + record.savings);
        self.cache_hit_rate = cache_hit_rate(
            self.total_cache_creation_tokens,
            self.total_cache_read_tokens,
        );
        self.records.push(record);
    }
}

/// Aggregated stats over a period, plus the matching records in
/// chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct UsageStats {
    pub period: Period,
    pub total_requests: u64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_tokens: u64,
    pub total_cache_creation_tokens: u64,
    pub total_cache_read_tokens: u64,
    pub total_cost: f64,
    pub total_savings: f64,
    pub cache_hit_rate: f64,
    pub records: Vec<UsageRecord>,
}

/// Percentage of cache tokens that were reads rather than writes.
fn cache_hit_rate(creation_tokens: u64, read_tokens: u64) -> f64 {
    let total = creation_tokens + read_tokens;
    if total == 0 {
        return 0.0;
    }
    (read_tokens as f64 / total as f64) * 100.0
}

/// Persistent usage ledger backed by a single JSON file.
///
/// State is loaded lazily on first access and held in memory afterwards;
/// every append rewrites the file synchronously before returning.
pub struct UsageLedger {
    path: PathBuf,
    state: Mutex<Option<LedgerState>>,
}

impl UsageLedger {
    /// Create a ledger over the given usage file path. No I/O happens until
    /// the first append or query.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(None),
        }
    }

    /// Path of the persisted usage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one API call's token usage, timestamped now.
    ///
    /// Looks up the model's pricing (unknown models fall back to the default
    /// row), derives the per-category cost breakdown, appends the record,
    /// updates the running totals, and rewrites the usage file before
    /// returning. A write failure surfaces as an error; the in-memory append
    /// stands regardless, so the next successful append persists both.
    pub async fn record_usage(
        &self,
        usage: &TokenUsage,
        model: &str,
    ) -> Result<UsageRecord, BuzzlensError> {
        self.record_usage_at(usage, model, Utc::now()).await
    }

    /// Record one API call's token usage with an explicit timestamp.
    pub async fn record_usage_at(
        &self,
        usage: &TokenUsage,
        model: &str,
        now: DateTime<Utc>,
    ) -> Result<UsageRecord, BuzzlensError> {
        let pricing = get_pricing(model);
        let costs = calculate_cost(usage, &pricing);

        let record = UsageRecord {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            model: model.to_string(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            cache_creation_tokens: usage.cache_creation_tokens,
            cache_read_tokens: usage.cache_read_tokens,
            input_cost: costs.input_cost,
            output_cost: costs.output_cost,
            cache_creation_cost: costs.cache_creation_cost,
            cache_read_cost: costs.cache_read_cost,
            total_cost: costs.total_cost,
            savings: costs.savings,
        };

        let mut guard = self.state.lock().await;
        if guard.is_none() {
            *guard = Some(load_from_disk(&self.path).await);
        }
        let state = guard.get_or_insert_with(LedgerState::default);

        state.apply(record.clone());
        persist(&self.path, state).await?;

        info!(
            model = %record.model,
            input_tokens = record.input_tokens,
            output_tokens = record.output_tokens,
            cache_read_tokens = record.cache_read_tokens,
            total_cost = record.total_cost,
            "usage recorded"
        );

        Ok(record)
    }

    /// Aggregate stats over the given period, as of now.
    ///
    /// Recomputes every aggregate from the filtered record set rather than
    /// reading the running totals, so mid-history periods are exact. O(n)
    /// in the number of records per query.
    pub async fn stats(&self, period: Period) -> Result<UsageStats, BuzzlensError> {
        self.stats_at(period, Utc::now()).await
    }

    /// Aggregate stats over the given period with an explicit "now".
    pub async fn stats_at(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<UsageStats, BuzzlensError> {
        let mut guard = self.state.lock().await;
        if guard.is_none() {
            *guard = Some(load_from_disk(&self.path).await);
        }
        let state = guard.get_or_insert_with(LedgerState::default);

        let cutoff = period.cutoff(now);
        let records: Vec<UsageRecord> = state
            .records
            .iter()
            .filter(|r| cutoff.is_none_or(|c| r.created_at >= c))
            .cloned()
            .collect();

        let mut stats = UsageStats {
            period,
            total_requests: records.len() as u64,
            total_input_tokens: 0,
            total_output_tokens: 0,
            total_tokens: 0,
            total_cache_creation_tokens: 0,
            total_cache_read_tokens: 0,
            total_cost: 0.0,
            total_savings: 0.0,
            cache_hit_rate: 0.0,
            records,
        };
        for r in &stats.records {
            stats.total_input_tokens += u64::from(r.input_tokens);
            stats.total_output_tokens += u64::from(r.output_tokens);
            stats.total_cache_creation_tokens += u64::from(r.cache_creation_tokens);
            stats.total_cache_read_tokens += u64::from(r.cache_read_tokens);
            stats.total_cost += r.total_cost;
            stats.total_savings += r.savings;
        }
        stats.total_tokens = stats.total_input_tokens + stats.total_output_tokens;
        stats.total_cost = round_usd(stats.total_cost);
        stats.total_savings = round_usd(stats.total_savings);
        stats.cache_hit_rate = (cache_hit_rate(
            stats.total_cache_creation_tokens,
            stats.total_cache_read_tokens,
        ) * 100.0)
            .round()
            / 100.0;

        Ok(stats)
    }
}

/// Read the persisted ledger, degrading to an empty state on any failure.
async fn load_from_disk(path: &Path) -> LedgerState {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LedgerState::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read usage file, starting empty");
            return LedgerState::default();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(state) => state,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt usage file, starting empty");
            LedgerState::default()
        }
    }
}

/// Rewrite the usage file with the full ledger state.
async fn persist(path: &Path, state: &LedgerState) -> Result<(), BuzzlensError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BuzzlensError::Persistence { source: Box::new(e) })?;
    }
    let json = serde_json::to_vec_pretty(state)
        .map_err(|e| BuzzlensError::Persistence { source: Box::new(e) })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| BuzzlensError::Persistence { source: Box::new(e) })
}
