// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window request limiter keyed by client identifier.
//!
//! Each identifier gets a counter and a window-reset instant. The window is
//! fixed, not sliding: a burst at the end of one window followed by another
//! right after the reset is admitted. That imprecision is accepted in exchange
//! for constant-size per-client state.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Admission decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request is admitted.
    pub allowed: bool,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Instant the current window resets.
    pub reset_at: DateTime<Utc>,
}

/// Per-identifier window state. Count never exceeds the configured maximum
/// while the window is live.
#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Fixed-window rate limiter over a concurrent identifier map.
///
/// `check` performs the per-key read-modify-write through the map's entry API,
/// so concurrent requests for the same identifier serialize on that key only.
pub struct RateLimiter {
    entries: DashMap<String, WindowEntry>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window` per identifier.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            entries: DashMap::new(),
            window,
            max_requests,
        }
    }

    /// Create a limiter from plain config values (window in seconds).
    pub fn from_config(window_secs: u64, max_requests: u32) -> Self {
        Self::new(Duration::seconds(window_secs as i64), max_requests)
    }

    /// Check and admit a request for `identifier` at instant `now`.
    ///
    /// A missing or expired entry starts a fresh window with count 1. A full
    /// window rejects without mutating, so repeated rejected calls never
    /// extend the window.
    pub fn check(&self, identifier: &str, now: DateTime<Utc>) -> Decision {
        match self.entries.entry(identifier.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if now > entry.reset_at {
                    *entry = WindowEntry {
                        count: 1,
                        reset_at: now + self.window,
                    };
                    return Decision {
                        allowed: true,
                        remaining: self.max_requests.saturating_sub(1),
                        reset_at: entry.reset_at,
                    };
                }
                if entry.count >= self.max_requests {
                    debug!(identifier, reset_at = %entry.reset_at, "rate limit exceeded");
                    return Decision {
                        allowed: false,
                        remaining: 0,
                        reset_at: entry.reset_at,
                    };
                }
                entry.count += 1;
                Decision {
                    allowed: true,
                    remaining: self.max_requests - entry.count,
                    reset_at: entry.reset_at,
                }
            }
            Entry::Vacant(vacant) => {
                let entry = vacant.insert(WindowEntry {
                    count: 1,
                    reset_at: now + self.window,
                });
                Decision {
                    allowed: true,
                    remaining: self.max_requests.saturating_sub(1),
                    reset_at: entry.reset_at,
                }
            }
        }
    }

    /// Remove entries whose window expired before `now`. Returns the number
    /// of entries removed.
    ///
    /// Only deletes; an expired entry lost to a concurrent `check` is simply
    /// recreated on that identifier's next request. Removals are counted
    /// inside the retain pass: a before/after `len()` difference would be
    /// skewed by inserts landing in already-scanned shards.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = now <= entry.reset_at;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of tracked identifiers.
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }

    /// Spawn a background task that sweeps expired entries every `interval`.
    pub fn spawn_sweeper(self: Arc<Self>, interval: std::time::Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = self.sweep(Utc::now());
                if removed > 0 {
                    debug!(removed, "swept expired rate-limit entries");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(window_secs: i64, max: u32) -> RateLimiter {
        RateLimiter::new(Duration::seconds(window_secs), max)
    }

    #[test]
    fn admits_up_to_max_with_decreasing_remaining() {
        let rl = limiter(3600, 10);
        let now = Utc::now();

        for expected_remaining in (0..10).rev() {
            let decision = rl.check("ip1", now);
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }
    }

    #[test]
    fn rejects_after_max_without_extending_window() {
        let rl = limiter(3600, 3);
        let now = Utc::now();

        for _ in 0..3 {
            assert!(rl.check("ip1", now).allowed);
        }
        let first_reject = rl.check("ip1", now + Duration::seconds(10));
        assert!(!first_reject.allowed);
        assert_eq!(first_reject.remaining, 0);

        // Repeated rejections return the same reset instant.
        let second_reject = rl.check("ip1", now + Duration::seconds(20));
        assert_eq!(second_reject.reset_at, first_reject.reset_at);
        assert_eq!(first_reject.reset_at, now + Duration::seconds(3600));
    }

    #[test]
    fn window_expiry_resets_the_counter() {
        let rl = limiter(60, 2);
        let now = Utc::now();

        assert!(rl.check("ip1", now).allowed);
        assert!(rl.check("ip1", now).allowed);
        assert!(!rl.check("ip1", now).allowed);

        let later = now + Duration::seconds(61);
        let decision = rl.check("ip1", later);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
        assert_eq!(decision.reset_at, later + Duration::seconds(60));
    }

    #[test]
    fn boundary_instant_is_still_inside_the_window() {
        let rl = limiter(60, 1);
        let now = Utc::now();

        assert!(rl.check("ip1", now).allowed);
        // Exactly at reset_at the window has not expired yet.
        assert!(!rl.check("ip1", now + Duration::seconds(60)).allowed);
        assert!(rl.check("ip1", now + Duration::seconds(61)).allowed);
    }

    #[test]
    fn identifiers_are_independent() {
        let rl = limiter(3600, 2);
        let now = Utc::now();

        assert!(rl.check("ip-a", now).allowed);
        assert!(rl.check("ip-a", now).allowed);
        assert!(!rl.check("ip-a", now).allowed);

        let decision = rl.check("ip-b", now);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let rl = limiter(60, 5);
        let now = Utc::now();

        rl.check("old", now);
        rl.check("fresh", now + Duration::seconds(50));
        assert_eq!(rl.tracked(), 2);

        let removed = rl.sweep(now + Duration::seconds(61));
        assert_eq!(removed, 1);
        assert_eq!(rl.tracked(), 1);

        // The surviving entry keeps its count.
        let decision = rl.check("fresh", now + Duration::seconds(62));
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 3);
    }

    #[test]
    fn sweep_on_empty_map_is_a_noop() {
        let rl = limiter(60, 5);
        assert_eq!(rl.sweep(Utc::now()), 0);
    }

    #[test]
    fn sweep_count_is_stable_under_concurrent_inserts() {
        let rl = Arc::new(limiter(60, 5));
        let now = Utc::now();
        for i in 0..50 {
            rl.check(&format!("expired-{i}"), now - Duration::seconds(120));
        }

        // Hammer new identifiers into the map while sweeps run, so inserts
        // land in shards the retain pass has already visited.
        let writer = {
            let rl = rl.clone();
            std::thread::spawn(move || {
                for i in 0..500 {
                    rl.check(&format!("fresh-{i}"), now);
                }
            })
        };
        let mut total_removed = 0;
        for _ in 0..20 {
            total_removed += rl.sweep(now);
        }
        writer.join().unwrap();
        total_removed += rl.sweep(now);

        // Exactly the expired entries are counted, never the fresh inserts.
        assert_eq!(total_removed, 50);
        assert_eq!(rl.tracked(), 500);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_task_evicts_in_background() {
        let rl = Arc::new(limiter(0, 5));
        rl.check("ip1", Utc::now() - Duration::seconds(10));
        assert_eq!(rl.tracked(), 1);

        let handle = rl.clone().spawn_sweeper(std::time::Duration::from_secs(1));
        // Two paused-clock ticks are enough for the first real sweep.
        tokio::time::sleep(std::time::Duration::from_secs(3)).await;
        assert_eq!(rl.tracked(), 0);
        handle.abort();
    }
}
