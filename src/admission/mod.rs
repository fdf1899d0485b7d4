//! Per-client admission check with a sliding-window rate limit.
//!
//! The call-history store is an explicitly owned concurrent map injected into
//! the handlers through `AppState`, so every worker sees the same histories
//! without a process-wide singleton. Each `allow` call holds the shard entry
//! for the whole read-prune-append sequence.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Sliding-window rate limiter keyed by client identifier.
pub struct RateLimiter {
    /// Client id -> ordered call timestamps within (roughly) the last window
    history: DashMap<String, Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            history: DashMap::new(),
            limit,
            window,
        }
    }

    /// Check and record a call from `client_id`.
    ///
    /// Timestamps older than the window are dropped first. If fewer than
    /// `limit` calls remain, the current instant is appended and the call is
    /// admitted. A rejected call is not recorded. The first-ever call from a
    /// client always succeeds.
    pub fn allow(&self, client_id: &str) -> bool {
        self.allow_at(client_id, Instant::now())
    }

    /// Admission check against an explicit clock, used by tests to move time.
    fn allow_at(&self, client_id: &str, now: Instant) -> bool {
        let mut entry = self.history.entry(client_id.to_string()).or_default();
        let window = self.window;
        entry.retain(|t| now.duration_since(*t) < window);

        if entry.len() < self.limit {
            entry.push(now);
            true
        } else {
            false
        }
    }

    /// Remove clients whose entire history has aged out of the window.
    ///
    /// Keeps the table bounded under sustained traffic from many distinct
    /// clients. Returns the number of clients removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let window = self.window;
        // Tally inside the closure: comparing map lengths around the retain
        // is racy, inserts from other workers land mid-sweep.
        let mut removed = 0;
        self.history.retain(|_, stamps| {
            let keep = stamps.iter().any(|t| now.duration_since(*t) < window);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of clients currently tracked.
    pub fn client_count(&self) -> usize {
        self.history.len()
    }
}

/// Spawn the background sweep task.
///
/// Runs `sweep` every `interval` until the token is cancelled, mirroring the
/// server's other long-lived tasks. Without it the history table grows
/// without bound, one entry per distinct client ever seen.
pub fn start_sweeper(
    limiter: Arc<RateLimiter>,
    interval: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = limiter.sweep();
                    if removed > 0 {
                        tracing::debug!(removed, remaining = limiter.client_count(), "Swept idle clients");
                    }
                }
                _ = cancel.cancelled() => {
                    tracing::debug!("Rate limiter sweeper stopped");
                    break;
                }
            }
        }
    })
}
