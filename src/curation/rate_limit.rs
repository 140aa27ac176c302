//! Per-user sliding-window rate limiter

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Allows `max_requests` per `window` for each key
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a request for `key`, or return how long until one is allowed
    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let entry = hits.entry(key.to_string()).or_default();

        while let Some(&oldest) = entry.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                entry.pop_front();
            } else {
                break;
            }
        }

        if entry.len() >= self.max_requests {
            let retry_after = match entry.front() {
                Some(&oldest) => self.window - now.saturating_duration_since(oldest),
                None => self.window,
            };
            return Err(retry_after);
        }

        entry.push_back(now);
        Ok(())
    }

    /// Forget keys with no hits inside the window
    pub fn prune(&self) {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        hits.retain(|_, entries| {
            entries
                .back()
                .map(|&last| now.saturating_duration_since(last) < self.window)
                .unwrap_or(false)
        });
    }
}

/// Whole seconds to wait, rounded up
pub fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs();
    if wait.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}
