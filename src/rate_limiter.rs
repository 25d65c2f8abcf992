//! Sliding-window admission control for outbound API requests.
//!
//! One limiter is built per SDK and shared by reference counting with every
//! component that talks to the network, so unrelated fetches (a catalog load
//! interleaved with a card search) draw from the same budget.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

use crate::config;

/// Admits at most `max_requests` calls to [`throttle`](Self::throttle)
/// within any trailing `time_window`.
///
/// Waiters are admitted in FIFO order: the admission log is guarded by a
/// fair async mutex that a suspended caller keeps while it waits.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    time_window: Duration,
    admissions: Mutex<VecDeque<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(config::DEFAULT_MAX_REQUESTS, config::DEFAULT_TIME_WINDOW)
    }
}

impl RateLimiter {
    /// Create a limiter. A `max_requests` of zero is treated as one.
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            time_window,
            admissions: Mutex::new(VecDeque::with_capacity(max_requests.max(1))),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn time_window(&self) -> Duration {
        self.time_window
    }

    /// Wait until a request may be sent, then record its admission.
    pub async fn throttle(&self) {
        let mut admissions = self.admissions.lock().await;
        loop {
            let now = Instant::now();
            while let Some(&oldest) = admissions.front() {
                if now.duration_since(oldest) >= self.time_window {
                    admissions.pop_front();
                } else {
                    break;
                }
            }

            if admissions.len() < self.max_requests {
                admissions.push_back(now);
                return;
            }

            // The loop guard above guarantees a front entry younger than the window.
            let oldest = admissions[0];
            let wait = self.time_window - now.duration_since(oldest);
            log::debug!("rate limit reached, waiting {:?}", wait);
            sleep(wait).await;
        }
    }

    /// Number of admissions still inside the trailing window.
    pub async fn in_window(&self) -> usize {
        let admissions = self.admissions.lock().await;
        let now = Instant::now();
        admissions
            .iter()
            .filter(|t| now.duration_since(**t) < self.time_window)
            .count()
    }
}
