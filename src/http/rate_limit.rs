//! Client-side request throttle
//!
//! Knack allows an application 10 API requests per second and answers
//! anything above that with 429. `RateLimiter` keeps a client under the
//! ceiling by delaying requests locally; it is off unless configured.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// Requests per second Knack accepts for one application
pub const KNACK_REQUESTS_PER_SECOND: u32 = 10;

/// Throttle settings
///
/// ```yaml
/// rate_limit:
///   requests_per_second: 8
///   burst_size: 2   # optional, defaults to requests_per_second
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    /// Requests that may go out back to back before throttling starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst_size: Option<u32>,
}

fn default_requests_per_second() -> u32 {
    KNACK_REQUESTS_PER_SECOND
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::per_second(KNACK_REQUESTS_PER_SECOND)
    }
}

impl RateLimiterConfig {
    /// Allow `requests_per_second`, bursting up to the same number
    pub fn per_second(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            burst_size: None,
        }
    }

    #[must_use]
    pub fn burst(mut self, burst_size: u32) -> Self {
        self.burst_size = Some(burst_size);
        self
    }

    /// Governor quota; zero values clamp to one
    fn quota(&self) -> Quota {
        let rate = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = self
            .burst_size
            .and_then(NonZeroU32::new)
            .unwrap_or(rate);
        Quota::per_second(rate).allow_burst(burst)
    }
}

type DirectLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Token bucket shared by every request of a client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DirectLimiter>,
}

impl RateLimiter {
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(config.quota())),
        }
    }

    /// Wait for a permit
    pub async fn until_ready(&self) {
        if self.limiter.check().is_ok() {
            return;
        }
        debug!("Throttling request to stay under the rate limit");
        self.limiter.until_ready().await;
    }

    /// Take a permit if one is free, without waiting
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}
