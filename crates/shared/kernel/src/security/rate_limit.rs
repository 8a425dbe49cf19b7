use moka::sync::Cache;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Upper bound on tracked client addresses.
const MAX_TRACKED_CLIENTS: u64 = 100_000;

/// Outcome of a single [`RateLimiter::check`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request fits the window; `remaining` requests are left in it.
    Allowed { remaining: u32 },
    /// The window is exhausted for this client.
    Limited,
}

impl RateDecision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Fixed-window request counter keyed by client address.
///
/// A window opens on the first request of a client and lasts `window`; every call to
/// [`check`](Self::check) counts, including rejected ones. Entries expire with the window,
/// so a client is tracked only while it has an open window.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    counters: Cache<IpAddr, Arc<AtomicU32>>,
}

impl RateLimiter {
    /// `max_requests` below 1 is raised to 1.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let counters =
            Cache::builder().max_capacity(MAX_TRACKED_CLIENTS).time_to_live(window).build();

        Self { max_requests: max_requests.max(1), window, counters }
    }

    /// Counts a request from `client` and reports whether it may proceed.
    pub fn check(&self, client: IpAddr) -> RateDecision {
        let counter = self.counters.get_with(client, || Arc::new(AtomicU32::new(0)));
        let seen = counter.fetch_add(1, Ordering::AcqRel).saturating_add(1);

        if seen > self.max_requests {
            RateDecision::Limited
        } else {
            RateDecision::Allowed { remaining: self.max_requests - seen }
        }
    }

    #[must_use]
    pub const fn max_requests(&self) -> u32 {
        self.max_requests
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .field("tracked", &self.counters.entry_count())
            .finish()
    }
}
