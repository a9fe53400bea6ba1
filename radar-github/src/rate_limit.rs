//! Rate limit bookkeeping and request gating
//!
//! The tracker mirrors the quota GitHub reports in `x-ratelimit-*` headers.
//! Before each request the client asks it whether the call is worth making;
//! it never sleeps, it only refuses calls that would certainly be rejected.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::http::{header_get, HttpHeaders};
use crate::{Error, Result};

/// Quota assumed before the first response arrives
pub const DEFAULT_RATE_LIMIT: u64 = 5000;

const HEADER_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_RESET: &str = "x-ratelimit-reset";
const HEADER_LIMIT: &str = "x-ratelimit-limit";

/// Snapshot of the upstream quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    /// Requests left in the current window
    pub remaining: u64,
    /// Window size
    pub limit: u64,
    /// When the window resets
    pub reset_at: DateTime<Utc>,
}

impl RateLimitInfo {
    /// Full quota, resetting an hour from `now`
    pub fn optimistic(now: DateTime<Utc>) -> Self {
        Self {
            remaining: DEFAULT_RATE_LIMIT,
            limit: DEFAULT_RATE_LIMIT,
            reset_at: now + ChronoDuration::hours(1),
        }
    }
}

/// Shared, mutable view of the upstream quota
#[derive(Debug)]
pub struct RateLimitTracker {
    state: Mutex<RateLimitInfo>,
}

impl Default for RateLimitTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitTracker {
    /// Start with an optimistic full quota
    pub fn new() -> Self {
        Self::with_state(RateLimitInfo::optimistic(Utc::now()))
    }

    /// Start from a known state
    pub fn with_state(info: RateLimitInfo) -> Self {
        Self {
            state: Mutex::new(info),
        }
    }

    /// Current quota
    pub fn snapshot(&self) -> RateLimitInfo {
        *self.lock()
    }

    /// Refuse a request when the quota is spent and the window is still open
    ///
    /// A reset time in the past means the snapshot is stale, so the request
    /// is allowed and its response refreshes the tracker.
    pub fn check(&self) -> Result<()> {
        self.check_at(Utc::now())
    }

    pub(crate) fn check_at(&self, now: DateTime<Utc>) -> Result<()> {
        let info = self.snapshot();
        if info.remaining > 0 || info.reset_at <= now {
            return Ok(());
        }

        let wait = (info.reset_at - now).to_std().unwrap_or_default();
        warn!(
            reset_at = %info.reset_at,
            wait_secs = wait.as_secs(),
            "Rate limit exhausted, refusing request"
        );
        Err(Error::RateLimited {
            wait,
            reset_at: info.reset_at,
        })
    }

    /// Fold rate limit headers into the state
    ///
    /// Each header is applied on its own; missing or malformed ones leave the
    /// previous value in place.
    pub fn update_from_headers(&self, headers: &HttpHeaders) {
        let remaining = parse_header::<u64>(headers, HEADER_REMAINING);
        let limit = parse_header::<u64>(headers, HEADER_LIMIT);
        let reset_at = parse_header::<i64>(headers, HEADER_RESET)
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        if remaining.is_none() && limit.is_none() && reset_at.is_none() {
            return;
        }

        let mut state = self.lock();
        if let Some(remaining) = remaining {
            state.remaining = remaining;
        }
        if let Some(limit) = limit {
            state.limit = limit;
        }
        if let Some(reset_at) = reset_at {
            state.reset_at = reset_at;
        }
        trace!(
            remaining = state.remaining,
            limit = state.limit,
            reset_at = %state.reset_at,
            "Updated rate limit"
        );
    }

    fn lock(&self) -> MutexGuard<'_, RateLimitInfo> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_header<T: std::str::FromStr>(headers: &HttpHeaders, name: &str) -> Option<T> {
    header_get(headers, name).and_then(|v| v.trim().parse().ok())
}
