//! Live countdown derived from a token expiration deadline.
//!
//! The deadline arrives as an RFC 3339 string. A string that does not
//! parse, or a deadline already in the past, resolves to the expired
//! state; malformed time input is never an error here.

use std::time::Instant;

use chrono::{DateTime, Utc};

use cv_base::ticker::Ticker;

/// Decomposed time until the deadline. All fields are zero exactly when
/// `is_expired` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub is_expired: bool,
}

impl TimeRemaining {
    pub fn expired() -> Self {
        Self { days: 0, hours: 0, minutes: 0, seconds: 0, is_expired: true }
    }

    /// Compute the countdown at `now`. Unparseable deadlines and
    /// non-positive remainders both resolve to `expired`.
    pub fn until(expires_at: &str, now: DateTime<Utc>) -> Self {
        let Ok(deadline) = DateTime::parse_from_rfc3339(expires_at) else {
            return Self::expired();
        };
        let remaining = deadline.with_timezone(&Utc) - now;
        let total_secs = remaining.num_seconds();
        if total_secs <= 0 {
            return Self::expired();
        }
        let total_secs = total_secs as u64;
        Self {
            days: total_secs / 86_400,
            hours: (total_secs % 86_400) / 3_600,
            minutes: (total_secs % 3_600) / 60,
            seconds: total_secs % 60,
            is_expired: false,
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.days * 1_440 + self.hours * 60 + self.minutes
    }
}

/// Coarse classification of remaining lifetime, used for urgency styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityTier {
    Expired,
    /// Under 30 minutes left
    ExpiringSoon,
    /// At least 30 but under 60 minutes left
    ValidLow,
    /// An hour or more left
    Valid,
}

impl ValidityTier {
    /// Boundary values belong to the higher tier: exactly 30 minutes is
    /// `ValidLow`, exactly 60 is `Valid`.
    pub fn classify(remaining: &TimeRemaining) -> Self {
        if remaining.is_expired {
            return Self::Expired;
        }
        let total_minutes = remaining.total_minutes();
        if total_minutes < 30 {
            Self::ExpiringSoon
        } else if total_minutes < 60 {
            Self::ValidLow
        } else {
            Self::Valid
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring soon",
            Self::ValidLow => "valid (low)",
            Self::Valid => "valid",
        }
    }
}

/// Owns the one-second countdown tick for a displayed token.
///
/// Acquired when a result carrying a token is shown and released when the
/// inspector is torn down. Independent of the progress sampler: the two
/// tickers share nothing.
pub struct TokenClock {
    expires_at: String,
    ticker: Ticker,
    last: TimeRemaining,
}

impl TokenClock {
    pub fn start(expires_at: &str, now: Instant, wall_now: DateTime<Utc>) -> Self {
        let mut ticker = Ticker::one_second();
        ticker.start(now);
        Self {
            expires_at: expires_at.to_string(),
            ticker,
            last: TimeRemaining::until(expires_at, wall_now),
        }
    }

    /// Fires at most once per second. Returns true when the countdown was
    /// recomputed.
    pub fn poll(&mut self, now: Instant, wall_now: DateTime<Utc>) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.last = TimeRemaining::until(&self.expires_at, wall_now);
        true
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    pub fn remaining(&self) -> &TimeRemaining {
        &self.last
    }

    pub fn tier(&self) -> ValidityTier {
        ValidityTier::classify(&self.last)
    }
}
