//! Cache freshness policy

use chrono::{DateTime, Duration, Utc};

/// Decides whether a snapshot fetched at `last_fetch` must be refetched at
/// `now`. A missing fetch time is always stale.
pub trait FreshnessPolicy: Send + Sync {
    /// Is the snapshot stale
    fn is_stale(&self, last_fetch: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool;
}

/// Stale once a snapshot is at least `max_age` old
#[derive(Debug, Clone, Copy)]
pub struct MaxAgePolicy {
    max_age: Duration,
}

impl MaxAgePolicy {
    /// Policy with an explicit maximum age
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    /// Policy with a maximum age in hours
    pub fn hours(hours: i64) -> Self {
        Self::new(Duration::hours(hours))
    }

    /// Maximum age
    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl Default for MaxAgePolicy {
    fn default() -> Self {
        Self::hours(24)
    }
}

impl FreshnessPolicy for MaxAgePolicy {
    fn is_stale(&self, last_fetch: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_fetch {
            Some(fetched_at) => now - fetched_at >= self.max_age,
            None => true,
        }
    }
}
