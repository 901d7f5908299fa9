//! Process-wide cached timestamp.
//!
//! Formatting the date on every record would dominate the hot path, so the
//! rendered string is cached and refreshed once per flush. Many encoder
//! threads read concurrently; the flush winner briefly takes the write lock.

use std::sync::RwLock;

use chrono::Utc;

/// Wire format of `cf:date` values. The colon-separated date is what
/// downstream consumers parse; do not normalize it.
const DATE_FORMAT: &str = "%Y:%m:%dT%H:%M:%S";

/// Cached wall-clock string shared by every encoder bound to one relay.
#[derive(Debug)]
pub struct WallClock {
    cached: RwLock<String>,
}

impl WallClock {
    /// New clock initialized to the current time.
    pub fn new() -> Self {
        let clock = WallClock {
            cached: RwLock::new(String::new()),
        };
        clock.refresh();
        clock
    }

    /// Re-render the cached timestamp from the current UTC time.
    pub fn refresh(&self) {
        let now = Utc::now().format(DATE_FORMAT).to_string();
        *self.cached.write().unwrap() = now;
    }

    /// Pin the cached timestamp to a fixed string.
    pub fn set(&self, date: &str) {
        *self.cached.write().unwrap() = date.to_string();
    }

    /// Run `f` over the cached timestamp under the read lock.
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.cached.read().unwrap())
    }
}

impl Default for WallClock {
    fn default() -> Self {
        WallClock::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_format() {
        let clock = WallClock::new();
        clock.with(|date| {
            // e.g. 2026:08:07T14:30:22
            assert_eq!(date.len(), 19);
            assert_eq!(&date[4..5], ":");
            assert_eq!(&date[10..11], "T");
        });
    }

    #[test]
    fn test_clock_set_overrides() {
        let clock = WallClock::new();
        clock.set("2026:01:01T00:00:00");
        clock.with(|date| assert_eq!(date, "2026:01:01T00:00:00"));
        clock.refresh();
        clock.with(|date| assert_ne!(date, "2026:01:01T00:00:00"));
    }
}
