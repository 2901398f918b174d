//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting fixed clocks
//! in tests while using the real system clock in production, plus the
//! timestamp format shared by outbound payloads and gateway responses.

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use chat_relay::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as an RFC 3339 timestamp.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SystemTime);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

/// Formats a time as RFC 3339 in UTC with millisecond precision.
///
/// ```
/// use chat_relay::time::format_timestamp;
/// use std::time::{Duration, SystemTime};
///
/// let t = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
/// assert_eq!(format_timestamp(t), "2023-11-14T22:13:20.123Z");
/// ```
#[must_use]
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}
