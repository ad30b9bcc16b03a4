//! Instants in time with sub-millisecond precision.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::error::PeriodError;

/// An instant: epoch milliseconds plus a sub-millisecond nanosecond remainder.
///
/// A `Moment` carries no zone or locale; those are supplied whenever it is
/// decomposed into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Moment(DateTime<Utc>);

impl Moment {
    /// The current instant from the system clock.
    pub fn now() -> Self {
        Moment(Utc::now())
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Moment(dt)
    }

    /// Build from epoch milliseconds (negative values are before 1970).
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if the value is out of range.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, PeriodError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Moment)
            .ok_or_else(|| PeriodError::InvalidDatetime(format!("epoch millis {millis}")))
    }

    /// Replace the sub-millisecond remainder (`0..1_000_000` nanoseconds).
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidArgument`] if `nanos` is not below one millisecond.
    pub fn with_sub_millis(self, nanos: u32) -> Result<Self, PeriodError> {
        if nanos >= 1_000_000 {
            return Err(PeriodError::InvalidArgument(format!(
                "sub-millisecond remainder {nanos} must be below 1000000"
            )));
        }
        let millis_part = self.0.timestamp_subsec_millis() * 1_000_000;
        self.0
            .with_nanosecond(millis_part + nanos)
            .map(Moment)
            .ok_or_else(|| PeriodError::InvalidArgument(format!("nanoseconds {nanos}")))
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Nanoseconds past the whole second.
    pub fn subsec_nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }

    /// Nanoseconds past the whole millisecond.
    pub fn sub_millis_nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos() % 1_000_000
    }

    /// The same instant with every sub-second digit cleared.
    pub fn truncate_to_second(self) -> Self {
        Moment(self.0.with_nanosecond(0).unwrap_or(self.0))
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl From<DateTime<Utc>> for Moment {
    fn from(dt: DateTime<Utc>) -> Self {
        Moment(dt)
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for Moment {
    fn from(dt: &DateTime<Tz>) -> Self {
        Moment(dt.with_timezone(&Utc))
    }
}

impl FromStr for Moment {
    type Err = PeriodError;

    /// Parse an RFC 3339 datetime string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Moment(dt.with_timezone(&Utc)))
            .map_err(|e| PeriodError::InvalidDatetime(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Whole milliseconds from `from` to `thru` (negative if `thru` is earlier).
pub fn interval_millis(from: &Moment, thru: &Moment) -> i64 {
    (thru.0 - from.0).num_milliseconds()
}

/// Whole days from `from` to `thru`, truncated toward zero.
pub fn interval_days(from: &Moment, thru: &Moment) -> i64 {
    interval_millis(from, thru) / 86_400_000
}

/// Whole hours from `from` to `thru`, truncated toward zero.
pub fn interval_hours(from: &Moment, thru: &Moment) -> i64 {
    interval_millis(from, thru) / 3_600_000
}
