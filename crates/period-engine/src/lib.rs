//! # period-engine
//!
//! Calendar-aware period boundaries and lookback windows for reporting.
//!
//! Given a moment, a time zone and a locale, the engine derives the first and
//! last instant of the hour, day, week, month, quarter, semester or year that
//! contains it, shifted by any number of whole units, and computes "N units
//! ago" reference points. Month lengths, leap years, locale week rules and DST
//! transitions are all handled on local calendar fields.
//!
//! ## Modules
//!
//! - [`granularity`] — the supported unit names and their default lookback counts
//! - [`moment`] — instants with sub-millisecond precision
//! - [`locale`] — week rules and localized weekday/month names
//! - [`calendar`] — immutable field-addressable views of a moment in a zone
//! - [`boundary`] — period begin/end computation and [`Interval`]
//! - [`format`] — period labels (`2024-03`, `2024-2T`, `2024-W11`)
//! - [`lookback`] — reference points N units back
//! - [`zones`] — zone lookup and the cached available-zone list
//! - [`config`](crate::config) — configuration property sources
//! - [`parse`] — permissive `MM/DD/YYYY HH:MM[:SS]` parsing
//! - [`humanize`] — elapsed-time rendering
//! - [`error`] — Error types
//!
//! ```
//! use period_engine::{period_interval, Moment, PeriodOptions};
//!
//! let at: Moment = "2024-02-10T00:00:00Z".parse().unwrap();
//! let month = period_interval("month", at, &PeriodOptions::default()).unwrap();
//! assert_eq!(month.end().to_rfc3339(), "2024-02-29T23:59:59Z");
//! ```

pub mod boundary;
pub mod calendar;
pub mod config;
pub mod error;
pub mod format;
pub mod granularity;
pub mod humanize;
pub mod locale;
pub mod lookback;
pub mod moment;
pub mod parse;
pub mod zones;

pub use boundary::{
    day_end, day_start, hour_end, hour_start, interval, month_end, month_start, options_for,
    period_end, period_interval, period_interval_with_formatter, period_start, quarter_end,
    quarter_start, semester_end, semester_start, week_end, week_number, week_start, year_end,
    year_start, Interval, PeriodOptions,
};
pub use calendar::{adjust, CalendarField, ZonedCalendar};
pub use crate::config::{ConfigSource, EnvConfig, MapConfig, TIME_ZONES_KEY};
pub use error::PeriodError;
pub use format::{formatter_for, PeriodFormatter};
pub use granularity::{
    default_lookback_count, is_supported_granularity, supported_granularities, Granularity,
};
pub use humanize::{
    format_interval, format_interval_between, EnglishUnitLabels, TimeUnit, UnitLabels,
};
pub use locale::{month_names, weekday_names, CalendarLocale, WeekStartDay};
pub use lookback::{lookback, lookback_from};
pub use moment::{interval_days, interval_hours, interval_millis, Moment};
pub use parse::{parse_time, parse_us_date, parse_us_date_time, to_time_string, to_us_date_string};
pub use zones::{
    available_time_zones, available_time_zones_from, host_time_zone, init_available_time_zones,
    time_zone, zone_from_gmt_offset,
};
