//! Lookback reference points: "N units before" a moment.
//!
//! A count of 1 means the current unit (no offset). A missing count, or one
//! below 1, falls back to the granularity's default, which is then applied as
//! the offset itself. Hour and day lookbacks move the exact instant; week and
//! larger lookbacks also snap back to the first day of the resulting unit,
//! keeping the time of day.

use crate::boundary::PeriodOptions;
use crate::calendar::{CalendarField, ZonedCalendar};
use crate::error::PeriodError;
use crate::granularity::Granularity;
use crate::moment::Moment;

/// Moment `count - 1` units of `granularity` before `reference` (default: now).
///
/// When `count` is `None` or below 1 the granularity's default count is used
/// as the offset itself, not reduced by one: `lookback("month", None, ..)`
/// lands 12 months back, the same as `Some(13)`.
///
/// `options.shift` and the offsets are ignored; only the zone and locale apply.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidGranularity`] for an unknown granularity name,
/// or [`PeriodError::InvalidDatetime`] if the result is out of range.
///
/// # Examples
///
/// ```
/// use period_engine::{lookback, Moment, PeriodOptions};
///
/// let at: Moment = "2024-03-15T13:45:30Z".parse().unwrap();
/// let m = lookback("month", Some(3), Some(at), &PeriodOptions::default()).unwrap();
/// assert_eq!(m.to_rfc3339(), "2024-01-01T13:45:30Z");
/// ```
pub fn lookback(
    granularity: &str,
    count: Option<i32>,
    reference: Option<Moment>,
    options: &PeriodOptions,
) -> Result<Moment, PeriodError> {
    lookback_from(granularity.parse()?, count, reference, options)
}

/// Typed form of [`lookback`].
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDatetime`] if the result is out of range.
pub fn lookback_from(
    granularity: Granularity,
    count: Option<i32>,
    reference: Option<Moment>,
    options: &PeriodOptions,
) -> Result<Moment, PeriodError> {
    let offset = effective_offset(granularity, count);
    let reference = reference.unwrap_or_else(Moment::now);
    let cal = ZonedCalendar::new(reference, options.timezone, &options.locale);

    let moved = match granularity {
        Granularity::Hour => {
            let hour = cal.get(CalendarField::HourOfDay);
            cal.with(CalendarField::HourOfDay, back(hour, offset)?)?
        }
        Granularity::Day => {
            let day = cal.get(CalendarField::DayOfYear);
            cal.with(CalendarField::DayOfYear, back(day, offset)?)?
        }
        Granularity::Week => {
            let first = options.locale.first_day_of_week().weekday();
            let start = cal.with(CalendarField::DayOfWeek, first.number_from_sunday() as i32)?;
            let week = start.get(CalendarField::WeekOfYear);
            start.with(CalendarField::WeekOfYear, back(week, offset)?)?
        }
        Granularity::Month | Granularity::Quarter | Granularity::Semester => {
            let span = granularity.months_spanned().unwrap_or(1) as i32;
            let months = offset.checked_mul(span).ok_or_else(|| overflow(granularity, offset))?;
            let first = cal.with(CalendarField::DayOfMonth, 1)?;
            let month = first.get(CalendarField::Month);
            first.with(CalendarField::Month, back(month, months)?)?
        }
        Granularity::Year => {
            let jan1 = cal.with(CalendarField::DayOfYear, 1)?;
            let year = jan1.get(CalendarField::Year);
            jan1.with(CalendarField::Year, back(year, offset)?)?
        }
    };
    tracing::trace!(%granularity, offset, %reference, "lookback");
    moved.to_moment()
}

/// Units subtracted for a requested count.
fn effective_offset(granularity: Granularity, count: Option<i32>) -> i32 {
    match count {
        Some(c) if c >= 1 => c - 1,
        _ => granularity.default_lookback_count() as i32,
    }
}

fn back(value: i32, offset: i32) -> Result<i32, PeriodError> {
    value
        .checked_sub(offset)
        .ok_or_else(|| PeriodError::InvalidArgument(format!("lookback of {offset} overflows")))
}

fn overflow(granularity: Granularity, offset: i32) -> PeriodError {
    PeriodError::InvalidArgument(format!("lookback of {offset} {granularity}s overflows"))
}
