//! Field-addressable calendar views of a moment in a zone and locale.
//!
//! A [`ZonedCalendar`] is an immutable value: every operation returns a new
//! view. Setting a field is lenient, so out-of-range values carry into the
//! next larger field (day 32 of a 31-day month is the 1st of the next month)
//! instead of being clamped. Adding months or years pins the day of month to
//! the last valid day, the way a wall calendar does.
//!
//! Sub-day additions (hours, minutes, seconds, milliseconds) move the
//! underlying instant, so adding one hour across a DST change moves one real
//! hour. Day-and-larger additions move the wall clock.
//!
//! A view built from an instant remembers it until a wall-clock field is
//! rewritten, so a time inside a repeated (fall-back) hour keeps its own
//! occurrence. Otherwise, local times that do not exist (inside a DST gap)
//! resolve forward by the length of the gap, and local times that occur
//! twice resolve to the earlier instant.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::error::PeriodError;
use crate::locale::CalendarLocale;
use crate::moment::Moment;

/// A calendar field addressable through [`ZonedCalendar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarField {
    Year,
    /// Zero-based: January = 0, December = 11.
    Month,
    /// Week of the week-year under the locale's week rules (1-based).
    WeekOfYear,
    DayOfMonth,
    DayOfYear,
    /// 1 = Sunday ... 7 = Saturday.
    DayOfWeek,
    HourOfDay,
    Minute,
    Second,
    Millisecond,
}

/// A moment decomposed into local fields for one zone and locale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonedCalendar<'a> {
    local: NaiveDateTime,
    exact: Option<DateTime<Tz>>,
    zone: Tz,
    locale: &'a CalendarLocale,
}

impl<'a> ZonedCalendar<'a> {
    pub fn new(moment: Moment, zone: Tz, locale: &'a CalendarLocale) -> Self {
        let zoned = moment.as_utc().with_timezone(&zone);
        ZonedCalendar {
            local: zoned.naive_local(),
            exact: Some(zoned),
            zone,
            locale,
        }
    }

    /// Build a view directly from wall-clock fields.
    pub fn from_local(local: NaiveDateTime, zone: Tz, locale: &'a CalendarLocale) -> Self {
        ZonedCalendar {
            local,
            exact: None,
            zone,
            locale,
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn locale(&self) -> &'a CalendarLocale {
        self.locale
    }

    /// The wall-clock date and time.
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn get(&self, field: CalendarField) -> i32 {
        let l = &self.local;
        match field {
            CalendarField::Year => l.year(),
            CalendarField::Month => l.month0() as i32,
            CalendarField::WeekOfYear => self.locale.week_of_year(l.date()).1 as i32,
            CalendarField::DayOfMonth => l.day() as i32,
            CalendarField::DayOfYear => l.ordinal() as i32,
            CalendarField::DayOfWeek => l.weekday().number_from_sunday() as i32,
            CalendarField::HourOfDay => l.hour() as i32,
            CalendarField::Minute => l.minute() as i32,
            CalendarField::Second => l.second() as i32,
            CalendarField::Millisecond => (l.nanosecond() / 1_000_000) as i32,
        }
    }

    /// Nanoseconds past the whole second.
    pub fn nanosecond(&self) -> u32 {
        self.local.nanosecond()
    }

    /// The largest value `field` can take given the other fields
    /// (e.g. 29 for the day of month in February 2024).
    pub fn actual_maximum(&self, field: CalendarField) -> i32 {
        let date = self.local.date();
        match field {
            CalendarField::Year => NaiveDate::MAX.year(),
            CalendarField::Month => 11,
            CalendarField::WeekOfYear => weeks_in_week_year(self.locale, date),
            CalendarField::DayOfMonth => days_in_month(date.year(), date.month()) as i32,
            CalendarField::DayOfYear => {
                if date.leap_year() {
                    366
                } else {
                    365
                }
            }
            CalendarField::DayOfWeek => 7,
            CalendarField::HourOfDay => 23,
            CalendarField::Minute | CalendarField::Second => 59,
            CalendarField::Millisecond => 999,
        }
    }

    /// Set one field leniently; overflow carries into larger fields.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if the result leaves the
    /// representable date range.
    pub fn with(self, field: CalendarField, value: i32) -> Result<Self, PeriodError> {
        let l = self.local;
        let value = i64::from(value);
        let mut f = Fields::of(&l);
        let local = match field {
            CalendarField::Year => {
                f.year = value;
                f.resolve()
            }
            CalendarField::Month => {
                f.month0 = value;
                f.resolve()
            }
            CalendarField::DayOfMonth => {
                f.day = value;
                f.resolve()
            }
            CalendarField::HourOfDay => {
                f.hour = value;
                f.resolve()
            }
            CalendarField::Minute => {
                f.minute = value;
                f.resolve()
            }
            CalendarField::Second => {
                f.second = value;
                f.resolve()
            }
            CalendarField::Millisecond => {
                f.nanos = value * 1_000_000 + i64::from(l.nanosecond() % 1_000_000);
                f.resolve()
            }
            CalendarField::DayOfYear => NaiveDate::from_ymd_opt(l.year(), 1, 1)
                .and_then(|jan1| jan1.checked_add_signed(Duration::days(value - 1)))
                .map(|d| d.and_time(l.time())),
            CalendarField::DayOfWeek => {
                let week_start = self.locale.week_start_of(l.date());
                let extra_weeks = (value - 1).div_euclid(7);
                let target = weekday_from_sunday((value - 1).rem_euclid(7));
                let offset = self.locale.first_day_of_week().days_from_start(target);
                week_start
                    .checked_add_signed(Duration::days(offset + extra_weeks * 7))
                    .map(|d| d.and_time(l.time()))
            }
            CalendarField::WeekOfYear => {
                let current = i64::from(self.get(CalendarField::WeekOfYear));
                l.checked_add_signed(Duration::weeks(value - current))
            }
        };
        self.replace(local)
    }

    /// Add a signed amount to a field, carrying into larger fields.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if the result leaves the
    /// representable date range.
    pub fn plus(self, field: CalendarField, delta: i32) -> Result<Self, PeriodError> {
        if delta == 0 {
            return Ok(self);
        }
        let delta = i64::from(delta);
        match field {
            CalendarField::Year => self.replace(add_months(self.local, delta * 12)),
            CalendarField::Month => self.replace(add_months(self.local, delta)),
            CalendarField::WeekOfYear => {
                self.replace(self.local.checked_add_signed(Duration::weeks(delta)))
            }
            CalendarField::DayOfMonth | CalendarField::DayOfYear | CalendarField::DayOfWeek => {
                self.replace(self.local.checked_add_signed(Duration::days(delta)))
            }
            CalendarField::HourOfDay => self.plus_elapsed(Duration::hours(delta)),
            CalendarField::Minute => self.plus_elapsed(Duration::minutes(delta)),
            CalendarField::Second => self.plus_elapsed(Duration::seconds(delta)),
            CalendarField::Millisecond => self.plus_elapsed(Duration::milliseconds(delta)),
        }
    }

    /// Move a field within its own range, wrapping instead of carrying.
    ///
    /// Rolling the month of January 31 forward gives February 29 (or 28) of
    /// the same year; rolling the day of week from Saturday forward gives the
    /// first day of the same locale week.
    pub fn roll(self, field: CalendarField, delta: i32) -> Result<Self, PeriodError> {
        let l = self.local;
        let delta = i64::from(delta);
        let wrap = |current: i64, min: i64, max: i64| -> i64 {
            (current - min + delta).rem_euclid(max - min + 1) + min
        };
        let local = match field {
            CalendarField::Year => add_months(l, delta * 12),
            CalendarField::Month => {
                let month0 = wrap(i64::from(l.month0()), 0, 11) as u32;
                let day = l.day().min(days_in_month(l.year(), month0 + 1));
                NaiveDate::from_ymd_opt(l.year(), month0 + 1, day).map(|d| d.and_time(l.time()))
            }
            CalendarField::WeekOfYear => {
                let (week_year, week) = self.locale.week_of_year(l.date());
                let max = i64::from(weeks_in_week_year(self.locale, l.date()));
                let target = wrap(i64::from(week), 1, max) as u32;
                let offset = self
                    .locale
                    .first_day_of_week()
                    .days_from_start(l.weekday());
                self.locale
                    .date_of_week(week_year, target)
                    .and_then(|d| d.checked_add_signed(Duration::days(offset)))
                    .map(|d| d.and_time(l.time()))
            }
            CalendarField::DayOfMonth => {
                let max = i64::from(days_in_month(l.year(), l.month()));
                l.with_day(wrap(i64::from(l.day()), 1, max) as u32)
            }
            CalendarField::DayOfYear => {
                let max = if l.date().leap_year() { 366 } else { 365 };
                l.with_ordinal(wrap(i64::from(l.ordinal()), 1, max) as u32)
            }
            CalendarField::DayOfWeek => {
                let ws = self.locale.first_day_of_week();
                let current = ws.days_from_start(l.weekday());
                let target = wrap(current, 0, 6);
                l.checked_add_signed(Duration::days(target - current))
            }
            CalendarField::HourOfDay => l.with_hour(wrap(i64::from(l.hour()), 0, 23) as u32),
            CalendarField::Minute => l.with_minute(wrap(i64::from(l.minute()), 0, 59) as u32),
            CalendarField::Second => l.with_second(wrap(i64::from(l.second()), 0, 59) as u32),
            CalendarField::Millisecond => {
                let millis = wrap(i64::from(l.nanosecond() / 1_000_000), 0, 999) as u32;
                l.with_nanosecond(millis * 1_000_000 + l.nanosecond() % 1_000_000)
            }
        };
        self.replace(local)
    }

    /// The first instant of the wall-clock hour containing this view.
    ///
    /// A repeated `HH:00` takes the latest occurrence not after this instant.
    /// An `HH:00` swallowed by a DST gap becomes the first instant after the
    /// gap, so the hour still contains this instant in zones with
    /// half-hour transitions.
    ///
    /// # Errors
    ///
    /// See [`ZonedCalendar::to_zoned`].
    pub fn truncate_to_hour(self) -> Result<Self, PeriodError> {
        let instant = self.to_zoned()?;
        let top = self.top_of_hour()?;
        let start = hour_starts(&self.zone, &top)
            .into_iter()
            .filter(|t| *t <= instant)
            .max()
            .ok_or_else(|| out_of_range(&top))?;
        Ok(self.at_instant(start))
    }

    /// The last whole second before the next hour starts.
    ///
    /// The next hour starts at the earliest of the later occurrence of this
    /// view's `HH:00` and the placements of `HH+1:00`.
    ///
    /// # Errors
    ///
    /// See [`ZonedCalendar::to_zoned`].
    pub fn end_of_hour(self) -> Result<Self, PeriodError> {
        let begin = self.to_zoned()?;
        let top = self.top_of_hour()?;
        let next_top = top
            .checked_add_signed(Duration::hours(1))
            .ok_or_else(|| out_of_range(&top))?;
        let next = hour_starts(&self.zone, &top)
            .into_iter()
            .chain(hour_starts(&self.zone, &next_top))
            .filter(|t| *t > begin)
            .min()
            .ok_or_else(|| out_of_range(&next_top))?;
        let end = next
            .checked_sub_signed(Duration::seconds(1))
            .ok_or_else(|| out_of_range(&next_top))?;
        Ok(self.at_instant(end))
    }

    fn top_of_hour(&self) -> Result<NaiveDateTime, PeriodError> {
        self.local
            .date()
            .and_hms_opt(self.local.hour(), 0, 0)
            .ok_or_else(|| out_of_range(&self.local))
    }

    fn at_instant(self, instant: DateTime<Tz>) -> Self {
        ZonedCalendar {
            local: instant.naive_local(),
            exact: Some(instant),
            ..self
        }
    }

    /// Set the time of day, clearing sub-second digits.
    pub fn at_time(self, hour: u32, minute: u32, second: u32) -> Result<Self, PeriodError> {
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            PeriodError::InvalidArgument(format!("time {hour:02}:{minute:02}:{second:02}"))
        })?;
        Ok(ZonedCalendar {
            local: self.local.date().and_time(time),
            exact: None,
            ..self
        })
    }

    /// The instant this view denotes, applying the DST gap/overlap policy.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidDatetime`] if the local time cannot be
    /// placed in the zone.
    pub fn to_zoned(&self) -> Result<DateTime<Tz>, PeriodError> {
        if let Some(exact) = self.exact {
            return Ok(exact);
        }
        resolve_local(&self.zone, &self.local).ok_or_else(|| {
            PeriodError::InvalidDatetime(format!(
                "'{}' cannot be placed in {}",
                self.local, self.zone
            ))
        })
    }

    /// # Errors
    ///
    /// See [`ZonedCalendar::to_zoned`].
    pub fn to_moment(&self) -> Result<Moment, PeriodError> {
        Ok(Moment::from(&self.to_zoned()?))
    }

    fn plus_elapsed(self, elapsed: Duration) -> Result<Self, PeriodError> {
        let instant = self.to_zoned()?;
        let moved = instant
            .checked_add_signed(elapsed)
            .ok_or_else(|| out_of_range(&self.local))?;
        Ok(self.at_instant(moved))
    }

    fn replace(self, local: Option<NaiveDateTime>) -> Result<Self, PeriodError> {
        let local = local.ok_or_else(|| out_of_range(&self.local))?;
        Ok(ZonedCalendar {
            local,
            exact: None,
            ..self
        })
    }
}

/// Add `delta` units of `field` to a moment in the given zone and locale.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDatetime`] if the result is out of range.
pub fn adjust(
    moment: Moment,
    field: CalendarField,
    delta: i32,
    zone: Tz,
    locale: &CalendarLocale,
) -> Result<Moment, PeriodError> {
    ZonedCalendar::new(moment, zone, locale)
        .plus(field, delta)?
        .to_moment()
}

/// Place a wall-clock time in a zone: gaps shift forward, overlaps take the earlier instant.
pub(crate) fn resolve_local(zone: &Tz, local: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            // Inside a gap: apply the offset in force before the transition.
            let day_before = local.checked_sub_signed(Duration::days(1))?;
            let before = zone.offset_from_utc_datetime(&day_before).fix();
            let utc = local
                .checked_sub_signed(Duration::seconds(i64::from(before.local_minus_utc())))?;
            Some(Utc.from_utc_datetime(&utc).with_timezone(zone))
        }
    }
}

/// Every instant a top-of-hour wall time can begin an hour at.
fn hour_starts(zone: &Tz, local: &NaiveDateTime) -> Vec<DateTime<Tz>> {
    match zone.from_local_datetime(local) {
        LocalResult::Single(dt) => vec![dt],
        LocalResult::Ambiguous(earlier, later) => vec![earlier, later],
        LocalResult::None => gap_end(zone, local).into_iter().collect(),
    }
}

/// The transition instant closing the DST gap that swallows `local`.
fn gap_end(zone: &Tz, local: &NaiveDateTime) -> Option<DateTime<Tz>> {
    let offset_near = |days: i64| -> Option<i64> {
        let sample = local.checked_add_signed(Duration::days(days))?;
        Some(i64::from(zone.offset_from_utc_datetime(&sample).fix().local_minus_utc()))
    };
    let (before, after) = (offset_near(-1)?, offset_near(1)?);
    // `lo` reads earlier than `local` on the wall clock, `hi` reads at or past it.
    let mut lo = local.checked_sub_signed(Duration::seconds(after))?;
    let mut hi = local.checked_sub_signed(Duration::seconds(before))?;
    while hi - lo > Duration::seconds(1) {
        let mid = lo + (hi - lo) / 2;
        if Utc.from_utc_datetime(&mid).with_timezone(zone).naive_local() >= *local {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Some(Utc.from_utc_datetime(&hi).with_timezone(zone))
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map_or(31, |last| last.day())
}

fn weeks_in_week_year(locale: &CalendarLocale, date: NaiveDate) -> i32 {
    let (week_year, _) = locale.week_of_year(date);
    match (
        locale.date_of_week(week_year, 1),
        locale.date_of_week(week_year + 1, 1),
    ) {
        (Some(this), Some(next)) => ((next - this).num_days() / 7) as i32,
        _ => 52,
    }
}

fn add_months(local: NaiveDateTime, delta: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(delta.unsigned_abs()).ok()?);
    if delta >= 0 {
        local.checked_add_months(months)
    } else {
        local.checked_sub_months(months)
    }
}

fn weekday_from_sunday(days: i64) -> Weekday {
    match days {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

fn out_of_range(local: &NaiveDateTime) -> PeriodError {
    PeriodError::InvalidDatetime(format!("field arithmetic on '{local}' is out of range"))
}

/// Wall-clock time from one-based month and day fields, carrying overflow
/// (month 13 is January of the next year, second 60 the next minute).
pub(crate) fn lenient_local(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> Option<NaiveDateTime> {
    Fields {
        year: i64::from(year),
        month0: i64::from(month) - 1,
        day: i64::from(day),
        hour: i64::from(hour),
        minute: i64::from(minute),
        second: i64::from(second),
        nanos: 0,
    }
    .resolve()
}

/// Wall-clock fields held wide enough to overflow before normalization.
struct Fields {
    year: i64,
    month0: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    nanos: i64,
}

impl Fields {
    fn of(l: &NaiveDateTime) -> Self {
        Fields {
            year: i64::from(l.year()),
            month0: i64::from(l.month0()),
            day: i64::from(l.day()),
            hour: i64::from(l.hour()),
            minute: i64::from(l.minute()),
            second: i64::from(l.second()),
            nanos: i64::from(l.nanosecond()),
        }
    }

    /// Carry each field into the next larger one.
    fn resolve(&self) -> Option<NaiveDateTime> {
        let carry_secs = self.nanos.div_euclid(1_000_000_000);
        let nanos = self.nanos.rem_euclid(1_000_000_000);
        let secs = self.hour * 3600 + self.minute * 60 + self.second + carry_secs;
        let carry_days = secs.div_euclid(86_400);
        let secs = secs.rem_euclid(86_400);
        let year = self.year + self.month0.div_euclid(12);
        let month = self.month0.rem_euclid(12) as u32 + 1;

        let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
        let date = first.checked_add_signed(Duration::days(self.day - 1 + carry_days))?;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, nanos as u32)?;
        Some(date.and_time(time))
    }
}
