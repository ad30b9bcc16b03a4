//! Period boundaries: the first and last instant of an hour, day, week,
//! month, quarter, semester or year, optionally shifted by whole units.
//!
//! Every boundary is computed on wall-clock fields in the caller's zone and
//! locale, then placed back on the timeline. Ends are the last whole second
//! of the unit (`23:59:59` for a day) with sub-second digits cleared, so
//! they survive storage in columns with coarse time precision.
//!
//! A day-end minus day-start is 86 399 seconds except on DST transition
//! days, where it is one hour shorter or longer.

use chrono_tz::Tz;
use serde::Serialize;

use crate::calendar::{CalendarField, ZonedCalendar};
use crate::error::PeriodError;
use crate::format::PeriodFormatter;
use crate::granularity::Granularity;
use crate::locale::CalendarLocale;
use crate::moment::Moment;

// ── Options ─────────────────────────────────────────────────────────────────

/// Per-call settings for boundary, formatter and lookback computations.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodOptions {
    /// Whole units of the granularity to move the boundary by (negative = earlier).
    pub shift: i32,
    /// Extra days added to week, month and year starts.
    pub day_offset: i32,
    /// Extra months added to year starts.
    pub month_offset: i32,
    /// Zone the calendar fields are read in.
    pub timezone: Tz,
    /// Locale supplying the week rules.
    pub locale: CalendarLocale,
}

impl Default for PeriodOptions {
    fn default() -> Self {
        PeriodOptions {
            shift: 0,
            day_offset: 0,
            month_offset: 0,
            timezone: Tz::UTC,
            locale: CalendarLocale::en_us(),
        }
    }
}

impl PeriodOptions {
    /// Options using the host's time zone and locale.
    pub fn host() -> Self {
        PeriodOptions {
            timezone: crate::zones::host_time_zone(),
            locale: CalendarLocale::host(),
            ..Default::default()
        }
    }

    fn view(&self, moment: Moment) -> ZonedCalendar<'_> {
        ZonedCalendar::new(moment, self.timezone, &self.locale)
    }
}

// ── Interval ────────────────────────────────────────────────────────────────

/// The `[begin, end]` instants bounding one unit of a granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    granularity: Granularity,
    begin: Moment,
    end: Moment,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatter: Option<PeriodFormatter>,
}

impl Interval {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// First instant of the unit.
    pub fn begin(&self) -> Moment {
        self.begin
    }

    /// Last whole second of the unit.
    pub fn end(&self) -> Moment {
        self.end
    }

    pub fn formatter(&self) -> Option<&PeriodFormatter> {
        self.formatter.as_ref()
    }

    pub fn with_formatter(self, formatter: PeriodFormatter) -> Self {
        Interval {
            formatter: Some(formatter),
            ..self
        }
    }

    /// Whether `moment` falls inside the unit (ends are inclusive to the second).
    pub fn contains(&self, moment: &Moment) -> bool {
        self.begin <= *moment && moment.truncate_to_second() <= self.end
    }

    /// The begin instant rendered by the attached formatter, if any.
    pub fn label(&self) -> Option<String> {
        self.formatter.as_ref().map(|f| f.format(&self.begin))
    }
}

// ── Interval computation ────────────────────────────────────────────────────

/// Compute the interval of `granularity` containing `reference`, shifted by
/// `options.shift` units.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidGranularity`] for an unknown granularity name,
/// or [`PeriodError::InvalidDatetime`] if the arithmetic leaves the
/// representable range.
///
/// # Examples
///
/// ```
/// use period_engine::{period_interval, Moment, PeriodOptions};
///
/// let at: Moment = "2024-06-10T00:00:00Z".parse().unwrap();
/// let q = period_interval("quarter", at, &PeriodOptions::default()).unwrap();
/// assert_eq!(q.begin().to_rfc3339(), "2024-04-01T00:00:00Z");
/// assert_eq!(q.end().to_rfc3339(), "2024-06-30T23:59:59Z");
/// ```
pub fn period_interval(
    granularity: &str,
    reference: Moment,
    options: &PeriodOptions,
) -> Result<Interval, PeriodError> {
    interval(granularity.parse()?, reference, options)
}

/// Like [`period_interval`], with the period's display formatter attached.
///
/// # Errors
///
/// See [`period_interval`].
pub fn period_interval_with_formatter(
    granularity: &str,
    reference: Moment,
    options: &PeriodOptions,
) -> Result<Interval, PeriodError> {
    let g: Granularity = granularity.parse()?;
    let formatter = PeriodFormatter::new(g, options.timezone, options.locale.clone());
    Ok(interval(g, reference, options)?.with_formatter(formatter))
}

/// Typed form of [`period_interval`].
///
/// # Errors
///
/// Returns [`PeriodError::InvalidDatetime`] if the arithmetic leaves the
/// representable range.
pub fn interval(
    granularity: Granularity,
    reference: Moment,
    options: &PeriodOptions,
) -> Result<Interval, PeriodError> {
    let begin = unit_start(options.view(reference), granularity, options)?;
    let end = unit_end(begin, granularity)?;
    Ok(Interval {
        granularity,
        begin: begin.to_moment()?,
        end: end.to_moment()?,
        formatter: None,
    })
}

/// First instant of the (shifted) unit containing `reference`.
///
/// # Errors
///
/// See [`interval`].
pub fn period_start(
    granularity: Granularity,
    reference: Moment,
    options: &PeriodOptions,
) -> Result<Moment, PeriodError> {
    unit_start(options.view(reference), granularity, options)?.to_moment()
}

/// Last whole second of the (shifted) unit containing `reference`.
///
/// # Errors
///
/// See [`interval`].
pub fn period_end(
    granularity: Granularity,
    reference: Moment,
    options: &PeriodOptions,
) -> Result<Moment, PeriodError> {
    let begin = unit_start(options.view(reference), granularity, options)?;
    unit_end(begin, granularity)?.to_moment()
}

macro_rules! boundary_fns {
    ($($start:ident, $end:ident => $g:expr;)*) => {
        $(
            #[doc = concat!("Shorthand for [`period_start`] at `", stringify!($g), "`.")]
            ///
            /// # Errors
            ///
            /// See [`interval`].
            pub fn $start(reference: Moment, options: &PeriodOptions) -> Result<Moment, PeriodError> {
                period_start($g, reference, options)
            }

            #[doc = concat!("Shorthand for [`period_end`] at `", stringify!($g), "`.")]
            ///
            /// # Errors
            ///
            /// See [`interval`].
            pub fn $end(reference: Moment, options: &PeriodOptions) -> Result<Moment, PeriodError> {
                period_end($g, reference, options)
            }
        )*
    };
}

boundary_fns! {
    hour_start, hour_end => Granularity::Hour;
    day_start, day_end => Granularity::Day;
    week_start, week_end => Granularity::Week;
    month_start, month_end => Granularity::Month;
    quarter_start, quarter_end => Granularity::Quarter;
    semester_start, semester_end => Granularity::Semester;
    year_start, year_end => Granularity::Year;
}

/// Week number of `reference` under the options' locale rules.
pub fn week_number(reference: Moment, options: &PeriodOptions) -> u32 {
    let date = options.view(reference).date();
    options.locale.week_of_year(date).1
}

fn unit_start<'a>(
    cal: ZonedCalendar<'a>,
    granularity: Granularity,
    options: &PeriodOptions,
) -> Result<ZonedCalendar<'a>, PeriodError> {
    let shift = options.shift;
    match granularity {
        Granularity::Hour => cal.plus(CalendarField::HourOfDay, shift)?.truncate_to_hour(),
        Granularity::Day => cal.at_time(0, 0, 0)?.plus(CalendarField::DayOfMonth, shift),
        Granularity::Week => {
            let first = options.locale.first_day_of_week().weekday();
            cal.at_time(0, 0, 0)?
                .plus(CalendarField::DayOfMonth, options.day_offset)?
                .with(CalendarField::DayOfWeek, first.number_from_sunday() as i32)?
                .plus(CalendarField::WeekOfYear, shift)
        }
        Granularity::Month => cal
            .at_time(0, 0, 0)?
            .with(CalendarField::DayOfMonth, 1)?
            .plus(CalendarField::Month, shift)?
            .plus(CalendarField::DayOfMonth, options.day_offset),
        Granularity::Quarter | Granularity::Semester => {
            let span = if granularity == Granularity::Quarter { 3 } else { 6 };
            let month_shift = shift.checked_mul(span).ok_or_else(|| {
                PeriodError::InvalidArgument(format!("shift {shift} {granularity}s overflows"))
            })?;
            let month_start = cal.at_time(0, 0, 0)?.with(CalendarField::DayOfMonth, 1)?;
            let index = month_start.get(CalendarField::Month) / span;
            month_start
                .with(CalendarField::Month, index * span)?
                .plus(CalendarField::Month, month_shift)
        }
        Granularity::Year => cal
            .at_time(0, 0, 0)?
            .with(CalendarField::DayOfMonth, 1)?
            .with(CalendarField::Month, 0)?
            .plus(CalendarField::Year, shift)?
            .plus(CalendarField::Month, options.month_offset)?
            .plus(CalendarField::DayOfMonth, options.day_offset),
    }
}

/// End of the unit that starts at (or contains) `begin`.
fn unit_end(begin: ZonedCalendar<'_>, granularity: Granularity) -> Result<ZonedCalendar<'_>, PeriodError> {
    match granularity {
        Granularity::Hour => begin.end_of_hour(),
        Granularity::Day => begin.at_time(23, 59, 59),
        Granularity::Week => {
            let first = begin.locale().first_day_of_week().weekday();
            begin
                .with(CalendarField::DayOfWeek, first.number_from_sunday() as i32)?
                .plus(CalendarField::DayOfMonth, 6)?
                .at_time(23, 59, 59)
        }
        Granularity::Month => last_day_end(begin),
        Granularity::Quarter => last_day_end(begin.plus(CalendarField::Month, 2)?),
        Granularity::Semester => last_day_end(begin.plus(CalendarField::Month, 5)?),
        Granularity::Year => last_day_end(
            begin
                .with(CalendarField::DayOfMonth, 1)?
                .with(CalendarField::Month, 11)?,
        ),
    }
}

fn last_day_end(cal: ZonedCalendar<'_>) -> Result<ZonedCalendar<'_>, PeriodError> {
    let last = cal.actual_maximum(CalendarField::DayOfMonth);
    cal.with(CalendarField::DayOfMonth, last)?.at_time(23, 59, 59)
}

/// Build options for a zone and locale given by name, used by callers that
/// only hold identifiers.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidTimezone`] or [`PeriodError::InvalidLocale`].
pub fn options_for(shift: i32, timezone: &str, locale: &str) -> Result<PeriodOptions, PeriodError> {
    Ok(PeriodOptions {
        shift,
        timezone: crate::zones::time_zone(timezone)?,
        locale: CalendarLocale::parse(locale)?,
        ..Default::default()
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(s: &str) -> Moment {
        s.parse().unwrap()
    }

    fn utc() -> PeriodOptions {
        PeriodOptions::default()
    }

    #[test]
    fn test_host_options_have_no_offsets() {
        let options = PeriodOptions::host();
        assert_eq!((options.shift, options.day_offset, options.month_offset), (0, 0, 0));
        let day = interval(Granularity::Day, at("2024-03-15T13:45:30Z"), &options).unwrap();
        assert!(day.begin() <= day.end());
    }

    fn shifted(shift: i32) -> PeriodOptions {
        PeriodOptions {
            shift,
            ..Default::default()
        }
    }

    fn iv(g: &str, reference: &str, options: &PeriodOptions) -> (String, String) {
        let i = period_interval(g, at(reference), options).unwrap();
        (i.begin().to_rfc3339(), i.end().to_rfc3339())
    }

    // ── hour / day ──────────────────────────────────────────────────────

    #[test]
    fn test_hour_interval() {
        let (b, e) = iv("hour", "2024-03-15T13:45:30.123Z", &utc());
        assert_eq!(b, "2024-03-15T13:00:00Z");
        assert_eq!(e, "2024-03-15T13:59:59Z");
    }

    #[test]
    fn test_hour_shift_crosses_day() {
        let (b, e) = iv("hour", "2024-03-15T23:10:00Z", &shifted(2));
        assert_eq!(b, "2024-03-16T01:00:00Z");
        assert_eq!(e, "2024-03-16T01:59:59Z");
    }

    #[test]
    fn test_hour_in_repeated_hour() {
        let options = PeriodOptions {
            timezone: Tz::America__New_York,
            shift: 2,
            ..Default::default()
        };
        // 00:30 EDT + 2h lands on the second 01:00 (EST).
        let (b, e) = iv("hour", "2024-11-03T04:30:00Z", &options);
        assert_eq!(b, "2024-11-03T06:00:00Z");
        assert_eq!(e, "2024-11-03T06:59:59Z");
    }

    #[test]
    fn test_hour_contains_reference_across_half_hour_shifts() {
        let options = PeriodOptions {
            timezone: Tz::Australia__Lord_Howe,
            ..Default::default()
        };
        let spring = period_interval("hour", at("2024-10-05T15:45:00Z"), &options).unwrap();
        assert_eq!(spring.begin().to_rfc3339(), "2024-10-05T15:30:00Z");
        assert_eq!(spring.end().to_rfc3339(), "2024-10-05T15:59:59Z");
        assert!(spring.contains(&at("2024-10-05T15:45:00Z")));

        let fall = period_interval("hour", at("2025-04-05T15:15:00Z"), &options).unwrap();
        assert_eq!(fall.begin().to_rfc3339(), "2025-04-05T14:00:00Z");
        assert_eq!(fall.end().to_rfc3339(), "2025-04-05T15:29:59Z");
        assert!(fall.contains(&at("2025-04-05T15:15:00Z")));
    }

    #[test]
    fn test_day_start_scenario() {
        let m = day_start(at("2024-03-15T13:45:30Z"), &utc()).unwrap();
        assert_eq!(m.to_rfc3339(), "2024-03-15T00:00:00Z");
        assert_eq!(m.subsec_nanos(), 0);
    }

    #[test]
    fn test_day_end_clears_sub_second() {
        let m = day_end(at("2024-03-15T13:45:30.999Z"), &utc()).unwrap();
        assert_eq!(m.to_rfc3339(), "2024-03-15T23:59:59Z");
        assert_eq!(m.subsec_nanos(), 0);
    }

    #[test]
    fn test_day_shift_backward_crosses_month() {
        let (b, e) = iv("day", "2024-03-01T08:00:00Z", &shifted(-1));
        assert_eq!(b, "2024-02-29T00:00:00Z");
        assert_eq!(e, "2024-02-29T23:59:59Z");
    }

    #[test]
    fn test_day_in_zone() {
        let options = PeriodOptions {
            timezone: Tz::America__New_York,
            ..Default::default()
        };
        // 02:00Z on the 15th is still the 14th in New York (EDT, -04:00).
        let (b, e) = iv("day", "2024-03-15T02:00:00Z", &options);
        assert_eq!(b, "2024-03-14T04:00:00Z");
        assert_eq!(e, "2024-03-15T03:59:59Z");
    }

    #[test]
    fn test_day_length_on_dst_days() {
        let options = PeriodOptions {
            timezone: Tz::America__New_York,
            ..Default::default()
        };
        let spring = period_interval("day", at("2024-03-10T12:00:00Z"), &options).unwrap();
        let secs = (spring.end().as_utc() - spring.begin().as_utc()).num_seconds();
        assert_eq!(secs, 86_399 - 3600);

        let fall = period_interval("day", at("2024-11-03T12:00:00Z"), &options).unwrap();
        let secs = (fall.end().as_utc() - fall.begin().as_utc()).num_seconds();
        assert_eq!(secs, 86_399 + 3600);
    }

    // ── week ────────────────────────────────────────────────────────────

    #[test]
    fn test_week_us_starts_sunday() {
        // Friday 2024-03-15
        let (b, e) = iv("week", "2024-03-15T13:45:30Z", &utc());
        assert_eq!(b, "2024-03-10T00:00:00Z");
        assert_eq!(e, "2024-03-16T23:59:59Z");
    }

    #[test]
    fn test_week_de_starts_monday() {
        let options = PeriodOptions {
            locale: CalendarLocale::parse("de-DE").unwrap(),
            ..Default::default()
        };
        let (b, e) = iv("week", "2024-03-17T10:00:00Z", &options);
        assert_eq!(b, "2024-03-11T00:00:00Z");
        assert_eq!(e, "2024-03-17T23:59:59Z");
    }

    #[test]
    fn test_week_shift_and_day_offset_are_independent() {
        // Day offset moves the reference into the next week, then shift moves one more.
        let options = PeriodOptions {
            shift: 1,
            day_offset: 2,
            ..Default::default()
        };
        let (b, e) = iv("week", "2024-03-15T13:45:30Z", &options);
        assert_eq!(b, "2024-03-24T00:00:00Z");
        assert_eq!(e, "2024-03-30T23:59:59Z");
    }

    #[test]
    fn test_week_crosses_year() {
        let (b, e) = iv("week", "2025-01-01T12:00:00Z", &utc());
        assert_eq!(b, "2024-12-29T00:00:00Z");
        assert_eq!(e, "2025-01-04T23:59:59Z");
    }

    // ── month ───────────────────────────────────────────────────────────

    #[test]
    fn test_month_end_leap_year() {
        let m = month_end(at("2024-02-10T00:00:00Z"), &utc()).unwrap();
        assert_eq!(m.to_rfc3339(), "2024-02-29T23:59:59Z");
        let m = month_end(at("2023-02-10T00:00:00Z"), &utc()).unwrap();
        assert_eq!(m.to_rfc3339(), "2023-02-28T23:59:59Z");
    }

    #[test]
    fn test_month_shift_from_31st() {
        // Starting on the 31st must not skip February.
        let (b, e) = iv("month", "2024-01-31T18:00:00Z", &shifted(1));
        assert_eq!(b, "2024-02-01T00:00:00Z");
        assert_eq!(e, "2024-02-29T23:59:59Z");
    }

    #[test]
    fn test_month_shift_backward_crosses_year() {
        let (b, e) = iv("month", "2024-01-15T00:00:00Z", &shifted(-2));
        assert_eq!(b, "2023-11-01T00:00:00Z");
        assert_eq!(e, "2023-11-30T23:59:59Z");
    }

    #[test]
    fn test_month_day_offset() {
        let options = PeriodOptions {
            day_offset: 14,
            ..Default::default()
        };
        let m = month_start(at("2024-02-20T00:00:00Z"), &options).unwrap();
        assert_eq!(m.to_rfc3339(), "2024-02-15T00:00:00Z");
    }

    // ── quarter / semester ──────────────────────────────────────────────

    #[test]
    fn test_quarter_scenario() {
        let (b, e) = iv("quarter", "2024-06-10T00:00:00Z", &utc());
        assert_eq!(b, "2024-04-01T00:00:00Z");
        assert_eq!(e, "2024-06-30T23:59:59Z");
    }

    #[test]
    fn test_quarter_grouping() {
        let cases = [
            ("2024-01-31T00:00:00Z", "2024-01-01T00:00:00Z", "2024-03-31T23:59:59Z"),
            ("2024-03-31T23:00:00Z", "2024-01-01T00:00:00Z", "2024-03-31T23:59:59Z"),
            ("2024-04-01T00:00:00Z", "2024-04-01T00:00:00Z", "2024-06-30T23:59:59Z"),
            ("2024-08-31T00:00:00Z", "2024-07-01T00:00:00Z", "2024-09-30T23:59:59Z"),
            ("2024-12-31T23:59:59Z", "2024-10-01T00:00:00Z", "2024-12-31T23:59:59Z"),
        ];
        for (reference, begin, end) in cases {
            assert_eq!(iv("quarter", reference, &utc()), (begin.into(), end.into()), "at {reference}");
        }
    }

    #[test]
    fn test_quarter_shift() {
        let (b, e) = iv("quarter", "2024-02-10T00:00:00Z", &shifted(-1));
        assert_eq!(b, "2023-10-01T00:00:00Z");
        assert_eq!(e, "2023-12-31T23:59:59Z");
        let (b, e) = iv("quarter", "2024-11-10T00:00:00Z", &shifted(1));
        assert_eq!(b, "2025-01-01T00:00:00Z");
        assert_eq!(e, "2025-03-31T23:59:59Z");
    }

    #[test]
    fn test_semester() {
        let (b, e) = iv("semester", "2024-05-31T00:00:00Z", &utc());
        assert_eq!(b, "2024-01-01T00:00:00Z");
        assert_eq!(e, "2024-06-30T23:59:59Z");
        let (b, e) = iv("semester", "2024-07-01T00:00:00Z", &utc());
        assert_eq!(b, "2024-07-01T00:00:00Z");
        assert_eq!(e, "2024-12-31T23:59:59Z");
        let (b, _) = iv("semester", "2024-07-01T00:00:00Z", &shifted(-3));
        assert_eq!(b, "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_quarter_shift_overflow_is_error() {
        let err = period_interval("quarter", at("2024-01-01T00:00:00Z"), &shifted(i32::MAX))
            .unwrap_err();
        assert!(matches!(err, PeriodError::InvalidArgument(_)));
    }

    // ── year ────────────────────────────────────────────────────────────

    #[test]
    fn test_year_interval() {
        let (b, e) = iv("year", "2024-06-10T12:00:00Z", &utc());
        assert_eq!(b, "2024-01-01T00:00:00Z");
        assert_eq!(e, "2024-12-31T23:59:59Z");
        let (b, e) = iv("year", "2024-06-10T12:00:00Z", &shifted(-4));
        assert_eq!(b, "2020-01-01T00:00:00Z");
        assert_eq!(e, "2020-12-31T23:59:59Z");
    }

    #[test]
    fn test_year_start_month_and_day_offsets() {
        let options = PeriodOptions {
            shift: 1,
            month_offset: 2,
            day_offset: 9,
            ..Default::default()
        };
        let m = year_start(at("2024-06-10T12:00:00Z"), &options).unwrap();
        assert_eq!(m.to_rfc3339(), "2025-03-10T00:00:00Z");
    }

    // ── errors & formatter ──────────────────────────────────────────────

    #[test]
    fn test_unknown_granularity() {
        let err = period_interval("fortnight", at("2024-01-01T00:00:00Z"), &utc()).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidGranularity(_)));
        let err = period_interval_with_formatter("Week", at("2024-01-01T00:00:00Z"), &utc())
            .unwrap_err();
        assert!(matches!(err, PeriodError::InvalidGranularity(_)));
    }

    #[test]
    fn test_interval_with_formatter_label() {
        let i = period_interval_with_formatter("quarter", at("2024-06-10T00:00:00Z"), &utc())
            .unwrap();
        assert_eq!(i.label().as_deref(), Some("2024-2T"));
        assert!(period_interval("quarter", at("2024-06-10T00:00:00Z"), &utc())
            .unwrap()
            .formatter()
            .is_none());
    }

    #[test]
    fn test_interval_contains() {
        let i = period_interval("day", at("2024-03-15T13:45:30Z"), &utc()).unwrap();
        assert!(i.contains(&at("2024-03-15T00:00:00Z")));
        assert!(i.contains(&at("2024-03-15T23:59:59.999Z")));
        assert!(!i.contains(&at("2024-03-16T00:00:00Z")));
    }

    #[test]
    fn test_interval_serializes() {
        let i = period_interval_with_formatter("month", at("2024-02-10T00:00:00Z"), &utc())
            .unwrap();
        let json = serde_json::to_value(&i).unwrap();
        assert_eq!(json["granularity"], "month");
        assert_eq!(json["formatter"], "yyyy-MM");
        assert!(json["end"].as_str().unwrap().starts_with("2024-02-29T23:59:59"));
    }

    #[test]
    fn test_week_number() {
        assert_eq!(week_number(at("2024-03-15T00:00:00Z"), &utc()), 11);
    }

    #[test]
    fn test_options_for() {
        let options = options_for(-1, "Europe/Paris", "fr-FR").unwrap();
        assert_eq!(options.timezone, Tz::Europe__Paris);
        assert_eq!(options.shift, -1);
        assert!(options_for(0, "Mars/Olympus", "en-US").is_err());
    }

    // ── properties ──────────────────────────────────────────────────────

    const ZONES: [Tz; 4] = [
        Tz::UTC,
        Tz::America__New_York,
        Tz::Europe__Berlin,
        Tz::Australia__Lord_Howe,
    ];

    proptest! {
        #[test]
        fn prop_begin_not_after_end(
            secs in 0i64..4_102_444_800,
            shift in -60i32..60,
            g in 0usize..7,
            z in 0usize..4,
        ) {
            let options = PeriodOptions { shift, timezone: ZONES[z], ..Default::default() };
            let m = Moment::from_epoch_millis(secs * 1000).unwrap();
            let i = interval(Granularity::ALL[g], m, &options).unwrap();
            prop_assert!(i.begin() <= i.end());
            prop_assert_eq!(i.end().subsec_nanos(), 0);
        }

        #[test]
        fn prop_unshifted_interval_contains_reference(
            secs in 0i64..4_102_444_800,
            g in 0usize..7,
            z in 0usize..4,
        ) {
            let options = PeriodOptions { timezone: ZONES[z], ..Default::default() };
            let m = Moment::from_epoch_millis(secs * 1000).unwrap();
            let i = interval(Granularity::ALL[g], m, &options).unwrap();
            prop_assert!(i.contains(&m));
        }

        #[test]
        fn prop_utc_day_spans_86399_seconds(secs in 0i64..4_102_444_800) {
            let m = Moment::from_epoch_millis(secs * 1000).unwrap();
            let i = interval(Granularity::Day, m, &utc()).unwrap();
            prop_assert_eq!((i.end().as_utc() - i.begin().as_utc()).num_seconds(), 86_399);
        }

        #[test]
        fn prop_week_spans_seven_days(secs in 0i64..4_102_444_800) {
            let m = Moment::from_epoch_millis(secs * 1000).unwrap();
            let i = interval(Granularity::Week, m, &utc()).unwrap();
            prop_assert_eq!(
                (i.end().as_utc() - i.begin().as_utc()).num_seconds(),
                6 * 86_400 + 86_399
            );
        }

        #[test]
        fn prop_month_end_is_actual_last_day(secs in 0i64..4_102_444_800) {
            use chrono::Datelike;
            let m = Moment::from_epoch_millis(secs * 1000).unwrap();
            let end = month_end(m, &utc()).unwrap().as_utc();
            let next = end + chrono::Duration::seconds(1);
            prop_assert_eq!(next.day(), 1);
            prop_assert_eq!(next.time(), chrono::NaiveTime::MIN);
        }
    }
}
