//! Display formats for periods.
//!
//! Each granularity maps to one canonical label pattern. Quarter and semester
//! have no calendar field of their own, so their labels are synthesized from
//! the zero-based month (`2024-2T` is April through June) and cannot be parsed
//! back.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::boundary::PeriodOptions;
use crate::calendar::{resolve_local, ZonedCalendar};
use crate::error::PeriodError;
use crate::granularity::Granularity;
use crate::locale::CalendarLocale;
use crate::moment::Moment;

/// Renders (and for native patterns, parses) period labels in one zone and locale.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodFormatter {
    granularity: Granularity,
    timezone: Tz,
    locale: CalendarLocale,
}

impl PeriodFormatter {
    pub fn new(granularity: Granularity, timezone: Tz, locale: CalendarLocale) -> Self {
        PeriodFormatter {
            granularity,
            timezone,
            locale,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn locale(&self) -> &CalendarLocale {
        &self.locale
    }

    /// The pattern in date-format notation; `<N>` marks a synthesized index.
    pub fn pattern(&self) -> &'static str {
        match self.granularity {
            Granularity::Hour => "yyyy-MM-dd HH",
            Granularity::Day => "yyyy-MM-dd",
            Granularity::Week => "YYYY-'W'ww",
            Granularity::Month => "yyyy-MM",
            Granularity::Quarter => "yyyy-<N>T",
            Granularity::Semester => "yyyy-<N>S",
            Granularity::Year => "yyyy",
        }
    }

    /// Whether [`PeriodFormatter::parse`] is available for this granularity.
    pub fn can_parse(&self) -> bool {
        !matches!(
            self.granularity,
            Granularity::Quarter | Granularity::Semester
        )
    }

    /// Label of the period containing `moment`.
    ///
    /// ```
    /// use period_engine::{formatter_for, Moment, PeriodOptions};
    ///
    /// let f = formatter_for("quarter", &PeriodOptions::default()).unwrap();
    /// let at: Moment = "2024-11-05T00:00:00Z".parse().unwrap();
    /// assert_eq!(f.format(&at), "2024-4T");
    /// ```
    pub fn format(&self, moment: &Moment) -> String {
        let cal = ZonedCalendar::new(*moment, self.timezone, &self.locale);
        let local = cal.local();
        match self.granularity {
            Granularity::Hour => local.format("%Y-%m-%d %H").to_string(),
            Granularity::Day => local.format("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let (week_year, week) = self.locale.week_of_year(local.date());
                format!("{week_year:04}-W{week:02}")
            }
            Granularity::Month => local.format("%Y-%m").to_string(),
            Granularity::Quarter => synthesized(&local, 3, 'T'),
            Granularity::Semester => synthesized(&local, 6, 'S'),
            Granularity::Year => local.format("%Y").to_string(),
        }
    }

    /// Parse a label back to the first instant of its period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::UnsupportedOperation`] for quarter and semester
    /// labels, and [`PeriodError::InvalidDatetime`] if `label` does not match
    /// the pattern.
    pub fn parse(&self, label: &str) -> Result<Moment, PeriodError> {
        let invalid = || {
            PeriodError::InvalidDatetime(format!(
                "'{label}' does not match '{}'",
                self.pattern()
            ))
        };
        let local = match self.granularity {
            Granularity::Quarter | Granularity::Semester => {
                return Err(PeriodError::UnsupportedOperation(format!(
                    "{} labels are format-only",
                    self.granularity
                )));
            }
            Granularity::Hour => {
                NaiveDateTime::parse_from_str(&format!("{label}:00"), "%Y-%m-%d %H:%M")
                    .map_err(|_| invalid())?
            }
            Granularity::Day => midnight(
                NaiveDate::parse_from_str(label, "%Y-%m-%d").map_err(|_| invalid())?,
            ),
            Granularity::Week => {
                let (year, week) = label.split_once("-W").ok_or_else(invalid)?;
                let week_year: i32 = digits(year).ok_or_else(invalid)?;
                let week: u32 = digits(week).ok_or_else(invalid)?;
                let date = self
                    .locale
                    .date_of_week(week_year, week)
                    .filter(|d| self.locale.week_of_year(*d) == (week_year, week))
                    .ok_or_else(invalid)?;
                midnight(date)
            }
            Granularity::Month => midnight(
                NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d")
                    .map_err(|_| invalid())?,
            ),
            Granularity::Year => {
                let year: i32 = digits(label).ok_or_else(invalid)?;
                midnight(NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?)
            }
        };
        resolve_local(&self.timezone, &local)
            .map(|dt| Moment::from(&dt))
            .ok_or_else(invalid)
    }
}

impl Serialize for PeriodFormatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.pattern())
    }
}

/// Formatter for a granularity name in the options' zone and locale.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidGranularity`] for an unknown name.
pub fn formatter_for(
    granularity: &str,
    options: &PeriodOptions,
) -> Result<PeriodFormatter, PeriodError> {
    Ok(PeriodFormatter::new(
        granularity.parse()?,
        options.timezone,
        options.locale.clone(),
    ))
}

fn synthesized(local: &NaiveDateTime, months: u32, suffix: char) -> String {
    use chrono::Datelike;
    format!("{:04}-{}{suffix}", local.year(), local.month0() / months + 1)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Moment {
        s.parse().unwrap()
    }

    fn utc(g: Granularity) -> PeriodFormatter {
        PeriodFormatter::new(g, Tz::UTC, CalendarLocale::en_us())
    }

    #[test]
    fn test_native_labels() {
        let m = at("2024-03-05T07:45:30Z");
        assert_eq!(utc(Granularity::Hour).format(&m), "2024-03-05 07");
        assert_eq!(utc(Granularity::Day).format(&m), "2024-03-05");
        assert_eq!(utc(Granularity::Month).format(&m), "2024-03");
        assert_eq!(utc(Granularity::Year).format(&m), "2024");
        assert_eq!(utc(Granularity::Week).format(&m), "2024-W10");
    }

    #[test]
    fn test_quarter_labels() {
        let f = utc(Granularity::Quarter);
        assert_eq!(f.format(&at("2024-01-01T00:00:00Z")), "2024-1T");
        assert_eq!(f.format(&at("2024-03-31T23:59:59Z")), "2024-1T");
        assert_eq!(f.format(&at("2024-04-01T00:00:00Z")), "2024-2T");
        assert_eq!(f.format(&at("2024-06-30T00:00:00Z")), "2024-2T");
        assert_eq!(f.format(&at("2024-10-01T00:00:00Z")), "2024-4T");
        assert_eq!(f.format(&at("2024-12-31T00:00:00Z")), "2024-4T");
    }

    #[test]
    fn test_semester_labels() {
        let f = utc(Granularity::Semester);
        assert_eq!(f.format(&at("2024-06-30T00:00:00Z")), "2024-1S");
        assert_eq!(f.format(&at("2024-07-01T00:00:00Z")), "2024-2S");
    }

    #[test]
    fn test_label_uses_zone() {
        let f = PeriodFormatter::new(
            Granularity::Quarter,
            Tz::America__New_York,
            CalendarLocale::en_us(),
        );
        // Still March 31 in New York.
        assert_eq!(f.format(&at("2024-04-01T02:00:00Z")), "2024-1T");
    }

    #[test]
    fn test_week_label_uses_week_year() {
        let iso = PeriodFormatter::new(
            Granularity::Week,
            Tz::UTC,
            CalendarLocale::parse("de-DE").unwrap(),
        );
        assert_eq!(iso.format(&at("2024-12-30T00:00:00Z")), "2025-W01");
        assert_eq!(iso.format(&at("2021-01-03T00:00:00Z")), "2020-W53");
        assert_eq!(utc(Granularity::Week).format(&at("2024-12-30T00:00:00Z")), "2025-W01");
    }

    #[test]
    fn test_parse_native_labels() {
        assert_eq!(
            utc(Granularity::Hour).parse("2024-03-05 07").unwrap().to_rfc3339(),
            "2024-03-05T07:00:00Z"
        );
        assert_eq!(
            utc(Granularity::Day).parse("2024-03-05").unwrap().to_rfc3339(),
            "2024-03-05T00:00:00Z"
        );
        assert_eq!(
            utc(Granularity::Month).parse("2024-02").unwrap().to_rfc3339(),
            "2024-02-01T00:00:00Z"
        );
        assert_eq!(
            utc(Granularity::Year).parse("2024").unwrap().to_rfc3339(),
            "2024-01-01T00:00:00Z"
        );
        assert_eq!(
            utc(Granularity::Week).parse("2024-W10").unwrap().to_rfc3339(),
            "2024-03-03T00:00:00Z"
        );
    }

    #[test]
    fn test_parse_in_zone() {
        let f = PeriodFormatter::new(Granularity::Day, Tz::Europe__Paris, CalendarLocale::en_us());
        assert_eq!(f.parse("2024-07-01").unwrap().to_rfc3339(), "2024-06-30T22:00:00Z");
    }

    #[test]
    fn test_parse_synthesized_is_unsupported() {
        for g in [Granularity::Quarter, Granularity::Semester] {
            let f = utc(g);
            assert!(!f.can_parse());
            let err = f.parse("2024-2T").unwrap_err();
            assert!(matches!(err, PeriodError::UnsupportedOperation(_)), "got: {err}");
        }
    }

    #[test]
    fn test_parse_rejects_mismatch() {
        assert!(matches!(
            utc(Granularity::Day).parse("05/03/2024"),
            Err(PeriodError::InvalidDatetime(_))
        ));
        assert!(utc(Granularity::Year).parse("+2024").is_err());
        assert!(utc(Granularity::Week).parse("2024-W60").is_err());
        assert!(utc(Granularity::Week).parse("2024W10").is_err());
    }

    #[test]
    fn test_formatter_for() {
        let f = formatter_for("semester", &PeriodOptions::default()).unwrap();
        assert_eq!(f.pattern(), "yyyy-<N>S");
        assert!(matches!(
            formatter_for("fortnight", &PeriodOptions::default()),
            Err(PeriodError::InvalidGranularity(_))
        ));
    }

    #[test]
    fn test_serializes_as_pattern() {
        let json = serde_json::to_string(&utc(Granularity::Week)).unwrap();
        assert_eq!(json, "\"YYYY-'W'ww\"");
    }
}
