//! Locale-derived calendar settings: week rules and rendered names.
//!
//! Tags are parsed and expanded to their likely region by `icu`, which also
//! supplies the CLDR first day of week. Weekday and month names come from
//! chrono's bundled locale tables.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use icu::calendar::week::WeekInformation;
use icu::locale::{Locale, LocaleExpander};
use serde::Serialize;

use crate::error::PeriodError;

// ── Week start ──────────────────────────────────────────────────────────────

/// Which day begins a week for period computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
    /// Much of the Middle East (Saturday = day 0 of the week).
    Saturday,
    /// The Maldives.
    Friday,
}

impl WeekStartDay {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStartDay::Monday => Weekday::Mon,
            WeekStartDay::Sunday => Weekday::Sun,
            WeekStartDay::Saturday => Weekday::Sat,
            WeekStartDay::Friday => Weekday::Fri,
        }
    }

    /// How many days `weekday` is from the week-start day (0..=6).
    pub fn days_from_start(self, weekday: Weekday) -> i64 {
        let start = self.weekday().num_days_from_monday();
        i64::from((weekday.num_days_from_monday() + 7 - start) % 7)
    }

    fn from_icu(weekday: icu::calendar::types::Weekday) -> Self {
        use icu::calendar::types::Weekday as IcuWeekday;
        match weekday {
            IcuWeekday::Sunday => WeekStartDay::Sunday,
            IcuWeekday::Saturday => WeekStartDay::Saturday,
            IcuWeekday::Friday => WeekStartDay::Friday,
            // CLDR starts no week midweek.
            _ => WeekStartDay::Monday,
        }
    }
}

/// Regions where week 1 needs four days of the new year (ISO 8601 rule).
///
/// CLDR `minDays` data; `icu` 2 only exposes the first day and the weekend.
const FOUR_DAY_REGIONS: &[&str] = &[
    "AD", "AN", "AT", "AX", "BE", "BG", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FJ", "FO",
    "FR", "GB", "GF", "GG", "GI", "GP", "GR", "HU", "IE", "IM", "IS", "IT", "JE", "LI", "LT",
    "LU", "MC", "MQ", "NL", "NO", "PL", "RE", "RU", "SE", "SJ", "SK", "SM", "VA",
];

// ── CalendarLocale ──────────────────────────────────────────────────────────

/// A locale as seen by calendar computations.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarLocale {
    tag: String,
    region: Option<String>,
    names: chrono::Locale,
    week_start: WeekStartDay,
    minimal_days_in_first_week: u8,
}

impl CalendarLocale {
    /// Parse a BCP 47 / POSIX style tag (`"en-US"`, `"fr_FR"`, `"de"`).
    ///
    /// A tag without a region picks up the language's most likely region, so
    /// `"en"` behaves like `"en-US"`. Languages chrono has no name table for
    /// fall back to POSIX (English) names but keep their region's week rules.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidLocale`] if the tag is empty or malformed.
    pub fn parse(tag: &str) -> Result<Self, PeriodError> {
        let invalid = || PeriodError::InvalidLocale(format!("'{tag}'"));
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let parsed: Locale = trimmed.replace('_', "-").parse().map_err(|_| invalid())?;
        if !(2..=3).contains(&parsed.id.language.as_str().len()) {
            return Err(invalid());
        }

        let mut likely = parsed.clone();
        LocaleExpander::new_extended().maximize(&mut likely.id);
        let language = likely.id.language.as_str();
        let region = likely.id.region.map(|r| r.as_str().to_string());

        let names = region
            .as_deref()
            .and_then(|r| chrono::Locale::try_from(format!("{language}_{r}").as_str()).ok())
            .unwrap_or(chrono::Locale::POSIX);
        let week_start = WeekInformation::try_new((&likely).into())
            .map(|info| WeekStartDay::from_icu(info.first_weekday))
            .unwrap_or_default();
        let minimal_days_in_first_week = match region.as_deref() {
            Some(r) if FOUR_DAY_REGIONS.contains(&r) => 4,
            _ => 1,
        };

        Ok(CalendarLocale {
            tag: parsed.id.to_string(),
            region,
            names,
            week_start,
            minimal_days_in_first_week,
        })
    }

    /// US English, the deterministic default.
    pub fn en_us() -> Self {
        CalendarLocale {
            tag: "en-US".to_string(),
            region: Some("US".to_string()),
            names: chrono::Locale::en_US,
            week_start: WeekStartDay::Sunday,
            minimal_days_in_first_week: 1,
        }
    }

    /// The host's configured locale, or US English when it cannot be read.
    pub fn host() -> Self {
        sys_locale::get_locale()
            .and_then(|tag| {
                // POSIX forms may carry an encoding or modifier suffix.
                let base = tag.split(['.', '@']).next().unwrap_or_default().to_string();
                CalendarLocale::parse(&base).ok()
            })
            .unwrap_or_else(CalendarLocale::en_us)
    }

    /// Override the week rules, keeping the names.
    pub fn with_week_rules(mut self, week_start: WeekStartDay, minimal_days: u8) -> Self {
        self.week_start = week_start;
        self.minimal_days_in_first_week = minimal_days.clamp(1, 7);
        self
    }

    /// The normalized tag, e.g. `"en-US"`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn first_day_of_week(&self) -> WeekStartDay {
        self.week_start
    }

    pub fn minimal_days_in_first_week(&self) -> u8 {
        self.minimal_days_in_first_week
    }

    pub(crate) fn chrono_locale(&self) -> chrono::Locale {
        self.names
    }

    /// First day of the week containing `date`.
    pub fn week_start_of(&self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(self.week_start.days_from_start(date.weekday()))
    }

    /// First day of week 1 of `year` under this locale's rules.
    fn first_week_start(&self, year: i32) -> Option<NaiveDate> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let offset = self.week_start.days_from_start(jan1.weekday());
        let start = jan1 - Duration::days(offset);
        if 7 - offset >= i64::from(self.minimal_days_in_first_week) {
            Some(start)
        } else {
            Some(start + Duration::days(7))
        }
    }

    /// The week-year and week number (1-based) `date` falls in.
    ///
    /// With Monday starts and four minimal days this is the ISO 8601 week.
    pub fn week_of_year(&self, date: NaiveDate) -> (i32, u32) {
        let year = date.year();
        let (Some(this_start), Some(next_start)) =
            (self.first_week_start(year), self.first_week_start(year + 1))
        else {
            return (year, 1);
        };
        if date >= next_start {
            return (year + 1, 1);
        }
        if date < this_start {
            return match self.first_week_start(year - 1) {
                Some(prev_start) => (year - 1, ((date - prev_start).num_days() / 7 + 1) as u32),
                None => (year - 1, 1),
            };
        }
        (year, ((date - this_start).num_days() / 7 + 1) as u32)
    }

    /// First day of week `week` of `week_year` (weeks past the end carry over).
    pub fn date_of_week(&self, week_year: i32, week: u32) -> Option<NaiveDate> {
        let start = self.first_week_start(week_year)?;
        start.checked_add_signed(Duration::weeks(i64::from(week) - 1))
    }

    /// Full weekday names, starting from this locale's first day of week.
    ///
    /// ```
    /// use period_engine::CalendarLocale;
    ///
    /// let names = CalendarLocale::en_us().weekday_names();
    /// assert_eq!(names[0], "Sunday");
    /// assert_eq!(names.len(), 7);
    /// ```
    pub fn weekday_names(&self) -> Vec<String> {
        // 2023-01-01 is a Sunday.
        let Some(sunday) = NaiveDate::from_ymd_opt(2023, 1, 1) else {
            return Vec::new();
        };
        let first = sunday + Duration::days(7 - self.week_start.days_from_start(Weekday::Sun));
        (0..7)
            .map(|i| self.render(first + Duration::days(i), "%A"))
            .collect()
    }

    /// Full month names, January first.
    pub fn month_names(&self) -> Vec<String> {
        (1..=12)
            .filter_map(|m| NaiveDate::from_ymd_opt(2023, m, 1))
            .map(|d| self.render(d, "%B"))
            .collect()
    }

    fn render(&self, date: NaiveDate, pattern: &str) -> String {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .format_localized(pattern, self.names)
            .to_string()
    }
}

impl Default for CalendarLocale {
    fn default() -> Self {
        CalendarLocale::en_us()
    }
}

/// Locale-rendered weekday names for a tag, starting at its first day of week.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidLocale`] if the tag cannot be parsed.
pub fn weekday_names(locale: &str) -> Result<Vec<String>, PeriodError> {
    Ok(CalendarLocale::parse(locale)?.weekday_names())
}

/// Locale-rendered month names for a tag, January first.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidLocale`] if the tag cannot be parsed.
pub fn month_names(locale: &str) -> Result<Vec<String>, PeriodError> {
    Ok(CalendarLocale::parse(locale)?.month_names())
}
