//! Permissive parsing of US-style date and time strings.
//!
//! Malformed input yields `None` rather than an error, so callers can use
//! these for validation. The reason is logged at `debug` level only.
//!
//! Field values are lenient: `02/30/2024 00:00` is March 1, `12/31/2024 24:00`
//! is midnight on January 1. Sub-second digits are always zero.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::calendar::{lenient_local, resolve_local, ZonedCalendar};
use crate::locale::CalendarLocale;
use crate::moment::Moment;

/// Parse `"MM/DD/YYYY HH:MM"` or `"MM/DD/YYYY HH:MM:SS"` as a local time in `zone`.
///
/// ```
/// use chrono_tz::Tz;
/// use period_engine::parse_us_date_time;
///
/// let m = parse_us_date_time("3/15/2024 13:45", Tz::UTC).unwrap();
/// assert_eq!(m.to_rfc3339(), "2024-03-15T13:45:00Z");
/// assert!(parse_us_date_time("2024-03-15 13:45", Tz::UTC).is_none());
/// ```
pub fn parse_us_date_time(input: &str, zone: Tz) -> Option<Moment> {
    let Some((date, time)) = input.split_once(' ') else {
        debug!(input, "no space between date and time");
        return None;
    };
    from_parts(date, time, zone)
}

/// Parse `"MM/DD/YYYY"` as local midnight in `zone`.
pub fn parse_us_date(input: &str, zone: Tz) -> Option<Moment> {
    from_parts(input, "00:00:00", zone)
}

/// Parse `"HH:MM"` or `"HH:MM:SS"` as that time on 1970-01-01 in `zone`.
pub fn parse_time(input: &str, zone: Tz) -> Option<Moment> {
    from_parts("1/1/1970", input, zone)
}

/// Render as `MM/DD/YYYY` in `zone`.
pub fn to_us_date_string(moment: &Moment, zone: Tz) -> String {
    local_of(moment, zone).format("%m/%d/%Y").to_string()
}

/// Render as `HH:MM:SS` in `zone`.
pub fn to_time_string(moment: &Moment, zone: Tz) -> String {
    local_of(moment, zone).format("%H:%M:%S").to_string()
}

fn local_of(moment: &Moment, zone: Tz) -> NaiveDateTime {
    let locale = CalendarLocale::en_us();
    ZonedCalendar::new(*moment, zone, &locale).local()
}

fn from_parts(date: &str, time: &str, zone: Tz) -> Option<Moment> {
    let (Some(slash1), Some(slash2)) = (date.find('/'), date.rfind('/')) else {
        debug!(date, "date needs two '/' separators");
        return None;
    };
    if slash1 == 0 || slash1 == slash2 {
        debug!(date, "date needs two '/' separators");
        return None;
    }
    let colon1 = time.find(':').filter(|&i| i > 0);
    let Some(colon1) = colon1 else {
        debug!(time, "time needs an hour before ':'");
        return None;
    };
    let colon2 = time.rfind(':').unwrap_or(colon1);

    let month = &date[..slash1];
    let day = &date[slash1 + 1..slash2];
    let year = &date[slash2 + 1..];
    let hour = &time[..colon1];
    let (minute, second) = if colon1 == colon2 {
        (&time[colon1 + 1..], "0")
    } else {
        (&time[colon1 + 1..colon2], &time[colon2 + 1..])
    };

    let fields: Option<Vec<i32>> = [month, day, year, hour, minute, second]
        .iter()
        .map(|f| f.parse::<i32>().ok())
        .collect();
    let Some(fields) = fields else {
        debug!(date, time, "could not convert to date: non-numeric field");
        return None;
    };
    let [month, day, year, hour, minute, second] = fields[..] else {
        return None;
    };

    let local = lenient_local(year, month, day, hour, minute, second).or_else(|| {
        debug!(date, time, "date out of range");
        None
    })?;
    resolve_local(&zone, &local).map(|dt| Moment::from(&dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> Option<String> {
        parse_us_date_time(s, Tz::UTC).map(|m| m.to_rfc3339())
    }

    #[test]
    fn test_with_and_without_seconds() {
        assert_eq!(utc("03/15/2024 13:45:30").as_deref(), Some("2024-03-15T13:45:30Z"));
        assert_eq!(utc("03/15/2024 13:45").as_deref(), Some("2024-03-15T13:45:00Z"));
    }

    #[test]
    fn test_lenient_fields_carry() {
        assert_eq!(utc("02/30/2024 00:00").as_deref(), Some("2024-03-01T00:00:00Z"));
        assert_eq!(utc("12/31/2024 24:00").as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(utc("13/01/2024 00:00").as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(utc("03/15/2024 10:90:00").as_deref(), Some("2024-03-15T11:30:00Z"));
    }

    #[test]
    fn test_structural_failures_are_none() {
        assert_eq!(utc("03/15/2024T13:45"), None);
        assert_eq!(utc("03-15-2024 13:45"), None);
        assert_eq!(utc("03/152024 13:45"), None);
        assert_eq!(utc("/15/2024 13:45"), None);
        assert_eq!(utc("03/15/2024 :45"), None);
        assert_eq!(utc("03/15/2024 1345"), None);
        assert_eq!(utc(""), None);
    }

    #[test]
    fn test_non_numeric_is_none() {
        assert_eq!(utc("Mar/15/2024 13:45"), None);
        assert_eq!(utc("03/15/2024 13:4x"), None);
        assert_eq!(utc("03/15/2024 13:45:"), None);
    }

    #[test]
    fn test_zone_applies() {
        let m = parse_us_date_time("07/01/2024 00:00", Tz::Europe__Paris).unwrap();
        assert_eq!(m.to_rfc3339(), "2024-06-30T22:00:00Z");
    }

    #[test]
    fn test_dst_gap_shifts_forward() {
        let m = parse_us_date_time("03/10/2024 02:30", Tz::America__New_York).unwrap();
        assert_eq!(m.to_rfc3339(), "2024-03-10T07:30:00Z");
        assert_eq!(to_time_string(&m, Tz::America__New_York), "03:30:00");
    }

    #[test]
    fn test_date_only_and_time_only() {
        assert_eq!(
            parse_us_date("2/29/2024", Tz::UTC).unwrap().to_rfc3339(),
            "2024-02-29T00:00:00Z"
        );
        assert_eq!(
            parse_time("08:05:09", Tz::UTC).unwrap().to_rfc3339(),
            "1970-01-01T08:05:09Z"
        );
        assert!(parse_time("0805", Tz::UTC).is_none());
    }

    #[test]
    fn test_render() {
        let m: Moment = "2024-03-05T07:08:09Z".parse().unwrap();
        assert_eq!(to_us_date_string(&m, Tz::UTC), "03/05/2024");
        assert_eq!(to_time_string(&m, Tz::UTC), "07:08:09");
        assert_eq!(to_us_date_string(&m, Tz::America__Los_Angeles), "03/04/2024");
    }
}
