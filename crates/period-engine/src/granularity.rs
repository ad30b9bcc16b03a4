//! The fixed set of reporting granularities and their validation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PeriodError;

/// A named calendar unit size.
///
/// `Quarter` and `Semester` are derived units (3 and 6 calendar months) with
/// no native calendar field; they are computed from the zero-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Semester,
    Year,
}

impl Granularity {
    /// Every supported granularity, smallest first.
    pub const ALL: [Granularity; 7] = [
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Semester,
        Granularity::Year,
    ];

    /// The canonical lowercase name (`"hour"`, `"day"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Semester => "semester",
            Granularity::Year => "year",
        }
    }

    /// How many units back a lookback reaches when the caller gives no count.
    pub fn default_lookback_count(self) -> u32 {
        match self {
            Granularity::Hour => 12,
            Granularity::Day => 30,
            Granularity::Week => 4,
            Granularity::Month => 12,
            Granularity::Quarter => 16,
            Granularity::Semester => 24,
            Granularity::Year => 5,
        }
    }

    /// Number of calendar months a month-based unit spans, `None` below a month.
    pub fn months_spanned(self) -> Option<u32> {
        match self {
            Granularity::Month => Some(1),
            Granularity::Quarter => Some(3),
            Granularity::Semester => Some(6),
            Granularity::Year => Some(12),
            Granularity::Hour | Granularity::Day | Granularity::Week => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = PeriodError;

    /// Exact, case-sensitive match against the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| PeriodError::InvalidGranularity(format!("'{s}'")))
    }
}

/// Whether `name` is one of the supported granularities.
///
/// ```
/// use period_engine::is_supported_granularity;
///
/// assert!(is_supported_granularity("quarter"));
/// assert!(!is_supported_granularity("fortnight"));
/// assert!(!is_supported_granularity("Quarter"));
/// ```
pub fn is_supported_granularity(name: &str) -> bool {
    name.parse::<Granularity>().is_ok()
}

/// The supported granularity names in canonical order.
pub fn supported_granularities() -> Vec<&'static str> {
    Granularity::ALL.iter().map(|g| g.as_str()).collect()
}

/// Default lookback count for a granularity name.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidGranularity`] for an unknown name.
pub fn default_lookback_count(name: &str) -> Result<u32, PeriodError> {
    Ok(name.parse::<Granularity>()?.default_lookback_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for g in Granularity::ALL {
            assert_eq!(g.as_str().parse::<Granularity>().unwrap(), g);
        }
    }

    #[test]
    fn test_unknown_name_is_invalid() {
        let err = "fortnight".parse::<Granularity>().unwrap_err();
        assert!(matches!(err, PeriodError::InvalidGranularity(_)));
        assert!(err.to_string().contains("fortnight"), "got: {err}");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_supported_granularity("Day"));
        assert!(!is_supported_granularity("DAY"));
        assert!(!is_supported_granularity(" day"));
        assert!(is_supported_granularity("day"));
    }

    #[test]
    fn test_supported_order() {
        assert_eq!(
            supported_granularities(),
            vec!["hour", "day", "week", "month", "quarter", "semester", "year"]
        );
    }

    #[test]
    fn test_default_counts() {
        assert_eq!(default_lookback_count("hour").unwrap(), 12);
        assert_eq!(default_lookback_count("day").unwrap(), 30);
        assert_eq!(default_lookback_count("week").unwrap(), 4);
        assert_eq!(default_lookback_count("month").unwrap(), 12);
        assert_eq!(default_lookback_count("quarter").unwrap(), 16);
        assert_eq!(default_lookback_count("semester").unwrap(), 24);
        assert_eq!(default_lookback_count("year").unwrap(), 5);
        assert!(default_lookback_count("decade").is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Granularity::Semester).unwrap(),
            "\"semester\""
        );
    }
}
