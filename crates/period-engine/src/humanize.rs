//! Human-readable rendering of elapsed time ("2 hours, 5.50 minutes").
//!
//! Unit labels come from a [`UnitLabels`] source so callers can plug in
//! translated resources; [`EnglishUnitLabels`] is built in.

use crate::moment::{interval_millis, Moment};

/// Units used when rendering an interval, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
    ];

    /// Resource key stem, e.g. `"minute"` (labels live at `minute.singular`/`minute.plural`).
    pub fn key(self) -> &'static str {
        match self {
            TimeUnit::Millisecond => "millisecond",
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
        }
    }

    /// How many of this unit make one of the next larger unit.
    fn per_next(self) -> Option<f64> {
        match self {
            TimeUnit::Millisecond => Some(1000.0),
            TimeUnit::Second | TimeUnit::Minute => Some(60.0),
            TimeUnit::Hour => Some(24.0),
            TimeUnit::Day => Some(7.0),
            TimeUnit::Week => None,
        }
    }
}

/// Supplies singular and plural unit labels.
pub trait UnitLabels {
    fn label(&self, unit: TimeUnit, plural: bool) -> String;
}

/// English labels (`"hour"` / `"hours"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishUnitLabels;

impl UnitLabels for EnglishUnitLabels {
    fn label(&self, unit: TimeUnit, plural: bool) -> String {
        if plural {
            format!("{}s", unit.key())
        } else {
            unit.key().to_string()
        }
    }
}

/// Render `millis` as up to `count` non-zero units, largest first.
///
/// Every unit but the last is a whole number; the last carries the
/// remainder of the smaller units with two decimals. The sign is ignored.
///
/// ```
/// use period_engine::{format_interval, EnglishUnitLabels};
///
/// assert_eq!(format_interval(90_000, 2, &EnglishUnitLabels), "1 minute, 30.00 seconds");
/// assert_eq!(format_interval(90_000, 1, &EnglishUnitLabels), "1.50 minutes");
/// ```
pub fn format_interval(millis: i64, count: usize, labels: &dyn UnitLabels) -> String {
    let mut rest = millis.unsigned_abs() as f64;
    let mut parts = Vec::with_capacity(TimeUnit::ALL.len());
    for unit in TimeUnit::ALL {
        match unit.per_next() {
            Some(per) => {
                parts.push((unit, rest % per));
                rest /= per;
            }
            None => parts.push((unit, rest)),
        }
    }

    let mut rendered = Vec::new();
    let mut remaining = count;
    for (unit, value) in parts.into_iter().rev() {
        if remaining == 0 {
            break;
        }
        if value < 1.0 {
            continue;
        }
        remaining -= 1;
        let number = if remaining == 0 {
            format!("{value:.2}")
        } else {
            format!("{}", value.trunc())
        };
        let plural = number != "1" && number != "1.00";
        rendered.push(format!("{number} {}", labels.label(unit, plural)));
    }
    rendered.join(", ")
}

/// [`format_interval`] of the time between two moments, two units deep.
pub fn format_interval_between(from: &Moment, thru: &Moment, labels: &dyn UnitLabels) -> String {
    format_interval(interval_millis(from, thru), 2, labels)
}
