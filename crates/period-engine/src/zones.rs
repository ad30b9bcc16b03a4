//! Time-zone lookup and the process-wide list of available zones.
//!
//! The available-zone list is the only shared state in the crate. It is built
//! once, on first access or by an explicit [`init_available_time_zones`], and
//! is read-only afterwards.

use std::sync::OnceLock;

use chrono_tz::{Tz, TZ_VARIANTS};
use tracing::{debug, warn};

use crate::config::{ConfigSource, EnvConfig, TIME_ZONES_KEY};
use crate::error::PeriodError;

static AVAILABLE: OnceLock<Vec<Tz>> = OnceLock::new();

/// The available zones, built on first use from [`EnvConfig`].
///
/// Every call returns the same slice.
pub fn available_time_zones() -> &'static [Tz] {
    AVAILABLE.get_or_init(|| match EnvConfig::load() {
        Ok(config) => available_time_zones_from(&config),
        Err(e) => {
            warn!(error = %e, "environment configuration unreadable, offering every zone");
            TZ_VARIANTS.to_vec()
        }
    })
}

/// Build the shared zone list from `config` instead of the environment.
///
/// Returns `false` (leaving the list untouched) if it was already built.
pub fn init_available_time_zones(config: &dyn ConfigSource) -> bool {
    if AVAILABLE.get().is_some() {
        return false;
    }
    AVAILABLE.set(available_time_zones_from(config)).is_ok()
}

/// An uncached zone list: the configured `time_zones_available` identifiers
/// in their given order, or every known zone when the property is unset.
///
/// Unknown identifiers are skipped with a warning.
pub fn available_time_zones_from(config: &dyn ConfigSource) -> Vec<Tz> {
    let zones: Vec<Tz> = match config.list(TIME_ZONES_KEY) {
        Some(ids) => ids
            .iter()
            .filter_map(|id| match id.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(_) => {
                    warn!(zone = %id, "skipping unknown configured time zone");
                    None
                }
            })
            .collect(),
        None => TZ_VARIANTS.to_vec(),
    };
    debug!(count = zones.len(), "built available time zone list");
    zones
}

/// Look up a zone by IANA identifier; an empty identifier means the host zone.
///
/// # Errors
///
/// Returns [`PeriodError::InvalidTimezone`] if the identifier is unknown.
pub fn time_zone(id: &str) -> Result<Tz, PeriodError> {
    let id = id.trim();
    if id.is_empty() {
        return Ok(host_time_zone());
    }
    id.parse::<Tz>()
        .map_err(|_| PeriodError::InvalidTimezone(format!("'{id}'")))
}

/// The host's configured zone, or UTC when it cannot be determined.
pub fn host_time_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(id) => id.parse().unwrap_or_else(|_| {
            debug!(zone = %id, "host time zone not in database, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            debug!(error = %e, "host time zone unavailable, using UTC");
            Tz::UTC
        }
    }
}

/// The fixed-offset `Etc/GMT±N` zone for a whole-hour offset.
///
/// `hours` carries the POSIX sign used by those identifiers: positive values
/// are west of Greenwich, so `5` gives `Etc/GMT+5` (UTC-05:00).
///
/// # Errors
///
/// Returns [`PeriodError::InvalidArgument`] outside `-14..=12`.
pub fn zone_from_gmt_offset(hours: i32) -> Result<Tz, PeriodError> {
    if !(-14..=12).contains(&hours) {
        return Err(PeriodError::InvalidArgument(format!(
            "GMT offset {hours} outside -14..=12"
        )));
    }
    let id = match hours {
        0 => "Etc/GMT".to_string(),
        h if h > 0 => format!("Etc/GMT+{h}"),
        h => format!("Etc/GMT{h}"),
    };
    id.parse::<Tz>()
        .map_err(|_| PeriodError::InvalidTimezone(format!("'{id}'")))
}
