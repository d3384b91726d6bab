//! Zone Resolver
//!
//! Turns a [`ZoneId`] and an instant into wall-clock components. This is
//! the only place where an unknown zone name is detected; everything
//! downstream receives either a [`ResolvedZone`] or a [`ZoneError`].

use chrono::{DateTime, Local, Locale, TimeZone, Timelike};
use chrono_tz::Tz;
use tzclock_core::{ResolvedTime, Timestamp, ZoneId};
use tzclock_ports::{ZoneError, ZoneResult};

/// Display fallback when the observer's zone name cannot be determined
pub const LOCAL_FALLBACK_NAME: &str = "Local time";

/// A zone identifier that has been looked up successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedZone {
    /// The host's local zone, read without a database lookup
    Local,
    /// A zone from the bundled IANA database
    Named(Tz),
}

impl ResolvedZone {
    /// Look a zone identifier up
    pub fn from_id(zone: &ZoneId) -> ZoneResult<Self> {
        match zone {
            ZoneId::Local => Ok(ResolvedZone::Local),
            ZoneId::Named(name) => name
                .parse::<Tz>()
                .map(ResolvedZone::Named)
                .map_err(|_| ZoneError::InvalidZone(name.clone())),
        }
    }

    /// 24-hour wall-clock reading of `instant` in this zone
    pub fn components(&self, instant: Timestamp) -> ResolvedTime {
        match self {
            ResolvedZone::Local => wall_clock(&instant.with_timezone(&Local)),
            ResolvedZone::Named(tz) => wall_clock(&instant.with_timezone(tz)),
        }
    }

    /// Render a strftime pattern for `instant` in this zone
    pub fn format_localized(&self, instant: Timestamp, pattern: &str, locale: Locale) -> String {
        match self {
            ResolvedZone::Local => instant
                .with_timezone(&Local)
                .format_localized(pattern, locale)
                .to_string(),
            ResolvedZone::Named(tz) => instant
                .with_timezone(tz)
                .format_localized(pattern, locale)
                .to_string(),
        }
    }
}

fn wall_clock<Z: TimeZone>(at: &DateTime<Z>) -> ResolvedTime {
    // Leap seconds report 1000+ ms; keep the documented range
    let millisecond = (at.nanosecond() / 1_000_000).min(999);
    ResolvedTime::new(at.hour(), at.minute(), at.second(), millisecond)
}

/// Resolve `zone` and read its wall clock at `instant`
pub fn resolve_time(zone: &ZoneId, instant: Timestamp) -> ZoneResult<ResolvedTime> {
    ResolvedZone::from_id(zone).map(|resolved| resolved.components(instant))
}

/// Best-effort IANA name of the observer's zone, for display only
pub fn local_zone_name() -> String {
    zone_name_or_fallback(iana_time_zone::get_timezone())
}

fn zone_name_or_fallback(lookup: Result<String, iana_time_zone::GetTimezoneError>) -> String {
    match lookup {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => LOCAL_FALLBACK_NAME.to_string(),
        Err(e) => {
            log::debug!("Could not determine local zone name: {}", e);
            LOCAL_FALLBACK_NAME.to_string()
        }
    }
}
