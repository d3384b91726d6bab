//! Digital Formatter
//!
//! A [`DigitalFormatter`] is built once per widget from its zone and
//! configuration and then reused on every tick. Formatting first produces
//! the individual fields ([`DigitalParts`]) and then assembles them, so a
//! missing field degrades to a placeholder instead of failing.

use chrono::Locale;
use tzclock_core::{ClockConfig, Timestamp, ZoneId, config::DEFAULT_LOCALE};
use tzclock_ports::ZoneResult;

use crate::zone::ResolvedZone;

/// Placeholder for a missing hour or minute field
const MISSING_FIELD: &str = "--";

/// Text written into the time and date elements
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigitalReading {
    pub time: String,
    pub date: String,
}

/// Individually formatted fields for one instant; any may be absent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigitalParts {
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub second: Option<String>,
    pub day_period: Option<String>,
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl DigitalParts {
    /// Assemble `HH:MM[:SS][ period]` and, when complete, `DD Mon YYYY`
    pub fn compose(&self) -> DigitalReading {
        let hour = self.hour.as_deref().unwrap_or(MISSING_FIELD);
        let minute = self.minute.as_deref().unwrap_or(MISSING_FIELD);

        let mut time = format!("{}:{}", hour, minute);
        if let Some(second) = &self.second {
            time.push(':');
            time.push_str(second);
        }
        if let Some(period) = &self.day_period {
            time.push(' ');
            time.push_str(period);
        }

        let date = match (&self.day, &self.month, &self.year) {
            (Some(day), Some(month), Some(year)) => format!("{} {} {}", day, month, year),
            _ => String::new(),
        };

        DigitalReading { time, date }
    }
}

/// Reusable formatter bound to one zone and one configuration
#[derive(Debug, Clone)]
pub struct DigitalFormatter {
    zone: ResolvedZone,
    locale: Locale,
    format12: bool,
    seconds: bool,
    show_date: bool,
}

impl DigitalFormatter {
    /// Build a formatter; fails only when the zone cannot be resolved
    pub fn new(zone: &ZoneId, config: &ClockConfig) -> ZoneResult<Self> {
        let zone = ResolvedZone::from_id(zone)?;
        Ok(Self {
            zone,
            locale: parse_locale(&config.locale),
            format12: config.format12,
            seconds: config.seconds,
            show_date: config.show_date,
        })
    }

    /// Produce the individual fields for `instant`
    pub fn parts(&self, instant: Timestamp) -> DigitalParts {
        let field = |pattern: &str| {
            let text = self.zone.format_localized(instant, pattern, self.locale);
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let hour = field(if self.format12 { "%I" } else { "%H" });
        let day_period = if self.format12 { field("%p") } else { None };

        let (day, month, year) = if self.show_date {
            (field("%d"), field("%b"), field("%Y"))
        } else {
            (None, None, None)
        };

        DigitalParts {
            hour,
            minute: field("%M"),
            second: if self.seconds { field("%S") } else { None },
            day_period,
            day,
            month,
            year,
        }
    }

    /// Format `instant` into display strings
    pub fn format(&self, instant: Timestamp) -> DigitalReading {
        self.parts(instant).compose()
    }
}

/// Parse a locale tag such as `en_US` or `de-DE`, falling back to the default
fn parse_locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    match Locale::try_from(normalized.as_str()) {
        Ok(locale) => locale,
        Err(_) => {
            log::warn!("Unknown locale '{}', using {}", tag, DEFAULT_LOCALE);
            Locale::en_US
        }
    }
}
