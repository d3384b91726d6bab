//! Widget configuration bundle
//!
//! The bundle arrives as loosely typed JSON text attached to the widget
//! root. It is coerced exactly once into a [`ClockConfig`]; missing or
//! malformed fields fall back to documented defaults so that nothing
//! downstream needs to re-check for absent values.

use crate::values::LabelPosition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Smallest canvas edge accepted from configuration
pub const MIN_SIZE: u32 = 80;
/// Largest canvas edge accepted from configuration
pub const MAX_SIZE: u32 = 600;
/// Canvas edge used when none (or garbage) is configured
pub const DEFAULT_SIZE: u32 = 160;
/// Locale used by the digital formatter unless configured
pub const DEFAULT_LOCALE: &str = "en_US";

/// An option that is either set explicitly or left to the layer below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Setting<T> {
    /// Use whatever the stored configuration says
    #[default]
    Inherit,
    Explicit(T),
}

impl<T> Setting<T> {
    pub fn explicit(self) -> Option<T> {
        match self {
            Setting::Inherit => None,
            Setting::Explicit(v) => Some(v),
        }
    }
}

/// Resolve one option: explicit override, then stored value, then default
pub fn resolve<T>(override_value: Option<T>, stored: Option<T>, fallback: T) -> T {
    override_value.or(stored).unwrap_or(fallback)
}

/// Fully resolved options for one widget
///
/// Immutable for the widget's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// 12-hour clock with day period marker
    pub format12: bool,
    /// Show seconds in digital mode
    pub seconds: bool,
    /// Show the date line in digital mode
    pub show_date: bool,
    /// Sweep the second hand continuously in analog mode
    pub smooth: bool,
    /// Show the zone-name element
    pub show_tz: bool,
    /// Canvas edge in pixels, clamped to `MIN_SIZE..=MAX_SIZE`
    pub size: u32,
    pub label_position: LabelPosition,
    /// Follow the viewer's zone instead of the configured one
    pub user_time: bool,
    /// Locale tag for digital formatting, e.g. `en_US`
    pub locale: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            format12: false,
            seconds: true,
            show_date: false,
            smooth: false,
            show_tz: true,
            size: DEFAULT_SIZE,
            label_position: LabelPosition::Above,
            user_time: false,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ClockConfig {
    /// Parse bundle text; malformed or absent text yields the defaults
    pub fn from_bundle_text(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::from_bundle(&map),
            Ok(other) => {
                log::warn!("Configuration bundle is not an object ({}), using defaults", other);
                Self::default()
            }
            Err(e) => {
                log::warn!("Malformed configuration bundle ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Coerce a parsed bundle field by field
    pub fn from_bundle(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        let format12 = match map.get("format") {
            Some(v) => matches!(text_of(v).as_deref(), Some("12")),
            None => flag(map.get("format12"), defaults.format12),
        };

        Self {
            format12,
            seconds: flag(map.get("seconds"), defaults.seconds),
            show_date: flag(map.get("show_date"), defaults.show_date),
            smooth: flag(map.get("smooth"), defaults.smooth),
            show_tz: flag(map.get("show_tz"), defaults.show_tz),
            size: map.get("size").and_then(number_of).map_or(defaults.size, clamp_size),
            label_position: map
                .get("label_position")
                .and_then(text_of)
                .map_or(defaults.label_position, |s| LabelPosition::parse(&s)),
            user_time: flag(map.get("user_time"), defaults.user_time),
            locale: map
                .get("locale")
                .and_then(text_of)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.locale),
        }
    }

    /// Wire form written into markup, readable by [`ClockConfig::from_bundle_text`]
    pub fn to_bundle(&self) -> Value {
        let bit = |b: bool| Value::String(if b { "1" } else { "0" }.to_string());
        let mut map = Map::new();
        map.insert(
            "format".to_string(),
            Value::String(if self.format12 { "12" } else { "24" }.to_string()),
        );
        map.insert("seconds".to_string(), bit(self.seconds));
        map.insert("show_date".to_string(), bit(self.show_date));
        map.insert("size".to_string(), Value::String(self.size.to_string()));
        map.insert("smooth".to_string(), bit(self.smooth));
        map.insert(
            "label_position".to_string(),
            Value::String(self.label_position.as_str().to_string()),
        );
        map.insert("show_tz".to_string(), bit(self.show_tz));
        map.insert("user_time".to_string(), bit(self.user_time));
        map.insert("locale".to_string(), Value::String(self.locale.clone()));
        Value::Object(map)
    }
}

/// Clamp a requested canvas edge into the accepted range
pub fn clamp_size(size: i64) -> u32 {
    size.clamp(MIN_SIZE as i64, MAX_SIZE as i64) as u32
}

/// Lenient boolean: `true`/`false`, `"1"`/`"0"`, `1`/`0`; anything else keeps the default
fn flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.trim() {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => default,
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => true,
            Some(0) => false,
            _ => default,
        },
        _ => default,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
