//! Page configuration for the runner binary
//!
//! A page is a list of stored clock records plus the embeds that place
//! them. Embed attributes use the loose string forms of a shortcode
//! (`"config"`, `"1"`, `"0"`, `"12"`...) and are converted into typed
//! [`EmbedOverrides`] before mounting.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tzclock_core::{DisplayKind, LabelPosition, Setting, Timestamp};

use crate::embed::{ClockRecord, EmbedOverrides};
use crate::error::{ConfigError, Result};

/// Attribute value meaning "use the stored record"
pub const INHERIT: &str = "config";

/// Whole page: stored clocks, embeds and scheduler settings
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub clocks: Vec<ClockRecord>,
    #[serde(default)]
    pub embeds: Vec<EmbedConfig>,
    /// Frame period for smooth analog clocks
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Start a simulated clock at this instant instead of the system clock
    #[serde(default)]
    pub start_time: Option<Timestamp>,
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            clocks: Vec::new(),
            embeds: Vec::new(),
            frame_interval_ms: default_frame_interval_ms(),
            start_time: None,
        }
    }
}

impl PageConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Built-in page used when no file is given
    pub fn demo() -> Self {
        let clocks = vec![
            ClockRecord::new("UTC", "UTC", DisplayKind::Analog),
            ClockRecord::new("Athens", "Europe/Athens", DisplayKind::Digital),
            ClockRecord::new("Here", "", DisplayKind::Digital)
                .with_label_position(LabelPosition::Below),
            ClockRecord::new("Broken", "Not/AZone", DisplayKind::Digital),
            ClockRecord::new("Tokyo", "Asia/Tokyo", DisplayKind::Analog),
        ];

        let embeds = vec![
            EmbedConfig::for_clock(1),
            EmbedConfig {
                format: "12".to_string(),
                ..EmbedConfig::for_clock(2)
            },
            EmbedConfig {
                show_date: "1".to_string(),
                user_time: "1".to_string(),
                ..EmbedConfig::for_clock(3)
            },
            EmbedConfig::for_clock(4),
            EmbedConfig {
                smooth: "1".to_string(),
                size: "240".to_string(),
                ..EmbedConfig::for_clock(5)
            },
        ];

        Self {
            clocks,
            embeds,
            ..Default::default()
        }
    }
}

/// One embed, attribute values as written by a site author
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    /// `config`, `analog` or `digital`
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub kind: String,
    /// `config`, `above` or `below`
    #[serde(deserialize_with = "lenient_text")]
    pub label_position: String,
    /// `config`, `1` or `0`
    #[serde(deserialize_with = "lenient_text")]
    pub show_tz: String,
    /// `config`, `1` or `0`
    #[serde(deserialize_with = "lenient_text")]
    pub user_time: String,
    /// `24` or `12`
    #[serde(deserialize_with = "lenient_text")]
    pub format: String,
    #[serde(deserialize_with = "lenient_text")]
    pub seconds: String,
    #[serde(deserialize_with = "lenient_text")]
    pub show_date: String,
    /// Canvas edge, 80..600
    #[serde(deserialize_with = "lenient_text")]
    pub size: String,
    #[serde(deserialize_with = "lenient_text")]
    pub smooth: String,
    pub locale: Option<String>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self::for_clock(1)
    }
}

impl EmbedConfig {
    /// Embed of clock `id` with every attribute at its default
    pub fn for_clock(id: i64) -> Self {
        Self {
            id,
            kind: INHERIT.to_string(),
            label_position: INHERIT.to_string(),
            show_tz: INHERIT.to_string(),
            user_time: INHERIT.to_string(),
            format: "24".to_string(),
            seconds: "1".to_string(),
            show_date: "0".to_string(),
            size: "160".to_string(),
            smooth: "0".to_string(),
            locale: None,
        }
    }

    /// Typed overrides; unrecognized values fall back like their defaults
    pub fn overrides(&self) -> EmbedOverrides {
        let kind = match normalized(&self.kind).as_str() {
            "analog" => Setting::Explicit(DisplayKind::Analog),
            "digital" => Setting::Explicit(DisplayKind::Digital),
            _ => Setting::Inherit,
        };
        let label_position = match normalized(&self.label_position).as_str() {
            "above" => Setting::Explicit(LabelPosition::Above),
            "below" => Setting::Explicit(LabelPosition::Below),
            _ => Setting::Inherit,
        };

        EmbedOverrides {
            kind,
            label_position,
            show_tz: bit_setting(&self.show_tz),
            user_time: bit_setting(&self.user_time),
            format12: self.format.trim() == "12",
            seconds: self.seconds.trim() != "0",
            show_date: self.show_date.trim() == "1",
            size: leading_int(&self.size),
            smooth: self.smooth.trim() == "1",
            locale: self.locale.clone(),
        }
    }
}

/// Integer prefix of `raw` (`"240px"` is 240); no digits means 0
fn leading_int(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    if negative { -value } else { value }
}

fn normalized(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

fn bit_setting(raw: &str) -> Setting<bool> {
    match normalized(raw).as_str() {
        "1" => Setting::Explicit(true),
        "0" => Setting::Explicit(false),
        _ => Setting::Inherit,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => (if b { "1" } else { "0" }).to_string(),
        _ => String::new(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<i64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().unwrap_or(1),
        Value::String(s) => leading_int(&s),
        _ => 1,
    })
}
