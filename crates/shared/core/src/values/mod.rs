mod geometry;

pub use geometry::{Font, LineCap, Point, Rgba, Stroke, TextAlign};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Literal that selects the observer's own zone
pub const LOCAL_SENTINEL: &str = "local";

/// Time zone a widget is bound to
///
/// Named identifiers are not validated here; validity is discovered when
/// the zone is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ZoneId {
    /// The observer's local zone
    #[default]
    Local,
    /// An IANA zone name such as `Europe/Athens`
    Named(String),
}

impl ZoneId {
    /// Parse an attribute value; only `""` and `"local"` mean local
    ///
    /// Anything else is kept verbatim, so a padded name such as `" UTC "`
    /// fails at resolution like any other unknown zone.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == LOCAL_SENTINEL {
            ZoneId::Local
        } else {
            ZoneId::Named(raw.to_string())
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ZoneId::Local)
    }

    /// Value as written into markup
    pub fn as_attr(&self) -> &str {
        match self {
            ZoneId::Local => LOCAL_SENTINEL,
            ZoneId::Named(name) => name,
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// Wall-clock reading for one instant in one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedTime {
    /// 0..=23
    pub hour: u32,
    /// 0..=59
    pub minute: u32,
    /// 0..=59
    pub second: u32,
    /// 0..=999
    pub millisecond: u32,
}

impl ResolvedTime {
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Seconds value driving the second hand
    ///
    /// With smoothing the milliseconds are folded in, otherwise the hand
    /// sits on the whole second.
    pub fn seconds_value(&self, smooth: bool) -> f64 {
        if smooth {
            self.second as f64 + self.millisecond as f64 / 1000.0
        } else {
            self.second as f64
        }
    }
}

/// Which renderer a widget uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    #[default]
    Analog,
    Digital,
}

impl DisplayKind {
    /// Anything other than `digital` is analog
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("digital") {
            DisplayKind::Digital
        } else {
            DisplayKind::Analog
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayKind::Analog => "analog",
            DisplayKind::Digital => "digital",
        }
    }
}

/// Where the label sits relative to the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Above,
    Below,
}

impl LabelPosition {
    /// Anything other than `below` is above
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("below") {
            LabelPosition::Below
        } else {
            LabelPosition::Above
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelPosition::Above => "above",
            LabelPosition::Below => "below",
        }
    }
}
