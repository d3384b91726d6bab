//! Structural hooks shared by the embedder and the widget controller

/// Class on every widget root
pub const WRAP_CLASS: &str = "tzc-wrap";
/// Attribute on the root carrying the configuration bundle
pub const BUNDLE_ATTR: &str = "data-tzc";
/// Class of the element carrying kind and zone
pub const CLOCK_CLASS: &str = "tzc-clock";
pub const KIND_ATTR: &str = "data-kind";
pub const ZONE_ATTR: &str = "data-tz";

pub const LABEL_CLASS: &str = "tzc-label";
/// Zone-name display element
pub const ZONE_NAME_CLASS: &str = "tzc-tz";
pub const CANVAS_CLASS: &str = "tzc-canvas";
pub const CANVAS_TAG: &str = "canvas";
pub const DIGITAL_CLASS: &str = "tzc-digital";
pub const TIME_CLASS: &str = "tzc-time";
pub const DATE_CLASS: &str = "tzc-date";

/// Text shown in place of the time when the zone cannot be resolved
pub const INVALID_ZONE_TEXT: &str = "Invalid timezone";
/// Initial digital text before the first tick
pub const TIME_PLACEHOLDER: &str = "--:--";

/// Modifier class on the root reflecting the label position
pub fn label_position_class(position: crate::LabelPosition) -> String {
    format!("tzc-label-{}", position.as_str())
}
