//! Clock embedding
//!
//! Turns a stored clock record plus per-embed overrides into the widget
//! markup the controller later discovers: a wrapper carrying the
//! configuration bundle, a clock element carrying kind and zone, and the
//! hooks for the chosen display.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tzclock_core::markup::{
    BUNDLE_ATTR, CANVAS_CLASS, CANVAS_TAG, CLOCK_CLASS, DATE_CLASS, DIGITAL_CLASS, KIND_ATTR,
    LABEL_CLASS, TIME_CLASS, TIME_PLACEHOLDER, WRAP_CLASS, ZONE_ATTR, ZONE_NAME_CLASS,
    label_position_class,
};
use tzclock_core::{
    ClockConfig, DisplayKind, LOCAL_SENTINEL, LabelPosition, Setting, clamp_size,
    config::{DEFAULT_LOCALE, DEFAULT_SIZE},
    resolve,
};

use crate::dom::{Document, NodeId};
use crate::error::EmbedError;

/// A configured clock as stored by the site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockRecord {
    #[serde(default)]
    pub label: String,
    /// IANA zone name, unchecked
    #[serde(default)]
    pub tz: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: DisplayKind,
    #[serde(default, deserialize_with = "lenient_position")]
    pub label_position: LabelPosition,
    #[serde(default = "default_true", deserialize_with = "lenient_show")]
    pub show_tz: bool,
    /// Follow the viewer's zone instead of `tz`
    #[serde(default, deserialize_with = "lenient_opt_in")]
    pub user_time: bool,
}

impl ClockRecord {
    pub fn new(label: impl Into<String>, tz: impl Into<String>, kind: DisplayKind) -> Self {
        Self {
            label: label.into(),
            tz: tz.into(),
            kind,
            label_position: LabelPosition::Above,
            show_tz: true,
            user_time: false,
        }
    }

    pub fn with_label_position(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }
}

/// Options given where a clock is embedded
///
/// `Inherit` fields fall back to the stored record; the remaining fields
/// only exist per embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOverrides {
    pub kind: Setting<DisplayKind>,
    pub label_position: Setting<LabelPosition>,
    pub show_tz: Setting<bool>,
    pub user_time: Setting<bool>,
    pub format12: bool,
    pub seconds: bool,
    pub show_date: bool,
    /// Requested canvas edge, clamped when the config is built
    pub size: i64,
    pub smooth: bool,
    pub locale: Option<String>,
}

impl Default for EmbedOverrides {
    fn default() -> Self {
        Self {
            kind: Setting::Inherit,
            label_position: Setting::Inherit,
            show_tz: Setting::Inherit,
            user_time: Setting::Inherit,
            format12: false,
            seconds: true,
            show_date: false,
            size: DEFAULT_SIZE as i64,
            smooth: false,
            locale: None,
        }
    }
}

/// Display kind after applying the override
pub fn effective_kind(record: &ClockRecord, overrides: &EmbedOverrides) -> DisplayKind {
    resolve(overrides.kind.explicit(), Some(record.kind), DisplayKind::Analog)
}

/// Configuration bundle for one embedded clock
pub fn build_config(record: &ClockRecord, overrides: &EmbedOverrides) -> ClockConfig {
    ClockConfig {
        format12: overrides.format12,
        seconds: overrides.seconds,
        show_date: overrides.show_date,
        smooth: overrides.smooth,
        show_tz: resolve(overrides.show_tz.explicit(), Some(record.show_tz), true),
        size: clamp_size(overrides.size),
        label_position: resolve(
            overrides.label_position.explicit(),
            Some(record.label_position),
            LabelPosition::Above,
        ),
        user_time: resolve(overrides.user_time.explicit(), Some(record.user_time), false),
        locale: overrides
            .locale
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
    }
}

/// Build the markup for clock `id` (1-based) and append it to `parent`
///
/// Ids below 1 are treated as 1. Returns the widget root.
pub fn mount_clock(
    doc: &mut Document,
    parent: NodeId,
    records: &[ClockRecord],
    id: i64,
    overrides: &EmbedOverrides,
) -> Result<NodeId, EmbedError> {
    let id = id.max(1);
    let record = usize::try_from(id - 1)
        .ok()
        .and_then(|index| records.get(index))
        .ok_or(EmbedError::ClockNotFound(id))?;

    let kind = effective_kind(record, overrides);
    let config = build_config(record, overrides);
    let tz = if config.user_time {
        LOCAL_SENTINEL
    } else {
        record.tz.as_str()
    };

    let root = doc.create_element("div");
    doc.add_class(root, WRAP_CLASS);
    doc.add_class(root, &label_position_class(config.label_position));
    doc.set_attribute(root, BUNDLE_ATTR, &config.to_bundle().to_string());

    let clock_el = doc.create_element("div");
    doc.add_class(clock_el, CLOCK_CLASS);
    doc.set_attribute(clock_el, KIND_ATTR, kind.as_str());
    doc.set_attribute(clock_el, ZONE_ATTR, tz);
    doc.append_child(root, clock_el);

    let has_label = !record.label.is_empty();
    if has_label && config.label_position == LabelPosition::Above {
        append_label(doc, clock_el, &record.label);
    }

    match kind {
        DisplayKind::Analog => {
            let canvas = doc.create_element(CANVAS_TAG);
            doc.add_class(canvas, CANVAS_CLASS);
            let edge = config.size.to_string();
            doc.set_attribute(canvas, "width", &edge);
            doc.set_attribute(canvas, "height", &edge);
            let name = if has_label { record.label.as_str() } else { "Clock" };
            doc.set_attribute(canvas, "aria-label", &format!("{} analog clock", name));
            doc.append_child(clock_el, canvas);
        }
        DisplayKind::Digital => {
            let digital = doc.create_element("div");
            doc.add_class(digital, DIGITAL_CLASS);

            let time = doc.create_element("div");
            doc.add_class(time, TIME_CLASS);
            doc.set_attribute(time, "aria-live", "polite");
            doc.set_text(time, TIME_PLACEHOLDER);
            doc.append_child(digital, time);

            let date = doc.create_element("div");
            doc.add_class(date, DATE_CLASS);
            doc.set_hidden(date, true);
            doc.append_child(digital, date);

            doc.append_child(clock_el, digital);
        }
    }

    if has_label && config.label_position == LabelPosition::Below {
        append_label(doc, clock_el, &record.label);
    }

    let zone_el = doc.create_element("div");
    doc.add_class(zone_el, ZONE_NAME_CLASS);
    doc.set_text(zone_el, tz);
    doc.append_child(clock_el, zone_el);

    doc.append_child(parent, root);

    log::debug!(
        "Mounted clock {} ({} '{}', zone '{}')",
        id,
        kind.as_str(),
        record.label,
        tz
    );
    Ok(root)
}

fn append_label(doc: &mut Document, clock_el: NodeId, label: &str) {
    let el = doc.create_element("div");
    doc.add_class(el, LABEL_CLASS);
    doc.set_text(el, label);
    doc.append_child(clock_el, el);
}

fn default_true() -> bool {
    true
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        _ => String::new(),
    }
}

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<DisplayKind, D::Error> {
    Ok(DisplayKind::parse(&text_value(&Value::deserialize(d)?)))
}

fn lenient_position<'de, D: Deserializer<'de>>(d: D) -> Result<LabelPosition, D::Error> {
    Ok(LabelPosition::parse(&text_value(&Value::deserialize(d)?)))
}

/// On unless explicitly `"0"`
fn lenient_show<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(text_value(&Value::deserialize(d)?) != "0")
}

/// Off unless explicitly `"1"`
fn lenient_opt_in<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(text_value(&Value::deserialize(d)?) == "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Selector;

    fn records() -> Vec<ClockRecord> {
        vec![
            ClockRecord::new("London", "Europe/London", DisplayKind::Analog),
            ClockRecord::new("", "Asia/Tokyo", DisplayKind::Digital)
                .with_label_position(LabelPosition::Below),
        ]
    }

    #[test]
    fn test_record_normalization() {
        let record: ClockRecord = serde_json::from_str(
            r#"{"label":"X","tz":"UTC","type":"sundial","label_position":"left","show_tz":"0","user_time":"yes"}"#,
        )
        .unwrap();
        assert_eq!(record.kind, DisplayKind::Analog);
        assert_eq!(record.label_position, LabelPosition::Above);
        assert!(!record.show_tz);
        assert!(!record.user_time);

        let bare: ClockRecord = serde_json::from_str("{}").unwrap();
        assert!(bare.show_tz);
        assert!(!bare.user_time);
        assert_eq!(bare.tz, "");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let record = ClockRecord::new("", "UTC", DisplayKind::Digital);
        let overrides = EmbedOverrides {
            kind: Setting::Explicit(DisplayKind::Analog),
            show_tz: Setting::Explicit(false),
            size: 5000,
            ..Default::default()
        };
        assert_eq!(effective_kind(&record, &overrides), DisplayKind::Analog);
        let cfg = build_config(&record, &overrides);
        assert!(!cfg.show_tz);
        assert_eq!(cfg.size, 600);
        assert_eq!(cfg.locale, "en_US");

        let inherited = build_config(&record, &EmbedOverrides::default());
        assert!(inherited.show_tz);
        assert_eq!(effective_kind(&record, &EmbedOverrides::default()), DisplayKind::Digital);
    }

    #[test]
    fn test_mount_analog_skeleton() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = mount_clock(&mut doc, body, &records(), 1, &EmbedOverrides::default()).unwrap();

        assert!(doc.has_class(root, WRAP_CLASS));
        assert!(doc.has_class(root, "tzc-label-above"));
        let clock_el = doc.query(root, &Selector::class(CLOCK_CLASS)).unwrap();
        assert_eq!(doc.attribute(clock_el, KIND_ATTR), Some("analog"));
        assert_eq!(doc.attribute(clock_el, ZONE_ATTR), Some("Europe/London"));

        let children = doc.children(clock_el).to_vec();
        assert_eq!(children.len(), 3);
        assert!(doc.has_class(children[0], LABEL_CLASS));
        assert_eq!(doc.text(children[0]), "London");
        assert_eq!(doc.tag(children[1]), "canvas");
        assert_eq!(doc.attribute(children[1], "width"), Some("160"));
        assert_eq!(
            doc.attribute(children[1], "aria-label"),
            Some("London analog clock")
        );
        assert!(doc.has_class(children[2], ZONE_NAME_CLASS));
        assert_eq!(doc.text(children[2]), "Europe/London");

        let bundle = ClockConfig::from_bundle_text(doc.attribute(root, BUNDLE_ATTR));
        assert_eq!(bundle, build_config(&records()[0], &EmbedOverrides::default()));
    }

    #[test]
    fn test_mount_digital_skeleton() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = mount_clock(&mut doc, body, &records(), 2, &EmbedOverrides::default()).unwrap();
        assert!(doc.has_class(root, "tzc-label-below"));

        let time = doc.query(root, &Selector::class(TIME_CLASS)).unwrap();
        assert_eq!(doc.text(time), "--:--");
        let date = doc.query(root, &Selector::class(DATE_CLASS)).unwrap();
        assert!(doc.is_hidden(date));
        // Empty label renders no label element
        assert!(doc.query(root, &Selector::class(LABEL_CLASS)).is_none());
    }

    #[test]
    fn test_user_time_writes_local_sentinel() {
        let mut doc = Document::new();
        let body = doc.body();
        let overrides = EmbedOverrides {
            user_time: Setting::Explicit(true),
            ..Default::default()
        };
        let root = mount_clock(&mut doc, body, &records(), 1, &overrides).unwrap();
        let clock_el = doc.query(root, &Selector::class(CLOCK_CLASS)).unwrap();
        assert_eq!(doc.attribute(clock_el, ZONE_ATTR), Some("local"));
        let zone_el = doc.query(root, &Selector::class(ZONE_NAME_CLASS)).unwrap();
        assert_eq!(doc.text(zone_el), "local");
    }

    #[test]
    fn test_clock_ids() {
        let mut doc = Document::new();
        let body = doc.body();
        let defaults = EmbedOverrides::default();

        let root = mount_clock(&mut doc, body, &records(), -4, &defaults).unwrap();
        let clock_el = doc.query(root, &Selector::class(CLOCK_CLASS)).unwrap();
        assert_eq!(doc.attribute(clock_el, ZONE_ATTR), Some("Europe/London"));

        assert_eq!(
            mount_clock(&mut doc, body, &records(), 3, &defaults),
            Err(EmbedError::ClockNotFound(3))
        );
        assert_eq!(
            mount_clock(&mut doc, body, &[], 1, &defaults),
            Err(EmbedError::ClockNotFound(1))
        );
    }
}
