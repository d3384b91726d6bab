//! Widget Controller - one clock widget's lifecycle
//!
//! ```text
//!   init ──► schedule (Frame | Aligned) ──► tick ──► tick ──► ...
//!    │                                        │
//!    │  static DOM adjustments                ├─ resolve zone
//!    │  (zone name, date visibility)          ├─ digital text / analog face
//!    │                                        └─ InvalidZone → fallback display
//!    ▼
//!   removal watcher ── root detached ──► cancel ──► loop exits, no more ticks
//! ```
//!
//! Each controller only touches its own markup subtree and keeps no state
//! shared with other widgets.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tzclock_core::markup::{
    BUNDLE_ATTR, CANVAS_TAG, CLOCK_CLASS, DATE_CLASS, INVALID_ZONE_TEXT, KIND_ATTR, TIME_CLASS,
    ZONE_ATTR, ZONE_NAME_CLASS,
};
use tzclock_core::{ClockConfig, DisplayKind, Timestamp, ZoneId};
use tzclock_ports::{Clock, Surface, ZoneError};
use tzclock_render::{AnalogRenderer, DigitalFormatter, local_zone_name, resolve_time};

use crate::dom::{NodeId, Selector, SharedDocument};
use crate::schedule::Schedule;
use crate::teardown::watch_removal;

/// Controller for one widget root
pub struct WidgetController {
    /// Identifier used in log messages
    name: String,
    doc: SharedDocument,
    root: NodeId,
    /// Element carrying kind and zone; all hooks are looked up under it
    clock_el: NodeId,
    kind: DisplayKind,
    zone: ZoneId,
    config: ClockConfig,
    clock: Arc<dyn Clock>,
    /// Built on the first successful digital tick, then reused
    formatter: Option<DigitalFormatter>,
    analog: AnalogRenderer,
    frame_interval: Duration,
    /// Invalid zones are logged once, not on every tick
    invalid_logged: bool,
}

impl WidgetController {
    /// Read configuration and hooks under `root` and apply the one-time DOM adjustments
    ///
    /// Returns `None` when the root has no clock element; such a root is
    /// left untouched.
    pub fn init(
        name: impl Into<String>,
        doc: SharedDocument,
        root: NodeId,
        clock: Arc<dyn Clock>,
        frame_interval: Duration,
    ) -> Option<Self> {
        let name = name.into();

        let (clock_el, kind, zone, config) = {
            let mut page = doc.write();

            let config = ClockConfig::from_bundle_text(page.attribute(root, BUNDLE_ATTR));

            let Some(clock_el) = page.query(root, &Selector::class(CLOCK_CLASS)) else {
                log::debug!("[{}] No clock element under root, skipping", name);
                return None;
            };

            let kind = DisplayKind::parse(page.attribute(clock_el, KIND_ATTR).unwrap_or(""));
            let zone = ZoneId::parse(page.attribute(clock_el, ZONE_ATTR).unwrap_or(""));

            if let Some(zone_el) = page.query(clock_el, &Selector::class(ZONE_NAME_CLASS)) {
                page.set_displayed(zone_el, config.show_tz);
                if config.show_tz && zone.is_local() {
                    page.set_text(zone_el, &local_zone_name());
                }
            }

            if let Some(date_el) = page.query(clock_el, &Selector::class(DATE_CLASS)) {
                page.set_hidden(date_el, !config.show_date);
            }

            (clock_el, kind, zone, config)
        };

        log::debug!(
            "[{}] Initialized {} clock for zone '{}' ({:?})",
            name,
            kind.as_str(),
            zone,
            config
        );

        Some(Self {
            name,
            doc,
            root,
            clock_el,
            kind,
            analog: AnalogRenderer::new(config.smooth),
            zone,
            config,
            clock,
            formatter: None,
            frame_interval,
            invalid_logged: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DisplayKind {
        self.kind
    }

    pub fn zone(&self) -> &ZoneId {
        &self.zone
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Strategy this widget runs with
    pub fn schedule(&self) -> Schedule {
        Schedule::for_widget(self.kind, self.config.smooth, self.frame_interval)
    }

    /// Whether the root is still part of the document
    pub fn is_attached(&self) -> bool {
        self.doc.read().is_connected(self.root)
    }

    /// Repaint once for the clock's current instant
    pub fn tick(&mut self) {
        let now = self.clock.now();
        log::trace!("[{}] tick at {}", self.name, now);
        match self.kind {
            DisplayKind::Digital => self.tick_digital(now),
            DisplayKind::Analog => self.tick_analog(now),
        }
    }

    fn tick_digital(&mut self, now: Timestamp) {
        let doc = self.doc.clone();
        let mut page = doc.write();

        let Some(time_el) = page.query(self.clock_el, &Selector::class(TIME_CLASS)) else {
            return;
        };
        let date_el = page.query(self.clock_el, &Selector::class(DATE_CLASS));

        if self.formatter.is_none() {
            match DigitalFormatter::new(&self.zone, &self.config) {
                Ok(formatter) => self.formatter = Some(formatter),
                Err(e) => self.report_invalid(&e),
            }
        }

        match &self.formatter {
            Some(formatter) => {
                let reading = formatter.format(now);
                page.set_text(time_el, &reading.time);
                if let (true, Some(date_el)) = (self.config.show_date, date_el) {
                    page.set_text(date_el, &reading.date);
                }
            }
            None => {
                page.set_text(time_el, INVALID_ZONE_TEXT);
                if let Some(date_el) = date_el {
                    page.set_text(date_el, "");
                }
            }
        }
    }

    fn tick_analog(&mut self, now: Timestamp) {
        let resolved = resolve_time(&self.zone, now);
        let renderer = self.analog;

        let doc = self.doc.clone();
        let mut page = doc.write();

        let Some(canvas_el) = page.query(self.clock_el, &Selector::tag(CANVAS_TAG)) else {
            return;
        };
        let Some(surface) = page.canvas_mut(canvas_el) else {
            return;
        };

        match resolved {
            Ok(time) => {
                let size = surface.width();
                renderer.paint(surface, size, &time);
            }
            Err(e) => {
                renderer.paint_error(surface, INVALID_ZONE_TEXT);
                drop(page);
                self.report_invalid(&e);
            }
        }
    }

    fn report_invalid(&mut self, error: &ZoneError) {
        if !self.invalid_logged {
            log::warn!("[{}] {}; showing fallback display", self.name, error);
            self.invalid_logged = true;
        }
    }

    /// Spawn the schedule and the removal watcher
    pub fn start(self) -> WidgetHandle {
        let cancel = CancellationToken::new();
        let name = self.name.clone();
        let root = self.root;

        let watcher = tokio::spawn(watch_removal(
            self.doc.clone(),
            root,
            cancel.clone(),
            name.clone(),
        ));
        let task = tokio::spawn(self.run(cancel.clone()));

        WidgetHandle {
            name,
            root,
            cancel,
            task,
            watcher,
        }
    }

    async fn run(mut self, cancel: CancellationToken) {
        let schedule = self.schedule();
        log::info!(
            "[{}] Widget started ({} clock, zone '{}', {:?})",
            self.name,
            self.kind.as_str(),
            self.zone,
            schedule
        );

        let clock = self.clock.clone();
        let token = cancel.clone();
        schedule
            .run(clock, cancel, || {
                if !self.is_attached() {
                    token.cancel();
                    return false;
                }
                self.tick();
                true
            })
            .await;

        log::info!("[{}] Widget stopped", self.name);
    }
}

/// Handle to a running widget
pub struct WidgetHandle {
    name: String,
    root: NodeId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    watcher: JoinHandle<()>,
}

impl WidgetHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Stop the widget; calling this more than once is a no-op
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the scheduling loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the scheduling loop and the watcher to exit
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            log::error!("[{}] Widget task failed: {}", self.name, e);
        }
        if let Err(e) = self.watcher.await {
            log::error!("[{}] Removal watcher failed: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::embed::{ClockRecord, EmbedOverrides, mount_clock};
    use chrono::{TimeZone, Utc};
    use tzclock_clock::WorldClock;
    use tzclock_core::Setting;
    use tzclock_render::DrawOp;

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap()
    }

    fn page_with(record: ClockRecord, overrides: EmbedOverrides) -> (SharedDocument, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let root = mount_clock(&mut doc, body, &[record], 1, &overrides).unwrap();
        doc.mark_ready();
        (doc.into_shared(), root)
    }

    fn controller(doc: &SharedDocument, root: NodeId) -> WidgetController {
        let clock: Arc<dyn Clock> = WorldClock::new(Some(start()));
        WidgetController::init("widget-1", doc.clone(), root, clock, Duration::from_millis(16))
            .unwrap()
    }

    fn text_of(doc: &SharedDocument, root: NodeId, class: &str) -> String {
        let page = doc.read();
        let el = page.query(root, &Selector::class(class)).unwrap();
        page.text(el).to_string()
    }

    #[test]
    fn test_digital_tick_writes_time() {
        let (doc, root) = page_with(
            ClockRecord::new("UTC clock", "UTC", DisplayKind::Digital),
            EmbedOverrides::default(),
        );
        let mut widget = controller(&doc, root);
        assert_eq!(widget.schedule(), Schedule::Aligned);

        widget.tick();
        assert_eq!(text_of(&doc, root, TIME_CLASS), "14:05:09");
    }

    #[test]
    fn test_digital_date_visibility_and_text() {
        let overrides = EmbedOverrides {
            format12: true,
            seconds: false,
            show_date: true,
            ..Default::default()
        };
        let (doc, root) = page_with(
            ClockRecord::new("", "UTC", DisplayKind::Digital),
            overrides,
        );
        let mut widget = controller(&doc, root);
        {
            let page = doc.read();
            let date_el = page.query(root, &Selector::class(DATE_CLASS)).unwrap();
            assert!(!page.is_hidden(date_el));
        }

        widget.tick();
        assert_eq!(text_of(&doc, root, TIME_CLASS), "02:05 PM");
        assert_eq!(text_of(&doc, root, DATE_CLASS), "01 Mar 2024");
    }

    #[test]
    fn test_date_hidden_by_default() {
        let (doc, root) = page_with(
            ClockRecord::new("", "UTC", DisplayKind::Digital),
            EmbedOverrides::default(),
        );
        let _widget = controller(&doc, root);
        let page = doc.read();
        let date_el = page.query(root, &Selector::class(DATE_CLASS)).unwrap();
        assert!(page.is_hidden(date_el));
    }

    #[test]
    fn test_digital_invalid_zone_fallback() {
        let overrides = EmbedOverrides {
            show_date: true,
            ..Default::default()
        };
        let (doc, root) = page_with(
            ClockRecord::new("", "Not/AZone", DisplayKind::Digital),
            overrides,
        );
        let mut widget = controller(&doc, root);
        widget.tick();
        widget.tick();
        assert_eq!(text_of(&doc, root, TIME_CLASS), "Invalid timezone");
        assert_eq!(text_of(&doc, root, DATE_CLASS), "");
    }

    #[test]
    fn test_analog_tick_paints_face() {
        let (doc, root) = page_with(
            ClockRecord::new("", "Europe/Athens", DisplayKind::Analog),
            EmbedOverrides::default(),
        );
        let mut widget = controller(&doc, root);
        widget.tick();

        let page = doc.read();
        let canvas = page.query(root, &Selector::tag(CANVAS_TAG)).unwrap();
        let surface = page.canvas(canvas).unwrap();
        assert_eq!(surface.ops().len(), 65);
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn test_analog_invalid_zone_fallback() {
        let (doc, root) = page_with(
            ClockRecord::new("", "Not/AZone", DisplayKind::Analog),
            EmbedOverrides::default(),
        );
        let mut widget = controller(&doc, root);
        widget.tick();

        let page = doc.read();
        let canvas = page.query(root, &Selector::tag(CANVAS_TAG)).unwrap();
        let surface = page.canvas(canvas).unwrap();
        assert_eq!(surface.ops().len(), 1);
        assert!(matches!(&surface.ops()[0], DrawOp::Text { text, .. } if text == "Invalid timezone"));
    }

    #[test]
    fn test_local_zone_name_shown() {
        let overrides = EmbedOverrides {
            user_time: Setting::Explicit(true),
            show_tz: Setting::Explicit(true),
            ..Default::default()
        };
        let (doc, root) = page_with(
            ClockRecord::new("Here", "Asia/Tokyo", DisplayKind::Digital),
            overrides,
        );
        let widget = controller(&doc, root);
        assert!(widget.zone().is_local());

        let page = doc.read();
        let zone_el = page.query(root, &Selector::class(ZONE_NAME_CLASS)).unwrap();
        assert!(page.is_displayed(zone_el));
        assert!(!page.text(zone_el).is_empty());
        assert_ne!(page.text(zone_el), "local");
    }

    #[test]
    fn test_zone_name_hidden_when_disabled() {
        let overrides = EmbedOverrides {
            show_tz: Setting::Explicit(false),
            ..Default::default()
        };
        let (doc, root) = page_with(
            ClockRecord::new("", "UTC", DisplayKind::Analog),
            overrides,
        );
        let _widget = controller(&doc, root);
        let page = doc.read();
        let zone_el = page.query(root, &Selector::class(ZONE_NAME_CLASS)).unwrap();
        assert!(!page.is_displayed(zone_el));
    }

    #[test]
    fn test_root_without_clock_element_is_skipped() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create_element("div");
        doc.append_child(body, root);
        let doc = doc.into_shared();
        let clock: Arc<dyn Clock> = WorldClock::new(Some(start()));
        assert!(WidgetController::init("w", doc, root, clock, Duration::from_millis(16)).is_none());
    }

    #[test]
    fn test_smooth_analog_uses_frames() {
        let overrides = EmbedOverrides {
            smooth: true,
            ..Default::default()
        };
        let (doc, root) = page_with(
            ClockRecord::new("", "UTC", DisplayKind::Analog),
            overrides,
        );
        let widget = controller(&doc, root);
        assert_eq!(
            widget.schedule(),
            Schedule::Frame {
                interval: Duration::from_millis(16)
            }
        );
    }
}
