//! Bootstrap - widget discovery and startup
//!
//! Finds every widget root in the document once structural content is
//! ready and starts one independent controller per root. Roots added
//! later are not picked up.

use std::sync::Arc;
use std::time::Duration;
use tzclock_core::markup::{BUNDLE_ATTR, WRAP_CLASS};
use tzclock_ports::Clock;

use crate::controller::{WidgetController, WidgetHandle};
use crate::dom::{NodeId, Selector, SharedDocument};
use crate::schedule::DEFAULT_FRAME_INTERVAL;

/// Starts the widgets of one document
pub struct Bootstrapper {
    doc: SharedDocument,
    clock: Arc<dyn Clock>,
    frame_interval: Duration,
}

impl Bootstrapper {
    pub fn new(doc: SharedDocument, clock: Arc<dyn Clock>) -> Self {
        Self {
            doc,
            clock,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    /// Frame period for smooth analog widgets
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Widget roots currently in the document, in document order
    pub fn discover(&self) -> Vec<NodeId> {
        let page = self.doc.read();
        page.query_all(
            page.body(),
            &Selector::class(WRAP_CLASS).with_attr(BUNDLE_ATTR),
        )
    }

    /// Start a controller for every discovered root, without waiting
    pub fn start_all(&self) -> Vec<WidgetHandle> {
        let roots = self.discover();
        log::debug!("Discovered {} widget root(s)", roots.len());

        let handles: Vec<WidgetHandle> = roots
            .into_iter()
            .enumerate()
            .filter_map(|(i, root)| {
                WidgetController::init(
                    format!("widget-{}", i + 1),
                    self.doc.clone(),
                    root,
                    self.clock.clone(),
                    self.frame_interval,
                )
            })
            .map(WidgetController::start)
            .collect();

        log::info!("Started {} clock widget(s) using {}", handles.len(), self.clock.name());
        handles
    }

    /// Wait for structural readiness if needed, then start every widget
    pub async fn run(&self) -> Vec<WidgetHandle> {
        let mut ready = self.doc.read().subscribe_ready();
        if !*ready.borrow_and_update() {
            log::debug!("Document still loading, waiting for readiness");
            if ready.wait_for(|r| *r).await.is_err() {
                log::warn!("Document dropped before becoming ready");
                return Vec::new();
            }
        }
        self.start_all()
    }
}
