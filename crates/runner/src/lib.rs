//! tzclock Runner - live clock widgets
//!
//! Hosts clock widgets inside an in-memory document and keeps them live:
//!
//! - **Embed**: builds widget markup from stored clock records
//! - **Bootstrap**: discovers widget roots once the document is ready
//! - **Controller**: one independent widget, from init to teardown
//! - **Schedule**: frame-driven or whole-second-aligned repaints
//! - **Teardown**: stops a widget when its root leaves the document
//!
//! ## Architecture
//!
//! ```text
//!   PageConfig ──► mount_clock ──► Document (roots + bundles)
//!                                      │ ready
//!                                      ▼
//!                               ┌──────────────┐
//!                               │ Bootstrapper │
//!                               └──────┬───────┘
//!                                      │ one per root
//!                ┌─────────────────────┼─────────────────────┐
//!                ▼                     ▼                     ▼
//!        ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//!        │  Controller  │      │  Controller  │      │  Controller  │
//!        │  (Aligned)   │      │  (Frame)     │      │  (Aligned)   │
//!        └──────┬───────┘      └──────┬───────┘      └──────┬───────┘
//!               │ tick                │ tick                │ tick
//!               ▼                     ▼                     ▼
//!        digital text          analog canvas        "Invalid timezone"
//!
//!   Document mutations ──► removal watcher per widget ──► cancel
//! ```

pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod dom;
pub mod embed;
pub mod error;
pub mod schedule;
pub mod teardown;

// Re-export main types
pub use bootstrap::Bootstrapper;
pub use config::{EmbedConfig, PageConfig};
pub use controller::{WidgetController, WidgetHandle};
pub use dom::{Document, NodeId, Selector, SharedDocument};
pub use embed::{ClockRecord, EmbedOverrides, build_config, effective_kind, mount_clock};
pub use error::{ConfigError, EmbedError, Result};
pub use schedule::{DEFAULT_FRAME_INTERVAL, Schedule};
pub use teardown::watch_removal;
