//! tzclock Core Domain
//!
//! Pure domain types for the clock widgets: zone identifiers, resolved
//! wall-clock readings, the configuration bundle and the drawing values
//! shared by renderers and surfaces.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod config;
pub mod markup;
pub mod values;

// Re-export commonly used types at crate root
pub use config::{ClockConfig, Setting, clamp_size, resolve};
pub use values::{
    DisplayKind, Font, LOCAL_SENTINEL, LabelPosition, LineCap, Point, ResolvedTime, Rgba, Stroke,
    TextAlign, Timestamp, ZoneId,
};
