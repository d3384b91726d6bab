//! tzclock Ports
//!
//! Port definitions (traits) for the clock widgets.
//! These define the boundaries between rendering logic and its hosts:
//! where "now" comes from and what gets drawn on.

mod clock;
mod error;
mod surface;

pub use clock::Clock;
pub use error::{ZoneError, ZoneResult};
pub use surface::Surface;
