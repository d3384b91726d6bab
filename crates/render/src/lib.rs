//! tzclock Render Pipeline
//!
//! The three leaf components of a clock widget:
//!
//! - **Zone Resolver** ([`zone`]): zone identifier + instant → wall-clock components
//! - **Digital Formatter** ([`digital`]): components → `time` / `date` strings
//! - **Analog Renderer** ([`analog`]): components → face, ticks and hands on a [`Surface`]
//!
//! plus [`DisplayList`], a recording [`Surface`] used by canvas nodes.
//!
//! [`Surface`]: tzclock_ports::Surface

pub mod analog;
pub mod digital;
pub mod display_list;
pub mod zone;

pub use analog::{AnalogRenderer, FaceGeometry, HandAngles};
pub use digital::{DigitalFormatter, DigitalParts, DigitalReading};
pub use display_list::{DisplayList, DrawOp};
pub use zone::{LOCAL_FALLBACK_NAME, ResolvedZone, local_zone_name, resolve_time};
