//! tzclock Clock Infrastructure
//!
//! Instant sources for the widgets:
//!
//! - [`SystemClock`]: the host's wall clock
//! - [`WorldClock`]: starts at a chosen instant and follows the tokio
//!   clock, so paused-runtime tests move it deterministically
//!
//! ## Usage
//!
//! ```ignore
//! use tzclock_clock::{Clock, WorldClock};
//!
//! let clock = WorldClock::new(Some(start)); // 14:05:09 on the page
//! tokio::time::sleep(Duration::from_secs(1)).await;
//! assert_eq!(clock.now(), start + chrono::Duration::seconds(1));
//! ```

mod system;
mod world;

pub use system::SystemClock;
pub use world::WorldClock;

// Re-export the Clock trait for convenience
pub use tzclock_ports::Clock;
