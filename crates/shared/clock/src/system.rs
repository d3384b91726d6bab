use chrono::Utc;
use tzclock_core::Timestamp;
use tzclock_ports::Clock;

/// Host wall clock
///
/// Default instant source of the `tzclock` binary when the page does not
/// pin a start time. Readings are UTC; widgets convert them per zone.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
