use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::time::Instant;
use tzclock_core::Timestamp;
use tzclock_ports::Clock;

/// Clock that starts at a chosen instant and then runs in real time
///
/// Elapsed time is read from the tokio clock. Under a paused runtime
/// (`start_paused = true`) it moves exactly as far as the runtime is
/// advanced, so whole-second alignment and teardown timing are
/// reproducible in tests. Pages use it to start their widgets at a fixed
/// time of day.
#[derive(Debug)]
pub struct WorldClock {
    /// Runtime instant the clock was created at
    origin: Instant,
    /// Reading at `origin`
    start: Timestamp,
}

impl WorldClock {
    /// Start at `initial_time`, or at the current wall time when `None`
    pub fn new(initial_time: Option<Timestamp>) -> Arc<Self> {
        Arc::new(Self {
            origin: Instant::now(),
            start: initial_time.unwrap_or_else(Utc::now),
        })
    }

    /// Reading the clock started from
    pub fn start(&self) -> Timestamp {
        self.start
    }
}

impl Clock for WorldClock {
    fn now(&self) -> Timestamp {
        let elapsed = Duration::from_std(self.origin.elapsed()).unwrap_or(Duration::MAX);
        self.start.checked_add_signed(elapsed).unwrap_or(self.start)
    }

    fn name(&self) -> &str {
        "WorldClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_world_clock_follows_runtime() {
        let clock = WorldClock::new(Some(start()));
        assert_eq!(clock.now(), start());
        assert_eq!(clock.start(), start());

        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        assert_eq!(clock.now() - start(), Duration::milliseconds(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_world_clock_never_runs_backwards() {
        let clock = WorldClock::new(Some(start()));
        let mut previous = clock.now();

        for step_ms in [1, 7, 999, 1000, 86_400_000] {
            tokio::time::sleep(std::time::Duration::from_millis(step_ms)).await;
            let now = clock.now();
            assert!(now >= previous, "clock went backwards: {} < {}", now, previous);
            assert!(now - previous >= Duration::milliseconds(step_ms as i64));
            previous = now;
        }
    }

    #[tokio::test]
    async fn test_default_start_is_wall_time() {
        let before = Utc::now();
        let clock = WorldClock::new(None);
        assert!(clock.now() >= before);
    }
}
