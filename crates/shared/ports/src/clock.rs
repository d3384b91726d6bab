use tzclock_core::Timestamp;

/// Port for time abstraction
///
/// This allows the widgets to use different instant sources:
/// - Real system time for production
/// - Controllable time (scaled, frozen, advanced) for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
