//! Repaint scheduling
//!
//! One [`Schedule`] per widget, picked at init and never switched:
//!
//! - [`Schedule::Frame`]: repaint on every frame (smooth analog)
//! - [`Schedule::Aligned`]: repaint now, then on every whole-second
//!   boundary of the widget's clock; the delay is recomputed from the
//!   clock each time so drift never accumulates
//!
//! Both loops stop when the cancellation token fires or the tick callback
//! reports that the widget is gone. A new tick is only scheduled after the
//! previous one returned.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tzclock_core::{DisplayKind, Timestamp};
use tzclock_ports::Clock;

/// Default frame period (about 60 frames per second)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// How a widget is repainted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Every frame, uncapped apart from the frame period
    Frame { interval: Duration },
    /// Immediately, then at each whole second
    Aligned,
}

impl Schedule {
    /// Strategy for a widget: only smooth analog clocks are frame driven
    pub fn for_widget(kind: DisplayKind, smooth: bool, frame_interval: Duration) -> Self {
        if smooth && kind == DisplayKind::Analog {
            Schedule::Frame {
                interval: frame_interval.max(Duration::from_millis(1)),
            }
        } else {
            Schedule::Aligned
        }
    }

    /// Time left until the next whole second after `now` (1..=1000 ms)
    pub fn delay_until_next_second(now: Timestamp) -> Duration {
        let ms = u64::from(now.timestamp_subsec_millis().min(999));
        Duration::from_millis(1000 - ms)
    }

    /// Drive `tick` until cancelled or until it returns `false`
    pub async fn run<F>(self, clock: Arc<dyn Clock>, cancel: CancellationToken, mut tick: F)
    where
        F: FnMut() -> bool,
    {
        match self {
            Schedule::Frame { interval } => {
                let mut frames = tokio::time::interval(interval);
                frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = frames.tick() => {
                            if !tick() {
                                break;
                            }
                        }
                    }
                }
            }
            Schedule::Aligned => {
                if cancel.is_cancelled() || !tick() {
                    return;
                }

                loop {
                    let delay = Self::delay_until_next_second(clock.now());
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {
                            if !tick() {
                                break;
                            }
                        }
                    }
                }
            }
        }
    }
}
