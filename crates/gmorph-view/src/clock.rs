#![forbid(unsafe_code)]

//! Wall-clock delta source for host frame loops.

use std::time::Duration;
use web_time::Instant;

/// Measures the time between frames for hosts that do not track their
/// own deltas.
///
/// Call [`delta`](FrameClock::delta) once per frame and feed the result
/// to the view's `tick`. The first call returns the time since
/// construction.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Start the clock now.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time elapsed since the previous call (or construction).
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
