use chrono::{DateTime, Utc};
use droplet_core::Clock;

/// UTC wall clock; the default clock for production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
