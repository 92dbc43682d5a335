//! Shared fixtures for task tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that advances by one second on every reading, making
/// strictly-increasing timestamp assertions deterministic.
pub(crate) struct SteppedClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppedClock {
    pub(crate) fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().expect("clock state should be lockable");
        let reading = *now;
        *now = reading + Duration::seconds(1);
        reading
    }
}

/// Fixed starting point for stepped clocks.
pub(crate) fn clock_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}
