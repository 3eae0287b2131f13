//! Clock backed by the embassy time driver

use embassy_time::{block_for, Duration, Instant};
use hotend_hal::Clock;

/// Monotonic microsecond clock
///
/// Needs the `time-driver` feature of embassy-rp.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}
