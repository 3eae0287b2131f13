//! Monotonic time source
//!
//! All timing in the core is expressed in microseconds since boot as a
//! `u64`, which does not wrap within the lifetime of a machine.

/// Monotonic clock with blocking delays
pub trait Clock {
    /// Microseconds since boot
    fn now_us(&self) -> u64;

    /// Milliseconds since boot
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Busy-wait for the given number of microseconds
    fn delay_us(&mut self, us: u32);

    /// Busy-wait for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}
