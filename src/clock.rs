/// CPU clock frequency, in hertz.
pub const CLOCK_HZ: u32 = 16_000_000;

#[cfg(target_arch = "avr")]
pub use crate::hal::clock::Clock;

/// Board clock rate.
#[cfg(target_arch = "avr")]
pub type BoardClock = crate::hal::clock::MHz16;

#[cfg(target_arch = "avr")]
const _: () = assert!(<BoardClock as Clock>::FREQ == CLOCK_HZ);
