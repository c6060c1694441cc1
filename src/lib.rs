#![cfg_attr(not(test), no_std)]

pub mod blink;
pub mod clock;
pub mod fixed;
pub mod led;
pub mod regs;
pub mod report;
pub mod timing;

#[cfg(target_arch = "avr")]
pub mod board;
#[cfg(not(target_arch = "avr"))]
pub mod sim;
#[cfg(target_arch = "avr")]
pub mod usart;

#[cfg(target_arch = "avr")]
pub use attiny_hal as hal;
