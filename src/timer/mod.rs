//! Tick-scheduling helpers.
//!
//! The receiver itself has no notion of wall-clock time; it expects exactly
//! one [`crate::receiver::Receiver::tick`] call per sample period. This
//! module provides two ways to drive that call: a blocking delay loop
//! (`delay-loop` feature) or an interrupt-driven global singleton
//! (`timer-isr` feature, the default).
//!
//! Acquiring the sample itself (from an ADC, typically after
//! [`crate::primitives::median3`]-filtering three raw reads) is the
//! caller's responsibility in both cases.

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// Default link bit rate, in bits per second.
pub const BAUDRATE: u32 = 10;

/// Computes the sample period, in microseconds, for a given baud rate and
/// samples-per-bit setting.
pub const fn sample_period_us(baudrate: u32, samples_per_bit: u32) -> u32 {
    1_000_000 / (baudrate * samples_per_bit)
}
