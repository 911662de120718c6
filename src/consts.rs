//! Constants used across the visible-light configuration link.
//!
//! This module defines the protocol-wide constants used for sample timing,
//! line coding, and the CBOR field-decoding profile.
//!
//! ## Key Concepts
//!
//! - **Timing**: One bit period is divided into [`SAMPLES_PER_BIT`] ticks; the
//!   clock/data recovery stage averages amplitude over [`ADC_AVE_PERIOD`] ticks.
//! - **Line coding**: Each byte is split into two 4-bit nibbles, each carried as
//!   a 5-bit 4B/5B symbol. [`SYMBOL_BITS`] is the width of one symbol.
//! - **CBOR profile**: [`MAX_KEY_LEN`] and [`MAX_ENTRY_COUNT`] bound the
//!   definite-length map the decoder will accept.

/// Number of ticks per bit period.
///
/// The clock/data recovery stage samples this many times per bit and tracks
/// which of these phases best aligns with a data edge.
pub const SAMPLES_PER_BIT: u16 = 10;

/// Width, in bits, of one 4B/5B line-coding symbol.
pub const SYMBOL_BITS: u8 = 5;

/// Number of ADC sample bits the amplitude-detection window assumes.
///
/// Used only to size the amplitude-detection hysteresis
/// (`1 << (ADC_BITS - 6)`); the sample value itself is carried in a `u16`.
pub const ADC_BITS: u8 = 12;

/// Number of ticks over which clock/data recovery averages sample amplitude
/// and decides whether a usable optical signal is present.
pub const ADC_AVE_PERIOD: u16 = SAMPLES_PER_BIT * SYMBOL_BITS as u16 * 2;

/// Number of ticks of stable amplitude detection required before the
/// receiver reports the signal as present.
pub const SIGNAL_DETECT_PERIOD: u16 = SAMPLES_PER_BIT * 4;

/// Maximum length, in bytes, of a CBOR map key accepted by the decoder.
pub const MAX_KEY_LEN: usize = 16;

/// Maximum number of entries in the top-level CBOR map accepted by the
/// decoder, and the maximum number of field descriptors a caller may supply.
pub const MAX_ENTRY_COUNT: usize = 32;

/// Default byte capacity of the receive buffer, sized for a handful of short
/// fields plus CBOR framing overhead.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;
