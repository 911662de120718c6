//! Types shared between the clock/data recovery, line-coding, and decoder
//! stages.
//!
//! These are plain value records, not shared mutable state: each stage
//! produces one of these per tick and hands it to the next stage by value.
//! See [`crate::receiver::Receiver::tick`] for how they're threaded together.

/// Output of one [`crate::cdr::ClockDataRecovery::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CdrOutput {
    /// Whether the clock/data recovery stage currently considers a usable
    /// optical signal to be present.
    pub signal_detected: bool,
    /// Whether this tick produced a new recovered bit.
    pub rxed: bool,
    /// The recovered bit, valid only when `rxed` is true.
    pub bit: bool,
}

/// State of the physical coding sublayer's symbol-alignment state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PcsState {
    /// No symbol alignment; waiting for a SYNC control symbol.
    #[default]
    Los,
    /// One SYNC symbol seen; waiting for a second to confirm alignment.
    RxedSync1,
    /// Two consecutive SYNC symbols seen; waiting for SOF.
    RxedSync2,
    /// SOF delimiter received; a frame has started.
    RxedSof,
    /// At least one data byte received since SOF.
    RxedByte,
    /// EOF delimiter received; the frame is complete.
    RxedEof,
}

/// A byte-level event emitted by the physical coding sublayer.
///
/// SOF and EOF are carried as tagged variants here rather than as reserved
/// byte values, so a data byte can never collide with a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxByte {
    /// One decoded payload byte.
    Data(u8),
    /// Start-of-frame delimiter.
    Sof,
    /// End-of-frame delimiter.
    Eof,
}

/// Output of one [`crate::pcs::PhysicalCodingSublayer::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcsOutput {
    /// Current alignment state, for diagnostics.
    pub state: PcsState,
    /// Whether this tick produced a new byte-level event.
    pub rxed: bool,
    /// The event, present only when `rxed` is true.
    pub byte: Option<RxByte>,
}

/// Lifecycle state of a frame as tracked by [`crate::decoder::Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Waiting for SOF; no frame in progress.
    #[default]
    Idle,
    /// Between SOF and EOF; accumulating frame bytes.
    Receiving,
    /// The most recent frame was decoded successfully.
    Completed,
    /// The most recent frame failed; the receiver stays here until `init`.
    Error,
}

/// CBOR major type, as encoded in the top 3 bits of an item's initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    /// Major type 0: unsigned integer.
    Uint,
    /// Major type 1: negative integer.
    NegInt,
    /// Major type 2: byte string.
    ByteStr,
    /// Major type 3: text string.
    TextStr,
    /// Major type 4: array. Not accepted as a value by this decoder.
    Array,
    /// Major type 5: map.
    Map,
    /// Major type 6: tag. Not accepted as a value by this decoder.
    Tag,
    /// Major type 7: simple value or float. Only booleans are accepted.
    SimpleOrFloat,
}

impl MajorType {
    pub(crate) fn from_initial_byte(ib: u8) -> Self {
        match ib >> 5 {
            0 => MajorType::Uint,
            1 => MajorType::NegInt,
            2 => MajorType::ByteStr,
            3 => MajorType::TextStr,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tag,
            _ => MajorType::SimpleOrFloat,
        }
    }
}
