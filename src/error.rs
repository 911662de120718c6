//! Error taxonomy for the visible-light configuration receiver.
//!
//! Every fallible operation in this crate returns [`Error`] through the
//! crate's [`Result`] alias. Errors are cheap, `Copy` values: nothing here
//! allocates or borrows, so they can be reported from an ISR context without
//! extra bookkeeping.

use thiserror::Error;

/// Convenience alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong while recovering bits, decoding symbols, or
/// parsing the CBOR payload of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The physical coding sublayer lost carrier lock while a frame was in
    /// progress (`RECEIVING`).
    #[error("loss of signal during frame reception")]
    Los,

    /// The receive buffer filled up before an EOF delimiter arrived.
    #[error("receive buffer overflowed")]
    Overflow,

    /// The buffer ran out of bytes before a multi-byte item could be fully
    /// read.
    #[error("buffer ended before the expected item was fully read")]
    UnexpectedEof,

    /// Bytes remained in the buffer after the declared map entries were all
    /// consumed.
    #[error("extra bytes after the declared map was fully read")]
    ExtraBytes,

    /// The trailing CRC-32 did not match the computed checksum.
    #[error("CRC-32 mismatch on received frame")]
    BadCrc,

    /// A CBOR initial byte's short count fell outside the definite-length
    /// profile this decoder supports (24..=27 for multi-byte lengths, 20/21
    /// for booleans).
    #[error("CBOR short count outside the supported profile")]
    BadShortCount,

    /// A CBOR major type outside {UINT, NEGINT, BYTE_STR, TEXT_STR, MAP,
    /// BOOLEAN} was encountered where this decoder requires one of those.
    #[error("CBOR major type outside the supported profile")]
    UnsupportedType,

    /// The top-level map declared more entries than this receiver supports.
    #[error("map has more entries than the receiver supports")]
    TooManyEntries,

    /// A map key was longer than [`crate::consts::MAX_KEY_LEN`].
    #[error("map key longer than the supported maximum")]
    KeyTooLong,

    /// A map key did not match any field descriptor supplied by the caller.
    #[error("map key did not match any field descriptor")]
    KeyNotFound,

    /// A map key was not encoded as a CBOR text string.
    #[error("map key was not a text string")]
    KeyTypeMismatch,

    /// A value's CBOR major type did not match its field descriptor's type.
    #[error("value type did not match the field descriptor")]
    ValueTypeMismatch,

    /// A value would not fit in its field descriptor's buffer.
    #[error("value too large for the field descriptor's buffer")]
    ValueTooLong,

    /// An integer value could not be represented in the field descriptor's
    /// declared signedness (e.g. a negative value for an unsigned field).
    #[error("integer value out of range for the field descriptor")]
    ValueOutOfRange,

    /// An integer or boolean field descriptor's buffer was not exactly 1, 2,
    /// 4, or 8 bytes.
    #[error("field descriptor buffer size is not 1, 2, 4, or 8 bytes")]
    BuffSizeMismatch,

    /// A symbol other than EOF or a data byte arrived while `RECEIVING`.
    #[error("expected a data byte or EOF delimiter but received another symbol")]
    EofExpected,
}
