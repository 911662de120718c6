//! Top-level receiver facade: composes clock/data recovery, the physical
//! coding sublayer, and the decoder behind a single `tick` entry point.

use crate::cdr::ClockDataRecovery;
use crate::common::{DecoderState, PcsState, RxByte};
use crate::consts::DEFAULT_BUFFER_CAPACITY;
use crate::decoder::Decoder;
use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::pcs::PhysicalCodingSublayer;

/// The full receive pipeline, parameterized by its frame buffer size `N`.
///
/// Use [`Receiver::new`] with the default `N` of
/// [`DEFAULT_BUFFER_CAPACITY`](crate::consts::DEFAULT_BUFFER_CAPACITY) bytes,
/// or name the type with a different `N` if your descriptor table needs
/// more or less room.
#[derive(Debug)]
pub struct Receiver<const N: usize = DEFAULT_BUFFER_CAPACITY> {
    cdr: ClockDataRecovery,
    pcs: PhysicalCodingSublayer,
    decoder: Decoder<N>,
    last_bit: bool,
    last_byte: Option<RxByte>,
}

impl<const N: usize> Default for Receiver<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Receiver<N> {
    /// Creates a receiver. Call [`Self::init`] with a descriptor table
    /// before the first tick.
    pub fn new() -> Self {
        Self {
            cdr: ClockDataRecovery::new(),
            pcs: PhysicalCodingSublayer::new(),
            decoder: Decoder::new(),
            last_bit: false,
            last_byte: None,
        }
    }

    /// Resets every pipeline stage and clears the descriptor table's
    /// received state.
    ///
    /// Call this once at startup and again any time the caller wants to
    /// discard an in-progress frame and start over (e.g. a manual restart),
    /// without needing to reconstruct the `Receiver`.
    pub fn init(&mut self, descriptors: &mut [FieldDescriptor]) {
        self.cdr.init();
        self.pcs.init();
        self.decoder.init(descriptors);
        self.last_bit = false;
        self.last_byte = None;
    }

    /// The single mutating entry point: feeds one 16-bit sample through
    /// clock/data recovery, symbol decoding, and frame decoding.
    ///
    /// Returns the decoder's error, if any, alongside its resulting state.
    /// Once a frame fails, the decoder stays in `Error` until the next
    /// [`Self::init`].
    pub fn tick(&mut self, sample: u16, descriptors: &mut [FieldDescriptor]) -> (Result<()>, DecoderState) {
        let cdr_out = self.cdr.update(sample);
        if cdr_out.rxed {
            self.last_bit = cdr_out.bit;
        }

        let pcs_out = self.pcs.update(cdr_out);
        if pcs_out.rxed {
            self.last_byte = pcs_out.byte;
        }

        let result = self.decoder.update(pcs_out, descriptors);
        (result, self.decoder.state())
    }

    /// Whether clock/data recovery currently considers a usable signal to be
    /// present.
    pub fn signal_detected(&self) -> bool {
        self.cdr.signal_detected()
    }

    /// Current physical coding sublayer alignment state.
    pub fn pcs_state(&self) -> PcsState {
        self.pcs.state()
    }

    /// Current frame decoder state.
    pub fn decoder_state(&self) -> DecoderState {
        self.decoder.state()
    }

    /// The most recently recovered bit.
    pub fn last_bit(&self) -> bool {
        self.last_bit
    }

    /// The most recently decoded byte-level event.
    pub fn last_byte(&self) -> Option<RxByte> {
        self.last_byte
    }
}
