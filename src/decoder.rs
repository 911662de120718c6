//! Frame lifecycle and CBOR map decoding.
//!
//! A [`Decoder`] accumulates bytes between a SOF and EOF delimiter into an
//! [`RxBuff`], then on EOF validates the trailing CRC-32 and walks a
//! definite-length CBOR map, writing each matched key's value into the
//! caller-supplied [`FieldDescriptor`].

use crate::common::{DecoderState, MajorType, PcsOutput, RxByte};
use crate::consts::{MAX_ENTRY_COUNT, MAX_KEY_LEN};
use crate::descriptor::{FieldDescriptor, FieldType};
use crate::error::{Error, Result};
use crate::rxbuff::RxBuff;

/// Decodes one CBOR-framed configuration update at a time into a
/// caller-supplied descriptor table, sized for `N` bytes of frame buffer.
#[derive(Debug)]
pub struct Decoder<const N: usize> {
    buff: RxBuff<N>,
    state: DecoderState,
}

impl<const N: usize> Default for Decoder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Decoder<N> {
    /// Creates a decoder in the `Idle` state with an empty buffer.
    pub fn new() -> Self {
        Self {
            buff: RxBuff::new(),
            state: DecoderState::Idle,
        }
    }

    /// Resets the decoder and clears every descriptor's received state.
    ///
    /// Call this once before first use and again any time the descriptor
    /// table changes, or to discard a frame in progress.
    pub fn init(&mut self, descriptors: &mut [FieldDescriptor]) {
        self.buff.init();
        self.state = DecoderState::Idle;
        for d in descriptors.iter_mut() {
            d.clear();
        }
    }

    /// Current frame lifecycle state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Advances the frame lifecycle by one physical-layer event.
    ///
    /// On success, descriptors matched in a completed frame are left with
    /// `was_received() == true`. On error, the state becomes `Error` and
    /// any descriptors already written during the failed frame retain their
    /// partial values.
    pub fn update(&mut self, pcs_out: PcsOutput, descriptors: &mut [FieldDescriptor]) -> Result<()> {
        let result = self.advance(pcs_out, descriptors);
        if result.is_err() {
            self.state = DecoderState::Error;
        }
        result
    }

    fn advance(&mut self, pcs_out: PcsOutput, descriptors: &mut [FieldDescriptor]) -> Result<()> {
        match self.state {
            DecoderState::Idle => {
                if pcs_out.rxed && pcs_out.byte == Some(RxByte::Sof) {
                    self.buff.init();
                    self.state = DecoderState::Receiving;
                }
                Ok(())
            }
            DecoderState::Receiving => {
                if pcs_out.state == crate::common::PcsState::Los {
                    return Err(Error::Los);
                }
                if pcs_out.rxed {
                    match pcs_out.byte {
                        Some(RxByte::Eof) => {
                            self.complete(descriptors)?;
                            self.state = DecoderState::Completed;
                        }
                        Some(RxByte::Data(b)) => {
                            self.buff.push(b)?;
                        }
                        Some(RxByte::Sof) | None => {
                            return Err(Error::EofExpected);
                        }
                    }
                }
                Ok(())
            }
            DecoderState::Completed | DecoderState::Error => Ok(()),
        }
    }

    fn complete(&mut self, descriptors: &mut [FieldDescriptor]) -> Result<()> {
        self.buff.check_and_remove_crc()?;

        let (major, param) = self.buff.read_item_header()?;
        if major != MajorType::Map {
            return Err(Error::UnsupportedType);
        }
        if param as usize > MAX_ENTRY_COUNT {
            return Err(Error::TooManyEntries);
        }

        for _ in 0..param {
            let (kmajor, klen) = self.buff.read_item_header()?;
            if kmajor != MajorType::TextStr {
                return Err(Error::KeyTypeMismatch);
            }
            if klen as usize > MAX_KEY_LEN {
                return Err(Error::KeyTooLong);
            }
            let mut key_buf = [0u8; MAX_KEY_LEN];
            let klen = klen as usize;
            self.buff.pop_into(&mut key_buf[..klen])?;

            let idx = descriptors
                .iter()
                .position(|d| d.key().as_bytes() == &key_buf[..klen])
                .ok_or(Error::KeyNotFound)?;
            self.read_value(&mut descriptors[idx])?;
        }

        if self.buff.remaining() != 0 {
            return Err(Error::ExtraBytes);
        }

        Ok(())
    }

    fn read_value(&mut self, entry: &mut FieldDescriptor) -> Result<()> {
        let (major, param) = self.buff.read_item_header()?;

        match major {
            MajorType::TextStr | MajorType::ByteStr => {
                let is_text = major == MajorType::TextStr;
                let expected = if is_text {
                    FieldType::TextStr
                } else {
                    FieldType::ByteStr
                };
                if entry.field_type() != expected {
                    return Err(Error::ValueTypeMismatch);
                }
                let len = param as usize;
                let required = if is_text { len + 1 } else { len };
                if required > entry.capacity() {
                    return Err(Error::ValueTooLong);
                }
                self.buff.pop_into(&mut entry.buffer_mut()[..len])?;
                if is_text {
                    entry.buffer_mut()[len] = 0;
                }
                entry.set_received(required);
            }
            MajorType::Uint | MajorType::NegInt => {
                if entry.field_type() != FieldType::Uint && entry.field_type() != FieldType::Int {
                    return Err(Error::ValueTypeMismatch);
                }
                if entry.field_type() == FieldType::Uint && major == MajorType::NegInt {
                    return Err(Error::ValueOutOfRange);
                }
                if entry.field_type() == FieldType::Int && (param & (1u64 << 63)) != 0 {
                    return Err(Error::ValueOutOfRange);
                }
                let value: u64 = if major == MajorType::NegInt { !param } else { param };
                let capacity = entry.capacity();
                if !matches!(capacity, 1 | 2 | 4 | 8) {
                    return Err(Error::BuffSizeMismatch);
                }
                let width = required_width(param);
                if width > capacity {
                    return Err(Error::ValueTooLong);
                }
                write_int(entry.buffer_mut(), value, capacity);
                entry.set_received(capacity);
            }
            MajorType::SimpleOrFloat => {
                if entry.field_type() != FieldType::Boolean {
                    return Err(Error::ValueTypeMismatch);
                }
                if entry.capacity() != 1 {
                    return Err(Error::BuffSizeMismatch);
                }
                entry.buffer_mut()[0] = if param == 21 { 1 } else { 0 };
                entry.set_received(1);
            }
            MajorType::Array | MajorType::Map | MajorType::Tag => {
                return Err(Error::UnsupportedType);
            }
        }
        Ok(())
    }
}

fn required_width(param: u64) -> usize {
    if param <= 0xFF {
        1
    } else if param <= 0xFFFF {
        2
    } else if param <= 0xFFFF_FFFF {
        4
    } else {
        8
    }
}

fn write_int(buffer: &mut [u8], value: u64, capacity: usize) {
    match capacity {
        1 => buffer[..1].copy_from_slice(&(value as u8).to_ne_bytes()),
        2 => buffer[..2].copy_from_slice(&(value as u16).to_ne_bytes()),
        4 => buffer[..4].copy_from_slice(&(value as u32).to_ne_bytes()),
        8 => buffer[..8].copy_from_slice(&value.to_ne_bytes()),
        _ => unreachable!("capacity validated by caller"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PcsState;
    use crate::primitives::crc32;

    fn sof() -> PcsOutput {
        PcsOutput {
            state: PcsState::RxedSof,
            rxed: true,
            byte: Some(RxByte::Sof),
        }
    }

    fn data(b: u8) -> PcsOutput {
        PcsOutput {
            state: PcsState::RxedByte,
            rxed: true,
            byte: Some(RxByte::Data(b)),
        }
    }

    fn eof() -> PcsOutput {
        PcsOutput {
            state: PcsState::RxedEof,
            rxed: true,
            byte: Some(RxByte::Eof),
        }
    }

    fn feed_frame<const N: usize>(
        decoder: &mut Decoder<N>,
        descriptors: &mut [FieldDescriptor],
        body: &[u8],
    ) -> Result<()> {
        let crc = crc32(body);
        decoder.update(sof(), descriptors)?;
        for &b in body {
            decoder.update(data(b), descriptors)?;
        }
        for b in crc.to_be_bytes() {
            decoder.update(data(b), descriptors)?;
        }
        decoder.update(eof(), descriptors)
    }

    #[test]
    fn test_minimal_frame_matches_reference_crc_bytes() {
        // {"a":1} -> A1 61 61 01, CRC-32 (IEEE) trailer EC D7 4E B2.
        let body = [0xA1, 0x61, 0x61, 0x01];
        assert_eq!(crc32(&body).to_be_bytes(), [0xEC, 0xD7, 0x4E, 0xB2]);
    }

    #[test]
    fn test_minimal_frame_decodes_uint() {
        // {"a":1}
        let body = [0xA1, 0x61, 0x61, 0x01];
        let mut n = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut n, FieldType::Uint)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);

        feed_frame(&mut decoder, &mut descriptors, &body).unwrap();

        assert_eq!(decoder.state(), DecoderState::Completed);
        assert!(descriptors[0].was_received());
        assert_eq!(descriptors[0].value(), &[1]);
    }

    #[test]
    fn test_text_string_value_is_null_terminated() {
        // {"t":"hi"}
        let body = [0xA1, 0x61, 0x74, 0x62, b'h', b'i'];
        let mut buf = [0u8; 4];
        let mut descriptors = [FieldDescriptor::new("t", &mut buf, FieldType::TextStr)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);

        feed_frame(&mut decoder, &mut descriptors, &body).unwrap();

        assert_eq!(descriptors[0].value(), b"hi\0");
    }

    #[test]
    fn test_unknown_key_is_key_not_found() {
        let body = [0xA1, 0x61, 0x7A, 0x01]; // {"z":1}
        let mut n = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut n, FieldType::Uint)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);

        let err = feed_frame(&mut decoder, &mut descriptors, &body).unwrap_err();
        assert_eq!(err, Error::KeyNotFound);
        assert_eq!(decoder.state(), DecoderState::Error);
    }

    #[test]
    fn test_corrupted_crc_is_bad_crc() {
        let body = [0xA1, 0x61, 0x61, 0x01];
        let mut n = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut n, FieldType::Uint)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);

        decoder.update(sof(), &mut descriptors).unwrap();
        for &b in &body {
            decoder.update(data(b), &mut descriptors).unwrap();
        }
        for b in [0u8, 0, 0, 0] {
            decoder.update(data(b), &mut descriptors).unwrap();
        }
        let err = decoder.update(eof(), &mut descriptors).unwrap_err();
        assert_eq!(err, Error::BadCrc);
    }

    #[test]
    fn test_loss_of_signal_mid_frame_is_los() {
        let mut n = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut n, FieldType::Uint)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);

        decoder.update(sof(), &mut descriptors).unwrap();
        let los = PcsOutput {
            state: PcsState::Los,
            rxed: false,
            byte: None,
        };
        let err = decoder.update(los, &mut descriptors).unwrap_err();
        assert_eq!(err, Error::Los);
        assert_eq!(decoder.state(), DecoderState::Error);
    }

    #[test]
    fn test_boolean_value() {
        // {"l":true}
        let body = [0xA1, 0x61, 0x6C, 0xF5];
        let mut b = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("l", &mut b, FieldType::Boolean)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);

        feed_frame(&mut decoder, &mut descriptors, &body).unwrap();

        assert_eq!(descriptors[0].value(), &[1]);
    }

    #[test]
    fn test_init_clears_previous_reception() {
        let body = [0xA1, 0x61, 0x61, 0x01];
        let mut n = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut n, FieldType::Uint)];
        let mut decoder: Decoder<32> = Decoder::new();
        decoder.init(&mut descriptors);
        feed_frame(&mut decoder, &mut descriptors, &body).unwrap();
        assert!(descriptors[0].was_received());

        decoder.init(&mut descriptors);
        assert!(!descriptors[0].was_received());
        assert_eq!(decoder.state(), DecoderState::Idle);
    }
}
