//! # vlcfg
//!
//! A portable, no_std Rust receiver for a visible-light configuration link:
//! a single photodiode sample per tick goes in, decoded CBOR field values
//! come out.
//!
//! The pipeline has three stages, each ported from a corresponding optical
//! link layer:
//! - [`cdr`]: clock/data recovery — tracks signal amplitude and edge phase
//!   to recover a bit per [`consts::SAMPLES_PER_BIT`] samples.
//! - [`pcs`]: physical coding sublayer — aligns to SYNC symbols and decodes
//!   4B/5B line code into bytes and frame delimiters.
//! - [`decoder`]: frame decoder — validates the trailing CRC-32 and parses a
//!   definite-length CBOR map into caller-supplied [`descriptor::FieldDescriptor`]s.
//!
//! [`receiver::Receiver`] composes all three behind a single
//! [`receiver::Receiver::tick`] call.
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for tick timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for tick timing |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use vlcfg::descriptor::{FieldDescriptor, FieldType};
//! use vlcfg::receiver::Receiver;
//!
//! fn main() {
//!     let mut name_buf = [0u8; 17];
//!     let mut count_buf = [0u8; 4];
//!     let mut descriptors = [
//!         FieldDescriptor::new("name", &mut name_buf, FieldType::TextStr),
//!         FieldDescriptor::new("count", &mut count_buf, FieldType::Uint),
//!     ];
//!
//!     let mut receiver: Receiver<64> = Receiver::new();
//!     receiver.init(&mut descriptors);
//!
//!     loop {
//!         let sample: u16 = 0; // read from an ADC at the configured sample rate
//!         let (_result, _state) = receiver.tick(sample, &mut descriptors);
//!         # break; // for doctest purposes
//!     }
//! }
//! ```
//!
//! Or, use [`timer::run_tick_loop`] with a `DelayNs` implementation:
//!
//! ```rust
//! use vlcfg::descriptor::{FieldDescriptor, FieldType};
//! use vlcfg::receiver::Receiver;
//! #[cfg(feature = "delay-loop")]
//! use vlcfg::timer::run_tick_loop;
//! # use embedded_hal_mock::eh1::delay::NoopDelay as Delay;
//!
//! fn main() {
//!     let mut count_buf = [0u8; 4];
//!     let mut descriptors = [FieldDescriptor::new("count", &mut count_buf, FieldType::Uint)];
//!     let mut receiver: Receiver<64> = Receiver::new();
//!     receiver.init(&mut descriptors);
//!
//! # #[cfg(feature = "delay-loop")]
//!     let mut delay = Delay::new();
//! # #[cfg(feature = "delay-loop")]
//!     let _ = run_tick_loop(&mut receiver, &mut descriptors, &mut || 0, &mut delay, 100);
//! }
//! ```
//!
//! ## Integration notes
//!
//! - The sample rate is [`consts::SAMPLES_PER_BIT`] times the link bit rate;
//!   see [`timer::sample_period_us`].
//! - Acquiring a sample (typically three ADC reads combined with
//!   [`primitives::median3`]) is always the caller's responsibility; this
//!   crate never touches a peripheral directly.
//! - Only one frame is decoded at a time. [`receiver::Receiver::tick`]
//!   returns [`common::DecoderState::Error`] on any failure, and the
//!   receiver stays there until [`receiver::Receiver::init`] is called again.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub mod cdr;
pub mod common;
pub mod consts;
pub mod decoder;
pub mod descriptor;
pub mod error;
pub mod pcs;
pub mod primitives;
pub mod receiver;
pub mod rxbuff;
pub mod timer;
