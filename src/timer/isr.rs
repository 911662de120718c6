use crate::common::DecoderState;
use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::receiver::Receiver;
use core::cell::RefCell;
use critical_section::Mutex;

/// Declares the empty global static a [`Receiver`] singleton is stored in.
///
/// # Example
/// ```rust
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use vlcfg::receiver::Receiver;
/// use vlcfg::timer::global_receiver_init;
///
/// static RECEIVER: Mutex<RefCell<Option<Receiver<64>>>> = global_receiver_init::<64>();
/// ```
pub const fn global_receiver_init<const N: usize>() -> Mutex<RefCell<Option<Receiver<N>>>> {
    Mutex::new(RefCell::new(None))
}

/// Constructs a [`Receiver`] and installs it into the global singleton,
/// resetting the descriptor table's received state.
///
/// # Example
/// ```rust
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use vlcfg::descriptor::{FieldDescriptor, FieldType};
/// use vlcfg::receiver::Receiver;
/// use vlcfg::timer::{global_receiver_init, global_receiver_setup};
///
/// static RECEIVER: Mutex<RefCell<Option<Receiver<64>>>> = global_receiver_init::<64>();
///
/// let mut buf = [0u8; 1];
/// let mut descriptors = [FieldDescriptor::new("a", &mut buf, FieldType::Uint)];
/// global_receiver_setup(&RECEIVER, &mut descriptors);
/// ```
pub fn global_receiver_setup<const N: usize>(
    global_receiver: &'static Mutex<RefCell<Option<Receiver<N>>>>,
    descriptors: &mut [FieldDescriptor],
) {
    critical_section::with(|cs| {
        let mut receiver = Receiver::new();
        receiver.init(descriptors);
        let _ = global_receiver.borrow(cs).replace(Some(receiver));
    });
}

/// Feeds one sample through the global [`Receiver`] if it has been set up.
///
/// Intended to be called from a timer ISR at the sample rate. Returns
/// `(Ok(()), DecoderState::Idle)` if the receiver hasn't been set up yet.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let sample = read_adc();
///     let (_result, _state) = global_receiver_tick(&RECEIVER, sample, &mut DESCRIPTORS);
/// }
/// ```
pub fn global_receiver_tick<const N: usize>(
    global_receiver: &'static Mutex<RefCell<Option<Receiver<N>>>>,
    sample: u16,
    descriptors: &mut [FieldDescriptor],
) -> (Result<()>, DecoderState) {
    critical_section::with(|cs| {
        if let Some(receiver) = global_receiver.borrow(cs).borrow_mut().as_mut() {
            receiver.tick(sample, descriptors)
        } else {
            (Ok(()), DecoderState::Idle)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldType;

    #[test]
    fn test_global_receiver_init_and_setup() {
        static RECEIVER: Mutex<RefCell<Option<Receiver<32>>>> = global_receiver_init::<32>();

        let mut buf = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut buf, FieldType::Uint)];
        global_receiver_setup(&RECEIVER, &mut descriptors);

        critical_section::with(|cs| {
            assert!(RECEIVER.borrow(cs).borrow().is_some());
        });
    }

    #[test]
    fn test_global_receiver_tick_without_setup_is_idle() {
        static RECEIVER: Mutex<RefCell<Option<Receiver<32>>>> = global_receiver_init::<32>();

        let mut buf = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut buf, FieldType::Uint)];
        let (result, state) = global_receiver_tick(&RECEIVER, 0, &mut descriptors);

        assert!(result.is_ok());
        assert_eq!(state, DecoderState::Idle);
    }

    #[test]
    fn test_global_receiver_tick_runs_after_setup() {
        static RECEIVER: Mutex<RefCell<Option<Receiver<32>>>> = global_receiver_init::<32>();

        let mut buf = [0u8; 1];
        let mut descriptors = [FieldDescriptor::new("a", &mut buf, FieldType::Uint)];
        global_receiver_setup(&RECEIVER, &mut descriptors);

        let (result, state) = global_receiver_tick(&RECEIVER, 0, &mut descriptors);
        assert!(result.is_ok());
        assert_eq!(state, DecoderState::Idle);
    }
}
