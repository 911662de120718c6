/// Declares a static global `RECEIVER` singleton protected by a
/// `critical_section` mutex.
///
/// # Arguments
/// - `$n`: The buffer capacity `N` of the [`crate::receiver::Receiver`].
///
/// # Example
/// ```rust
/// vlcfg::init_receiver!(64);
/// ```
#[macro_export]
macro_rules! init_receiver {
    ( $n:literal ) => {
        pub static RECEIVER: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::receiver::Receiver<$n>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Installs a fresh [`crate::receiver::Receiver`] into the global `RECEIVER`
/// singleton and initializes the descriptor table.
///
/// # Example
/// ```rust
/// # vlcfg::init_receiver!(64);
/// # use vlcfg::descriptor::{FieldDescriptor, FieldType};
/// # let mut buf = [0u8; 1];
/// # let mut descriptors = [FieldDescriptor::new("a", &mut buf, FieldType::Uint)];
/// vlcfg::setup_receiver!(descriptors);
/// ```
///
/// # Notes
/// - Must be called inside a `critical_section`-aware context (safe in `main()`).
/// - Requires `init_receiver!` to have been used earlier.
#[macro_export]
macro_rules! setup_receiver {
    ( $descriptors:ident ) => {
        $crate::critical_section::with(|cs| {
            let mut receiver = $crate::receiver::Receiver::new();
            receiver.init(&mut $descriptors);
            RECEIVER.borrow(cs).replace(Some(receiver));
        });
    };
}

/// Feeds one sample through the global `RECEIVER` if it has been set up.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let sample = read_adc();
///     tick_receiver!(sample, descriptors);
/// }
/// ```
///
/// # Notes
/// - This macro assumes `RECEIVER` was declared with `init_receiver!` and
///   initialized via `setup_receiver!`.
/// - Safe to call repeatedly: silently does nothing if the receiver hasn't
///   been set up yet.
#[macro_export]
macro_rules! tick_receiver {
    ( $sample:expr, $descriptors:ident ) => {
        $crate::critical_section::with(|cs| {
            if let Some(receiver) = RECEIVER.borrow(cs).borrow_mut().as_mut() {
                Some(receiver.tick($sample, &mut $descriptors))
            } else {
                None
            }
        })
    };
}
