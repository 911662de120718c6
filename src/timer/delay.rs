use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::receiver::Receiver;
use embedded_hal::delay::DelayNs;

/// Runs one tick-and-delay step: samples via `sample_source`, feeds it
/// through `receiver`, then blocks for `period_us` microseconds.
///
/// Call this in your own `loop { }` when no timer interrupt is available.
/// `sample_source` typically reads the ADC three times and combines the
/// readings with [`crate::primitives::median3`] before returning.
pub fn run_tick_loop<const N: usize, D: DelayNs>(
    receiver: &mut Receiver<N>,
    descriptors: &mut [FieldDescriptor],
    sample_source: &mut impl FnMut() -> u16,
    delay: &mut D,
    period_us: u32,
) -> Result<()> {
    let sample = sample_source();
    let (result, _state) = receiver.tick(sample, descriptors);
    delay.delay_us(period_us);
    result
}
