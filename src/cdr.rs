//! Clock/data recovery: turns a stream of raw samples into a stream of bits.
//!
//! One [`ClockDataRecovery`] tracks amplitude, a hysteresis threshold, and
//! which of the [`SAMPLES_PER_BIT`](crate::consts::SAMPLES_PER_BIT) phases
//! within a bit period best aligns with a data edge, then emits one bit each
//! time the tick counter reaches that phase.

use crate::common::CdrOutput;
use crate::consts::{ADC_AVE_PERIOD, ADC_BITS, SAMPLES_PER_BIT, SIGNAL_DETECT_PERIOD};
use crate::primitives::log2_q12;

/// Recovers a bit clock and bit stream from raw light-intensity samples.
#[derive(Debug, Clone)]
pub struct ClockDataRecovery {
    amp_det: bool,
    sig_det_count: u16,
    sig_det: bool,
    adc_sum_value: u32,
    adc_sum_count: u16,
    adc_max_value: u16,
    adc_min_value: u16,
    adc_ave: u16,
    last_digital_level: bool,
    phase: u16,
    sample_phase: u16,
    edge_level: [u16; SAMPLES_PER_BIT as usize],
}

impl Default for ClockDataRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockDataRecovery {
    /// Creates a new recovery state, equivalent to calling [`Self::init`] on
    /// a freshly zeroed instance.
    pub fn new() -> Self {
        Self {
            amp_det: false,
            sig_det_count: 0,
            sig_det: false,
            adc_sum_value: 0,
            adc_sum_count: 0,
            adc_max_value: 0,
            adc_min_value: 9999,
            adc_ave: 2048,
            last_digital_level: false,
            phase: 0,
            sample_phase: SAMPLES_PER_BIT * 3 / 4,
            edge_level: [0; SAMPLES_PER_BIT as usize],
        }
    }

    /// Resets recovery state between frames or link sessions.
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Whether the last call to [`Self::update`] considered a usable signal
    /// to be present.
    pub fn signal_detected(&self) -> bool {
        self.sig_det
    }

    /// Feeds one raw sample in and returns the recovered bit, if any.
    pub fn update(&mut self, sample: u16) -> CdrOutput {
        self.adc_sum_count += 1;
        let sd_trig = self.adc_sum_count >= ADC_AVE_PERIOD;
        if sd_trig {
            self.adc_sum_count = 0;
        }

        if sample > self.adc_max_value {
            self.adc_max_value = sample;
        }
        if sample < self.adc_min_value {
            self.adc_min_value = sample;
        }
        if sd_trig {
            self.amp_det =
                self.adc_max_value.saturating_sub(self.adc_min_value) >= (1 << (ADC_BITS - 6));
            self.adc_max_value = sample;
            self.adc_min_value = sample;
        }

        let los = !self.amp_det;

        let sample_lg2 = log2_q12(sample);

        self.adc_sum_value += sample_lg2 as u32;
        if sd_trig {
            self.adc_ave = (self.adc_sum_value / ADC_AVE_PERIOD as u32) as u16;
            self.adc_sum_value = 0;
        }

        let thresh: i32 = self.adc_ave as i32 + if !self.last_digital_level { 0x100 } else { -0x100 };

        let digital_level = sample_lg2 as i32 >= thresh;
        let edge = digital_level != self.last_digital_level;
        self.last_digital_level = digital_level;

        let phase_idx = self.phase as usize;
        if edge {
            if self.edge_level[phase_idx] < SAMPLES_PER_BIT * 2 {
                self.edge_level[phase_idx] += SAMPLES_PER_BIT;
            }
        } else if self.edge_level[phase_idx] > 0 {
            self.edge_level[phase_idx] -= 1;
        }

        if edge {
            let mut max_level = 0u16;
            let mut max_phase = 0u16;
            for (i, &level) in self.edge_level.iter().enumerate() {
                if level > max_level {
                    max_level = level;
                    max_phase = i as u16;
                }
            }
            self.sample_phase = (max_phase + SAMPLES_PER_BIT / 2) % SAMPLES_PER_BIT;
        }

        if los {
            self.sig_det_count = 0;
            self.sig_det = false;
        } else if self.sig_det_count < SIGNAL_DETECT_PERIOD {
            self.sig_det_count += 1;
            self.sig_det = false;
        } else {
            self.sig_det = true;
        }

        let mut rxed = false;
        let mut bit = false;
        if self.sig_det && self.phase == self.sample_phase {
            rxed = true;
            bit = digital_level;
        }

        self.phase = if self.phase < SAMPLES_PER_BIT - 1 {
            self.phase + 1
        } else {
            0
        };

        CdrOutput {
            signal_detected: self.sig_det,
            rxed,
            bit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn feed_carrier(cdr: &mut ClockDataRecovery, bits: &[bool], samples_per_bit: u16) -> Vec<CdrOutput> {
        let mut out = Vec::new();
        for &bit in bits {
            let level: u16 = if bit { 3000 } else { 200 };
            for _ in 0..samples_per_bit {
                out.push(cdr.update(level));
            }
        }
        out
    }

    #[test]
    fn test_new_defaults() {
        let cdr = ClockDataRecovery::new();
        assert!(!cdr.signal_detected());
    }

    #[test]
    fn test_no_amplitude_never_detects_signal() {
        let mut cdr = ClockDataRecovery::new();
        let outputs = feed_carrier(&mut cdr, &[false; 40], SAMPLES_PER_BIT);
        assert!(outputs.iter().all(|o| !o.signal_detected));
    }

    #[test]
    fn test_alternating_carrier_eventually_detects_signal() {
        let mut cdr = ClockDataRecovery::new();
        let bits: Vec<bool> = (0..60).map(|i| i % 2 == 0).collect();
        let outputs = feed_carrier(&mut cdr, &bits, SAMPLES_PER_BIT);
        assert!(outputs.iter().any(|o| o.signal_detected));
    }

    #[test]
    fn test_init_resets_state() {
        let mut cdr = ClockDataRecovery::new();
        let bits: Vec<bool> = (0..60).map(|i| i % 2 == 0).collect();
        let _ = feed_carrier(&mut cdr, &bits, SAMPLES_PER_BIT);
        cdr.init();
        assert!(!cdr.signal_detected());
    }
}
