//! Shared per-channel sample store and the calibrated value accessors.
//!
//! [`AdcInputs`] is the hand-off point between the two execution contexts:
//! the scan engine's completion path writes one raw and one smoothed value
//! per channel per pass, and the current app reads calibrated, raw, or
//! pitch-scaled views of them whenever it likes. All slots are word-sized
//! atomics with a single writer, so neither side ever locks.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::calibration::CalibrationData;
use crate::channel::{AdcChannel, ADC_CHANNEL_COUNT};
use crate::filter::{smooth_step, widen_sample, SMOOTH_BITS};

/// Per-channel raw and smoothed samples plus the calibration binding.
///
/// Constructed once at startup with the calibration record the settings
/// layer owns, then borrowed by both the interrupt-context scan path and
/// the main-context readers. Arrays start zeroed, so every accessor is
/// well-defined before the first scan completes: `value()` returns the
/// channel's offset unchanged until samples arrive.
pub struct AdcInputs {
    raw: [AtomicU32; ADC_CHANNEL_COUNT],
    smoothed: [AtomicU32; ADC_CHANNEL_COUNT],
    calibration: &'static CalibrationData,
}

impl AdcInputs {
    /// Bind the calibration record and zero the sample arrays; usable as a
    /// `static` initializer.
    pub const fn new(calibration: &'static CalibrationData) -> Self {
        Self {
            raw: [const { AtomicU32::new(0) }; ADC_CHANNEL_COUNT],
            smoothed: [const { AtomicU32::new(0) }; ADC_CHANNEL_COUNT],
            calibration,
        }
    }

    /// Fold one fresh scan sample into a channel's state.
    ///
    /// Interrupt context only, once per channel per completed scan pass.
    /// Stores the widened raw sample, then advances the moving average.
    #[inline]
    pub fn update(&self, channel: AdcChannel, sample: u16) {
        let slot = channel.index();
        let raw = widen_sample(sample);
        self.raw[slot].store(raw, Ordering::Relaxed);
        let smoothed = smooth_step(self.smoothed[slot].load(Ordering::Relaxed), raw);
        self.smoothed[slot].store(smoothed, Ordering::Relaxed);
    }

    /// Calibrated code: the channel's offset minus the smoothed 12-bit
    /// reading. Sign convention follows the offset's polarity.
    #[inline]
    pub fn value(&self, channel: AdcChannel) -> i32 {
        let smoothed = self.smoothed[channel.index()].load(Ordering::Relaxed) >> SMOOTH_BITS;
        i32::from(self.calibration.offset(channel)) - smoothed as i32
    }

    /// Latest un-smoothed 12-bit reading, before the offset is applied.
    /// Diagnostic and calibration-time use.
    #[inline]
    pub fn raw_value(&self, channel: AdcChannel) -> u32 {
        self.raw[channel.index()].load(Ordering::Relaxed) >> SMOOTH_BITS
    }

    /// Smoothed 12-bit reading, before the offset is applied.
    #[inline]
    pub fn smoothed_raw_value(&self, channel: AdcChannel) -> u32 {
        self.smoothed[channel.index()].load(Ordering::Relaxed) >> SMOOTH_BITS
    }

    /// Calibrated reading in semitones, s24.7 fixed point.
    #[inline]
    pub fn pitch_value(&self, channel: AdcChannel) -> i32 {
        (self.value(channel) * i32::from(self.calibration.pitch_cv_scale())) >> 12
    }

    /// Pitch transform applied to the un-smoothed reading, for
    /// glide-sensitive contexts where the averaging lag is unwanted.
    #[inline]
    pub fn raw_pitch_value(&self, channel: AdcChannel) -> i32 {
        let value =
            i32::from(self.calibration.offset(channel)) - self.raw_value(channel) as i32;
        (value * i32::from(self.calibration.pitch_cv_scale())) >> 12
    }

    /// The bound calibration record.
    pub fn calibration(&self) -> &'static CalibrationData {
        self.calibration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{DEFAULT_OFFSET, DEFAULT_PITCH_CV_SCALE};
    use crate::filter::SMOOTHING;

    /// Feed identical samples until the moving average is at rest.
    fn settle(inputs: &AdcInputs, channel: AdcChannel, code: u16) {
        for _ in 0..64 {
            inputs.update(channel, code << 4);
        }
    }

    #[test]
    fn accessors_are_deterministic_before_first_scan() {
        static CAL: CalibrationData = CalibrationData::with_defaults();
        static INPUTS: AdcInputs = AdcInputs::new(&CAL);

        for channel in AdcChannel::ALL {
            assert_eq!(INPUTS.value(channel), i32::from(DEFAULT_OFFSET));
            assert_eq!(INPUTS.raw_value(channel), 0);
            assert_eq!(INPUTS.smoothed_raw_value(channel), 0);
            // offset * scale >> 12 with zeroed samples.
            assert_eq!(
                INPUTS.pitch_value(channel),
                (i32::from(DEFAULT_OFFSET) * i32::from(DEFAULT_PITCH_CV_SCALE)) >> 12
            );
        }
    }

    #[test]
    fn raw_tracks_immediately_smoothed_lags() {
        static CAL: CalibrationData = CalibrationData::with_defaults();
        static INPUTS: AdcInputs = AdcInputs::new(&CAL);

        INPUTS.update(AdcChannel::Pitch1, 1000 << 4);
        assert_eq!(INPUTS.raw_value(AdcChannel::Pitch1), 1000);
        // First average step from zero covers a quarter of the distance.
        assert_eq!(
            INPUTS.smoothed_raw_value(AdcChannel::Pitch1),
            1000 / SMOOTHING
        );
    }

    #[test]
    fn settled_value_subtracts_from_offset() {
        static CAL: CalibrationData = CalibrationData::with_defaults();
        static INPUTS: AdcInputs = AdcInputs::new(&CAL);

        settle(&INPUTS, AdcChannel::Velocity2, 600);
        // Approached from below the average rests one code shy.
        assert_eq!(INPUTS.smoothed_raw_value(AdcChannel::Velocity2), 599);
        assert_eq!(
            INPUTS.value(AdcChannel::Velocity2),
            i32::from(DEFAULT_OFFSET) - 599
        );
        // Other channels are untouched.
        assert_eq!(INPUTS.raw_value(AdcChannel::Velocity3), 0);
    }

    #[test]
    fn channels_are_independent() {
        static CAL: CalibrationData = CalibrationData::with_defaults();
        static INPUTS: AdcInputs = AdcInputs::new(&CAL);

        settle(&INPUTS, AdcChannel::Pitch1, 100);
        settle(&INPUTS, AdcChannel::Pitch2, 3000);
        assert_eq!(INPUTS.raw_value(AdcChannel::Pitch1), 100);
        assert_eq!(INPUTS.raw_value(AdcChannel::Pitch2), 3000);
    }

    #[test]
    fn calibrated_pitch_spans_the_reference_interval() {
        static CAL: CalibrationData = CalibrationData::with_defaults();
        static INPUTS: AdcInputs = AdcInputs::new(&CAL);

        // References two octaves apart, as read during calibration.
        let (c2, c4) = (1000, 1819);
        CAL.calibrate_pitch(c2, c4).unwrap();

        settle(&INPUTS, AdcChannel::Pitch1, c2 as u16);
        let low = INPUTS.pitch_value(AdcChannel::Pitch1);
        settle(&INPUTS, AdcChannel::Pitch1, c4 as u16);
        let high = INPUTS.pitch_value(AdcChannel::Pitch1);

        // Higher codes sit further below the offset, so the pitch axis
        // runs opposite to the code axis. Two octaves in s24.7 fixed
        // point, within one unit of fixed-point rounding.
        let interval = low - high;
        assert!((interval - (24 << 7)).abs() <= 1, "interval {}", interval);
    }

    #[test]
    fn raw_pitch_follows_a_step_without_lag() {
        static CAL: CalibrationData = CalibrationData::with_defaults();
        static INPUTS: AdcInputs = AdcInputs::new(&CAL);

        settle(&INPUTS, AdcChannel::Pitch4, 500);
        // One sample at a new level: raw pitch jumps, smoothed pitch
        // still reflects the averaging lag.
        INPUTS.update(AdcChannel::Pitch4, 900 << 4);
        let stepped = INPUTS.raw_pitch_value(AdcChannel::Pitch4);
        let expected =
            ((i32::from(DEFAULT_OFFSET) - 900) * i32::from(DEFAULT_PITCH_CV_SCALE)) >> 12;
        assert_eq!(stepped, expected);
        assert!(INPUTS.pitch_value(AdcChannel::Pitch4) > stepped);
    }
}
