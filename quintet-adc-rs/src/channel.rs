//! Static identity for the module's analog inputs.
//!
//! The front panel exposes five voices, each with a pitch and a velocity
//! jack, for ten independently filtered and calibrated channels. The scan
//! hardware wants a power-of-two slot table, so the ten real channel ids
//! are padded out to sixteen slots by repeating the first six.

/// Number of real analog input channels (5 pitch + 5 velocity).
pub const ADC_CHANNEL_COUNT: usize = 10;

/// Number of voices; each voice owns one pitch and one velocity input.
pub const VOICE_COUNT: usize = 5;

/// Number of slots in the hardware scan table (power of two, padded).
pub const SCAN_SLOT_COUNT: usize = 16;

/// Channel ids for the scan sequencer, one per slot.
///
/// Pitch inputs 1–5: A5 = 0x4C, A4 = 0x4D, A3 = 0x49, A2 = 0x48, A0 = 0x45.
/// Velocity inputs 1–5: A9 = 0x44, A8 = 0x4F, A7 = 0x47, A6 = 0x46,
/// A1 = 0x4E. Slots 10–15 repeat the first six ids; the sequencer needs a
/// power-of-two table and the duplicate conversions are discarded.
pub const SCAN_CHANNEL_IDS: [u16; SCAN_SLOT_COUNT] = [
    0x4C, 0x4D, 0x49, 0x48, 0x45, // pitch 1-5
    0x44, 0x4F, 0x47, 0x46, 0x4E, // velocity 1-5
    0x4C, 0x4D, 0x49, 0x48, 0x45, 0x44, // padding
];

/// One physical analog input lane.
///
/// The discriminant doubles as the index into the per-channel sample and
/// calibration arrays, and matches the channel's slot in the scan table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    Pitch1,
    Pitch2,
    Pitch3,
    Pitch4,
    Pitch5,
    Velocity1,
    Velocity2,
    Velocity3,
    Velocity4,
    Velocity5,
}

impl AdcChannel {
    /// All real channels, in scan-table order.
    pub const ALL: [AdcChannel; ADC_CHANNEL_COUNT] = [
        AdcChannel::Pitch1,
        AdcChannel::Pitch2,
        AdcChannel::Pitch3,
        AdcChannel::Pitch4,
        AdcChannel::Pitch5,
        AdcChannel::Velocity1,
        AdcChannel::Velocity2,
        AdcChannel::Velocity3,
        AdcChannel::Velocity4,
        AdcChannel::Velocity5,
    ];

    /// Slot index into the per-channel arrays and the scan table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `true` for the pitch block, `false` for the velocity block.
    pub const fn is_pitch(self) -> bool {
        (self as usize) < VOICE_COUNT
    }

    /// 0-based voice number this channel belongs to.
    pub const fn voice(self) -> usize {
        self.index() % VOICE_COUNT
    }

    /// Pitch channel of the given voice, or `None` past the last voice.
    pub const fn pitch(voice: usize) -> Option<AdcChannel> {
        if voice < VOICE_COUNT {
            Some(Self::ALL[voice])
        } else {
            None
        }
    }

    /// Velocity channel of the given voice, or `None` past the last voice.
    pub const fn velocity(voice: usize) -> Option<AdcChannel> {
        if voice < VOICE_COUNT {
            Some(Self::ALL[VOICE_COUNT + voice])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_scan_order() {
        for (slot, channel) in AdcChannel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), slot);
        }
    }

    #[test]
    fn pitch_and_velocity_blocks() {
        assert!(AdcChannel::Pitch1.is_pitch());
        assert!(AdcChannel::Pitch5.is_pitch());
        assert!(!AdcChannel::Velocity1.is_pitch());
        assert!(!AdcChannel::Velocity5.is_pitch());
    }

    #[test]
    fn voice_pairing() {
        for voice in 0..VOICE_COUNT {
            let pitch = AdcChannel::pitch(voice).unwrap();
            let velocity = AdcChannel::velocity(voice).unwrap();
            assert!(pitch.is_pitch());
            assert!(!velocity.is_pitch());
            assert_eq!(pitch.voice(), voice);
            assert_eq!(velocity.voice(), voice);
        }
        assert!(AdcChannel::pitch(VOICE_COUNT).is_none());
        assert!(AdcChannel::velocity(VOICE_COUNT).is_none());
    }

    #[test]
    fn scan_table_is_padded_with_leading_ids() {
        // The six pad slots repeat the first six real ids.
        assert_eq!(
            &SCAN_CHANNEL_IDS[ADC_CHANNEL_COUNT..],
            &SCAN_CHANNEL_IDS[..SCAN_SLOT_COUNT - ADC_CHANNEL_COUNT]
        );
    }

    #[test]
    fn real_channel_ids_are_distinct() {
        let real = &SCAN_CHANNEL_IDS[..ADC_CHANNEL_COUNT];
        for (i, a) in real.iter().enumerate() {
            for b in &real[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
