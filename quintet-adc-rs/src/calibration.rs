//! Per-channel offsets and the shared pitch scale.
//!
//! Calibration translates filtered raw codes into engineering units in two
//! stages: a per-channel offset fixes each input's zero point, then a
//! single fixed-point scale shared by the pitch channels converts the
//! offset code into semitones.
//!
//! The record itself is owned by the firmware's persistent-settings layer;
//! the acquisition core binds a `'static` reference once at init. Fields
//! live in atomic cells because the calibration procedure writes from the
//! main context while the signal path reads from the interrupt context;
//! every update is a single word-sized store, never observable half-done.

use core::fmt;
use core::sync::atomic::{AtomicU16, Ordering};

use crate::channel::{AdcChannel, ADC_CHANNEL_COUNT};

/// Factory offset: the nominal 0 V code sits at mid-scale of the 12-bit
/// range until the channel is calibrated.
pub const DEFAULT_OFFSET: u16 = 2048;

/// Semitones across the full 12-bit input range (10 octaves at 1 V/oct).
pub const FULL_SCALE_SEMITONES: i32 = 120;

/// Factory pitch scale, in the 12-bit fixed-point base used by
/// [`AdcInputs::pitch_value`](crate::inputs::AdcInputs::pitch_value).
pub const DEFAULT_PITCH_CV_SCALE: u16 = (FULL_SCALE_SEMITONES as u16) << 7;

/// Interval between the two calibration references: two octaves.
pub const CAL_INTERVAL_SEMITONES: i32 = 24;

/// Why a pitch calibration attempt was refused. The stored scale is left
/// untouched in every case; surface the error to the calibration UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// The two reference readings are equal, so there is no slope to derive
    /// from.
    IdenticalReferences,
    /// The high reference read below the low one; the slope would come out
    /// negative.
    InvertedReferences,
    /// The readings are so close together that the scale overflows its
    /// 16-bit storage.
    ScaleOutOfRange,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalibrationError::IdenticalReferences => {
                write!(f, "calibration references are identical")
            }
            CalibrationError::InvertedReferences => {
                write!(f, "calibration references are inverted")
            }
            CalibrationError::ScaleOutOfRange => {
                write!(f, "pitch scale out of range")
            }
        }
    }
}

/// Derive the pitch scale from two reference readings taken
/// [`CAL_INTERVAL_SEMITONES`] apart (`c2` low, `c4` two octaves above).
///
/// The result maps the measured code difference exactly onto the known
/// interval: `(interval << 7) * 4096 / (c4 - c2)`.
///
/// # Examples
///
/// ```
/// use quintet_adc::calibration::{pitch_scale_for, CalibrationError};
///
/// // An ideal two-octave span on this hardware is about 819 codes.
/// assert_eq!(pitch_scale_for(100, 919), Ok(15363));
/// // Equal references are refused, not divided by.
/// assert_eq!(
///     pitch_scale_for(500, 500),
///     Err(CalibrationError::IdenticalReferences)
/// );
/// ```
pub fn pitch_scale_for(c2: i32, c4: i32) -> Result<u16, CalibrationError> {
    if c2 == c4 {
        return Err(CalibrationError::IdenticalReferences);
    }
    if c2 > c4 {
        return Err(CalibrationError::InvertedReferences);
    }
    let scale = (CAL_INTERVAL_SEMITONES << 7) * 4096 / (c4 - c2);
    u16::try_from(scale).map_err(|_| CalibrationError::ScaleOutOfRange)
}

/// Plain-data image of a [`CalibrationData`] record, for the persistent
/// settings layer to serialize and hand back at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationValues {
    pub offset: [u16; ADC_CHANNEL_COUNT],
    pub pitch_cv_scale: u16,
}

impl Default for CalibrationValues {
    fn default() -> Self {
        Self {
            offset: [DEFAULT_OFFSET; ADC_CHANNEL_COUNT],
            pitch_cv_scale: DEFAULT_PITCH_CV_SCALE,
        }
    }
}

/// One module's calibration record: per-channel zero offsets plus the
/// shared pitch scale.
///
/// Offsets and scale are only ever read by the signal path; writes come
/// solely from the calibration procedures and the settings restore path,
/// both of which run in the cooperative main context.
pub struct CalibrationData {
    offset: [AtomicU16; ADC_CHANNEL_COUNT],
    pitch_cv_scale: AtomicU16,
}

impl CalibrationData {
    /// Record with factory defaults; usable as a `static` initializer.
    pub const fn with_defaults() -> Self {
        Self {
            offset: [const { AtomicU16::new(DEFAULT_OFFSET) }; ADC_CHANNEL_COUNT],
            pitch_cv_scale: AtomicU16::new(DEFAULT_PITCH_CV_SCALE),
        }
    }

    /// Zero-point offset of one channel.
    #[inline]
    pub fn offset(&self, channel: AdcChannel) -> u16 {
        self.offset[channel.index()].load(Ordering::Relaxed)
    }

    /// Store a new zero-point offset for one channel.
    pub fn set_offset(&self, channel: AdcChannel, offset: u16) {
        self.offset[channel.index()].store(offset, Ordering::Relaxed);
    }

    /// Shared pitch scale in the 12-bit fixed-point base.
    #[inline]
    pub fn pitch_cv_scale(&self) -> u16 {
        self.pitch_cv_scale.load(Ordering::Relaxed)
    }

    /// Recompute and store the pitch scale from two reference readings.
    ///
    /// This is the only write path to the scale. On error the previous
    /// scale is retained; the caller surfaces the error to the calibration
    /// UI. Expected to run with the module quiescent; a concurrent reader
    /// may see the old or the new scale, but never a torn value.
    pub fn calibrate_pitch(&self, c2: i32, c4: i32) -> Result<(), CalibrationError> {
        match pitch_scale_for(c2, c4) {
            Ok(scale) => {
                self.pitch_cv_scale.store(scale, Ordering::Relaxed);
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("pitch calibration rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Copy the live record into a plain-data image for persistence.
    pub fn snapshot(&self) -> CalibrationValues {
        let mut offset = [0u16; ADC_CHANNEL_COUNT];
        for channel in AdcChannel::ALL {
            offset[channel.index()] = self.offset(channel);
        }
        CalibrationValues {
            offset,
            pitch_cv_scale: self.pitch_cv_scale(),
        }
    }

    /// Load a previously persisted image into the live record.
    pub fn restore(&self, values: &CalibrationValues) {
        for channel in AdcChannel::ALL {
            self.set_offset(channel, values.offset[channel.index()]);
        }
        self.pitch_cv_scale
            .store(values.pitch_cv_scale, Ordering::Relaxed);
    }
}

impl Default for CalibrationData {
    fn default() -> Self {
        Self::with_defaults()
    }
}
