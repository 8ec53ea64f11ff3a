//! Analog input acquisition core for the Quintet CV module.
//!
//! Turns ten noisy multiplexed analog inputs (five pitch/velocity voice
//! pairs) into stable calibrated readings. A hardware scan pass converts
//! all channels and lands in a transfer buffer; the completion path folds
//! each sample through a fixed-point smoothing filter; accessors derive
//! calibrated, raw, and semitone-scaled values on demand.
//!
//! The concrete register layer (ADC peripheral + transfer engine) is the
//! firmware's business and plugs in through [`ScanDriver`]. Persistent
//! storage of [`CalibrationData`] likewise belongs to the firmware's
//! settings layer; this crate only reads it on the signal path and writes
//! it from the calibration procedures.
//!
//! # Wiring
//!
//! ```ignore
//! static CALIBRATION: CalibrationData = CalibrationData::with_defaults();
//! static INPUTS: AdcInputs = AdcInputs::new(&CALIBRATION);
//!
//! // At startup, after restoring calibration from the settings layer:
//! let mut engine = ScanEngine::new(board_scan_driver, &INPUTS);
//! engine.init(&ScanConfig::default())?;
//!
//! // From the transfer-complete interrupt:
//! engine.on_scan_complete()?;
//! app_switcher.isr(); // per-sample hook of the current app
//!
//! // From anywhere:
//! let semitones = INPUTS.pitch_value(AdcChannel::Pitch1);
//! ```
//!
//! # Crate features
//!
//! - **`defmt`**: structured logging for embedded targets.
//! - **`task`**: async scan loop (`ScanEngine::run`) for executor-driven
//!   firmwares.

#![no_std]

pub mod calibration;
pub mod channel;
pub mod filter;
pub mod inputs;
pub mod scan;

pub use calibration::{
    pitch_scale_for, CalibrationData, CalibrationError, CalibrationValues, DEFAULT_OFFSET,
    DEFAULT_PITCH_CV_SCALE,
};
pub use channel::{AdcChannel, ADC_CHANNEL_COUNT, SCAN_SLOT_COUNT, VOICE_COUNT};
pub use inputs::AdcInputs;
#[cfg(feature = "task")]
pub use scan::ScanDriverAsync;
pub use scan::{ScanConfig, ScanDriver, ScanEngine, ScanSpeed};
