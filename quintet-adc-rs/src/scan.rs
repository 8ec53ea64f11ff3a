//! The DMA scan engine: repeating hardware passes over the channel table.
//!
//! The peripheral walks the 16-slot channel table once per pass and the
//! transfer engine moves the converted samples into a buffer without
//! processor intervention. The register layer itself lives behind the
//! [`ScanDriver`] trait; this module owns what happens around it: the
//! fixed conversion parameters, the per-pass smoothing update, the ready
//! signal, and re-arming of the next pass.
//!
//! A configured peripheral is assumed not to fail: there is no retry
//! logic here, and a driver error surfacing from the hot path is a fatal
//! condition for the watchdog to resolve.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::channel::{AdcChannel, SCAN_CHANNEL_IDS, SCAN_SLOT_COUNT};
use crate::filter::SCAN_RESOLUTION_BITS;
use crate::inputs::AdcInputs;

/// Sampling/conversion speed selection for the scan hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanSpeed {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Conversion parameters and the transfer layout for the scan peripheral.
///
/// The defaults are the module's fixed operating point; they exist as data
/// so the driver gets them through one call and tests can observe them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Channel ids, one per scan slot, padding included.
    pub channel_ids: [u16; SCAN_SLOT_COUNT],
    /// Conversion resolution in bits.
    pub resolution_bits: u8,
    /// Per-slot hardware averaging. 4 is the highest setting that keeps
    /// the scan period stable.
    pub averaging: u8,
    pub sampling_speed: ScanSpeed,
    pub conversion_speed: ScanSpeed,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            channel_ids: SCAN_CHANNEL_IDS,
            resolution_bits: SCAN_RESOLUTION_BITS as u8,
            averaging: 4,
            sampling_speed: ScanSpeed::High,
            conversion_speed: ScanSpeed::High,
        }
    }
}

/// Register-layer interface the engine drives.
///
/// `configure` covers both halves of bring-up: conversion parameters and
/// the 16-entry transfer ring (power of two, so slot wraparound is a mask).
/// `start_scan` arms one pass; `read_frame` copies out the most recently
/// completed pass.
pub trait ScanDriver {
    type Error;

    fn configure(&mut self, config: &ScanConfig) -> Result<(), Self::Error>;
    fn start_scan(&mut self) -> Result<(), Self::Error>;
    fn read_frame(&mut self, frame: &mut [u16; SCAN_SLOT_COUNT]) -> Result<(), Self::Error>;
}

/// Extends [`ScanDriver`] with completion notification for executor-driven
/// firmwares: resolves when the in-flight pass has landed in the buffer.
#[cfg(feature = "task")]
#[allow(async_fn_in_trait)]
pub trait ScanDriverAsync: ScanDriver {
    async fn scan_complete(&mut self) -> Result<(), Self::Error>;
}

/// Drives repeated scan passes and feeds each completed pass through the
/// smoothing filter.
///
/// Interrupt-context firmwares call [`on_scan_complete`] from the transfer
/// interrupt; async firmwares enable the `task` feature and hand the
/// engine to an executor via [`run`].
///
/// [`on_scan_complete`]: ScanEngine::on_scan_complete
/// [`run`]: ScanEngine::run
pub struct ScanEngine<D: ScanDriver> {
    driver: D,
    inputs: &'static AdcInputs,
    frame: [u16; SCAN_SLOT_COUNT],
    ready: AtomicBool,
}

impl<D: ScanDriver> ScanEngine<D> {
    pub fn new(driver: D, inputs: &'static AdcInputs) -> Self {
        Self {
            driver,
            inputs,
            frame: [0; SCAN_SLOT_COUNT],
            ready: AtomicBool::new(false),
        }
    }

    /// Configure the peripheral and arm the first pass.
    pub fn init(&mut self, config: &ScanConfig) -> Result<(), D::Error> {
        self.driver.configure(config)?;
        self.driver.start_scan()
    }

    /// Completion handler: called once per finished scan pass, from the
    /// same context that will run the current app's per-sample hook.
    ///
    /// Copies the frame out, folds each real channel's sample into the
    /// filter state (the padding slots are duplicates and are skipped),
    /// raises the ready signal, and re-arms the next pass.
    pub fn on_scan_complete(&mut self) -> Result<(), D::Error> {
        self.driver.read_frame(&mut self.frame)?;
        for channel in AdcChannel::ALL {
            self.inputs.update(channel, self.frame[channel.index()]);
        }
        self.ready.store(true, Ordering::Release);
        self.driver.start_scan()
    }

    /// Consume the ready signal: `true` once per completed pass since the
    /// last call. Main-context poll.
    pub fn take_ready(&self) -> bool {
        self.ready.swap(false, Ordering::Acquire)
    }

    /// The sample store this engine feeds.
    pub fn inputs(&self) -> &'static AdcInputs {
        self.inputs
    }
}

#[cfg(feature = "task")]
impl<D: ScanDriverAsync> ScanEngine<D> {
    /// Free-running scan loop: configure, then convert passes into filter
    /// updates until the driver reports an error.
    pub async fn run(&mut self, config: &ScanConfig) -> Result<core::convert::Infallible, D::Error> {
        self.init(config)?;
        loop {
            self.driver.scan_complete().await?;
            self.on_scan_complete()?;
        }
    }
}
