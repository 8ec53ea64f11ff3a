//! Cooperative application-switching framework for the Quintet CV module.
//!
//! One firmware image hosts several mutually exclusive playing modes
//! ("apps") that share the interrupt-driven sampling loop. Each app is a
//! static descriptor implementing [`App`]; the [`AppRegistry`] holds the
//! compiled-in set, and the [`AppSwitcher`] owns the single live
//! selection and fans the framework's entry points out to it.
//!
//! The per-sample hook is dispatched from the same interrupt context that
//! drives the acquisition core, so the live selection is published as one
//! atomic store: the interrupt path sees either a fully valid app or
//! none, never a half-switched state. Around every switch the outgoing
//! app gets [`AppEvent::Suspend`] and the incoming one
//! [`AppEvent::Resume`].
//!
//! # Wiring
//!
//! ```ignore
//! static APPS: [&dyn App<UiEvent>; 2] = [&LIVE_PLAY, &SEQUENCER];
//! static SWITCHER: StaticCell<AppSwitcher<UiEvent>> = StaticCell::new();
//!
//! // At startup, after the settings layer restored the last selection:
//! let switcher = SWITCHER.init(AppSwitcher::new(AppRegistry::new(&APPS)?));
//! switcher.init(saved_app_id);
//!
//! // From the per-sample interrupt, after the scan engine's update:
//! switcher.isr();
//!
//! // From the cooperative main loop:
//! switcher.main_loop();
//! switcher.handle_button_event(&event);
//! ```
//!
//! # Crate features
//!
//! - **`defmt`**: structured logging for embedded targets.

#![no_std]

pub mod app;
pub mod error;
pub mod registry;
pub mod switcher;

pub use app::{App, AppEvent};
pub use error::AppError;
pub use registry::AppRegistry;
pub use switcher::AppSwitcher;
