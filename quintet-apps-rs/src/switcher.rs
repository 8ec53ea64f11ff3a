//! Current-app selection and dispatch.
//!
//! The switcher owns the one piece of cross-cutting mutable state in the
//! framework: which app is live. The interrupt path reads it every sample
//! tick, the main context rewrites it during a switch, so the selection is
//! published as a single atomic index into the registry table; no reader
//! can ever observe a half-switched state. The sentinel index means "no
//! current app", a valid state during startup and with an empty registry.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::app::{App, AppEvent};
use crate::error::AppError;
use crate::registry::AppRegistry;

/// Registry index that no table can reach: no current app.
const NO_APP: usize = usize::MAX;

/// Holds the registry and the live-app selection, and fans the framework's
/// entry points out to the current app.
pub struct AppSwitcher<E: 'static = ()> {
    registry: AppRegistry<E>,
    current: AtomicUsize,
    using_defaults: AtomicBool,
}

impl<E> AppSwitcher<E> {
    /// A switcher with no current app; usable as a `static` initializer
    /// once the registry exists.
    pub const fn new(registry: AppRegistry<E>) -> Self {
        Self {
            registry,
            current: AtomicUsize::new(NO_APP),
            using_defaults: AtomicBool::new(true),
        }
    }

    /// Run every app's one-time init and start the initial app. Call once
    /// at startup.
    ///
    /// A persisted selection that resolves in the registry wins; anything
    /// else falls back to the compiled-in default (table entry 0) and
    /// flags [`using_defaults`](Self::using_defaults) for the UI. The
    /// chosen app is published, then resumed. An empty registry leaves
    /// the switcher idle.
    pub fn init(&self, restored_id: Option<u16>) {
        for app in self.registry.iter() {
            app.init();
        }
        let restored = restored_id.and_then(|id| self.registry.entry(id));
        let (index, app) = match restored {
            Some(entry) => entry,
            None => match self.registry.get(0) {
                Some(app) => (0, app),
                None => return,
            },
        };
        self.using_defaults
            .store(restored.is_none(), Ordering::Relaxed);
        self.current.store(index, Ordering::Release);
        app.handle_app_event(AppEvent::Resume);
    }

    /// Hand the module to another app.
    ///
    /// The outgoing app receives exactly one [`AppEvent::Suspend`], the
    /// selection is published in a single atomic store, and the incoming
    /// app receives exactly one [`AppEvent::Resume`]. An unknown id
    /// changes nothing and delivers no events; switching to the app that
    /// is already current is a no-op.
    pub fn switch_to(&self, id: u16) -> Result<&'static dyn App<E>, AppError> {
        let (index, app) = match self.registry.entry(id) {
            Some(entry) => entry,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("switch to unknown app id {}", id);
                return Err(AppError::UnknownApp(id));
            }
        };
        if self.current.load(Ordering::Acquire) == index {
            return Ok(app);
        }
        if let Some(previous) = self.current() {
            previous.handle_app_event(AppEvent::Suspend);
        }
        self.current.store(index, Ordering::Release);
        app.handle_app_event(AppEvent::Resume);
        Ok(app)
    }

    /// The live app, if any.
    pub fn current(&self) -> Option<&'static dyn App<E>> {
        self.registry.get(self.current.load(Ordering::Acquire))
    }

    /// Id of the live app, for the selection UI and persistence.
    pub fn current_id(&self) -> Option<u16> {
        self.current().map(|app| app.id())
    }

    /// `true` while the selection is the compiled-in default rather than
    /// a restored one.
    pub fn using_defaults(&self) -> bool {
        self.using_defaults.load(Ordering::Relaxed)
    }

    /// The underlying table, for listing UIs.
    pub fn registry(&self) -> &AppRegistry<E> {
        &self.registry
    }

    /// Per-sample entry point, interrupt context: forward one tick to the
    /// current app. A handful of cycles, and a no-op with no current app.
    #[inline]
    pub fn isr(&self) {
        if let Some(app) = self.current() {
            app.isr();
        }
    }

    /// Cooperative main-context slice of the current app.
    pub fn main_loop(&self) {
        if let Some(app) = self.current() {
            app.main_loop();
        }
    }

    /// Deliver a button/UI event to the current app.
    pub fn handle_button_event(&self, event: &E) {
        if let Some(app) = self.current() {
            app.handle_button_event(event);
        }
    }
}
