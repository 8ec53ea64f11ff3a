//! The application contract.
//!
//! An app is one self-contained playing mode: it owns a per-sample hook,
//! a cooperative loop, optional private storage, and reacts to lifecycle
//! and button events. Exactly one app is live at a time; the rest sit
//! idle in the registry.

/// Lifecycle notifications delivered around a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppEvent {
    /// The app is about to lose the module: quiesce any per-sample state.
    Suspend,
    /// The app has just been made current.
    Resume,
}

/// One operating mode of the module.
///
/// `E` is the firmware's button/UI event type; this crate only defines
/// which app such events are delivered to, not their shape.
///
/// Everything beyond `id` and `name` is optional: the defaults are
/// "capability not supported" no-ops, so an app implements exactly the
/// hooks it cares about. Descriptors are immutable `'static` values;
/// mutable app state lives inside the implementor behind interior
/// mutability, because the per-sample hook and the cooperative hooks run
/// in different execution contexts.
pub trait App<E = ()>: Sync {
    /// Stable identity, unique across the registry for the lifetime of
    /// the firmware image.
    fn id(&self) -> u16;

    /// Display name for selection UIs.
    fn name(&self) -> &'static str;

    /// One-time setup, run before the app first becomes current.
    fn init(&self) {}

    /// Bytes of private state the app wants persisted; 0 when the app
    /// keeps nothing.
    fn storage_size(&self) -> usize {
        0
    }

    /// Serialize private state into `buf` (at least `storage_size()`
    /// bytes); returns the bytes written.
    fn save(&self, _buf: &mut [u8]) -> usize {
        0
    }

    /// Deserialize private state from `buf`; returns the bytes consumed.
    fn restore(&self, _buf: &[u8]) -> usize {
        0
    }

    /// Lifecycle notification; see [`AppEvent`].
    fn handle_app_event(&self, _event: AppEvent) {}

    /// Cooperative main-context slice. May take its time relative to the
    /// sample rate but must return for the next UI poll and ISR tick.
    fn main_loop(&self) {}

    /// A button/UI event from the firmware's input layer.
    fn handle_button_event(&self, _event: &E) {}

    /// Per-sample hook, interrupt context. Bounded time, no locking, no
    /// storage or UI calls.
    fn isr(&self) {}
}
