//! Error types for the app framework.

use core::fmt;

/// Errors from registry construction and app switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppError {
    /// No app with this id is registered.
    UnknownApp(u16),

    /// Two registered apps share this id.
    DuplicateAppId(u16),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::UnknownApp(id) => write!(f, "unknown app id {}", id),
            AppError::DuplicateAppId(id) => write!(f, "duplicate app id {}", id),
        }
    }
}
