//! Scanner error types
//!
//! Collaborators report failures through [`ScanError`]. The orchestrator never
//! returns these to its caller: they are logged and turned into omissions
//! (a skipped device, an empty name, an empty pass).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Failure reported by libusb
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Failure reported by the HID enumeration library
    #[error("HID error: {0}")]
    Hid(String),

    /// Failure reported by the platform device registry
    #[error("Device registry error: {0}")]
    Registry(String),
}

#[cfg(feature = "hid")]
impl From<hidapi::HidError> for ScanError {
    fn from(err: hidapi::HidError) -> Self {
        ScanError::Hid(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
