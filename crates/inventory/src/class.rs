//! USB device class codes
//!
//! Class codes as assigned by the USB-IF. Only the class byte from the device
//! descriptor is used for filtering; subclass and protocol are carried on the
//! record but never matched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// USB device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    /// Class information lives in the interface descriptors
    PerInterface,
    Audio,
    /// Communications and CDC control
    Comm,
    /// Human Interface Device
    Hid,
    Physical,
    /// Still imaging (cameras)
    Image,
    Printer,
    MassStorage,
    Hub,
    /// CDC-Data
    Data,
    SmartCard,
    ContentSecurity,
    Video,
    PersonalHealthcare,
    AudioVideo,
    Billboard,
    TypeCBridge,
    I3c,
    Diagnostic,
    /// Bluetooth, WiFi and similar radios
    WirelessController,
    Miscellaneous,
    ApplicationSpecific,
    VendorSpecific,
}

/// Error returned when a class name or code cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown USB device class '{0}'")]
pub struct ParseClassError(pub String);

impl DeviceClass {
    /// All known classes, ordered by code
    pub const ALL: [DeviceClass; 23] = [
        DeviceClass::PerInterface,
        DeviceClass::Audio,
        DeviceClass::Comm,
        DeviceClass::Hid,
        DeviceClass::Physical,
        DeviceClass::Image,
        DeviceClass::Printer,
        DeviceClass::MassStorage,
        DeviceClass::Hub,
        DeviceClass::Data,
        DeviceClass::SmartCard,
        DeviceClass::ContentSecurity,
        DeviceClass::Video,
        DeviceClass::PersonalHealthcare,
        DeviceClass::AudioVideo,
        DeviceClass::Billboard,
        DeviceClass::TypeCBridge,
        DeviceClass::I3c,
        DeviceClass::Diagnostic,
        DeviceClass::WirelessController,
        DeviceClass::Miscellaneous,
        DeviceClass::ApplicationSpecific,
        DeviceClass::VendorSpecific,
    ];

    /// Class code as it appears in `bDeviceClass`
    pub const fn code(self) -> u8 {
        match self {
            DeviceClass::PerInterface => 0x00,
            DeviceClass::Audio => 0x01,
            DeviceClass::Comm => 0x02,
            DeviceClass::Hid => 0x03,
            DeviceClass::Physical => 0x05,
            DeviceClass::Image => 0x06,
            DeviceClass::Printer => 0x07,
            DeviceClass::MassStorage => 0x08,
            DeviceClass::Hub => 0x09,
            DeviceClass::Data => 0x0A,
            DeviceClass::SmartCard => 0x0B,
            DeviceClass::ContentSecurity => 0x0D,
            DeviceClass::Video => 0x0E,
            DeviceClass::PersonalHealthcare => 0x0F,
            DeviceClass::AudioVideo => 0x10,
            DeviceClass::Billboard => 0x11,
            DeviceClass::TypeCBridge => 0x12,
            DeviceClass::I3c => 0x3C,
            DeviceClass::Diagnostic => 0xDC,
            DeviceClass::WirelessController => 0xE0,
            DeviceClass::Miscellaneous => 0xEF,
            DeviceClass::ApplicationSpecific => 0xFE,
            DeviceClass::VendorSpecific => 0xFF,
        }
    }

    /// Look up a class by its code
    ///
    /// Returns `None` for reserved or unassigned codes.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.code() == code)
    }

    /// Kebab-case name, as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            DeviceClass::PerInterface => "per-interface",
            DeviceClass::Audio => "audio",
            DeviceClass::Comm => "comm",
            DeviceClass::Hid => "hid",
            DeviceClass::Physical => "physical",
            DeviceClass::Image => "image",
            DeviceClass::Printer => "printer",
            DeviceClass::MassStorage => "mass-storage",
            DeviceClass::Hub => "hub",
            DeviceClass::Data => "data",
            DeviceClass::SmartCard => "smart-card",
            DeviceClass::ContentSecurity => "content-security",
            DeviceClass::Video => "video",
            DeviceClass::PersonalHealthcare => "personal-healthcare",
            DeviceClass::AudioVideo => "audio-video",
            DeviceClass::Billboard => "billboard",
            DeviceClass::TypeCBridge => "type-c-bridge",
            DeviceClass::I3c => "i3c",
            DeviceClass::Diagnostic => "diagnostic",
            DeviceClass::WirelessController => "wireless-controller",
            DeviceClass::Miscellaneous => "miscellaneous",
            DeviceClass::ApplicationSpecific => "application-specific",
            DeviceClass::VendorSpecific => "vendor-specific",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a kebab-case name (`hid`, `vendor-specific`) or a numeric code
/// (`3`, `0x03`). Names are case-insensitive and `_` is accepted for `-`.
impl FromStr for DeviceClass {
    type Err = ParseClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");

        if let Some(class) = Self::ALL.iter().find(|c| c.name() == normalized) {
            return Ok(*class);
        }

        let code = match normalized.strip_prefix("0x") {
            Some(hex) => u8::from_str_radix(hex, 16).ok(),
            None => normalized.parse::<u8>().ok(),
        };

        code.and_then(Self::from_code)
            .ok_or_else(|| ParseClassError(trimmed.to_string()))
    }
}
