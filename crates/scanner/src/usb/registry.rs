//! Name lookup through the platform device registry
//!
//! Used when a device cannot be opened. The registry lists every present
//! device with its hardware IDs (`USB\VID_1234&PID_5678&REV_0100`) and a
//! human-readable description, and neither needs elevated access.
//!
//! # Platform Support
//!
//! - **Windows**: SetupAPI, see [`SetupApiRegistry`]
//! - **Other platforms**: no registry, [`NoLookup`] leaves the placeholder in place

use crate::Result;
use tracing::{debug, warn};

#[cfg(target_os = "windows")]
pub use crate::usb::setupapi::SetupApiRegistry;

/// Strategy for naming a device that cannot be opened
pub trait NameLookup {
    fn lookup(&self, vendor_id: u16, product_id: u16) -> Option<String>;
}

/// One present device as reported by the registry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryEntry {
    /// Hardware ID strings, most specific first
    pub hardware_ids: Vec<String>,
    /// Device description, possibly with a `\`-separated suffix
    pub description: Option<String>,
}

/// Source of registry entries
pub trait DeviceRegistry {
    fn entries(&self) -> Result<Vec<RegistryEntry>>;
}

/// Lookup that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl NameLookup for NoLookup {
    fn lookup(&self, _vendor_id: u16, _product_id: u16) -> Option<String> {
        None
    }
}

/// Match a device against registry hardware IDs
#[derive(Debug, Clone, Default)]
pub struct RegistryLookup<R> {
    registry: R,
}

impl<R: DeviceRegistry> RegistryLookup<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}

impl<R: DeviceRegistry> NameLookup for RegistryLookup<R> {
    fn lookup(&self, vendor_id: u16, product_id: u16) -> Option<String> {
        let entries = match self.registry.entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Device registry unavailable: {}", e);
                return None;
            }
        };

        let name = entries
            .iter()
            .filter(|entry| {
                entry
                    .hardware_ids
                    .iter()
                    .any(|id| parse_hardware_id(id) == Some((vendor_id, product_id)))
            })
            .find_map(|entry| entry.description.as_deref().map(trim_description));

        debug!(
            "Registry lookup for {:04x}:{:04x} over {} entries: {:?}",
            vendor_id,
            product_id,
            entries.len(),
            name
        );
        name
    }
}

#[cfg(target_os = "windows")]
pub type SystemLookup = RegistryLookup<SetupApiRegistry>;

#[cfg(not(target_os = "windows"))]
pub type SystemLookup = NoLookup;

/// The lookup strategy for the platform this was built for
pub fn system_lookup() -> SystemLookup {
    #[cfg(target_os = "windows")]
    {
        RegistryLookup::new(SetupApiRegistry)
    }

    #[cfg(not(target_os = "windows"))]
    {
        NoLookup
    }
}

/// Extract VID and PID from a hardware ID
///
/// Both `VID_xxxx` and `PID_xxxx` must be present with exactly four hex
/// digits each. Matching is case-insensitive.
pub fn parse_hardware_id(hardware_id: &str) -> Option<(u16, u16)> {
    let upper = hardware_id.to_ascii_uppercase();
    Some((hex_field(&upper, "VID_")?, hex_field(&upper, "PID_")?))
}

fn hex_field(s: &str, tag: &str) -> Option<u16> {
    let start = s.find(tag)? + tag.len();
    let digits = s.get(start..start + 4)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Cut a registry description at its first path separator
pub fn trim_description(description: &str) -> String {
    description
        .split('\\')
        .next()
        .unwrap_or(description)
        .to_string()
}

/// Split a REG_MULTI_SZ value into its strings
pub fn split_multi_sz(wide: &[u16]) -> Vec<String> {
    wide.split(|&c| c == 0)
        .filter(|s| !s.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}
