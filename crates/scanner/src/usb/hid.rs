//! HID enumeration pass
//!
//! Many HID devices never show usable descriptors through libusb (the OS HID
//! driver owns them), so they are listed a second time through the HID
//! library. No vendor or product filter is applied at this level.

use crate::Result;

/// Identity of one HID device interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HidEntry {
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Source of HID devices
pub trait HidSource {
    type Entries: Iterator<Item = HidEntry>;

    /// Enumerate every HID device currently present
    fn enumerate(&self) -> Result<Self::Entries>;
}

/// HID source that reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHid;

impl HidSource for NoHid {
    type Entries = std::iter::Empty<HidEntry>;

    fn enumerate(&self) -> Result<Self::Entries> {
        Ok(std::iter::empty())
    }
}

/// HID devices through hidapi
///
/// Each call builds a fresh `HidApi`, which enumerates on creation and frees
/// its device list when dropped at the end of the call.
#[cfg(feature = "hid")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HidApiSource;

#[cfg(feature = "hid")]
impl HidSource for HidApiSource {
    type Entries = std::vec::IntoIter<HidEntry>;

    fn enumerate(&self) -> Result<Self::Entries> {
        let api = hidapi::HidApi::new()?;
        let entries: Vec<HidEntry> = api
            .device_list()
            .map(|info| HidEntry {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
            })
            .collect();
        Ok(entries.into_iter())
    }
}

#[cfg(feature = "hid")]
pub type SystemHid = HidApiSource;

#[cfg(not(feature = "hid"))]
pub type SystemHid = NoHid;

/// The HID source selected at build time
pub fn system_hid() -> SystemHid {
    SystemHid::default()
}
