//! Bus collaborator interface
//!
//! [`UsbBus`] is the seam between the scanner and the library that talks to
//! the hardware. Descriptors cross it as owned summaries so that everything
//! above this module works without a device attached.

use crate::Result;
use inventory::{ENDPOINT_DIR_IN, TRANSFER_TYPE_MASK};

/// Identity fields of a device descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceSummary {
    pub vendor_id: u16,
    pub product_id: u16,
    pub class_code: u8,
    pub sub_class_code: u8,
    /// `iManufacturer`, `None` when the device declares no string
    pub manufacturer_index: Option<u8>,
    /// `iProduct`, `None` when the device declares no string
    pub product_index: Option<u8>,
}

/// Active configuration descriptor tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigSummary {
    pub interfaces: Vec<InterfaceSummary>,
}

/// One interface and all of its alternate settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceSummary {
    pub number: u8,
    pub alt_settings: Vec<AltSettingSummary>,
}

/// One interface descriptor (interface at a given alternate setting)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AltSettingSummary {
    pub interface_number: u8,
    pub setting_number: u8,
    pub class_code: u8,
    pub sub_class_code: u8,
    pub protocol_code: u8,
    pub endpoints: Vec<EndpointSummary>,
}

/// One endpoint descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndpointSummary {
    /// `bEndpointAddress`, direction in the high bit
    pub address: u8,
    /// Raw `bmAttributes`
    pub attributes: u8,
    /// `wMaxPacketSize`
    pub max_packet_size: u16,
}

impl EndpointSummary {
    pub fn is_in(&self) -> bool {
        self.address & ENDPOINT_DIR_IN != 0
    }

    pub fn transfer_type(&self) -> u8 {
        self.attributes & TRANSFER_TYPE_MASK
    }
}

/// Bus enumeration and descriptor retrieval
///
/// The enumeration context is an explicit value: [`UsbBus::init`] creates it
/// and the scanner passes it back for listing and opening. Releasing the
/// context, the device list and open handles happens on drop.
pub trait UsbBus {
    type Context;
    type Device;
    type Handle;

    /// Create an enumeration context
    fn init(&self) -> Result<Self::Context>;

    /// List all attached devices
    fn list_devices(&self, context: &Self::Context) -> Result<Vec<Self::Device>>;

    fn device_descriptor(&self, device: &Self::Device) -> Result<DeviceSummary>;

    fn active_config(&self, device: &Self::Device) -> Result<ConfigSummary>;

    fn bus_number(&self, device: &Self::Device) -> u8;

    fn port_number(&self, device: &Self::Device) -> u8;

    /// Open a device for descriptor reads
    fn open(&self, context: &Self::Context, device: &Self::Device) -> Result<Self::Handle>;

    /// Read a string descriptor as ASCII
    fn read_string_ascii(&self, handle: &Self::Handle, index: u8) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_direction_and_type() {
        let bulk_in = EndpointSummary {
            address: 0x81,
            attributes: 0x02,
            max_packet_size: 512,
        };
        assert!(bulk_in.is_in());
        assert_eq!(bulk_in.transfer_type(), inventory::TRANSFER_TYPE_BULK);

        // Synchronous isochronous data endpoint: sync bits must not leak into type
        let iso_out = EndpointSummary {
            address: 0x03,
            attributes: 0x0D,
            max_packet_size: 1024,
        };
        assert!(!iso_out.is_in());
        assert_eq!(iso_out.transfer_type(), inventory::TRANSFER_TYPE_ISOCHRONOUS);
    }
}
