//! Inventory record types
//!
//! [`InventoryRecord`] is the unit of output of a scan. Records are plain
//! values: they hold no reference to the device they describe and stay valid
//! after the scan context is gone.

use crate::class::DeviceClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Direction bit of an endpoint address (set = IN, device to host)
pub const ENDPOINT_DIR_IN: u8 = 0x80;
/// Endpoint number bits of an endpoint address
pub const ENDPOINT_NUMBER_MASK: u8 = 0x0F;
/// Transfer type bits of an endpoint attributes byte
pub const TRANSFER_TYPE_MASK: u8 = 0x03;
pub const TRANSFER_TYPE_CONTROL: u8 = 0x00;
pub const TRANSFER_TYPE_ISOCHRONOUS: u8 = 0x01;
pub const TRANSFER_TYPE_BULK: u8 = 0x02;
pub const TRANSFER_TYPE_INTERRUPT: u8 = 0x03;

/// One interface alternate setting exposing both a bulk IN and a bulk OUT
/// endpoint
///
/// Never constructed half-populated: the classifier only emits a pair once
/// both directions were seen on the same alternate setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointPair {
    /// `bInterfaceNumber`
    pub interface_number: u8,
    pub interface_class: u8,
    pub interface_subclass: u8,
    pub interface_protocol: u8,
    /// IN endpoint address (direction bit set)
    pub endpoint_in: u8,
    /// OUT endpoint address (direction bit clear)
    pub endpoint_out: u8,
    /// `wMaxPacketSize` of the IN endpoint
    pub max_packet_in: u16,
    /// `wMaxPacketSize` of the OUT endpoint
    pub max_packet_out: u16,
    /// Raw `bmAttributes` of the IN endpoint
    pub attributes_in: u8,
    /// Raw `bmAttributes` of the OUT endpoint
    pub attributes_out: u8,
}

impl EndpointPair {
    /// IN endpoint number without the direction bit
    pub fn endpoint_in_number(&self) -> u8 {
        self.endpoint_in & ENDPOINT_NUMBER_MASK
    }

    /// OUT endpoint number
    pub fn endpoint_out_number(&self) -> u8 {
        self.endpoint_out & ENDPOINT_NUMBER_MASK
    }

    pub fn transfer_type_in(&self) -> u8 {
        self.attributes_in & TRANSFER_TYPE_MASK
    }

    pub fn transfer_type_out(&self) -> u8 {
        self.attributes_out & TRANSFER_TYPE_MASK
    }
}

/// Inventory entry for one device seen during a scan
///
/// Equality and hashing only consider identity, topology and class
/// (`vendor_id`, `product_id`, `bus`, `port`, `device_class`,
/// `device_subclass`). Two records that differ only in `product_name` or
/// `endpoints` describe the same device instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
    /// Bus number at scan time (0 for HID-pass entries)
    pub bus: u8,
    /// Port number at scan time (0 for HID-pass entries)
    pub port: u8,
    /// `bDeviceClass`
    pub device_class: u8,
    /// `bDeviceSubClass`
    pub device_subclass: u8,
    /// Best-effort product label, empty when unresolved
    #[serde(default)]
    pub product_name: String,
    /// Bulk IN+OUT pairs, one per qualifying interface alternate setting
    #[serde(default)]
    pub endpoints: Vec<EndpointPair>,
}

impl InventoryRecord {
    /// Create a record with the given identity and everything else zeroed
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            ..Self::default()
        }
    }

    pub fn with_topology(mut self, bus: u8, port: u8) -> Self {
        self.bus = bus;
        self.port = port;
        self
    }

    pub fn with_class(mut self, class: u8, subclass: u8) -> Self {
        self.device_class = class;
        self.device_subclass = subclass;
        self
    }

    /// Known class of this device, if the code is assigned
    pub fn class(&self) -> Option<DeviceClass> {
        DeviceClass::from_code(self.device_class)
    }

    /// Whether the record passes a class filter
    ///
    /// An empty filter accepts everything.
    pub fn matches_filter(&self, filter: &[DeviceClass]) -> bool {
        filter.is_empty() || filter.iter().any(|c| c.code() == self.device_class)
    }

    /// Whether the device exposes at least one usable bulk IN+OUT interface
    pub fn has_bulk_pair(&self) -> bool {
        !self.endpoints.is_empty()
    }
}

impl PartialEq for InventoryRecord {
    fn eq(&self, other: &Self) -> bool {
        self.vendor_id == other.vendor_id
            && self.product_id == other.product_id
            && self.bus == other.bus
            && self.port == other.port
            && self.device_class == other.device_class
            && self.device_subclass == other.device_subclass
    }
}

impl Eq for InventoryRecord {}

impl Hash for InventoryRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vendor_id.hash(state);
        self.product_id.hash(state);
        self.bus.hash(state);
        self.port.hash(state);
        self.device_class.hash(state);
        self.device_subclass.hash(state);
    }
}

impl fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id(Vid: {:04x}, Pid: {:04x}, Bus: {}, Port: {}, Class: {}, Subclass: {})",
            self.vendor_id,
            self.product_id,
            self.bus,
            self.port,
            self.device_class,
            self.device_subclass
        )
    }
}
