//! Inventory data model for usb-inventory
//!
//! This crate defines the value records produced by a bus scan: one
//! [`InventoryRecord`] per device, carrying the [`EndpointPair`]s found on
//! its bulk-capable interfaces, plus the [`DeviceClass`] codes used for
//! filtering.
//!
//! # Example
//!
//! ```
//! use inventory::{DeviceClass, InventoryRecord};
//!
//! let record = InventoryRecord::new(0x1234, 0x5678)
//!     .with_topology(1, 4)
//!     .with_class(DeviceClass::VendorSpecific.code(), 0);
//!
//! assert!(record.matches_filter(&[DeviceClass::VendorSpecific]));
//! assert!(!record.matches_filter(&[DeviceClass::Hid]));
//! assert_eq!(
//!     record.to_string(),
//!     "Id(Vid: 1234, Pid: 5678, Bus: 1, Port: 4, Class: 255, Subclass: 0)"
//! );
//! ```

pub mod class;
pub mod record;

pub use class::{DeviceClass, ParseClassError};
pub use record::{
    ENDPOINT_DIR_IN, ENDPOINT_NUMBER_MASK, EndpointPair, InventoryRecord, TRANSFER_TYPE_BULK,
    TRANSFER_TYPE_CONTROL, TRANSFER_TYPE_INTERRUPT, TRANSFER_TYPE_ISOCHRONOUS,
    TRANSFER_TYPE_MASK,
};
