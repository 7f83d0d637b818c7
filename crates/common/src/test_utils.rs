//! Test utilities for usb-inventory
//!
//! Provides fixture builders for inventory records shared across crates.
//!
//! # Example
//!
//! ```
//! use common::test_utils::create_mock_record;
//!
//! let record = create_mock_record(1, 0x1234, 0x5678);
//! assert_eq!(record.vendor_id, 0x1234);
//! assert_eq!(record.bus, 1);
//! ```

use inventory::{EndpointPair, InventoryRecord, TRANSFER_TYPE_BULK};

/// Create a mock record on bus 1
///
/// # Arguments
/// * `port` - Port number
/// * `vendor_id` - USB Vendor ID
/// * `product_id` - USB Product ID
pub fn create_mock_record(port: u8, vendor_id: u16, product_id: u16) -> InventoryRecord {
    create_mock_record_with_class(port, vendor_id, product_id, 0x00, 0x00)
}

/// Create a mock record with a specific USB class
pub fn create_mock_record_with_class(
    port: u8,
    vendor_id: u16,
    product_id: u16,
    class: u8,
    subclass: u8,
) -> InventoryRecord {
    let mut record = InventoryRecord::new(vendor_id, product_id)
        .with_topology(1, port)
        .with_class(class, subclass);
    record.product_name = format!("Test Product {}", port);
    record
}

/// Create a mock vendor-specific device exposing one bulk pair (0x81/0x02)
pub fn create_mock_vendor_device(port: u8) -> InventoryRecord {
    let mut record = create_mock_record_with_class(port, 0x1234, 0x5678, 0xFF, 0x00);
    record.endpoints.push(create_mock_bulk_pair(0, 0x81, 0x02, 64));
    record
}

/// Create a mock HID record the way the HID pass reports it
pub fn create_mock_hid_record(vendor_id: u16, product_id: u16) -> InventoryRecord {
    InventoryRecord::new(vendor_id, product_id).with_class(0x03, 0x00)
}

/// Create a mock bulk endpoint pair on a vendor-specific interface
pub fn create_mock_bulk_pair(
    interface_number: u8,
    endpoint_in: u8,
    endpoint_out: u8,
    max_packet: u16,
) -> EndpointPair {
    EndpointPair {
        interface_number,
        interface_class: 0xFF,
        interface_subclass: 0x00,
        interface_protocol: 0x00,
        endpoint_in,
        endpoint_out,
        max_packet_in: max_packet,
        max_packet_out: max_packet,
        attributes_in: TRANSFER_TYPE_BULK,
        attributes_out: TRANSFER_TYPE_BULK,
    }
}

/// Create a list of mock records on consecutive ports
///
/// # Example
/// ```
/// use common::test_utils::create_mock_record_list;
///
/// let records = create_mock_record_list(5);
/// assert_eq!(records.len(), 5);
/// ```
pub fn create_mock_record_list(count: u8) -> Vec<InventoryRecord> {
    (1..=count)
        .map(|i| create_mock_record(i, 0x1000 + u16::from(i), 0x2000 + u16::from(i)))
        .collect()
}
