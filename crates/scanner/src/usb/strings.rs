//! Product name resolution
//!
//! The name comes from the device's own string descriptors when the device
//! can be opened. Opening is often refused by the OS even for devices that
//! enumerate fine, so a closed device gets a placeholder that a
//! [`NameLookup`] may replace with a registry description.

use crate::usb::backend::{DeviceSummary, UsbBus};
use crate::usb::registry::NameLookup;
use tracing::debug;

/// Placeholder for devices that cannot be opened
pub const DEFAULT_FALLBACK_NAME: &str = "DEVICE USB";

/// Upper bound on a string descriptor, terminator included
pub const STRING_BUFFER_LEN: usize = 256;

/// Resolve a best-effort product name for `device`
pub fn resolve_name<B: UsbBus, L: NameLookup>(
    bus: &B,
    context: &B::Context,
    device: &B::Device,
    descriptor: &DeviceSummary,
    lookup: &L,
    fallback_name: &str,
) -> String {
    match bus.open(context, device) {
        Ok(handle) => read_product_name(bus, &handle, descriptor),
        Err(e) => {
            debug!(
                "Cannot open {:04x}:{:04x} ({}), falling back to name lookup",
                descriptor.vendor_id, descriptor.product_id, e
            );
            lookup
                .lookup(descriptor.vendor_id, descriptor.product_id)
                .unwrap_or_else(|| fallback_name.to_string())
        }
    }
}

/// Build "<manufacturer> <product>" from an open handle
///
/// A declared string that cannot be read is left out.
pub fn read_product_name<B: UsbBus>(
    bus: &B,
    handle: &B::Handle,
    descriptor: &DeviceSummary,
) -> String {
    let manufacturer = descriptor
        .manufacturer_index
        .and_then(|idx| read_string(bus, handle, idx));
    let product = descriptor
        .product_index
        .and_then(|idx| read_string(bus, handle, idx));

    [manufacturer, product]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_string<B: UsbBus>(bus: &B, handle: &B::Handle, index: u8) -> Option<String> {
    match bus.read_string_ascii(handle, index) {
        Ok(s) if !s.is_empty() => Some(truncate_to_buffer(s)),
        Ok(_) => None,
        Err(e) => {
            debug!("String descriptor {} unavailable: {}", index, e);
            None
        }
    }
}

fn truncate_to_buffer(mut s: String) -> String {
    let max = STRING_BUFFER_LEN - 1;
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}
