//! Inventory rendering for the command line

use inventory::{EndpointPair, InventoryRecord};
use std::fmt::Write;

/// Render records as text, one line per device plus one per bulk pair
pub fn render_text(records: &[InventoryRecord]) -> String {
    if records.is_empty() {
        return "No USB devices found.\n".to_string();
    }

    let mut out = format!("Found {} USB device(s):\n\n", records.len());
    for record in records {
        out.push_str(&format_record(record));
        out.push('\n');
        for pair in &record.endpoints {
            out.push_str("    ");
            out.push_str(&format_pair(pair));
            out.push('\n');
        }
    }
    out
}

/// Render records as pretty-printed JSON
pub fn render_json(records: &[InventoryRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

pub fn format_record(record: &InventoryRecord) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "Bus {:03} Port {:03} ID {:04x}:{:04x} class {:02x}/{:02x}",
        record.bus, record.port, record.vendor_id, record.product_id, record.device_class,
        record.device_subclass
    );
    if !record.product_name.is_empty() {
        line.push(' ');
        line.push_str(&record.product_name);
    }
    line
}

pub fn format_pair(pair: &EndpointPair) -> String {
    format!(
        "if {} ({:02x}/{:02x}/{:02x}) in {:#04x} [{}] out {:#04x} [{}]",
        pair.interface_number,
        pair.interface_class,
        pair.interface_subclass,
        pair.interface_protocol,
        pair.endpoint_in,
        pair.max_packet_in,
        pair.endpoint_out,
        pair.max_packet_out
    )
}
