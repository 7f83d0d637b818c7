//! Diagnostic report for a single device
//!
//! Opens the first device matching a VID:PID and reports where it sits on the
//! bus and how fast it runs. Meant for humans; the format is not stable.

use rusb::{Context, Speed, UsbContext};
use std::fmt::Write;
use tracing::warn;

/// Properties shown in the report
#[derive(Debug, Clone)]
pub struct DeviceProperties {
    pub bus_number: u8,
    /// Ports from the root hub down, empty when unavailable
    pub port_path: Vec<u8>,
    pub speed: Speed,
}

/// Human-readable report for the device `vendor_id:product_id`
pub fn describe(vendor_id: u16, product_id: u16) -> String {
    let version = rusb::version();
    let mut report = format_version_header(
        version.major(),
        version.minor(),
        version.micro(),
        version.nano(),
    );

    #[cfg(target_os = "android")]
    {
        let _ = writeln!(report, "Device info not available on Android.");
        let _ = writeln!(report, "Use Android UsbManager to access devices.");
        let _ = writeln!(
            report,
            "Requested VID:PID = {:x}:{:x}",
            vendor_id, product_id
        );
        return report;
    }

    #[cfg(not(target_os = "android"))]
    {
        let context = match Context::new() {
            Ok(context) => context,
            Err(e) => {
                warn!("Failed to initialize USB context: {}", e);
                return report;
            }
        };

        let properties = context
            .open_device_with_vid_pid(vendor_id, product_id)
            .map(|handle| {
                let device = handle.device();
                DeviceProperties {
                    bus_number: device.bus_number(),
                    port_path: device.port_numbers().unwrap_or_default(),
                    speed: device.speed(),
                }
            });

        report.push_str(&format_device_report(
            vendor_id,
            product_id,
            properties.as_ref(),
        ));
        report
    }
}

pub fn format_version_header(major: u16, minor: u16, micro: u16, nano: u16) -> String {
    format!("Using libusb v{}.{}.{}.{}\n\n", major, minor, micro, nano)
}

/// Device section of the report; `None` means the device could not be opened
pub fn format_device_report(
    vendor_id: u16,
    product_id: u16,
    properties: Option<&DeviceProperties>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Opening device {:x}:{:x}", vendor_id, product_id);

    let Some(properties) = properties else {
        let _ = writeln!(out, "  Failed.");
        return out;
    };

    if !properties.port_path.is_empty() {
        let path = properties
            .port_path
            .iter()
            .map(|port| port.to_string())
            .collect::<Vec<_>>()
            .join("->");
        let _ = writeln!(out, "\nDevice properties:");
        let _ = writeln!(out, "        bus number: {}", properties.bus_number);
        let _ = writeln!(out, "         port path: {} (from root hub)", path);
    }
    let _ = writeln!(out, "             speed: {}", speed_name(properties.speed));
    out
}

pub fn speed_name(speed: Speed) -> &'static str {
    match speed {
        Speed::Low => "1.5 Mbit/s (USB LowSpeed)",
        Speed::Full => "12 Mbit/s (USB FullSpeed)",
        Speed::High => "480 Mbit/s (USB HighSpeed)",
        Speed::Super => "5000 Mbit/s (USB SuperSpeed)",
        Speed::SuperPlus => "10000 Mbit/s (USB SuperSpeedPlus)",
        _ => "Unknown",
    }
}

/// Parse a `VID:PID` pair such as `1234:5678` or `0x1234:0x5678`
pub fn parse_device_id(s: &str) -> Option<(u16, u16)> {
    let (vid, pid) = s.trim().split_once(':')?;
    Some((parse_hex_id(vid)?, parse_hex_id(pid)?))
}

fn parse_hex_id(s: &str) -> Option<u16> {
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex.is_empty() || hex.len() > 4 {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}
