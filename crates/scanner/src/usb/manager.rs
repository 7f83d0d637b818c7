//! Enumeration orchestrator
//!
//! Runs a full scan: a libusb pass over every attached device, followed by an
//! independent HID pass. The two passes do not affect each other. A bus that
//! cannot be initialized still gets its HID devices listed, and a HID failure
//! keeps the bus records.
//!
//! Devices visible through both paths appear twice. The HID entry carries no
//! topology, so it cannot be reliably matched to its bus entry.
//!
//! # Departures from a plain scan-then-append
//!
//! - A failed bus init does not end the scan. The HID pass still runs.
//! - HID entries are not appended unconditionally. They are reported as
//!   class HID and filtered like bus records, so a non-empty filter without
//!   HID drops the whole pass.

use crate::usb::backend::UsbBus;
use crate::usb::classifier::classify;
use crate::usb::device::RusbBus;
use crate::usb::hid::{HidEntry, HidSource, SystemHid, system_hid};
use crate::usb::registry::{NameLookup, SystemLookup, system_lookup};
use crate::usb::strings::{DEFAULT_FALLBACK_NAME, resolve_name};
use inventory::{DeviceClass, InventoryRecord};
use tracing::{debug, error, info, warn};

/// Options for one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Accepted device classes, empty accepts everything
    pub filter: Vec<DeviceClass>,
    /// Resolve product names (opens devices, may query the registry)
    pub detailed: bool,
    /// Append the HID pass
    pub hid_pass: bool,
    /// Name given to devices that cannot be opened and are not in the registry
    pub fallback_name: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            filter: Vec::new(),
            detailed: false,
            hid_pass: true,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
        }
    }
}

impl ScanOptions {
    pub fn new(filter: &[DeviceClass], detailed: bool) -> Self {
        Self {
            filter: filter.to_vec(),
            detailed,
            ..Self::default()
        }
    }
}

/// USB inventory scanner
///
/// Holds the three collaborators and nothing else: every scan creates and
/// releases its own bus context.
pub struct Scanner<B, H, L> {
    bus: B,
    hid: H,
    lookup: L,
}

impl Scanner<RusbBus, SystemHid, SystemLookup> {
    /// Scanner over libusb, hidapi and the platform registry
    pub fn system() -> Self {
        Self::new(RusbBus, system_hid(), system_lookup())
    }
}

impl<B: UsbBus, H: HidSource, L: NameLookup> Scanner<B, H, L> {
    pub fn new(bus: B, hid: H, lookup: L) -> Self {
        Self { bus, hid, lookup }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Scan the bus, then the HID devices
    pub fn scan(&self, options: &ScanOptions) -> Vec<InventoryRecord> {
        let mut records = self.scan_bus(options);
        let bus_count = records.len();

        if options.hid_pass {
            records.extend(self.scan_hid(&options.filter));
        }

        info!(
            "Inventory: {} bus device(s), {} HID device(s)",
            bus_count,
            records.len() - bus_count
        );
        records
    }

    /// libusb pass
    ///
    /// The device list and the context are released before returning.
    fn scan_bus(&self, options: &ScanOptions) -> Vec<InventoryRecord> {
        let context = match self.bus.init() {
            Ok(context) => context,
            Err(e) => {
                warn!("Failed to initialize USB context: {}", e);
                return Vec::new();
            }
        };

        let devices = match self.bus.list_devices(&context) {
            Ok(devices) => devices,
            Err(e) => {
                error!("Failed to list USB devices: {}", e);
                return Vec::new();
            }
        };

        let records: Vec<InventoryRecord> = devices
            .iter()
            .filter_map(|device| self.inspect_device(&context, device, options))
            .collect();

        debug!(
            "Bus pass kept {} of {} devices",
            records.len(),
            devices.len()
        );
        records
    }

    /// Build the record for one device, or `None` if it is skipped
    fn inspect_device(
        &self,
        context: &B::Context,
        device: &B::Device,
        options: &ScanOptions,
    ) -> Option<InventoryRecord> {
        let descriptor = match self.bus.device_descriptor(device) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                debug!("Skipping device with unreadable descriptor: {}", e);
                return None;
            }
        };

        let mut record = InventoryRecord::new(descriptor.vendor_id, descriptor.product_id)
            .with_topology(self.bus.bus_number(device), self.bus.port_number(device))
            .with_class(descriptor.class_code, descriptor.sub_class_code);

        if !record.matches_filter(&options.filter) {
            debug!("Device ignored by class filter: {}", record);
            return None;
        }

        record.endpoints = match self.bus.active_config(device) {
            Ok(config) => classify(&config),
            Err(e) => {
                debug!("No active configuration for {}: {}", record, e);
                Vec::new()
            }
        };

        if options.detailed {
            record.product_name = resolve_name(
                &self.bus,
                context,
                device,
                &descriptor,
                &self.lookup,
                &options.fallback_name,
            );
        }

        debug!(
            "Added {} name={:?} bulk_pairs={}",
            record,
            record.product_name,
            record.endpoints.len()
        );
        Some(record)
    }

    /// HID pass
    ///
    /// Entries are reported as class HID, so a non-empty filter without HID
    /// skips the whole pass.
    fn scan_hid(&self, filter: &[DeviceClass]) -> Vec<InventoryRecord> {
        if !filter.is_empty() && !filter.contains(&DeviceClass::Hid) {
            debug!("HID pass skipped by class filter");
            return Vec::new();
        }

        match self.hid.enumerate() {
            Ok(entries) => entries.map(hid_record).collect(),
            Err(e) => {
                warn!("HID enumeration failed: {}", e);
                Vec::new()
            }
        }
    }
}

fn hid_record(entry: HidEntry) -> InventoryRecord {
    InventoryRecord::new(entry.vendor_id, entry.product_id).with_class(DeviceClass::Hid.code(), 0)
}

/// Scan attached devices with the system collaborators
///
/// Never fails: anything that goes wrong shows up as missing records or
/// empty names.
pub fn enumerate(filter: &[DeviceClass], detailed: bool) -> Vec<InventoryRecord> {
    Scanner::system().scan(&ScanOptions::new(filter, detailed))
}
