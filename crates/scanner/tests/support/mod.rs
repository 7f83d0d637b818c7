//! Mock collaborators for scanner tests
//!
//! Every mock counts its calls so tests can assert which collaborators a scan
//! touched.

#![allow(dead_code)]

use scanner::ScanError;
use scanner::usb::{
    AltSettingSummary, ConfigSummary, DeviceRegistry, DeviceSummary, EndpointSummary, HidEntry,
    HidSource, InterfaceSummary, NameLookup, RegistryEntry, UsbBus,
};
use std::cell::Cell;
use std::collections::HashMap;

pub const BULK: u8 = 0x02;
pub const INTERRUPT: u8 = 0x03;
pub const ISOCHRONOUS: u8 = 0x01;

/// One simulated device on the bus
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    pub bus: u8,
    pub port: u8,
    /// `None` makes the descriptor read fail
    pub descriptor: Option<DeviceSummary>,
    /// `None` makes the configuration read fail
    pub config: Option<ConfigSummary>,
    pub openable: bool,
    pub strings: HashMap<u8, String>,
}

impl MockDevice {
    pub fn new(bus: u8, port: u8, vendor_id: u16, product_id: u16, class_code: u8) -> Self {
        Self {
            bus,
            port,
            descriptor: Some(DeviceSummary {
                vendor_id,
                product_id,
                class_code,
                ..DeviceSummary::default()
            }),
            config: Some(ConfigSummary::default()),
            openable: true,
            strings: HashMap::new(),
        }
    }

    /// The vendor-specific flasher: 1234:5678 with bulk 0x81/0x02, 64 bytes
    pub fn flasher(bus: u8, port: u8) -> Self {
        Self::new(bus, port, 0x1234, 0x5678, 0xFF).with_config(config(vec![alt(
            0,
            0,
            vec![endpoint(0x81, BULK, 64), endpoint(0x02, BULK, 64)],
        )]))
    }

    /// A HID keyboard with a single interrupt IN endpoint
    pub fn keyboard(bus: u8, port: u8) -> Self {
        Self::new(bus, port, 0x046d, 0xc31c, 0x03)
            .with_config(config(vec![alt(0, 0, vec![endpoint(0x81, INTERRUPT, 8)])]))
    }

    pub fn with_config(mut self, config: ConfigSummary) -> Self {
        self.config = Some(config);
        self
    }

    pub fn without_config(mut self) -> Self {
        self.config = None;
        self
    }

    pub fn without_descriptor(mut self) -> Self {
        self.descriptor = None;
        self
    }

    pub fn closed(mut self) -> Self {
        self.openable = false;
        self
    }

    pub fn with_strings(mut self, manufacturer: Option<&str>, product: Option<&str>) -> Self {
        let descriptor = self.descriptor.as_mut().expect("descriptor");
        if let Some(m) = manufacturer {
            descriptor.manufacturer_index = Some(1);
            self.strings.insert(1, m.to_string());
        }
        if let Some(p) = product {
            descriptor.product_index = Some(2);
            self.strings.insert(2, p.to_string());
        }
        self
    }

    /// Declare a string index whose read fails
    pub fn with_unreadable_product(mut self) -> Self {
        let descriptor = self.descriptor.as_mut().expect("descriptor");
        descriptor.product_index = Some(9);
        self
    }
}

pub fn endpoint(address: u8, attributes: u8, max_packet_size: u16) -> EndpointSummary {
    EndpointSummary {
        address,
        attributes,
        max_packet_size,
    }
}

pub fn alt(interface_number: u8, setting: u8, endpoints: Vec<EndpointSummary>) -> AltSettingSummary {
    AltSettingSummary {
        interface_number,
        setting_number: setting,
        class_code: 0xFF,
        sub_class_code: 0x00,
        protocol_code: 0x00,
        endpoints,
    }
}

/// Group alternate settings into interfaces by interface number
pub fn config(alts: Vec<AltSettingSummary>) -> ConfigSummary {
    let mut interfaces: Vec<InterfaceSummary> = Vec::new();
    for a in alts {
        match interfaces.iter_mut().find(|i| i.number == a.interface_number) {
            Some(interface) => interface.alt_settings.push(a),
            None => interfaces.push(InterfaceSummary {
                number: a.interface_number,
                alt_settings: vec![a],
            }),
        }
    }
    ConfigSummary { interfaces }
}

/// Simulated bus
#[derive(Debug, Default)]
pub struct MockBus {
    pub devices: Vec<MockDevice>,
    pub init_fails: bool,
    pub list_fails: bool,
    pub inits: Cell<usize>,
    pub config_reads: Cell<usize>,
    pub opens: Cell<usize>,
    pub string_reads: Cell<usize>,
}

impl MockBus {
    pub fn new(devices: Vec<MockDevice>) -> Self {
        Self {
            devices,
            ..Self::default()
        }
    }

    pub fn failing_init() -> Self {
        Self {
            init_fails: true,
            ..Self::default()
        }
    }
}

/// Enumeration context token
pub struct MockContext;

impl UsbBus for MockBus {
    type Context = MockContext;
    type Device = MockDevice;
    type Handle = MockDevice;

    fn init(&self) -> scanner::Result<MockContext> {
        self.inits.set(self.inits.get() + 1);
        if self.init_fails {
            return Err(ScanError::Usb(rusb::Error::NoDevice));
        }
        Ok(MockContext)
    }

    fn list_devices(&self, _context: &MockContext) -> scanner::Result<Vec<MockDevice>> {
        if self.list_fails {
            return Err(ScanError::Usb(rusb::Error::NoMem));
        }
        Ok(self.devices.clone())
    }

    fn device_descriptor(&self, device: &MockDevice) -> scanner::Result<DeviceSummary> {
        device.descriptor.ok_or(ScanError::Usb(rusb::Error::Io))
    }

    fn active_config(&self, device: &MockDevice) -> scanner::Result<ConfigSummary> {
        self.config_reads.set(self.config_reads.get() + 1);
        device.config.clone().ok_or(ScanError::Usb(rusb::Error::NotFound))
    }

    fn bus_number(&self, device: &MockDevice) -> u8 {
        device.bus
    }

    fn port_number(&self, device: &MockDevice) -> u8 {
        device.port
    }

    fn open(&self, _context: &MockContext, device: &MockDevice) -> scanner::Result<MockDevice> {
        self.opens.set(self.opens.get() + 1);
        if device.openable {
            Ok(device.clone())
        } else {
            Err(ScanError::Usb(rusb::Error::Access))
        }
    }

    fn read_string_ascii(&self, handle: &MockDevice, index: u8) -> scanner::Result<String> {
        self.string_reads.set(self.string_reads.get() + 1);
        handle
            .strings
            .get(&index)
            .cloned()
            .ok_or(ScanError::Usb(rusb::Error::Pipe))
    }
}

/// Simulated HID library
#[derive(Debug, Default)]
pub struct MockHid {
    pub entries: Vec<HidEntry>,
    pub fails: bool,
    pub calls: Cell<usize>,
}

impl MockHid {
    pub fn new(ids: &[(u16, u16)]) -> Self {
        Self {
            entries: ids
                .iter()
                .map(|&(vendor_id, product_id)| HidEntry {
                    vendor_id,
                    product_id,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            ..Self::default()
        }
    }
}

impl HidSource for MockHid {
    type Entries = std::vec::IntoIter<HidEntry>;

    fn enumerate(&self) -> scanner::Result<Self::Entries> {
        self.calls.set(self.calls.get() + 1);
        if self.fails {
            return Err(ScanError::Hid("hid_init failed".to_string()));
        }
        Ok(self.entries.clone().into_iter())
    }
}

/// Simulated registry
#[derive(Debug, Default)]
pub struct MockRegistry {
    pub entries: Vec<RegistryEntry>,
    pub calls: Cell<usize>,
}

impl MockRegistry {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(id, description)| RegistryEntry {
                    hardware_ids: vec![id.to_string()],
                    description: Some(description.to_string()),
                })
                .collect(),
            calls: Cell::new(0),
        }
    }
}

impl DeviceRegistry for MockRegistry {
    fn entries(&self) -> scanner::Result<Vec<RegistryEntry>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.entries.clone())
    }
}

/// Lookup that only counts calls
#[derive(Debug, Default)]
pub struct CountingLookup {
    pub calls: Cell<usize>,
}

impl NameLookup for CountingLookup {
    fn lookup(&self, _vendor_id: u16, _product_id: u16) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        None
    }
}
