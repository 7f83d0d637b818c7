//! USB subsystem
//!
//! Device enumeration and descriptor classification.
//!
//! This module implements the scanning core:
//! - Bus enumeration through libusb ([`device`])
//! - Bulk endpoint pair classification ([`classifier`])
//! - Product name resolution with registry fallback ([`strings`], [`registry`])
//! - HID enumeration pass ([`hid`])
//! - Scan orchestration ([`manager`])
//!
//! Everything runs synchronously on the calling thread. A scan blocks for as
//! long as device opens and registry queries take; callers that need to stay
//! responsive run it on a worker thread.

pub mod backend;
pub mod classifier;
pub mod describe;
pub mod device;
pub mod hid;
pub mod manager;
pub mod registry;
pub mod strings;

#[cfg(target_os = "windows")]
pub mod setupapi;

// Re-export public types
pub use backend::{
    AltSettingSummary, ConfigSummary, DeviceSummary, EndpointSummary, InterfaceSummary, UsbBus,
};
pub use classifier::{classify, classify_alt_setting};
pub use describe::{describe, parse_device_id};
pub use device::RusbBus;
pub use hid::{HidEntry, HidSource, NoHid, SystemHid, system_hid};
pub use manager::{ScanOptions, Scanner, enumerate};
pub use registry::{
    DeviceRegistry, NameLookup, NoLookup, RegistryEntry, RegistryLookup, SystemLookup,
    system_lookup,
};
pub use strings::{DEFAULT_FALLBACK_NAME, resolve_name};

#[cfg(feature = "hid")]
pub use hid::HidApiSource;
