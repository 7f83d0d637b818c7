//! usb-inventory scanner
//!
//! Enumerates attached USB devices and reports, for each one, its identity,
//! bus position, class, a best-effort product name and every interface that
//! offers a bulk IN + bulk OUT endpoint pair.
//!
//! # Example
//!
//! ```no_run
//! use inventory::DeviceClass;
//!
//! // Vendor-specific devices only, with product names
//! let records = scanner::enumerate(&[DeviceClass::VendorSpecific], true);
//! for record in records.iter().filter(|r| r.has_bulk_pair()) {
//!     println!("{} {}", record, record.product_name);
//! }
//! ```
//!
//! Scanning never fails. Devices that cannot be read are left out, names
//! that cannot be resolved stay empty (or get a placeholder), and a bus that
//! cannot be opened at all contributes no records.

pub mod config;
pub mod error;
pub mod output;
pub mod usb;

pub use error::{Result, ScanError};
pub use usb::{ScanOptions, Scanner, describe, enumerate};
