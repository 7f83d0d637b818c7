//! Common utilities for usb-inventory
//!
//! This crate provides functionality shared by the scanner library and its
//! command-line front end: error handling, logging setup, and fixture
//! builders for tests.

pub mod error;
pub mod logging;
pub mod test_utils;

pub use error::{Error, Result};
pub use logging::{LOG_LEVELS, setup_logging, validate_log_level};
