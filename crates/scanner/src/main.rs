//! usb-inventory
//!
//! Lists attached USB devices with their class, position on the bus, product
//! name and bulk IN/OUT endpoint pairs. Performs no transfers.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use common::setup_logging;
use inventory::DeviceClass;
use scanner::config::{self, InventoryConfig, OutputFormat};
use scanner::output::{render_json, render_text};
use scanner::usb::parse_device_id;
use scanner::{Scanner, describe};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "usb-inventory")]
#[command(
    author,
    version,
    about = "USB inventory - list devices and their bulk endpoint pairs"
)]
#[command(long_about = "
Enumerates USB devices attached to this host and reports, for each one,
its vendor/product ID, bus and port, device class, product name and every
interface that exposes both a bulk IN and a bulk OUT endpoint.

EXAMPLES:
    # List everything
    usb-inventory

    # Vendor-specific devices with product names
    usb-inventory --class vendor-specific --detailed

    # JSON output for scripts
    usb-inventory --json

    # Diagnostic report for one device
    usb-inventory --describe 0483:df11

CONFIGURATION:
    The tool looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/usb-inventory/config.toml
    3. /etc/usb-inventory/config.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short = 'C', long, value_name = "PATH")]
    config: Option<String>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// Only list devices of this class (repeatable, name or code)
    #[arg(short, long = "class", value_name = "CLASS")]
    class: Vec<DeviceClass>,

    /// Resolve product names (opens each device)
    #[arg(short, long)]
    detailed: bool,

    /// Skip the HID enumeration pass
    #[arg(long)]
    no_hid: bool,

    /// Print the inventory as JSON
    #[arg(long)]
    json: bool,

    /// Print a diagnostic report for one device and exit
    #[arg(long, value_name = "VID:PID")]
    describe: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Handle --save-config flag early (before loading config)
    if args.save_config {
        let config = InventoryConfig::default();
        let path = InventoryConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let config = if let Some(ref path) = args.config {
        config::load_config(path).context("Failed to load configuration")?
    } else {
        InventoryConfig::load_or_default()
    };

    // Use CLI log level if specified, otherwise use config value
    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.general.log_level);

    setup_logging(log_level).context("Failed to setup logging")?;

    info!("usb-inventory v{}", env!("CARGO_PKG_VERSION"));

    if let Some(ref target) = args.describe {
        let (vendor_id, product_id) = parse_device_id(target)
            .ok_or_else(|| anyhow!("Invalid device '{}', expected VID:PID", target))?;
        print!("{}", describe(vendor_id, product_id));
        return Ok(());
    }

    let mut options = config.scan_options()?;
    if !args.class.is_empty() {
        options.filter = args.class.clone();
    }
    if args.detailed {
        options.detailed = true;
    }
    if args.no_hid {
        options.hid_pass = false;
    }

    let records = Scanner::system().scan(&options);

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    match format {
        OutputFormat::Json => {
            println!("{}", render_json(&records).context("Failed to serialize inventory")?)
        }
        OutputFormat::Text => print!("{}", render_text(&records)),
    }

    Ok(())
}
