//! Inventory configuration management

use crate::usb::{DEFAULT_FALLBACK_NAME, ScanOptions};
use anyhow::{Context, Result, anyhow};
use inventory::DeviceClass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "GeneralSettings::default_log_level")]
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

impl GeneralSettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

/// Scan behavior
///
/// # Example Configuration
/// ```toml
/// [scan]
/// detailed = true
/// classes = ["vendor-specific", "0x02"]  # empty = all devices
/// hid_pass = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Resolve product names (opens every device)
    #[serde(default)]
    pub detailed: bool,
    /// Device classes to keep, by name (`hid`) or code (`0x03`)
    #[serde(default)]
    pub classes: Vec<String>,
    /// List HID devices in a second pass
    #[serde(default = "ScanSettings::default_hid_pass")]
    pub hid_pass: bool,
    /// Name for devices that cannot be opened
    #[serde(default = "ScanSettings::default_fallback_name")]
    pub fallback_name: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            detailed: false,
            classes: Vec::new(),
            hid_pass: Self::default_hid_pass(),
            fallback_name: Self::default_fallback_name(),
        }
    }
}

impl ScanSettings {
    fn default_hid_pass() -> bool {
        true
    }

    fn default_fallback_name() -> String {
        DEFAULT_FALLBACK_NAME.to_string()
    }

    /// Parse `classes` into a filter
    pub fn class_filter(&self) -> Result<Vec<DeviceClass>> {
        self.classes
            .iter()
            .map(|s| {
                s.parse::<DeviceClass>()
                    .with_context(|| format!("Invalid class filter '{}'", s))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

impl InventoryConfig {
    /// Load configuration from the specified path
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p
        } else {
            // Try standard locations in order
            let candidates = vec![
                Self::default_path(),
                PathBuf::from("/etc/usb-inventory/config.toml"),
            ];

            candidates
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| anyhow!("No configuration file found, using defaults"))?
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;

        tracing::info!("Loaded configuration from: {}", config_path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: InventoryConfig = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default() -> Self {
        match Self::load(None) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Failed to load config: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the specified path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("usb-inventory").join("config.toml")
        } else {
            PathBuf::from(".config/usb-inventory/config.toml")
        }
    }

    /// Scan options described by this configuration
    pub fn scan_options(&self) -> Result<ScanOptions> {
        Ok(ScanOptions {
            filter: self.scan.class_filter()?,
            detailed: self.scan.detailed,
            hid_pass: self.scan.hid_pass,
            fallback_name: self.scan.fallback_name.clone(),
        })
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        common::validate_log_level(&self.general.log_level)?;
        self.scan.class_filter()?;
        Ok(())
    }
}

/// Load a configuration file, expanding `~` in the path
pub fn load_config(path: &str) -> Result<InventoryConfig> {
    let path_buf = PathBuf::from(shellexpand::tilde(path).as_ref());
    InventoryConfig::load(Some(path_buf))
}
