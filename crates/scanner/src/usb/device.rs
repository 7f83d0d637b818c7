//! libusb bus backend
//!
//! Implements [`UsbBus`] over `rusb`, converting its descriptor views into
//! owned summaries.

use crate::Result;
use crate::usb::backend::{
    AltSettingSummary, ConfigSummary, DeviceSummary, EndpointSummary, InterfaceSummary, UsbBus,
};
use rusb::{
    ConfigDescriptor, Context, Device, DeviceHandle, EndpointDescriptor, SyncType, TransferType,
    UsageType, UsbContext,
};
use tracing::debug;

/// Bus backend over a private libusb context
#[derive(Debug, Clone, Copy, Default)]
pub struct RusbBus;

impl UsbBus for RusbBus {
    type Context = Context;
    type Device = Device<Context>;
    type Handle = DeviceHandle<Context>;

    fn init(&self) -> Result<Context> {
        // Android hands out devices through UsbManager file descriptors only
        #[cfg(target_os = "android")]
        rusb::disable_device_discovery()?;

        let mut context = Context::new()?;
        context.set_log_level(rusb::LogLevel::None);
        Ok(context)
    }

    fn list_devices(&self, context: &Context) -> Result<Vec<Device<Context>>> {
        let devices: Vec<_> = context.devices()?.iter().collect();
        debug!("libusb reports {} devices", devices.len());
        Ok(devices)
    }

    fn device_descriptor(&self, device: &Device<Context>) -> Result<DeviceSummary> {
        let descriptor = device.device_descriptor()?;

        Ok(DeviceSummary {
            vendor_id: descriptor.vendor_id(),
            product_id: descriptor.product_id(),
            class_code: descriptor.class_code(),
            sub_class_code: descriptor.sub_class_code(),
            manufacturer_index: descriptor.manufacturer_string_index(),
            product_index: descriptor.product_string_index(),
        })
    }

    fn active_config(&self, device: &Device<Context>) -> Result<ConfigSummary> {
        let config = device.active_config_descriptor()?;
        Ok(summarize_config(&config))
    }

    fn bus_number(&self, device: &Device<Context>) -> u8 {
        device.bus_number()
    }

    fn port_number(&self, device: &Device<Context>) -> u8 {
        device.port_number()
    }

    fn open(&self, _context: &Context, device: &Device<Context>) -> Result<DeviceHandle<Context>> {
        Ok(device.open()?)
    }

    fn read_string_ascii(&self, handle: &DeviceHandle<Context>, index: u8) -> Result<String> {
        Ok(handle.read_string_descriptor_ascii(index)?)
    }
}

fn summarize_config(config: &ConfigDescriptor) -> ConfigSummary {
    let interfaces = config
        .interfaces()
        .map(|interface| InterfaceSummary {
            number: interface.number(),
            alt_settings: interface
                .descriptors()
                .map(|alt| AltSettingSummary {
                    interface_number: alt.interface_number(),
                    setting_number: alt.setting_number(),
                    class_code: alt.class_code(),
                    sub_class_code: alt.sub_class_code(),
                    protocol_code: alt.protocol_code(),
                    endpoints: alt
                        .endpoint_descriptors()
                        .map(|endpoint| EndpointSummary {
                            address: endpoint.address(),
                            attributes: raw_attributes(&endpoint),
                            max_packet_size: endpoint.max_packet_size(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    ConfigSummary { interfaces }
}

/// Rebuild `bmAttributes` from the decoded fields rusb exposes
fn raw_attributes(endpoint: &EndpointDescriptor) -> u8 {
    encode_attributes(
        endpoint.transfer_type(),
        endpoint.sync_type(),
        endpoint.usage_type(),
    )
}

fn encode_attributes(transfer: TransferType, sync: SyncType, usage: UsageType) -> u8 {
    let transfer = match transfer {
        TransferType::Control => 0,
        TransferType::Isochronous => 1,
        TransferType::Bulk => 2,
        TransferType::Interrupt => 3,
    };
    let sync = match sync {
        SyncType::NoSync => 0,
        SyncType::Asynchronous => 1,
        SyncType::Adaptive => 2,
        SyncType::Synchronous => 3,
    };
    let usage = match usage {
        UsageType::Data => 0,
        UsageType::Feedback => 1,
        UsageType::FeedbackData => 2,
        UsageType::Reserved => 3,
    };
    transfer | (sync << 2) | (usage << 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_attributes() {
        assert_eq!(
            encode_attributes(TransferType::Bulk, SyncType::NoSync, UsageType::Data),
            0x02
        );
        assert_eq!(
            encode_attributes(TransferType::Interrupt, SyncType::NoSync, UsageType::Data),
            0x03
        );
        assert_eq!(
            encode_attributes(
                TransferType::Isochronous,
                SyncType::Asynchronous,
                UsageType::Data
            ),
            0x05
        );
        assert_eq!(
            encode_attributes(
                TransferType::Isochronous,
                SyncType::NoSync,
                UsageType::Feedback
            ),
            0x11
        );
    }

    #[test]
    fn test_encoded_transfer_type_survives_mask() {
        let attributes =
            encode_attributes(TransferType::Bulk, SyncType::Synchronous, UsageType::Reserved);
        assert_eq!(attributes & inventory::TRANSFER_TYPE_MASK, inventory::TRANSFER_TYPE_BULK);
    }
}
