//! Windows device registry through SetupAPI

use crate::usb::registry::{DeviceRegistry, RegistryEntry, split_multi_sz};
use crate::{Result, ScanError};
use windows::Win32::Devices::DeviceAndDriverInstallation::{
    DIGCF_ALLCLASSES, DIGCF_PRESENT, HDEVINFO, SETUP_DI_REGISTRY_PROPERTY, SP_DEVINFO_DATA,
    SPDRP_DEVICEDESC, SPDRP_HARDWAREID, SetupDiDestroyDeviceInfoList, SetupDiEnumDeviceInfo,
    SetupDiGetClassDevsW, SetupDiGetDeviceRegistryPropertyW,
};
use windows::core::w;

/// Registry property buffer size in bytes
const PROPERTY_BUFFER_LEN: usize = 1024;

/// Present devices under the `USB` enumerator, all setup classes
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupApiRegistry;

/// Owned device information set, destroyed on drop
struct DeviceInfoSet(HDEVINFO);

impl Drop for DeviceInfoSet {
    fn drop(&mut self) {
        unsafe {
            let _ = SetupDiDestroyDeviceInfoList(self.0);
        }
    }
}

impl DeviceRegistry for SetupApiRegistry {
    fn entries(&self) -> Result<Vec<RegistryEntry>> {
        let handle = unsafe {
            SetupDiGetClassDevsW(None, w!("USB"), None, DIGCF_PRESENT | DIGCF_ALLCLASSES)
        }
        .map_err(|e| ScanError::Registry(format!("SetupDiGetClassDevs failed: {}", e)))?;

        if handle.is_invalid() {
            return Err(ScanError::Registry(
                windows::core::Error::from_win32().to_string(),
            ));
        }
        let set = DeviceInfoSet(handle);

        let mut entries = Vec::new();
        let mut info_data = SP_DEVINFO_DATA {
            cbSize: std::mem::size_of::<SP_DEVINFO_DATA>() as u32,
            ..Default::default()
        };
        let mut index = 0;

        while unsafe { SetupDiEnumDeviceInfo(set.0, index, &mut info_data) }.is_ok() {
            index += 1;

            let Some(hardware_ids) = registry_property(&set, &info_data, SPDRP_HARDWAREID) else {
                continue;
            };
            let description = registry_property(&set, &info_data, SPDRP_DEVICEDESC)
                .and_then(|values| values.into_iter().next());

            entries.push(RegistryEntry {
                hardware_ids,
                description,
            });
        }

        Ok(entries)
    }
}

fn registry_property(
    set: &DeviceInfoSet,
    info_data: &SP_DEVINFO_DATA,
    property: SETUP_DI_REGISTRY_PROPERTY,
) -> Option<Vec<String>> {
    let mut buffer = [0u8; PROPERTY_BUFFER_LEN];
    unsafe {
        SetupDiGetDeviceRegistryPropertyW(set.0, info_data, property, None, Some(&mut buffer), None)
    }
    .ok()?;

    let wide: Vec<u16> = buffer
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Some(split_multi_sz(&wide))
}
