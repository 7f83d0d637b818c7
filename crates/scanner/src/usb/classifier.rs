//! Descriptor classification
//!
//! Walks a configuration descriptor and reports every alternate setting that
//! carries both a bulk IN and a bulk OUT endpoint. Interrupt and isochronous
//! endpoints are looked at but never produce output.

use crate::usb::backend::{AltSettingSummary, ConfigSummary, EndpointSummary};
use inventory::{
    EndpointPair, TRANSFER_TYPE_BULK, TRANSFER_TYPE_INTERRUPT, TRANSFER_TYPE_ISOCHRONOUS,
};
use tracing::{debug, trace};

/// Collect one [`EndpointPair`] per qualifying alternate setting
///
/// Pairs come out in descriptor order: by interface, then by alternate
/// setting.
pub fn classify(config: &ConfigSummary) -> Vec<EndpointPair> {
    config
        .interfaces
        .iter()
        .flat_map(|interface| interface.alt_settings.iter())
        .filter_map(classify_alt_setting)
        .collect()
}

/// Classify a single alternate setting
///
/// If the setting has several bulk endpoints in the same direction, the last
/// one listed is kept.
pub fn classify_alt_setting(alt: &AltSettingSummary) -> Option<EndpointPair> {
    debug!(
        "Interface {} alt {} (class {:#04x}, subclass {:#04x}, protocol {:#04x})",
        alt.interface_number,
        alt.setting_number,
        alt.class_code,
        alt.sub_class_code,
        alt.protocol_code
    );

    let mut bulk_in: Option<&EndpointSummary> = None;
    let mut bulk_out: Option<&EndpointSummary> = None;

    for endpoint in &alt.endpoints {
        let direction = if endpoint.is_in() { "IN" } else { "OUT" };
        trace!(
            "  ({}) {:#04x} max_packet {:#x} attributes {:#04x}",
            direction, endpoint.address, endpoint.max_packet_size, endpoint.attributes
        );

        match endpoint.transfer_type() {
            TRANSFER_TYPE_BULK => {
                if endpoint.is_in() {
                    bulk_in = Some(endpoint);
                } else {
                    bulk_out = Some(endpoint);
                }
            }
            TRANSFER_TYPE_INTERRUPT => {}
            TRANSFER_TYPE_ISOCHRONOUS => {}
            _ => {}
        }
    }

    let (ep_in, ep_out) = (bulk_in?, bulk_out?);

    Some(EndpointPair {
        interface_number: alt.interface_number,
        interface_class: alt.class_code,
        interface_subclass: alt.sub_class_code,
        interface_protocol: alt.protocol_code,
        endpoint_in: ep_in.address,
        endpoint_out: ep_out.address,
        max_packet_in: ep_in.max_packet_size,
        max_packet_out: ep_out.max_packet_size,
        attributes_in: ep_in.attributes,
        attributes_out: ep_out.attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usb::backend::InterfaceSummary;

    fn endpoint(address: u8, attributes: u8, max_packet_size: u16) -> EndpointSummary {
        EndpointSummary {
            address,
            attributes,
            max_packet_size,
        }
    }

    fn alt(interface_number: u8, setting: u8, endpoints: Vec<EndpointSummary>) -> AltSettingSummary {
        AltSettingSummary {
            interface_number,
            setting_number: setting,
            class_code: 0xFF,
            sub_class_code: 0x00,
            protocol_code: 0x00,
            endpoints,
        }
    }

    fn config(alts: Vec<AltSettingSummary>) -> ConfigSummary {
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

    #[test]
    fn test_bulk_pair_is_reported() {
        let cfg = config(vec![alt(
            0,
            0,
            vec![endpoint(0x81, 0x02, 64), endpoint(0x02, 0x02, 64)],
        )]);

        let pairs = classify(&cfg);
        assert_eq!(pairs.len(), 1);
        let pair = pairs[0];
        assert_eq!(pair.interface_number, 0);
        assert_eq!(pair.interface_class, 0xFF);
        assert_eq!(pair.endpoint_in, 0x81);
        assert_eq!(pair.endpoint_out, 0x02);
        assert_eq!(pair.max_packet_in, 64);
        assert_eq!(pair.max_packet_out, 64);
        assert_eq!(pair.attributes_in, 0x02);
        assert_eq!(pair.attributes_out, 0x02);
    }

    #[test]
    fn test_interrupt_and_isochronous_only_yield_nothing() {
        let cfg = config(vec![
            alt(0, 0, vec![endpoint(0x81, 0x03, 8), endpoint(0x01, 0x03, 8)]),
            alt(1, 0, vec![endpoint(0x82, 0x05, 192), endpoint(0x02, 0x09, 192)]),
        ]);
        assert!(classify(&cfg).is_empty());
    }

    #[test]
    fn test_single_direction_bulk_is_discarded() {
        let cfg = config(vec![
            alt(0, 0, vec![endpoint(0x81, 0x02, 512)]),
            alt(1, 0, vec![endpoint(0x02, 0x02, 512), endpoint(0x83, 0x03, 16)]),
        ]);
        assert!(classify(&cfg).is_empty());
    }

    #[test]
    fn test_bulk_in_and_interrupt_out_is_discarded() {
        let cfg = config(vec![alt(
            0,
            0,
            vec![endpoint(0x81, 0x02, 64), endpoint(0x01, 0x03, 64)],
        )]);
        assert!(classify(&cfg).is_empty());
    }

    #[test]
    fn test_directions_do_not_pair_across_alt_settings() {
        let cfg = config(vec![
            alt(0, 0, vec![endpoint(0x81, 0x02, 64)]),
            alt(0, 1, vec![endpoint(0x01, 0x02, 64)]),
        ]);
        assert!(classify(&cfg).is_empty());
    }

    #[test]
    fn test_one_pair_per_qualifying_alt_setting() {
        // CDC-ACM style: interrupt notification on interface 0, data on 1
        let cfg = config(vec![
            alt(0, 0, vec![endpoint(0x83, 0x03, 16)]),
            alt(1, 0, vec![]),
            alt(1, 1, vec![endpoint(0x81, 0x02, 512), endpoint(0x01, 0x02, 512)]),
            alt(2, 0, vec![endpoint(0x84, 0x02, 64), endpoint(0x04, 0x02, 64)]),
        ]);

        let pairs = classify(&cfg);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].interface_number, 1);
        assert_eq!(pairs[0].max_packet_in, 512);
        assert_eq!(pairs[1].interface_number, 2);
        assert_eq!(pairs[1].endpoint_in, 0x84);
    }

    #[test]
    fn test_last_bulk_endpoint_per_direction_wins() {
        let cfg = config(vec![alt(
            0,
            0,
            vec![
                endpoint(0x81, 0x02, 64),
                endpoint(0x01, 0x02, 64),
                endpoint(0x82, 0x02, 512),
                endpoint(0x03, 0x03, 8),
            ],
        )]);

        let pairs = classify(&cfg);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].endpoint_in, 0x82);
        assert_eq!(pairs[0].max_packet_in, 512);
        // The interrupt OUT endpoint does not replace the bulk one
        assert_eq!(pairs[0].endpoint_out, 0x01);
    }

    #[test]
    fn test_pair_addresses_follow_direction_bit() {
        let cfg = config(vec![alt(
            0,
            0,
            vec![endpoint(0x05, 0x02, 64), endpoint(0x86, 0x02, 64)],
        )]);

        let pair = classify(&cfg)[0];
        assert_ne!(pair.endpoint_in & 0x80, 0);
        assert_eq!(pair.endpoint_out & 0x80, 0);
        assert_eq!(pair.endpoint_in_number(), 6);
        assert_eq!(pair.endpoint_out_number(), 5);
    }

    #[test]
    fn test_empty_config() {
        assert!(classify(&ConfigSummary::default()).is_empty());
    }
}
