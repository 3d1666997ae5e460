use anyhow::Result;
use std::collections::HashSet;
use xmltree::Element;

use crate::types::{StaticMapping, Subnet};
use crate::xml_helpers::{find_descendant_ci, get_child_ci, name_matches};

fn child_text(el: &Element, name: &str) -> Option<String> {
    get_child_ci(el, name)
        .and_then(|e| e.get_text())
        .map(|s| s.to_string())
}

/// Extract ISC static mappings from the XML tree, preserving document
/// order across all interface sections. Entries with an empty mac or ip
/// are kept as-is; the migration engine diagnoses them.
pub fn extract_static_mappings(root: &Element) -> Result<Vec<StaticMapping>> {
    let mut mappings = Vec::new();

    // Navigate to <dhcpd> (case-insensitive)
    if let Some(dhcpd) = get_child_ci(root, "dhcpd") {
        // Iterate over all interface nodes (lan, wan, opt1, etc.)
        for iface_elem in dhcpd.children.iter().filter_map(|n| n.as_element()) {
            for child in iface_elem.children.iter().filter_map(|n| n.as_element()) {
                if !name_matches(&child.name, "staticmap") {
                    continue;
                }
                mappings.push(StaticMapping {
                    mac: child_text(child, "mac").unwrap_or_default(),
                    ipaddr: child_text(child, "ipaddr").unwrap_or_default(),
                    hostname: child_text(child, "hostname"),
                    cid: child_text(child, "cid"),
                    descr: child_text(child, "descr"),
                });
            }
        }
    }

    Ok(mappings)
}

/// Extract Kea subnet definitions in document order. The <subnet> text is
/// split into base address and mask; the mask half may be a prefix length
/// or a dotted netmask, and the matcher validates both.
pub fn extract_kea_subnets(root: &Element) -> Result<Vec<Subnet>> {
    let mut subnets = Vec::new();

    if let Some(kea) = find_descendant_ci(root, "Kea") {
        if let Some(dhcp4) = find_descendant_ci(kea, "dhcp4") {
            // Standard path is <dhcp4><subnets><subnet4>; fall back to
            // <subnet4> directly under <dhcp4>
            let container = get_child_ci(dhcp4, "subnets").unwrap_or(dhcp4);
            for subnet4 in container.children.iter().filter_map(|n| n.as_element()) {
                if !name_matches(&subnet4.name, "subnet4") {
                    continue;
                }
                if let Some(uuid) = subnet4.attributes.get("uuid") {
                    if let Some(cidr) = child_text(subnet4, "subnet") {
                        let (address, mask) = match cidr.split_once('/') {
                            Some((address, mask)) => (address.to_string(), mask.to_string()),
                            None => (cidr.clone(), String::new()),
                        };
                        subnets.push(Subnet {
                            uuid: uuid.to_string(),
                            address,
                            mask,
                        });
                    }
                }
            }
        }
    }

    Ok(subnets)
}

/// Collect IP addresses already present under <reservations>.
pub fn extract_existing_reservation_ips(root: &Element) -> Result<HashSet<String>> {
    let mut ips = HashSet::new();

    if let Some(kea) = find_descendant_ci(root, "Kea") {
        if let Some(dhcp4) = find_descendant_ci(kea, "dhcp4") {
            if let Some(reservations) = get_child_ci(dhcp4, "reservations") {
                for reservation in reservations.children.iter().filter_map(|n| n.as_element()) {
                    if !name_matches(&reservation.name, "reservation") {
                        continue;
                    }
                    if let Some(ip) = child_text(reservation, "ip_address") {
                        if !ip.is_empty() {
                            ips.insert(ip);
                        }
                    }
                }
            }
        }
    }

    Ok(ips)
}
