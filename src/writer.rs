use anyhow::{anyhow, Result};
use xmltree::{Element, XMLNode};

use crate::errors::MigrationError;
use crate::types::Reservation;
use crate::xml_helpers::{find_mut_descendant_ci, get_child_ci, get_mut_child_ci};

fn text_element(name: &str, value: &str) -> Element {
    let mut elem = Element::new(name);
    elem.children.push(XMLNode::Text(value.to_string()));
    elem
}

/// Build a <reservation> element from a resolved reservation record.
/// Optional fields are omitted entirely when absent, never written as
/// empty elements.
pub fn create_reservation_element(reservation: &Reservation) -> Element {
    let mut elem = Element::new("reservation");
    elem.attributes
        .insert("uuid".to_string(), reservation.uuid.clone());

    elem.children.push(XMLNode::Element(text_element(
        "subnet",
        &reservation.subnet_uuid,
    )));
    elem.children.push(XMLNode::Element(text_element(
        "ip_address",
        &reservation.ip_address,
    )));
    elem.children.push(XMLNode::Element(text_element(
        "hw_address",
        &reservation.hw_address,
    )));

    if let Some(hostname) = &reservation.hostname {
        elem.children
            .push(XMLNode::Element(text_element("hostname", hostname)));
    }
    if let Some(descr) = &reservation.descr {
        elem.children
            .push(XMLNode::Element(text_element("description", descr)));
    }

    elem
}

/// Get the <Kea><dhcp4><reservations> node (case-insensitive).
/// Fails if the Kea or dhcp4 sections don't exist (don't auto-create them);
/// creates <reservations> if it doesn't exist but dhcp4 does.
pub fn get_reservations_node(root: &mut Element) -> Result<&mut Element> {
    let kea = find_mut_descendant_ci(root, "Kea").ok_or(MigrationError::KeaNotConfigured)?;
    let dhcp4 = find_mut_descendant_ci(kea, "dhcp4").ok_or(MigrationError::KeaNotConfigured)?;

    if get_child_ci(dhcp4, "reservations").is_none() {
        dhcp4
            .children
            .push(XMLNode::Element(Element::new("reservations")));
    }

    get_mut_child_ci(dhcp4, "reservations")
        .ok_or_else(|| anyhow!("Failed to access reservations node after creating it"))
}
