use pf2kea::{convert_config, MigrationOptions};
use std::collections::HashSet;
use std::io::Cursor;

use crate::common::{parse_output, reservation_fields, reservations_in, TEST_XML, TEST_XML_MIXED};

#[test]
fn test_convert_creates_reservation_with_all_fields() {
    let mut output = Vec::new();
    let summary = convert_config(
        Cursor::new(TEST_XML),
        &mut output,
        &MigrationOptions::default(),
    )
    .expect("convert should succeed");

    assert_eq!(summary.stats.reservations_created, 1);
    assert!(summary.result.warnings.is_empty());
    assert!(summary.result.errors.is_empty());

    let root = parse_output(&output);
    let reservations = reservations_in(&root);
    assert_eq!(reservations.len(), 1);

    let reservation = reservations[0];
    assert!(
        reservation.attributes.contains_key("uuid"),
        "Reservation should have UUID"
    );
    assert_eq!(
        reservation_fields(reservation),
        vec![
            ("subnet".to_string(), "s1".to_string()),
            ("ip_address".to_string(), "10.0.0.5".to_string()),
            ("hw_address".to_string(), "AA:BB:CC:DD:EE:FF".to_string()),
            ("hostname".to_string(), "testhost".to_string()),
            ("description".to_string(), "Test Server".to_string()),
        ]
    );
}

#[test]
fn test_reservations_keep_input_order_and_unique_uuids() {
    let mut output = Vec::new();
    convert_config(
        Cursor::new(TEST_XML_MIXED),
        &mut output,
        &MigrationOptions::default(),
    )
    .expect("convert should succeed");

    let root = parse_output(&output);
    let reservations = reservations_in(&root);

    // two of the six mappings survive, in their original relative order
    let ips: Vec<String> = reservations
        .iter()
        .map(|r| {
            r.get_child("ip_address")
                .and_then(|e| e.get_text())
                .map(|s| s.to_string())
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(ips, vec!["192.168.1.10", "192.168.1.20"]);

    let uuids: HashSet<String> = reservations
        .iter()
        .filter_map(|r| r.attributes.get("uuid").cloned())
        .collect();
    assert_eq!(uuids.len(), 2, "generated uuids should be unique");
}

#[test]
fn test_cid_becomes_hostname_when_hostname_missing() {
    let mut output = Vec::new();
    convert_config(
        Cursor::new(TEST_XML_MIXED),
        &mut output,
        &MigrationOptions::default(),
    )
    .expect("convert should succeed");

    let root = parse_output(&output);
    let reservations = reservations_in(&root);
    let last = reservations.last().expect("should have reservations");

    assert_eq!(
        last.get_child("hostname")
            .and_then(|e| e.get_text())
            .as_deref(),
        Some("client-sixty")
    );
    // no descr on that mapping, so no description element either
    assert!(last.get_child("description").is_none());
}
