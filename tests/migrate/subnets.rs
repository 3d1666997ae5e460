use pf2kea::{convert_config, scan_config, MigrationOptions};
use std::io::Cursor;

use crate::common::{
    parse_output, reservations_in, TEST_XML_HOST_ROUTE, TEST_XML_NETMASK_FORMS, TEST_XML_OVERLAP,
};

#[test]
fn test_dotted_netmask_subnet_matches() {
    let summary = scan_config(
        Cursor::new(TEST_XML_NETMASK_FORMS),
        &MigrationOptions::default(),
    )
    .expect("scan should succeed");

    // the dotted 255.255.0.0 subnet is usable and contains 10.20.30.40
    assert_eq!(summary.stats.reservations_created, 1);
    assert!(summary
        .result
        .reservations
        .iter()
        .any(|r| r.subnet_uuid == "dotted" && r.ip_address == "10.20.30.40"));
}

#[test]
fn test_non_contiguous_netmask_is_dropped() {
    let summary = scan_config(
        Cursor::new(TEST_XML_NETMASK_FORMS),
        &MigrationOptions::default(),
    )
    .expect("scan should succeed");

    // only one of the two subnet definitions survives construction
    assert_eq!(summary.stats.total_subnets, 1);
    assert!(summary
        .result
        .warnings
        .iter()
        .any(|w| w.contains("broken") && w.contains("255.0.255.0")));

    // 172.16.5.5 would only have matched the dropped subnet
    assert_eq!(summary.result.unmatched_ips, vec!["172.16.5.5"]);
}

#[test]
fn test_overlap_resolves_to_first_subnet_in_document() {
    let mut output = Vec::new();
    let summary = convert_config(
        Cursor::new(TEST_XML_OVERLAP),
        &mut output,
        &MigrationOptions::default(),
    )
    .expect("convert should succeed");

    assert_eq!(summary.stats.reservations_created, 1);
    assert_eq!(summary.result.reservations[0].subnet_uuid, "wide");

    let root = parse_output(&output);
    let reservations = reservations_in(&root);
    assert_eq!(reservations.len(), 1);
    assert_eq!(
        reservations[0]
            .get_child("subnet")
            .and_then(|e| e.get_text())
            .as_deref(),
        Some("wide")
    );
}

#[test]
fn test_host_route_matches_exactly_one_address() {
    let summary = scan_config(
        Cursor::new(TEST_XML_HOST_ROUTE),
        &MigrationOptions::default(),
    )
    .expect("scan should succeed");

    assert_eq!(summary.stats.reservations_created, 1);
    assert_eq!(summary.result.reservations[0].ip_address, "192.168.1.100");
    assert_eq!(summary.result.unmatched_ips, vec!["192.168.1.101"]);
}
