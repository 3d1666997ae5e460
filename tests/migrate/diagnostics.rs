use pf2kea::{generate_report, scan_config, MigrationOptions, Migrator, StaticMapping, Subnet, SubnetMatcher};
use std::io::Cursor;

use crate::common::TEST_XML_MIXED;

#[test]
fn test_mixed_input_produces_complete_diagnostics() {
    let summary = scan_config(Cursor::new(TEST_XML_MIXED), &MigrationOptions::default())
        .expect("scan should succeed");

    assert_eq!(summary.stats.total_mappings, 6);
    assert_eq!(summary.stats.reservations_created, 2);
    assert_eq!(summary.stats.reservations_failed, 4);
    assert_eq!(summary.stats.errors, 1);
    assert_eq!(summary.stats.warnings, 3);
    assert_eq!(summary.stats.unmatched_ips, 1);

    // warnings follow input order: missing fields, bad MAC, unmatched
    assert!(summary.result.warnings[0].contains("missing required fields"));
    assert!(summary.result.warnings[1].contains("invalid MAC address format"));
    assert!(summary.result.warnings[2].contains("does not match any configured subnet"));

    assert_eq!(summary.result.unmatched_ips, vec!["172.16.0.1"]);
    assert!(summary.result.errors[0].contains("not-an-ip"));
}

#[test]
fn test_unmatched_ip_end_to_end() {
    let xml = r#"<?xml version="1.0"?>
<opnsense>
    <dhcpd>
        <lan>
            <staticmap>
                <mac>00:11:22:33:44:55</mac>
                <ipaddr>172.16.0.1</ipaddr>
            </staticmap>
        </lan>
    </dhcpd>
    <Kea>
        <dhcp4>
            <subnets>
                <subnet4 uuid="s1">
                    <subnet>192.168.1.0/24</subnet>
                </subnet4>
            </subnets>
        </dhcp4>
    </Kea>
</opnsense>
"#;
    let summary =
        scan_config(Cursor::new(xml), &MigrationOptions::default()).expect("scan should succeed");

    assert_eq!(summary.stats.reservations_created, 0);
    assert_eq!(summary.result.unmatched_ips, vec!["172.16.0.1"]);
    assert_eq!(summary.result.warnings.len(), 1);
    assert!(summary.result.errors.is_empty());
}

#[test]
fn test_missing_mac_never_reaches_other_diagnostics() {
    let xml = r#"<?xml version="1.0"?>
<opnsense>
    <dhcpd>
        <lan>
            <staticmap>
                <ipaddr>192.168.1.10</ipaddr>
            </staticmap>
        </lan>
    </dhcpd>
    <Kea>
        <dhcp4>
            <subnets>
                <subnet4 uuid="s1">
                    <subnet>192.168.1.0/24</subnet>
                </subnet4>
            </subnets>
        </dhcp4>
    </Kea>
</opnsense>
"#;
    let summary =
        scan_config(Cursor::new(xml), &MigrationOptions::default()).expect("scan should succeed");

    assert_eq!(summary.result.warnings.len(), 1);
    assert!(summary.result.warnings[0].contains("missing required fields"));
    assert!(summary.result.unmatched_ips.is_empty());
    assert!(summary.result.errors.is_empty());
    assert!(summary.result.reservations.is_empty());
}

#[test]
fn test_report_reflects_every_diagnostic_class() {
    let subnets = vec![Subnet {
        uuid: "s1".to_string(),
        address: "192.168.1.0".to_string(),
        mask: "24".to_string(),
    }];
    let (matcher, _) = SubnetMatcher::build(&subnets);
    let migrator = Migrator::new(&matcher);

    let mappings = vec![
        StaticMapping {
            mac: "00:11:22:33:44:55".to_string(),
            ipaddr: "192.168.1.10".to_string(),
            hostname: Some("host-a".to_string()),
            cid: None,
            descr: None,
        },
        StaticMapping {
            mac: "00:11:22:33:44:56".to_string(),
            ipaddr: "172.16.0.9".to_string(),
            hostname: None,
            cid: None,
            descr: None,
        },
        StaticMapping {
            mac: "00:11:22:33:44:57".to_string(),
            ipaddr: "999.999.999.999".to_string(),
            hostname: None,
            cid: None,
            descr: None,
        },
    ];
    let result = migrator.migrate(&mappings);
    let stats = migrator.stats(&mappings, &result);
    let report = generate_report(&stats, &result, &matcher);

    assert!(report.contains("ISC DHCP static mappings found: 3"));
    assert!(report.contains("192.168.1.10 (00:11:22:33:44:55) -> 192.168.1.0/24 [host-a]"));
    assert!(report.contains("  172.16.0.9\n"));
    assert!(report.contains("does not match any configured subnet"));
    assert!(report.contains("Invalid IP address '999.999.999.999'"));
}
