use uuid::Uuid;

use crate::matcher::SubnetMatcher;
use crate::types::{
    MigrationResult, MigrationStats, Reservation, StaticMapping, ValidationReport,
};

/// Check hardware address syntax: six colon- or dash-separated two-hex-digit
/// groups, or a bare run of twelve hex digits. Case-insensitive.
pub fn is_valid_mac(mac: &str) -> bool {
    if mac.len() == 12 && mac.bytes().all(|b| b.is_ascii_hexdigit()) {
        return true;
    }

    let sep = if mac.contains(':') {
        ':'
    } else if mac.contains('-') {
        '-'
    } else {
        return false;
    };

    let mut groups = 0;
    for group in mac.split(sep) {
        if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return false;
        }
        groups += 1;
    }
    groups == 6
}

/// Turns static mappings into reservations against a built matcher. One
/// pass, input order preserved, diagnostics collected instead of thrown.
pub struct Migrator<'a> {
    matcher: &'a SubnetMatcher,
}

impl<'a> Migrator<'a> {
    pub fn new(matcher: &'a SubnetMatcher) -> Migrator<'a> {
        Migrator { matcher }
    }

    /// Process every mapping. Each one ends in exactly one outcome: a
    /// reservation, a warning, or an error. A bad record never aborts the
    /// batch.
    pub fn migrate(&self, mappings: &[StaticMapping]) -> MigrationResult {
        let mut result = MigrationResult::default();

        for mapping in mappings {
            if mapping.mac.is_empty() || mapping.ipaddr.is_empty() {
                result.warnings.push(format!(
                    "Skipping mapping with missing required fields (mac: '{}', ip: '{}')",
                    mapping.mac, mapping.ipaddr
                ));
                continue;
            }

            if !is_valid_mac(&mapping.mac) {
                result.warnings.push(format!(
                    "Skipping {}: invalid MAC address format '{}'",
                    mapping.ipaddr, mapping.mac
                ));
                continue;
            }

            if !SubnetMatcher::is_valid_ipv4(&mapping.ipaddr) {
                result.errors.push(format!(
                    "Invalid IP address '{}' (mac {})",
                    mapping.ipaddr, mapping.mac
                ));
                continue;
            }

            let subnet_uuid = match self.matcher.find_containing_subnet(&mapping.ipaddr) {
                Some(uuid) => uuid.to_string(),
                None => {
                    result.unmatched_ips.push(mapping.ipaddr.clone());
                    result.warnings.push(format!(
                        "IP address {} does not match any configured subnet",
                        mapping.ipaddr
                    ));
                    continue;
                }
            };

            result.reservations.push(Reservation {
                uuid: Uuid::new_v4().to_string(),
                subnet_uuid,
                hw_address: mapping.mac.clone(),
                ip_address: mapping.ipaddr.clone(),
                // prefer hostname over cid
                hostname: mapping.hostname.clone().or_else(|| mapping.cid.clone()),
                descr: mapping.descr.clone(),
            });
        }

        result
    }

    /// Derive summary counts from a finished run. Pure function of its
    /// inputs.
    pub fn stats(&self, mappings: &[StaticMapping], result: &MigrationResult) -> MigrationStats {
        MigrationStats {
            total_mappings: mappings.len(),
            total_subnets: self.matcher.len(),
            reservations_created: result.reservations.len(),
            reservations_failed: mappings.len() - result.reservations.len(),
            unmatched_ips: result.unmatched_ips.len(),
            warnings: result.warnings.len(),
            errors: result.errors.len(),
        }
    }

    /// Advisory pre-flight check. Reports issues; the caller decides whether
    /// any of them aborts the run.
    pub fn validate(&self, mappings: &[StaticMapping]) -> ValidationReport {
        let mut issues = Vec::new();

        if self.matcher.is_empty() {
            issues.push("no subnets configured".to_string());
        }
        if mappings.is_empty() {
            issues.push("no mappings found".to_string());
        } else if mappings
            .iter()
            .all(|m| m.mac.is_empty() || m.ipaddr.is_empty())
        {
            issues.push("no valid mappings (every entry is missing a MAC or IP)".to_string());
        }

        ValidationReport {
            valid: issues.is_empty(),
            issues,
        }
    }
}
