use crate::matcher::SubnetMatcher;
use crate::types::{MigrationResult, MigrationStats};

/// Render the migration report: statistics, created reservations with their
/// resolved subnet, unmatched IPs, warnings, errors, in that fixed order.
/// Pure formatting; printing is the caller's decision.
pub fn generate_report(
    stats: &MigrationStats,
    result: &MigrationResult,
    matcher: &SubnetMatcher,
) -> String {
    let mut out = String::new();

    out.push_str("Migration report\n");
    out.push_str("================\n");
    out.push_str(&format!(
        "ISC DHCP static mappings found: {}\n",
        stats.total_mappings
    ));
    out.push_str(&format!("Kea subnet4 entries found: {}\n", stats.total_subnets));
    out.push_str(&format!(
        "Reservations created: {}\n",
        stats.reservations_created
    ));
    out.push_str(&format!("Mappings skipped: {}\n", stats.reservations_failed));
    out.push_str(&format!("Unmatched IPs: {}\n", stats.unmatched_ips));
    out.push_str(&format!("Warnings: {}\n", stats.warnings));
    out.push_str(&format!("Errors: {}\n", stats.errors));

    if !result.reservations.is_empty() {
        out.push_str("\nReservations:\n");
        for reservation in &result.reservations {
            let subnet = matcher
                .subnet_info(&reservation.subnet_uuid)
                .map(|s| s.cidr())
                .unwrap_or_else(|| reservation.subnet_uuid.clone());
            let hostname = reservation.hostname.as_deref().unwrap_or("<no hostname>");
            out.push_str(&format!(
                "  {} ({}) -> {} [{}]\n",
                reservation.ip_address, reservation.hw_address, subnet, hostname
            ));
        }
    }

    if !result.unmatched_ips.is_empty() {
        out.push_str("\nUnmatched IPs:\n");
        for ip in &result.unmatched_ips {
            out.push_str(&format!("  {}\n", ip));
        }
    }

    if !result.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            out.push_str(&format!("  {}\n", warning));
        }
    }

    if !result.errors.is_empty() {
        out.push_str("\nErrors:\n");
        for error in &result.errors {
            out.push_str(&format!("  {}\n", error));
        }
    }

    out
}
