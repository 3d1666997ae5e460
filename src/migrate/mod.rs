use anyhow::{anyhow, Context, Result};
use std::io::{Read, Write};
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::extract::{
    extract_existing_reservation_ips, extract_kea_subnets, extract_static_mappings,
};
use crate::matcher::SubnetMatcher;
use crate::types::{MigrationOptions, MigrationSummary, Reservation};
use crate::writer::{create_reservation_element, get_reservations_node};
use crate::xml_helpers::has_kea_dhcp4;
use crate::MigrationError;

mod engine;
mod report;

pub use engine::{is_valid_mac, Migrator};
pub use report::generate_report;

fn short_uuid(uuid: &str) -> &str {
    uuid.get(..8).unwrap_or(uuid)
}

struct MigrationRun {
    summary: MigrationSummary,
    to_write: Vec<Reservation>,
}

/// Extract, match and migrate against a parsed document. Shared by scan and
/// convert; only convert goes on to mutate the tree.
fn run_migration(root: &Element, options: &MigrationOptions) -> Result<MigrationRun> {
    let mappings = extract_static_mappings(root)?;
    let subnets = extract_kea_subnets(root)?;
    let existing_ips = extract_existing_reservation_ips(root)?;

    if options.fail_if_existing && !existing_ips.is_empty() {
        return Err(anyhow!(
            "Existing reservations found ({} IPs) and --fail-if-existing is set. Aborting.",
            existing_ips.len()
        ));
    }

    let (matcher, build_warnings) = SubnetMatcher::build(&subnets);

    if options.verbose && !matcher.is_empty() {
        println!("Configured subnets:");
        for subnet in matcher.subnets() {
            println!("  {} {}", short_uuid(&subnet.uuid), subnet.cidr());
        }
    }

    let migrator = Migrator::new(&matcher);
    let validation = migrator.validate(&mappings);

    let mut result = migrator.migrate(&mappings);
    if !build_warnings.is_empty() {
        // subnet construction warnings come first, then per-mapping ones
        let mut warnings = build_warnings;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
    }

    let mut reserved_ips = existing_ips;
    let mut to_write = Vec::with_capacity(result.reservations.len());
    let mut skipped_existing = 0;
    for reservation in &result.reservations {
        if reserved_ips.contains(&reservation.ip_address) {
            skipped_existing += 1;
            if options.verbose {
                println!(
                    "  SKIP: {} ({}) - IP already reserved",
                    reservation.ip_address, reservation.hw_address
                );
            }
            continue;
        }
        reserved_ips.insert(reservation.ip_address.clone());
        if options.verbose {
            println!(
                "  ADD: {} ({}) -> subnet {} [{}]",
                reservation.ip_address,
                reservation.hw_address,
                short_uuid(&reservation.subnet_uuid),
                reservation.hostname.as_deref().unwrap_or("<no hostname>")
            );
        }
        to_write.push(reservation.clone());
    }

    let stats = migrator.stats(&mappings, &result);
    let report = generate_report(&stats, &result, &matcher);

    Ok(MigrationRun {
        summary: MigrationSummary {
            stats,
            result,
            validation,
            skipped_existing,
            report,
        },
        to_write,
    })
}

/// Scan the configuration and report what a conversion would do, without
/// modifying anything. Structural problems show up as validation issues
/// rather than errors.
pub fn scan_config<R: Read>(reader: R, options: &MigrationOptions) -> Result<MigrationSummary> {
    let root = Element::parse(reader).context("Failed to parse XML")?;
    let run = run_migration(&root, options)?;
    Ok(run.summary)
}

/// Convert static mappings into Kea reservations, writing the updated XML.
/// Fails when mappings exist but no usable Kea subnet does, distinguishing
/// a missing Kea section from an empty one.
pub fn convert_config<R: Read, W: Write>(
    reader: R,
    writer: W,
    options: &MigrationOptions,
) -> Result<MigrationSummary> {
    let mut root = Element::parse(reader).context("Failed to parse XML")?;
    let run = run_migration(&root, options)?;

    if run.summary.stats.total_mappings > 0 && run.summary.stats.total_subnets == 0 {
        if !has_kea_dhcp4(&root) {
            return Err(MigrationError::KeaNotConfigured.into());
        }
        return Err(MigrationError::NoSubnets.into());
    }

    if !run.to_write.is_empty() {
        let reservations_node = get_reservations_node(&mut root)?;
        for reservation in &run.to_write {
            reservations_node
                .children
                .push(XMLNode::Element(create_reservation_element(reservation)));
        }
    }

    // Write the updated XML with human-readable indentation
    let emitter_config = EmitterConfig::new()
        .perform_indent(true)
        .indent_string("  ")
        .write_document_declaration(true);
    root.write_with_config(writer, emitter_config)
        .context("Failed to write XML")?;

    Ok(run.summary)
}
