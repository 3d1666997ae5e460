pub mod cli;
mod errors;
mod extract;
mod matcher;
mod migrate;
mod types;
mod writer;
mod xml_helpers;

pub use errors::MigrationError;
pub use extract::{
    extract_existing_reservation_ips, extract_kea_subnets, extract_static_mappings,
};
pub use matcher::{mask_to_prefix, SubnetMatcher};
pub use migrate::{convert_config, generate_report, is_valid_mac, scan_config, Migrator};
pub use types::{
    MigrationOptions, MigrationResult, MigrationStats, MigrationSummary, Reservation,
    StaticMapping, Subnet, ValidationReport,
};
