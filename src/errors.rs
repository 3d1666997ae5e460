use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Invalid netmask: {0} (bits are not contiguous)")]
    InvalidNetmask(String),

    #[error("Invalid prefix length: {0} (expected 0-32)")]
    InvalidPrefixLength(String),

    #[error("Kea DHCPv4 not configured in config.xml. Please configure Kea first.")]
    KeaNotConfigured,

    #[error("No usable Kea subnets found. Please configure at least one Kea subnet before migration.")]
    NoSubnets,
}
