/// One ISC static mapping as it appears in the source document. Fields are
/// carried verbatim; validation happens in the migration engine, not here.
#[derive(Debug, Clone)]
pub struct StaticMapping {
    pub mac: String,
    pub ipaddr: String,
    pub hostname: Option<String>,
    pub cid: Option<String>,
    pub descr: Option<String>,
}

/// One Kea subnet definition. The mask may be a prefix length ("24") or a
/// dotted-quad netmask ("255.255.255.0"); the matcher validates both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    pub uuid: String,
    pub address: String,
    pub mask: String,
}

impl Subnet {
    /// Render as base/mask, the way it appeared in the document.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.address, self.mask)
    }
}

/// A resolved reservation. `subnet_uuid` always names a subnet the matcher
/// retained at resolution time. Immutable once created.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub uuid: String,
    pub subnet_uuid: String,
    pub hw_address: String,
    pub ip_address: String,
    pub hostname: Option<String>,
    pub descr: Option<String>,
}

/// Output of one migration run: reservations in input order plus three
/// ordered diagnostic sequences. Entries are never deduplicated.
#[derive(Debug, Default)]
pub struct MigrationResult {
    pub reservations: Vec<Reservation>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub unmatched_ips: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MigrationStats {
    pub total_mappings: usize,
    pub total_subnets: usize,
    pub reservations_created: usize,
    pub reservations_failed: usize,
    pub unmatched_ips: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// Advisory pre-flight result. Callers decide whether an issue aborts.
#[derive(Debug)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    pub fail_if_existing: bool,
    pub verbose: bool,
}

/// What scan/convert hand back to the caller.
#[derive(Debug)]
pub struct MigrationSummary {
    pub stats: MigrationStats,
    pub result: MigrationResult,
    pub validation: ValidationReport,
    pub skipped_existing: usize,
    pub report: String,
}
