use std::net::Ipv4Addr;

use crate::errors::MigrationError;
use crate::types::Subnet;

/// A subnet with its precomputed address interval. A /N range spans
/// 2^(32-N) addresses; /32 is a single host.
struct SubnetRange {
    subnet: Subnet,
    network: u32,
    broadcast: u32,
}

/// Answers "which configured subnet contains this IP". Built once per run,
/// read-only afterwards. Ranges are kept in construction order and the first
/// containing range wins, so overlapping subnets resolve the same way they
/// would in the source document.
pub struct SubnetMatcher {
    ranges: Vec<SubnetRange>,
}

impl SubnetMatcher {
    /// Build ranges from subnet records. Records with an unparsable base
    /// address or mask are dropped with a warning; construction itself
    /// never fails, it just degrades to fewer usable ranges.
    pub fn build(subnets: &[Subnet]) -> (SubnetMatcher, Vec<String>) {
        let mut ranges = Vec::with_capacity(subnets.len());
        let mut warnings = Vec::new();

        for subnet in subnets {
            let base = match parse_ipv4(&subnet.address) {
                Some(bits) => bits,
                None => {
                    warnings.push(format!(
                        "Skipping subnet {}: invalid base address '{}'",
                        subnet.uuid, subnet.address
                    ));
                    continue;
                }
            };

            let prefix = match mask_to_prefix(&subnet.mask) {
                Ok(prefix) => prefix,
                Err(e) => {
                    warnings.push(format!("Skipping subnet {}: {}", subnet.uuid, e));
                    continue;
                }
            };

            let mask = prefix_mask(prefix);
            let network = base & mask;
            ranges.push(SubnetRange {
                subnet: subnet.clone(),
                network,
                broadcast: network | !mask,
            });
        }

        (SubnetMatcher { ranges }, warnings)
    }

    /// Find the uuid of the first configured subnet whose range contains the
    /// address, network and broadcast included. Returns None for unparsable
    /// input; callers wanting to distinguish "bad IP" from "no subnet" must
    /// check syntax with [`SubnetMatcher::is_valid_ipv4`] first.
    pub fn find_containing_subnet(&self, ip: &str) -> Option<&str> {
        let addr = parse_ipv4(ip)?;
        self.ranges
            .iter()
            .find(|range| range.network <= addr && addr <= range.broadcast)
            .map(|range| range.subnet.uuid.as_str())
    }

    /// Look up a retained subnet record by uuid.
    pub fn subnet_info(&self, uuid: &str) -> Option<&Subnet> {
        self.ranges
            .iter()
            .find(|range| range.subnet.uuid == uuid)
            .map(|range| &range.subnet)
    }

    /// All retained subnets, in construction order.
    pub fn subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.ranges.iter().map(|range| &range.subnet)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Strict IPv4 syntax check: four dot-separated decimal octets in
    /// 0-255, nothing before or after.
    pub fn is_valid_ipv4(s: &str) -> bool {
        parse_ipv4(s).is_some()
    }
}

fn parse_ipv4(s: &str) -> Option<u32> {
    s.parse::<Ipv4Addr>().ok().map(u32::from)
}

fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

/// Reduce a mask to a prefix length. Digits only are taken as a prefix
/// length literal; a dotted quad is accepted when its 32-bit form is one
/// left-aligned block of 1-bits (255.255.255.0 -> 24).
pub fn mask_to_prefix(mask: &str) -> Result<u8, MigrationError> {
    if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) {
        let prefix: u8 = mask
            .parse()
            .map_err(|_| MigrationError::InvalidPrefixLength(mask.to_string()))?;
        if prefix > 32 {
            return Err(MigrationError::InvalidPrefixLength(mask.to_string()));
        }
        return Ok(prefix);
    }

    let bits =
        parse_ipv4(mask).ok_or_else(|| MigrationError::InvalidNetmask(mask.to_string()))?;
    if bits.count_ones() != bits.leading_ones() {
        return Err(MigrationError::InvalidNetmask(mask.to_string()));
    }
    Ok(bits.leading_ones() as u8)
}
