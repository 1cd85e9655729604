//! Record classification against an inventory snapshot.
//!
//! [`classify`] is a pure function: the same record and snapshot always yield
//! the same findings. It produces one finding per examined value, so an A
//! record with two stale IPs yields two dangling findings.

use crate::types::{
    has_dualstack_marker, normalize_dns_name, DnsRecord, Finding, InventoryDimension,
    InventorySnapshot, RecordType,
};

/// DNS suffixes of provider-managed load balancers.
///
/// CNAME targets ending in one of these are checked against the load
/// balancer inventory; any other CNAME target is external and not validated.
pub const LOAD_BALANCER_SUFFIXES: &[&str] = &[".elb.amazonaws.com", ".elb.amazonaws.com.cn"];

/// True if `dns_name` looks like a provider load balancer name
#[must_use]
pub fn is_load_balancer_name(dns_name: &str) -> bool {
    let name = normalize_dns_name(dns_name);
    has_dualstack_marker(&name)
        || LOAD_BALANCER_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
}

/// Classify every value of `record` against `inventory`.
///
/// Always returns at least one finding.
#[must_use]
pub fn classify(record: &DnsRecord, inventory: &InventorySnapshot) -> Vec<Finding> {
    match &record.record_type {
        RecordType::A => classify_addresses(record, inventory),
        RecordType::Cname => classify_cname(record, inventory),
        RecordType::Alias => vec![classify_alias(record, inventory)],
        RecordType::Other(_) => vec![Finding::indeterminate(record, None, "unsupported type")],
    }
}

fn classify_addresses(record: &DnsRecord, inventory: &InventorySnapshot) -> Vec<Finding> {
    if record.values.is_empty() {
        return vec![Finding::indeterminate(record, None, "no values to check")];
    }

    if !inventory.is_available(InventoryDimension::Instances) {
        return record
            .values
            .iter()
            .map(|ip| Finding::indeterminate(record, Some(ip), "instance inventory unavailable"))
            .collect();
    }

    record
        .values
        .iter()
        .map(|ip| {
            if inventory.has_instance_ip(ip) {
                Finding::live(record, ip, "matches a live instance private IP")
            } else {
                Finding::dangling(record, ip, "no live instance holds this private IP")
            }
        })
        .collect()
}

fn classify_cname(record: &DnsRecord, inventory: &InventorySnapshot) -> Vec<Finding> {
    if record.values.is_empty() {
        return vec![Finding::indeterminate(record, None, "no values to check")];
    }

    record
        .values
        .iter()
        .map(|target| {
            if is_load_balancer_name(target) {
                check_load_balancer(record, target, inventory)
            } else {
                Finding::indeterminate(record, Some(target), "external target, not validated")
            }
        })
        .collect()
}

fn classify_alias(record: &DnsRecord, inventory: &InventorySnapshot) -> Finding {
    let Some(target) = &record.alias_target else {
        return Finding::indeterminate(record, None, "alias record without target");
    };

    if !has_dualstack_marker(&target.dns_name) {
        return Finding::indeterminate(
            record,
            Some(&target.dns_name),
            "alias target is not a dual-stack load balancer",
        );
    }

    check_load_balancer(record, &target.dns_name, inventory)
}

fn check_load_balancer(record: &DnsRecord, dns_name: &str, inventory: &InventorySnapshot) -> Finding {
    if !inventory.is_available(InventoryDimension::LoadBalancers) {
        return Finding::indeterminate(record, Some(dns_name), "load balancer inventory unavailable");
    }

    if inventory.has_load_balancer(dns_name) {
        Finding::live(record, dns_name, "matches a live load balancer")
    } else {
        Finding::dangling(record, dns_name, "no load balancer answers to this name")
    }
}
