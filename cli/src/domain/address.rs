//! Local-address matching for the DNS readiness check.
//!
//! Addresses are compared as `IpAddr`, which carries no IPv6 scope id, so
//! `fe80::1%eth0` on an interface matches a resolved `fe80::1`.

use std::collections::BTreeSet;
use std::net::IpAddr;

/// Normalize an address so IPv4-mapped IPv6 compares equal to plain IPv4.
#[must_use]
pub fn canonical(addr: IpAddr) -> IpAddr {
    addr.to_canonical()
}

/// Build the local address set (IPv4 ∪ IPv6) from interface addresses.
#[must_use]
pub fn local_set(addrs: impl IntoIterator<Item = IpAddr>) -> BTreeSet<IpAddr> {
    addrs.into_iter().map(canonical).collect()
}

/// A domain is served locally when any of its resolved addresses is local.
#[must_use]
pub fn resolves_locally(resolved: &[IpAddr], local: &BTreeSet<IpAddr>) -> bool {
    resolved.iter().any(|a| local.contains(&canonical(*a)))
}

/// Comma-separated non-loopback addresses an A/AAAA record should point at.
#[must_use]
pub fn describe_targets(local: &BTreeSet<IpAddr>) -> String {
    let targets = local
        .iter()
        .filter(|a| !a.is_loopback())
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if targets.is_empty() {
        "(no non-loopback addresses found on this machine)".to_string()
    } else {
        targets.join(", ")
    }
}
