//! Address Matcher
//!
//! Pure CIDR containment for IPv4 and IPv6. No I/O, no allocation.

use crate::domain::value_objects::AddressRange;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Returns true when the top `prefix_len` bits of `addr` equal those of the
/// range base.
///
/// Addresses and ranges of different families never match.
///
/// # Examples
/// ```
/// use geolocate::{matches, AddressRange};
///
/// let range = AddressRange::parse("2001:db8::/32").unwrap();
/// assert!(matches(&"2001:db8::1".parse().unwrap(), &range));
/// assert!(!matches(&"10.0.0.1".parse().unwrap(), &range));
/// ```
pub fn matches(addr: &IpAddr, range: &AddressRange) -> bool {
    match (addr, range.base()) {
        (IpAddr::V4(a), IpAddr::V4(base)) => matches_v4(*a, base, range.prefix_len()),
        (IpAddr::V6(a), IpAddr::V6(base)) => matches_v6(a, &base, range.prefix_len()),
        _ => false,
    }
}

fn matches_v4(addr: Ipv4Addr, base: Ipv4Addr, prefix_len: u8) -> bool {
    let mask = u32::MAX
        .checked_shl(32 - u32::from(prefix_len.min(32)))
        .unwrap_or(0);
    u32::from(addr) & mask == u32::from(base) & mask
}

fn matches_v6(addr: &Ipv6Addr, base: &Ipv6Addr, prefix_len: u8) -> bool {
    let mut remaining = u32::from(prefix_len);

    for (a, b) in addr.segments().iter().zip(base.segments().iter()) {
        if remaining == 0 {
            break;
        }
        let covered = remaining.min(16);
        // 0xffff >> 16 overflows a u16; a fully covered group masks everything.
        let mask = !0xffffu16.checked_shr(covered).unwrap_or(0);
        if a & mask != b & mask {
            return false;
        }
        remaining -= covered;
    }

    true
}
