//! Mask and boundary arithmetic on numeric addresses.
//!
//! Every helper takes the [`AddressFamily`] so one implementation serves both
//! the 32-bit and the 128-bit address space.

use super::AddressFamily;
use crate::error::CidrError;
use itertools::Itertools;
use std::net::IpAddr;

/// How addresses are written out. Only IPv6 text is affected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Notation {
    /// Replace the longest run of zero groups with `::`.
    pub compress: bool,
    /// Write an embedded IPv4 tail (`::ffff:1.2.3.4`) as two hex groups.
    pub hexify: bool,
}

impl Default for Notation {
    fn default() -> Self {
        Notation {
            compress: true,
            hexify: false,
        }
    }
}

fn check_len(family: AddressFamily, len: u8) -> Result<(), CidrError> {
    if len > family.width() {
        Err(CidrError::InvalidPrefixLength {
            length: len,
            family,
        })
    } else {
        Ok(())
    }
}

/// Mask covering the host bits of a prefix of length `len`.
///
/// Callers must have validated `len`.
pub(crate) fn host_mask(family: AddressFamily, len: u8) -> u128 {
    let host_bits = u32::from(family.width() - len);
    1u128
        .checked_shl(host_bits)
        .map(|size| size - 1)
        .unwrap_or(u128::MAX)
}

/// Convert a prefix length to a network mask.
///
/// # Examples
/// ```
/// use cidr_tools::models::{cidr_mask, AddressFamily};
/// assert_eq!(cidr_mask(AddressFamily::V4, 24).unwrap(), 0xFFFF_FF00);
/// ```
pub fn cidr_mask(family: AddressFamily, len: u8) -> Result<u128, CidrError> {
    check_len(family, len)?;
    Ok(family.all_ones() & !host_mask(family, len))
}

/// Network address of `addr` for prefix length `len`.
pub fn cut_addr(family: AddressFamily, addr: u128, len: u8) -> Result<u128, CidrError> {
    Ok(addr & cidr_mask(family, len)?)
}

/// Text of a numeric address in the given notation. IPv6 hex digits are lowercase.
pub fn format_address(family: AddressFamily, addr: u128, notation: Notation) -> String {
    match family.to_ip_addr(addr) {
        IpAddr::V4(ip) => ip.to_string(),
        IpAddr::V6(ip) if notation.compress && !notation.hexify => ip.to_string(),
        IpAddr::V6(ip) if notation.compress => compress_groups(&ip.segments()),
        IpAddr::V6(ip) => ip.segments().iter().map(|g| format!("{g:x}")).join(":"),
    }
}

/// Hex groups with the first longest run of two or more zero groups written as `::`.
fn compress_groups(groups: &[u16; 8]) -> String {
    let mut best = (0, 0);
    let mut i = 0;
    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }
        if i - start > best.1 {
            best = (start, i - start);
        }
    }

    let hex = |gs: &[u16]| gs.iter().map(|g| format!("{g:x}")).join(":");
    if best.1 < 2 {
        return hex(&groups[..]);
    }
    let (start, len) = best;
    format!("{}::{}", hex(&groups[..start]), hex(&groups[start + len..]))
}
