//! IPv4 / IPv6 address families.
//!
//! Addresses of both families are carried as `u128`; an IPv4 address only
//! ever uses the low 32 bits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// One of the two address spaces. Prefixes of different families never mix.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Both families, in output order.
    pub const ALL: [AddressFamily; 2] = [AddressFamily::V4, AddressFamily::V6];

    /// Number of bits in an address of this family.
    pub const fn width(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }

    /// All address bits of this family set.
    pub const fn all_ones(self) -> u128 {
        match self {
            AddressFamily::V4 => u32::MAX as u128,
            AddressFamily::V6 => u128::MAX,
        }
    }

    /// Parse the canonical textual address grammar of this family.
    pub fn parse_address(self, text: &str) -> Option<u128> {
        match self {
            AddressFamily::V4 => Ipv4Addr::from_str(text).ok().map(|a| u32::from(a) as u128),
            AddressFamily::V6 => Ipv6Addr::from_str(text).ok().map(u128::from),
        }
    }

    /// Detect the family of a bare address and return its numeric value.
    pub fn detect(text: &str) -> Option<(AddressFamily, u128)> {
        AddressFamily::ALL
            .iter()
            .find_map(|family| family.parse_address(text).map(|addr| (*family, addr)))
    }

    /// Convert a numeric address of this family to a std address.
    ///
    /// Bits above the family width are ignored.
    pub fn to_ip_addr(self, addr: u128) -> IpAddr {
        match self {
            AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from((addr & self.all_ones()) as u32)),
            AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(addr)),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}
