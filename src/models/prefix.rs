//! CIDR prefix value type.
//!
//! Provides [`Prefix`], an aligned block of addresses, with the containment,
//! overlap and sibling queries the set algebra is built on.

use super::address::{cidr_mask, cut_addr, host_mask};
use super::AddressFamily;
use crate::error::CidrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// An aligned block of `2^(width - length)` addresses.
///
/// The base address never has host bits set; [`Prefix::new`] masks them off.
/// Ordering is by family, then base address, then length, so a prefix sorts
/// before every longer prefix it contains.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix {
    family: AddressFamily,
    base: u128,
    length: u8,
}

impl Prefix {
    /// Create a prefix, masking host bits of `addr` to the network address.
    ///
    /// Fails with [`CidrError::InvalidPrefixLength`] if `length` exceeds the
    /// family width.
    pub fn new(family: AddressFamily, addr: u128, length: u8) -> Result<Prefix, CidrError> {
        let base = cut_addr(family, addr, length)?;
        Ok(Prefix {
            family,
            base,
            length,
        })
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    /// The lowest (network) address as an integer.
    pub fn first(&self) -> u128 {
        self.base
    }

    /// The highest (broadcast) address as an integer.
    pub fn last(&self) -> u128 {
        self.base | host_mask(self.family, self.length)
    }

    /// The network address.
    pub fn network(&self) -> IpAddr {
        self.family.to_ip_addr(self.base)
    }

    /// The broadcast address.
    pub fn broadcast(&self) -> IpAddr {
        self.family.to_ip_addr(self.last())
    }

    /// Number of addresses covered, `None` only for `::/0` (2^128).
    pub fn size(&self) -> Option<u128> {
        1u128.checked_shl(u32::from(self.family.width() - self.length))
    }

    /// Whether `other` lies entirely inside this prefix.
    pub fn contains(&self, other: &Prefix) -> bool {
        self.family == other.family
            && other.length >= self.length
            && other.base & self.mask() == self.base
    }

    /// Whether the numeric address `addr` lies inside this prefix.
    pub fn contains_addr(&self, addr: u128) -> bool {
        self.first() <= addr && addr <= self.last()
    }

    /// Whether the two address ranges intersect.
    ///
    /// Aligned blocks that intersect are always nested.
    pub fn overlaps(&self, other: &Prefix) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// Whether the two prefixes are the two halves of a common parent.
    pub fn is_adjacent_mergeable(&self, other: &Prefix) -> bool {
        self.family == other.family
            && self.length == other.length
            && self.length > 0
            && self.base ^ other.base == self.half_bit()
    }

    /// The prefix one bit shorter that covers this one, `None` for `/0`.
    pub fn parent(&self) -> Option<Prefix> {
        let length = self.length.checked_sub(1)?;
        Some(Prefix {
            family: self.family,
            base: self.base & self.mask_of(length),
            length,
        })
    }

    /// The lower and upper halves, `None` for a single-address prefix.
    pub fn children(&self) -> Option<(Prefix, Prefix)> {
        if self.length == self.family.width() {
            return None;
        }
        let length = self.length + 1;
        let lower = Prefix {
            family: self.family,
            base: self.base,
            length,
        };
        let upper = Prefix {
            base: self.base | lower.half_bit(),
            ..lower
        };
        Some((lower, upper))
    }

    fn mask(&self) -> u128 {
        self.mask_of(self.length)
    }

    fn mask_of(&self, length: u8) -> u128 {
        // lengths are validated at construction
        cidr_mask(self.family, length).unwrap_or(0)
    }

    /// The lowest network bit, which tells siblings apart.
    fn half_bit(&self) -> u128 {
        host_mask(self.family, self.length) + 1
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.length)
    }
}

impl FromStr for Prefix {
    type Err = CidrError;

    /// Parse `addr/len` or a bare address with the default parser settings.
    fn from_str(s: &str) -> Result<Prefix, CidrError> {
        crate::input::PrefixParser::default().parse(s)
    }
}

impl Serialize for Prefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D>(deserializer: D) -> Result<Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::from_str(&s).map_err(de::Error::custom)
    }
}
