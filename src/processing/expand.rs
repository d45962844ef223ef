//! Lazy enumeration of the addresses covered by a prefix set.

use super::normalize;
use crate::models::{AddressFamily, FamilySets, Prefix, PrefixSet};
use std::iter::FusedIterator;
use std::net::IpAddr;

/// Remaining addresses of the prefix being walked.
#[derive(Debug, Clone)]
struct Cursor {
    family: AddressFamily,
    next: u128,
    last: u128,
}

/// Ascending iterator over individual addresses, one prefix at a time.
///
/// Addresses are produced on demand, so `::/0` can be walked without
/// allocating. Clone it to restart from the current position.
#[derive(Debug, Clone)]
pub struct Addresses {
    prefixes: std::vec::IntoIter<Prefix>,
    cursor: Option<Cursor>,
}

impl Addresses {
    fn new(prefixes: Vec<Prefix>) -> Addresses {
        Addresses {
            prefixes: prefixes.into_iter(),
            cursor: None,
        }
    }
}

impl Iterator for Addresses {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        loop {
            if let Some(cursor) = &mut self.cursor {
                let addr = cursor.family.to_ip_addr(cursor.next);
                if cursor.next == cursor.last {
                    self.cursor = None;
                } else {
                    cursor.next += 1;
                }
                return Some(addr);
            }

            let prefix = self.prefixes.next()?;
            self.cursor = Some(Cursor {
                family: prefix.family(),
                next: prefix.first(),
                last: prefix.last(),
            });
        }
    }
}

impl FusedIterator for Addresses {}

/// Enumerate every address of `set` in ascending order.
///
/// The set is normalized first, so overlapping members yield each address once.
pub fn expand(set: &PrefixSet) -> Addresses {
    Addresses::new(normalize(set).into_iter().collect())
}

impl FamilySets {
    /// Enumerate all IPv4 addresses, then all IPv6 addresses.
    pub fn expand(&self) -> Addresses {
        let merged = self.merge();
        Addresses::new(merged.iter().copied().collect())
    }
}
