//! Ordered prefix collections.
//!
//! - [`PrefixSet`] - prefixes of a single family, kept sorted
//! - [`FamilySets`] - one [`PrefixSet`] per family, as produced by parsing

use super::{AddressFamily, Prefix};
use crate::error::CidrError;
use itertools::Itertools;
use std::fmt;

/// Sorted collection of prefixes of one family.
///
/// The set may hold overlapping or duplicate members until it has been run
/// through [`crate::processing::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefixSet {
    family: AddressFamily,
    prefixes: Vec<Prefix>,
}

impl PrefixSet {
    pub fn new(family: AddressFamily) -> PrefixSet {
        PrefixSet {
            family,
            prefixes: Vec::new(),
        }
    }

    /// Build a set from prefixes that must all belong to `family`.
    pub fn from_prefixes<I>(family: AddressFamily, prefixes: I) -> Result<PrefixSet, CidrError>
    where
        I: IntoIterator<Item = Prefix>,
    {
        let mut set = PrefixSet::new(family);
        for prefix in prefixes {
            set.check_family(prefix.family())?;
            set.prefixes.push(prefix);
        }
        set.prefixes.sort();
        Ok(set)
    }

    /// Wrap prefixes already known to be sorted and of the right family.
    pub(crate) fn from_sorted(family: AddressFamily, prefixes: Vec<Prefix>) -> PrefixSet {
        debug_assert!(prefixes.windows(2).all(|w| w[0] <= w[1]));
        PrefixSet { family, prefixes }
    }

    /// Insert a prefix at its sorted position.
    pub fn insert(&mut self, prefix: Prefix) -> Result<(), CidrError> {
        self.check_family(prefix.family())?;
        let index = self.prefixes.partition_point(|p| *p <= prefix);
        self.prefixes.insert(index, prefix);
        Ok(())
    }

    /// Fail with [`CidrError::FamilyMismatch`] unless `family` is this set's family.
    pub fn check_family(&self, family: AddressFamily) -> Result<(), CidrError> {
        if family == self.family {
            Ok(())
        } else {
            Err(CidrError::FamilyMismatch {
                left: self.family,
                right: family,
            })
        }
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prefix> {
        self.prefixes.iter()
    }

    pub fn as_slice(&self) -> &[Prefix] {
        &self.prefixes
    }

    /// Whether no two members overlap or are sibling halves of a parent.
    ///
    /// Checking neighbours is enough because the members are sorted.
    pub fn is_normalized(&self) -> bool {
        self.prefixes
            .iter()
            .tuple_windows()
            .all(|(a, b)| !a.overlaps(b) && !a.is_adjacent_mergeable(b))
    }

    /// Whether any member covers the numeric address `addr`.
    ///
    /// Only the last member starting at or below `addr` can cover it in a
    /// normalized set. Otherwise a cover must be an ancestor of that member,
    /// and each ancestor is one binary search.
    pub fn contains_addr(&self, addr: u128) -> bool {
        let end = self.prefixes.partition_point(|p| p.first() <= addr);
        let Some(candidate) = end.checked_sub(1).map(|i| self.prefixes[i]) else {
            return false;
        };
        candidate.contains_addr(addr)
            || std::iter::successors(candidate.parent(), Prefix::parent)
                .any(|ancestor| self.prefixes[..end].binary_search(&ancestor).is_ok())
    }
}

impl<'a> IntoIterator for &'a PrefixSet {
    type Item = &'a Prefix;
    type IntoIter = std::slice::Iter<'a, Prefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.iter()
    }
}

impl IntoIterator for PrefixSet {
    type Item = Prefix;
    type IntoIter = std::vec::IntoIter<Prefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.into_iter()
    }
}

impl fmt::Display for PrefixSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.prefixes.iter().join(", "))
    }
}

/// Input prefixes bucketed by family. IPv4 always comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySets {
    pub v4: PrefixSet,
    pub v6: PrefixSet,
}

impl FamilySets {
    pub fn new() -> FamilySets {
        FamilySets {
            v4: PrefixSet::new(AddressFamily::V4),
            v6: PrefixSet::new(AddressFamily::V6),
        }
    }

    /// Route a prefix to the set of its family.
    pub fn insert(&mut self, prefix: Prefix) {
        let set = self.get_mut(prefix.family());
        let index = set.prefixes.partition_point(|p| *p <= prefix);
        set.prefixes.insert(index, prefix);
    }

    fn get_mut(&mut self, family: AddressFamily) -> &mut PrefixSet {
        match family {
            AddressFamily::V4 => &mut self.v4,
            AddressFamily::V6 => &mut self.v6,
        }
    }

    /// All prefixes, IPv4 first.
    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.v4.iter().chain(self.v6.iter())
    }

    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

impl Default for FamilySets {
    fn default() -> Self {
        FamilySets::new()
    }
}

impl FromIterator<Prefix> for FamilySets {
    fn from_iter<I: IntoIterator<Item = Prefix>>(iter: I) -> Self {
        let mut sets = FamilySets::new();
        for prefix in iter {
            sets.insert(prefix);
        }
        sets
    }
}
