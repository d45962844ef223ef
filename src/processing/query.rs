//! Overlap and containment queries between prefix sets.

use super::{normalize, subtract};
use crate::error::CidrError;
use crate::models::{FamilySets, PrefixSet};

/// Whether any address is in both sets.
///
/// Fails with [`CidrError::FamilyMismatch`] when the families differ.
pub fn overlap(a: &PrefixSet, b: &PrefixSet) -> Result<bool, CidrError> {
    a.check_family(b.family())?;
    let a = normalize(a);
    let b = normalize(b);

    // merge walk over two sorted, disjoint sequences
    let (mut i, mut j) = (0, 0);
    let (a, b) = (a.as_slice(), b.as_slice());
    while i < a.len() && j < b.len() {
        if a[i].first() <= b[j].last() && b[j].first() <= a[i].last() {
            return Ok(true);
        }
        if a[i].last() < b[j].last() {
            i += 1;
        } else {
            j += 1;
        }
    }
    Ok(false)
}

/// Whether every address of `b` is also in `a`.
///
/// Fails with [`CidrError::FamilyMismatch`] when the families differ.
pub fn contains(a: &PrefixSet, b: &PrefixSet) -> Result<bool, CidrError> {
    Ok(subtract(b, a)?.is_empty())
}

impl FamilySets {
    /// Whether any address is in both, comparing each family with itself only.
    pub fn overlaps(&self, other: &FamilySets) -> Result<bool, CidrError> {
        Ok(overlap(&self.v4, &other.v4)? || overlap(&self.v6, &other.v6)?)
    }

    /// Whether every address of `other` is in `self`.
    pub fn contains(&self, other: &FamilySets) -> Result<bool, CidrError> {
        Ok(contains(&self.v4, &other.v4)? && contains(&self.v6, &other.v6)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Prefix;

    fn sets(items: &[&str]) -> FamilySets {
        items.iter().map(|s| s.parse::<Prefix>().unwrap()).collect()
    }

    #[test]
    fn test_overlap() {
        let check = |a: &[&str], b: &[&str]| sets(a).overlaps(&sets(b)).unwrap();
        assert!(check(&["1.0.0.0/24"], &["1.0.0.0/30"]));
        assert!(check(&["2::/8"], &["1::/8"]));
        assert!(!check(&["1.0.0.0/25"], &["1.0.0.128/25"]));
        assert!(!check(&["0.0.0.0/0"], &["::0/0"]));
        assert!(!check(&["2::/64"], &["1::/64"]));
        assert!(check(&["1.0.0.0", "2.0.0.0"], &["0.0.0.0/6"]));
        assert!(!check(&["::1"], &["0.0.0.1", "0.0.0.2"]));
        assert!(check(&["fe80:1:0:0:0:0:0:0"], &["fe80::/10"]));
        assert!(!check(&[], &["10.0.0.0/8"]));
    }

    #[test]
    fn test_contains() {
        let check = |a: &[&str], b: &[&str]| sets(a).contains(&sets(b)).unwrap();
        assert!(check(&["1.0.0.0/24"], &["1.0.0.1"]));
        assert!(check(&["1.0.0.0/24", "2.0.0.0/24"], &["1.0.0.1", "2.0.0.1"]));
        assert!(check(&["1.0.0.0/25", "1.0.0.128/25"], &["1.0.0.0/24"]));
        assert!(!check(&["1.0.0.0/24"], &["1.0.0.0/23"]));
        assert!(!check(&["1.0.0.0/24"], &["::1"]));
        assert!(check(&["::/0"], &["::1", "ffff::/16"]));
        assert!(check(&["10.0.0.0/8"], &[]));
    }

    #[test]
    fn test_set_queries_reject_mixed_families() {
        let v4 = sets(&["10.0.0.0/8"]).v4;
        let v6 = sets(&["::/0"]).v6;
        assert!(matches!(
            overlap(&v4, &v6),
            Err(CidrError::FamilyMismatch { .. })
        ));
        assert!(matches!(
            contains(&v6, &v4),
            Err(CidrError::FamilyMismatch { .. })
        ));
    }

    #[test]
    fn test_zone_is_ignored() {
        let contains = |a: &[&str], b: &[&str]| sets(a).contains(&sets(b)).unwrap();
        assert!(contains(&["fe80::%int"], &["fe80::"]));
        assert!(contains(&["fe80::%int"], &["fe80::%int"]));
        assert!(contains(&["fe80::"], &["fe80::%int"]));
        assert!(contains(&["fe80::%int/64"], &["fe80::/64"]));
        assert!(contains(&["fe80::%int/64"], &["fe80::%int/64"]));
        assert!(contains(&["fe80::/64"], &["fe80::%int/64"]));
        assert!(sets(&["fe80::1%eth0"]).overlaps(&sets(&["fe80::/64"])).unwrap());
    }
}
