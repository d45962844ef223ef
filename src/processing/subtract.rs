//! Exclusion of one prefix set from another.
//!
//! Each base prefix is carved by bisection: a base that strictly contains an
//! exclude is split into halves, each half takes the excludes that fall inside
//! it, and a half without excludes is kept whole. Halves that are themselves
//! excluded are dropped. Every kept half is an aligned prefix, so the remainder
//! needs no further decomposition, and a base with `k` excludes costs at most
//! `k` times the address width in splits.

use super::normalize;
use crate::error::CidrError;
use crate::models::{FamilySets, Prefix, PrefixSet};

/// What exclusion did to a single (normalized) base prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remainder {
    /// No exclude touched the base.
    Unchanged(Prefix),
    /// Excludes covered the whole base.
    Removed(Prefix),
    /// Part of the base is left, as ascending disjoint fragments.
    Carved { base: Prefix, fragments: Vec<Prefix> },
}

impl Remainder {
    /// The base prefix this outcome belongs to.
    pub fn base(&self) -> &Prefix {
        match self {
            Remainder::Unchanged(base) | Remainder::Removed(base) => base,
            Remainder::Carved { base, .. } => base,
        }
    }

    /// The prefixes left of the base.
    pub fn prefixes(&self) -> &[Prefix] {
        match self {
            Remainder::Unchanged(base) => std::slice::from_ref(base),
            Remainder::Removed(_) => &[],
            Remainder::Carved { fragments, .. } => fragments,
        }
    }
}

/// Push what is left of `prefix` after removing `excludes` onto `out`, in ascending order.
///
/// `excludes` are sorted, disjoint and each one nested with `prefix`.
fn carve(prefix: Prefix, excludes: &[Prefix], out: &mut Vec<Prefix>) {
    match excludes {
        [] => out.push(prefix),
        [first, ..] if first.contains(&prefix) => {}
        _ => {
            // some exclude is strictly inside, so prefix is never a single address here
            let Some((lower, upper)) = prefix.children() else {
                return;
            };
            let split = excludes.partition_point(|e| e.last() <= lower.last());
            carve(lower, &excludes[..split], out);
            carve(upper, &excludes[split..], out);
        }
    }
}

/// Exclude `exclude` from each prefix of `base`, reporting per base prefix.
///
/// Both sets are normalized first. Fails with [`CidrError::FamilyMismatch`]
/// when the families differ.
pub fn exclude_each(base: &PrefixSet, exclude: &PrefixSet) -> Result<Vec<Remainder>, CidrError> {
    base.check_family(exclude.family())?;
    let bases = normalize(base);
    let excludes = normalize(exclude);
    let excludes = excludes.as_slice();

    let mut report = Vec::with_capacity(bases.len());
    for b in bases {
        // excludes are sorted and disjoint, so their last addresses ascend too
        let start = excludes.partition_point(|e| e.last() < b.first());
        let end = start + excludes[start..].partition_point(|e| e.first() <= b.last());
        let overlapping = &excludes[start..end];

        if overlapping.is_empty() {
            report.push(Remainder::Unchanged(b));
            continue;
        }
        for e in overlapping {
            assert!(
                b.overlaps(e),
                "{b} and {e} intersect without nesting, should never happen."
            );
        }

        let mut fragments = Vec::new();
        carve(b, overlapping, &mut fragments);
        log::trace!(
            "carve {} excludes out of {b}: {} fragments",
            overlapping.len(),
            fragments.len()
        );
        report.push(if fragments.is_empty() {
            Remainder::Removed(b)
        } else {
            Remainder::Carved { base: b, fragments }
        });
    }
    Ok(report)
}

/// Addresses of `base` that are not in `exclude`, as a normalized set.
///
/// Fails with [`CidrError::FamilyMismatch`] when the families differ.
pub fn subtract(base: &PrefixSet, exclude: &PrefixSet) -> Result<PrefixSet, CidrError> {
    let report = exclude_each(base, exclude)?;
    let remaining: Vec<Prefix> = report
        .iter()
        .flat_map(|r| r.prefixes().iter().copied())
        .collect();
    log::debug!(
        "subtract {}: {} base, {} exclude -> {} prefixes",
        base.family(),
        base.len(),
        exclude.len(),
        remaining.len()
    );
    // fragments of different bases never touch, but keep the result canonical regardless
    Ok(normalize(&PrefixSet::from_sorted(base.family(), remaining)))
}

impl FamilySets {
    /// Subtract per family.
    pub fn subtract(&self, exclude: &FamilySets) -> Result<FamilySets, CidrError> {
        Ok(FamilySets {
            v4: subtract(&self.v4, &exclude.v4)?,
            v6: subtract(&self.v6, &exclude.v6)?,
        })
    }

    /// Per-base exclusion report, IPv4 first.
    pub fn exclude_each(&self, exclude: &FamilySets) -> Result<Vec<Remainder>, CidrError> {
        let mut report = exclude_each(&self.v4, &exclude.v4)?;
        report.extend(exclude_each(&self.v6, &exclude.v6)?);
        Ok(report)
    }
}
